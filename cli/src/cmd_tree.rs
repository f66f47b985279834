// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use clap::{ArgMatches, Command};
use colored::Colorize;
use jcal::Component;

use crate::config::Config;
use crate::util::{CommonArgs, decode_input};

const INDENT: &str = "  ";

#[derive(Debug, Clone)]
pub struct CmdTree {
    pub input: PathBuf,
    pub max_depth: Option<usize>,
}

impl CmdTree {
    pub const NAME: &str = "tree";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Print the component tree of a jCal document")
            .arg(CommonArgs::input())
            .arg(CommonArgs::max_depth())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            input: CommonArgs::get_input(matches),
            max_depth: CommonArgs::get_max_depth(matches),
        }
    }

    pub async fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "printing component tree...");
        let max_depth = self.max_depth.unwrap_or(config.max_depth);
        let calendar = decode_input(&self.input, max_depth).await?;
        print!("{}", Tree(&calendar));
        Ok(())
    }
}

/// One line per component, indented by nesting depth.
struct Tree<'a>(&'a Component);

impl fmt::Display for Tree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_component(f, self.0, 0)
    }
}

fn write_component(f: &mut fmt::Formatter<'_>, component: &Component, depth: usize) -> fmt::Result {
    writeln!(
        f,
        "{}{} ({}, {})",
        INDENT.repeat(depth),
        component.name.bold(),
        plural(component.properties.len(), "property", "properties"),
        plural(component.events.len(), "event", "events"),
    )?;
    for sub in &component.sub_components {
        write_component(f, sub, depth + 1)?;
    }
    Ok(())
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}
