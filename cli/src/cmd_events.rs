// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::PathBuf;

use clap::{ArgMatches, Command};
use jcal::Event;

use crate::config::Config;
use crate::event_formatter::EventFormatter;
use crate::util::{CommonArgs, OutputFormat, decode_input};

#[derive(Debug, Clone)]
pub struct CmdEvents {
    pub input: PathBuf,
    pub max_depth: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub verbose: bool,
}

impl CmdEvents {
    pub const NAME: &str = "events";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("e")
            .about("List the events of a jCal document")
            .arg(CommonArgs::input())
            .arg(CommonArgs::max_depth())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            input: CommonArgs::get_input(matches),
            max_depth: CommonArgs::get_max_depth(matches),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        let max_depth = self.max_depth.unwrap_or(config.max_depth);
        let calendar = decode_input(&self.input, max_depth).await?;

        let events: Vec<&Event> = calendar.iter_events().collect();
        let formatter = EventFormatter::new(config.time_zone()?)
            .with_output_format(self.output_format.unwrap_or(config.output_format))
            .with_verbose(self.verbose);
        print!("{}", formatter.format(&events));
        Ok(())
    }
}
