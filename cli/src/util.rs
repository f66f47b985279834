// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Arg, ArgMatches, ValueHint, arg, value_parser};
use jcal::{Component, Decoder};
use tokio::io::AsyncReadExt;

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

/// The output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[default]
    Table,
}

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn input() -> Arg {
        arg!(input: <FILE>)
            .help("Path to the jCal document, or - for stdin")
            .value_parser(value_parser!(PathBuf))
            .value_hint(ValueHint::FilePath)
    }

    pub fn get_input(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(STDIN_PATH))
    }

    pub fn max_depth() -> Arg {
        arg!(--"max-depth" <DEPTH> "Deepest component nesting to accept")
            .value_parser(value_parser!(usize))
    }

    pub fn get_max_depth(matches: &ArgMatches) -> Option<usize> {
        matches.get_one("max-depth").copied()
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
    }

    pub fn get_output_format(matches: &ArgMatches) -> Option<OutputFormat> {
        matches.get_one("output-format").copied()
    }

    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show more detailed information")
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag("verbose")
    }
}

/// Read the whole input, from stdin if the path is `-`.
pub async fn read_input(path: &Path) -> Result<Vec<u8>, Box<dyn Error>> {
    if path.as_os_str() == STDIN_PATH {
        tracing::debug!("reading jCal document from stdin");
        let mut buf = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut buf)
            .await
            .map_err(|e| format!("Failed to read stdin: {e}"))?;
        return Ok(buf);
    }

    tracing::debug!(path = %path.display(), "reading jCal document");
    let buf = tokio::fs::read(path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    Ok(buf)
}

/// Read and decode a jCal document with the given nesting limit.
pub async fn decode_input(path: &Path, max_depth: usize) -> Result<Component, Box<dyn Error>> {
    let buf = read_input(path).await?;
    let component = Decoder::new().with_max_depth(max_depth).decode_slice(&buf)?;
    tracing::debug!(
        name = %component.name,
        events = component.iter_events().count(),
        "decoded jCal document"
    );
    Ok(component)
}
