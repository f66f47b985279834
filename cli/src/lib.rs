// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod cli;
mod cmd_events;
mod cmd_tree;
mod config;
mod event_formatter;
mod table;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::cmd_events::CmdEvents;
pub use crate::cmd_tree::CmdTree;
pub use crate::config::{Config, parse_config};
pub use crate::event_formatter::{EventColumn, EventFormatter};
pub use crate::util::OutputFormat;
