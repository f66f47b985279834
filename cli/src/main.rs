// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! jcal - inspect jCal documents and the events they contain

use std::process::ExitCode;

use jcal_cli::run;

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}
