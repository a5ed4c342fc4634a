// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! chorus-p - parallel-only runner.

use chorus_cli::EntryMode;

#[tokio::main]
async fn main() {
    std::process::exit(chorus_cli::main_for(EntryMode::Parallel).await);
}
