// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Final summary table: `Task | FinalExitCode | Retries | Time(s)`.

use std::io::Write;

use chorus_core::{format_seconds, TaskResult, KILLED_EXIT_CODE};

use crate::table::{Column, RowTone, Table};

pub fn render(results: &[TaskResult], out: &mut impl Write) {
    let mut table = Table::new(columns());
    for result in results {
        table.row(tone(result), cells(result));
    }
    table.render(out);
}

fn columns() -> Vec<Column> {
    vec![
        Column::left("Task"),
        Column::right("FinalExitCode"),
        Column::right("Retries"),
        Column::right("Time(s)"),
    ]
}

fn tone(result: &TaskResult) -> RowTone {
    match result.code {
        Some(0) => RowTone::Plain,
        Some(KILLED_EXIT_CODE) | None => RowTone::Muted,
        Some(_) => RowTone::Failed,
    }
}

fn cells(result: &TaskResult) -> Vec<String> {
    let code = match result.code {
        None => "-".to_string(),
        Some(KILLED_EXIT_CODE) => format!("{KILLED_EXIT_CODE} (Killed)"),
        Some(code) => code.to_string(),
    };
    vec![
        result.name.clone(),
        code,
        result.retries.to_string(),
        format_seconds(result.duration_ms),
    ]
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
