//! Result rendering: JSON for machines, an aligned summary for humans.

use lift_core::responses::{ImportResult, ValidationReport};

use crate::cli::OutputFormat;

pub fn print_import(result: &ImportResult, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Table => {
            for line in import_lines(result) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

pub fn print_validation(report: &ValidationReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Table => {
            for line in validation_lines(report) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn import_lines(result: &ImportResult) -> Vec<String> {
    let verdict = if result.success { "succeeded" } else { "failed" };
    let mode = if result.dry_run { " (dry run)" } else { "" };

    let mut lines = vec![format!(
        "import {verdict}{mode} in {}ms",
        result.elapsed_ms
    )];

    if let Some(failure) = &result.failure {
        lines.push(format!("failure: {failure}"));
    }
    if let Some(workspace) = &result.workspace {
        lines.push(format!("workspace: {} (id {})", workspace.name, workspace.id));
    }

    let counts = &result.counts;
    lines.push(format!("  tasks imported:         {}", counts.tasks_imported));
    lines.push(format!(
        "  resources imported:     {}",
        counts.resources_imported
    ));
    lines.push(format!(
        "  assignments configured: {}",
        counts.assignments_imported
    ));
    lines.push(format!("  sheets created:         {}", counts.sheets_created));
    lines.push(format!(
        "  columns created:        {}",
        counts.columns_created
    ));
    lines.push(format!("  rows created:           {}", counts.rows_created));
    lines.push(format!(
        "  reference values added: {}",
        counts.reference_values_added
    ));

    if !result.errors.is_empty() {
        lines.push(format!("rejected records ({}):", result.errors.len()));
        for error in &result.errors {
            lines.push(format!("  - {error}"));
        }
    }
    if !result.warnings.is_empty() {
        lines.push(format!("warnings ({}):", result.warnings.len()));
        for warning in &result.warnings {
            lines.push(format!("  - {warning}"));
        }
    }

    lines
}

fn validation_lines(report: &ValidationReport) -> Vec<String> {
    let verdict = if report.valid { "valid" } else { "invalid" };
    let mut lines = vec![
        format!("source export is {verdict}"),
        format!("  tasks:       {}", report.tasks),
        format!("  resources:   {}", report.resources),
        format!("  assignments: {}", report.assignments),
    ];

    if !report.errors.is_empty() {
        lines.push(format!("rejected records ({}):", report.errors.len()));
        for error in &report.errors {
            lines.push(format!("  - {error}"));
        }
    }

    lines
}
