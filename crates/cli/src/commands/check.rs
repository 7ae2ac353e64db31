use std::path::Path;

use crate::{exit_with_parse_error, read_source, OutputFormat};

pub(crate) fn cmd_check(file: &Path, output: OutputFormat, quiet: bool) {
    let src = read_source(file, output, quiet);
    let report = match fim_core::parse(&src) {
        Ok(r) => r,
        Err(e) => exit_with_parse_error(&e, file, output, quiet),
    };

    let paragraphs = report.functions().count();
    let globals = report.body.len() - paragraphs;
    tracing::debug!(paragraphs, globals, "check passed");

    match output {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "ok": true,
                "title": report.title,
                "author": report.author,
                "paragraphs": paragraphs,
                "globals": globals,
                "grammar_version": fim_core::GRAMMAR_VERSION,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).unwrap_or_else(|_| summary.to_string())
            );
        }
        OutputFormat::Text => {
            if !quiet {
                println!(
                    "ok: {} by {} ({} paragraphs)",
                    report.title, report.author, paragraphs
                );
            }
        }
    }
}
