use std::path::Path;

use fim_core::{Report, TopLevel};

use crate::{exit_with_parse_error, read_source, OutputFormat};

pub(crate) fn cmd_parse(file: &Path, output: OutputFormat, quiet: bool) {
    let src = read_source(file, output, quiet);
    let report = match fim_core::parse(&src) {
        Ok(r) => r,
        Err(e) => exit_with_parse_error(&e, file, output, quiet),
    };

    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", json);
        }
        OutputFormat::Text => {
            if !quiet {
                print!("{}", render_header(&report));
                println!();
            }
            println!("{:#?}", report.body);
        }
    }
}

/// Title, author, then one line per paragraph and global.
fn render_header(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!("Report: {}\n", report.title));
    out.push_str(&format!("Author: {}\n", report.author));

    for item in &report.body {
        match item {
            TopLevel::Function(f) => {
                let marker = if f.is_main { "*" } else { "-" };
                let ret = f
                    .return_type
                    .map(|t| format!(", returns {:?}", t))
                    .unwrap_or_default();
                out.push_str(&format!(
                    "  {} {} ({} parameters{})\n",
                    marker,
                    f.name,
                    f.parameters.len(),
                    ret
                ));
            }
            TopLevel::Declaration(d) => {
                let constant = if d.constant { "always " } else { "" };
                out.push_str(&format!(
                    "  = {} ({}{:?})\n",
                    d.identifier, constant, d.declared_type
                ));
            }
        }
    }
    out
}
