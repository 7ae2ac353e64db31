use std::path::Path;

use fim_core::Token;

use crate::{read_source, OutputFormat};

pub(crate) fn cmd_tokens(file: &Path, output: OutputFormat, quiet: bool) {
    let src = read_source(file, output, quiet);
    let tokens = fim_core::tokenize(&src);

    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&tokens)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", json);
        }
        OutputFormat::Text => {
            let width = tokens.len().to_string().len();
            for (idx, t) in tokens.iter().enumerate() {
                println!("{}", format_row(idx, width, t));
            }
            if !quiet {
                println!();
                println!("{} tokens", tokens.len());
            }
        }
    }
}

/// `idx. start:end text -> LABEL`, with the index right-aligned to `width`.
fn format_row(idx: usize, width: usize, t: &Token) -> String {
    let range = format!("{}:{}", t.start, t.end());
    format!(
        "{:>width$}. {:<11} {:<32} -> {}",
        idx,
        range,
        t.text,
        t.kind,
        width = width
    )
}
