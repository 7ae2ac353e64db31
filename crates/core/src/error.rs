use serde::Serialize;

/// A positioned error raised while building a report.
///
/// Line and column are 1-based and derived from the byte offset of the
/// offending token. `Display` gives the one-line form; [`ParseError::render`]
/// adds the source line and a caret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("[line {line}:{column}] {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
    #[serde(skip)]
    pub line_text: String,
}

impl ParseError {
    /// Build an error for byte `offset` of `source`. Offsets past the end
    /// clamp to the last byte. Newlines are counted up to and including
    /// the failing byte, so an offset on a `\n` lands at the start of the
    /// following line.
    pub fn at(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let bytes = source.as_bytes();
        let idx = offset.min(bytes.len().saturating_sub(1));

        let upto = &bytes[..(idx + 1).min(bytes.len())];
        let line = 1 + upto.iter().filter(|b| **b == b'\n').count();
        let line_start = upto
            .iter()
            .rposition(|b| *b == b'\n')
            .map_or(0, |p| p + 1);
        let line_end = bytes[line_start..]
            .iter()
            .position(|b| *b == b'\n')
            .map_or(bytes.len(), |p| line_start + p);

        ParseError {
            message: message.into(),
            line,
            column: (idx + 1).saturating_sub(line_start).max(1),
            offset,
            line_text: source[line_start..line_end].to_owned(),
        }
    }

    /// Multi-line form: header, the offending line, and a caret under the
    /// column. Leading indentation is stripped from the echoed line.
    pub fn render(&self) -> String {
        let expanded = self.line_text.replace('\t', " ");
        let trimmed = expanded.trim_start_matches(' ');
        let indent = expanded.len() - trimmed.len();
        let pad = (self.column - 1).saturating_sub(indent);
        format!("{}\n{}\n{}^", self, trimmed, " ".repeat(pad))
    }

    /// JSON shape used by the CLI's `--output json` mode.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "message": self.message,
            "line":    self.line,
            "column":  self.column,
            "offset":  self.offset,
        })
    }
}
