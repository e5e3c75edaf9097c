//! Line-oriented source writer with symbol annotations.
//!
//! Generators push lines through a [`Printer`]. Before emitting a declaration
//! they call [`Printer::annotate`]; the next line containing the symbol's
//! identifier records an [`Annotation`] with the identifier's byte range in the
//! final output.

use crate::descriptor::SourceLocation;
use serde::Serialize;

const INDENT: &str = "    ";

/// Column limit for wrapped comments
const WRAP_WIDTH: usize = 80;

/// Emitted symbol traced back to the descriptor it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// `Type` or `Type.method`
    pub symbol: String,
    pub location: SourceLocation,
    /// Byte offset of the identifier in the generated content
    pub begin: usize,
    /// Byte offset one past the identifier
    pub end: usize,
}

#[derive(Debug, Default)]
pub struct Printer {
    content: String,
    depth: usize,
    pending: Vec<(String, SourceLocation)>,
    annotations: Vec<Annotation>,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotate the next emitted occurrence of `symbol`.
    ///
    /// The identifier searched for is the last `.`-separated segment, exactly
    /// as emitted (`r#type` for a raw identifier).
    pub fn annotate(&mut self, symbol: impl Into<String>, location: &SourceLocation) {
        self.pending.push((symbol.into(), location.clone()));
    }

    /// Emit one line at the current indentation
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.content.push('\n');
            return;
        }

        for _ in 0..self.depth {
            self.content.push_str(INDENT);
        }
        let start = self.content.len();
        self.content.push_str(text);
        self.content.push('\n');
        self.resolve_pending(start, text);
    }

    pub fn blank(&mut self) {
        self.content.push('\n');
    }

    /// Emit `header {` and indent
    pub fn open(&mut self, header: impl AsRef<str>) {
        self.line(format!("{} {{", header.as_ref()));
        self.depth += 1;
    }

    /// Dedent and emit `}` followed by `trailer`
    pub fn close(&mut self, trailer: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(format!("}}{trailer}"));
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Emit `text` as `///` doc lines, word-wrapped
    pub fn doc(&mut self, text: &str) {
        self.wrapped("///", text);
    }

    /// Emit `text` as `//` comment lines, word-wrapped
    pub fn comment(&mut self, text: &str) {
        self.wrapped("//", text);
    }

    /// Emit protobuf leading comments as doc lines, keeping their line breaks.
    ///
    /// Lines are trimmed and untagged code fences become ```` ```text ````, so
    /// comment text never turns into a doctest.
    pub fn doc_lines(&mut self, comments: &str) {
        let lines: Vec<&str> = comments.trim_end().lines().map(str::trim).collect();
        let mut in_fence = false;
        for line in lines {
            if let Some(info) = line.strip_prefix("```") {
                let opening = !in_fence;
                in_fence = !in_fence;
                if opening && info.trim().is_empty() {
                    self.line("/// ```text");
                    continue;
                }
            }
            if line.is_empty() {
                self.line("///");
            } else {
                self.line(format!("/// {line}"));
            }
        }
    }

    fn wrapped(&mut self, prefix: &str, text: &str) {
        let available = WRAP_WIDTH
            .saturating_sub(self.depth * INDENT.len() + prefix.len() + 1)
            .max(20);
        let mut current = String::new();
        for word in text.split_whitespace() {
            if !current.is_empty() && current.len() + 1 + word.len() > available {
                self.line(format!("{prefix} {current}"));
                current.clear();
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if current.is_empty() {
            self.line(prefix);
        } else {
            self.line(format!("{prefix} {current}"));
        }
    }

    fn resolve_pending(&mut self, start: usize, text: &str) {
        if self.pending.is_empty() {
            return;
        }

        let mut unresolved = Vec::new();
        for (symbol, location) in std::mem::take(&mut self.pending) {
            // Raw identifiers keep their `r#` so keywords on the line never match
            let ident = symbol.rsplit('.').next().unwrap_or(symbol.as_str());
            match find_ident(text, ident) {
                Some(offset) => self.annotations.push(Annotation {
                    begin: start + offset,
                    end: start + offset + ident.len(),
                    symbol,
                    location,
                }),
                None => unresolved.push((symbol, location)),
            }
        }
        self.pending = unresolved;
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Finish writing and return the content with its annotations
    pub fn finish(self) -> (String, Vec<Annotation>) {
        for (symbol, _) in &self.pending {
            tracing::warn!(%symbol, "annotated symbol was never emitted");
        }
        (self.content, self.annotations)
    }
}

/// Byte offset of `ident` in `text` as a whole identifier
fn find_ident(text: &str, ident: &str) -> Option<usize> {
    if ident.is_empty() {
        return None;
    }
    text.match_indices(ident).map(|(i, _)| i).find(|&i| {
        let before = text[..i].chars().next_back();
        let after = text[i + ident.len()..].chars().next();
        !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
    })
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
#[path = "printer/printer_tests.rs"]
mod printer_tests;
