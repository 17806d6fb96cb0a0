//! Terminal rendering of diagnostics.
//!
//! Output has the familiar shape:
//!
//! ```text
//! error[E0001]: unterminated string literal
//!   --> 2:5
//!    |
//!  2 |     "abc
//!    |     ^ string starts here
//! ```
//!
//! Line and column are printed 1-based for humans; the underlying
//! [`Position`](kel_ir::Position) values stay 0-based.

use std::io::{self, Write};

use kel_ir::{LineIndex, Span};

use crate::{Diagnostic, Label};

mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const BOLD: &str = "\x1b[1m";
    pub const GUTTER: &str = "\x1b[1;34m";
    pub const RESET: &str = "\x1b[0m";
}

/// Sink for rendered diagnostics.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn flush(&mut self);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
        }
        self.flush();
    }
}

/// Color output mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against whether the destination is a TTY.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse `auto`, `always` or `never` (case-insensitive).
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

struct SourceView {
    text: String,
    index: LineIndex,
}

/// Human-readable emitter writing to any `io::Write`.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    source: Option<SourceView>,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Attach the source text so labels render as line/column plus a snippet
    /// instead of raw byte spans.
    #[must_use]
    pub fn with_source(mut self, text: &str) -> Self {
        self.source = Some(SourceView {
            text: text.to_owned(),
            index: LineIndex::build(text),
        });
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn paint(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_header(&mut self, diagnostic: &Diagnostic) {
        self.paint("error", colors::ERROR);
        self.paint(&format!("[{}]", diagnostic.code), colors::BOLD);
        let _ = writeln!(self.writer, ": {}", diagnostic.message);
    }

    fn write_label(&mut self, label: &Label, gutter: usize) {
        let Some(view) = self.source.take() else {
            let marker = if label.is_primary { "-->" } else { "   " };
            let _ = writeln!(self.writer, "  {marker} {:?}: {}", label.span, label.message);
            return;
        };

        let begin = view.index.position(label.span.start);
        let pad = " ".repeat(gutter);
        if label.is_primary {
            let _ = writeln!(
                self.writer,
                "{pad}--> {}:{}",
                begin.line + 1,
                begin.column + 1
            );
        }

        let line_text = view.index.line_text(&view.text, begin.line).unwrap_or("");
        let width = underline_width(label.span, line_text, begin.column);
        let mark = if label.is_primary { "^" } else { "-" };
        let underline = format!(
            "{}{}",
            " ".repeat(begin.column as usize),
            mark.repeat(width)
        );

        self.paint(&format!("{pad} |"), colors::GUTTER);
        let _ = writeln!(self.writer);
        self.paint(
            &format!("{:>gutter$} | ", begin.line + 1, gutter = gutter),
            colors::GUTTER,
        );
        let _ = writeln!(self.writer, "{line_text}");
        self.paint(&format!("{pad} | "), colors::GUTTER);
        let color = if label.is_primary {
            colors::ERROR
        } else {
            colors::GUTTER
        };
        if label.message.is_empty() {
            self.paint(&underline, color);
        } else {
            self.paint(&format!("{underline} {}", label.message), color);
        }
        let _ = writeln!(self.writer);

        self.source = Some(view);
    }

    fn gutter_width(&self, diagnostic: &Diagnostic) -> usize {
        let Some(view) = &self.source else {
            return 0;
        };
        diagnostic
            .labels
            .iter()
            .map(|l| (view.index.position(l.span.start).line + 1).to_string().len())
            .max()
            .unwrap_or(1)
    }
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

/// Number of carets under a label: the span's extent on its first line, at
/// least one.
fn underline_width(span: Span, line_text: &str, column: u32) -> usize {
    let remaining = line_text.len().saturating_sub(column as usize);
    (span.len() as usize).min(remaining).max(1)
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.write_header(diagnostic);

        let gutter = self.gutter_width(diagnostic);
        let (primary, secondary): (Vec<&Label>, Vec<&Label>) =
            diagnostic.labels.iter().partition(|l| l.is_primary);
        for label in primary.into_iter().chain(secondary) {
            self.write_label(label, gutter);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "{} = ", " ".repeat(gutter));
            self.paint("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }
        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}
