//! Rendered glyph grids and their text encodings.

use std::fmt::Write as _;
use std::str::FromStr;

use serde::Serialize;

use super::resample::CellColor;

/// One output glyph, optionally colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub glyph: char,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<CellColor>,
}

impl Cell {
    pub fn plain(glyph: char) -> Self {
        Self { glyph, color: None }
    }

    pub fn colored(glyph: char, color: CellColor) -> Self {
        Self {
            glyph,
            color: Some(color),
        }
    }
}

/// Rows of rendered cells. Rows may be shorter than `columns` after
/// whitespace trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlyphGrid {
    columns: usize,
    rows: Vec<Vec<Cell>>,
}

/// Encoding used when writing a [`GlyphGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain glyphs; colored cells become inline-styled `<span>`s
    #[default]
    Text,
    /// Same as `Text`, wrapped in `<pre>`
    Html,
    /// 24-bit ANSI color escapes for terminals
    Ansi,
    /// Structured grid as JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "html" => Ok(OutputFormat::Html),
            "ansi" => Ok(OutputFormat::Ansi),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("unknown output format '{}'", s)),
        }
    }
}

impl GlyphGrid {
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Width of the untrimmed grid in cells.
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True if any cell carries a color.
    pub fn is_colored(&self) -> bool {
        self.rows.iter().flatten().any(|c| c.color.is_some())
    }

    /// Glyphs only, one line per row, color dropped.
    pub fn to_plain(&self) -> String {
        let lines: Vec<String> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|c| c.glyph).collect())
            .collect();
        lines.join("\n")
    }

    /// Rows joined by newlines; colored cells wrapped as
    /// `<span style="color: rgb(R, G, B)">G</span>`.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for cell in row {
                match cell.color {
                    Some(CellColor { r, g, b }) => {
                        let _ = write!(
                            out,
                            "<span style=\"color: rgb({}, {}, {})\">{}</span>",
                            r, g, b, cell.glyph
                        );
                    }
                    None => out.push(cell.glyph),
                }
            }
        }
        out
    }

    /// [`to_text`](Self::to_text) wrapped in a `<pre>` block.
    pub fn to_html(&self) -> String {
        format!("<pre>{}</pre>", self.to_text())
    }

    /// Colored cells as 24-bit SGR foreground escapes, reset at each row end.
    pub fn to_ansi(&self) -> String {
        let mut out = String::new();
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let mut colored = false;
            for cell in row {
                match cell.color {
                    Some(CellColor { r, g, b }) => {
                        let _ = write!(out, "\x1b[38;2;{};{};{}m", r, g, b);
                        colored = true;
                    }
                    None if colored => {
                        out.push_str("\x1b[0m");
                        colored = false;
                    }
                    None => {}
                }
                out.push(cell.glyph);
            }
            if colored {
                out.push_str("\x1b[0m");
            }
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Encode in the requested format.
    pub fn encode(&self, format: OutputFormat) -> serde_json::Result<String> {
        Ok(match format {
            OutputFormat::Text => self.to_text(),
            OutputFormat::Html => self.to_html(),
            OutputFormat::Ansi => self.to_ansi(),
            OutputFormat::Json => self.to_json()?,
        })
    }
}
