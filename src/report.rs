//! Rendering of serialized symbol trees for the command line.

use color_eyre::eyre::Result;
use serde::Serialize;

use crate::symbols::{DictOptions, FileSymbols, Symbol, SymbolDict};

/// Serialized symbols of one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub relative_path: String,
    pub symbols: Vec<SymbolDict>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Report {
    pub files: Vec<FileReport>,
}

impl Report {
    /// Serialize every file's symbols with `options`.
    ///
    /// With a `find` pattern only matching symbols (at any depth) are
    /// serialized, each as the root of its own output tree. Files with no
    /// match are left out.
    pub fn build(files: &[FileSymbols], options: DictOptions, find: Option<&str>) -> Self {
        let files = files
            .iter()
            .filter_map(|file| {
                let selected: Vec<&Symbol> = match find {
                    Some(pattern) => file.symbols.iter().flat_map(|s| s.find(pattern)).collect(),
                    None => file.symbols.iter().collect(),
                };
                if find.is_some() && selected.is_empty() {
                    return None;
                }
                Some(FileReport {
                    relative_path: file.relative_path.clone(),
                    symbols: selected.iter().map(|s| s.to_dict_with(options)).collect(),
                })
            })
            .collect();
        Self { files }
    }

    pub fn total_symbols(&self) -> usize {
        fn count(dicts: &[SymbolDict]) -> usize {
            dicts
                .iter()
                .map(|d| 1 + d.children.as_deref().map(count).unwrap_or(0))
                .sum()
        }
        self.files.iter().map(|f| count(&f.symbols)).sum()
    }
}

/// Implement this trait to add new output formats.
pub trait ReportFormatter {
    fn format(&self, report: &Report) -> Result<String>;
}

#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let out = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(out)
    }
}

/// Indented outline, one symbol per line. Bodies, when serialized, follow
/// their symbol one level deeper with each line prefixed by `| `.
#[derive(Debug, Clone)]
pub struct TextFormatter {
    pub indent: usize,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl TextFormatter {
    fn write_symbol(&self, out: &mut String, dict: &SymbolDict, level: usize) {
        let pad = " ".repeat(self.indent * level);
        out.push_str(&pad);
        if let Some(kind) = &dict.kind {
            out.push_str(kind);
            out.push(' ');
        }
        out.push_str(&dict.name);
        if let Some(loc) = &dict.location {
            out.push_str(&format!(" [{}:{}", loc.line, loc.column));
            if let Some(end) = &dict.end_location {
                out.push_str(&format!("-{}:{}", end.line, end.column));
            }
            out.push(']');
        }
        out.push('\n');
        if let Some(body) = &dict.body {
            let body_pad = " ".repeat(self.indent * (level + 1));
            for line in body.lines() {
                out.push_str(&body_pad);
                out.push_str("| ");
                out.push_str(line);
                out.push('\n');
            }
        }
        for child in dict.children.iter().flatten() {
            self.write_symbol(out, child, level + 1);
        }
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let mut output = String::new();
        for file in &report.files {
            output.push_str(&file.relative_path);
            output.push('\n');
            for dict in &file.symbols {
                self.write_symbol(&mut output, dict, 1);
            }
        }
        Ok(output)
    }
}
