use std::fmt;

pub mod dict;
pub mod kind;
pub mod raw;

pub use dict::{DictLocation, DictOptions, SymbolDict};
pub use kind::SymbolKind;
pub use raw::{RawLocation, RawPosition, RawRange, RawSymbolRecord};

use crate::error::{Result, SymbolError};

/// A 0-based line/column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl From<RawPosition> for Position {
    fn from(raw: RawPosition) -> Self {
        Self {
            line: raw.line,
            column: raw.character,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Where a symbol's name token sits. Always known for a constructed symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorLocation {
    pub path: String,
    pub position: Position,
}

/// One discovered symbol and its lexically nested children.
///
/// Built top-down from an owned [`RawSymbolRecord`]; the raw structure must be
/// acyclic, which holds for any tree-shaped value since no back-edges exist to
/// follow. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    name: String,
    name_path: String,
    kind: SymbolKind,
    anchor: AnchorLocation,
    body_end: Option<Position>,
    body: Option<String>,
    children: Vec<Symbol>,
}

impl Symbol {
    /// Build a symbol tree from a raw record.
    ///
    /// Fails if this record or any descendant lacks `name`,
    /// `selectionRange.start` or `location.path`.
    pub fn from_raw(raw: &RawSymbolRecord) -> Result<Self> {
        Self::build(raw, "")
    }

    fn build(raw: &RawSymbolRecord, parent_path: &str) -> Result<Self> {
        let name = match raw.name.as_deref() {
            Some(name) => name.to_string(),
            None => {
                return Err(SymbolError::malformed(
                    "name",
                    join_name_path(parent_path, "<unnamed>"),
                ))
            }
        };
        let name_path = join_name_path(parent_path, &name);

        let path = raw
            .path()
            .ok_or_else(|| SymbolError::malformed("location.path", name_path.as_str()))?;
        let start = raw
            .selection_start()
            .ok_or_else(|| SymbolError::malformed("selectionRange.start", name_path.as_str()))?;

        let anchor = AnchorLocation {
            path: path.to_string(),
            position: start.into(),
        };

        let children = raw
            .children
            .iter()
            .map(|child| Self::build(child, &name_path))
            .collect::<Result<Vec<_>>>()?;

        Ok(Symbol {
            kind: SymbolKind::from_code(raw.kind.unwrap_or(0)),
            body_end: raw.range_end().map(Position::from),
            body: raw.body.clone(),
            name,
            name_path,
            anchor,
            children,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slash-joined names from the tree root down to this symbol.
    pub fn name_path(&self) -> &str {
        &self.name_path
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn anchor_location(&self) -> &AnchorLocation {
        &self.anchor
    }

    pub fn relative_path(&self) -> &str {
        &self.anchor.path
    }

    /// End of the symbol's body, if the provider reported a full range.
    pub fn body_end_position(&self) -> Option<Position> {
        self.body_end
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn children(&self) -> &[Symbol] {
        &self.children
    }

    pub fn total_symbols(&self) -> usize {
        1 + self.children.iter().map(|c| c.total_symbols()).sum::<usize>()
    }

    /// Pre-order walk over this symbol and every descendant.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Symbols in this subtree whose name path matches `pattern`.
    ///
    /// `b/c` matches any name path ending in the segments `b/c`; `/a/b`
    /// matches only the full name path `a/b`. Names are assumed to contain no
    /// `/`: a symbol named `b/c` is indistinguishable from `c` nested in `b`.
    pub fn find(&self, pattern: &str) -> Vec<&Symbol> {
        let absolute = pattern.starts_with('/');
        let wanted: Vec<&str> = pattern
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        if wanted.is_empty() {
            return Vec::new();
        }

        self.iter()
            .filter(|sym| {
                let segments: Vec<&str> = sym.name_path.split('/').collect();
                if absolute {
                    segments == wanted
                } else {
                    segments.ends_with(&wanted)
                }
            })
            .collect()
    }
}

fn join_name_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

pub struct Iter<'a> {
    stack: Vec<&'a Symbol>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Symbol;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

/// The symbol trees of a single file, in declaration order.
#[derive(Debug, Clone)]
pub struct FileSymbols {
    pub relative_path: String,
    pub symbols: Vec<Symbol>,
}

impl FileSymbols {
    pub fn total_symbols(&self) -> usize {
        self.symbols.iter().map(|s| s.total_symbols()).sum()
    }
}
