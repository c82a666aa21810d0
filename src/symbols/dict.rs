//! Depth- and field-bounded serialization of symbol trees.

use serde::Serialize;

use super::{Position, Symbol};

/// Which fields [`Symbol::to_dict_with`] emits and how deep it recurses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DictOptions {
    pub kind: bool,
    pub location: bool,
    pub depth: usize,
    pub include_body: bool,
}

impl DictOptions {
    pub fn new(kind: bool, location: bool, depth: usize) -> Self {
        Self {
            kind,
            location,
            depth,
            include_body: false,
        }
    }

    pub fn with_body(mut self, include_body: bool) -> Self {
        self.include_body = include_body;
        self
    }

    fn descend(self) -> Self {
        Self {
            depth: self.depth.saturating_sub(1),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictLocation {
    pub relative_path: String,
    pub line: u32,
    pub column: u32,
}

impl DictLocation {
    fn at(relative_path: &str, position: Position) -> Self {
        Self {
            relative_path: relative_path.to_string(),
            line: position.line,
            column: position.column,
        }
    }
}

/// Plain serialized form of a symbol.
///
/// Absent fields are omitted from the serialized output, never written as
/// null. `children: Some(vec![])` means "requested, none exist" while `None`
/// means "not requested".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolDict {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<DictLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_location: Option<DictLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SymbolDict>>,
}

impl Symbol {
    /// Serialize this symbol, recursing `depth` levels into its children.
    pub fn to_dict(&self, kind: bool, location: bool, depth: usize) -> SymbolDict {
        self.to_dict_with(DictOptions::new(kind, location, depth))
    }

    pub fn to_dict_with(&self, options: DictOptions) -> SymbolDict {
        let (location, end_location) = if options.location {
            let path = self.relative_path();
            (
                Some(DictLocation::at(path, self.anchor.position)),
                self.body_end.map(|end| DictLocation::at(path, end)),
            )
        } else {
            (None, None)
        };

        let children = (options.depth > 0).then(|| {
            let child_options = options.descend();
            self.children
                .iter()
                .map(|child| child.to_dict_with(child_options))
                .collect()
        });

        SymbolDict {
            name: self.name.clone(),
            kind: options.kind.then(|| self.kind.label().to_string()),
            location,
            end_location,
            body: if options.include_body {
                self.body.clone()
            } else {
                None
            },
            children,
        }
    }
}
