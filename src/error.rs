use thiserror::Error;

pub type Result<T> = std::result::Result<T, SymbolError>;

/// Errors raised while building a symbol tree from raw records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    /// A raw record lacks a field needed to place the symbol in its file.
    /// `name_path` locates the offending record inside the tree being built.
    #[error("malformed symbol at '{name_path}': missing required field '{field}'")]
    Malformed {
        field: &'static str,
        name_path: String,
    },
}

impl SymbolError {
    pub(crate) fn malformed(field: &'static str, name_path: impl Into<String>) -> Self {
        SymbolError::Malformed {
            field,
            name_path: name_path.into(),
        }
    }

    /// The raw field that was missing.
    pub fn field(&self) -> &'static str {
        match self {
            SymbolError::Malformed { field, .. } => *field,
        }
    }
}
