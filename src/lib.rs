pub mod error;
pub mod input;
pub mod report;
pub mod serena;
pub mod symbols;

pub use error::SymbolError;
pub use symbols::{DictOptions, Symbol, SymbolDict, SymbolKind};
