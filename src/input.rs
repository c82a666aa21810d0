//! Raw symbol records supplied as JSON.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{bail, Result, WrapErr};
use tracing::debug;

use crate::symbols::{FileSymbols, RawSymbolRecord, Symbol};

/// Parse a JSON document holding either one raw record or an array of them.
pub fn parse_records(json: &str) -> Result<Vec<RawSymbolRecord>> {
    match json.trim_start().as_bytes().first() {
        Some(b'[') => serde_json::from_str(json).wrap_err("Invalid raw symbol array"),
        Some(b'{') => {
            let record: RawSymbolRecord =
                serde_json::from_str(json).wrap_err("Invalid raw symbol record")?;
            Ok(vec![record])
        }
        _ => bail!("Expected a raw symbol record or an array of records"),
    }
}

/// Build symbol trees from raw records. Stops at the first malformed tree.
pub fn build_symbols(records: &[RawSymbolRecord]) -> Result<Vec<Symbol>> {
    records
        .iter()
        .enumerate()
        .map(|(i, raw)| Symbol::from_raw(raw).wrap_err_with(|| format!("Record #{i} is malformed")))
        .collect()
}

pub fn load_json_file(path: &Path) -> Result<Vec<Symbol>> {
    let json = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    let records = parse_records(&json)?;
    debug!("Read {} raw symbol records from {}", records.len(), path.display());
    build_symbols(&records)
}

/// Group top-level symbols by the file they were found in, keeping first-seen
/// file order and declaration order within each file.
pub fn group_by_file(symbols: Vec<Symbol>) -> Vec<FileSymbols> {
    let mut files: Vec<FileSymbols> = Vec::new();
    for symbol in symbols {
        match files
            .iter_mut()
            .find(|f| f.relative_path == symbol.relative_path())
        {
            Some(file) => file.symbols.push(symbol),
            None => files.push(FileSymbols {
                relative_path: symbol.relative_path().to_string(),
                symbols: vec![symbol],
            }),
        }
    }
    files
}
