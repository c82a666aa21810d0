use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{bail, eyre, Result, WrapErr};
use serde_pickle::value::{HashableValue, Value};
use tracing::{debug, warn};

use crate::symbols::{FileSymbols, RawLocation, RawPosition, RawRange, RawSymbolRecord, Symbol};

const RAW_CACHE_FILE: &str = "raw_document_symbols.pkl";

/// Load every file's symbol trees from a project's Serena cache.
pub fn load_project(project_root: &Path) -> Result<Vec<FileSymbols>> {
    let pkl_files = find_serena_caches(project_root);
    if pkl_files.is_empty() {
        bail!(
            "No Serena symbol cache found at {}/.serena/cache/",
            project_root.display()
        );
    }

    let mut all_files = Vec::new();
    for pkl_path in &pkl_files {
        debug!("Reading Serena cache {}", pkl_path.display());
        all_files.extend(load_cache_file(pkl_path)?);
    }

    all_files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(all_files)
}

/// Find the raw symbol cache of each language Serena has indexed.
pub fn find_serena_caches(project_root: &Path) -> Vec<PathBuf> {
    let cache_dir = project_root.join(".serena").join("cache");
    let entries = match fs::read_dir(&cache_dir) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    let mut results: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path().join(RAW_CACHE_FILE))
        .filter(|path| path.is_file())
        .collect();
    results.sort();
    results
}

/// Parse one `raw_document_symbols.pkl`.
/// Structure: {"__cache_version": ..., "obj": {path: (content_hash, [symbol dicts])}}
pub fn load_cache_file(pkl_path: &Path) -> Result<Vec<FileSymbols>> {
    let data = fs::read(pkl_path).wrap_err_with(|| format!("Failed to read {}", pkl_path.display()))?;
    let value = serde_pickle::value_from_slice(&data, Default::default())
        .map_err(|e| eyre!("Failed to parse pickle {}: {}", pkl_path.display(), e))?;
    parse_cache_value(&value)
}

fn parse_cache_value(value: &Value) -> Result<Vec<FileSymbols>> {
    let obj = dict_get(value, "obj").ok_or_else(|| eyre!("Missing 'obj' key in pickle"))?;
    let entries = as_dict(obj).ok_or_else(|| eyre!("'obj' is not a dict"))?;

    let mut files = Vec::new();
    for (key, val) in entries {
        let relative_path = hashable_as_str(key).ok_or_else(|| eyre!("File key not a string"))?;

        let items = as_tuple(val).ok_or_else(|| eyre!("File entry not a tuple"))?;
        if items.len() < 2 {
            continue;
        }
        let symbol_list = as_list(&items[1])
            .ok_or_else(|| eyre!("Symbol list not an array for {relative_path}"))?;

        let mut symbols = Vec::new();
        for sym_val in symbol_list {
            let raw = raw_record(sym_val);
            match Symbol::from_raw(&raw) {
                Ok(symbol) => symbols.push(symbol),
                Err(e) => warn!("Skipping cached symbol in {relative_path}: {e}"),
            }
        }

        files.push(FileSymbols {
            relative_path: relative_path.to_string(),
            symbols,
        });
    }
    Ok(files)
}

/// Convert a pickled symbol dict into a raw record.
///
/// Only `location` is read for the path and full range; Serena's top-level
/// `range` copy is ignored, so a missing `location.range.end` stays missing.
fn raw_record(val: &Value) -> RawSymbolRecord {
    let location = dict_get(val, "location").map(|l| RawLocation {
        path: dict_get(l, "path").and_then(as_str).map(str::to_string),
        relative_path: dict_get(l, "relativePath").and_then(as_str).map(str::to_string),
        range: dict_get(l, "range").map(raw_range),
    });

    let children = dict_get(val, "children")
        .and_then(as_list)
        .map(|list| list.iter().map(raw_record).collect())
        .unwrap_or_default();

    RawSymbolRecord {
        name: dict_get(val, "name").and_then(as_str).map(str::to_string),
        kind: dict_get(val, "kind").and_then(as_i64),
        location,
        selection_range: dict_get(val, "selectionRange").map(raw_range),
        body: dict_get(val, "body").and_then(as_str).map(str::to_string),
        children,
    }
}

fn raw_range(val: &Value) -> RawRange {
    RawRange {
        start: dict_get(val, "start").and_then(raw_position),
        end: dict_get(val, "end").and_then(raw_position),
    }
}

fn raw_position(val: &Value) -> Option<RawPosition> {
    let line = dict_get(val, "line").and_then(as_i64)?;
    let character = dict_get(val, "character").and_then(as_i64)?;
    Some(RawPosition::new(
        u32::try_from(line).ok()?,
        u32::try_from(character).ok()?,
    ))
}

// --- Value extraction helpers ---

fn dict_get<'a>(val: &'a Value, key: &str) -> Option<&'a Value> {
    match val {
        Value::Dict(entries) => entries.get(&HashableValue::String(key.to_string())),
        _ => None,
    }
}

fn as_str(val: &Value) -> Option<&str> {
    match val {
        Value::String(s) => Some(s),
        _ => None,
    }
}

fn hashable_as_str(val: &HashableValue) -> Option<&str> {
    match val {
        HashableValue::String(s) => Some(s),
        _ => None,
    }
}

fn as_i64(val: &Value) -> Option<i64> {
    match val {
        Value::I64(n) => Some(*n),
        Value::Int(n) => n.try_into().ok(),
        _ => None,
    }
}

fn as_list(val: &Value) -> Option<&[Value]> {
    match val {
        Value::List(l) => Some(l),
        _ => None,
    }
}

fn as_tuple(val: &Value) -> Option<&[Value]> {
    match val {
        Value::Tuple(t) => Some(t),
        _ => None,
    }
}

fn as_dict(val: &Value) -> Option<&BTreeMap<HashableValue, Value>> {
    match val {
        Value::Dict(d) => Some(d),
        _ => None,
    }
}
