#![allow(dead_code)]

use symtree::symbols::{RawLocation, RawPosition, RawRange, RawSymbolRecord, Symbol};

pub const PATH: &str = "test/file.py";

/// Raw record with a full range `start..end` and its name token at `selection`.
pub fn raw(
    name: &str,
    kind: i64,
    start: (u32, u32),
    end: Option<(u32, u32)>,
    selection: (u32, u32),
) -> RawSymbolRecord {
    RawSymbolRecord {
        name: Some(name.to_string()),
        kind: Some(kind),
        location: Some(RawLocation::new(
            PATH,
            Some(RawRange {
                start: Some(RawPosition::new(start.0, start.1)),
                end: end.map(|(l, c)| RawPosition::new(l, c)),
            }),
        )),
        selection_range: Some(RawRange {
            start: Some(RawPosition::new(selection.0, selection.1)),
            end: Some(RawPosition::new(selection.0, selection.1 + name.len() as u32)),
        }),
        body: None,
        children: Vec::new(),
    }
}

/// Raw record whose body spans `line..line + 1`.
pub fn raw_at(name: &str, line: u32) -> RawSymbolRecord {
    raw(name, 12, (line, 0), Some((line + 1, 0)), (line, 4))
}

pub fn with_children(mut record: RawSymbolRecord, children: Vec<RawSymbolRecord>) -> RawSymbolRecord {
    record.children = children;
    record
}

/// A single chain `levels` deep: level0 -> level1 -> ...
pub fn chain(levels: usize) -> RawSymbolRecord {
    let mut node = raw_at(&format!("level{}", levels - 1), (levels - 1) as u32);
    for depth in (0..levels - 1).rev() {
        node = with_children(raw_at(&format!("level{depth}"), depth as u32), vec![node]);
    }
    node
}

pub fn build(record: &RawSymbolRecord) -> Symbol {
    Symbol::from_raw(record).unwrap()
}
