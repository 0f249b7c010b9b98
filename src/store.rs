//! The text store: two ordered sequences of units (source text and its
//! translation) plus the bipartite edge set the aligner produces.

use std::collections::BTreeSet;
use std::fmt;

use index_vec::IndexVec;

index_vec::define_index_type! {
    /// Stable unit key. Keys are assigned monotonically across both sides and
    /// are never reused while the owning store exists.
    pub struct UnitKey = usize;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Side {
    Source,
    Dest,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::Source => 0,
            Side::Dest => 1,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Source => Side::Dest,
            Side::Dest => Side::Source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The key does not exist on the side it was looked up on.
    InvalidKey { side: Side, key: UnitKey },
    /// Both endpoints of a requested edge live on the same side.
    InvalidConnection { key1: UnitKey, key2: UnitKey },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidKey { side, key } => {
                write!(f, "no unit with key {} on side {side:?}", key.raw())
            }
            StoreError::InvalidConnection { key1, key2 } => {
                write!(
                    f,
                    "units {} and {} are on the same side and cannot be connected",
                    key1.raw(),
                    key2.raw()
                )
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// The contract the alignment engine needs from a text store. The engine only
/// reads lengths and paragraph ids, rewrites paragraph ids, and requests edge
/// creation; everything else a store does (editing, serialization, UI
/// notification) is its own business.
pub trait TextStore {
    /// Character length of the given unit.
    fn length(&self, side: Side, key: UnitKey) -> Result<usize, StoreError>;

    /// Paragraph tag of the given unit. Paragraph ids partition each side's
    /// key order into contiguous runs.
    fn paragraph_id(&self, side: Side, key: UnitKey) -> Result<u32, StoreError>;

    fn set_paragraph_id(&mut self, side: Side, key: UnitKey, id: u32) -> Result<(), StoreError>;

    /// Stable, insertion-order key sequence for one side.
    fn ordered_keys(&self, side: Side) -> &[UnitKey];

    /// Records a correspondence between a source unit and a destination unit.
    /// Idempotent; adding an existing edge is a no-op.
    fn add_edge(&mut self, source_key: UnitKey, dest_key: UnitKey) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
struct Unit {
    side: Side,
    text: String,
    length: usize,
    paragraph: u32,
    edges: BTreeSet<UnitKey>,
}

/// In-memory implementation of [`TextStore`].
#[derive(Debug, Default, Clone)]
pub struct Document {
    units: IndexVec<UnitKey, Unit>,
    keys: [Vec<UnitKey>; 2],
}

impl Document {
    pub fn new() -> Document {
        Document::default()
    }

    fn push(&mut self, side: Side, text: String, paragraph: u32) -> UnitKey {
        let length = text.chars().count();
        let key = self.units.push(Unit {
            side,
            text,
            length,
            paragraph,
            edges: BTreeSet::new(),
        });
        self.keys[side.index()].push(key);
        key
    }

    pub fn push_source(&mut self, text: impl Into<String>, paragraph: u32) -> UnitKey {
        self.push(Side::Source, text.into(), paragraph)
    }

    pub fn push_dest(&mut self, text: impl Into<String>, paragraph: u32) -> UnitKey {
        self.push(Side::Dest, text.into(), paragraph)
    }

    fn unit(&self, side: Side, key: UnitKey) -> Result<&Unit, StoreError> {
        match self.units.get(key) {
            Some(unit) if unit.side == side => Ok(unit),
            _ => Err(StoreError::InvalidKey { side, key }),
        }
    }

    /// The side a key lives on, if it exists at all.
    pub fn side(&self, key: UnitKey) -> Option<Side> {
        self.units.get(key).map(|unit| unit.side)
    }

    pub fn text(&self, key: UnitKey) -> Option<&str> {
        self.units.get(key).map(|unit| unit.text.as_str())
    }

    pub fn edges(&self, key: UnitKey) -> Option<&BTreeSet<UnitKey>> {
        self.units.get(key).map(|unit| &unit.edges)
    }

    /// All edges as (source, dest) pairs, in source key order.
    pub fn edge_pairs(&self) -> Vec<(UnitKey, UnitKey)> {
        let mut pairs = vec![];
        for &key in &self.keys[Side::Source.index()] {
            for &other in &self.units[key].edges {
                pairs.push((key, other));
            }
        }
        pairs
    }
}

impl TextStore for Document {
    fn length(&self, side: Side, key: UnitKey) -> Result<usize, StoreError> {
        Ok(self.unit(side, key)?.length)
    }

    fn paragraph_id(&self, side: Side, key: UnitKey) -> Result<u32, StoreError> {
        Ok(self.unit(side, key)?.paragraph)
    }

    fn set_paragraph_id(&mut self, side: Side, key: UnitKey, id: u32) -> Result<(), StoreError> {
        self.unit(side, key)?;
        self.units[key].paragraph = id;
        Ok(())
    }

    fn ordered_keys(&self, side: Side) -> &[UnitKey] {
        &self.keys[side.index()]
    }

    fn add_edge(&mut self, source_key: UnitKey, dest_key: UnitKey) -> Result<(), StoreError> {
        match (self.side(source_key), self.side(dest_key)) {
            (Some(a), Some(b)) if a == b => {
                return Err(StoreError::InvalidConnection {
                    key1: source_key,
                    key2: dest_key,
                })
            }
            _ => {
                self.unit(Side::Source, source_key)?;
                self.unit(Side::Dest, dest_key)?;
            }
        }
        self.units[source_key].edges.insert(dest_key);
        self.units[dest_key].edges.insert(source_key);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn two_by_two() -> (Document, [UnitKey; 4]) {
        let mut doc = Document::new();
        let s1 = doc.push_source("One sentence.", 0);
        let s2 = doc.push_source("Another one.", 0);
        let d1 = doc.push_dest("Jedna recenica.", 0);
        let d2 = doc.push_dest("Jos jedna.", 0);
        (doc, [s1, s2, d1, d2])
    }

    #[test]
    fn keys_are_monotonic_and_ordered() {
        let (doc, [s1, s2, d1, d2]) = two_by_two();
        assert!(s1 < s2 && s2 < d1 && d1 < d2);
        assert_eq!(doc.ordered_keys(Side::Source), &[s1, s2]);
        assert_eq!(doc.ordered_keys(Side::Dest), &[d1, d2]);
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        let mut doc = Document::new();
        let key = doc.push_source("čašica", 0);
        assert_eq!(doc.length(Side::Source, key), Ok(6));
    }

    #[test]
    fn add_edge_is_idempotent() {
        let (mut doc, [s1, _, d1, _]) = two_by_two();
        doc.add_edge(s1, d1).unwrap();
        doc.add_edge(s1, d1).unwrap();
        assert_eq!(doc.edge_pairs(), vec![(s1, d1)]);
        assert!(doc.edges(d1).unwrap().contains(&s1));
    }

    #[test]
    fn add_edge_rejects_same_side() {
        let (mut doc, [s1, s2, d1, d2]) = two_by_two();
        assert_eq!(
            doc.add_edge(s1, s2),
            Err(StoreError::InvalidConnection { key1: s1, key2: s2 })
        );
        assert_eq!(
            doc.add_edge(d1, d2),
            Err(StoreError::InvalidConnection { key1: d1, key2: d2 })
        );
    }

    #[test]
    fn add_edge_rejects_missing_and_swapped_keys() {
        let (mut doc, [s1, _, d1, _]) = two_by_two();
        let missing = UnitKey::new(99);
        assert_eq!(
            doc.add_edge(s1, missing),
            Err(StoreError::InvalidKey { side: Side::Dest, key: missing })
        );
        // Keys exist but are given in the wrong positions.
        assert_eq!(
            doc.add_edge(d1, s1),
            Err(StoreError::InvalidKey { side: Side::Source, key: d1 })
        );
    }

    #[test]
    fn paragraph_id_roundtrip() {
        let (mut doc, [s1, ..]) = two_by_two();
        assert_eq!(doc.paragraph_id(Side::Source, s1), Ok(0));
        doc.set_paragraph_id(Side::Source, s1, 7).unwrap();
        assert_eq!(doc.paragraph_id(Side::Source, s1), Ok(7));
        assert_eq!(
            doc.set_paragraph_id(Side::Dest, s1, 7),
            Err(StoreError::InvalidKey { side: Side::Dest, key: s1 })
        );
    }
}
