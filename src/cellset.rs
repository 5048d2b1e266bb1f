//! An immutable, hashable set of cell identifiers.
//!
//! Backed by a sorted, de-duplicated `Vec<CellId>` rather than a hashed
//! collection: `indexmap::IndexSet` compares two sets as equal regardless of
//! insertion order but deliberately does not implement `Hash` (an
//! order-dependent hash would violate the `Eq`/`Hash` contract for it), and
//! `CellSet` needs to be a `HashMap`/`IndexMap` key. Keeping cells sorted buys
//! `Eq + Hash` for free and makes iteration order deterministic.

use std::fmt;

use crate::cell::CellId;

#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct CellSet(Vec<CellId>);

impl CellSet {
    pub fn new<I: IntoIterator<Item = CellId>>(cells: I) -> Self {
        let mut v: Vec<CellId> = cells.into_iter().collect();
        v.sort_unstable();
        v.dedup();
        Self(v)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn single(cell: CellId) -> Self {
        Self(vec![cell])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, cell: CellId) -> bool {
        self.0.binary_search(&cell).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = CellId> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<CellId> {
        self.0.clone()
    }

    pub fn union(&self, other: &CellSet) -> CellSet {
        let mut merged = Vec::with_capacity(self.0.len() + other.0.len());
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].cmp(&other.0[j]) {
                std::cmp::Ordering::Less => {
                    merged.push(self.0[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    merged.push(other.0[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    merged.push(self.0[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&self.0[i..]);
        merged.extend_from_slice(&other.0[j..]);
        CellSet(merged)
    }

    pub fn intersection(&self, other: &CellSet) -> CellSet {
        let mut out = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].cmp(&other.0[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    out.push(self.0[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        CellSet(out)
    }

    pub fn difference(&self, other: &CellSet) -> CellSet {
        let mut out = Vec::with_capacity(self.0.len());
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].cmp(&other.0[j]) {
                std::cmp::Ordering::Less => {
                    out.push(self.0[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend_from_slice(&self.0[i..]);
        CellSet(out)
    }

    pub fn is_subset(&self, other: &CellSet) -> bool {
        self.0.iter().all(|c| other.contains(*c))
    }

    pub fn is_superset(&self, other: &CellSet) -> bool {
        other.is_subset(self)
    }

    pub fn is_disjoint(&self, other: &CellSet) -> bool {
        self.intersection(other).is_empty()
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<CellId> for CellSet {
    fn from_iter<I: IntoIterator<Item = CellId>>(iter: I) -> Self {
        CellSet::new(iter)
    }
}
