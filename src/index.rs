//! `InequalityIndex` — a CellSet-keyed map of inequalities with upsert
//! (tighten-on-collision) semantics.

use indexmap::IndexMap;

use crate::cellset::CellSet;
use crate::error::SolverError;
use crate::inequality::Inequality;

#[derive(Debug, Default, Clone)]
pub struct InequalityIndex {
    map: IndexMap<CellSet, Inequality>,
}

impl InequalityIndex {
    pub fn new() -> Self {
        Self {
            map: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Inserts `ineq` if its cells are new; otherwise tightens the existing
    /// entry's bounds to the intersection of old and new. Returns `true` if
    /// the stored inequality is new or was tightened.
    pub fn add(&mut self, ineq: Inequality) -> Result<bool, SolverError> {
        match self.map.get(ineq.cells()) {
            None => {
                let cells = ineq.cells().clone();
                self.map.insert(cells, ineq);
                Ok(true)
            }
            Some(old) => {
                if old.bounds() == ineq.bounds() {
                    return Ok(false);
                }
                let new_lo = old.lo().max(ineq.lo());
                let new_hi = old.hi().min(ineq.hi());
                if new_lo > new_hi {
                    return Err(SolverError::Unsatisfiable {
                        cells: ineq.cells().clone(),
                        lo: new_lo,
                        hi: new_hi,
                    });
                }
                let tightened = Inequality::new(ineq.cells().clone(), new_lo, new_hi)?;
                self.map.insert(tightened.cells().clone(), tightened);
                Ok(true)
            }
        }
    }

    pub fn get(&self, cells: &CellSet) -> Option<&Inequality> {
        self.map.get(cells)
    }

    pub fn get_strict(&self, cells: &CellSet) -> Result<&Inequality, SolverError> {
        self.get(cells)
            .ok_or_else(|| SolverError::Missing(cells.clone()))
    }

    pub fn remove(&mut self, cells: &CellSet) -> Option<Inequality> {
        self.map.shift_remove(cells)
    }

    pub fn remove_strict(&mut self, cells: &CellSet) -> Result<Inequality, SolverError> {
        self.remove(cells)
            .ok_or_else(|| SolverError::Missing(cells.clone()))
    }

    pub fn has(&self, ineq: &Inequality, exact: bool) -> bool {
        match self.map.get(ineq.cells()) {
            None => false,
            Some(found) => !exact || found.bounds() == ineq.bounds(),
        }
    }

    pub fn intersection<'a>(&'a self, other: &'a InequalityIndex) -> Vec<&'a Inequality> {
        self.map
            .iter()
            .filter(|(cells, _)| other.map.contains_key(*cells))
            .map(|(_, ineq)| ineq)
            .collect()
    }

    pub fn values(&self) -> impl Iterator<Item = &Inequality> {
        self.map.values()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ineq(cells: &[usize], lo: usize, hi: usize) -> Inequality {
        Inequality::new(CellSet::new(cells.iter().copied()), lo, hi).unwrap()
    }

    #[test]
    fn add_inserts_new() {
        let mut idx = InequalityIndex::new();
        assert!(idx.add(ineq(&[1, 2], 0, 1)).unwrap());
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn add_tightens_existing() {
        let mut idx = InequalityIndex::new();
        idx.add(ineq(&[1, 2], 0, 2)).unwrap();
        idx.add(ineq(&[1, 2], 1, 2)).unwrap();
        let stored = idx.get(&CellSet::new(vec![1, 2])).unwrap();
        assert_eq!(stored.bounds(), (1, 2));
    }

    #[test]
    fn add_is_idempotent_for_identical_bounds() {
        let mut idx = InequalityIndex::new();
        idx.add(ineq(&[1, 2], 1, 1)).unwrap();
        assert!(!idx.add(ineq(&[1, 2], 1, 1)).unwrap());
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn add_rejects_unsatisfiable_tightening() {
        let mut idx = InequalityIndex::new();
        idx.add(ineq(&[1, 2], 0, 0)).unwrap();
        let err = idx.add(ineq(&[1, 2], 2, 2)).unwrap_err();
        assert!(matches!(err, SolverError::Unsatisfiable { .. }));
    }

    #[test]
    fn missing_is_strict() {
        let idx = InequalityIndex::new();
        let err = idx.get_strict(&CellSet::single(9)).unwrap_err();
        assert!(matches!(err, SolverError::Missing(_)));
    }
}
