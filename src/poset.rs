//! The `Poset`: live inequalities organized by subset containment, plus the
//! crossing/trivial-collection/reduction machinery that drives a solve.

use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};

use crate::cellset::CellSet;
use crate::error::SolverError;
use crate::index::InequalityIndex;
use crate::inequality::Inequality;

#[derive(Debug, Default)]
pub struct Poset {
    ineqs: InequalityIndex,
    roots: IndexSet<CellSet>,
    fresh: IndexSet<CellSet>,
    children: IndexMap<CellSet, IndexSet<CellSet>>,
    parents: IndexMap<CellSet, IndexSet<CellSet>>,
    num_added: usize,
}

impl Poset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ineqs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ineqs.len()
    }

    pub fn num_added(&self) -> usize {
        self.num_added
    }

    pub fn fresh_is_empty(&self) -> bool {
        self.fresh.is_empty()
    }

    pub fn get(&self, cells: &CellSet) -> Option<&Inequality> {
        self.ineqs.get(cells)
    }

    pub fn inequalities(&self) -> impl Iterator<Item = &Inequality> {
        self.ineqs.values()
    }

    pub fn roots(&self) -> impl Iterator<Item = &CellSet> {
        self.roots.iter()
    }

    pub fn children_of<'a>(&'a self, cells: &CellSet) -> impl Iterator<Item = &'a CellSet> {
        self.children.get(cells).into_iter().flatten()
    }

    pub fn parents_of<'a>(&'a self, cells: &CellSet) -> impl Iterator<Item = &'a CellSet> {
        self.parents.get(cells).into_iter().flatten()
    }

    fn add_edge(&mut self, parent: CellSet, child: CellSet) {
        self.children
            .entry(parent.clone())
            .or_default()
            .insert(child.clone());
        self.parents.entry(child).or_default().insert(parent);
    }

    fn remove_edge(&mut self, parent: &CellSet, child: &CellSet) {
        if let Some(set) = self.children.get_mut(parent) {
            set.shift_remove(child);
        }
        if let Some(set) = self.parents.get_mut(child) {
            set.shift_remove(parent);
        }
    }

    fn parent_count(&self, cells: &CellSet) -> usize {
        self.parents.get(cells).map_or(0, |s| s.len())
    }

    /// Inserts `ineq`, tightening an existing entry with the same cells, or
    /// threading it into the subset-containment graph otherwise.
    pub fn add(&mut self, ineq: Inequality) -> Result<(), SolverError> {
        let cells = ineq.cells().clone();
        let already_present = self.ineqs.get(&cells).is_some();

        let tightened = self.ineqs.add(ineq)?;
        if !tightened {
            return Ok(());
        }
        self.fresh.insert(cells.clone());
        self.num_added += 1;

        if already_present {
            // Cells are unchanged, so parent/child edges are unaffected.
            return Ok(());
        }

        let mut is_root = true;
        let mut frontier: VecDeque<CellSet> = self.roots.iter().cloned().collect();
        let mut covered: IndexSet<CellSet> = IndexSet::new();
        covered.insert(cells.clone());

        while let Some(candidate) = frontier.pop_front() {
            covered.insert(candidate.clone());

            if candidate == cells {
                continue;
            } else if candidate.is_disjoint(&cells) {
                continue;
            } else if candidate.is_subset(&cells) {
                // `candidate` becomes a child of `ineq`.
                self.roots.shift_remove(&candidate);
                self.add_edge(cells.clone(), candidate.clone());

                let shared_parents: Vec<CellSet> = self
                    .parents_of(&candidate)
                    .filter(|p| self.parents_of(&cells).any(|p2| p2 == *p))
                    .cloned()
                    .collect();
                for shared_parent in shared_parents {
                    self.remove_edge(&shared_parent, &candidate);
                }
            } else if cells.is_subset(&candidate) {
                // `candidate` is a parent or ancestor of `ineq`.
                is_root = false;
                let mut make_child = true;

                let candidate_children: Vec<CellSet> =
                    self.children_of(&candidate).cloned().collect();
                for child in candidate_children {
                    if child == cells {
                        // no-op, `ineq` is already present under this name
                    } else if child.is_subset(&cells) {
                        make_child = false;
                        self.remove_edge(&candidate, &child);
                        self.add_edge(candidate.clone(), cells.clone());
                        self.add_edge(cells.clone(), child.clone());
                    } else if child.is_superset(&cells) {
                        make_child = false;
                        if !covered.contains(&child) && !frontier.contains(&child) {
                            frontier.push_back(child.clone());
                        }
                    } else if !child.is_disjoint(&cells) {
                        if !covered.contains(&child) && !frontier.contains(&child) {
                            frontier.push_back(child.clone());
                        }
                    }
                }

                if make_child {
                    self.add_edge(candidate.clone(), cells.clone());
                }
            } else if !candidate.is_disjoint(&cells) {
                let candidate_children: Vec<CellSet> =
                    self.children_of(&candidate).cloned().collect();
                for child in candidate_children {
                    if child != cells && !covered.contains(&child) && !frontier.contains(&child) {
                        frontier.push_back(child.clone());
                    }
                }
            }
        }

        if is_root {
            self.roots.insert(cells);
        }

        Ok(())
    }

    /// Detaches `cells` from the graph, bridging its parents directly to its
    /// children where they are not already connected some other way.
    pub fn remove(&mut self, cells: &CellSet) -> Option<Inequality> {
        let removed = self.ineqs.remove(cells)?;
        self.fresh.shift_remove(cells);

        let parent_list: Vec<CellSet> = self.parents_of(cells).cloned().collect();
        let child_list: Vec<CellSet> = self.children_of(cells).cloned().collect();

        for parent in &parent_list {
            self.remove_edge(parent, cells);
        }
        for child in &child_list {
            self.remove_edge(cells, child);
        }

        for parent in &parent_list {
            for child in &child_list {
                let parent_children = self.children.get(parent).cloned().unwrap_or_default();
                let child_parents = self.parents.get(child).cloned().unwrap_or_default();
                if parent_children.is_disjoint(&child_parents) {
                    self.add_edge(parent.clone(), child.clone());
                }
            }
        }

        let was_root = self.roots.shift_remove(cells);
        if was_root {
            for child in &child_list {
                if self.parent_count(child) == 0 {
                    self.roots.insert(child.clone());
                }
            }
        }

        Some(removed)
    }

    /// Crosses the `fresh` frontier (or, if it is empty, every inequality —
    /// this is both the "make progress once fresh is exhausted" fallback and
    /// the all-pairs fallback for a stalled fresh-only sweep) against parents,
    /// siblings and children, feeding every derived inequality back through
    /// `add`.
    pub fn cross_ineqs(&mut self) -> Result<(), SolverError> {
        let targets: Vec<CellSet> = if !self.fresh.is_empty() {
            self.fresh.iter().cloned().collect()
        } else {
            self.ineqs.values().map(|i| i.cells().clone()).collect()
        };

        self.num_added = 0;
        let mut derived = Vec::new();

        for cells in &targets {
            let Some(ineq) = self.ineqs.get(cells).cloned() else {
                continue;
            };

            let parent_list: Vec<CellSet> = self.parents_of(cells).cloned().collect();
            for p_cells in &parent_list {
                if let Some(parent) = self.ineqs.get(p_cells).cloned() {
                    derived.extend(ineq.cross(&parent)?);

                    let sibling_list: Vec<CellSet> = self.children_of(p_cells).cloned().collect();
                    for s_cells in &sibling_list {
                        if let Some(sibling) = self.ineqs.get(s_cells).cloned() {
                            derived.extend(ineq.cross(&sibling)?);
                        }
                    }

                    for p2_cells in &parent_list {
                        if let Some(parent2) = self.ineqs.get(p2_cells).cloned() {
                            derived.extend(parent.cross(&parent2)?);
                        }
                    }
                }
            }

            let child_list: Vec<CellSet> = self.children_of(cells).cloned().collect();
            for c_cells in &child_list {
                if let Some(child) = self.ineqs.get(c_cells).cloned() {
                    derived.extend(ineq.cross(&child)?);
                }
            }
        }

        self.fresh.clear();
        for new_ineq in derived {
            self.add(new_ineq)?;
        }

        Ok(())
    }

    /// The maximal trivial inequalities, in first-insertion order among ties.
    pub fn find_trivial(&self) -> Vec<Inequality> {
        let mut by_size: Vec<&Inequality> = self.ineqs.values().collect();
        by_size.sort_by(|a, b| b.cells().len().cmp(&a.cells().len()));

        let mut trivials: Vec<Inequality> = Vec::new();
        for ineq in by_size {
            if !ineq.is_trivial() {
                continue;
            }
            if trivials.iter().any(|t| ineq.cells().is_subset(t.cells())) {
                continue;
            }
            trivials.push(ineq.clone());
        }
        trivials
    }

    /// Applies the decisions in `trivials` back into the remaining
    /// inequalities: fully-marked inequalities are dropped, partially-marked
    /// ones are shrunk and their bounds adjusted.
    pub fn reduce(&mut self, trivials: &[Inequality]) -> Result<(), SolverError> {
        let mut revealed = CellSet::empty();
        let mut flagged = CellSet::empty();
        for t in trivials {
            if t.lo() == 0 {
                revealed = revealed.union(t.cells());
            } else {
                flagged = flagged.union(t.cells());
            }
        }
        let marked = revealed.union(&flagged);
        if marked.is_empty() {
            return Ok(());
        }

        let mut by_size: Vec<CellSet> = self
            .ineqs
            .values()
            .map(|i| i.cells().clone())
            .collect();
        by_size.sort_by(|a, b| b.len().cmp(&a.len()));

        for cells in by_size {
            let Some(ineq) = self.ineqs.get(&cells).cloned() else {
                continue;
            };
            if cells.is_subset(&marked) {
                self.remove(&cells);
            } else if !cells.is_disjoint(&marked) {
                self.remove(&cells);
                let num_flagged = cells.intersection(&flagged).len();
                let new_cells = cells.difference(&marked);
                let new_lo = ineq.lo().saturating_sub(num_flagged).min(new_cells.len());
                let new_hi = ineq.hi().saturating_sub(num_flagged).min(new_cells.len());
                self.add(Inequality::new(new_cells, new_lo, new_hi)?)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ineq(cells: &[usize], lo: usize, hi: usize) -> Inequality {
        Inequality::new(CellSet::new(cells.iter().copied()), lo, hi).unwrap()
    }

    #[test]
    fn add_new_cell_sets_become_roots_when_unrelated() {
        let mut poset = Poset::new();
        poset.add(ineq(&[1, 2], 0, 1)).unwrap();
        poset.add(ineq(&[3, 4], 0, 1)).unwrap();
        assert_eq!(poset.roots().count(), 2);
    }

    #[test]
    fn add_links_subset_as_child() {
        let mut poset = Poset::new();
        poset.add(ineq(&[1, 2, 3], 1, 2)).unwrap();
        poset.add(ineq(&[1, 2], 0, 1)).unwrap();
        let parent_cells = CellSet::new(vec![1, 2, 3]);
        let child_cells = CellSet::new(vec![1, 2]);
        assert!(poset.children_of(&parent_cells).any(|c| *c == child_cells));
        assert!(poset.parents_of(&child_cells).any(|p| *p == parent_cells));
        assert_eq!(poset.roots().count(), 1);
    }

    #[test]
    fn add_tightens_without_touching_edges() {
        let mut poset = Poset::new();
        poset.add(ineq(&[1, 2], 0, 2)).unwrap();
        poset.add(ineq(&[1, 2], 1, 2)).unwrap();
        let stored = poset.get(&CellSet::new(vec![1, 2])).unwrap();
        assert_eq!(stored.bounds(), (1, 2));
        assert_eq!(poset.len(), 1);
    }

    #[test]
    fn remove_promotes_orphaned_children_to_roots() {
        let mut poset = Poset::new();
        poset.add(ineq(&[1, 2, 3], 1, 2)).unwrap();
        poset.add(ineq(&[1, 2], 0, 1)).unwrap();
        poset.remove(&CellSet::new(vec![1, 2, 3]));
        assert!(poset.roots().any(|r| *r == CellSet::new(vec![1, 2])));
    }

    #[test]
    fn find_trivial_is_maximal_and_deterministic() {
        let mut poset = Poset::new();
        poset.add(ineq(&[1, 2, 3], 0, 0)).unwrap();
        poset.add(ineq(&[1, 2], 0, 0)).unwrap();
        let trivials = poset.find_trivial();
        assert_eq!(trivials.len(), 1);
        assert_eq!(trivials[0].cells(), &CellSet::new(vec![1, 2, 3]));
    }

    #[test]
    fn reduce_drops_fully_marked_and_shrinks_partial() {
        let mut poset = Poset::new();
        poset.add(ineq(&[1, 2, 3, 4], 1, 1)).unwrap();
        let trivial = ineq(&[1, 2], 0, 0);
        poset.reduce(&[trivial]).unwrap();
        let remaining = poset.get(&CellSet::new(vec![3, 4])).unwrap();
        assert_eq!(remaining.bounds(), (1, 1));
    }

    #[test]
    fn reduce_accounts_for_flagged_cells_in_bounds() {
        let mut poset = Poset::new();
        poset.add(ineq(&[1, 2, 3, 4], 2, 2)).unwrap();
        let trivial = ineq(&[1, 2], 2, 2);
        poset.reduce(&[trivial]).unwrap();
        let remaining = poset.get(&CellSet::new(vec![3, 4])).unwrap();
        assert_eq!(remaining.bounds(), (0, 0));
    }

    #[test]
    fn subset_subsumption_pins_complement() {
        // Spec scenario 5: (2, {a,b,c,d}) and (0, {a,b}) => {c,d} flagged.
        let mut poset = Poset::new();
        poset.add(ineq(&[0, 1, 2, 3], 2, 2)).unwrap();
        poset.add(ineq(&[0, 1], 0, 0)).unwrap();
        poset.cross_ineqs().unwrap();
        let trivials = poset.find_trivial();
        poset.reduce(&trivials).unwrap();
        let new_trivials = poset.find_trivial();
        assert!(new_trivials
            .iter()
            .any(|t| t.cells() == &CellSet::new(vec![2, 3]) && t.is_all_mines()));
    }
}
