//! Debug graph export: dumps the poset's parent/child edges as a Graphviz
//! `.dot` file, one edge per line, largest inequalities first so the file is
//! diff-stable across runs.

use std::io::{self, Write};

use crate::poset::Poset;

pub fn write_dot<W: Write>(poset: &Poset, mut out: W) -> io::Result<()> {
    writeln!(out, "digraph G {{")?;

    let mut parents: Vec<_> = poset.inequalities().collect();
    parents.sort_by_key(|ineq| std::cmp::Reverse(ineq.cells().len()));

    for parent in parents {
        let mut children: Vec<_> = poset.children_of(parent.cells()).collect();
        children.sort_by_key(|cells| std::cmp::Reverse(cells.len()));
        for child in children {
            writeln!(out, "  \"{:?}\" -> \"{:?}\";", parent.cells(), child)?;
        }
    }

    writeln!(out, "}}")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cellset::CellSet;
    use crate::inequality::Inequality;

    #[test]
    fn renders_one_edge_per_parent_child_pair() {
        let mut poset = Poset::new();
        poset
            .add(Inequality::new(CellSet::new(vec![0, 1, 2]), 1, 2).unwrap())
            .unwrap();
        poset
            .add(Inequality::new(CellSet::new(vec![0, 1]), 0, 1).unwrap())
            .unwrap();

        let mut buf = Vec::new();
        write_dot(&poset, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("digraph G {\n"));
        assert!(text.trim_end().ends_with('}'));
        assert!(text.contains("->"));
    }
}
