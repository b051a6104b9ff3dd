//! Minimum spanning trees by repeatedly merging partial trees
//!
//! Every vertex starts out as its own fragment.  The fragment at the front of
//! the list takes its cheapest arc leading to another fragment, swallows that
//! fragment, and goes to the back of the list.  Once a single fragment is
//! left, the arcs used to join fragments form a minimum spanning tree.

use crate::{
    fragment::PartialTree,
    graph::{Arc, Graph, VertexId},
    list::{ListError, PartialTreeList},
    union_find::{FragmentForest, NoVertex},
};

#[derive(Debug, Clone, Copy, thiserror::Error)]
pub enum MstError {
    #[error("Graph is disconnected, {remaining} fragments could not be joined")]
    Disconnected { remaining: usize },
    #[error("Partial tree list is inconsistent")]
    List(#[from] ListError),
    #[error("Fragment forest is inconsistent")]
    Forest(#[from] NoVertex),
    #[error("Partial tree rooted at {0:?} does not represent a distinct fragment")]
    StaleRoot(VertexId),
}

impl MstError {
    /// Returns true if the error indicates a graph with no spanning tree,
    /// rather than a broken invariant
    #[must_use]
    pub fn is_disconnected(&self) -> bool { matches!(self, Self::Disconnected { .. }) }
}

/// Build one single-vertex partial tree per vertex, in graph order, each
/// queueing every arc incident to its vertex
#[must_use]
pub fn initialize(graph: &Graph) -> PartialTreeList {
    let mut list =
        PartialTreeList::with_capacity(FragmentForest::with_singletons(graph.len()), graph.len());

    for (id, _) in graph.vertices() {
        list.append(PartialTree::with_arcs(id, graph.arcs_from(id).collect()));
    }

    list
}

/// Merge the partial trees of `list` until one remains, returning the arcs
/// used to join them in no particular order
///
/// # Errors
/// This method returns [`MstError::Disconnected`] if some fragment runs out
/// of arcs to other fragments before all have been joined.  Any other error
/// means `list` was not in a state produced by [`initialize`].
#[tracing::instrument(level = "debug", skip(list), fields(fragments = list.len()))]
pub fn execute(mut list: PartialTreeList) -> Result<Vec<Arc>, MstError> {
    let mut mst = Vec::with_capacity(list.len().saturating_sub(1));

    while list.len() > 1 {
        let mut tree = list.remove()?;
        let root = tree.root();
        if list.forest().find(root)? != root {
            return Err(MstError::StaleRoot(root));
        }

        let Some(&arc) = tree.arcs_mut().peek_crossing(list.forest(), root)? else {
            let remaining = list.len() + 1;
            tracing::debug!(?root, remaining, "Fragment has no arcs to other fragments");
            return Err(MstError::Disconnected { remaining });
        };

        let outside = if list.forest().find(arc.v1())? == root {
            arc.v2()
        } else {
            arc.v1()
        };

        let other = list.remove_tree_containing(outside)?;
        let unioned = list.forest_mut().union(root, other.root())?;
        if !unioned.did_merge() {
            return Err(MstError::StaleRoot(other.root()));
        }

        tracing::debug!(?arc, root = ?unioned.root, "Merging fragments");

        tree.merge(other, unioned.root);
        mst.push(arc);
        list.append(tree);
    }

    tracing::debug!(arcs = mst.len(), "Spanning tree complete");

    Ok(mst)
}

/// Compute a minimum spanning tree of `graph`
///
/// # Errors
/// This method fails if the graph is disconnected.
pub fn minimum_spanning_tree(graph: &Graph) -> Result<Vec<Arc>, MstError> {
    execute(initialize(graph))
}

#[cfg(test)]
mod test {
    use proptest::{prelude::*, sample::Index};

    use super::{MstError, execute, initialize, minimum_spanning_tree};
    use crate::{
        graph::{Arc, Graph},
        union_find::FragmentForest,
    };

    fn kruskal_weight(graph: &Graph) -> i128 {
        let mut arcs: Vec<_> = graph
            .vertices()
            .flat_map(|(id, _)| graph.arcs_from(id))
            .collect();
        arcs.sort();

        let mut forest = FragmentForest::with_singletons(graph.len());
        arcs.into_iter()
            .filter(|a| forest.union(a.v1(), a.v2()).unwrap().did_merge())
            .map(|a| i128::from(a.weight()))
            .sum()
    }

    fn assert_spanning_tree(graph: &Graph, arcs: &[Arc]) {
        assert_eq!(arcs.len(), graph.len().saturating_sub(1));

        let mut forest = FragmentForest::with_singletons(graph.len());
        for arc in arcs {
            assert!(
                forest.union(arc.v1(), arc.v2()).unwrap().did_merge(),
                "{arc:?} closes a cycle"
            );
        }

        assert!(forest.roots().count() <= 1);
    }

    fn names(graph: &Graph, arcs: &[Arc]) -> Vec<String> {
        let mut names: Vec<_> = arcs
            .iter()
            .map(|&a| {
                let (x, y) = a.endpoints();
                format!(
                    "{}{}",
                    graph.vertex(x).unwrap().name(),
                    graph.vertex(y).unwrap().name()
                )
            })
            .collect();
        names.sort();
        names
    }

    #[test]
    fn square() {
        let g: Graph = "4\nA\nB\nC\nD\nA B 1\nB C 2\nC D 3\nA D 10\n"
            .parse()
            .unwrap();
        let list = initialize(&g);
        assert_eq!(list.len(), 4);
        assert_eq!(
            list.iter().map(|t| t.arcs().len()).collect::<Vec<_>>(),
            vec![2, 2, 2, 2]
        );

        let mst = execute(list).unwrap();
        assert_eq!(names(&g, &mst), vec!["AB", "BC", "CD"]);
        assert_eq!(Graph::total_weight(&mst), 6);
        assert_spanning_tree(&g, &mst);
    }

    #[test]
    fn single_vertex() {
        let g: Graph = "1\nsolo\n".parse().unwrap();
        assert!(minimum_spanning_tree(&g).unwrap().is_empty());

        let g: Graph = "1\nsolo\nsolo solo 4\n".parse().unwrap();
        assert!(minimum_spanning_tree(&g).unwrap().is_empty());
    }

    #[test]
    fn empty_graph() {
        let list = initialize(&Graph::default());
        assert!(list.is_empty());
        assert!(execute(list).unwrap().is_empty());
    }

    #[test]
    fn disconnected() {
        let g: Graph = "4\nA\nB\nC\nD\nA B 1\nC D 1\n".parse().unwrap();
        let err = minimum_spanning_tree(&g).unwrap_err();
        assert!(err.is_disconnected());
        assert!(matches!(err, MstError::Disconnected { remaining: 2 }));

        let g: Graph = "3\nA\nB\nC\nA B 1\n".parse().unwrap();
        assert!(minimum_spanning_tree(&g).unwrap_err().is_disconnected());
    }

    #[test]
    fn parallel_edges_and_loops() {
        let g: Graph = "3\nA\nB\nC\nA B 5\nA B 2\nB B 0\nB C 7\nC A 3\nC C -1\n"
            .parse()
            .unwrap();
        let mst = minimum_spanning_tree(&g).unwrap();

        assert_eq!(names(&g, &mst), vec!["AB", "AC"]);
        assert_eq!(Graph::total_weight(&mst), 5);
    }

    #[test]
    fn negative_weights() {
        let g: Graph = "3\nA\nB\nC\nA B -5\nB C -2\nA C -9\n".parse().unwrap();
        let mst = minimum_spanning_tree(&g).unwrap();

        assert_eq!(names(&g, &mst), vec!["AB", "AC"]);
        assert_eq!(Graph::total_weight(&mst), -14);
    }

    #[test]
    fn broken_list() {
        let g: Graph = "2\nA\nB\nA B 1\n".parse().unwrap();
        let mut list = initialize(&g);
        let b = g.find("B").unwrap();
        list.remove_tree_containing(b).unwrap();
        list.append(crate::fragment::PartialTree::new(g.find("A").unwrap()));

        let err = execute(list).unwrap_err();
        assert!(!err.is_disconnected());
        assert!(matches!(err, MstError::List(_)));
    }

    #[test]
    fn tree_root_outside_forest_root() {
        let g: Graph = "2\nA\nB\nA B 1\n".parse().unwrap();
        let (a, b) = (g.find("A").unwrap(), g.find("B").unwrap());
        let mut list = initialize(&g);
        let front = list.remove().unwrap();
        list.append(front);
        list.forest_mut().union(a, b).unwrap();

        let err = execute(list).unwrap_err();
        assert!(!err.is_disconnected());
        assert!(matches!(err, MstError::StaleRoot(r) if r == b));
    }

    #[test]
    fn duplicate_fragment_trees() {
        let g: Graph = "3\nA\nB\nC\nA B 1\nB C 2\n".parse().unwrap();
        let (a, b) = (g.find("A").unwrap(), g.find("B").unwrap());
        let mut list = initialize(&g);
        list.remove_tree_containing(b).unwrap();
        list.append(crate::fragment::PartialTree::with_arcs(
            b,
            g.arcs_from(b).collect(),
        ));
        list.remove_tree_containing(a).unwrap();
        list.forest_mut().union(a, b).unwrap();
        list.append(crate::fragment::PartialTree::with_arcs(
            a,
            [Arc::new(a, b, 0)].into_iter().collect(),
        ));

        let err = execute(list).unwrap_err();
        assert!(!err.is_disconnected());
        assert!(matches!(err, MstError::StaleRoot(r) if r == b));
    }

    fn connected_graph() -> impl Strategy<Value = Graph> {
        (1..48_usize).prop_flat_map(|n| {
            let tree = prop::collection::vec((any::<Index>(), -64..64_i64), n - 1);
            let extra = prop::collection::vec((0..n, 0..n, -64..64_i64), 0..=(3 * n));

            (tree, extra).prop_map(move |(tree, extra)| {
                let mut b = Graph::builder();
                let ids: Vec<_> = (0..n)
                    .map(|i| b.add_vertex(format!("v{i}")).unwrap())
                    .collect();

                for (i, (parent, w)) in tree.into_iter().enumerate() {
                    b.add_edge(ids[i + 1], ids[parent.index(i + 1)], w).unwrap();
                }

                for (x, y, w) in extra {
                    b.add_edge(ids[x], ids[y], w).unwrap();
                }

                b.build()
            })
        })
    }

    proptest! {
        #[test]
        fn matches_kruskal(g in connected_graph()) {
            let mst = minimum_spanning_tree(&g).unwrap();
            assert_spanning_tree(&g, &mst);
            prop_assert_eq!(Graph::total_weight(&mst), kruskal_weight(&g));
        }

        #[test]
        fn split_graph_is_disconnected(
            l in connected_graph(),
            r in connected_graph(),
        ) {
            let mut b = Graph::builder();
            for (g, prefix) in [(&l, "l"), (&r, "r")] {
                let ids: Vec<_> = g
                    .vertices()
                    .map(|(_, v)| b.add_vertex(format!("{prefix}{}", v.name())).unwrap())
                    .collect();

                for (id, _) in g.vertices() {
                    for arc in g.arcs_from(id).filter(|a| a.v1() <= a.v2()) {
                        b.add_edge(ids[arc.v1().id()], ids[arc.v2().id()], arc.weight()).unwrap();
                    }
                }
            }

            let err = minimum_spanning_tree(&b.build()).unwrap_err();
            prop_assert!(err.is_disconnected());
        }
    }
}
