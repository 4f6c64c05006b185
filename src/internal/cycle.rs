//! Bind-time dependency cycle detection.
//!
//! Every binding's dependency list is recorded when it is declared, so a
//! cycle can only be closed by the binding currently being added. Walking
//! the recorded graph from the new node's dependencies and looking for the
//! new node is therefore enough to keep the whole graph acyclic.

use std::collections::{BTreeMap, HashSet};

use crate::graph_export::GraphNode;
use crate::type_registry::ServiceId;

/// Returns the path `start -> ... -> start` if binding `start` with
/// `dependencies` would close a cycle in `graph`.
pub(crate) fn find_cycle(
    start: ServiceId,
    dependencies: &[ServiceId],
    graph: &BTreeMap<ServiceId, GraphNode>,
) -> Option<Vec<ServiceId>> {
    let mut visited = HashSet::new();
    let mut path = vec![start];

    for &dependency in dependencies {
        if walk(dependency, start, graph, &mut visited, &mut path) {
            return Some(path);
        }
    }
    None
}

fn walk(
    current: ServiceId,
    target: ServiceId,
    graph: &BTreeMap<ServiceId, GraphNode>,
    visited: &mut HashSet<ServiceId>,
    path: &mut Vec<ServiceId>,
) -> bool {
    path.push(current);
    if current == target {
        return true;
    }

    if visited.insert(current) {
        if let Some(node) = graph.get(&current) {
            for &next in &node.dependencies {
                if walk(next, target, graph, visited, path) {
                    return true;
                }
            }
        }
    }

    path.pop();
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::ServiceKey;
    use crate::type_registry::TypeRegistry;

    fn ids(registry: &TypeRegistry, n: usize) -> Vec<ServiceId> {
        // Distinct keys from one type and distinct tags
        const TAGS: [&str; 4] = ["a", "b", "c", "d"];
        TAGS[..n]
            .iter()
            .map(|tag| registry.id_of(&ServiceKey::named::<u8>(tag)))
            .collect()
    }

    fn node(dependencies: Vec<ServiceId>) -> GraphNode {
        GraphNode {
            interface_name: String::new(),
            implementation_name: String::new(),
            dependencies,
        }
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let registry = TypeRegistry::new();
        let a = ids(&registry, 1)[0];

        let path = find_cycle(a, &[a], &BTreeMap::new());
        assert_eq!(path, Some(vec![a, a]));
    }

    #[test]
    fn test_closing_edge_reports_full_path() {
        let registry = TypeRegistry::new();
        let v = ids(&registry, 3);
        let (a, b, c) = (v[0], v[1], v[2]);

        // b -> c -> a already recorded; binding a -> b closes the loop
        let mut graph = BTreeMap::new();
        graph.insert(b, node(vec![c]));
        graph.insert(c, node(vec![a]));

        assert_eq!(find_cycle(a, &[b], &graph), Some(vec![a, b, c, a]));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let registry = TypeRegistry::new();
        let v = ids(&registry, 4);
        let (a, b, c, d) = (v[0], v[1], v[2], v[3]);

        let mut graph = BTreeMap::new();
        graph.insert(b, node(vec![d]));
        graph.insert(c, node(vec![d]));
        graph.insert(d, node(vec![]));

        assert_eq!(find_cycle(a, &[b, c], &graph), None);
    }
}
