//! Graph export functionality for dependency visualization.
//!
//! Every bind call records a [`GraphNode`] describing the static shape of
//! the binding: interface name, implementation name and the ordered ids of
//! its declared dependencies. The shape is known before any instance is
//! built, so the graph can be rendered for an unresolved container.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::error::DiResult;
use crate::type_registry::ServiceId;
use crate::Container;

/// A node in the dependency graph representing one binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// Display name of the bound interface (including its tag, if any)
    pub interface_name: String,
    /// Display name of the implementation
    pub implementation_name: String,
    /// Declared dependencies, in declaration order
    pub dependencies: Vec<ServiceId>,
}

/// Snapshot of a container's binding graph, ordered by ascending id.
///
/// Dependencies that were declared but never bound have no node; their
/// interface names are kept separately so they can still be labelled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    nodes: BTreeMap<ServiceId, GraphNode>,
    unbound: BTreeMap<ServiceId, String>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_node(&mut self, id: ServiceId, node: GraphNode) {
        self.nodes.insert(id, node);
    }

    pub(crate) fn insert_unbound(&mut self, id: ServiceId, interface_name: String) {
        self.unbound.insert(id, interface_name);
    }

    pub fn nodes(&self) -> &BTreeMap<ServiceId, GraphNode> {
        &self.nodes
    }

    pub fn node(&self, id: ServiceId) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    /// Finds the node bound for an interface display name (e.g. `"Greeter"`).
    pub fn find_interface(&self, interface_name: &str) -> Option<(ServiceId, &GraphNode)> {
        self.nodes
            .iter()
            .find(|(_, node)| node.interface_name == interface_name)
            .map(|(id, node)| (*id, node))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ServiceId, &GraphNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids that appear as dependencies but have no binding.
    pub fn unbound(&self) -> impl Iterator<Item = (ServiceId, &str)> {
        self.unbound.iter().map(|(id, name)| (*id, name.as_str()))
    }

    /// Label used for `id` in rendered output: the implementation name of
    /// its node, or the interface name if it was never bound.
    pub fn label(&self, id: ServiceId) -> &str {
        match self.nodes.get(&id) {
            Some(node) => &node.implementation_name,
            None => self.unbound.get(&id).map_or("", String::as_str),
        }
    }

    /// Interface names of a node's dependencies, in declaration order.
    pub fn dependency_interfaces(&self, node: &GraphNode) -> Vec<&str> {
        node.dependencies
            .iter()
            .map(|id| match self.nodes.get(id) {
                Some(dep) => dep.interface_name.as_str(),
                None => self.unbound.get(id).map_or("", String::as_str),
            })
            .collect()
    }
}

/// Export formats supported for dependency graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// DOT format for Graphviz visualization
    Dot,
    /// JSON format for tooling
    #[cfg(feature = "graph-export")]
    Json,
}

/// Graph exporter for generating dependency visualizations.
pub trait GraphExporter {
    fn export(&self, graph: &DependencyGraph) -> DiResult<String>;
}

/// Renders a graph in the `digraph diydi` DOT dialect.
///
/// One line per node in ascending id order, labelled by implementation
/// name; the document has no trailing newline.
///
/// ```
/// use diydi::{DependencyGraph, DotExporter};
///
/// assert_eq!(DotExporter::render(&DependencyGraph::new()), "digraph diydi {\n}");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct DotExporter;

impl DotExporter {
    pub fn render(graph: &DependencyGraph) -> String {
        let mut output = String::from("digraph diydi {");

        for (_, node) in graph.iter() {
            let dependencies = node
                .dependencies
                .iter()
                .map(|id| format!("\"{}\"", graph.label(*id)))
                .collect::<Vec<_>>()
                .join(", ");

            // Writing to a String cannot fail
            let _ = write!(
                output,
                "\n    \"{}\" -> {{{}}};",
                node.implementation_name, dependencies
            );
        }

        output.push_str("\n}");
        output
    }
}

impl GraphExporter for DotExporter {
    fn export(&self, graph: &DependencyGraph) -> DiResult<String> {
        Ok(Self::render(graph))
    }
}

/// Pretty-printed JSON with one object per node.
#[cfg(feature = "graph-export")]
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonExporter;

#[cfg(feature = "graph-export")]
impl GraphExporter for JsonExporter {
    fn export(&self, graph: &DependencyGraph) -> DiResult<String> {
        let nodes: Vec<serde_json::Value> = graph
            .iter()
            .map(|(id, node)| {
                serde_json::json!({
                    "id": id.index(),
                    "interface": node.interface_name,
                    "implementation": node.implementation_name,
                    "dependencies": node
                        .dependencies
                        .iter()
                        .map(|dep| graph.label(*dep))
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        let unbound: Vec<&str> = graph.unbound().map(|(_, name)| name).collect();

        let document = serde_json::json!({
            "nodes": nodes,
            "unbound": unbound,
        });
        // Alternate Display on a Value is pretty-printed and cannot fail
        Ok(format!("{:#}", document))
    }
}

/// Convenience functions over a [`Container`].
pub mod exports {
    use super::*;

    pub fn to_dot(container: &Container) -> String {
        DotExporter::render(&container.get_graph())
    }

    #[cfg(feature = "graph-export")]
    pub fn to_json(container: &Container) -> DiResult<String> {
        JsonExporter.export(&container.get_graph())
    }

    pub fn export(container: &Container, format: ExportFormat) -> DiResult<String> {
        let graph = container.get_graph();
        match format {
            ExportFormat::Dot => DotExporter.export(&graph),
            #[cfg(feature = "graph-export")]
            ExportFormat::Json => JsonExporter.export(&graph),
        }
    }
}
