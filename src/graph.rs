use std::{
    collections::{HashMap, HashSet, VecDeque},
    hash::{Hash, Hasher},
};

use crate::model::module::{ModuleDescriptor, ModuleName};

/// Position of a node inside the [`DependencyGraph`] that created it.
///
/// Indices are only meaningful for the graph they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One module plus its forward (`depends_on`) and reverse (`dependents`) edges.
///
/// Both edge lists are insertion-ordered sets.
#[derive(Debug, Clone)]
pub struct GraphNode {
    module: ModuleDescriptor,
    depends_on: Vec<NodeIndex>,
    dependents: Vec<NodeIndex>,
}

impl GraphNode {
    pub fn new(module: ModuleDescriptor) -> Self {
        GraphNode {
            module,
            depends_on: Vec::new(),
            dependents: Vec::new(),
        }
    }

    pub fn module(&self) -> &ModuleDescriptor {
        &self.module
    }

    pub fn into_module(self) -> ModuleDescriptor {
        self.module
    }

    pub fn name(&self) -> &ModuleName {
        &self.module.name
    }

    pub fn depends_on(&self) -> &[NodeIndex] {
        &self.depends_on
    }

    pub fn dependents(&self) -> &[NodeIndex] {
        &self.dependents
    }

    pub fn add_depends_on(&mut self, node: NodeIndex) {
        insert_unique(&mut self.depends_on, node);
    }

    /// Removing an absent edge is a no-op.
    pub fn remove_depends_on(&mut self, node: NodeIndex) {
        remove_member(&mut self.depends_on, node);
    }

    pub fn add_dependent(&mut self, node: NodeIndex) {
        insert_unique(&mut self.dependents, node);
    }

    /// Removing an absent edge is a no-op.
    pub fn remove_dependent(&mut self, node: NodeIndex) {
        remove_member(&mut self.dependents, node);
    }
}

impl PartialEq for GraphNode {
    fn eq(&self, other: &Self) -> bool {
        self.module.identity() == other.module.identity()
    }
}

impl Eq for GraphNode {}

impl Hash for GraphNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.module.identity().hash(state);
    }
}

fn insert_unique(edges: &mut Vec<NodeIndex>, node: NodeIndex) {
    if !edges.contains(&node) {
        edges.push(node);
    }
}

fn remove_member(edges: &mut Vec<NodeIndex>, node: NodeIndex) {
    if let Some(position) = edges.iter().position(|n| *n == node) {
        edges.remove(position);
    }
}

/// The nodes of one resolution call, in module enumeration order.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    nodes: Vec<GraphNode>,
    by_name: HashMap<ModuleName, NodeIndex>,
}

impl DependencyGraph {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &GraphNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex(i), node))
    }

    /// # Panics
    ///
    /// Panics if `index` was handed out by a different, larger graph.
    pub fn node(&self, index: NodeIndex) -> &GraphNode {
        &self.nodes[index.0]
    }

    pub fn index_of(&self, name: &ModuleName) -> Option<NodeIndex> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, name: &ModuleName) -> Option<&GraphNode> {
        self.index_of(name).map(|index| self.node(index))
    }

    /// Names of the given nodes, in the order given.
    pub fn names(&self, indices: &[NodeIndex]) -> Vec<ModuleName> {
        indices
            .iter()
            .map(|index| self.node(*index).name().clone())
            .collect()
    }

    /// Every module that requires `name` directly or through other modules,
    /// nearest first. `name` itself is only included when it sits on a cycle.
    pub fn dependents_closure(&self, name: &ModuleName) -> Option<Vec<ModuleName>> {
        let start = self.index_of(name)?;
        let mut seen = HashSet::new();
        let mut closure = Vec::new();
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for dependent in self.node(current).dependents() {
                if seen.insert(*dependent) {
                    closure.push(self.node(*dependent).name().clone());
                    queue.push_back(*dependent);
                }
            }
        }
        Some(closure)
    }

    pub(crate) fn insert(&mut self, module: ModuleDescriptor) -> NodeIndex {
        let index = NodeIndex(self.nodes.len());
        self.by_name.insert(module.name.clone(), index);
        self.nodes.push(GraphNode::new(module));
        index
    }

    /// Adds the edge `from -> to` on both endpoints.
    pub(crate) fn link(&mut self, from: NodeIndex, to: NodeIndex) {
        self.nodes[from.0].add_depends_on(to);
        self.nodes[to.0].add_dependent(from);
    }

    /// # Panics
    ///
    /// Same as [`node`](Self::node).
    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> &mut GraphNode {
        &mut self.nodes[index.0]
    }

    pub(crate) fn into_nodes(self) -> Vec<GraphNode> {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn module(name: &str, version: &str) -> ModuleDescriptor {
        ModuleDescriptor::new(name, version, Vec::<&str>::new())
    }

    #[test]
    fn edges_are_sets() {
        let mut node = GraphNode::new(module("cms", "1.0.0"));
        node.add_depends_on(NodeIndex(1));
        node.add_depends_on(NodeIndex(2));
        node.add_depends_on(NodeIndex(1));
        assert_eq!(node.depends_on(), &[NodeIndex(1), NodeIndex(2)]);

        node.remove_depends_on(NodeIndex(1));
        node.remove_depends_on(NodeIndex(1));
        assert_eq!(node.depends_on(), &[NodeIndex(2)]);

        node.add_dependent(NodeIndex(3));
        node.add_dependent(NodeIndex(4));
        node.remove_dependent(NodeIndex(9));
        node.remove_dependent(NodeIndex(3));
        assert_eq!(node.dependents(), &[NodeIndex(4)]);
    }

    #[test]
    fn equality_uses_name_and_version() {
        let mut a = GraphNode::new(module("core", "1.0.0"));
        a.add_dependent(NodeIndex(5));
        let b = GraphNode::new(ModuleDescriptor {
            description: Some("other".to_string()),
            ..module("core", "1.0.0")
        });
        assert_eq!(a, b);
        assert_ne!(a, GraphNode::new(module("core", "1.0.1")));
        assert_ne!(a, GraphNode::new(module("base", "1.0.0")));

        let set = HashSet::from([a, b]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn link_creates_both_sides() {
        let mut graph = DependencyGraph::default();
        let core = graph.insert(module("core", "1.0.0"));
        let cms = graph.insert(module("cms", "1.0.0"));
        graph.link(cms, core);

        assert_eq!(graph.node(cms).depends_on(), &[core]);
        assert_eq!(graph.node(core).dependents(), &[cms]);
        assert!(graph.node(core).depends_on().is_empty());
        assert_eq!(graph.index_of(&ModuleName::from("cms")), Some(cms));
        assert_eq!(graph.get(&ModuleName::from("nope")), None);
    }

    #[test]
    #[should_panic]
    fn node_index_from_another_graph() {
        let mut larger = DependencyGraph::default();
        larger.insert(module("core", "1.0.0"));
        let cms = larger.insert(module("cms", "1.0.0"));

        let mut smaller = DependencyGraph::default();
        smaller.insert(module("core", "1.0.0"));
        smaller.node(cms);
    }

    #[test]
    fn dependents_closure_is_transitive() {
        let mut graph = DependencyGraph::default();
        let core = graph.insert(module("core", "1.0.0"));
        let search = graph.insert(module("search", "1.0.0"));
        let cms = graph.insert(module("cms", "1.0.0"));
        graph.insert(module("theme", "1.0.0"));
        graph.link(search, core);
        graph.link(cms, search);
        graph.link(cms, core);

        assert_eq!(
            graph.dependents_closure(&ModuleName::from("core")),
            Some(vec![ModuleName::from("search"), ModuleName::from("cms")])
        );
        assert_eq!(
            graph.dependents_closure(&ModuleName::from("theme")),
            Some(vec![])
        );
        assert_eq!(graph.dependents_closure(&ModuleName::from("missing")), None);
    }
}
