use std::collections::{HashSet, VecDeque};

use log::{debug, trace};
use thiserror::Error;

use crate::{
    graph::{DependencyGraph, GraphNode, NodeIndex},
    model::module::{ModuleDescriptor, ModuleName},
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DependencyError {
    #[error("Module {module} requires {missing}, which is not installed")]
    MissingDependency {
        module: ModuleName,
        missing: ModuleName,
    },
    #[error(
        "Cyclic dependency, modules that cannot be ordered: {} (cycle: {})",
        join(.remaining, ", "),
        join(.cycle, " -> ")
    )]
    CyclicDependency {
        /// Every module left unplaced, in enumeration order.
        remaining: Vec<ModuleName>,
        /// One closed path through the unplaced modules, first and last entries equal.
        cycle: Vec<ModuleName>,
    },
    #[error("Module {name} is declared more than once")]
    DuplicateModule { name: ModuleName },
}

fn join(names: &[ModuleName], separator: &str) -> String {
    names
        .iter()
        .map(ModuleName::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Computes module initialization orders. Holds no state between calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct DependencyResolver;

impl DependencyResolver {
    pub fn new() -> Self {
        DependencyResolver
    }

    /// Creates one node per module, then links every declared requirement.
    ///
    /// Fails on the first requirement that names no supplied module.
    pub fn build_graph(
        &self,
        modules: impl IntoIterator<Item = ModuleDescriptor>,
    ) -> Result<DependencyGraph, DependencyError> {
        let mut graph = DependencyGraph::default();
        for module in modules {
            if graph.index_of(&module.name).is_some() {
                return Err(DependencyError::DuplicateModule { name: module.name });
            }
            trace!("Adding node for {} {}", module.name, module.version);
            graph.insert(module);
        }

        let indices = graph.nodes().map(|(index, _)| index).collect::<Vec<_>>();
        for index in indices {
            let node = graph.node(index);
            let edges = node
                .module()
                .required_modules
                .iter()
                .map(|required| {
                    graph
                        .index_of(required)
                        .ok_or_else(|| DependencyError::MissingDependency {
                            module: node.name().clone(),
                            missing: required.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            for required in edges {
                graph.link(index, required);
            }
        }

        debug!("Built dependency graph with {} modules", graph.len());
        Ok(graph)
    }

    /// Kahn's algorithm. Ties between modules that become ready together are
    /// broken by enumeration order.
    ///
    /// Forward edges are consumed while ordering, so the returned nodes all
    /// have an empty `depends_on`.
    pub fn order(&self, mut graph: DependencyGraph) -> Result<Vec<GraphNode>, DependencyError> {
        let mut ready = graph
            .nodes()
            .filter(|(_, node)| node.depends_on().is_empty())
            .map(|(index, _)| index)
            .collect::<VecDeque<_>>();
        let mut ordered = Vec::with_capacity(graph.len());

        while let Some(current) = ready.pop_front() {
            trace!("Placing {}", graph.node(current).name());
            ordered.push(current);
            let dependents = graph.node(current).dependents().to_vec();
            for dependent in dependents {
                let node = graph.node_mut(dependent);
                node.remove_depends_on(current);
                if node.depends_on().is_empty() {
                    ready.push_back(dependent);
                }
            }
        }

        if ordered.len() < graph.len() {
            let placed = ordered.iter().copied().collect::<HashSet<_>>();
            let unplaced = graph
                .nodes()
                .map(|(index, _)| index)
                .filter(|index| !placed.contains(index))
                .collect::<Vec<_>>();
            return Err(DependencyError::CyclicDependency {
                remaining: graph.names(&unplaced),
                cycle: graph.names(&find_cycle(&graph, unplaced[0])),
            });
        }

        debug!("Ordered {} modules", ordered.len());
        let mut slots = graph.into_nodes().into_iter().map(Some).collect::<Vec<_>>();
        Ok(ordered
            .into_iter()
            .filter_map(|index| slots[index.index()].take())
            .collect())
    }

    /// [`build_graph`](Self::build_graph) followed by [`order`](Self::order).
    pub fn resolve_order(
        &self,
        modules: impl IntoIterator<Item = ModuleDescriptor>,
    ) -> Result<Vec<ModuleDescriptor>, DependencyError> {
        let graph = self.build_graph(modules)?;
        Ok(self
            .order(graph)?
            .into_iter()
            .map(GraphNode::into_module)
            .collect())
    }
}

/// Shorthand for [`DependencyResolver::resolve_order`].
pub fn resolve_order(
    modules: impl IntoIterator<Item = ModuleDescriptor>,
) -> Result<Vec<ModuleDescriptor>, DependencyError> {
    DependencyResolver::new().resolve_order(modules)
}

/// Follows the first outstanding dependency from `start` until a node repeats.
///
/// Every outstanding dependency of an unplaced node is itself unplaced, so the
/// walk always closes.
fn find_cycle(graph: &DependencyGraph, start: NodeIndex) -> Vec<NodeIndex> {
    let mut path = vec![start];
    let mut current = start;
    loop {
        current = graph.node(current).depends_on()[0];
        if let Some(position) = path.iter().position(|index| *index == current) {
            let mut cycle = path.split_off(position);
            cycle.push(current);
            return cycle;
        }
        path.push(current);
    }
}
