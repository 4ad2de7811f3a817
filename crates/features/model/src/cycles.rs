//! Cycle detection over the module graph.
//!
//! Modules become nodes, cross-module symbol references become edges. Strongly connected
//! components with more than one member are cycles; for each of them the shortest cycle
//! through its first member (in registry order) is reported together with witness references.

use crate::modules::Modules;
use crate::violation::{CycleEdge, CycleViolation, SymbolReference};
use fxhash::FxHashMap;
use std::collections::VecDeque;

/// Upper bound on symbol references reported per cycle edge.
pub const MAX_WITNESSES_PER_EDGE: usize = 3;

struct SliceGraph<'m> {
    names: Vec<&'m str>,
    successors: Vec<Vec<usize>>,
    witnesses: FxHashMap<(usize, usize), Vec<SymbolReference>>,
}

impl<'m> SliceGraph<'m> {
    fn build(modules: &'m Modules) -> Self {
        let names: Vec<&str> = modules.iter().map(|module| module.name()).collect();
        let position: FxHashMap<&str, usize> =
            names.iter().enumerate().map(|(idx, &name)| (name, idx)).collect();

        let mut successors = vec![Vec::new(); names.len()];
        let mut witnesses: FxHashMap<(usize, usize), Vec<SymbolReference>> = FxHashMap::default();

        for (from, module) in modules.iter().enumerate() {
            for dependency in module.direct_dependencies(modules) {
                let Some(&to) = position.get(dependency.target_module.as_str()) else {
                    continue;
                };
                let refs = witnesses.entry((from, to)).or_default();
                if refs.is_empty() {
                    successors[from].push(to);
                }
                if refs.len() < MAX_WITNESSES_PER_EDGE {
                    refs.push(dependency.reference.clone());
                }
            }
        }

        Self { names, successors, witnesses }
    }

    fn len(&self) -> usize {
        self.names.len()
    }
}

struct Tarjan<'g> {
    successors: &'g [Vec<usize>],
    next_index: usize,
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    components: Vec<Vec<usize>>,
}

impl<'g> Tarjan<'g> {
    fn run(successors: &'g [Vec<usize>]) -> Vec<Vec<usize>> {
        let len = successors.len();
        let mut tarjan = Self {
            successors,
            next_index: 0,
            index: vec![None; len],
            lowlink: vec![0; len],
            on_stack: vec![false; len],
            stack: Vec::new(),
            components: Vec::new(),
        };

        for node in 0..len {
            if tarjan.index[node].is_none() {
                tarjan.visit(node);
            }
        }
        tarjan.components
    }

    fn visit(&mut self, v: usize) {
        self.index[v] = Some(self.next_index);
        self.lowlink[v] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[v] = true;

        for &w in &self.successors[v] {
            match self.index[w] {
                None => {
                    self.visit(w);
                    self.lowlink[v] = self.lowlink[v].min(self.lowlink[w]);
                },
                Some(w_index) if self.on_stack[w] => {
                    self.lowlink[v] = self.lowlink[v].min(w_index);
                },
                Some(_) => {},
            }
        }

        if Some(self.lowlink[v]) == self.index[v] {
            let mut component = Vec::new();
            while let Some(w) = self.stack.pop() {
                self.on_stack[w] = false;
                component.push(w);
                if w == v {
                    break;
                }
            }
            component.sort_unstable();
            self.components.push(component);
        }
    }
}

/// Shortest cycle through `start` that stays inside `component`.
fn shortest_cycle(graph: &SliceGraph<'_>, component: &[usize], start: usize) -> Vec<usize> {
    let mut member = vec![false; graph.len()];
    for &node in component {
        member[node] = true;
    }

    let mut parent: Vec<Option<usize>> = vec![None; graph.len()];
    let mut seen = vec![false; graph.len()];
    let mut queue = VecDeque::from([start]);
    seen[start] = true;

    while let Some(node) = queue.pop_front() {
        for &next in &graph.successors[node] {
            if next == start {
                let mut path = vec![node];
                let mut cursor = node;
                while let Some(previous) = parent[cursor] {
                    path.push(previous);
                    cursor = previous;
                }
                path.reverse();
                return path;
            }
            if member[next] && !seen[next] {
                seen[next] = true;
                parent[next] = Some(node);
                queue.push_back(next);
            }
        }
    }

    // Every member of a strongly connected component reaches `start`.
    component.to_vec()
}

/// Every module cycle of `modules`, ordered by the registry position of their first member.
pub(crate) fn detect(modules: &Modules) -> Vec<CycleViolation> {
    let graph = SliceGraph::build(modules);

    let mut components: Vec<Vec<usize>> = Tarjan::run(&graph.successors)
        .into_iter()
        .filter(|component| component.len() > 1)
        .collect();
    components.sort_unstable_by_key(|component| component[0]);

    components
        .iter()
        .map(|component| {
            let cycle = shortest_cycle(&graph, component, component[0]);
            let edges = cycle
                .iter()
                .zip(cycle.iter().cycle().skip(1))
                .map(|(&from, &to)| CycleEdge {
                    from: graph.names[from].to_owned(),
                    to: graph.names[to].to_owned(),
                    witnesses: graph.witnesses.get(&(from, to)).cloned().unwrap_or_default(),
                })
                .collect();

            CycleViolation {
                cycle: cycle.iter().map(|&node| graph.names[node].to_owned()).collect(),
                edges,
            }
        })
        .collect()
}
