use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::{Bfs, EdgeFiltered, EdgeRef},
};

use crate::automaton::Dfa;

/// Graph view of a [`Dfa`]. Nodes are state names, edges are labelled with
/// their symbol.
#[derive(Debug, Clone)]
pub struct DfaGraph<'a> {
    pub graph: DiGraph<&'a str, &'a str>,
    pub nodes: HashMap<&'a str, NodeIndex<u32>>,
}

impl DfaGraph<'_> {
    pub fn node(&self, state: &str) -> Option<NodeIndex<u32>> {
        self.nodes.get(state).copied()
    }
}

impl Dfa {
    /// Builds a [`DfaGraph`]. States that only appear as the start state, in
    /// the final states or in the transition table get a node as well. An
    /// empty start state does not.
    pub fn to_graph(&self) -> DfaGraph<'_> {
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();

        let mentioned = self
            .states
            .iter()
            .map(|s| s.as_str())
            .chain((!self.start_state.is_empty()).then_some(self.start_state.as_str()))
            .chain(self.final_states.iter().map(|s| s.as_str()))
            .chain(
                self.sorted_transitions()
                    .into_iter()
                    .flat_map(|(from, _, to)| [from, to]),
            )
            .collect_vec();

        for state in mentioned {
            nodes
                .entry(state)
                .or_insert_with(|| graph.add_node(state));
        }

        for (from, symbol, to) in self.sorted_transitions() {
            graph.add_edge(nodes[from], nodes[to], symbol);
        }

        DfaGraph { graph, nodes }
    }

    /// States reachable from the start state, the start state included. Only
    /// transitions on alphabet symbols are followed.
    pub fn reachable_states(&self) -> HashSet<&str> {
        let view = self.to_graph();
        let mut reachable = HashSet::new();

        let Some(start) = view.node(&self.start_state) else {
            return reachable;
        };

        let usable = EdgeFiltered::from_fn(&view.graph, |edge| self.has_symbol(edge.weight()));
        let mut bfs = Bfs::new(&usable, start);
        while let Some(node) = bfs.next(&usable) {
            reachable.insert(view.graph[node]);
        }

        reachable
    }

    /// Renders the automaton in DOT format. If an input is given, it is run
    /// through the automaton and the transitions it takes are drawn in red.
    pub fn to_graphviz(&self, input: Option<&str>) -> String {
        let view = self.to_graph();

        let taken: HashSet<(String, char)> = input
            .map(|input| {
                let run = self.process_string(input);
                let consumed = run.consumed();
                run.trace
                    .into_iter()
                    .zip(input.chars())
                    .take(consumed)
                    .collect()
            })
            .unwrap_or_default();

        let mut dot = String::new();
        dot.push_str("digraph finite_state_machine {\n");
        dot.push_str("fontname=\"Helvetica,Arial,sans-serif\"\n");
        dot.push_str("node [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        dot.push_str("edge [fontname=\"Helvetica,Arial,sans-serif\"]\n");
        dot.push_str("rankdir=LR;\n");
        dot.push_str("node [shape=point,label=\"\"]START\n");

        let accepting = view
            .graph
            .node_indices()
            .filter(|node| self.is_final(view.graph[*node]))
            .map(|node| format!("{:?}", view.graph[node]))
            .join(" ");

        if !accepting.is_empty() {
            dot.push_str(&format!("node [shape = doublecircle]; {};\n", accepting));
        }
        dot.push_str("node [shape = circle];\n");

        for node in view.graph.node_indices() {
            dot.push_str(&format!("{:?};\n", view.graph[node]));
        }

        if view.node(&self.start_state).is_some() {
            dot.push_str(&format!("START -> {:?};\n", self.start_state));
        }

        for edge in view.graph.edge_references() {
            let from = view.graph[edge.source()];
            let to = view.graph[edge.target()];

            let mut attrs = vec![("label", format!("{:?}", edge.weight()))];
            let symbol = edge.weight().chars().exactly_one().ok();
            if symbol.is_some_and(|symbol| taken.contains(&(from.to_string(), symbol))) {
                attrs.push(("color", "red".to_string()));
            }

            dot.push_str(&format!(
                "{:?} -> {:?} [ {} ];\n",
                from,
                to,
                attrs.iter().map(|(k, v)| format!("{}={}", k, v)).join(" ")
            ));
        }

        dot.push_str("}\n");

        dot
    }
}
