#![no_main]

use cgdl_core::{CgGraph, Diagnostics, ReaderOptions};
use cgdl_reader::{ReaderState, read_line, split_lines};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // First byte picks the option set so both modes get coverage.
    let flags = data.first().copied().unwrap_or(0);
    let options = ReaderOptions {
        strict: flags & 1 == 0,
        create_stub_nodes_for_edges: flags & 2 == 0,
        allow_same_class_edge_shorthand: flags & 4 != 0,
        ..ReaderOptions::default()
    };

    let mut graph = CgGraph::new();
    let mut state = ReaderState::new(options.default_class.clone());
    let mut diagnostics = Diagnostics::new();
    let lines = split_lines(text);

    for (index, line) in lines.iter().enumerate() {
        let before = graph.len();
        read_line(&mut graph, &mut state, &mut diagnostics, line, index + 1, &options);
        assert!(graph.len() >= before, "nodes are never removed");
        if let Some(key) = state.current_node_key() {
            assert!(graph.contains(key.as_str()), "cursor points at a missing node");
        }
    }

    for node in graph.nodes() {
        assert!(node.outgoing().len() <= lines.len());
        if options.create_stub_nodes_for_edges {
            for edge in node.outgoing() {
                assert!(graph.contains(edge.target_key().as_str()), "edge target missing");
            }
        }
    }
    let _ = serde_json::to_string(&graph);
});
