use cgdl_core::{CgGraph, Diagnostics, ReaderOptions};

use crate::{LineOutcome, ReadResult, ReaderState, read_line};

/// Owns one reading session: graph, cursor, diagnostics and options.
///
/// Independent sessions never share state; run one `Reader` per source.
#[derive(Debug, Clone)]
pub struct Reader {
    graph: CgGraph,
    state: ReaderState,
    diagnostics: Diagnostics,
    options: ReaderOptions,
    outcomes: Vec<LineOutcome>,
    last_line_number: usize,
}

impl Reader {
    #[must_use]
    pub fn new(options: ReaderOptions) -> Self {
        Self {
            graph: CgGraph::new(),
            state: ReaderState::new(options.default_class.clone()),
            diagnostics: Diagnostics::new(),
            options,
            outcomes: Vec::new(),
            last_line_number: 0,
        }
    }

    /// Reads the next line, numbering it one past the previous line.
    pub fn feed(&mut self, raw_line: &str) -> LineOutcome {
        self.feed_numbered(raw_line, self.last_line_number.saturating_add(1))
    }

    /// Reads a line under a caller-supplied line number.
    pub fn feed_numbered(&mut self, raw_line: &str, line_number: usize) -> LineOutcome {
        let outcome = read_line(
            &mut self.graph,
            &mut self.state,
            &mut self.diagnostics,
            raw_line,
            line_number,
            &self.options,
        );
        self.last_line_number = line_number;
        self.outcomes.push(outcome);
        outcome
    }

    #[must_use]
    pub fn graph(&self) -> &CgGraph {
        &self.graph
    }

    #[must_use]
    pub fn state(&self) -> &ReaderState {
        &self.state
    }

    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    #[must_use]
    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    #[must_use]
    pub fn finish(self) -> ReadResult {
        ReadResult {
            graph: self.graph,
            state: self.state,
            diagnostics: self.diagnostics,
            outcomes: self.outcomes,
        }
    }
}

impl Default for Reader {
    fn default() -> Self {
        Self::new(ReaderOptions::default())
    }
}
