//! Holder of the rendered output of the most recent search.
//!
//! Only the output of the latest search is shown. Starting a search clears
//! the view and hands out a [Generation]; output published with an older
//! generation is discarded.

use crate::pipeline::TreeOutcome;
use crate::render::RenderedTree;
use log::debug;

/// Identifies a search started on a [TreeView].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

/// Whether published output was taken by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Published,
    /// A newer search was started in the meantime
    Stale,
}

/// The trees currently shown, from the last search.
#[derive(Debug, Default)]
pub struct TreeView {
    generation: u64,
    trees: Vec<RenderedTree>,
}

impl TreeView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new search: clears the view and invalidates all earlier
    /// generations.
    pub fn begin_search(&mut self) -> Generation {
        self.generation += 1;
        self.trees.clear();
        Generation(self.generation)
    }

    /// Returns the generation of the latest search.
    pub fn generation(&self) -> Generation {
        Generation(self.generation)
    }

    /// Publishes the outcomes of the search `generation`.
    ///
    /// Successfully processed trees replace the content of the view. Failed
    /// trees are left out.
    pub fn publish(
        &mut self,
        generation: Generation,
        outcomes: Vec<TreeOutcome>,
    ) -> PublishOutcome {
        if generation != self.generation() {
            debug!(
                "Discarding output of search {} (current {})",
                generation.0, self.generation
            );
            return PublishOutcome::Stale;
        }
        self.trees = outcomes
            .into_iter()
            .filter_map(Result::ok)
            .map(|processed| processed.rendered)
            .collect();
        PublishOutcome::Published
    }

    /// Removes all trees from the view.
    pub fn clear(&mut self) {
        self.trees.clear();
    }

    /// Returns the trees currently shown.
    pub fn trees(&self) -> &[RenderedTree] {
        &self.trees
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{process_search, PipelineConfig, SearchResult};

    fn outcomes(newick: &str) -> Vec<TreeOutcome> {
        let json = format!(
            r#"{{"finalResult": [{{"newickTree": "{newick}"}}], "isocodes": [{{"isocode": "A", "result": 1}}], "codeCount": 1}}"#
        );
        let result = SearchResult::from_json(&json).unwrap();
        process_search(&result, &PipelineConfig::default())
    }

    #[test]
    fn test_last_result_wins() {
        let mut view = TreeView::new();
        let first = view.begin_search();
        let second = view.begin_search();

        assert_eq!(view.publish(second, outcomes("(A,B);")), PublishOutcome::Published);
        assert_eq!(view.publish(first, outcomes("(A,C,D);")), PublishOutcome::Stale);
        assert_eq!(view.trees().len(), 1);
        assert_eq!(view.trees()[0].markers[0].label, "A");
    }

    #[test]
    fn test_begin_search_clears() {
        let mut view = TreeView::new();
        let generation = view.begin_search();
        view.publish(generation, outcomes("(A,B);"));
        assert!(!view.is_empty());

        view.begin_search();
        assert!(view.is_empty());
    }

    #[test]
    fn test_failed_trees_are_left_out() {
        let mut view = TreeView::new();
        let generation = view.begin_search();
        view.publish(generation, outcomes("(A,B"));
        assert!(view.is_empty());
    }
}
