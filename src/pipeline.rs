//! Processing of all trees of a search result.
//!
//! Every tree goes through parse, prune, (optionally) collapse, layout and
//! render independently. The keep-set and the scores are built once per
//! search and shared by all trees. A tree that fails is logged and reported
//! in its own slot of the output; the remaining trees are still processed.

use crate::color::{LeafResult, Scores};
use crate::error::TreeError;
use crate::layout::{layout, LayoutConfig, TreeLayout};
use crate::model::Tree;
use crate::newick::parse_str;
use crate::prune::{collapse_unary, prune};
use crate::render::{render, RenderConfig, RenderedTree};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;

// =#========================================================================#=
// SEARCH RESULT
// =#========================================================================#=
/// A tree of a search result, as Newick string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultTree {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub newick_tree: String,
}

/// Result of a search: the trees containing matching languages, the score
/// of every matching language, and the number of codes of the searched
/// variable (the maximum score).
///
/// # Example
/// ```
/// use langtree::pipeline::SearchResult;
///
/// let json = r#"{
///     "finalResult": [{"newickTree": "(deu:1,nld:1,eng:2);"}],
///     "isocodes": [{"isocode": "deu", "result": 1}],
///     "codeCount": 2
/// }"#;
/// let result = SearchResult::from_json(json)?;
/// assert_eq!(result.final_result.len(), 1);
/// assert_eq!(result.code_count, 2.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub final_result: Vec<ResultTree>,
    #[serde(default)]
    pub isocodes: Vec<LeafResult>,
    #[serde(default)]
    pub code_count: f64,
}

impl SearchResult {
    /// Parses a search result from JSON.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a search result as JSON from `reader`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TreeError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Returns the scores of this search, with `code_count` as maximum.
    pub fn scores(&self) -> Scores {
        Scores::from_results(&self.isocodes, self.code_count)
    }
}

// =#========================================================================#=
// PIPELINE CONFIG
// =#========================================================================#=
/// Configuration of [process_search].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    /// Whether to remove unary nodes after pruning
    pub collapse_unary: bool,
}

impl PipelineConfig {
    /// Sets the layout configuration.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the render configuration.
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    /// Sets whether unary nodes are removed after pruning.
    pub fn with_collapse_unary(mut self, collapse_unary: bool) -> Self {
        self.collapse_unary = collapse_unary;
        self
    }
}

// =#========================================================================#=
// PROCESSING
// =#========================================================================#=
/// A successfully processed tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedTree {
    /// Position of the tree in the search result
    pub index: usize,
    /// The pruned tree
    pub tree: Tree,
    pub layout: TreeLayout,
    pub rendered: RenderedTree,
}

/// Outcome of processing a single tree.
pub type TreeOutcome = Result<ProcessedTree, TreeError>;

/// Processes every tree of `result`, in order.
///
/// Returns one outcome per tree of the search result. Failures are logged
/// and do not affect the other trees.
pub fn process_search(result: &SearchResult, config: &PipelineConfig) -> Vec<TreeOutcome> {
    let scores = result.scores();
    let keep = scores.keep_set();
    info!(
        "Processing {} trees for {} languages",
        result.final_result.len(),
        keep.len()
    );

    result
        .final_result
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let outcome = process_tree(index, entry, &keep, &scores, config);
            if let Err(e) = &outcome {
                warn!("Skipping tree {index}: {e}");
            }
            outcome
        })
        .collect()
}

/// Processes a single tree of a search result.
pub fn process_tree(
    index: usize,
    entry: &ResultTree,
    keep: &HashSet<String>,
    scores: &Scores,
    config: &PipelineConfig,
) -> TreeOutcome {
    let mut tree = parse_str(&entry.newick_tree)
        .map_err(|source| TreeError::Parse { tree: index, source })?;
    if let Some(name) = &entry.name {
        tree.set_name(name.clone());
    }
    debug!("Tree {index}: parsed {} leaves", tree.num_leaves());

    let mut tree = prune(&tree, keep)?;
    if config.collapse_unary {
        tree = collapse_unary(&tree);
    }
    if tree.is_empty() {
        debug!("Tree {index}: no leaf with a result");
    }

    let layout = layout(&tree, &config.layout);
    let rendered = render(&tree, &layout, scores, &config.render);
    Ok(ProcessedTree {
        index,
        tree,
        layout,
        rendered,
    })
}
