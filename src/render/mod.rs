//! Backend-agnostic drawing primitives of a laid-out tree.
//!
//! [render] turns a [TreeLayout] into a [RenderedTree]: one right-angled
//! [RenderEdge] per parent-child link, one [LeafMarker] per leaf (coloured by
//! its score), and one [NodeLabel] per named internal node. Coordinates are
//! those of the layout; the margin of [RenderConfig] is applied by the
//! backend. See [svg] for an SVG backend.

pub mod svg;

use crate::color::{Color, Scores};
use crate::layout::{NodePosition, TreeLayout};
use crate::model::{NodeIndex, Tree};
use log::debug;
use serde::{Deserialize, Serialize};

// =#========================================================================#=
// RENDER CONFIG
// =#========================================================================#=
/// Visual constants of the drawing.
///
/// Defaults reproduce the original tree viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Horizontal offset of the whole tree
    pub margin_left: f64,
    /// Extra canvas width right of the tree, room for the labels
    pub extra_width: f64,
    /// Extra canvas height below the tree
    pub extra_height: f64,
    pub label_dx: f64,
    pub label_dy: f64,
    pub font_size: f64,
    pub marker_radius: f64,
    pub edge_stroke: String,
    pub edge_stroke_width: f64,
    pub marker_stroke: String,
    pub marker_stroke_width: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            margin_left: 40.0,
            extra_width: 300.0,
            extra_height: 30.0,
            label_dx: 10.0,
            label_dy: 3.0,
            font_size: 14.0,
            marker_radius: 4.5,
            edge_stroke: "#ccc".to_string(),
            edge_stroke_width: 4.0,
            marker_stroke: "#000".to_string(),
            marker_stroke_width: 0.5,
        }
    }
}

impl RenderConfig {
    /// Sets the horizontal offset of the tree.
    pub fn with_margin_left(mut self, margin_left: f64) -> Self {
        self.margin_left = margin_left;
        self
    }

    /// Sets the extra canvas size around the tree.
    pub fn with_extra_size(mut self, extra_width: f64, extra_height: f64) -> Self {
        self.extra_width = extra_width;
        self.extra_height = extra_height;
        self
    }

    /// Sets the font size of labels.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the radius of leaf markers.
    pub fn with_marker_radius(mut self, marker_radius: f64) -> Self {
        self.marker_radius = marker_radius;
        self
    }

    /// Sets colour and width of edges.
    pub fn with_edge_stroke(mut self, stroke: impl Into<String>, width: f64) -> Self {
        self.edge_stroke = stroke.into();
        self.edge_stroke_width = width;
        self
    }
}

// =#========================================================================#=
// PRIMITIVES
// =#========================================================================#=
/// A point in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<NodePosition> for Point {
    fn from(position: NodePosition) -> Self {
        Point::new(position.x, position.y)
    }
}

/// Right-angled connection from a parent to one of its children.
///
/// The path runs vertically from the parent to the height of the child
/// (the elbow), then horizontally to the child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderEdge {
    pub parent: NodeIndex,
    pub child: NodeIndex,
    pub source: Point,
    pub elbow: Point,
    pub target: Point,
}

impl RenderEdge {
    fn new(parent: NodeIndex, child: NodeIndex, source: Point, target: Point) -> Self {
        RenderEdge {
            parent,
            child,
            source,
            elbow: Point::new(source.x, target.y),
            target,
        }
    }

    /// Returns the SVG path data of this edge, e.g. `M0,14 0,5 100,5`.
    pub fn path_data(&self) -> String {
        format!(
            "M{},{} {},{} {},{}",
            self.source.x, self.source.y, self.elbow.x, self.elbow.y, self.target.x, self.target.y
        )
    }
}

/// Coloured circle with label at a leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafMarker {
    pub node: NodeIndex,
    pub position: Point,
    pub label: String,
    pub fill: Color,
    /// `None` if the leaf has no search result
    pub score: Option<f64>,
}

/// Label of a named internal node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeLabel {
    pub node: NodeIndex,
    pub position: Point,
    pub text: String,
}

/// Drawing primitives of a single tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedTree {
    pub name: Option<String>,
    pub edges: Vec<RenderEdge>,
    pub markers: Vec<LeafMarker>,
    pub labels: Vec<NodeLabel>,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl RenderedTree {
    /// Returns `true` if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.markers.is_empty()
    }
}

// ============================================================================
// Render
// ============================================================================
/// Projects the laid-out `tree` into drawing primitives.
///
/// Edges are emitted in pre-order, markers in the vertical order of the
/// leaves. The empty tree renders to nothing.
///
/// # Example
/// ```
/// use langtree::color::{LeafResult, Scores};
/// use langtree::layout::{layout, LayoutConfig};
/// use langtree::newick::parse_str;
/// use langtree::render::{render, RenderConfig};
///
/// let tree = parse_str("(A:1,B:1);")?;
/// let layout = layout(&tree, &LayoutConfig::default());
/// let scores = Scores::from_results(&[LeafResult::new("A", 2.0)], 2.0);
/// let rendered = render(&tree, &layout, &scores, &RenderConfig::default());
///
/// assert_eq!(rendered.edges.len(), 2);
/// assert_eq!(rendered.markers[0].fill.to_string(), "hsl(240,100%,50%)");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render(
    tree: &Tree,
    layout: &TreeLayout,
    scores: &Scores,
    config: &RenderConfig,
) -> RenderedTree {
    let mut rendered = RenderedTree {
        name: tree.name().map(str::to_string),
        canvas_width: layout.width() + config.extra_width,
        canvas_height: layout.height() + config.extra_height,
        ..Default::default()
    };
    if tree.is_empty() {
        return rendered;
    }

    let point = |index: NodeIndex| Point::from(layout.position(index));

    // Pre-order along the layout's sibling order
    let mut stack = vec![tree.root_index()];
    while let Some(index) = stack.pop() {
        let node = &tree[index];
        if let Some(parent) = node.parent() {
            rendered
                .edges
                .push(RenderEdge::new(parent, index, point(parent), point(index)));
        }

        if node.is_leaf() {
            rendered.markers.push(LeafMarker {
                node: index,
                position: point(index),
                label: node.name().to_string(),
                fill: scores.color_of(node.name()),
                score: scores.get(node.name()),
            });
        } else if !node.name().is_empty() {
            rendered.labels.push(NodeLabel {
                node: index,
                position: point(index),
                text: node.name().to_string(),
            });
        }

        stack.extend(layout.ordered_children(index).iter().rev());
    }

    debug!(
        "Rendered {} edges and {} markers",
        rendered.edges.len(),
        rendered.markers.len()
    );
    rendered
}
