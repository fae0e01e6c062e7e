//! SVG backend for [RenderedTree]s.

use super::{RenderConfig, RenderedTree};
use std::io::{self, Write};
use std::path::Path;
use svg::node::element::{Circle, Group, Path as SvgPath, Text};
use svg::Document;

/// Builds an SVG document of `rendered`.
///
/// The tree is drawn into a group shifted right by the left margin; edges
/// first, so that markers and labels are drawn on top.
pub fn to_document(rendered: &RenderedTree, config: &RenderConfig) -> Document {
    let mut tree_group =
        Group::new().set("transform", format!("translate({},0)", config.margin_left));

    for edge in &rendered.edges {
        let path = SvgPath::new()
            .set("class", "link")
            .set("d", edge.path_data())
            .set("fill", "none")
            .set("stroke", config.edge_stroke.as_str())
            .set("stroke-width", config.edge_stroke_width);
        tree_group = tree_group.add(path);
    }

    for marker in &rendered.markers {
        let circle = Circle::new()
            .set("cx", marker.position.x)
            .set("cy", marker.position.y)
            .set("r", config.marker_radius)
            .set("fill", marker.fill.to_string())
            .set("stroke", config.marker_stroke.as_str())
            .set("stroke-width", config.marker_stroke_width);
        tree_group = tree_group.add(circle);
        tree_group = tree_group.add(label(
            &marker.label,
            marker.position.x,
            marker.position.y,
            config,
        ));
    }

    for node_label in &rendered.labels {
        tree_group = tree_group.add(label(
            &node_label.text,
            node_label.position.x,
            node_label.position.y,
            config,
        ));
    }

    Document::new()
        .set("width", rendered.canvas_width)
        .set("height", rendered.canvas_height)
        .set(
            "viewBox",
            (0, 0, rendered.canvas_width as i32, rendered.canvas_height as i32),
        )
        .add(tree_group)
}

/// Writes `rendered` as SVG to `target`.
pub fn write_svg<W: Write>(
    target: W,
    rendered: &RenderedTree,
    config: &RenderConfig,
) -> io::Result<()> {
    svg::write(target, &to_document(rendered, config))
}

/// Writes `rendered` as SVG into the file at `path`.
pub fn save_svg<P: AsRef<Path>>(
    path: P,
    rendered: &RenderedTree,
    config: &RenderConfig,
) -> io::Result<()> {
    svg::save(path, &to_document(rendered, config))
}

fn label(text: &str, x: f64, y: f64, config: &RenderConfig) -> Text {
    let text_content = svg::node::Text::new(text);
    Text::new("")
        .set("x", x)
        .set("y", y)
        .set("dx", config.label_dx)
        .set("dy", config.label_dy)
        .set("font-size", config.font_size)
        .set("text-anchor", "start")
        .add(text_content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{LeafResult, Scores};
    use crate::layout::{layout, LayoutConfig};
    use crate::newick::parse_str;
    use crate::render::render;

    fn svg_of(newick: &str, results: &[LeafResult]) -> String {
        let tree = parse_str(newick).unwrap();
        let layout = layout(&tree, &LayoutConfig::default());
        let scores = Scores::from_results(results, 4.0);
        let config = RenderConfig::default();
        let rendered = render(&tree, &layout, &scores, &config);
        let mut out = Vec::new();
        write_svg(&mut out, &rendered, &config).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_document_contains_primitives() {
        let svg = svg_of("(A:1,B:1);", &[LeafResult::new("A", 4.0)]);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("translate(40,0)"));
        assert_eq!(svg.matches("<path").count(), 2);
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("hsl(240,100%,50%)"));
        assert!(svg.contains("stroke=\"#ccc\""));
    }

    #[test]
    fn test_empty_tree_document() {
        let config = RenderConfig::default();
        let rendered = RenderedTree::default();
        let document = to_document(&rendered, &config).to_string();
        assert!(document.contains("<svg"));
        assert!(!document.contains("<path"));
        assert!(!document.contains("<circle"));
    }
}
