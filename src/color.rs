//! Leaf colours derived from search results.
//!
//! A leaf's score is mapped linearly onto the hue range `[0, 240]`
//! (red through green to blue) at full saturation and half lightness.
//! The maximum score is the number of codes of the searched variable, not
//! the largest score present, so colours match the legend of the search.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Hue of the maximum score.
pub const MAX_HUE: f64 = 240.0;

// =#========================================================================#=
// COLOR
// =#========================================================================#=
/// A colour in HSL space; saturation and lightness in percent.
///
/// Displays as CSS colour, e.g. `hsl(240,100%,50%)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    hue: f64,
    saturation: f64,
    lightness: f64,
}

impl Color {
    /// Colour of leaves without a score (hue 0).
    pub const NEUTRAL: Color = Color::hsl(0.0, 100.0, 50.0);

    /// Creates a colour from hue (degrees), saturation and lightness (percent).
    pub const fn hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        Color {
            hue,
            saturation,
            lightness,
        }
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn lightness(&self) -> f64 {
        self.lightness
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "hsl({},{}%,{}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Maps `score` onto a hue: `hue = score * 240 / max_score`.
///
/// Scores are not clamped, so the colour of a score outside
/// `[0, max_score]` is exactly what the formula gives. A non-positive
/// `max_score` yields hue 0.
///
/// # Example
/// ```
/// use langtree::color::color_for;
///
/// assert_eq!(color_for(0.0, 4.0).to_string(), "hsl(0,100%,50%)");
/// assert_eq!(color_for(2.0, 4.0).to_string(), "hsl(120,100%,50%)");
/// assert_eq!(color_for(4.0, 4.0).to_string(), "hsl(240,100%,50%)");
/// ```
pub fn color_for(score: f64, max_score: f64) -> Color {
    let hue = if max_score > 0.0 {
        score * MAX_HUE / max_score
    } else {
        0.0
    };
    Color::hsl(hue, 100.0, 50.0)
}

// =#========================================================================#=
// SCORES
// =#========================================================================#=
/// Result of the search for one leaf (language), keyed by ISO code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafResult {
    pub isocode: String,
    #[serde(alias = "result")]
    pub score: f64,
}

impl LeafResult {
    pub fn new(isocode: impl Into<String>, score: f64) -> Self {
        LeafResult {
            isocode: isocode.into(),
            score,
        }
    }
}

/// Scores of a search by leaf name, shared read-only by all trees of the search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scores {
    scores: HashMap<String, f64>,
    max_score: f64,
}

impl Scores {
    /// Collects the scores of the given results. If a code occurs more than
    /// once, the later result wins (it was drawn last in the original view).
    pub fn from_results<'a, I>(results: I, max_score: f64) -> Self
    where
        I: IntoIterator<Item = &'a LeafResult>,
    {
        let scores = results
            .into_iter()
            .map(|result| (result.isocode.clone(), result.score))
            .collect();
        Scores { scores, max_score }
    }

    /// Returns the score mapped to the last hue.
    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    /// Returns the score of the leaf `name`, if it has one.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.scores.get(name).copied()
    }

    /// Returns the colour of the leaf `name`, [Color::NEUTRAL] if it has no score.
    pub fn color_of(&self, name: &str) -> Color {
        self.get(name)
            .map_or(Color::NEUTRAL, |score| color_for(score, self.max_score))
    }

    /// Returns the names of all scored leaves, the keep-set for pruning.
    pub fn keep_set(&self) -> HashSet<String> {
        self.scores.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_max_score() {
        assert_eq!(color_for(3.0, 0.0), Color::NEUTRAL);
    }

    #[test]
    fn test_fractional_hue() {
        assert_eq!(color_for(1.0, 3.0).hue(), 80.0);
        assert_eq!(color_for(1.0, 16.0).to_string(), "hsl(15,100%,50%)");
    }

    #[test]
    fn test_later_result_wins() {
        let results = vec![LeafResult::new("deu", 1.0), LeafResult::new("deu", 3.0)];
        let scores = Scores::from_results(&results, 4.0);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores.get("deu"), Some(3.0));
    }

    #[test]
    fn test_missing_score_is_neutral() {
        let scores = Scores::from_results(&[LeafResult::new("deu", 2.0)], 4.0);
        assert_eq!(scores.color_of("fra"), Color::NEUTRAL);
        assert_eq!(scores.color_of("deu").hue(), 120.0);
    }

    #[test]
    fn test_keep_set() {
        let scores = Scores::from_results(
            &[LeafResult::new("deu", 0.0), LeafResult::new("nld", 1.0)],
            2.0,
        );
        let keep = scores.keep_set();
        assert!(keep.contains("deu") && keep.contains("nld"));
        assert_eq!(keep.len(), 2);
    }

    #[test]
    fn test_result_field_alias() {
        let result: LeafResult = serde_json::from_str(r#"{"isocode":"deu","result":2}"#).unwrap();
        assert_eq!(result, LeafResult::new("deu", 2.0));
    }
}
