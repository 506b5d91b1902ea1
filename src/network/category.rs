use std::{fmt, str::FromStr};

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Walkability rating of a network segment, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WalkCategory {
    #[serde(rename = "EXCELLENT")]
    Excellent,
    #[serde(rename = "GOOD")]
    Good,
    #[serde(rename = "FAIR")]
    Fair,
    #[serde(rename = "POOR")]
    Poor,
    #[serde(rename = "VERY POOR")]
    VeryPoor,
}

/// Bar palette, cycled by bar position rather than by category.
pub const BAR_PALETTE: [&str; 5] = ["green", "blue", "yellow", "orange", "red"];

impl WalkCategory {
    pub fn label(&self) -> &'static str {
        match self {
            WalkCategory::Excellent => "EXCELLENT",
            WalkCategory::Good => "GOOD",
            WalkCategory::Fair => "FAIR",
            WalkCategory::Poor => "POOR",
            WalkCategory::VeryPoor => "VERY POOR",
        }
    }

    /// Map line color for this category.
    pub fn color(&self) -> &'static str {
        match self {
            WalkCategory::Excellent => "green",
            WalkCategory::Good => "blue",
            WalkCategory::Fair => "yellow",
            WalkCategory::Poor => "orange",
            WalkCategory::VeryPoor => "red",
        }
    }

    pub fn order() -> [WalkCategory; 5] {
        [
            WalkCategory::Excellent,
            WalkCategory::Good,
            WalkCategory::Fair,
            WalkCategory::Poor,
            WalkCategory::VeryPoor,
        ]
    }

    /// Parse a label as it appears in source data: surrounding whitespace and
    /// case are ignored, inner runs of whitespace collapse to one space.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
        Self::order().into_iter().find(|category| category.label() == normalized)
    }
}

impl fmt::Display for WalkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WalkCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match Self::from_label(s) {
            Some(category) => Ok(category),
            None => bail!("unknown walkability category: {s:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_parser() {
        for category in WalkCategory::order() {
            assert_eq!(WalkCategory::from_label(category.label()), Some(category));
        }
    }

    #[test]
    fn parser_tolerates_source_formatting() {
        assert_eq!(WalkCategory::from_label("  poor "), Some(WalkCategory::Poor));
        assert_eq!(WalkCategory::from_label("Very  Poor"), Some(WalkCategory::VeryPoor));
        assert_eq!(WalkCategory::from_label("ALL"), None);
        assert!("mediocre".parse::<WalkCategory>().is_err());
    }

    #[test]
    fn colors_are_fixed() {
        let colors = WalkCategory::order().map(|category| category.color());
        assert_eq!(colors, ["green", "blue", "yellow", "orange", "red"]);
    }

    #[test]
    fn ordering_runs_best_to_worst() {
        assert!(WalkCategory::Excellent < WalkCategory::Good);
        assert!(WalkCategory::Poor < WalkCategory::VeryPoor);
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&WalkCategory::VeryPoor).unwrap();
        assert_eq!(json, r#""VERY POOR""#);
    }
}
