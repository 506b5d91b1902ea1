use geo::{Geometry, LineString};
use serde::Serialize;

use crate::network::WalkCategory;

/// Integer identifier shared by the geometry and score sources.
pub type SegmentId = i64;

/// One feature of the geometry source, already in WGS84 lon/lat.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentGeometry {
    pub id: SegmentId,
    pub geometry: Geometry<f64>,
}

/// One row of the score table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentScores {
    pub id: SegmentId,
    pub category: WalkCategory,
    /// Segment length in meters.
    pub length: f64,
    pub aesthetics: f64,
    pub destination: f64,
    pub conspicuousness: f64,
    pub safety: f64,
}

/// Geometry and scores for the same segment id.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedSegment {
    pub geometry: Geometry<f64>,
    pub scores: SegmentScores,
}

impl JoinedSegment {
    pub fn id(&self) -> SegmentId { self.scores.id }

    pub fn category(&self) -> WalkCategory { self.scores.category }

    pub fn length(&self) -> f64 { self.scores.length }

    pub fn line(&self) -> Option<&LineString<f64>> {
        match &self.geometry {
            Geometry::LineString(line) => Some(line),
            _ => None,
        }
    }
}

/// Auxiliary score plotted against segment length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreDimension {
    Aesthetics,
    Destination,
    Conspicuousness,
    Safety,
}

impl ScoreDimension {
    pub fn all() -> [ScoreDimension; 4] {
        [
            ScoreDimension::Aesthetics,
            ScoreDimension::Destination,
            ScoreDimension::Conspicuousness,
            ScoreDimension::Safety,
        ]
    }

    pub fn value(&self, scores: &SegmentScores) -> f64 {
        match self {
            ScoreDimension::Aesthetics => scores.aesthetics,
            ScoreDimension::Destination => scores.destination,
            ScoreDimension::Conspicuousness => scores.conspicuousness,
            ScoreDimension::Safety => scores.safety,
        }
    }

    /// Axis label.
    pub fn label(&self) -> &'static str {
        match self {
            ScoreDimension::Aesthetics => "Aesthetics Score",
            ScoreDimension::Destination => "Destination Score",
            ScoreDimension::Conspicuousness => "Conspicuous Score",
            ScoreDimension::Safety => "Safety Score",
        }
    }

    pub fn title(&self) -> String {
        format!("{} vs Network Length", self.label())
    }

    /// Stable key used for DOM ids and JSON output.
    pub fn key(&self) -> &'static str {
        match self {
            ScoreDimension::Aesthetics => "aesthetics",
            ScoreDimension::Destination => "destination",
            ScoreDimension::Conspicuousness => "conspicuousness",
            ScoreDimension::Safety => "safety",
        }
    }
}

#[cfg(test)]
mod tests {
    use geo::{MultiLineString, line_string};

    use super::*;

    fn scores() -> SegmentScores {
        SegmentScores {
            id: 7,
            category: WalkCategory::Fair,
            length: 120.5,
            aesthetics: 1.0,
            destination: 2.0,
            conspicuousness: 3.0,
            safety: 4.0,
        }
    }

    #[test]
    fn only_linestrings_are_lines() {
        let line = line_string![(x: -61.40, y: 10.63), (x: -61.41, y: 10.64)];
        let segment = JoinedSegment { geometry: Geometry::LineString(line.clone()), scores: scores() };
        assert_eq!(segment.line(), Some(&line));

        let multi = JoinedSegment {
            geometry: Geometry::MultiLineString(MultiLineString(vec![line.clone(), line])),
            scores: scores(),
        };
        assert!(multi.line().is_none());
    }

    #[test]
    fn dimensions_pick_their_score() {
        let scores = scores();
        let values = ScoreDimension::all().map(|dimension| dimension.value(&scores));
        assert_eq!(values, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn titles_name_the_dimension() {
        assert_eq!(ScoreDimension::Conspicuousness.title(), "Conspicuous Score vs Network Length");
        assert_eq!(ScoreDimension::Safety.label(), "Safety Score");
    }
}
