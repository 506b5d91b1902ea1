use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::{Result, bail};
use serde::Serialize;
use tracing::{debug, warn};

use crate::network::{JoinedSegment, SegmentGeometry, SegmentId, SegmentScores, Selection, WalkCategory};

/// Total segment length for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAggregate {
    pub category: WalkCategory,
    pub total_length: f64,
}

/// What the inner join kept and dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JoinReport {
    pub geometry_records: usize,
    pub score_records: usize,
    pub joined: usize,
    /// Geometry ids with no score row.
    pub unmatched_geometry: Vec<SegmentId>,
    /// Score ids with no geometry feature.
    pub unmatched_scores: Vec<SegmentId>,
    /// Ids seen more than once in the geometry source (later copies dropped).
    pub duplicate_geometry: Vec<SegmentId>,
    /// Ids seen more than once in the score table (later copies dropped).
    pub duplicate_scores: Vec<SegmentId>,
    /// Score rows rejected while parsing (bad key or unknown label).
    pub rejected_rows: usize,
    /// Geometry features rejected for lacking an integer id or for unreadable geometry.
    pub rejected_features: usize,
}

impl JoinReport {
    /// True when the join was not one-to-one.
    pub fn has_mismatch(&self) -> bool {
        !self.unmatched_geometry.is_empty()
            || !self.unmatched_scores.is_empty()
            || !self.duplicate_geometry.is_empty()
            || !self.duplicate_scores.is_empty()
    }

    pub(crate) fn log(&self) {
        debug!(
            geometry = self.geometry_records,
            scores = self.score_records,
            joined = self.joined,
            "[network::join] joined segment network"
        );
        if !self.unmatched_geometry.is_empty() {
            warn!(count = self.unmatched_geometry.len(), "[network::join] geometry features without scores dropped");
        }
        if !self.unmatched_scores.is_empty() {
            warn!(count = self.unmatched_scores.len(), "[network::join] score rows without geometry dropped");
        }
        if !self.duplicate_geometry.is_empty() {
            warn!(count = self.duplicate_geometry.len(), "[network::join] duplicate geometry ids, keeping first");
        }
        if !self.duplicate_scores.is_empty() {
            warn!(count = self.duplicate_scores.len(), "[network::join] duplicate score ids, keeping first");
        }
        if self.rejected_rows > 0 {
            warn!(count = self.rejected_rows, "[network::join] unparseable score rows dropped");
        }
    }
}

/// Joined pedestrian network, immutable after load.
#[derive(Debug, Clone, Default)]
pub struct SegmentNetwork {
    segments: Vec<JoinedSegment>,
    aggregates: Vec<CategoryAggregate>,
    report: JoinReport,
}

impl SegmentNetwork {
    /// Inner-join geometries and scores on segment id, in geometry order.
    /// With `strict`, any unmatched or duplicate id is an error instead of a drop.
    pub fn join(geometries: Vec<SegmentGeometry>, scores: Vec<SegmentScores>, strict: bool) -> Result<Self> {
        let mut report = JoinReport {
            geometry_records: geometries.len(),
            score_records: scores.len(),
            ..JoinReport::default()
        };

        // First row wins for duplicated score ids.
        let mut by_id: HashMap<SegmentId, SegmentScores> = HashMap::with_capacity(scores.len());
        let mut unique_scores = Vec::with_capacity(scores.len());
        for row in scores {
            if by_id.contains_key(&row.id) {
                report.duplicate_scores.push(row.id);
            } else {
                unique_scores.push(row.clone());
                by_id.insert(row.id, row);
            }
        }

        let mut seen: HashSet<SegmentId> = HashSet::with_capacity(geometries.len());
        let mut segments = Vec::with_capacity(geometries.len());
        for feature in geometries {
            if !seen.insert(feature.id) {
                report.duplicate_geometry.push(feature.id);
                continue;
            }
            match by_id.get(&feature.id) {
                Some(row) => segments.push(JoinedSegment { geometry: feature.geometry, scores: row.clone() }),
                None => report.unmatched_geometry.push(feature.id),
            }
        }

        report.unmatched_scores = unique_scores.iter()
            .map(|row| row.id)
            .filter(|id| !seen.contains(id))
            .collect();
        report.joined = segments.len();

        if strict && report.has_mismatch() {
            bail!(
                "[network::join] strict join failed: {} unmatched geometry, {} unmatched scores, {} duplicate geometry, {} duplicate score ids",
                report.unmatched_geometry.len(),
                report.unmatched_scores.len(),
                report.duplicate_geometry.len(),
                report.duplicate_scores.len(),
            );
        }

        let aggregates = aggregate_lengths(&unique_scores);

        Ok(Self { segments, aggregates, report })
    }

    pub(crate) fn with_rejected(mut self, rows: usize, features: usize) -> Self {
        self.report.rejected_rows = rows;
        self.report.rejected_features = features;
        self
    }

    pub fn segments(&self) -> &[JoinedSegment] { &self.segments }

    pub fn len(&self) -> usize { self.segments.len() }

    pub fn is_empty(&self) -> bool { self.segments.is_empty() }

    /// Total length per category over the whole score table.
    pub fn aggregates(&self) -> &[CategoryAggregate] { &self.aggregates }

    pub fn report(&self) -> &JoinReport { &self.report }

    /// Segments admitted by `selection`. `Empty` admits everything.
    pub fn filtered<'a>(&'a self, selection: &'a Selection) -> impl Iterator<Item = &'a JoinedSegment> + 'a {
        self.segments.iter().filter(move |segment| selection.admits(segment.category()))
    }

    /// Segments of one category, in load order.
    pub fn in_category(&self, category: WalkCategory) -> impl Iterator<Item = &JoinedSegment> + '_ {
        self.segments.iter().filter(move |segment| segment.category() == category)
    }
}

/// Sum lengths per category, ordered by label (EXCELLENT, FAIR, GOOD, POOR,
/// VERY POOR). Categories without rows are omitted.
fn aggregate_lengths(scores: &[SegmentScores]) -> Vec<CategoryAggregate> {
    let mut totals: BTreeMap<&'static str, (WalkCategory, f64)> = BTreeMap::new();
    for row in scores {
        totals.entry(row.category.label()).or_insert((row.category, 0.0)).1 += row.length;
    }
    totals.into_values()
        .map(|(category, total_length)| CategoryAggregate { category, total_length })
        .collect()
}

#[cfg(test)]
mod tests {
    use geo::{Geometry, Point, line_string};

    use super::*;

    fn feature(id: SegmentId) -> SegmentGeometry {
        SegmentGeometry {
            id,
            geometry: Geometry::LineString(line_string![(x: -61.4, y: 10.6), (x: -61.401, y: 10.601)]),
        }
    }

    fn row(id: SegmentId, category: WalkCategory, length: f64) -> SegmentScores {
        SegmentScores { id, category, length, aesthetics: 0.0, destination: 0.0, conspicuousness: 0.0, safety: 0.0 }
    }

    #[test]
    fn inner_join_keeps_geometry_order() {
        let network = SegmentNetwork::join(
            vec![feature(3), feature(1), feature(2)],
            vec![row(1, WalkCategory::Good, 1.0), row(2, WalkCategory::Poor, 2.0), row(3, WalkCategory::Fair, 3.0)],
            false,
        ).unwrap();

        let ids = network.segments().iter().map(|s| s.id()).collect::<Vec<_>>();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(!network.report().has_mismatch());
        assert_eq!(network.report().joined, 3);
    }

    #[test]
    fn unmatched_ids_are_dropped_and_reported() {
        let network = SegmentNetwork::join(
            vec![feature(1), feature(2), feature(9)],
            vec![row(1, WalkCategory::Good, 1.0), row(2, WalkCategory::Poor, 2.0), row(5, WalkCategory::Poor, 4.0)],
            false,
        ).unwrap();

        assert_eq!(network.len(), 2);
        assert_eq!(network.report().unmatched_geometry, vec![9]);
        assert_eq!(network.report().unmatched_scores, vec![5]);
        assert!(network.report().has_mismatch());
    }

    #[test]
    fn duplicates_keep_first() {
        let network = SegmentNetwork::join(
            vec![feature(1), feature(1)],
            vec![row(1, WalkCategory::Good, 1.0), row(1, WalkCategory::Poor, 9.0)],
            false,
        ).unwrap();

        assert_eq!(network.len(), 1);
        assert_eq!(network.segments()[0].category(), WalkCategory::Good);
        assert_eq!(network.report().duplicate_geometry, vec![1]);
        assert_eq!(network.report().duplicate_scores, vec![1]);
    }

    #[test]
    fn strict_join_rejects_mismatch() {
        let result = SegmentNetwork::join(vec![feature(1), feature(2)], vec![row(1, WalkCategory::Good, 1.0)], true);
        assert!(result.is_err());

        let ok = SegmentNetwork::join(vec![feature(1)], vec![row(1, WalkCategory::Good, 1.0)], true);
        assert!(ok.is_ok());
    }

    #[test]
    fn non_line_geometry_survives_the_join() {
        let point = SegmentGeometry { id: 4, geometry: Geometry::Point(Point::new(-61.4, 10.6)) };
        let network = SegmentNetwork::join(vec![point], vec![row(4, WalkCategory::Fair, 1.0)], false).unwrap();
        assert_eq!(network.len(), 1);
        assert!(network.segments()[0].line().is_none());
    }

    #[test]
    fn aggregates_sum_whole_score_table_in_label_order() {
        let network = SegmentNetwork::join(
            vec![feature(1)],
            vec![
                row(1, WalkCategory::Poor, 10.0),
                row(2, WalkCategory::Excellent, 2.5),
                row(3, WalkCategory::Poor, 5.0),
            ],
            false,
        ).unwrap();

        assert_eq!(network.aggregates(), &[
            CategoryAggregate { category: WalkCategory::Excellent, total_length: 2.5 },
            CategoryAggregate { category: WalkCategory::Poor, total_length: 15.0 },
        ]);
    }

    #[test]
    fn fair_sorts_before_good() {
        let network = SegmentNetwork::join(
            vec![feature(1)],
            vec![
                row(1, WalkCategory::VeryPoor, 1.0),
                row(2, WalkCategory::Good, 2.0),
                row(3, WalkCategory::Poor, 3.0),
                row(4, WalkCategory::Fair, 4.0),
                row(5, WalkCategory::Excellent, 5.0),
            ],
            false,
        ).unwrap();

        let order = network.aggregates().iter().map(|a| a.category).collect::<Vec<_>>();
        assert_eq!(order, vec![
            WalkCategory::Excellent, WalkCategory::Fair, WalkCategory::Good, WalkCategory::Poor, WalkCategory::VeryPoor,
        ]);
    }

    #[test]
    fn filtering_follows_selection() {
        let network = SegmentNetwork::join(
            vec![feature(1), feature(2), feature(3)],
            vec![row(1, WalkCategory::Good, 1.0), row(2, WalkCategory::Poor, 1.0), row(3, WalkCategory::Poor, 1.0)],
            false,
        ).unwrap();

        let poor = Selection::from_labels(&["POOR"]);
        assert_eq!(network.filtered(&poor).map(|s| s.id()).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(network.filtered(&Selection::All).count(), 3);
        assert_eq!(network.in_category(WalkCategory::Good).count(), 1);
    }
}
