use crate::{
    figure::{Axis, Figure, Font, Layout, Margin, Marker, MarkerColor, ScatterTrace, Title, Trace},
    network::{ScoreDimension, SegmentNetwork, Selection},
};

const MARKER_COLOR: &str = "#636efa";

/// One auxiliary score against segment length.
///
/// `Empty` and `All` both plot every joined segment; a category set plots
/// only its members.
pub fn scatter_figure(network: &SegmentNetwork, dimension: ScoreDimension, selection: &Selection) -> Figure {
    let (mut x, mut y, mut ids) = (Vec::new(), Vec::new(), Vec::new());
    for segment in network.filtered(selection) {
        x.push(dimension.value(&segment.scores));
        y.push(segment.length());
        ids.push(segment.id());
    }

    let trace = ScatterTrace {
        x,
        y,
        mode: "markers".into(),
        customdata: ids,
        hovertemplate: format!("{}=%{{x}}<br>Length(m)=%{{y}}<extra></extra>", dimension.label()),
        marker: Marker { color: MarkerColor::Single(MARKER_COLOR.into()) },
        showlegend: false,
    };

    let layout = Layout {
        title: Some(Title { text: dimension.title(), font: Some(Font { size: 14 }), x: Some(0.5) }),
        xaxis: Some(Axis { title: Title::plain(dimension.label()) }),
        yaxis: Some(Axis { title: Title::plain("Length(m)") }),
        margin: Some(Margin { l: 40, r: 40, t: 60, b: 60 }),
        ..Layout::default()
    };

    Figure { data: vec![Trace::Scatter(trace)], layout }
}

/// The four scatter charts in display order.
pub fn scatter_figures(network: &SegmentNetwork, selection: &Selection) -> Vec<(ScoreDimension, Figure)> {
    ScoreDimension::all().into_iter()
        .map(|dimension| (dimension, scatter_figure(network, dimension, selection)))
        .collect()
}

#[cfg(test)]
mod tests {
    use geo::{Geometry, line_string};

    use super::*;
    use crate::network::{SegmentGeometry, SegmentScores, WalkCategory};

    fn network() -> SegmentNetwork {
        let rows = [
            (1, WalkCategory::Good, 12.0, 0.5),
            (2, WalkCategory::Poor, 30.0, 0.1),
            (3, WalkCategory::Poor, 7.5, 0.9),
        ];
        let geometries = rows.iter()
            .map(|&(id, ..)| SegmentGeometry { id, geometry: Geometry::LineString(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]) })
            .collect();
        let scores = rows.iter()
            .map(|&(id, category, length, score)| SegmentScores {
                id, category, length, aesthetics: score, destination: score * 2.0, conspicuousness: 0.0, safety: 1.0,
            })
            .collect();
        SegmentNetwork::join(geometries, scores, false).unwrap()
    }

    #[test]
    fn empty_and_all_plot_everything() {
        let network = network();
        for selection in [Selection::Empty, Selection::All] {
            let figure = scatter_figure(&network, ScoreDimension::Aesthetics, &selection);
            let scatter = figure.scatter().unwrap();
            assert_eq!(scatter.customdata, vec![1, 2, 3]);
            assert_eq!(scatter.x, vec![0.5, 0.1, 0.9]);
            assert_eq!(scatter.y, vec![12.0, 30.0, 7.5]);
        }
    }

    #[test]
    fn categories_filter_points() {
        let network = network();
        let figure = scatter_figure(&network, ScoreDimension::Destination, &Selection::from_labels(&["POOR"]));
        let scatter = figure.scatter().unwrap();

        assert_eq!(scatter.customdata, vec![2, 3]);
        assert_eq!(scatter.x, vec![0.2, 1.8]);
    }

    #[test]
    fn unknown_labels_plot_nothing() {
        let figure = scatter_figure(&network(), ScoreDimension::Safety, &Selection::from_labels(&["MEDIOCRE"]));
        assert!(figure.scatter().unwrap().x.is_empty());
    }

    #[test]
    fn titles_and_axes() {
        let figure = scatter_figure(&network(), ScoreDimension::Conspicuousness, &Selection::All);
        let layout = &figure.layout;

        assert_eq!(layout.title.as_ref().map(|t| t.text.as_str()), Some("Conspicuous Score vs Network Length"));
        assert_eq!(layout.title.as_ref().and_then(|t| t.x), Some(0.5));
        assert_eq!(layout.xaxis.as_ref().map(|a| a.title.text.as_str()), Some("Conspicuous Score"));
        assert_eq!(layout.yaxis.as_ref().map(|a| a.title.text.as_str()), Some("Length(m)"));
        assert_eq!(figure.scatter().unwrap().hovertemplate, "Conspicuous Score=%{x}<br>Length(m)=%{y}<extra></extra>");
    }

    #[test]
    fn four_charts_in_order() {
        let keys = scatter_figures(&network(), &Selection::Empty).iter()
            .map(|(dimension, _)| dimension.key())
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["aesthetics", "destination", "conspicuousness", "safety"]);
    }
}
