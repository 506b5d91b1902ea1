use crate::{
    figure::{Axis, BarTrace, Figure, Font, Layout, Marker, MarkerColor, Title, Trace},
    network::{BAR_PALETTE, CategoryAggregate},
};

const BAR_WIDTH: f64 = 0.95;
const BAR_OPACITY: f64 = 0.5;
const BAR_GAP: f64 = 0.2;

/// Total network length per category.
///
/// Bars follow the order of `aggregates`; colors cycle through [`BAR_PALETTE`]
/// by bar position, so a missing category shifts the colors of the bars after it.
pub fn bar_figure(aggregates: &[CategoryAggregate]) -> Figure {
    let colors = BAR_PALETTE.iter().cycle()
        .take(aggregates.len())
        .map(|color| color.to_string())
        .collect();

    let trace = BarTrace {
        x: aggregates.iter().map(|aggregate| aggregate.category.label().to_string()).collect(),
        y: aggregates.iter().map(|aggregate| aggregate.total_length).collect(),
        width: BAR_WIDTH,
        opacity: BAR_OPACITY,
        marker: Marker { color: MarkerColor::PerPoint(colors) },
    };

    let layout = Layout {
        title: Some(Title { text: "Walkability Score Distribution".into(), font: Some(Font { size: 20 }), x: None }),
        xaxis: Some(Axis { title: Title::plain("Walkability Score") }),
        yaxis: Some(Axis { title: Title::plain("Length(m)") }),
        bargap: Some(BAR_GAP),
        ..Layout::default()
    };

    Figure { data: vec![Trace::Bar(trace)], layout }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::WalkCategory;

    fn aggregate(category: WalkCategory, total_length: f64) -> CategoryAggregate {
        CategoryAggregate { category, total_length }
    }

    #[test]
    fn one_bar_per_category() {
        let figure = bar_figure(&[
            aggregate(WalkCategory::Excellent, 120.0),
            aggregate(WalkCategory::Good, 80.5),
            aggregate(WalkCategory::Poor, 10.0),
        ]);
        let bar = figure.bar().unwrap();

        assert_eq!(bar.x, vec!["EXCELLENT", "GOOD", "POOR"]);
        assert_eq!(bar.y, vec![120.0, 80.5, 10.0]);
        assert_eq!(bar.marker.color, MarkerColor::PerPoint(vec!["green".into(), "blue".into(), "yellow".into()]));
        assert_eq!(bar.width, 0.95);
        assert_eq!(bar.opacity, 0.5);
    }

    #[test]
    fn labels_and_gap() {
        let figure = bar_figure(&[aggregate(WalkCategory::Fair, 1.0)]);
        let layout = &figure.layout;

        assert_eq!(layout.title.as_ref().map(|t| t.text.as_str()), Some("Walkability Score Distribution"));
        assert_eq!(layout.xaxis.as_ref().map(|a| a.title.text.as_str()), Some("Walkability Score"));
        assert_eq!(layout.yaxis.as_ref().map(|a| a.title.text.as_str()), Some("Length(m)"));
        assert_eq!(layout.bargap, Some(0.2));
    }

    #[test]
    fn no_data_gives_empty_bar() {
        let figure = bar_figure(&[]);
        let bar = figure.bar().unwrap();
        assert!(bar.x.is_empty());
        assert!(bar.y.is_empty());
    }
}
