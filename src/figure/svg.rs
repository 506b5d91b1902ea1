use std::io::Write;

use anyhow::{Result, ensure};
use geo::{BoundingRect, Coord, LineString, Rect, coord};

use crate::{
    io::svg::{SvgStringWriter, category_class, write_svg_footer, write_svg_header, write_svg_styles},
    network::{SegmentNetwork, Selection, WalkCategory},
    viewport::Viewport,
};

/// Projection function: lon/lat -> SVG coords (x,y)
type Projection = dyn Fn(&Coord<f64>) -> (f64, f64);

/// Half-extent, in degrees, of the frame drawn when nothing is selected.
const EMPTY_FRAME: f64 = 0.005;
const MIN_SPAN: f64 = 1e-9;

/// Static map export options.
#[derive(Debug, Clone, Copy)]
pub struct SvgOptions {
    pub width: f64,
    pub margin: f64,
    pub legend: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self { width: 1200.0, margin: 10.0, legend: true }
    }
}

/// Render the selected segments as SVG polylines colored by category.
///
/// Follows the same selection policy as the interactive map: an empty
/// selection draws no segments. The frame then falls back to a small box
/// around the viewport center.
pub fn write_map_svg<W: Write>(
    writer: &mut W,
    network: &SegmentNetwork,
    selection: &Selection,
    viewport: &Viewport,
    options: &SvgOptions,
) -> Result<()> {
    ensure!(options.width > 2.0 * options.margin, "[figure::svg] width {} leaves no room inside margin {}", options.width, options.margin);

    let lines = selected_lines(network, selection);
    let bounds = frame(&lines, viewport);

    let margin = options.margin;
    let width = options.width;
    // A north-south street has zero width; fit the longer side instead.
    let scale = (width - 2.0 * margin) / bounds.width().max(bounds.height()).max(MIN_SPAN);
    let height = bounds.height() * scale + 2.0 * margin;

    let project = move |coord: &Coord<f64>| -> (f64, f64) {
        let x = margin + (coord.x - bounds.min().x) * scale;
        let y = margin + (bounds.max().y - coord.y) * scale; // invert vertically
        (x, y)
    };

    write_svg_header(writer, width, height, margin, scale, &bounds)?;
    write_svg_styles(writer)?;

    for (category, line) in &lines {
        writeln!(writer, r#"<polyline class="seg {}" points="{}"/>"#, category_class(*category), line_to_points(line, &project))?;
    }

    if options.legend {
        let present = WalkCategory::order().into_iter()
            .filter(|category| lines.iter().any(|(c, _)| c == category))
            .collect::<Vec<_>>();
        draw_legend(writer, &present, margin)?;
    }

    write_svg_footer(writer)
}

/// [`write_map_svg`] into a string.
pub fn map_svg(network: &SegmentNetwork, selection: &Selection, viewport: &Viewport, options: &SvgOptions) -> Result<String> {
    let mut writer = SvgStringWriter::new();
    write_map_svg(&mut writer, network, selection, viewport, options)?;
    writer.into_string()
}

/// Drawable lines in map order: category best to worst, then load order.
fn selected_lines<'a>(network: &'a SegmentNetwork, selection: &Selection) -> Vec<(WalkCategory, &'a LineString<f64>)> {
    if selection.is_empty() { return Vec::new() }

    WalkCategory::order().into_iter()
        .filter(|&category| selection.admits(category))
        .flat_map(|category| {
            network.in_category(category)
                .filter_map(|segment| segment.line())
                .filter(|line| line.0.len() >= 2 && line.0.iter().all(|c| c.x.is_finite() && c.y.is_finite()))
                .map(move |line| (category, line))
        })
        .collect()
}

fn frame(lines: &[(WalkCategory, &LineString<f64>)], viewport: &Viewport) -> Rect<f64> {
    lines.iter()
        .filter_map(|(_, line)| line.bounding_rect())
        .reduce(|a, b| Rect::new(
            coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
            coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
        ))
        .unwrap_or_else(|| {
            let (lat, lon) = (viewport.center.lat, viewport.center.lon);
            Rect::new(
                coord! { x: lon - EMPTY_FRAME, y: lat - EMPTY_FRAME },
                coord! { x: lon + EMPTY_FRAME, y: lat + EMPTY_FRAME },
            )
        })
}

/// Build an SVG points string for a LineString.
fn line_to_points(line: &LineString<f64>, project: &Projection) -> String {
    let mut out = String::new();

    for (i, coord) in line.0.iter().enumerate() {
        let (x, y) = project(coord);
        if i > 0 { out.push(' ') }
        out.push_str(&format!("{x:.3},{y:.3}"));
    }

    out
}

fn draw_legend<W: Write>(writer: &mut W, categories: &[WalkCategory], margin: f64) -> Result<()> {
    for (i, category) in categories.iter().enumerate() {
        let y = margin + 14.0 + i as f64 * 18.0;
        writeln!(
            writer,
            r#"<line class="seg {class}" x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}"/><text class="legend" x="{tx:.1}" y="{ty:.1}">{label}</text>"#,
            class = category_class(*category),
            x1 = margin + 4.0,
            x2 = margin + 24.0,
            tx = margin + 30.0,
            ty = y + 4.0,
            label = category.label(),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use geo::{Geometry, line_string};

    use super::*;
    use crate::{config::LatLon, network::{SegmentGeometry, SegmentScores}};

    fn viewport() -> Viewport {
        Viewport { center: LatLon { lat: 10.6394, lon: -61.4002 }, zoom: 16.0 }
    }

    fn network() -> SegmentNetwork {
        let rows = [(1, WalkCategory::Good, 0.0), (2, WalkCategory::Poor, 0.001), (3, WalkCategory::Poor, 0.002)];
        let geometries = rows.iter()
            .map(|&(id, _, dx)| SegmentGeometry {
                id,
                geometry: Geometry::LineString(line_string![(x: -61.40 + dx, y: 10.63), (x: -61.40 + dx, y: 10.64)]),
            })
            .collect();
        let scores = rows.iter()
            .map(|&(id, category, _)| SegmentScores {
                id, category, length: 1.0, aesthetics: 0.0, destination: 0.0, conspicuousness: 0.0, safety: 0.0,
            })
            .collect();
        SegmentNetwork::join(geometries, scores, false).unwrap()
    }

    #[test]
    fn draws_selected_segments_only() {
        let svg = map_svg(&network(), &Selection::from_labels(&["POOR"]), &viewport(), &SvgOptions::default()).unwrap();
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert_eq!(svg.matches(r#"class="seg cat-poor""#).count(), 3); // two segments and one legend swatch
        assert!(!svg.contains(r#"class="seg cat-good""#));
    }

    #[test]
    fn empty_selection_draws_no_segments() {
        let svg = map_svg(&network(), &Selection::Empty, &viewport(), &SvgOptions::default()).unwrap();
        assert_eq!(svg.matches("<polyline").count(), 0);
        assert!(svg.contains("<svg"));
        assert!(!svg.contains(r#"class="legend""#));
    }

    #[test]
    fn points_stay_inside_the_canvas() {
        let options = SvgOptions { width: 200.0, margin: 10.0, legend: false };
        let svg = map_svg(&network(), &Selection::All, &viewport(), &options).unwrap();

        let points = svg.lines()
            .filter(|line| line.starts_with("<polyline"))
            .flat_map(|line| {
                let start = line.find("points=\"").unwrap() + 8;
                let end = line[start..].find('"').unwrap() + start;
                line[start..end].split(' ').map(str::to_string).collect::<Vec<_>>()
            })
            .map(|pair| {
                let (x, y) = pair.split_once(',').unwrap();
                (x.parse::<f64>().unwrap(), y.parse::<f64>().unwrap())
            })
            .collect::<Vec<_>>();

        assert_eq!(points.len(), 6);
        assert!(points.iter().all(|&(x, _)| (9.999..=190.001).contains(&x)));
        assert!(points.iter().all(|&(_, y)| y >= 9.999));
    }

    #[test]
    fn rejects_degenerate_width() {
        let options = SvgOptions { width: 10.0, margin: 10.0, legend: true };
        assert!(map_svg(&network(), &Selection::All, &viewport(), &options).is_err());
    }
}
