/// Single-page front end: a category multi-select, the map, the bar chart and
/// the four scatter charts, drawn with Plotly from the JSON API.
pub(crate) const INDEX_HTML: &str = include_str!("../../assets/index.html");
