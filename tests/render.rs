mod common;

use std::fs;

use serde_json::Value;
use walkability::{Dashboard, DashboardConfig, Selection, commands::render::render, load_network};

fn dashboard() -> Dashboard {
    let fixture = common::standard();
    let config = DashboardConfig::default();
    Dashboard::new(load_network(&fixture.geometry, &fixture.scores, &config).unwrap(), config)
}

#[test]
fn writes_figures_and_svg() {
    let dashboard = dashboard();
    let out = tempfile::tempdir().unwrap();

    render(&dashboard, &Selection::from_labels(&["POOR"]), out.path(), 800.0, false).unwrap();

    let figures: Value = serde_json::from_str(&fs::read_to_string(out.path().join("figures.json")).unwrap()).unwrap();
    assert_eq!(figures["selected"], serde_json::json!(["POOR"]));
    assert_eq!(figures["map"]["data"].as_array().unwrap().len(), 2);
    assert_eq!(figures["scatters"][0]["figure"]["data"][0]["customdata"], serde_json::json!([2, 3]));

    let svg = fs::read_to_string(out.path().join("map.svg")).unwrap();
    assert_eq!(svg.matches("<polyline").count(), 2);
}

#[test]
fn refuses_to_overwrite_without_force() {
    let dashboard = dashboard();
    let out = tempfile::tempdir().unwrap();

    render(&dashboard, &Selection::All, out.path(), 800.0, false).unwrap();
    assert!(render(&dashboard, &Selection::All, out.path(), 800.0, false).is_err());
    render(&dashboard, &Selection::Empty, out.path(), 800.0, true).unwrap();

    let svg = fs::read_to_string(out.path().join("map.svg")).unwrap();
    assert_eq!(svg.matches("<polyline").count(), 0);
}
