#![allow(dead_code)]

use std::{fs, path::{Path, PathBuf}};

use serde_json::{Value, json};
use tempfile::TempDir;

/// (id, category, length, aes, dest, con, safety)
pub type Row = (i64, &'static str, f64, f64, f64, f64, f64);

pub const ROWS: &[Row] = &[
    (1, "GOOD", 120.0, 0.6, 0.4, 0.7, 0.9),
    (2, "POOR", 45.5, 0.2, 0.1, 0.3, 0.4),
    (3, "POOR", 80.0, 0.3, 0.2, 0.2, 0.5),
    (4, "EXCELLENT", 60.0, 0.9, 0.8, 0.9, 1.0),
    (5, "VERY POOR", 30.0, 0.0, 0.1, 0.1, 0.2),
];

pub struct Fixture {
    pub dir: TempDir,
    pub geometry: PathBuf,
    pub scores: PathBuf,
}

/// A GeoJSON file with one line per id, and a score CSV with `rows`.
pub fn fixture(ids: &[i64], rows: &[Row]) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let geometry = dir.path().join("segments.geojson");
    let scores = dir.path().join("scores.csv");

    write_geojson(&geometry, ids);
    write_scores(&scores, rows);

    Fixture { dir, geometry, scores }
}

pub fn standard() -> Fixture {
    fixture(&[1, 2, 3, 4, 5], ROWS)
}

fn write_geojson(path: &Path, ids: &[i64]) {
    let features = ids.iter()
        .map(|&id| {
            let lon = -61.40 + id as f64 * 0.001;
            json!({
                "type": "Feature",
                "properties": { "P_ID": id, "Name": format!("segment {id}") },
                "geometry": { "type": "LineString", "coordinates": [[lon, 10.638], [lon, 10.640], [lon + 0.0005, 10.641]] },
            })
        })
        .collect::<Vec<Value>>();
    let collection = json!({ "type": "FeatureCollection", "features": features });
    fs::write(path, serde_json::to_vec_pretty(&collection).unwrap()).unwrap();
}

fn write_scores(path: &Path, rows: &[Row]) {
    let mut csv = String::from("P_ID,WALK_CATEGORY,SHAPE_Length,AES_SCORE,DEST_SCORE,CON_SCORE,SAFETY\n");
    for (id, category, length, aes, dest, con, safety) in rows {
        csv.push_str(&format!("{id},{category},{length},{aes},{dest},{con},{safety}\n"));
    }
    fs::write(path, csv).unwrap();
}
