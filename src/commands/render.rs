use std::{io::Write, path::Path};

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::{
    cli::RenderArgs,
    common::fs::{ensure_dir_exists, finalize_big_write, open_for_big_write},
    dashboard::{Dashboard, initial_figures, on_selection},
    figure::{SvgOptions, write_map_svg},
    network::{Selection, load_network},
};

pub fn run(_cli: &crate::cli::Cli, args: &RenderArgs) -> Result<()> {
    if args.out == Path::new("-") { bail!("stdout is not supported."); }

    let config = args.data.to_config();
    let network = load_network(&args.data.geometry, &args.data.scores, &config)?;
    let dashboard = Dashboard::new(network, config);

    let selection = if args.select.is_empty() {
        Selection::every_category()
    } else {
        Selection::from_labels(&args.select)
    };

    render(&dashboard, &selection, &args.out, args.width, args.force)?;
    println!("Wrote figures.json and map.svg -> {}", args.out.display());
    Ok(())
}

/// Write `figures.json` and `map.svg` for `selection` into `out_dir`.
pub fn render(dashboard: &Dashboard, selection: &Selection, out_dir: &Path, width: f64, force: bool) -> Result<()> {
    ensure_dir_exists(out_dir)?;

    let mut figures = initial_figures(dashboard, None);
    let reactive = on_selection(dashboard, selection, None);
    figures.selected = selection.labels();
    figures.map = reactive.map;
    figures.scatters = reactive.scatters;

    let json_path = out_dir.join("figures.json");
    let mut sink = open_for_big_write(&json_path, force)?;
    serde_json::to_writer_pretty(&mut sink, &figures)
        .with_context(|| format!("[render] Failed to serialize {}", json_path.display()))?;
    writeln!(sink)?;
    finalize_big_write(sink)?;
    info!(path = %json_path.display(), "[render] wrote figures");

    let svg_path = out_dir.join("map.svg");
    let mut sink = open_for_big_write(&svg_path, force)?;
    let options = SvgOptions { width, ..SvgOptions::default() };
    write_map_svg(&mut sink, dashboard.network(), selection, &dashboard.default_viewport(), &options)?;
    finalize_big_write(sink)?;
    info!(path = %svg_path.display(), "[render] wrote static map");

    Ok(())
}
