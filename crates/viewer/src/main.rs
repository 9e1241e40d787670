use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use inventory_layout::Position;
use inventory_model::Inventory;
use mapview::{MapView, Renderer, SelectionChange, SvgSurface, Viewport};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::ViewerConfig;
use crate::kdl::parse_inventory;

mod config;
mod kdl;
mod report;

const EXAMPLE: &str = include_str!("../tests/model/warehouse.kdl");

#[derive(Parser, Debug)]
#[command(name = "inventory-map")]
#[command(about = "Lay out an inventory as a radial map and render it to SVG")]
struct Args {
    /// Inventory file, either a KDL description or a JSON snapshot. The
    /// bundled warehouse model is used when omitted.
    input: Option<PathBuf>,

    #[arg(long, short = 'o', default_value = "inventory-map.svg")]
    output: PathBuf,

    /// JSON file with `layout`, `viewport` and `canvas` sections
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    #[arg(long)]
    item_cap: Option<usize>,

    #[arg(long)]
    zoom_step: Option<f64>,

    /// Fit the whole map onto the canvas before other view actions
    #[arg(long)]
    fit: bool,

    #[arg(long, default_value_t = 0)]
    zoom_in: u32,

    #[arg(long, default_value_t = 0)]
    zoom_out: u32,

    /// Drag the map by `dx,dy` screen pixels
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pan: Option<Position>,

    /// Click at `x,y` in screen pixels and print the selected node
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    click: Option<Position>,

    /// Print per status, location and unit counts
    #[arg(long)]
    summary: bool,

    /// Also write the loaded inventory as a JSON snapshot
    #[arg(long)]
    export_json: Option<PathBuf>,
}

fn parse_point(s: &str) -> Result<Position, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got {s}"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate {v}: {e}"))
    };
    Ok(Position::new(coord(x)?, coord(y)?))
}

fn load_config(args: &Args) -> Result<ViewerConfig> {
    let mut config = match &args.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    if let Some(cap) = args.item_cap {
        config.layout.item_cap = cap;
    }
    if let Some(step) = args.zoom_step {
        config.viewport.zoom_step = step;
    }
    Ok(config)
}

fn load_inventory(path: Option<&Path>) -> Result<Inventory> {
    let Some(path) = path else {
        return parse_inventory(EXAMPLE).context("parsing the bundled model");
    };
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let inventory = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Inventory::from_json_str(&content).map_err(anyhow::Error::from),
        _ => parse_inventory(&content),
    };
    inventory.with_context(|| format!("loading {}", path.display()))
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let viewport = Viewport::new(config.viewport)?;
    let mut map = MapView::new(config.layout, viewport, Renderer::new(config.canvas))?;

    let inventory = load_inventory(args.input.as_deref())?;
    info!(
        locations = inventory.locations().len(),
        units = inventory.units().len(),
        items = inventory.items().len(),
        "inventory loaded"
    );

    if let Some(path) = &args.export_json {
        fs::write(path, inventory.to_json_string()?)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "snapshot written");
    }

    if args.summary {
        print!("{}", report::summary_panel(&inventory.summary()));
    }

    map.set_inventory(&inventory);
    if map.is_empty() {
        println!("{}", report::EMPTY_MESSAGE);
        return Ok(());
    }

    if args.fit && !map.fit_to_content() {
        debug!("nothing to fit");
    }
    for _ in 0..args.zoom_in {
        map.zoom_in();
    }
    for _ in 0..args.zoom_out {
        map.zoom_out();
    }
    if let Some(delta) = args.pan {
        map.pan_by(delta.x, delta.y);
    }
    if let Some(point) = args.click {
        match map.click(point) {
            SelectionChange::Selected(id) => info!(id = %id, "node selected"),
            SelectionChange::Cleared | SelectionChange::Unchanged => {
                info!(x = point.x, y = point.y, "click hit no node")
            }
        }
        print!("{}", report::info_panel(map.selected_details().as_ref()));
    }

    print!("{}", report::legend_panel());
    print!("{}", report::statistics_panel(&map.statistics()));

    let mut surface = SvgSurface::new();
    map.present(&mut surface);
    surface
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(
        path = %args.output.display(),
        scale = map.viewport().scale(),
        "map rendered"
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Args::parse())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        Args::parse_from(std::iter::once("inventory-map").chain(extra.iter().copied()))
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("10,-20.5"), Ok(Position::new(10.0, -20.5)));
        assert_eq!(parse_point(" 3 , 4 "), Ok(Position::new(3.0, 4.0)));
        assert!(parse_point("10").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let config = load_config(&args(&["--item-cap", "5", "--zoom-step", "1.5"])).unwrap();
        assert_eq!(config.layout.item_cap, 5);
        assert_eq!(config.viewport.zoom_step, 1.5);

        let parsed = args(&["--pan", "-10,5", "--click", "400,300", "--zoom-in", "2"]);
        assert_eq!(parsed.pan, Some(Position::new(-10.0, 5.0)));
        assert_eq!(parsed.click, Some(Position::new(400.0, 300.0)));
        assert_eq!(parsed.zoom_in, 2);

        let negative = args(&["--click", "-5,10", "--pan", "-1,-1"]);
        assert_eq!(negative.click, Some(Position::new(-5.0, 10.0)));
        assert_eq!(negative.pan, Some(Position::new(-1.0, -1.0)));
    }

    #[test]
    fn test_bundled_model_loads() {
        let inventory = load_inventory(None).unwrap();
        assert_eq!(inventory.locations().len(), 2);
    }

    #[test]
    fn test_json_round_trip_through_files() {
        let dir = std::env::temp_dir().join(format!("inventory-map-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let snapshot = dir.join("inventory.json");
        let svg = dir.join("map.svg");

        run(args(&[
            "--export-json",
            snapshot.to_str().unwrap(),
            "-o",
            svg.to_str().unwrap(),
        ]))
        .unwrap();

        let reloaded = load_inventory(Some(&snapshot)).unwrap();
        assert_eq!(reloaded.summary(), load_inventory(None).unwrap().summary());
        let rendered = fs::read_to_string(&svg).unwrap();
        assert!(rendered.contains("Central "));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unknown_file_is_an_error() {
        let err = load_inventory(Some(Path::new("/nonexistent/inventory.kdl"))).unwrap_err();
        assert!(err.to_string().contains("reading"));
    }
}
