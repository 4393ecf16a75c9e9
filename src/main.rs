use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use solar_incidence::config::format_timestamp;
use solar_incidence::{chart, export, RunConfig, SolarPositionSeriesBuilder};

mod cli;

use cli::Args;

fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let base = match &args.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => RunConfig::default(),
    };
    let config = args.apply(base);
    let site = config.to_site().context("invalid run configuration")?;

    let model = args.model;
    debug!("using {} sun position model", model.name());
    let series = SolarPositionSeriesBuilder::with_provider(model)
        .build(&site)
        .context("solar position series aborted")?;

    println!("Records: {}", series.len());
    println!("Sun above horizon: {}", series.daylight_count());
    if let Some(best) = series.min_incident() {
        println!(
            "Minimum incident angle: {:.2}° at {}",
            best.incident_angle,
            format_timestamp(&best.timestamp)
        );
    }

    // Render everything before touching the filesystem.
    let csv = match &args.csv {
        Some(path) => Some((path, export::csv_bytes(&series).context("rendering CSV")?)),
        None => None,
    };
    let charts = match &args.plot_dir {
        Some(dir) => Some((dir, chart::chart_documents(&series, &site).context("rendering charts")?)),
        None => None,
    };

    if let Some((path, bytes)) = csv {
        export::persist(path, &bytes)
            .with_context(|| format!("writing CSV to {}", path.display()))?;
        info!("CSV written to {}", path.display());
    }
    if let Some((dir, documents)) = charts {
        let [overlay, stacked] = chart::write_charts(dir, &documents)
            .with_context(|| format!("writing charts to {}", dir.display()))?;
        info!("charts written to {} and {}", overlay.display(), stacked.display());
    }
    Ok(())
}
