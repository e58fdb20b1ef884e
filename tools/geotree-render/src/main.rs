use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use geotree_map::preview_server::{PreviewContent, PreviewServer};
use geotree_map::snapshot::markers_of;
use geotree_map::{HeadlessMap, MapConfig, MapInitializer, MapOptions};
use tracing_subscriber::EnvFilter;

mod input;

use input::{load_page, page_source};

#[derive(Parser, Debug)]
#[command(
    name = "geotree-render",
    author,
    version,
    about = "Initialize a geotree element map headlessly and export its state",
    long_about = "Runs the element map initialization against a headless map: base and \
                  satellite tile layers, the layer switcher, marker popups and the initial \
                  viewport. The resulting map state is written as JSON.\n\n\
                  Embedded data is read either from a rendered page containing JSON script \
                  elements, or from separate token and marker files."
)]
struct Args {
    /// Rendered HTML page holding the embedded token and marker elements
    #[arg(short, long)]
    page: Option<PathBuf>,

    /// File holding the JSON-encoded access token
    #[arg(short, long)]
    token: Option<PathBuf>,

    /// GeoJSON file holding the marker feature collection
    #[arg(short, long)]
    markers: Option<PathBuf>,

    /// Map config JSON; missing fields use the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Map options JSON passed through to the initializer
    #[arg(long)]
    options: Option<String>,

    /// Write the map snapshot here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Serve the snapshot and markers on this local port until Ctrl-C
    #[arg(long)]
    serve: Option<u16>,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => {
            tracing::info!("Config: {}", path.display());
            MapConfig::from_json_file(path)?
        }
        None => MapConfig::default(),
    };

    let options: MapOptions = match &args.options {
        Some(text) => serde_json::from_str(text).context("Failed to parse --options")?,
        None => MapOptions::new(),
    };

    let source = page_source(args.page.as_deref(), args.token.as_deref(), args.markers.as_deref())?;
    let page = load_page(source, &config)?;

    let mut map = HeadlessMap::new();
    let initialized = MapInitializer::new(config).initialize(&mut map, &options, &page);
    if let Err(err) = &initialized {
        tracing::error!("Map initialization stopped: {err}");
    }

    // Written even on failure so the partial state can be inspected
    let snapshot = map.snapshot();
    let json = snapshot.to_json_pretty().context("Failed to serialize map snapshot")?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
            tracing::info!("Snapshot written to {}", path.display());
        }
        None => println!("{json}"),
    }

    if let Some(port) = args.serve {
        let content = PreviewContent {
            snapshot,
            markers: markers_of(&map),
        };
        let server = PreviewServer::start(SocketAddr::from((Ipv4Addr::LOCALHOST, port)), content)
            .context("Failed to start preview server")?;
        tracing::info!("Serving http://{}/map.json, press Ctrl-C to stop", server.local_addr());
        server.wait_for_ctrl_c().context("Failed to wait for Ctrl-C")?;
    }

    initialized.context("Map initialization failed")
}
