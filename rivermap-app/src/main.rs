use anyhow::Context;
use clap::Parser;
use rivermap::{BoundaryProvider, GeoJsonFileProvider, IbgeProvider, PipelineConfig};
use std::path::PathBuf;

/// Renders a state's hydrography network as a layered Leaflet map
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file; fields it omits keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory searched for the hydrography dataset
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where the HTML map is written
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Read boundary.geojson and regions.geojson from this directory
    /// instead of the IBGE API
    #[arg(long)]
    boundary_dir: Option<PathBuf>,

    /// Federative unit code, e.g. RS
    #[arg(long)]
    state: Option<String>,

    /// Boundary reference year
    #[arg(long)]
    year: Option<u16>,
}

impl Cli {
    fn pipeline_config(&self) -> anyhow::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if let Some(input) = &self.input {
            config.input_dir = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(state) = &self.state {
            config.state_code = state.clone();
        }
        if let Some(year) = self.year {
            config.reference_year = year;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.pipeline_config()?;

    let provider: Box<dyn BoundaryProvider> = match &cli.boundary_dir {
        Some(dir) => Box::new(GeoJsonFileProvider::new(dir)),
        None => Box::new(
            IbgeProvider::new(&config.state_code, config.reference_year)
                .context("creating IBGE client")?,
        ),
    };

    let report = rivermap::run(&config, provider.as_ref()).context("map generation failed")?;
    log::info!(
        "{} principais, {} secundários (campo {:?})",
        report.primary,
        report.secondary,
        report.name_field
    );
    Ok(())
}
