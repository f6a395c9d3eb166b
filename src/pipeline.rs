//! End-to-end run: dataset on disk to HTML map.

use crate::{
    core::{builder::MapBuilder, config::PipelineConfig},
    data::{boundary::BoundaryProvider, discovery::find_hydrography_dataset, hydrography::load_rivers},
    layers::{composer::LayerComposer, tile::TileLayer},
    processing::{
        classify::{classify, NamePatternClassifier},
        filter::filter_by_length,
        simplify::simplify_classified,
    },
    ui::{controls::Control, legend::Legend},
    Result,
};
use std::path::PathBuf;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    /// Dataset the rivers were read from
    pub dataset: PathBuf,
    /// Features left after clipping to the boundary
    pub loaded: usize,
    /// Features left after the length filter
    pub filtered: usize,
    pub primary: usize,
    pub secondary: usize,
    /// Attribute the classifier read names from
    pub name_field: String,
    pub output_path: PathBuf,
}

/// Runs every stage in order and writes the map to
/// `config.output_path`. The first failing stage aborts the run and
/// nothing is written.
pub fn run(config: &PipelineConfig, provider: &dyn BoundaryProvider) -> Result<PipelineReport> {
    config.validate()?;

    log::info!(">> 1. Carregando dados...");
    let dataset = find_hydrography_dataset(
        &config.input_dir,
        &config.hydrography_keywords,
        &crate::core::constants::DATASET_EXTENSIONS,
    )?;
    log::debug!("dataset: {}", dataset.display());

    let boundary = provider.boundary()?;
    let regions = provider.regions()?;
    log::debug!("{} regions", regions.len());

    log::info!("   Processando geometria dos rios...");
    let rivers = load_rivers(&dataset, &boundary, &config.name_fields)?;
    let loaded = rivers.len();
    let columns = rivers.columns.clone();

    log::info!("Rios antes do filtro: {}", loaded);
    let outcome = filter_by_length(rivers.features, config.length_threshold);
    log::info!(
        "Rios após filtro de comprimento (> {}): {}",
        config.length_threshold, outcome.after
    );
    let filtered = outcome.after;

    let classifier = NamePatternClassifier::new(&config.name_pattern);
    let classified = classify(outcome.kept, &columns, &config.name_fields, &classifier)?;
    let classified = simplify_classified(classified, &config.simplification());
    let (primary, secondary) = (classified.primary.len(), classified.secondary.len());
    log::debug!("{} primary, {} secondary", primary, secondary);

    log::info!(">> 2. Montando mapa...");
    let layers = LayerComposer::new(config.palette.clone()).compose(&boundary, &regions, &classified)?;

    log::info!(">> 3. Finalizando UI...");
    let map = MapBuilder::new()
        .with_center_and_zoom(config.center, config.zoom)
        .with_tile_layer(TileLayer::satellite())
        .with_layers(layers)
        .with_control(Control::layer_control())
        .with_control(Control::fullscreen())
        .with_legend(Legend::for_layers(&config.flag_url, &config.palette))
        .build()?;
    map.save(&config.output_path)?;

    log::info!(">> SUCESSO! Mapa gerado: {}", config.output_path.display());
    Ok(PipelineReport {
        dataset,
        loaded,
        filtered,
        primary,
        secondary,
        name_field: classified.name_field,
        output_path: config.output_path.clone(),
    })
}
