#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(
    name = "features2xsd",
    about = "Synthesize a feature type and its GML application schema from feature records"
)]
struct Cli {
    /// Path to a JSON array of feature records
    #[arg(value_name = "RECORDS")]
    input: std::path::PathBuf,

    /// Directory receiving the schema and the normalized records
    #[arg(value_name = "OUT_DIR")]
    output: std::path::PathBuf,

    /// JSON configuration file
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Base URI of the generated namespace
    #[arg(long)]
    namespace_uri: Option<String>,

    /// Publish schema locations relative to this service URL
    #[arg(long)]
    service_url: Option<String>,

    /// Use this identifier instead of minting one
    #[arg(long)]
    type_id: Option<String>,

    /// Probe multi geometry type names before singular ones
    #[arg(long, default_value_t = false)]
    multi_first: bool,

    /// Indent the schema document
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Adopt geometry-valued properties as missing default geometries
    #[arg(long, default_value_t = false)]
    repair_geometries: bool,
}

#[cfg(feature = "cli")]
fn run(cli: Cli) -> featureschema::error::Result<()> {
    use featureschema::error::SchemaError;
    use featureschema::registry::SchemaRegistry;
    use featureschema::schema::GeometryProbeOrder;
    use featureschema::store::DirectorySchemaStore;
    use featureschema::synthesizer::{convert_feature_file, FeatureTypeSynthesizer, SynthesizerConfig};

    let mut config = match &cli.config {
        Some(path) => SynthesizerConfig::load(path)?,
        None => SynthesizerConfig::default(),
    };
    if let Some(namespace_uri) = cli.namespace_uri {
        config.namespace_uri = namespace_uri;
    }
    if cli.multi_first {
        config.geometry_probe = GeometryProbeOrder::MultiFirst;
    }
    config.pretty |= cli.pretty;
    config.repair_geometries |= cli.repair_geometries;

    let synthesizer = FeatureTypeSynthesizer::new(config)?;
    let mut store = DirectorySchemaStore::new(&cli.output);
    if let Some(service_url) = &cli.service_url {
        store = store.with_service_url(service_url)?;
    }
    let registry = SchemaRegistry::new();

    let published = convert_feature_file(
        &cli.input,
        &synthesizer,
        cli.type_id.as_deref(),
        &store,
        &registry,
    )?;

    let records_path = cli
        .output
        .join(format!("{}.json", published.collection.descriptor().identifier()));
    let records = serde_json::to_string_pretty(&published.collection)?;
    std::fs::write(&records_path, records).map_err(|source| SchemaError::Storage {
        location: records_path.display().to_string(),
        source,
    })?;

    println!("{}\t{}", published.namespace(), published.location);
    Ok(())
}

#[cfg(feature = "cli")]
fn main() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary is only available with the `cli` feature enabled.");
    std::process::exit(1);
}
