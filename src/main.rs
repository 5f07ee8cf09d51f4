//! mcintent - reads matched intents as JSON and prints one command per intent.

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use mcintent::{CompilerConfig, IntentCompiler, IntentMatch};
use mcintent_assets::{DirSource, RegistryStore, ITEM_CATEGORY};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Compile matched intents into Minecraft commands",
    long_about = None
)]
struct Args {
    /// JSON file with one or more intents; reads stdin when omitted or "-"
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory with <category>.json registry dumps (overrides the config)
    #[arg(long)]
    registry_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => CompilerConfig::load_from_path(path),
        None => CompilerConfig::load(),
    };
    if args.registry_dir.is_some() {
        config.registry_dir = args.registry_dir.clone();
    }

    let registry = match &config.registry_dir {
        Some(dir) => {
            info!("Loading registry dumps from {}", dir.display());
            RegistryStore::new(DirSource::new(dir))
        }
        None => RegistryStore::bundled(),
    };
    registry
        .preload([ITEM_CATEGORY])
        .context("failed to load registry dumps")?;

    let input = read_input(args.input.as_ref())?;
    let compiler = IntentCompiler::new(&registry, config);
    for (index, request) in serde_json::Deserializer::from_str(&input)
        .into_iter::<IntentMatch>()
        .enumerate()
    {
        let request = request.with_context(|| format!("intent #{index} is not valid JSON"))?;
        let command = compiler
            .compile(&request)
            .with_context(|| format!("cannot compile {} intent #{index}", request.intent.name()))?;
        println!("{command}");
    }
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read intents from {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read intents from stdin")?;
            Ok(buf)
        }
    }
}
