use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use svgforge_cli::app;
use svgforge_core::{
    ConversationManager, ConversationStore, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore,
    Settings,
};

#[derive(Parser)]
#[command(name = "svgforge")]
#[command(about = "SVG Forge - chat with a model to design SVG icons")]
#[command(version)]
struct Cli {
    /// Run a single prompt in the most recent conversation and exit
    #[arg(short, long)]
    prompt: Option<String>,

    /// Icon style id (see /styles)
    #[arg(short, long)]
    style: Option<String>,

    /// LLM model to use
    #[arg(short, long)]
    model: Option<String>,

    /// OpenAI-compatible endpoint base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Directory holding saved conversations
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep conversations in memory only
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::load();
    if let Some(ref dir) = cli.data_dir {
        settings.storage.data_dir = Some(dir.clone());
    }

    let mut api = settings.resolve_api();
    if let Some(ref model) = cli.model {
        api.model = model.clone();
    }
    if let Some(ref base_url) = cli.base_url {
        api.base_url = base_url.clone();
    }

    tracing::debug!(base_url = %api.base_url, model = %api.model, "resolved api config");
    let session = app::build_session(&api);

    if cli.ephemeral {
        let store = ConversationStore::new(MemoryKeyValueStore::new());
        run(&cli, ConversationManager::open(store, session)).await
    } else {
        let store = ConversationStore::new(FileKeyValueStore::with_dir(settings.data_dir())?);
        run(&cli, ConversationManager::open(store, session)).await
    }
}

async fn run<S: KeyValueStore>(cli: &Cli, mut manager: ConversationManager<S>) -> Result<()> {
    if let Some(ref style) = cli.style {
        manager.set_style(style)?;
    }

    match cli.prompt {
        Some(ref prompt) => app::run_single_prompt(&mut manager, prompt).await,
        None => app::run_repl(manager).await,
    }
}
