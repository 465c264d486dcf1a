use std::io;

use passagedb_cli::{init_logging, run_interactive, run_once};
use passagedb_core::config::Config;
use passagedb_core::data_processor::DataProcessor;
use passagedb_embed::embedder_from_settings;
use passagedb_index::{CorpusIndex, TwoStageMatcher};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    let settings = config.settings().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    init_logging(&settings.logging.level);
    info!("Configuration loaded (env = {})", config.env_name());

    let cwd = std::env::current_dir()?;
    let chapters_dir = settings.chapters_dir(&cwd);
    info!("Loading chapters from {}", chapters_dir.display());
    let documents = DataProcessor::new().process_directory(&chapters_dir)?;

    let embedder = embedder_from_settings(&settings.embedding, &cwd)?;
    let index = CorpusIndex::build(documents, settings.search.window_size, embedder.as_ref())?;
    if index.is_empty() {
        warn!("No document in {} has {} or more lines; every query will come back empty", chapters_dir.display(), settings.search.window_size);
    }
    let matcher = TwoStageMatcher::new(&index, embedder.as_ref());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();
    if settings.search.interactive {
        run_interactive(&matcher, &index, &mut input, &mut out)
    } else {
        run_once(&matcher, &mut input, &mut out)
    }
}
