use anyhow::Result;
use clap::Parser;

use scribe::cli::CliArgs;
use scribe::config::EditorConfig;
use scribe::model::AppModel;

mod runtime;

use runtime::headless::{write_summary, Runner};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let startup = args.into_config().map_err(anyhow::Error::msg)?;

    scribe::tracing::init();

    let config = match &startup.config_path {
        Some(path) => EditorConfig::load_from(path),
        None => EditorConfig::load(),
    };

    let mut runner = Runner::new(AppModel::new(config), startup.config_path.clone());
    runner.apply(&startup)?;

    let stdout = std::io::stdout();
    if startup.json {
        let tree = scribe::view::render(&runner.model);
        serde_json::to_writer_pretty(stdout.lock(), &tree)?;
        println!();
    } else {
        write_summary(&runner.model, stdout.lock())?;
    }

    Ok(())
}
