mod budget;
mod config;
mod db;
mod export;
mod ledger;
mod logging;
mod models;
mod query;
mod quotes;
mod run;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    config.ensure_data_dir()?;
    logging::init(&config.log_path())?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %config.data_dir.display(),
        "starting"
    );

    let db = db::Database::open(&config.db_path())?;
    let mut ledger = ledger::Ledger::load(Box::new(db));

    match args.len() {
        1 => run::as_tui(&mut ledger, &config),
        2.. => run::as_cli(&args, &mut ledger, &config),
        _ => {
            eprintln!("Usage: ledgerly [command]");
            Ok(())
        }
    }
}
