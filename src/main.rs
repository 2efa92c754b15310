//! Binary entry point: read the configuration, bring up logging, seed the
//! store and drive the Ratatui event loop until the user exits.
use clap::Parser;
use log::info;

use simple_lyric::config::{export_lyric, import_files, Config};
use simple_lyric::logging::init_file_logger;
use simple_lyric::{run_app, App, LyricStore};

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    let log_path = config.log_path()?;
    init_file_logger(&log_path, config.verbose)?;
    info!("starting simple-lyric at route '{}'", config.route);

    let mut store = LyricStore::seeded();
    import_files(&mut store, &config.imports)?;

    if let Some(id) = &config.export {
        info!("exporting lyric '{id}'");
        print!("{}", export_lyric(&store, id)?);
        return Ok(());
    }

    let mut app = App::new(store, &config.route);
    run_app(&mut app, config.tick_rate())?;

    let store = app.into_store();
    info!("session ended with {} lyrics", store.len());
    Ok(())
}
