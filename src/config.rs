use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use directories::BaseDirs;

use crate::lrc;
use crate::models::Lyric;
use crate::store::LyricStore;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".simple-lyric";
/// Log file stored inside the application data directory.
const LOG_FILE_NAME: &str = "simple-lyric.log";

/// Command-line arguments for simple-lyric
#[derive(Parser, Debug, Clone)]
#[command(name = "simple-lyric")]
#[command(about = "Time-coded lyric viewer for the terminal")]
#[command(version)]
pub struct Config {
    /// Path to open on startup, e.g. `/`, `/import` or `/lyric/1`
    #[arg(short, long, default_value = "/", env = "SIMPLE_LYRIC_ROUTE")]
    pub route: String,

    /// LRC files to add to the collection before the UI starts
    #[arg(short, long = "import", value_name = "FILE")]
    pub imports: Vec<PathBuf>,

    /// Where to write the log (defaults to ~/.simple-lyric/simple-lyric.log)
    #[arg(long, env = "SIMPLE_LYRIC_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Print the lyric with this id as LRC text and exit without the UI
    #[arg(long, value_name = "ID")]
    pub export: Option<String>,

    /// Raise log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Input poll interval in milliseconds; also the playback tick
    #[arg(long, default_value_t = 250, env = "SIMPLE_LYRIC_TICK_MS")]
    pub tick_ms: u64,
}

impl Config {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    /// Configured log path, falling back to the data directory in `$HOME`.
    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => {
                let base_dirs =
                    BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
                Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(LOG_FILE_NAME))
            }
        }
    }
}

/// Read every `--import` file into the store, in the order given.
pub fn import_files(store: &mut LyricStore, paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        let lyric = read_lrc_file(path, store.next_id())?;
        store.add_lyric(lyric);
    }
    Ok(())
}

/// LRC text for `--export`. Unknown ids are an error rather than empty output.
pub fn export_lyric(store: &LyricStore, id: &str) -> Result<String> {
    let lyric = store
        .get_lyric_by_id(id)
        .ok_or_else(|| anyhow!("no lyric with id '{id}'"))?;
    Ok(lrc::to_lrc(lyric))
}

/// Load one LRC file. Files without a `[ti:]` tag are titled after their stem.
pub fn read_lrc_file(path: &Path, id: String) -> Result<Lyric> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let parsed =
        lrc::parse(&text).with_context(|| format!("failed to parse {}", path.display()))?;
    let title = parsed.title.unwrap_or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    Ok(Lyric {
        id,
        title,
        artist: parsed.artist.unwrap_or_default(),
        lines: parsed.lines,
    })
}
