//! `onrepeat fetch`: download the catalog's audio files.
//!
//! Files land in `<asset_root>/music`. Existing files are left alone, each
//! download goes to a `.part` file first and is renamed once complete, and
//! the first failure aborts the run.

mod http;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::{FetchSource, Settings};
use crate::error::FetchError;

pub use http::HttpDownloader;

/// Transport used to fetch a single source.
pub trait Downloader {
    /// Stream the body of `source` into `out`, returning the byte count.
    fn download(&self, source: &FetchSource, out: &mut dyn Write) -> Result<u64, FetchError>;
}

/// What a run did, by track name.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FetchReport {
    pub downloaded: Vec<String>,
    pub skipped: Vec<String>,
}

/// Download every source into `dir`, pausing `delay` after each download.
pub fn fetch_all<D: Downloader>(
    downloader: &D,
    dir: &Path,
    sources: &[FetchSource],
    delay: Duration,
) -> Result<FetchReport, FetchError> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| FetchError::Prepare {
            path: dir.to_path_buf(),
            source,
        })?;
        info!(dir = %dir.display(), "created directory");
    }

    let mut report = FetchReport::default();
    for source in sources {
        let dest = dir.join(&source.filename);
        if dest.exists() {
            info!(track = %source.name, "already exists, skipping");
            report.skipped.push(source.name.clone());
            continue;
        }

        download_one(downloader, source, &dest)?;
        report.downloaded.push(source.name.clone());

        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    Ok(report)
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

fn download_one<D: Downloader>(
    downloader: &D,
    source: &FetchSource,
    dest: &Path,
) -> Result<(), FetchError> {
    let write_err = |e| FetchError::Write {
        track: source.name.clone(),
        source: e,
    };

    let part = part_path(dest);
    let mut file = File::create(&part).map_err(write_err)?;

    let result = downloader
        .download(source, &mut file)
        .and_then(|bytes| file.sync_all().map(|()| bytes).map_err(write_err));
    drop(file);

    match result {
        Ok(bytes) => {
            fs::rename(&part, dest).map_err(write_err)?;
            info!(track = %source.name, dest = %dest.display(), bytes, "downloaded");
            Ok(())
        }
        Err(e) => {
            if let Err(rm) = fs::remove_file(&part) {
                warn!(path = %part.display(), error = %rm, "could not remove partial file");
            }
            Err(e)
        }
    }
}

/// Run the fetch command with the loaded settings.
pub fn run(settings: &Settings) -> Result<FetchReport, FetchError> {
    let downloader = HttpDownloader::new(&settings.fetch)?;
    let dir = settings.audio.music_dir();
    info!(dir = %dir.display(), count = settings.fetch.sources.len(), "starting music download");

    fetch_all(
        &downloader,
        &dir,
        &settings.fetch.sources,
        Duration::from_millis(settings.fetch.delay_ms),
    )
}
