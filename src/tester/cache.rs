extern crate serde_json;

use crate::types::Sample;
use log::debug;
use std::{
    error::Error as StdError,
    fmt, fs, io,
    path::PathBuf,
};

#[derive(Debug)]
pub enum Error {
    Io(PathBuf, io::Error),
    Json(serde_json::Error),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(path, e) => write!(f, "Error writing cache {}: {}", path.display(), e),
            Self::Json(e) => write!(f, "Error encoding samples: {}", e),
        }
    }
}
impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(_, e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

/// Samples stored on disk, one json file per problem url.
///
/// Entries never expire: a stored file is trusted until it is removed.
pub struct SampleCache {
    dir: PathBuf,
}
impl SampleCache {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        SampleCache { dir: dir.into() }
    }
    pub fn file_path(&self, problem_url: &str) -> PathBuf {
        self.dir
            .join(format!("{}.json", problem_url.replace('/', "_")))
    }

    /// Any failure to read or decode counts as a miss.
    pub fn lookup(&self, problem_url: &str) -> Option<Vec<Sample>> {
        if !self.dir.is_dir() {
            return None;
        }
        let path = self.file_path(problem_url);
        let samples = fs::read(&path)
            .ok()
            .and_then(|content| serde_json::from_slice(&content).ok());
        debug!(
            "cache {} for {}",
            if samples.is_some() { "hit" } else { "miss" },
            path.display()
        );
        samples
    }

    pub fn store(&self, problem_url: &str, samples: &[Sample]) -> Result<(), Error> {
        fs::create_dir_all(&self.dir).map_err(|e| Error::Io(self.dir.clone(), e))?;
        let content = serde_json::to_vec(samples).map_err(Error::Json)?;
        let path = self.file_path(problem_url);
        fs::write(&path, content).map_err(|e| Error::Io(path, e))
    }
}
