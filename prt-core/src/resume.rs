use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{PrtError, Result};
use crate::naming::source_dir;

pub const DEFAULT_CONFIG_NAME: &str = "stitch.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StitchSection {
    /// Source path as passed to the split.
    pub filename: PathBuf,
    pub hashfile: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { verbose: true }
    }
}

/// Written after a split so a later stitch can run without re-entering file names.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResumeConfig {
    pub stitch: StitchSection,
    #[serde(default)]
    pub settings: Settings,
}

impl ResumeConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| PrtError::Config(format!("{}: {e}", path.display())))
    }

    /// Write through a temp file in the target directory, then rename into place.
    /// A failed write leaves nothing behind.
    pub fn write(&self, path: &Path) -> Result<()> {
        let body = toml::to_string_pretty(self).map_err(|e| PrtError::Config(e.to_string()))?;
        let mut tmp = NamedTempFile::new_in(source_dir(path))?;
        tmp.write_all(body.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Like [`write`](Self::write), but a failure is only logged.
    pub fn write_best_effort(&self, path: &Path) -> Option<PathBuf> {
        match self.write(path) {
            Ok(()) => {
                debug!(config = %path.display(), "saved resume config");
                Some(path.to_path_buf())
            }
            Err(e) => {
                warn!(config = %path.display(), error = %e, "could not save resume config; stitch manually");
                None
            }
        }
    }
}
