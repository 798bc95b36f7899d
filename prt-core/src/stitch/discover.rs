use crate::error::{PrtError, Result};
use crate::naming::{PartName, RunStamp, base_name, source_dir};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// A part file found on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartFile {
    pub path: PathBuf,
    pub name: PartName,
}

/// Find the part files of `source` (`<base>_*.prt` next to it), sorted by
/// part number.
///
/// With `run` set only that run's parts are returned. Without it every run
/// found is returned interleaved by part number, which yields a corrupt
/// stitch when more than one run exists; a warning is logged in that case.
pub fn discover(source: &Path, run: Option<&RunStamp>) -> Result<Vec<PartFile>> {
    if source.as_os_str().is_empty() {
        return Err(PrtError::InvalidArguments("empty source path".into()));
    }
    let base = base_name(source)?;
    let dir = source_dir(source);

    let mut found = Vec::new();
    for e in WalkDir::new(&dir).min_depth(1).max_depth(1).follow_links(true) {
        let e = e.map_err(std::io::Error::from)?;
        if !e.file_type().is_file() {
            continue;
        }
        let file_name = e.file_name().to_string_lossy();
        if !PartName::matches(&file_name, &base) {
            continue;
        }
        let name = PartName::decode(&file_name, &base)?;
        if run.is_some_and(|r| *r != name.run) {
            continue;
        }
        found.push(PartFile {
            path: e.path().to_path_buf(),
            name,
        });
    }

    if found.is_empty() {
        return Err(PrtError::PartsNotFound { base, dir });
    }

    // Numeric order; file name breaks ties so the result is stable.
    found.sort_by(|a, b| {
        a.name
            .number
            .cmp(&b.name.number)
            .then_with(|| a.path.file_name().cmp(&b.path.file_name()))
    });

    if run.is_none() {
        let runs = runs(&found);
        if runs.len() > 1 {
            warn!(
                base = %base,
                runs = ?runs.keys().map(RunStamp::as_str).collect::<Vec<_>>(),
                "parts from several split runs found; pass a run to stitch only one"
            );
        }
    }

    Ok(found)
}

/// Group parts by run, keeping each group's part order.
pub fn runs(parts: &[PartFile]) -> BTreeMap<RunStamp, Vec<&PartFile>> {
    let mut by_run: BTreeMap<RunStamp, Vec<&PartFile>> = BTreeMap::new();
    for p in parts {
        by_run.entry(p.name.run.clone()).or_default().push(p);
    }
    by_run
}
