use crate::digest::{Verification, verify_file};
use crate::error::{PrtError, Result};
use crate::naming::{RunStamp, resolve_in, source_dir};
use crate::stitch::discover::discover;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Clone, Debug, Default)]
pub struct StitchOptions {
    /// Output path; the source path itself when omitted. A bare file name
    /// lands in the source directory.
    pub outfile: Option<PathBuf>,
    /// Hash record to verify against. A bare file name is looked up in the
    /// source directory.
    pub hashfile: Option<PathBuf>,
    /// Only stitch parts of this run.
    pub run: Option<RunStamp>,
}

#[derive(Clone, Debug)]
pub struct StitchReport {
    pub output: PathBuf,
    pub parts: Vec<PathBuf>,
    pub bytes: u64,
    pub verification: Verification,
}

impl StitchReport {
    /// False only when a hash record was checked and did not match.
    pub fn succeeded(&self) -> bool {
        !self.verification.is_failure()
    }
}

pub fn stitch(path: &Path, opts: &StitchOptions) -> Result<StitchReport> {
    if path.as_os_str().is_empty() {
        return Err(PrtError::InvalidArguments("empty source path".into()));
    }
    let dir = source_dir(path);
    let parts = discover(path, opts.run.as_ref())?;

    let output = match &opts.outfile {
        Some(o) => resolve_in(&dir, o),
        None => path.to_path_buf(),
    };
    // An existing output that is one of the parts would be truncated before
    // it is read.
    if output.exists() {
        let out_canon = fs::canonicalize(&output)?;
        for p in &parts {
            if fs::canonicalize(&p.path)? == out_canon {
                return Err(PrtError::InvalidArguments(format!(
                    "output {} is one of the parts being stitched",
                    output.display()
                )));
            }
        }
    }
    debug!(output = %output.display(), parts = parts.len(), "stitching");

    let mut out = File::create(&output)?;
    let mut bytes = 0u64;
    for p in &parts {
        let buf = fs::read(&p.path)?;
        out.write_all(&buf)?;
        bytes += buf.len() as u64;
        debug!(part = %p.path.display(), bytes = buf.len(), "appended");
    }
    out.sync_all()?;
    drop(out);

    let verification = match &opts.hashfile {
        Some(h) => verify_file(&output, &resolve_in(&dir, h))?,
        None => Verification::Skipped,
    };
    match &verification {
        Verification::Failed { expected, actual } => {
            warn!(output = %output.display(), %expected, %actual, "hash mismatch")
        }
        Verification::Passed => info!(output = %output.display(), "hash verified"),
        Verification::Skipped => {}
    }
    info!(output = %output.display(), parts = parts.len(), bytes, "stitch complete");

    Ok(StitchReport {
        output,
        parts: parts.into_iter().map(|p| p.path).collect(),
        bytes,
        verification,
    })
}
