use crate::digest::{hex_digest, write_hash_record};
use crate::error::{PrtError, Result};
use crate::naming::{PartName, RunStamp, base_name, hash_record_name, source_dir};
use crate::resume::{ResumeConfig, Settings, StitchSection};
use crate::split::plan::{SplitMode, SplitPlan};
use crate::util::hash_forward::HashingForward;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Clone, Debug, Default)]
pub struct SplitOptions {
    pub parts: Option<u64>,
    pub chunk_size: Option<u64>,
    /// Stamp shared by this run's artifacts; defaults to the current minute.
    pub run: Option<RunStamp>,
    /// Where to save the resume config. `None` skips it.
    pub resume_config: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct SplitReport {
    pub base: String,
    pub run: RunStamp,
    pub dir: PathBuf,
    pub segment_size: u64,
    /// Part paths with their sizes, in part order.
    pub parts: Vec<(PathBuf, u64)>,
    pub digest: String,
    pub hash_record: PathBuf,
    pub resume_config: Option<PathBuf>,
}

/// Copy `plan`'s segments from `src` into part files under `dir`, hashing
/// every byte written. A source shorter than planned is an `UnexpectedEof`;
/// parts written before that point stay on disk.
fn write_parts<R: Read>(
    mut src: R,
    plan: &SplitPlan,
    dir: &Path,
    base: &str,
    run: &RunStamp,
    hasher: &mut Sha256,
) -> Result<Vec<(PathBuf, u64)>> {
    let mut parts = Vec::new();
    for seg in plan.segments() {
        let part_path = dir.join(PartName::new(base, run, seg.number).file_name());
        let out = BufWriter::new(File::create(&part_path)?);
        let mut fwd = HashingForward::new(out, hasher);
        let copied = std::io::copy(&mut (&mut src).take(seg.len), &mut fwd)?;
        fwd.into_inner().into_inner().map_err(|e| e.into_error())?;

        if copied != seg.len {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!(
                    "source shrank while splitting: part {} got {copied} of {} bytes",
                    seg.number, seg.len
                ),
            )
            .into());
        }
        debug!(part = %part_path.display(), bytes = seg.len, "wrote part");
        parts.push((part_path, seg.len));
    }
    Ok(parts)
}

pub fn split(path: &Path, opts: &SplitOptions) -> Result<SplitReport> {
    if path.as_os_str().is_empty() {
        return Err(PrtError::InvalidArguments("empty source path".into()));
    }
    let mode = SplitMode::from_args(opts.parts, opts.chunk_size)?;
    let base = base_name(path)?;
    let dir = source_dir(path);

    let file_size = fs::metadata(path)?.len();
    let plan = SplitPlan::new(file_size, mode)?;
    let run = match &opts.run {
        Some(r) => r.clone(),
        None => RunStamp::now()?,
    };

    debug!(source = %path.display(), file_size, segment_size = plan.segment_size, %run, "splitting");

    let src = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let parts = write_parts(src, &plan, &dir, &base, &run, &mut hasher)?;

    let digest = hex_digest(hasher);
    let hash_record = dir.join(hash_record_name(&base, &run));
    write_hash_record(&hash_record, &digest)?;
    debug!(hash_record = %hash_record.display(), %digest, "wrote hash record");

    let resume_config = opts.resume_config.as_deref().and_then(|cfg_path| {
        ResumeConfig {
            stitch: StitchSection {
                filename: path.to_path_buf(),
                hashfile: hash_record.clone(),
                run: Some(run.to_string()),
            },
            settings: Settings::default(),
        }
        .write_best_effort(cfg_path)
    });

    info!(
        source = %path.display(),
        parts = parts.len(),
        %run,
        "split complete"
    );

    Ok(SplitReport {
        base,
        run,
        dir,
        segment_size: plan.segment_size,
        parts,
        digest,
        hash_record,
        resume_config,
    })
}
