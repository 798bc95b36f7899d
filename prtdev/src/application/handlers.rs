use std::path::{Path, PathBuf};

use tracing::{info, warn};

use prt_core::naming::{resolve_in, source_dir};
use prt_core::{
    ResumeConfig, Result, RunStamp, SplitOptions, StitchOptions, Verification, list, split,
    stitch, verify_file,
};

/// Result of a command that ran to completion.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    /// Output was produced but does not match its hash record.
    Mismatch,
}

fn parse_run(run: Option<String>) -> Result<Option<RunStamp>> {
    run.as_deref().map(RunStamp::parse).transpose()
}

fn report_verification(v: &Verification) -> Outcome {
    match v {
        Verification::Skipped => Outcome::Ok,
        Verification::Passed => {
            println!("hash: OK");
            Outcome::Ok
        }
        Verification::Failed { expected, actual } => {
            eprintln!("hash: MISMATCH expected={expected} actual={actual}");
            Outcome::Mismatch
        }
    }
}

pub fn handle_split(
    file: PathBuf,
    parts: Option<u64>,
    chunk_size: Option<u64>,
    run: Option<String>,
    config: Option<PathBuf>,
) -> Result<Outcome> {
    let opts = SplitOptions {
        parts,
        chunk_size,
        run: parse_run(run)?,
        resume_config: config,
    };
    let rep = split(&file, &opts)?;
    for (p, len) in &rep.parts {
        println!("{}  {} bytes", p.display(), len);
    }
    println!("hash: {}  {}", rep.digest, rep.hash_record.display());
    match &rep.resume_config {
        Some(c) => println!("resume: {}", c.display()),
        None if opts.resume_config.is_some() => warn!("resume config not saved; stitch manually"),
        None => {}
    }
    info!(source = %file.display(), parts = rep.parts.len(), run = %rep.run, "split finished");
    Ok(Outcome::Ok)
}

pub fn handle_stitch(
    file: PathBuf,
    out: Option<PathBuf>,
    hash_file: Option<PathBuf>,
    run: Option<String>,
) -> Result<Outcome> {
    let opts = StitchOptions {
        outfile: out,
        hashfile: hash_file,
        run: parse_run(run)?,
    };
    let rep = stitch(&file, &opts)?;
    info!(parts = rep.parts.len(), output = %rep.output.display(), bytes = rep.bytes, "stitch finished");
    Ok(report_verification(&rep.verification))
}

pub fn handle_resume(config: PathBuf, out: Option<PathBuf>) -> Result<Outcome> {
    let cfg = ResumeConfig::load(&config)?;
    let opts = StitchOptions {
        outfile: out,
        hashfile: Some(cfg.stitch.hashfile),
        run: parse_run(cfg.stitch.run)?,
    };
    let rep = stitch(&cfg.stitch.filename, &opts)?;
    info!(config = %config.display(), parts = rep.parts.len(), output = %rep.output.display(), bytes = rep.bytes, "resume finished");
    Ok(report_verification(&rep.verification))
}

pub fn handle_list(file: PathBuf, run: Option<String>) -> Result<Outcome> {
    let run = parse_run(run)?;
    for s in list(&file, run.as_ref())? {
        println!("run {}  {} parts  {} bytes", s.run, s.parts.len(), s.bytes);
        for (p, len) in &s.parts {
            println!("  {}  {} bytes", p.display(), len);
        }
        if !s.missing.is_empty() {
            println!("  missing parts: {:?}", s.missing);
        }
        if !s.duplicates.is_empty() {
            println!("  duplicate parts: {:?}", s.duplicates);
        }
    }
    Ok(Outcome::Ok)
}

pub fn handle_verify(file: PathBuf, hash_file: PathBuf) -> Result<Outcome> {
    // Bare record names live next to the file, as with stitch.
    let record = resolve_in(&source_dir(&file), &hash_file);
    let v = verify_file(&file, &record)?;
    Ok(report_verification(&v))
}

/// Verbosity requested by a resume config; 0 when it cannot be read.
pub fn resume_verbosity(config: &Path) -> u8 {
    match ResumeConfig::load(config) {
        Ok(cfg) if cfg.settings.verbose => 1,
        _ => 0,
    }
}
