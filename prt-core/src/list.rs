use crate::error::Result;
use crate::naming::RunStamp;
use crate::stitch::discover::{discover, runs};
use std::fs;
use std::path::{Path, PathBuf};

/// What is on disk for one split run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub run: RunStamp,
    pub parts: Vec<(PathBuf, u64)>,
    pub bytes: u64,
    /// Part numbers absent between 1 and the highest one found.
    pub missing: Vec<u64>,
    /// Part numbers found more than once.
    pub duplicates: Vec<u64>,
}

pub fn list(source: &Path, run: Option<&RunStamp>) -> Result<Vec<RunSummary>> {
    let found = discover(source, run)?;
    let mut out = Vec::new();
    for (run, group) in runs(&found) {
        let mut parts = Vec::with_capacity(group.len());
        let mut bytes = 0u64;
        for p in &group {
            let len = fs::metadata(&p.path)?.len();
            bytes += len;
            parts.push((p.path.clone(), len));
        }

        let numbers: Vec<u64> = group.iter().map(|p| p.name.number).collect();
        let max = numbers.last().copied().unwrap_or(0);
        let missing = (1..=max).filter(|n| numbers.binary_search(n).is_err()).collect();
        let mut duplicates: Vec<u64> = numbers
            .windows(2)
            .filter(|w| w[0] == w[1])
            .map(|w| w[0])
            .collect();
        duplicates.dedup();

        out.push(RunSummary {
            run,
            parts,
            bytes,
            missing,
            duplicates,
        });
    }
    Ok(out)
}
