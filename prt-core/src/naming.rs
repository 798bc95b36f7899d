use std::fmt;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::macros::format_description;

use crate::error::{PrtError, Result};

/// Part file extension. A split of `report.pdf` at 14:05 on 19 Oct 2026
/// produces `report_10192026_1405_1.prt`, `report_10192026_1405_2.prt`, ...
/// and the hash record `report_hash_10192026_1405` next to the source.
pub const PART_EXT: &str = "prt";

/// Token shared by every artifact of one split run.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunStamp(String);

impl RunStamp {
    /// Stamp for the current minute, `MMDDYYYY_HHMM` in local time.
    /// Falls back to UTC when the local offset is unavailable.
    pub fn now() -> Result<Self> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Self::at(now)
    }

    pub fn at(t: OffsetDateTime) -> Result<Self> {
        let fmt = format_description!("[month][day][year]_[hour][minute]");
        let s = t
            .format(&fmt)
            .map_err(|e| PrtError::InvalidArguments(format!("run stamp: {e}")))?;
        Ok(Self(s))
    }

    pub fn parse(s: &str) -> Result<Self> {
        if is_valid_run(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(PrtError::InvalidArguments(format!(
                "run stamp must be non-empty [A-Za-z0-9_-], got {s:?}"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_valid_run(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Decoded identity of one part file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartName {
    pub base: String,
    pub run: RunStamp,
    pub number: u64,
}

impl PartName {
    pub fn new(base: &str, run: &RunStamp, number: u64) -> Self {
        Self {
            base: base.to_string(),
            run: run.clone(),
            number,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}_{}_{}.{PART_EXT}", self.base, self.run, self.number)
    }

    /// True when `file_name` looks like a part of `base` (`<base>_*.prt`),
    /// whether or not it decodes.
    pub fn matches(file_name: &str, base: &str) -> bool {
        file_name
            .strip_prefix(base)
            .and_then(|rest| rest.strip_prefix('_'))
            .and_then(|rest| rest.strip_suffix(PART_EXT))
            .is_some_and(|rest| rest.ends_with('.'))
    }

    /// Decode a part file name belonging to `base`. Anything that does not
    /// carry a valid run and a positive decimal part number is rejected.
    pub fn decode(file_name: &str, base: &str) -> Result<Self> {
        let malformed = || PrtError::MalformedPartName(file_name.to_string());

        let inner = file_name
            .strip_prefix(base)
            .and_then(|rest| rest.strip_prefix('_'))
            .and_then(|rest| rest.strip_suffix(PART_EXT))
            .and_then(|rest| rest.strip_suffix('.'))
            .ok_or_else(malformed)?;
        let (run, number) = inner.rsplit_once('_').ok_or_else(malformed)?;

        if !is_valid_run(run) || number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let number: u64 = number.parse().map_err(|_| malformed())?;
        if number == 0 {
            return Err(malformed());
        }

        Ok(Self {
            base: base.to_string(),
            run: RunStamp(run.to_string()),
            number,
        })
    }
}

pub fn hash_record_name(base: &str, run: &RunStamp) -> String {
    format!("{base}_hash_{run}")
}

/// File name without its last extension.
pub fn base_name(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            PrtError::InvalidArguments(format!("no file name in {}", path.display()))
        })
}

/// Directory holding `path`; `.` for bare file names.
pub fn source_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Place bare file names inside `dir`; anything with a directory component
/// is used as given.
pub fn resolve_in(dir: &Path, p: &Path) -> PathBuf {
    match p.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => p.to_path_buf(),
        _ => dir.join(p),
    }
}
