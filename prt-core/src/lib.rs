#![forbid(unsafe_code)]

pub mod digest;
pub mod error;
pub mod naming;
pub mod resume;

pub mod util {
    pub mod hash_forward;
}

pub mod split {
    pub mod plan;
    pub mod writer;
}

pub mod stitch {
    pub mod discover;
    pub mod join;
}

pub mod list;

// Re-exports: stable API surface
pub use digest::{Verification, sha256_file, verify_file};
pub use error::{PrtError, Result};
pub use list::{RunSummary, list};
pub use naming::{PartName, RunStamp};
pub use resume::ResumeConfig;
pub use split::plan::{SplitMode, SplitPlan};
pub use split::writer::{SplitOptions, SplitReport, split};
pub use stitch::discover::{PartFile, discover};
pub use stitch::join::{StitchOptions, StitchReport, stitch};
