use crate::error::{PrtError, Result};

/// How a file is cut into parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitMode {
    /// Exactly this many parts; the last one absorbs the remainder.
    Parts(u64),
    /// Parts of this many bytes; the last one holds whatever is left.
    Chunk(u64),
}

impl SplitMode {
    /// Exactly one of `parts` / `chunk_size` must be given and non-zero.
    pub fn from_args(parts: Option<u64>, chunk_size: Option<u64>) -> Result<Self> {
        let parts = parts.filter(|&p| p > 0);
        let chunk_size = chunk_size.filter(|&c| c > 0);
        match (parts, chunk_size) {
            (Some(p), None) => Ok(SplitMode::Parts(p)),
            (None, Some(c)) => Ok(SplitMode::Chunk(c)),
            (None, None) => Err(PrtError::InvalidArguments(
                "one of parts or chunk size is required".into(),
            )),
            (Some(_), Some(_)) => Err(PrtError::InvalidArguments(
                "parts and chunk size are mutually exclusive".into(),
            )),
        }
    }
}

/// One part's byte range in the source file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub number: u64,
    pub offset: u64,
    pub len: u64,
}

#[derive(Clone, Debug)]
pub struct SplitPlan {
    pub file_size: u64,
    pub segment_size: u64,
    /// Number of parts the plan produces.
    pub count: u64,
}

impl SplitPlan {
    pub fn new(file_size: u64, mode: SplitMode) -> Result<Self> {
        let segment_size = match mode {
            SplitMode::Parts(0) => {
                return Err(PrtError::InvalidArguments("parts must be at least 1".into()));
            }
            SplitMode::Chunk(c) if c > file_size => {
                return Err(PrtError::ChunkTooLarge {
                    chunk_size: c,
                    file_size,
                });
            }
            SplitMode::Chunk(c) => c,
            SplitMode::Parts(p) => file_size / p,
        };
        if segment_size < 1 {
            let parts = match mode {
                SplitMode::Parts(p) => p,
                SplitMode::Chunk(_) => 0,
            };
            return Err(PrtError::SegmentTooSmall { parts, file_size });
        }

        let count = match mode {
            SplitMode::Parts(p) => p,
            SplitMode::Chunk(c) => file_size.div_ceil(c),
        };

        Ok(Self {
            file_size,
            segment_size,
            count,
        })
    }

    /// Byte range of part `number` (1-based).
    pub fn segment(&self, number: u64) -> Option<Segment> {
        if number == 0 || number > self.count {
            return None;
        }
        let offset = (number - 1) * self.segment_size;
        let len = if number == self.count {
            self.file_size - offset
        } else {
            self.segment_size
        };
        Some(Segment {
            number,
            offset,
            len,
        })
    }

    /// Segments in part order, computed on the fly.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        (1..=self.count).filter_map(move |number| self.segment(number))
    }
}
