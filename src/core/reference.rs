//! Single-slot reference cache.
//!
//! Only one contig sequence is resident at a time. Requesting the resident
//! contig again is free; requesting any other contig replaces it.

use crate::{error::PolyxError, utils::util::Result};

/// Random access to the contigs of an indexed reference.
pub trait SequenceSource {
    fn has_contig(&self, name: &str) -> bool;

    /// Full sequence of `name`, in reference order.
    fn fetch_contig(&mut self, name: &str) -> Result<Vec<u8>>;

    /// Raised when `name` is not part of the reference.
    fn missing_contig(&self, name: &str) -> PolyxError;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceContig {
    name: String,
    sequence: Vec<u8>,
}

impl ReferenceContig {
    pub fn new(name: impl Into<String>, sequence: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            sequence,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Base at the zero-based `index`.
    pub fn char_at(&self, index: i64) -> Result<u8> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.sequence.get(i).copied())
            .ok_or_else(|| PolyxError::PositionOutOfRange {
                contig: self.name.clone(),
                index,
                length: self.sequence.len(),
            })
    }
}

pub struct ReferenceCache<S: SequenceSource> {
    source: Option<S>,
    resident: Option<ReferenceContig>,
    loads: u64,
}

impl<S: SequenceSource> ReferenceCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Some(source),
            resident: None,
            loads: 0,
        }
    }

    pub fn ensure_loaded(&mut self, name: &str) -> Result<&ReferenceContig> {
        let is_resident = self
            .resident
            .as_ref()
            .is_some_and(|contig| contig.name == name);

        if !is_resident {
            let source = self.source.as_mut().ok_or(PolyxError::ReferenceClosed)?;
            if !source.has_contig(name) {
                return Err(source.missing_contig(name));
            }
            log::info!("Loading contig {name}");
            // Drop the previous contig before fetching the next one
            self.resident = None;
            let sequence = source.fetch_contig(name)?;
            log::debug!("Loaded contig {} ({} bp)", name, sequence.len());
            self.resident = Some(ReferenceContig::new(name, sequence));
            self.loads += 1;
        }

        self.resident.as_ref().ok_or(PolyxError::ReferenceClosed)
    }

    pub fn resident(&self) -> Option<&ReferenceContig> {
        self.resident.as_ref()
    }

    /// Number of contig loads performed so far.
    pub fn loads(&self) -> u64 {
        self.loads
    }

    /// Releases the resident contig and the underlying reference handle.
    pub fn close(&mut self) {
        self.resident = None;
        if self.source.take().is_some() {
            log::debug!("Closed reference");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }
}
