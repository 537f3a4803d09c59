use crate::{core::reference::SequenceSource, error::PolyxError, utils::util::Result};
use rust_htslib::faidx;
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

pub fn open_genome_reader(path: &Path) -> Result<faidx::Reader> {
    let fai_path = {
        let mut fai_path = path.as_os_str().to_os_string();
        fai_path.push(".fai");
        PathBuf::from(fai_path)
    };
    if !fai_path.exists() {
        return Err(PolyxError::MissingReferenceIndex {
            fai_path,
            reference_path: path.to_path_buf(),
        });
    }
    faidx::Reader::from_path(path).map_err(|e| PolyxError::ReferenceOpen {
        reference_path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Indexed FASTA reference, read one whole contig at a time.
pub struct FastaReference {
    reader: faidx::Reader,
    path: PathBuf,
    names: HashSet<String>,
}

impl FastaReference {
    pub fn from_path(path: &Path) -> Result<Self> {
        log::info!("Opening reference {}", path.display());
        let reader = open_genome_reader(path)?;
        let names: HashSet<String> = reader.seq_names()?.into_iter().collect();
        log::debug!("Reference {} has {} contigs", path.display(), names.len());
        Ok(Self {
            reader,
            path: path.to_path_buf(),
            names,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SequenceSource for FastaReference {
    fn has_contig(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn fetch_contig(&mut self, name: &str) -> Result<Vec<u8>> {
        let len = usize::try_from(self.reader.fetch_seq_len(name))?;
        if len == 0 {
            return Ok(Vec::new());
        }
        let sequence = self
            .reader
            .fetch_seq_string(name, 0, len - 1)
            .map_err(|e| {
                crate::polyx_error!(
                    "Failed to read contig {} from {}: {e}",
                    name,
                    self.path.display()
                )
            })?
            .into_bytes();
        if sequence.len() != len {
            return Err(crate::polyx_error!(
                "Truncated contig {} in {}: expected {} bases, read {}",
                name,
                self.path.display(),
                len,
                sequence.len()
            ));
        }
        Ok(sequence)
    }

    fn missing_contig(&self, name: &str) -> PolyxError {
        PolyxError::ContigNotFound {
            contig: name.to_string(),
            reference_path: self.path.clone(),
        }
    }
}
