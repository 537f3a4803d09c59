use crate::utils::util::Result;
use rust_htslib::bcf::{self, header::HeaderView, HeaderRecord, Read};
use std::path::{Path, PathBuf};

/// Sequential VCF/BCF reader. Records are read into a reused buffer.
pub struct VcfReader {
    pub reader: bcf::Reader,
    pub current_record: bcf::Record,
    source: String,
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

impl VcfReader {
    /// Opens `input`, or standard input when it is `None` or `-`.
    pub fn new(input: Option<&PathBuf>) -> Result<Self> {
        let (reader, source) = match input {
            Some(path) if !is_stdin(path) => {
                log::trace!("Start loading VCF {:?}", path);
                let reader = bcf::Reader::from_path(path).map_err(|e| {
                    crate::polyx_error!("Failed to open VCF file {}: {}", path.display(), e)
                })?;
                (reader, path.display().to_string())
            }
            _ => {
                log::trace!("Reading VCF from standard input");
                let reader = bcf::Reader::from_stdin()
                    .map_err(|e| crate::polyx_error!("Failed to read VCF from stdin: {}", e))?;
                (reader, "<stdin>".to_string())
            }
        };

        let current_record = reader.empty_record();
        Ok(VcfReader {
            reader,
            current_record,
            source,
        })
    }

    pub fn header(&self) -> &HeaderView {
        self.reader.header()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn advance(&mut self) -> Result<bool> {
        match self.reader.read(&mut self.current_record) {
            Some(Ok(())) => Ok(true),
            Some(Err(e)) => Err(crate::polyx_error!(
                "Error reading record from {}: {e}",
                self.source
            )),
            None => Ok(false),
        }
    }

    /// Contig names declared in the header, in header order.
    pub fn header_contigs(&self) -> Result<Vec<String>> {
        let mut contigs = Vec::new();
        for record in self.reader.header().header_records() {
            if let HeaderRecord::Contig { values, .. } = record {
                let id = values.get("ID").ok_or_else(|| {
                    crate::polyx_error!(
                        "Contig header in {} is missing required 'ID' field",
                        self.source
                    )
                })?;
                contigs.push(id.clone());
            }
        }
        Ok(contigs)
    }
}
