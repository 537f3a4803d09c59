use crate::{
    core::{reference::SequenceSource, variant::VariantRecord},
    error::PolyxError,
    utils::util::Result,
};
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fs,
    path::PathBuf,
};
use tempfile::TempDir;

pub fn make_temp_vcf(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let path = dir.path().join("input.vcf");
    fs::write(&path, contents).expect("test VCF should be writable");
    (dir, path)
}

/// Writes a single-line-per-contig FASTA and its `.fai` into `dir`.
pub fn write_indexed_fasta(dir: &TempDir, contigs: &[(&str, &str)]) -> PathBuf {
    let path = dir.path().join("reference.fa");
    let mut fasta = String::new();
    let mut fai = String::new();
    for (name, seq) in contigs {
        fasta.push_str(&format!(">{name}\n"));
        let offset = fasta.len();
        fasta.push_str(seq);
        fasta.push('\n');
        fai.push_str(&format!(
            "{name}\t{}\t{offset}\t{}\t{}\n",
            seq.len(),
            seq.len(),
            seq.len() + 1
        ));
    }
    fs::write(&path, fasta).expect("test FASTA should be writable");
    fs::write(dir.path().join("reference.fa.fai"), fai).expect("test FAI should be writable");
    path
}

pub struct MemoryReference {
    contigs: HashMap<String, Vec<u8>>,
    fetches: usize,
}

impl MemoryReference {
    pub fn new(contigs: &[(&str, &str)]) -> Self {
        Self {
            contigs: contigs
                .iter()
                .map(|(name, seq)| (name.to_string(), seq.as_bytes().to_vec()))
                .collect(),
            fetches: 0,
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches
    }
}

impl SequenceSource for MemoryReference {
    fn has_contig(&self, name: &str) -> bool {
        self.contigs.contains_key(name)
    }

    fn fetch_contig(&mut self, name: &str) -> Result<Vec<u8>> {
        self.fetches += 1;
        self.contigs
            .get(name)
            .cloned()
            .ok_or_else(|| self.missing_contig(name))
    }

    fn missing_contig(&self, name: &str) -> PolyxError {
        PolyxError::ContigNotFound {
            contig: name.to_string(),
            reference_path: PathBuf::from("<memory>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestVariant {
    pub contig: String,
    pub start: i64,
    pub end: i64,
    pub filters: BTreeSet<String>,
    pub info: BTreeMap<String, Option<String>>,
}

impl TestVariant {
    pub fn new(contig: &str, start: i64, reference: &str) -> Self {
        Self {
            contig: contig.to_string(),
            start,
            end: start + reference.len() as i64 - 1,
            filters: BTreeSet::new(),
            info: BTreeMap::new(),
        }
    }

    pub fn with_filter(mut self, filter: &str) -> Self {
        self.filters.insert(filter.to_string());
        self
    }

    pub fn with_info(mut self, key: &str, value: Option<&str>) -> Self {
        self.info.insert(key.to_string(), value.map(str::to_string));
        self
    }

    pub fn info_integer(&self, key: &str) -> Option<i32> {
        self.info
            .get(key)
            .and_then(|value| value.as_deref())
            .and_then(|value| value.parse().ok())
    }
}

impl VariantRecord for TestVariant {
    fn contig(&self) -> Result<&str> {
        Ok(&self.contig)
    }

    fn start(&self) -> i64 {
        self.start
    }

    fn end(&self) -> i64 {
        self.end
    }

    fn is_filtered(&self) -> Result<bool> {
        Ok(self.filters.iter().any(|f| f != "PASS"))
    }

    fn set_integer_attribute(&mut self, key: &str, value: i32) -> Result<()> {
        self.info.insert(key.to_string(), Some(value.to_string()));
        Ok(())
    }

    fn add_filter(&mut self, filter: &str) -> Result<()> {
        self.filters.remove("PASS");
        self.filters.insert(filter.to_string());
        Ok(())
    }
}
