use crate::{constants::PASS_FILTER, utils::util::Result};
use rust_htslib::bcf;

/// The parts of a variant record the annotator reads and writes.
///
/// Coordinates are 1-based and inclusive.
pub trait VariantRecord {
    fn contig(&self) -> Result<&str>;

    fn start(&self) -> i64;

    fn end(&self) -> i64;

    /// True if the record carries at least one filter other than PASS.
    fn is_filtered(&self) -> Result<bool>;

    /// Sets a single-valued integer attribute, replacing any previous value.
    fn set_integer_attribute(&mut self, key: &str, value: i32) -> Result<()>;

    fn add_filter(&mut self, filter: &str) -> Result<()>;
}

/// `bcf::Record` accessors. The record must be unpacked before `is_filtered`
/// is called, and must be bound to a header that defines any attribute or
/// filter pushed into it.
impl VariantRecord for bcf::Record {
    fn contig(&self) -> Result<&str> {
        let rid = self
            .rid()
            .ok_or_else(|| crate::polyx_error!("VCF record has no contig"))?;
        let name = self.header().rid2name(rid)?;
        Ok(std::str::from_utf8(name)?)
    }

    fn start(&self) -> i64 {
        self.pos() + 1
    }

    fn end(&self) -> i64 {
        bcf::Record::end(self)
    }

    fn is_filtered(&self) -> Result<bool> {
        let header = self.header();
        Ok(self
            .filters()
            .any(|id| header.id_to_name(id).as_slice() != PASS_FILTER))
    }

    fn set_integer_attribute(&mut self, key: &str, value: i32) -> Result<()> {
        self.push_info_integer(key.as_bytes(), &[value])
            .map_err(|e| crate::polyx_error!("Failed to set INFO/{key}: {e}"))
    }

    fn add_filter(&mut self, filter: &str) -> Result<()> {
        self.push_filter(filter.as_bytes())
            .map_err(|e| crate::polyx_error!("Failed to add FILTER {filter}: {e}"))
    }
}
