use crate::{
    constants::FILTER_ID_SEPARATOR,
    core::{
        reference::{ReferenceCache, SequenceSource},
        scanner::polyx_count,
        variant::VariantRecord,
    },
    error::PolyxError,
    utils::util::{format_number_with_commas, to_info_i32, Result},
};

/// INFO and FILTER identifiers written by the annotator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolyxTags {
    info_id: String,
    threshold: Option<u32>,
    filter_id: Option<String>,
}

impl PolyxTags {
    /// A negative `threshold` disables the FILTER.
    pub fn new(tag: &str, threshold: i32) -> Result<Self> {
        let info_id = tag.trim();
        if info_id.is_empty() {
            return Err(PolyxError::EmptyTag);
        }
        let threshold = u32::try_from(threshold).ok();
        let filter_id = threshold.map(|n| format!("{info_id}{FILTER_ID_SEPARATOR}{n}"));
        Ok(Self {
            info_id: info_id.to_string(),
            threshold,
            filter_id,
        })
    }

    pub fn info_id(&self) -> &str {
        &self.info_id
    }

    pub fn threshold(&self) -> Option<u32> {
        self.threshold
    }

    pub fn filter_id(&self) -> Option<&str> {
        self.filter_id.as_deref()
    }

    pub fn exceeds_threshold(&self, count: u32) -> bool {
        self.threshold.is_some_and(|threshold| count >= threshold)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationResult {
    pub count: u32,
    pub exceeds_threshold: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnnotationStats {
    pub records: u64,
    pub annotated: u64,
    pub filtered: u64,
    pub skipped: u64,
}

impl AnnotationStats {
    pub fn log_summary(&self, contig_loads: u64) {
        log::info!(
            "Processed {} records: {} annotated, {} newly filtered, {} skipped as already filtered ({} contig loads)",
            format_number_with_commas(self.records),
            format_number_with_commas(self.annotated),
            format_number_with_commas(self.filtered),
            format_number_with_commas(self.skipped),
            format_number_with_commas(contig_loads)
        );
    }
}

/// Attaches the homopolymer run length to each record it is given.
///
/// Owns the single-slot reference cache, so two annotators never share state.
pub struct PolyxAnnotator<S: SequenceSource> {
    cache: ReferenceCache<S>,
    tags: PolyxTags,
    skip_filtered: bool,
    stats: AnnotationStats,
}

impl<S: SequenceSource> PolyxAnnotator<S> {
    pub fn new(source: S, tags: PolyxTags, skip_filtered: bool) -> Self {
        Self {
            cache: ReferenceCache::new(source),
            tags,
            skip_filtered,
            stats: AnnotationStats::default(),
        }
    }

    pub fn tags(&self) -> &PolyxTags {
        &self.tags
    }

    pub fn stats(&self) -> &AnnotationStats {
        &self.stats
    }

    pub fn cache(&self) -> &ReferenceCache<S> {
        &self.cache
    }

    /// Computes the run length for `record` without modifying it.
    pub fn evaluate<R: VariantRecord>(&mut self, record: &R) -> Result<AnnotationResult> {
        let contig_name = record.contig()?;
        let (start, end) = (record.start(), record.end());
        if start < 1 || end < start {
            return Err(PolyxError::InvalidVariantSpan {
                contig: contig_name.to_string(),
                start,
                end,
            });
        }
        let contig = self.cache.ensure_loaded(contig_name)?;
        let count = polyx_count(contig, start - 1, end - 1)?;
        Ok(AnnotationResult {
            count,
            exceeds_threshold: self.tags.exceeds_threshold(count),
        })
    }

    /// Annotates a record copy and hands it back.
    ///
    /// Records already carrying a filter are returned untouched when
    /// `skip_filtered` is set, without touching the reference.
    pub fn annotate<R: VariantRecord>(&mut self, mut record: R) -> Result<R> {
        self.stats.records += 1;
        if self.skip_filtered && record.is_filtered()? {
            self.stats.skipped += 1;
            return Ok(record);
        }

        let result = self.evaluate(&record)?;
        log::trace!(
            "{}:{}-{} {}={}",
            record.contig()?,
            record.start(),
            record.end(),
            self.tags.info_id,
            result.count
        );

        record.set_integer_attribute(
            &self.tags.info_id,
            to_info_i32(result.count, &self.tags.info_id)?,
        )?;
        self.stats.annotated += 1;

        if result.exceeds_threshold {
            if let Some(filter_id) = self.tags.filter_id.as_deref() {
                record.add_filter(filter_id)?;
                self.stats.filtered += 1;
            }
        }
        Ok(record)
    }

    /// Lazily annotates `records` in order. The first error ends the stream.
    pub fn annotate_all<I, R>(&mut self, records: I) -> AnnotatedRecords<'_, I, S>
    where
        I: Iterator<Item = Result<R>>,
        R: VariantRecord,
    {
        AnnotatedRecords {
            annotator: self,
            records,
            failed: false,
        }
    }

    pub fn close(&mut self) {
        self.cache.close();
    }
}

pub struct AnnotatedRecords<'a, I, S: SequenceSource> {
    annotator: &'a mut PolyxAnnotator<S>,
    records: I,
    failed: bool,
}

impl<I, R, S> Iterator for AnnotatedRecords<'_, I, S>
where
    I: Iterator<Item = Result<R>>,
    R: VariantRecord,
    S: SequenceSource,
{
    type Item = Result<R>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let annotated = self
            .records
            .next()?
            .and_then(|record| self.annotator.annotate(record));
        self.failed = annotated.is_err();
        Some(annotated)
    }
}

impl<I, R, S> std::iter::FusedIterator for AnnotatedRecords<'_, I, S>
where
    I: std::iter::FusedIterator<Item = Result<R>>,
    R: VariantRecord,
    S: SequenceSource,
{
}
