use crate::{
    cli::PolyxArgs,
    constants::PROGRESS_INTERVAL,
    core::{
        annotator::{PolyxAnnotator, PolyxTags},
        header::{add_version_info, augment_header},
        reference::SequenceSource,
        variant::VariantRecord,
    },
    io::{readers::FastaReference, vcf_reader::VcfReader, vcf_writer::VcfWriter},
    utils::util::{format_number_with_commas, Result},
};
use std::{cell::RefCell, iter};

#[cfg(test)]
mod tests;

fn warn_missing_contigs(vcf_reader: &VcfReader, reference: &FastaReference) -> Result<()> {
    let missing: Vec<String> = vcf_reader
        .header_contigs()?
        .into_iter()
        .filter(|contig| !reference.has_contig(contig))
        .collect();
    if !missing.is_empty() {
        log::warn!(
            "{} contig(s) declared in {} are absent from reference {}: {:?}",
            missing.len(),
            vcf_reader.source(),
            reference.path().display(),
            missing
        );
    }
    Ok(())
}

pub fn annotate(args: PolyxArgs) -> Result<()> {
    let tags = PolyxTags::new(&args.tag, args.threshold)?;
    log::debug!(
        "INFO tag: {}, FILTER: {}",
        tags.info_id(),
        tags.filter_id().unwrap_or("disabled")
    );

    let reference = FastaReference::from_path(&args.reference)?;
    let mut vcf_reader = VcfReader::new(args.input.as_ref())?;
    warn_missing_contigs(&vcf_reader, &reference)?;

    let mut out_header = augment_header(vcf_reader.header(), &tags)?;
    if !args.no_version {
        add_version_info(&mut out_header);
    }
    let writer = RefCell::new(VcfWriter::new(
        &out_header,
        &args.output_type,
        args.output.as_ref(),
    )?);

    // Each record is copied out of the reader buffer and moved to the output header
    let records = iter::from_fn(|| match vcf_reader.advance() {
        Ok(true) => {
            let mut record = vcf_reader.current_record.clone();
            record.unpack();
            writer.borrow_mut().translate(&mut record);
            Some(Ok(record))
        }
        Ok(false) => None,
        Err(e) => Some(Err(e)),
    });

    let mut annotator = PolyxAnnotator::new(reference, tags, args.skip_filtered);
    let mut processed: u64 = 0;
    for record in annotator.annotate_all(records) {
        let record = record?;
        writer.borrow_mut().write(&record)?;

        processed += 1;
        if processed % PROGRESS_INTERVAL == 0 {
            log::info!(
                "Processed {} records, at {}:{}",
                format_number_with_commas(processed),
                record.contig()?,
                record.start()
            );
        }
    }

    annotator
        .stats()
        .log_summary(annotator.cache().loads());
    log::debug!(
        "Wrote {} records",
        format_number_with_commas(writer.borrow().written())
    );
    annotator.close();
    Ok(())
}
