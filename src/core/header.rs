use crate::{
    cli::FULL_VERSION,
    constants::{FILTER_DESCRIPTION_PREFIX, INFO_DESCRIPTION},
    core::annotator::PolyxTags,
    utils::util::Result,
};
use rust_htslib::bcf::{self, header::HeaderView, HeaderRecord};
use std::env;

/// Builds the output header from the input header.
///
/// Adds the INFO definition for the run length and, when a threshold is set,
/// the FILTER definition for records reaching it. An INFO definition already
/// using the tag is replaced. The input header is left untouched.
pub fn augment_header(template: &HeaderView, tags: &PolyxTags) -> Result<bcf::Header> {
    let mut out_header = bcf::Header::from_template(template);
    if let Some(existing) = existing_info_definition(template, tags.info_id()) {
        log::warn!(
            "INFO/{} is already defined in the input header ({}), replacing the definition and overwriting values",
            tags.info_id(),
            existing
        );
        out_header.remove_info(tags.info_id().as_bytes());
    }
    let info_line = format!(
        r#"##INFO=<ID={},Number=1,Type=Integer,Description="{}">"#,
        tags.info_id(),
        INFO_DESCRIPTION
    );
    out_header.push_record(info_line.as_bytes());

    if let (Some(filter_id), Some(threshold)) = (tags.filter_id(), tags.threshold()) {
        let filter_line = format!(
            r#"##FILTER=<ID={},Description="{} {}">"#,
            filter_id, FILTER_DESCRIPTION_PREFIX, threshold
        );
        out_header.push_record(filter_line.as_bytes());
    }
    Ok(out_header)
}

fn existing_info_definition(template: &HeaderView, info_id: &str) -> Option<String> {
    template.header_records().into_iter().find_map(|record| match record {
        HeaderRecord::Info { values, .. } if values.get("ID").map(String::as_str) == Some(info_id) => {
            Some(format!(
                "Number={},Type={}",
                values.get("Number").map_or(".", String::as_str),
                values.get("Type").map_or(".", String::as_str)
            ))
        }
        _ => None,
    })
}

pub fn add_version_info(out_header: &mut bcf::Header) {
    let version_line = format!("##{}Version={}", env!("CARGO_PKG_NAME"), *FULL_VERSION);
    out_header.push_record(version_line.as_bytes());

    let command_line = env::args().collect::<Vec<String>>().join(" ");
    let command_line = format!("##{}Command={}", env!("CARGO_PKG_NAME"), command_line);
    out_header.push_record(command_line.as_bytes());
}
