use crate::{core::reference::ReferenceContig, utils::util::Result};

/// Counts the repeated reference bases around a variant span.
///
/// The run is measured outward from both anchors: leftward from `start0`
/// (counting the anchor itself) and rightward from `end0` (counting only the
/// bases after it). For multi-base spans the bases strictly between the two
/// anchors are never inspected, so a run interrupted inside a deletion is not
/// detected. Bases are compared case-insensitively so soft-masked sequence
/// does not break a run.
///
/// # Arguments
///
/// * `contig` - The resident reference contig.
/// * `start0` - Zero-based index of the first reference base of the variant.
/// * `end0` - Zero-based index of the last reference base of the variant.
///
/// # Returns
///
/// The run length (always >= 1), or `PositionOutOfRange` when an anchor lies
/// outside of the contig.
pub fn polyx_count(contig: &ReferenceContig, start0: i64, end0: i64) -> Result<u32> {
    let len = contig.len() as i64;
    let mut count: u32 = 1;

    // go left
    let base = contig.char_at(start0)?.to_ascii_uppercase();
    let mut pos = start0 - 1;
    while pos >= 0 && contig.char_at(pos)?.to_ascii_uppercase() == base {
        count += 1;
        pos -= 1;
    }

    // go right
    let base = contig.char_at(end0)?.to_ascii_uppercase();
    let mut pos = end0 + 1;
    while pos < len && contig.char_at(pos)?.to_ascii_uppercase() == base {
        count += 1;
        pos += 1;
    }

    Ok(count)
}
