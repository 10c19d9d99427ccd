//! Parser for the blasr m5 format.
//!
//! m5 rows are whitespace-delimited with fixed column positions: query id at
//! column 0, query length/start/end at 1-3, target id/length/start/end at
//! 5-8, target strand at 9, aligned query string at 16 and aligned target
//! string at 18. The aligned target is stored reverse complemented relative
//! to the forward strand.

use super::{field, numeric, strand, ParseError};
use crate::seq::reverse_complement;
use crate::types::{Alignment, GroupBy, Strand};

/// Base query id without the trailing `/<coordinates>` suffix, used to group
/// alignments by query.
fn base_query_id(id: &str) -> &str {
    match id.rfind('/') {
        Some(pos) => &id[..pos],
        None => id,
    }
}

pub(super) fn parse(fields: &[&str], group_by: GroupBy) -> Result<Alignment, ParseError> {
    let source_id = field(fields, 0, "query id")?.to_string();
    let strand = strand(fields, 9)?;

    let (target_id, target_len, start) = match group_by {
        GroupBy::Target => (
            field(fields, 5, "target id")?.to_string(),
            numeric(fields, 6, "target length")?,
            numeric::<u64>(fields, 7, "target start")?,
        ),
        GroupBy::Query => (
            base_query_id(&source_id).to_string(),
            numeric(fields, 1, "query length")?,
            numeric::<u64>(fields, 2, "query start")?,
        ),
    };

    let query_col = field(fields, 16, "aligned query")?;
    let target_col = field(fields, 18, "aligned target")?;

    let (query_aligned, target_aligned) = match group_by {
        // The target is always stored reversed; flip both strings back onto
        // the forward strand when correcting targets.
        GroupBy::Target if strand == Strand::Reverse => (
            reverse_complement(query_col),
            reverse_complement(target_col),
        ),
        GroupBy::Target => (query_col.to_string(), target_col.to_string()),
        // Grouping by query swaps the aligned-string roles, unmodified.
        GroupBy::Query => (target_col.to_string(), query_col.to_string()),
    };

    Ok(Alignment {
        target_id,
        source_id,
        target_len,
        // input start is 0-based, stored 1-based
        start: start + 1,
        end: None,
        strand,
        query_aligned,
        target_aligned,
    })
}
