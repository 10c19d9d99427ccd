//! Parser for the pre format: eight whitespace-delimited columns in fixed
//! order, sourceId targetId strand targetLength start end queryAligned
//! targetAligned. Strings are stored exactly as given; strand carries no
//! reverse-complement semantics here.

use super::{field, numeric, strand, ParseError};
use crate::types::Alignment;

pub(super) fn parse(fields: &[&str]) -> Result<Alignment, ParseError> {
    Ok(Alignment {
        source_id: field(fields, 0, "source id")?.to_string(),
        target_id: field(fields, 1, "target id")?.to_string(),
        strand: strand(fields, 2)?,
        target_len: numeric(fields, 3, "target length")?,
        start: numeric(fields, 4, "start")?,
        end: Some(numeric(fields, 5, "end")?),
        query_aligned: field(fields, 6, "aligned query")?.to_string(),
        target_aligned: field(fields, 7, "aligned target")?.to_string(),
    })
}
