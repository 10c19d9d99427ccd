use serde::{Deserialize, Serialize};
use std::fmt;

/// Strand of an alignment relative to the forward reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
}

impl From<Strand> for char {
    fn from(strand: Strand) -> Self {
        match strand {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

/// Whether alignments are keyed by target sequence or by query sequence for
/// downstream aggregation. Selects which ids, coordinates, and aligned-string
/// roles an m5 line contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupBy {
    Target,
    Query,
}

/// One pairwise alignment between a query and a target sequence region.
///
/// `query_aligned` and `target_aligned` are equal-length strings over
/// `{A,C,G,T,N,-}` where `-` is a gap. `start` is 1-based inclusive on the
/// target; `end` is only populated by formats that carry it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    /// Id the record is grouped under (target id, or base query id when
    /// grouping by query).
    pub target_id: String,
    /// Raw id of the source read, as read from the input.
    pub source_id: String,
    /// Total length of the target sequence, not just the aligned span.
    pub target_len: u64,
    pub start: u64,
    pub end: Option<u64>,
    pub strand: Strand,
    pub query_aligned: String,
    pub target_aligned: String,
}

impl Alignment {
    /// Number of non-gap characters in the aligned target string, i.e. the
    /// length of the aligned span on the target.
    pub fn target_span(&self) -> u64 {
        self.target_aligned.bytes().filter(|&c| c != b'-').count() as u64
    }

    /// Renders the record as one `pre`-format line: sourceId, targetId,
    /// strand, targetLength, start, end, queryAligned, targetAligned.
    ///
    /// When `end` was not carried by the input format it is derived from
    /// `start` plus the aligned target span.
    pub fn to_pre_line(&self) -> String {
        let end = self
            .end
            .unwrap_or_else(|| self.start + self.target_span().saturating_sub(1));
        format!(
            "{} {} {} {} {} {} {} {}",
            self.source_id,
            self.target_id,
            self.strand,
            self.target_len,
            self.start,
            end,
            self.query_aligned,
            self.target_aligned,
        )
    }
}

fn head50(s: &str) -> &str {
    &s[..s.len().min(50)]
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "target: {}, query: {}, start: {}, end: {}, length: {}",
            self.target_id,
            self.source_id,
            self.start,
            self.end.unwrap_or(0),
            self.target_len
        )?;
        writeln!(f, "tstr(50): {}", head50(&self.target_aligned))?;
        writeln!(f, "qstr(50): {}", head50(&self.query_aligned))
    }
}
