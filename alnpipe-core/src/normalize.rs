//! Gap normalization and edge trimming of alignment records.
//!
//! Normalization rewrites an alignment so that mismatches become explicit
//! indel pairs and, optionally, gap runs sit in a canonical rightmost
//! position. The underlying base content of both sequences is never changed,
//! only the gap placement.

use crate::types::Alignment;

const GAP: u8 = b'-';

/// Produces a new record whose aligned strings represent the same alignment
/// with every mismatch expanded into a query-gap column followed by a
/// target-gap column, and all gap/gap columns removed. With `push` set, gap
/// runs are additionally pushed rightward when the run is terminated by a
/// base matching the opposite string at the gap position.
///
/// Identifying fields are copied unchanged.
///
/// # Panics
/// Panics if the aligned strings differ in length; that is a broken record,
/// not a recoverable condition.
pub fn normalize_gaps(aln: &Alignment, push: bool) -> Alignment {
    let qlen = aln.query_aligned.len();
    assert_eq!(
        qlen,
        aln.target_aligned.len(),
        "aligned strings must have equal length"
    );

    let mut q_norm: Vec<u8> = Vec::with_capacity(qlen + 100);
    let mut t_norm: Vec<u8> = Vec::with_capacity(qlen + 100);

    // convert mismatches to indels
    for (&qb, &tb) in aln
        .query_aligned
        .as_bytes()
        .iter()
        .zip(aln.target_aligned.as_bytes())
    {
        if qb != tb && qb != GAP && tb != GAP {
            q_norm.push(GAP);
            q_norm.push(qb);
            t_norm.push(tb);
            t_norm.push(GAP);
        } else {
            q_norm.push(qb);
            t_norm.push(tb);
        }
    }

    if push {
        push_gaps_right(&mut q_norm, &mut t_norm);
    }

    // drop columns that are gap on both sides
    let mut query_aligned = String::with_capacity(q_norm.len());
    let mut target_aligned = String::with_capacity(t_norm.len());
    for (&qb, &tb) in q_norm.iter().zip(&t_norm) {
        if qb != GAP || tb != GAP {
            query_aligned.push(qb as char);
            target_aligned.push(tb as char);
        }
    }

    Alignment {
        query_aligned,
        target_aligned,
        ..aln.clone()
    }
}

/// Pushes gaps rightward, but not past the end. A gap swaps with the first
/// base terminating its run only when that base equals the opposite string's
/// character at the gap position, so the multiset of aligned bases is
/// preserved. Heuristic tie-break between equivalent gap placements, not a
/// correctness requirement.
fn push_gaps_right(q_norm: &mut [u8], t_norm: &mut [u8]) {
    let len = q_norm.len();
    if len == 0 {
        return;
    }
    for i in 0..len - 1 {
        // pushing target gaps
        if t_norm[i] == GAP {
            let mut j = i + 1;
            while j < len && t_norm[j] == GAP {
                j += 1;
            }
            if j < len && t_norm[j] == q_norm[i] {
                t_norm[i] = t_norm[j];
                t_norm[j] = GAP;
            }
        }

        // pushing query gaps
        if q_norm[i] == GAP {
            let mut j = i + 1;
            while j < len && q_norm[j] == GAP {
                j += 1;
            }
            if j < len && q_norm[j] == t_norm[i] {
                q_norm[i] = q_norm[j];
                q_norm[j] = GAP;
            }
        }
    }
}

/// Removes `trim_len` aligned (non-gap) target bases from each end of a
/// record, sliding the aligned-string window inward and advancing `start` by
/// the left-trimmed count. Returns the trimmed record.
///
/// # Panics
/// Panics if the aligned target carries fewer than `2 * trim_len` non-gap
/// bases; the caller must check before trimming that tightly.
pub fn trim_edges(aln: &Alignment, trim_len: usize) -> Alignment {
    let tstr = aln.target_aligned.as_bytes();
    let aligned_bases = tstr.iter().filter(|&&c| c != GAP).count();
    assert!(
        aligned_bases >= 2 * trim_len,
        "cannot trim {trim_len} bases from each end of a {aligned_bases}-base aligned target"
    );

    let mut left = 0usize;
    let mut bases = 0usize;
    while bases < trim_len {
        if tstr[left] != GAP {
            bases += 1;
        }
        left += 1;
    }

    let mut right = tstr.len();
    bases = 0;
    while bases < trim_len {
        right -= 1;
        if tstr[right] != GAP {
            bases += 1;
        }
    }

    let mut trimmed = aln.clone();
    trimmed.start += trim_len as u64;
    trimmed.query_aligned = aln.query_aligned[left..right].to_string();
    trimmed.target_aligned = aln.target_aligned[left..right].to_string();
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Strand;

    fn record(qstr: &str, tstr: &str) -> Alignment {
        Alignment {
            target_id: "ref1".to_string(),
            source_id: "read1".to_string(),
            target_len: 1000,
            start: 101,
            end: None,
            strand: Strand::Forward,
            query_aligned: qstr.to_string(),
            target_aligned: tstr.to_string(),
        }
    }

    fn ungapped(s: &str) -> String {
        s.chars().filter(|&c| c != '-').collect()
    }

    #[test]
    fn test_mismatch_becomes_indel_pair() {
        let aln = record("ACGT", "AGGT");
        let norm = normalize_gaps(&aln, false);
        assert_eq!(norm.query_aligned, "A-CGT");
        assert_eq!(norm.target_aligned, "AG-GT");
    }

    #[test]
    fn test_identifying_fields_are_copied() {
        let aln = record("ACGT", "AGGT");
        let norm = normalize_gaps(&aln, true);
        assert_eq!(norm.target_id, aln.target_id);
        assert_eq!(norm.source_id, aln.source_id);
        assert_eq!(norm.target_len, aln.target_len);
        assert_eq!(norm.start, aln.start);
        assert_eq!(norm.strand, aln.strand);
    }

    #[test]
    fn test_lengths_stay_equal_and_no_double_gap_columns() {
        let aln = record("AC-GTACGT", "ACGG-AGGT");
        for push in [false, true] {
            let norm = normalize_gaps(&aln, push);
            assert_eq!(norm.query_aligned.len(), norm.target_aligned.len());
            let double_gap = norm
                .query_aligned
                .bytes()
                .zip(norm.target_aligned.bytes())
                .any(|(q, t)| q == b'-' && t == b'-');
            assert!(!double_gap);
        }
    }

    #[test]
    fn test_base_content_is_preserved() {
        let aln = record("AC-GTACGT", "ACGG-AGGT");
        for push in [false, true] {
            let norm = normalize_gaps(&aln, push);
            assert_eq!(ungapped(&norm.query_aligned), ungapped(&aln.query_aligned));
            assert_eq!(ungapped(&norm.target_aligned), ungapped(&aln.target_aligned));
        }
    }

    #[test]
    fn test_idempotent_without_push() {
        let aln = record("ACGTAC-T", "AGGTACGT");
        let once = normalize_gaps(&aln, false);
        let twice = normalize_gaps(&once, false);
        assert_eq!(once.query_aligned, twice.query_aligned);
        assert_eq!(once.target_aligned, twice.target_aligned);
    }

    #[test]
    fn test_push_moves_gap_past_matching_run() {
        // target gap run terminated by a base matching the query at the gap
        let aln = record("AAAT", "A-AT");
        let norm = normalize_gaps(&aln, true);
        // the A terminating the run slides left into the gap position
        assert_eq!(norm.query_aligned, "AAAT");
        assert_eq!(norm.target_aligned, "AA-T");
    }

    #[test]
    fn test_push_leaves_non_matching_run_alone() {
        let aln = record("ACGT", "A-GT");
        let norm = normalize_gaps(&aln, true);
        assert_eq!(norm.target_aligned, "A-GT");
    }

    #[test]
    fn test_empty_alignment() {
        let aln = record("", "");
        let norm = normalize_gaps(&aln, true);
        assert_eq!(norm.query_aligned, "");
        assert_eq!(norm.target_aligned, "");
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_unequal_lengths_panic() {
        let aln = record("ACGT", "ACG");
        normalize_gaps(&aln, false);
    }

    #[test]
    fn test_trim_counts_only_aligned_bases() {
        let aln = record("ACGTACGT", "A-GTACG-");
        // target has 6 aligned bases: A G T A C G
        let trimmed = trim_edges(&aln, 2);
        // left: consume A (idx 0) and G (idx 2) -> window starts at 3
        // right: consume G (idx 6) and C (idx 5) -> window ends at 5
        assert_eq!(trimmed.target_aligned, "TA");
        assert_eq!(trimmed.query_aligned, "TA");
        assert_eq!(trimmed.start, 103);
    }

    #[test]
    fn test_trim_zero_is_identity() {
        let aln = record("ACGT", "ACGT");
        let trimmed = trim_edges(&aln, 0);
        assert_eq!(trimmed, aln);
    }

    #[test]
    fn test_trim_exact_capacity_leaves_gap_only_window() {
        let aln = record("ACA", "A-A");
        let trimmed = trim_edges(&aln, 1);
        assert_eq!(trimmed.target_aligned, "-");
        assert_eq!(trimmed.query_aligned, "C");
        assert_eq!(trimmed.start, 102);
    }

    #[test]
    #[should_panic(expected = "cannot trim")]
    fn test_trim_beyond_aligned_span_panics() {
        let aln = record("ACG", "AC-");
        trim_edges(&aln, 2);
    }
}
