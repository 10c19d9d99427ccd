//! Nucleotide sequence helpers.

/// Reverse complement of a nucleotide sequence.
///
/// `A/C/G/T` are complemented (either case); any other character, such as `N`
/// or the gap symbol `-`, passes through unchanged but still participates in
/// the reversal.
pub fn reverse_complement(seq: &str) -> String {
    seq.chars().rev().map(complement).collect()
}

fn complement(c: char) -> char {
    match c {
        'A' => 'T',
        'T' => 'A',
        'G' => 'C',
        'C' => 'G',
        'a' => 't',
        't' => 'a',
        'g' => 'c',
        'c' => 'g',
        _ => c,
    }
}
