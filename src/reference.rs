//! Full rectangular-table LCS, used to cross-check the wavefront.
//!
//! Rows follow the first input and columns the second. The backtrack breaks
//! ties on a mismatch by stepping back along the first input, the same
//! preference the wavefront backtracker applies in original orientation, so
//! both return the same witness.

use crate::backtrack::Lcs;

/// LCS of `first` and `second` with an `(n+1) x (m+1)` table.
pub fn full_table_lcs(first: &[u8], second: &[u8]) -> Lcs {
    let n = first.len();
    let m = second.len();
    let mut dp = vec![vec![0u32; m + 1]; n + 1];
    for i in 1..=n {
        for j in 1..=m {
            dp[i][j] = if first[i - 1] == second[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }

    let length = dp[n][m] as usize;
    let mut out = Vec::with_capacity(length);
    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        if first[i - 1] == second[j - 1] {
            out.push(first[i - 1]);
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] == dp[i][j] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    out.reverse();

    Lcs {
        length,
        subsequence: out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_cases() {
        assert_eq!(full_table_lcs(b"", b""), Lcs::empty());
        assert_eq!(full_table_lcs(b"A", b"B").length, 0);
        assert_eq!(full_table_lcs(b"A", b"A").subsequence, b"A".to_vec());
        assert_eq!(full_table_lcs(b"GAC", b"AGCAT").subsequence, b"GA".to_vec());
        assert_eq!(full_table_lcs(b"AGCAT", b"GAC").subsequence, b"AC".to_vec());
    }

    #[test]
    fn long_example_length() {
        let s = b"ACCGGTCGAGTGCGCGGAAGCCGGCCGAA";
        let t = b"GTCGTTCGGAATGCCGTTGCTCTGTAAA";
        let lcs = full_table_lcs(s, t);
        assert_eq!(lcs.length, 20);
        assert_eq!(lcs.subsequence.len(), 20);
    }
}
