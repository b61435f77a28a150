//! Ratcliff/Obershelp similarity between two strings.
//!
//! `ratio = 2 * M / T`, where `T` is the combined length of both strings and
//! `M` the number of characters covered by matching blocks. Blocks are found
//! by taking the longest common substring and recursing on the text to its
//! left and right, so the score rewards long shared runs over scattered
//! shared letters.

/// Similarity in `[0.0, 1.0]`; two empty strings are identical.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches = matching_characters(&a, &b);
    2.0 * matches as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }
    matched
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Ties go to the run starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // run[j + 1] = length of the common run ending at (i - 1, j)
    let mut run = vec![0usize; b.len() + 1];
    let mut next = vec![0usize; b.len() + 1];
    for i in alo..ahi {
        for j in blo..bhi {
            if a[i] == b[j] {
                let k = run[j] + 1;
                next[j + 1] = k;
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            } else {
                next[j + 1] = 0;
            }
        }
        std::mem::swap(&mut run, &mut next);
    }
    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn identical_and_disjoint() {
        assert!(close(ratio("kitchen", "kitchen"), 1.0));
        assert!(close(ratio("", ""), 1.0));
        assert!(close(ratio("abc", "xyz"), 0.0));
        assert!(close(ratio("abc", ""), 0.0));
    }

    #[test]
    fn known_scores() {
        // Reference values of the gestalt sequence-matcher ratio.
        assert!(close(ratio("abcd", "bcde"), 0.75));
        assert!(close(ratio("kitch", "kitchen"), 10.0 / 12.0));
        assert!(close(ratio("kitch", "den"), 0.0));
        assert!(close(ratio("livingrm", "livingroom"), 16.0 / 18.0));
    }

    #[test]
    fn recursion_counts_blocks_on_both_sides() {
        // "ab" + "x" + "cd" against "ab" + "y" + "cd": blocks "ab" and "cd".
        assert!(close(ratio("abxcd", "abycd"), 0.8));
    }

    #[test]
    fn symmetric_for_simple_inputs() {
        for (a, b) in [("bedroom", "bedrm"), ("office", "offcie"), ("den", "garden")] {
            assert!(close(ratio(a, b), ratio(b, a)), "{a} vs {b}");
        }
    }
}
