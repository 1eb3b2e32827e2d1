//! Similarity strategies behind the weighted ratio
//!
//! Every score is on a 0-100 scale. The building block is the normalized
//! indel similarity (`ratio`); the partial and token variants reuse it on
//! windows and re-ordered token strings, and `weighted_ratio` picks the
//! best of them with length-dependent scaling.
//!
//! Inputs are expected to be processed with [`process`] first.

use std::collections::BTreeSet;

use rapidfuzz::distance::indel;

/// Scale applied to token-based and partial scores in the weighted ratio
const UNBASE_SCALE: f64 = 0.95;

/// Normalize a string for comparison: lowercase, non-alphanumerics become
/// spaces, surrounding whitespace trimmed.
pub fn process(s: &str) -> String {
    let mapped: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .flat_map(char::to_lowercase)
        .collect();
    mapped.trim().to_string()
}

fn tokens(s: &str) -> BTreeSet<&str> {
    s.split_whitespace().collect()
}

fn sorted_join(s: &str) -> String {
    let mut words: Vec<&str> = s.split_whitespace().collect();
    words.sort_unstable();
    words.join(" ")
}

fn join_parts(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{} {}", head, tail),
    }
}

/// Normalized indel similarity: `2 * LCS / (|a| + |b|) * 100`
pub fn ratio(a: &str, b: &str) -> f64 {
    100.0 * indel::normalized_similarity(a.chars(), b.chars())
}

/// Best `ratio` of the shorter string against every window of the longer
/// string with the same length.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }

    let mut best = 0.0f64;
    for window in long.windows(short.len()) {
        let score =
            100.0 * indel::normalized_similarity(short.iter().copied(), window.iter().copied());
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}

/// `ratio` after sorting the whitespace-separated tokens of both sides
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_join(a), &sorted_join(b))
}

/// Compares the shared tokens against each side's shared-plus-remaining
/// tokens. A side whose tokens are a subset of the other scores 100.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let ta = tokens(a);
    let tb = tokens(b);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }

    let sect: Vec<&str> = ta.intersection(&tb).copied().collect();
    let diff_ab: Vec<&str> = ta.difference(&tb).copied().collect();
    let diff_ba: Vec<&str> = tb.difference(&ta).copied().collect();

    if !sect.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let sect = sect.join(" ");
    let combined_ab = join_parts(&sect, &diff_ab.join(" "));
    let combined_ba = join_parts(&sect, &diff_ba.join(" "));

    let mut best = ratio(&combined_ab, &combined_ba);
    if !sect.is_empty() {
        best = best
            .max(ratio(&sect, &combined_ab))
            .max(ratio(&sect, &combined_ba));
    }
    best
}

/// Partial ratio over sorted tokens; any shared token scores 100
pub fn partial_token_ratio(a: &str, b: &str) -> f64 {
    let ta = tokens(a);
    let tb = tokens(b);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }
    if ta.intersection(&tb).next().is_some() {
        return 100.0;
    }
    partial_ratio(&sorted_join(a), &sorted_join(b))
}

/// Weighted combination of the strategies above.
///
/// Strings of similar length are compared whole (plain and token-based).
/// Once one side is at least 1.5x longer, partial comparisons take over,
/// scaled down further when the length ratio reaches 8.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;
    let end_ratio = ratio(a, b);

    if len_ratio < 1.5 {
        let token_ratio = token_sort_ratio(a, b).max(token_set_ratio(a, b));
        return end_ratio.max(token_ratio * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
    let end_ratio = end_ratio.max(partial_ratio(a, b) * partial_scale);
    end_ratio.max(partial_token_ratio(a, b) * UNBASE_SCALE * partial_scale)
}
