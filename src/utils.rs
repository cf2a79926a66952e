//! Small sequence and number helpers shared by the formatter, tagger and converter.

use std::ops::Range;

/// Start/end ranges of every contiguous window of `n` items in a sequence of `len`
///
/// Yields nothing when `n` is zero or larger than `len`.
pub fn overlapping(len: usize, n: usize) -> impl Iterator<Item = Range<usize>> {
    let count = if n == 0 || n > len { 0 } else { len + 1 - n };
    (0..count).map(move |start| start..start + n)
}

/// Flatten a list of lists
pub fn flatten<T>(list_of_lists: Vec<Vec<T>>) -> Vec<T> {
    list_of_lists.into_iter().flatten().collect()
}

/// Apply a series of rewrite functions to a string, in order
pub fn map_funcs(token: &str, funcs: &[fn(&str) -> String]) -> String {
    funcs.iter().fold(token.to_string(), |acc, func| func(&acc))
}

/// Round to two decimal places and render as a plain decimal string
///
/// Rounding works on the exact binary value with ties to even, so `2.675`
/// (stored just below the tie) gives `2.67` and `0.125` gives `0.12`.
/// Whole numbers keep one fractional digit: `1.0`, `0.3`, `1609.34`.
pub fn two_round(num: f64) -> String {
    let rounded: f64 = format!("{num:.2}").parse().unwrap_or(num);
    // -0.0 would print as "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let mut rendered = format!("{rounded}");
    if rounded.is_finite() && !rendered.contains('.') {
        rendered.push_str(".0");
    }
    rendered
}
