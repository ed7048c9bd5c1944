//! Order-insensitive character comparison.

use std::collections::HashMap;

/// True iff `left` and `right` contain exactly the same characters, each the
/// same number of times.
///
/// Case, whitespace and punctuation all count. Characters are Unicode scalar
/// values, not bytes or graphemes.
pub fn is_anagram(left: &str, right: &str) -> bool {
    if left.chars().count() != right.chars().count() {
        return false;
    }

    let mut remaining: HashMap<char, usize> = HashMap::new();
    for c in right.chars() {
        *remaining.entry(c).or_default() += 1;
    }

    for c in left.chars() {
        match remaining.get_mut(&c) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return false,
        }
    }

    remaining.values().all(|&count| count == 0)
}
