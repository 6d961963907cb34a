use crate::types::HashMap;
use core::{hash::Hash, num::ParseIntError};
use thiserror::Error;

/// Error kind for the lesson helpers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    /// The text is not a base-10 integer that fits in an `i64`.
    #[error("{text:?} is not an integer: {source}")]
    NotAnInteger {
        text: String,
        #[source]
        source: ParseIntError,
    },
}

/// Returns the sum and the product of two integers at once.
///
/// Both wrap around on overflow instead of panicking.
#[must_use]
pub fn sum_and_product(x: i64, y: i64) -> (i64, i64) {
    (x.wrapping_add(y), x.wrapping_mul(y))
}

/// Parses base-10 text into an integer, reporting bad input instead of
/// panicking.
///
/// # Errors
/// If `text` is not an integer in `i64` range.
pub fn parse_int(text: &str) -> Result<i64, LessonError> {
    text.parse().map_err(|source| LessonError::NotAnInteger {
        text: text.to_owned(),
        source,
    })
}

/// Looks `key` up, keeping "absent" apart from a stored zero value.
#[must_use]
pub fn lookup<'a, K: Hash + Eq, V>(map: &'a HashMap<K, V>, key: &K) -> Option<&'a V> {
    map.get(key)
}

/// Appends `extra` to `base`, growing it as needed.
#[must_use]
pub fn append_all(mut base: Vec<i64>, extra: &[i64]) -> Vec<i64> {
    base.extend_from_slice(extra);
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_and_product_of_three_and_four() {
        assert_eq!(sum_and_product(3, 4), (7, 12));
    }

    #[test]
    fn sum_and_product_wrap_on_overflow() {
        assert_eq!(sum_and_product(i64::MAX, 2), (i64::MIN + 1, -2));
    }

    #[test]
    fn non_numeric_text_is_an_error() {
        let err = parse_int("non-int").unwrap_err();
        assert!(matches!(err, LessonError::NotAnInteger { ref text, .. } if text == "non-int"));
        assert_eq!(
            err.to_string(),
            "\"non-int\" is not an integer: invalid digit found in string"
        );
        assert_eq!(parse_int("-805"), Ok(-805));
    }

    #[test]
    fn missing_key_is_not_a_zero_value() {
        let map: HashMap<i32, i32> = [(3, 0), (4, 4)].into_iter().collect();
        assert_eq!(lookup(&map, &1), None);
        assert_eq!(lookup(&map, &3), Some(&0));
    }

    #[test]
    fn append_grows_the_slice() {
        let s = append_all(vec![1, 2, 3], &[4, 5, 6]);
        let s = append_all(s, &[7, 8, 9]);
        assert_eq!(s, (1..=9).collect::<Vec<_>>());
    }
}
