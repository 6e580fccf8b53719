//! Most-representative-value selection for repeatedly sampled keys

use std::fmt::Display;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::error::AvgWeatherError;
use crate::Result;

/// Collapse each key's observed values to one representative value.
///
/// The most frequent value wins when any value repeats; the first value to
/// reach the maximum count breaks ties. When every value is unique, the
/// middle element (`len / 2`, so the later middle on even lengths) is taken
/// instead, which smooths noisy sub-day sampling.
///
/// # Errors
///
/// Returns [`AvgWeatherError::EmptyObservationSet`] when a key maps to an
/// empty sequence; that means the upstream adapter recorded a key without
/// an observation.
pub fn resolve_most_frequent<K, V>(observations: IndexMap<K, Vec<V>>) -> Result<IndexMap<K, V>>
where
    K: Hash + Eq + Display,
    V: PartialEq,
{
    let mut resolved = IndexMap::with_capacity(observations.len());
    for (key, mut values) in observations {
        if values.is_empty() {
            return Err(AvgWeatherError::EmptyObservationSet {
                key: key.to_string(),
            });
        }

        let counts: Vec<usize> = values
            .iter()
            .map(|value| values.iter().filter(|other| *other == value).count())
            .collect();
        let max_count = counts.iter().copied().max().unwrap_or(1);

        let mut index = values.len() / 2;
        if max_count > 1 {
            for (i, &count) in counts.iter().enumerate() {
                if count == max_count {
                    index = i;
                    break;
                }
            }
        }

        resolved.insert(key, values.swap_remove(index));
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn observations(values: Vec<i32>) -> IndexMap<String, Vec<i32>> {
        IndexMap::from([("k".to_string(), values)])
    }

    #[rstest]
    #[case::repeat_wins(vec![1, 2, 2, 3], 2)]
    #[case::middle_of_three(vec![1, 2, 3], 2)]
    #[case::later_middle_of_four(vec![1, 2, 3, 4], 3)]
    #[case::first_max_breaks_tie(vec![3, 3, 1, 1], 3)]
    #[case::single_value(vec![7], 7)]
    fn test_resolve_cases(#[case] values: Vec<i32>, #[case] expected: i32) {
        let resolved = resolve_most_frequent(observations(values)).unwrap();
        assert_eq!(resolved["k"], expected);
    }

    #[test]
    fn test_resolve_preserves_key_order() {
        let input = IndexMap::from([
            ("2012-07-16".to_string(), vec!["Rain".to_string()]),
            ("2012-07-14".to_string(), vec!["Fair".to_string()]),
        ]);
        let resolved = resolve_most_frequent(input).unwrap();
        let keys: Vec<&String> = resolved.keys().collect();
        assert_eq!(keys, ["2012-07-16", "2012-07-14"]);
    }

    #[test]
    fn test_empty_sequence_is_an_error() {
        let result = resolve_most_frequent(observations(Vec::new()));
        assert!(matches!(
            result,
            Err(AvgWeatherError::EmptyObservationSet { key }) if key == "k"
        ));
    }
}
