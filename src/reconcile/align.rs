//! Day-axis alignment across providers
//!
//! Providers rarely agree on how many days they cover or how days are
//! keyed. The aligner builds one unified axis as a first-seen union over
//! the providers in fetch order, then collects whichever values exist for
//! a given day, skipping providers that lack it.

use crate::models::{DayKey, Provider};

/// Numeric per-day field the aggregation runs over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureField {
    Low,
    High,
}

/// Compute the unified day axis as a first-seen union.
///
/// Days reported by only one provider still appear. The axis is never
/// longer than the longest single provider's series, and its ordering
/// follows whichever provider enumerates the most days first: a
/// first-to-report-wins ordering, not a sort.
#[must_use]
pub fn align(providers: &[Provider]) -> Vec<DayKey> {
    let mut axis: Vec<DayKey> = Vec::new();
    for provider in providers {
        for day_key in provider.days.keys() {
            if !axis.contains(day_key) {
                axis.push(day_key.clone());
            }
        }
    }
    axis
}

/// Collect `(provider name, value)` pairs for one day and field.
///
/// Providers without the day are skipped, so the result has between 1 and
/// N entries for any key that came off [`align`]'s axis.
#[must_use]
pub fn collect(providers: &[Provider], day_key: &str, field: TemperatureField) -> Vec<(String, f64)> {
    providers
        .iter()
        .filter_map(|provider| {
            provider.days.get(day_key).map(|record| {
                let value = match field {
                    TemperatureField::Low => record.low,
                    TemperatureField::High => record.high,
                };
                (provider.name.clone(), value)
            })
        })
        .collect()
}

/// Weekday label from the first provider that reported the day
#[must_use]
pub fn first_reported_weekday(providers: &[Provider], day_key: &str) -> Option<String> {
    providers
        .iter()
        .find_map(|provider| provider.days.get(day_key))
        .map(|record| record.weekday.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayMap, PerDayRecord};

    fn provider(name: &str, days: &[(&str, f64, f64)]) -> Provider {
        let mut map = DayMap::new();
        for (key, low, high) in days {
            map.insert(
                (*key).to_string(),
                PerDayRecord {
                    weekday: (*key).to_string(),
                    low: *low,
                    high: *high,
                    condition: "Fair".to_string(),
                    icon: None,
                },
            );
        }
        Provider::new(name, map)
    }

    #[test]
    fn test_axis_is_first_seen_union() {
        let providers = vec![
            provider("a", &[("Mon", 60.0, 80.0), ("Tue", 61.0, 81.0), ("Wed", 62.0, 82.0)]),
            provider("b", &[("Mon", 58.0, 78.0), ("Tue", 59.0, 79.0)]),
        ];

        assert_eq!(align(&providers), ["Mon", "Tue", "Wed"]);
    }

    #[test]
    fn test_axis_follows_longest_first_reporter() {
        // the shorter provider comes first; the longer one appends its extras
        let providers = vec![
            provider("a", &[("Tue", 61.0, 81.0)]),
            provider("b", &[("Mon", 58.0, 78.0), ("Tue", 59.0, 79.0), ("Wed", 60.0, 80.0)]),
        ];

        assert_eq!(align(&providers), ["Tue", "Mon", "Wed"]);
    }

    #[test]
    fn test_axis_never_exceeds_longest_provider() {
        let providers = vec![
            provider("a", &[("Mon", 60.0, 80.0), ("Tue", 61.0, 81.0)]),
            provider("b", &[("Mon", 58.0, 78.0)]),
        ];

        let longest = providers.iter().map(|p| p.days.len()).max().unwrap();
        assert!(align(&providers).len() <= longest);
    }

    #[test]
    fn test_collect_skips_missing_providers() {
        let providers = vec![
            provider("a", &[("Mon", 60.0, 80.0), ("Wed", 62.0, 82.0)]),
            provider("b", &[("Mon", 58.0, 78.0)]),
        ];

        let lows = collect(&providers, "Mon", TemperatureField::Low);
        assert_eq!(lows, vec![("a".to_string(), 60.0), ("b".to_string(), 58.0)]);

        let highs = collect(&providers, "Wed", TemperatureField::High);
        assert_eq!(highs, vec![("a".to_string(), 82.0)]);
    }

    #[test]
    fn test_first_reported_weekday() {
        let providers = vec![
            provider("a", &[("Tue", 61.0, 81.0)]),
            provider("b", &[("Mon", 58.0, 78.0), ("Tue", 59.0, 79.0)]),
        ];

        assert_eq!(first_reported_weekday(&providers, "Mon").as_deref(), Some("Mon"));
        assert_eq!(first_reported_weekday(&providers, "Thu"), None);
    }
}
