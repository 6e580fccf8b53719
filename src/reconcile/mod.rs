//! Multi-source forecast reconciliation engine
//!
//! Takes the heterogeneous, partially-overlapping per-provider forecasts
//! the adapters produced and reconciles them onto one day axis with
//! per-day cross-provider means:
//! - tree: generic attributed-tree normalization for tree-shaped documents
//! - frequency: representative-value selection for sub-day sampling
//! - align: unified day axis and per-day value collection
//! - aggregate: arithmetic means tolerant of missing providers

pub mod aggregate;
pub mod align;
pub mod frequency;
pub mod tree;

pub use aggregate::mean_of;
pub use align::TemperatureField;
pub use frequency::resolve_most_frequent;
pub use tree::{NormalizedNode, RawTreeNode, normalize};

use crate::models::{AggregateDay, Provider, Reconciliation};

/// Reconcile all providers' forecasts onto one unified day axis.
///
/// A deterministic, synchronous transform over already-fetched provider
/// data: the same ordered inputs always yield the same axis, means, and
/// ordering. Providers that failed upstream simply do not appear in the
/// input; an empty input yields an empty reconciliation, which is a valid
/// terminal result rather than an error. A single provider still runs the
/// full alignment and aggregation machinery so the output shape does not
/// depend on provider count.
#[must_use]
pub fn reconcile(providers: Vec<Provider>) -> Reconciliation {
    let axis = align::align(&providers);

    let mut per_day = Vec::with_capacity(axis.len());
    for day_key in &axis {
        let lows = align::collect(&providers, day_key, TemperatureField::Low);
        let highs = align::collect(&providers, day_key, TemperatureField::High);
        let weekday = align::first_reported_weekday(&providers, day_key).unwrap_or_default();

        per_day.push(AggregateDay {
            day_key: day_key.clone(),
            weekday,
            mean_low: mean_of(&lows),
            mean_high: mean_of(&highs),
            contributing_provider_count: lows.len(),
        });
    }

    Reconciliation {
        axis,
        per_day,
        per_provider: providers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Citation, DayMap, PerDayRecord};

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
    fn test_reconcile_empty_input_is_valid() {
        let result = reconcile(Vec::new());
        assert!(result.axis.is_empty());
        assert!(result.per_day.is_empty());
        assert!(result.per_provider.is_empty());
    }

    #[test]
    fn test_reconcile_single_provider_runs_full_machinery() {
        let result = reconcile(vec![provider("yahoo", &[("Mon", 60.0, 80.0)])]);

        assert_eq!(result.axis, ["Mon"]);
        assert_eq!(result.per_day.len(), 1);
        assert_eq!(result.per_day[0].mean_low, 60.0);
        assert_eq!(result.per_day[0].mean_high, 80.0);
        assert_eq!(result.per_day[0].contributing_provider_count, 1);
    }

    #[test]
    fn test_reconcile_partial_overlap() {
        let a = provider("a", &[("Mon", 60.0, 80.0), ("Tue", 62.0, 82.0), ("Wed", 64.0, 84.0)]);
        let b = provider("b", &[("Mon", 58.0, 78.0), ("Tue", 60.0, 80.0)]);
        let result = reconcile(vec![a, b]);

        assert_eq!(result.axis, ["Mon", "Tue", "Wed"]);

        let monday = &result.per_day[0];
        assert_eq!(monday.mean_low, 59.0);
        assert_eq!(monday.mean_high, 79.0);
        assert_eq!(monday.contributing_provider_count, 2);

        // Wednesday came from provider a alone; its mean is a's own value
        let wednesday = &result.per_day[2];
        assert_eq!(wednesday.mean_low, 64.0);
        assert_eq!(wednesday.mean_high, 84.0);
        assert_eq!(wednesday.contributing_provider_count, 1);
    }

    #[test]
    fn test_reconcile_axis_bounded_by_longest_provider() {
        let a = provider("a", &[("Mon", 60.0, 80.0), ("Tue", 62.0, 82.0)]);
        let b = provider("b", &[("Mon", 58.0, 78.0), ("Tue", 60.0, 80.0), ("Wed", 61.0, 81.0)]);
        let longest = a.days.len().max(b.days.len());

        let result = reconcile(vec![a, b]);
        assert!(result.axis.len() <= longest);
        for day in &result.per_day {
            assert!(day.contributing_provider_count >= 1);
            assert!(day.contributing_provider_count <= 2);
        }
    }

    #[test]
    fn test_reconcile_passes_providers_through_unchanged() {
        let mut a = provider("yr.no", &[("2012-07-14", 60.0, 80.0)]);
        a.cite = Some(Citation {
            text: "Weather forecast from yr.no".to_string(),
            url: "http://www.yr.no/".to_string(),
        });
        let expected = a.clone();

        let result = reconcile(vec![a]);
        assert_eq!(result.per_provider, vec![expected]);
    }

    #[test]
    fn test_reconcile_is_deterministic() {
        let providers = vec![
            provider("a", &[("Mon", 60.0, 80.0), ("Tue", 62.0, 82.0)]),
            provider("b", &[("Tue", 60.0, 80.0), ("Wed", 61.0, 81.0)]),
        ];

        let first = reconcile(providers.clone());
        let second = reconcile(providers);
        assert_eq!(first, second);
    }
}
