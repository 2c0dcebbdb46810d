//! # Lookup With Default
//!
//! Grouped results only hold keys that had data. These accessors make absence
//! an ordinary outcome: callers either get an `Option` or name the default that
//! stands in for a missing key.

use std::collections::BTreeMap;

/// Aggregate value per endpoint name
pub type EndpointMap<V> = BTreeMap<String, V>;

/// The value recorded for `key`, if any
pub fn lookup<'a, V>(map: &'a EndpointMap<V>, key: &str) -> Option<&'a V> {
    map.get(key)
}

/// The value recorded for `key`, or `default` when the key is absent.
///
/// The map is only borrowed, so the default is never written back into it.
/// Counts typically pass `0`; use [`get_value_or_none`] where absence should
/// read as `None`.
///
/// ```rust
/// use dashboard_insights::insights::lookup::{get_value, get_value_or_none, EndpointMap};
///
/// let mut counts: EndpointMap<i64> = EndpointMap::new();
/// counts.insert("index".to_string(), 12);
///
/// assert_eq!(get_value(&counts, "index", 0), 12);
/// assert_eq!(get_value(&counts, "login", 0), 0);
/// assert_eq!(get_value_or_none(&counts, "login"), None);
/// ```
pub fn get_value<V: Clone>(map: &EndpointMap<V>, key: &str, default: V) -> V {
    lookup(map, key).cloned().unwrap_or(default)
}

/// The value recorded for `key`, with `None` standing in for an absent key
pub fn get_value_or_none<V: Clone>(map: &EndpointMap<V>, key: &str) -> Option<V> {
    lookup(map, key).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_key_returns_default_without_inserting() {
        let mut counts: EndpointMap<i64> = EndpointMap::new();
        counts.insert("index".to_string(), 4);

        assert_eq!(get_value(&counts, "index", 0), 4);
        assert_eq!(get_value(&counts, "missing", 0), 0);
        assert_eq!(get_value(&counts, "missing", -1), -1);
        assert_eq!(counts.len(), 1);
        assert!(lookup(&counts, "missing").is_none());
    }

    #[test]
    fn test_absent_median_reads_as_none() {
        let mut medians: EndpointMap<f64> = EndpointMap::new();
        medians.insert("index".to_string(), 12.5);

        assert_eq!(get_value_or_none(&medians, "index"), Some(12.5));
        assert_eq!(get_value_or_none(&medians, "login"), None);
        assert_eq!(get_value(&medians, "login", 0.0), 0.0);
        assert_eq!(medians.len(), 1);
    }
}
