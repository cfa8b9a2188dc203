use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::Result;

pub const LEGACY_NAMESPACE_PREFIX: &str = "__namespaced_";

/// Splits `namespace.sub.key` on the first dot. Any key containing a dot
/// is namespaced, even when one side of the dot is empty.
pub fn split_namespaced_key(key: &str) -> Option<(&str, &str)> {
    key.split_once('.')
}

/// Settings grouped by the first dot-delimited segment of their key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NamespacedSettings(BTreeMap<String, BTreeMap<String, String>>);

impl NamespacedSettings {
    pub fn from_flat(flat: &BTreeMap<String, String>) -> Self {
        let mut groups: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

        for (key, value) in flat {
            if let Some((namespace, sub_key)) = split_namespaced_key(key) {
                groups
                    .entry(namespace.to_string())
                    .or_default()
                    .insert(sub_key.to_string(), value.clone());
            }
        }

        Self(groups)
    }

    pub fn get(&self, namespace: &str) -> Option<&BTreeMap<String, String>> {
        self.0.get(namespace)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, String>)> {
        self.0.iter().map(|(name, group)| (name.as_str(), group))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encodes each namespace as `__namespaced_<namespace>` holding a JSON
    /// object, for consumers that only read a flat mapping.
    pub fn to_legacy_entries(&self) -> Result<BTreeMap<String, String>> {
        self.0
            .iter()
            .map(|(namespace, group)| -> Result<(String, String)> {
                let encoded = serde_json::to_string(group)?;
                Ok((format!("{}{}", LEGACY_NAMESPACE_PREFIX, namespace), encoded))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_groups_dotted_keys() {
        let settings = flat(&[("openai.key", "abc"), ("openai.model", "gpt"), ("plain", "x")]);

        let namespaced = NamespacedSettings::from_flat(&settings);

        assert_eq!(namespaced.len(), 1);
        let openai = namespaced.get("openai").unwrap();
        assert_eq!(openai, &flat(&[("key", "abc"), ("model", "gpt")]));
        assert!(namespaced.get("plain").is_none());
    }

    #[test]
    fn test_only_first_dot_separates_namespace() {
        assert_eq!(split_namespaced_key("a.b.c"), Some(("a", "b.c")));

        let namespaced = NamespacedSettings::from_flat(&flat(&[("a.b.c", "v")]));
        assert_eq!(namespaced.get("a"), Some(&flat(&[("b.c", "v")])));
    }

    #[test]
    fn test_empty_segments_are_still_namespaced() {
        assert_eq!(split_namespaced_key("plain"), None);
        assert_eq!(split_namespaced_key(".hidden"), Some(("", "hidden")));
        assert_eq!(split_namespaced_key("trailing."), Some(("trailing", "")));

        let namespaced = NamespacedSettings::from_flat(&flat(&[("foo.", "v")]));
        assert_eq!(namespaced.get("foo"), Some(&flat(&[("", "v")])));
    }

    #[test]
    fn test_every_inner_key_maps_back_to_flat_key() {
        let settings = flat(&[
            ("db.host", "localhost"),
            ("db.pool.size", "4"),
            ("cache.ttl", "60"),
            ("PORT", "3002"),
        ]);

        let namespaced = NamespacedSettings::from_flat(&settings);

        for (namespace, group) in namespaced.iter() {
            for (sub_key, value) in group {
                let flat_key = format!("{}.{}", namespace, sub_key);
                assert_eq!(settings.get(&flat_key), Some(value));
            }
        }
        assert_eq!(namespaced.names().collect::<Vec<_>>(), vec!["cache", "db"]);
    }

    #[test]
    fn test_legacy_entries_are_json_objects() {
        let namespaced =
            NamespacedSettings::from_flat(&flat(&[("openai.key", "abc"), ("openai.model", "gpt")]));

        let legacy = namespaced.to_legacy_entries().unwrap();

        let encoded = legacy.get("__namespaced_openai").unwrap();
        let decoded: serde_json::Value = serde_json::from_str(encoded).unwrap();
        assert_eq!(decoded, serde_json::json!({"key": "abc", "model": "gpt"}));
    }
}
