use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single hyperparameter value as the training service sends it.
///
/// Defaults arrive typed; anything the user edits becomes [`HyperValue::Text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HyperValue {
    /// `null` default, e.g. an unbounded `max_depth`.
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    /// Lists and objects, e.g. `hidden_layer_sizes: [100]`. Sent back unchanged
    /// until edited.
    Json(serde_json::Value),
}

impl HyperValue {
    /// Text shown in an editable field for this value.
    pub fn field_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Json(v) => v.to_string(),
        }
    }
}

impl fmt::Display for HyperValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.field_text())
    }
}

impl From<&str> for HyperValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for HyperValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for HyperValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for HyperValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// Parameter name to value, in the order the service listed them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HyperparameterMap(IndexMap<String, HyperValue>);

impl HyperparameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&HyperValue> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HyperValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Key at a display position.
    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.0.get_index(index).map(|(k, _)| k.as_str())
    }

    /// Inserts or replaces a value, keeping the key's position if it exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<HyperValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Applies a user edit. The stored value always becomes text.
    ///
    /// Only keys already present can be edited; returns `false` otherwise.
    pub fn edit(&mut self, key: &str, text: impl Into<String>) -> bool {
        match self.0.get_mut(key) {
            Some(slot) => {
                *slot = HyperValue::Text(text.into());
                true
            }
            None => false,
        }
    }

    /// Compact JSON object, as sent in the `params` form field.
    pub fn to_json(&self) -> String {
        // Keys are strings and values are plain JSON, so this always serializes.
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl<K: Into<String>, V: Into<HyperValue>> FromIterator<(K, V)> for HyperparameterMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logistic_defaults() -> HyperparameterMap {
        serde_json::from_str(r#"{"C": 1.0, "max_iter": 100}"#).unwrap()
    }

    #[test]
    fn test_defaults_keep_service_order_and_types() {
        let map: HyperparameterMap = serde_json::from_str(
            r#"{"n_estimators": 100, "max_depth": null, "bootstrap": true, "criterion": "gini"}"#,
        )
        .unwrap();

        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["n_estimators", "max_depth", "bootstrap", "criterion"]);
        assert_eq!(map.get("max_depth"), Some(&HyperValue::Null));
        assert_eq!(map.get("bootstrap"), Some(&HyperValue::Bool(true)));
        assert_eq!(map.get("criterion"), Some(&HyperValue::Text("gini".to_string())));
    }

    #[test]
    fn test_list_and_object_defaults_are_kept() {
        let mut map: HyperparameterMap =
            serde_json::from_str(r#"{"n_init": "auto", "hidden_layer_sizes": [100], "class_weight": {"0": 1}}"#)
                .unwrap();

        assert_eq!(map.len(), 3);
        assert_eq!(map.get("hidden_layer_sizes").unwrap().field_text(), "[100]");
        assert_eq!(map.get("class_weight").unwrap().field_text(), r#"{"0":1}"#);
        assert_eq!(map.to_json(), r#"{"n_init":"auto","hidden_layer_sizes":[100],"class_weight":{"0":1}}"#);

        assert!(map.edit("hidden_layer_sizes", "[50, 50]"));
        assert_eq!(map.get("hidden_layer_sizes"), Some(&HyperValue::Text("[50, 50]".to_string())));
    }

    #[test]
    fn test_edit_coerces_to_text() {
        let mut map = logistic_defaults();
        assert!(map.edit("max_iter", "200"));
        assert_eq!(map.to_json(), r#"{"C":1.0,"max_iter":"200"}"#);
    }

    #[test]
    fn test_edit_unknown_key_is_rejected() {
        let mut map = logistic_defaults();
        assert!(!map.edit("penalty", "l1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_field_text() {
        let map: HyperparameterMap =
            serde_json::from_str(r#"{"fit_intercept": false, "alpha": 0.5, "max_depth": null}"#).unwrap();
        assert_eq!(map.get("fit_intercept").unwrap().field_text(), "false");
        assert_eq!(map.get("alpha").unwrap().field_text(), "0.5");
        assert_eq!(map.get("max_depth").unwrap().field_text(), "");
    }

    #[test]
    fn test_empty_map_serializes_to_empty_object() {
        assert_eq!(HyperparameterMap::new().to_json(), "{}");
    }
}
