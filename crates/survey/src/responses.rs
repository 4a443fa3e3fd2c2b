use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Answers keyed by question id.
///
/// An absent key and an empty string both mean "unanswered". Keys that are
/// not in the catalog (e.g. from an imported file) are kept as-is; callers
/// that render answers walk the catalog, so they never surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseMap(BTreeMap<String, String>);

impl ResponseMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The non-empty answer for `id`, if any.
    pub fn answer(&self, id: &str) -> Option<&str> {
        self.0
            .get(id)
            .map(String::as_str)
            .filter(|a| !a.is_empty())
    }

    /// The raw stored value, empty strings included.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    /// True when `id` holds something other than whitespace. Drives
    /// section completion and progress.
    pub fn is_answered(&self, id: &str) -> bool {
        self.0.get(id).is_some_and(|a| !a.trim().is_empty())
    }

    pub fn set(&mut self, id: impl Into<String>, answer: impl Into<String>) {
        self.0.insert(id.into(), answer.into());
    }

    pub fn remove(&mut self, id: &str) -> Option<String> {
        self.0.remove(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries holding a non-blank answer.
    pub fn answered_count(&self) -> usize {
        self.0.values().filter(|a| !a.trim().is_empty()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for ResponseMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_answer_counts_as_unanswered() {
        let mut map = ResponseMap::new();
        map.set("q_goals", "");
        assert_eq!(map.get("q_goals"), Some(""));
        assert_eq!(map.answer("q_goals"), None);
        assert!(!map.is_answered("q_goals"));
        assert_eq!(map.answered_count(), 0);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn blank_answer_is_kept_but_unanswered() {
        let mut map = ResponseMap::new();
        map.set("q_goals", "   ");
        assert_eq!(map.answer("q_goals"), Some("   "));
        assert!(!map.is_answered("q_goals"));
        assert_eq!(map.answered_count(), 0);
    }

    #[test]
    fn serializes_as_flat_object() {
        let mut map = ResponseMap::new();
        map.set("q_kpis", "churn rate");
        map.set("q_goals", "grow");
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"q_goals":"grow","q_kpis":"churn rate"}"#);
    }
}
