//! Topic registry: validated, immutable mapping between callback identifiers and topics.

use std::collections::{HashMap, HashSet};

use persona_core::{BotError, Result};

use crate::settings::{Section, TopicSections};

/// Stable topic key from the config sections (e.g. `translator`).
pub type TopicKey = String;

/// Telegram limits callback data to 1-64 bytes.
pub const MAX_CALLBACK_ID_BYTES: usize = 64;

/// A configured persona selectable from the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub key: TopicKey,
    pub label: String,
    pub callback_id: String,
    pub system_prompt: String,
    /// Reply sent when the topic is selected.
    pub answer: Option<String>,
}

/// Topics in declaration order plus O(1) lookups by callback id and key.
/// Built once at start-up; shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct TopicRegistry {
    topics: Vec<Topic>,
    by_callback: HashMap<String, usize>,
    by_key: HashMap<TopicKey, usize>,
}

fn inconsistent(msg: String) -> BotError {
    BotError::ConfigInconsistency(msg)
}

fn index(section: &Section) -> HashMap<&str, &str> {
    section
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

/// Every key of `section` must also be a label key.
fn check_no_stray_keys(name: &str, section: &Section, labels: &HashMap<&str, &str>) -> Result<()> {
    match section.iter().find(|(k, _)| !labels.contains_key(k.as_str())) {
        Some((key, _)) => Err(inconsistent(format!(
            "[{}] has key '{}' that is missing from [labels]",
            name, key
        ))),
        None => Ok(()),
    }
}

impl TopicRegistry {
    /// Joins the aligned sections on topic key, in `labels` order.
    ///
    /// Fails with `ConfigInconsistency` when a key is present in one of labels/callbacks/prompts
    /// but not in the others, when `answers` names an unknown topic, or when the topic list
    /// itself is invalid (see [`TopicRegistry::from_topics`]).
    pub fn from_sections(sections: &TopicSections) -> Result<Self> {
        let labels = index(&sections.labels);
        let callbacks = index(&sections.callbacks);
        let prompts = index(&sections.prompts);
        let answers = index(&sections.answers);

        check_no_stray_keys("callbacks", &sections.callbacks, &labels)?;
        check_no_stray_keys("prompts", &sections.prompts, &labels)?;
        check_no_stray_keys("answers", &sections.answers, &labels)?;

        let topics = sections
            .labels
            .iter()
            .map(|(key, label)| {
                let callback_id = callbacks.get(key.as_str()).ok_or_else(|| {
                    inconsistent(format!("topic '{}' has no entry in [callbacks]", key))
                })?;
                let system_prompt = prompts.get(key.as_str()).ok_or_else(|| {
                    inconsistent(format!("topic '{}' has no entry in [prompts]", key))
                })?;
                Ok(Topic {
                    key: key.clone(),
                    label: label.clone(),
                    callback_id: callback_id.to_string(),
                    system_prompt: system_prompt.to_string(),
                    answer: answers.get(key.as_str()).map(|a| a.to_string()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_topics(topics)
    }

    /// Builds the registry from already-joined topics.
    ///
    /// Fails with `ConfigInconsistency` on an empty list, duplicate keys, duplicate callback
    /// identifiers, or callback identifiers outside 1..=64 bytes.
    pub fn from_topics(topics: Vec<Topic>) -> Result<Self> {
        if topics.is_empty() {
            return Err(inconsistent("no topics configured".to_string()));
        }

        let mut by_callback = HashMap::with_capacity(topics.len());
        let mut by_key = HashMap::with_capacity(topics.len());
        let mut seen_labels = HashSet::with_capacity(topics.len());

        for (i, topic) in topics.iter().enumerate() {
            if topic.callback_id.is_empty() || topic.callback_id.len() > MAX_CALLBACK_ID_BYTES {
                return Err(inconsistent(format!(
                    "topic '{}' has callback id of {} bytes (allowed 1..={})",
                    topic.key,
                    topic.callback_id.len(),
                    MAX_CALLBACK_ID_BYTES
                )));
            }
            if by_key.insert(topic.key.clone(), i).is_some() {
                return Err(inconsistent(format!("duplicate topic key '{}'", topic.key)));
            }
            if let Some(other) = by_callback.insert(topic.callback_id.clone(), i) {
                return Err(inconsistent(format!(
                    "callback id '{}' is used by both '{}' and '{}'",
                    topic.callback_id, topics[other].key, topic.key
                )));
            }
            if !seen_labels.insert(topic.label.as_str()) {
                return Err(inconsistent(format!(
                    "label '{}' is used by more than one topic",
                    topic.label
                )));
            }
        }

        Ok(Self {
            topics,
            by_callback,
            by_key,
        })
    }

    /// Resolves a pressed button to its topic. Never falls back to a default topic.
    pub fn resolve_by_callback(&self, callback_id: &str) -> Result<&Topic> {
        self.by_callback
            .get(callback_id)
            .map(|&i| &self.topics[i])
            .ok_or_else(|| BotError::UnknownCallback(callback_id.to_string()))
    }

    pub fn get(&self, key: &str) -> Option<&Topic> {
        self.by_key.get(key).map(|&i| &self.topics[i])
    }

    pub fn all_topics_in_order(&self) -> &[Topic] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(pairs: &[(&str, &str)]) -> Section {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn aligned() -> TopicSections {
        TopicSections {
            labels: section(&[("translator", "Translator"), ("poet", "Poet")]),
            callbacks: section(&[("translator", "cb_t"), ("poet", "cb_p")]),
            prompts: section(&[("translator", "Translate to French"), ("poet", "Rhyme")]),
            answers: section(&[("poet", "Give me a theme")]),
        }
    }

    #[test]
    fn test_from_sections_joins_on_key_in_label_order() {
        let registry = TopicRegistry::from_sections(&aligned()).unwrap();
        let keys: Vec<&str> = registry
            .all_topics_in_order()
            .iter()
            .map(|t| t.key.as_str())
            .collect();
        assert_eq!(keys, ["translator", "poet"]);

        let poet = registry.get("poet").unwrap();
        assert_eq!(poet.callback_id, "cb_p");
        assert_eq!(poet.system_prompt, "Rhyme");
        assert_eq!(poet.answer.as_deref(), Some("Give me a theme"));
        assert_eq!(registry.get("translator").unwrap().answer, None);
    }

    #[test]
    fn test_resolve_is_total_over_known_callbacks() {
        let registry = TopicRegistry::from_sections(&aligned()).unwrap();
        for topic in registry.all_topics_in_order() {
            assert_eq!(registry.resolve_by_callback(&topic.callback_id).unwrap(), topic);
        }
    }

    #[test]
    fn test_resolve_unknown_callback_fails() {
        let registry = TopicRegistry::from_sections(&aligned()).unwrap();
        for unknown in ["", "cb_x", "translator", "CB_T", "Translator"] {
            let err = registry.resolve_by_callback(unknown).unwrap_err();
            assert!(matches!(err, BotError::UnknownCallback(ref id) if id == unknown));
        }
    }

    #[test]
    fn test_missing_key_in_any_aligned_section_is_inconsistent() {
        let mut missing_callback = aligned();
        missing_callback.callbacks.pop();
        let mut missing_prompt = aligned();
        missing_prompt.prompts.remove(0);
        let mut missing_label = aligned();
        missing_label.labels.pop();
        let mut stray_answer = aligned();
        stray_answer.answers.push(("ghost".to_string(), "Boo".to_string()));

        for sections in [missing_callback, missing_prompt, missing_label, stray_answer] {
            let err = TopicRegistry::from_sections(&sections).unwrap_err();
            assert!(matches!(err, BotError::ConfigInconsistency(_)), "{:?}", err);
        }
    }

    #[test]
    fn test_duplicate_callback_ids_are_inconsistent() {
        let mut sections = aligned();
        sections.callbacks = section(&[("translator", "same"), ("poet", "same")]);
        let err = TopicRegistry::from_sections(&sections).unwrap_err();
        assert!(err.to_string().contains("'same'"), "{}", err);
    }

    #[test]
    fn test_duplicate_labels_are_inconsistent() {
        let mut sections = aligned();
        sections.labels = section(&[("translator", "Same"), ("poet", "Same")]);
        assert!(TopicRegistry::from_sections(&sections).is_err());
    }

    #[test]
    fn test_empty_and_oversized_callback_ids_rejected() {
        let mut sections = aligned();
        sections.callbacks = section(&[("translator", ""), ("poet", "cb_p")]);
        assert!(TopicRegistry::from_sections(&sections).is_err());

        let long = "x".repeat(MAX_CALLBACK_ID_BYTES + 1);
        let mut sections = aligned();
        sections.callbacks = section(&[("translator", long.as_str()), ("poet", "cb_p")]);
        assert!(TopicRegistry::from_sections(&sections).is_err());
    }

    #[test]
    fn test_no_topics_is_inconsistent() {
        let err = TopicRegistry::from_sections(&TopicSections::default()).unwrap_err();
        assert!(matches!(err, BotError::ConfigInconsistency(_)));
    }
}
