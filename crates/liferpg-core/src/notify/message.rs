//! Daily summary message construction.

use serde::Serialize;

use crate::quest::QuestTable;
use crate::storage::NotifyConfig;

/// Join every quest's `<clock> <label>` fragment in table order.
///
/// An empty table yields an empty string.
pub fn summary_body(table: &QuestTable) -> String {
    table
        .iter()
        .map(|quest| quest.summary_fragment())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A message bound for one relay topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationMessage {
    pub topic: String,
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

impl NotificationMessage {
    pub fn new(topic: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            title: title.into(),
            body: body.into(),
            tags: Vec::new(),
            priority: None,
        }
    }

    /// The daily summary for `table`, addressed per the notify settings.
    pub fn daily(table: &QuestTable, config: &NotifyConfig) -> Self {
        Self {
            topic: config.effective_topic().to_string(),
            title: config.title.clone(),
            body: summary_body(table),
            tags: config.tags.clone(),
            priority: config.priority,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::QuestDefinition;
    use crate::storage::DEFAULT_TOPIC;

    #[test]
    fn default_table_matches_readme_example() {
        assert_eq!(
            summary_body(&QuestTable::default_daily()),
            "4:30p Run 4mi, 6:10p Rope 10', 8:00p Study 30'"
        );
    }

    #[test]
    fn body_follows_table_order_not_time_order() {
        let table = QuestTable::new(vec![
            QuestDefinition::new("study", 20, 0, 30).with_label("Study 30'"),
            QuestDefinition::new("roadwork", 6, 15, 45).with_label("Run 4mi"),
        ]);
        assert_eq!(summary_body(&table), "8:00p Study 30', 6:15a Run 4mi");
    }

    #[test]
    fn empty_table_gives_empty_body() {
        assert_eq!(summary_body(&QuestTable::default()), "");
    }

    #[test]
    fn formatting_is_repeatable() {
        let table = QuestTable::default_daily();
        assert_eq!(summary_body(&table), summary_body(&table));
    }

    #[test]
    fn daily_message_uses_config_and_falls_back_to_default_topic() {
        let config = NotifyConfig {
            topic: "   ".into(),
            tags: vec!["crossed_swords".into()],
            priority: Some(4),
            ..NotifyConfig::default()
        };
        let message = NotificationMessage::daily(&QuestTable::default_daily(), &config);

        assert_eq!(message.topic, DEFAULT_TOPIC);
        assert_eq!(message.title, config.title);
        assert_eq!(message.tags, vec!["crossed_swords".to_string()]);
        assert_eq!(message.priority, Some(4));
        assert!(!message.is_empty());
    }

    #[test]
    fn message_from_empty_table_is_empty() {
        let message = NotificationMessage::daily(&QuestTable::default(), &NotifyConfig::default());
        assert!(message.is_empty());
    }
}
