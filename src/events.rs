use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventAction {
    Sold,
    Rent,
}

impl EventAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sold => "SOLD",
            Self::Rent => "RENT",
        }
    }

    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Sold => "action-sold",
            Self::Rent => "action-rent",
        }
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentEvent {
    pub agent: String,
    pub action: EventAction,
    pub property: String,
    pub price: String,
    pub timestamp: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl RecentEvent {
    fn new(agent: &str, action: EventAction, property: &str, price: &str, timestamp: &str) -> Self {
        Self {
            agent: agent.to_string(),
            action,
            property: property.to_string(),
            price: price.to_string(),
            timestamp: timestamp.to_string(),
            avatar: None,
        }
    }

    pub fn initials(&self) -> String {
        initials(&self.agent)
    }
}

/// Avatar fallback text: the first letter of each part of the name.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect()
}

pub fn sample_events() -> Vec<RecentEvent> {
    vec![
        RecentEvent::new(
            "Sarah Johnson",
            EventAction::Sold,
            "456 Oak Ave",
            "$485,000",
            "2 min ago",
        ),
        RecentEvent::new(
            "Michael Chen",
            EventAction::Rent,
            "88 Harbor View #4B",
            "$3,200/mo",
            "15 min ago",
        ),
        RecentEvent::new(
            "Emily Davis",
            EventAction::Sold,
            "123 Main St",
            "$720,000",
            "1 hr ago",
        ),
        RecentEvent::new(
            "James Wilson",
            EventAction::Rent,
            "12 Elm Court",
            "$2,450/mo",
            "3 hr ago",
        ),
        RecentEvent::new(
            "Olivia Martinez",
            EventAction::Sold,
            "9 Lakeside Dr",
            "$1,150,000",
            "5 hr ago",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_take_first_letter_of_each_part() {
        assert_eq!(initials("Sarah Johnson"), "SJ");
        assert_eq!(initials("  Olivia   Martinez "), "OM");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn sample_feed_has_both_actions() {
        let events = sample_events();
        assert_eq!(events.len(), 5);
        assert!(events.iter().any(|e| e.action == EventAction::Sold));
        assert!(events.iter().any(|e| e.action == EventAction::Rent));
        assert_eq!(events[1].initials(), "MC");
    }

    #[test]
    fn action_serializes_uppercase() {
        let json = serde_json::to_string(&EventAction::Rent).expect("serializable");
        assert_eq!(json, "\"RENT\"");
    }
}
