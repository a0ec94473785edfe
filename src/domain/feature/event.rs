//! Feature event records

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Attribute names written for a usage event, in wire order
pub const USAGE_ATTRIBUTES: [&str; 5] = ["application", "feature", "detail", "usedBy", "usedAt"];

/// Attribute names written for a subscription event, in wire order
pub const SUBSCRIPTION_ATTRIBUTES: [&str; 4] =
    ["application", "feature", "subscriber", "subscribedAt"];

/// Primary key of a stored event record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// Generate a new unique ID
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single name/value pair of a stored record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordAttribute {
    pub name: String,
    pub value: String,
}

impl RecordAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Finds the value of the named attribute
pub fn attribute_value<'a>(attributes: &'a [RecordAttribute], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|a| a.name == name)
        .map(|a| a.value.as_str())
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// A feature having been used
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEvent {
    pub application: String,
    pub feature: String,
    pub details: Option<String>,
    pub used_by: Option<String>,
    pub used_at: Option<DateTime<Utc>>,
}

impl UsageEvent {
    pub fn new(application: impl Into<String>, feature: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            feature: feature.into(),
            ..Default::default()
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_used_by(mut self, used_by: impl Into<String>) -> Self {
        self.used_by = Some(used_by.into());
        self
    }

    pub fn with_used_at(mut self, used_at: DateTime<Utc>) -> Self {
        self.used_at = Some(used_at);
        self
    }

    /// Renders the record attributes. A missing `used_at` is stamped with `now`.
    pub fn attributes(&self, now: DateTime<Utc>) -> Vec<RecordAttribute> {
        let [application, feature, detail, used_by, used_at] = USAGE_ATTRIBUTES;

        vec![
            RecordAttribute::new(application, self.application.as_str()),
            RecordAttribute::new(feature, self.feature.as_str()),
            RecordAttribute::new(detail, self.details.clone().unwrap_or_default()),
            RecordAttribute::new(used_by, self.used_by.clone().unwrap_or_default()),
            RecordAttribute::new(used_at, format_timestamp(self.used_at.unwrap_or(now))),
        ]
    }
}

/// A subscription to a feature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionEvent {
    pub application: String,
    pub feature: String,
    pub subscriber: Option<String>,
    pub subscribed_at: Option<DateTime<Utc>>,
}

impl SubscriptionEvent {
    pub fn new(application: impl Into<String>, feature: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            feature: feature.into(),
            ..Default::default()
        }
    }

    pub fn with_subscriber(mut self, subscriber: impl Into<String>) -> Self {
        self.subscriber = Some(subscriber.into());
        self
    }

    pub fn with_subscribed_at(mut self, subscribed_at: DateTime<Utc>) -> Self {
        self.subscribed_at = Some(subscribed_at);
        self
    }

    /// Renders the record attributes. A missing `subscribed_at` is stamped with `now`.
    pub fn attributes(&self, now: DateTime<Utc>) -> Vec<RecordAttribute> {
        let [application, feature, subscriber, subscribed_at] = SUBSCRIPTION_ATTRIBUTES;

        vec![
            RecordAttribute::new(application, self.application.as_str()),
            RecordAttribute::new(feature, self.feature.as_str()),
            RecordAttribute::new(subscriber, self.subscriber.clone().unwrap_or_default()),
            RecordAttribute::new(
                subscribed_at,
                format_timestamp(self.subscribed_at.unwrap_or(now)),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_usage_attributes_in_wire_order() {
        let event = UsageEvent::new("App1", "Feat1")
            .with_details("details")
            .with_used_by("user1");

        let attributes = event.attributes(fixed_now());
        let names: Vec<&str> = attributes.iter().map(|a| a.name.as_str()).collect();

        assert_eq!(names, USAGE_ATTRIBUTES);
        assert_eq!(attribute_value(&attributes, "application"), Some("App1"));
        assert_eq!(attribute_value(&attributes, "feature"), Some("Feat1"));
        assert_eq!(attribute_value(&attributes, "detail"), Some("details"));
        assert_eq!(attribute_value(&attributes, "usedBy"), Some("user1"));
        assert_eq!(
            attribute_value(&attributes, "usedAt"),
            Some("2024-03-01T12:30:00Z")
        );
    }

    #[test]
    fn test_usage_missing_fields_become_empty() {
        let attributes = UsageEvent::default().attributes(fixed_now());

        assert_eq!(attributes.len(), 5);
        assert_eq!(attribute_value(&attributes, "application"), Some(""));
        assert_eq!(attribute_value(&attributes, "feature"), Some(""));
        assert_eq!(attribute_value(&attributes, "detail"), Some(""));
        assert_eq!(attribute_value(&attributes, "usedBy"), Some(""));
        assert_eq!(
            attribute_value(&attributes, "usedAt"),
            Some("2024-03-01T12:30:00Z")
        );
    }

    #[test]
    fn test_usage_explicit_timestamp_wins() {
        let used_at = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
        let attributes = UsageEvent::new("App", "Feature")
            .with_used_at(used_at)
            .attributes(fixed_now());

        assert_eq!(
            attribute_value(&attributes, "usedAt"),
            Some("2020-01-02T03:04:05Z")
        );
    }

    #[test]
    fn test_subscription_attributes() {
        let attributes = SubscriptionEvent::new("App1", "Feat1")
            .with_subscriber("alice")
            .attributes(fixed_now());
        let names: Vec<&str> = attributes.iter().map(|a| a.name.as_str()).collect();

        assert_eq!(names, SUBSCRIPTION_ATTRIBUTES);
        assert_eq!(attribute_value(&attributes, "subscriber"), Some("alice"));
        assert_eq!(
            attribute_value(&attributes, "subscribedAt"),
            Some("2024-03-01T12:30:00Z")
        );
    }

    #[test]
    fn test_subscription_missing_subscriber_is_empty() {
        let attributes = SubscriptionEvent::new("App1", "Feat1").attributes(fixed_now());
        assert_eq!(attribute_value(&attributes, "subscriber"), Some(""));
    }

    #[test]
    fn test_generated_item_ids_are_unique() {
        let first = ItemId::generate();
        let second = ItemId::generate();

        assert_ne!(first, second);
        assert_eq!(first.as_str().len(), 36);
    }
}
