use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

// Common data structures used across all platforms
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    /// Capacity minus current roster size. Negative when the server overbooks.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }
}

/// Snapshot of every activity as last reported by `GET /activities`.
///
/// Entries keep the order the server listed them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    entries: Vec<(String, Activity)>,
}

impl Directory {
    pub fn from_json_str(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, activity)| activity)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.entries
            .iter()
            .map(|(name, activity)| (name.as_str(), activity))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Activity)> for Directory {
    fn from_iter<I: IntoIterator<Item = (String, Activity)>>(iter: I) -> Self {
        Directory {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'de> Deserialize<'de> for Directory {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // serde_json's `preserve_order` keeps the map in server order
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(name, value)| {
                serde_json::from_value::<Activity>(value)
                    .map(|activity| (name.clone(), activity))
                    .map_err(|e| <D::Error as de::Error>::custom(format!("activity {name:?}: {e}")))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(max: u32, participants: &[&str]) -> Activity {
        Activity {
            description: "Learn strategies and compete in chess tournaments".to_string(),
            schedule: "Fridays, 3:30 PM - 5:00 PM".to_string(),
            max_participants: max,
            participants: participants.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn spots_left_is_capacity_minus_roster() {
        let seven: Vec<String> = (0..7).map(|i| format!("s{i}@mergington.edu")).collect();
        let refs: Vec<&str> = seven.iter().map(String::as_str).collect();
        assert_eq!(activity(10, &refs).spots_left(), 3);
        assert_eq!(activity(12, &[]).spots_left(), 12);
    }

    #[test]
    fn overbooked_activity_goes_negative() {
        assert_eq!(activity(1, &["a@x.edu", "b@x.edu", "c@x.edu"]).spots_left(), -2);
    }

    #[test]
    fn directory_keeps_server_order() {
        let body = r#"{
            "Programming Class": {"description": "d", "schedule": "s", "max_participants": 20, "participants": []},
            "Chess Club": {"description": "d", "schedule": "s", "max_participants": 12, "participants": ["michael@mergington.edu"]},
            "Art Club": {"description": "d", "schedule": "s", "max_participants": 15, "participants": []}
        }"#;
        let directory = Directory::from_json_str(body).unwrap();
        let names: Vec<&str> = directory.names().collect();
        assert_eq!(names, ["Programming Class", "Chess Club", "Art Club"]);
        assert_eq!(
            directory.get("Chess Club").unwrap().participants,
            ["michael@mergington.edu"]
        );
    }

    #[test]
    fn malformed_activity_fails_the_whole_directory() {
        let body = r#"{"Chess Club": {"description": "d", "schedule": "s", "max_participants": "many"}}"#;
        let err = Directory::from_json_str(body).unwrap_err();
        assert!(err.to_string().contains("Chess Club"));
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(Directory::from_json_str("[]").is_err());
        assert!(Directory::from_json_str("not json").is_err());
    }
}
