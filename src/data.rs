//! Domain models and GitHub API data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GitHub user profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    /// Login name (the searched username)
    pub login: String,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Avatar image URL
    pub avatar_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    /// Account creation timestamp, drives the synthetic backfill horizon
    pub created_at: DateTime<Utc>,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
}

/// A repository owned by the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub watchers_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Canonical URL on github.com
    pub html_url: String,
}

/// A public activity event from the events feed.
///
/// Consumed read-only; only push events contribute to the timeline.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Event {
    /// Event type tag (e.g. "PushEvent")
    #[serde(rename = "type")]
    pub event_type: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: EventPayload,
    pub repo: EventRepo,
}

impl Event {
    /// Whether this event produces contributions
    pub fn is_push(&self) -> bool {
        self.event_type == "PushEvent"
    }

    /// Contribution weight of this event: the push payload size, falling
    /// back to the embedded commit count, else 1 (an observed push is at
    /// least one contribution).
    pub fn weight(&self) -> u64 {
        self.payload
            .size
            .or_else(|| self.payload.commits.as_ref().map(|c| c.len() as u64))
            .filter(|&w| w > 0)
            .unwrap_or(1)
    }
}

/// Push event payload
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EventPayload {
    /// Number of commits in the push
    pub size: Option<u64>,
    /// Embedded commit records
    pub commits: Option<Vec<EventCommit>>,
}

/// Source repository of an event, identified as "owner/name"
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EventRepo {
    pub name: String,
}

/// A commit embedded in a push event payload
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EventCommit {
    pub sha: String,
    pub message: String,
    #[serde(default)]
    pub author: Option<EventCommitAuthor>,
}

/// Author of an embedded commit
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EventCommitAuthor {
    pub name: String,
}

/// A commit derived from the event feed, as shown in the commit table
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Commit {
    /// Commit SHA
    pub id: String,
    /// Commit message (first line)
    pub message: String,
    /// Owning repository name, without the owner segment
    pub repo: String,
    /// Timestamp of the push that carried the commit
    pub timestamp: DateTime<Utc>,
    /// Author name
    pub author: String,
}

/// Extract the repository name from a combined "owner/repo" identifier
pub fn short_repo_name(full_name: &str) -> String {
    full_name
        .split('/')
        .nth(1)
        .unwrap_or(full_name)
        .to_string()
}

/// A selectable time window for the aggregated view.
///
/// Closed ordered set; exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
pub enum TimePeriod {
    /// 7 days
    #[value(name = "7d")]
    Week,
    /// 30 days
    #[value(name = "30d")]
    Month,
    /// 90 days
    #[value(name = "90d")]
    Quarter,
    /// 180 days
    #[value(name = "180d")]
    HalfYear,
    /// 365 days
    #[value(name = "1y")]
    Year,
    /// 730 days
    #[value(name = "2y")]
    TwoYears,
    /// 3650 days
    #[value(name = "10y")]
    TenYears,
}

impl TimePeriod {
    /// All periods, in ascending window order
    pub const ALL: [TimePeriod; 7] = [
        TimePeriod::Week,
        TimePeriod::Month,
        TimePeriod::Quarter,
        TimePeriod::HalfYear,
        TimePeriod::Year,
        TimePeriod::TwoYears,
        TimePeriod::TenYears,
    ];

    /// Number of days covered by the window
    pub fn days(&self) -> i64 {
        match self {
            TimePeriod::Week => 7,
            TimePeriod::Month => 30,
            TimePeriod::Quarter => 90,
            TimePeriod::HalfYear => 180,
            TimePeriod::Year => 365,
            TimePeriod::TwoYears => 730,
            TimePeriod::TenYears => 3650,
        }
    }

    /// Display label for the period selector
    pub fn label(&self) -> &'static str {
        match self {
            TimePeriod::Week => "7 Days",
            TimePeriod::Month => "30 Days",
            TimePeriod::Quarter => "90 Days",
            TimePeriod::HalfYear => "6 Months",
            TimePeriod::Year => "1 Year",
            TimePeriod::TwoYears => "2 Years",
            TimePeriod::TenYears => "10 Years",
        }
    }
}

/// One bucket of the windowed series: a day, week, or month depending on
/// the selected period.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AggregatedPoint {
    /// Bucket key used for grouping
    pub key: String,
    /// Formatted label shown on the chart axis
    pub label: String,
    /// Contribution sum for the bucket
    pub value: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_repo_name() {
        assert_eq!(short_repo_name("octocat/hello-world"), "hello-world");
        assert_eq!(short_repo_name("bare-name"), "bare-name");
    }

    #[test]
    fn test_period_ordering_and_days() {
        let days: Vec<i64> = TimePeriod::ALL.iter().map(|p| p.days()).collect();
        assert_eq!(days, vec![7, 30, 90, 180, 365, 730, 3650]);
        let mut sorted = days.clone();
        sorted.sort();
        assert_eq!(days, sorted);
    }

    #[test]
    fn test_event_weight_fallbacks() {
        let mut event = Event {
            event_type: "PushEvent".to_string(),
            created_at: Utc::now(),
            payload: EventPayload {
                size: Some(3),
                commits: None,
            },
            repo: EventRepo {
                name: "octocat/hello-world".to_string(),
            },
        };
        assert_eq!(event.weight(), 3);

        event.payload.size = None;
        event.payload.commits = Some(vec![
            EventCommit {
                sha: "a".to_string(),
                message: "one".to_string(),
                author: None,
            },
            EventCommit {
                sha: "b".to_string(),
                message: "two".to_string(),
                author: None,
            },
        ]);
        assert_eq!(event.weight(), 2);

        event.payload.commits = None;
        assert_eq!(event.weight(), 1);
    }

    #[test]
    fn test_event_deserialization() {
        let json = r#"{
            "type": "PushEvent",
            "created_at": "2026-08-20T12:34:56Z",
            "payload": {
                "size": 2,
                "commits": [
                    {"sha": "abc123", "message": "Fix parser", "author": {"name": "Octo Cat"}}
                ]
            },
            "repo": {"name": "octocat/hello-world"}
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.is_push());
        assert_eq!(event.weight(), 2);
        assert_eq!(event.repo.name, "octocat/hello-world");
        let commits = event.payload.commits.unwrap();
        assert_eq!(commits[0].author.as_ref().unwrap().name, "Octo Cat");
    }

    #[test]
    fn test_non_push_event_without_payload_fields() {
        let json = r#"{
            "type": "WatchEvent",
            "created_at": "2026-08-20T12:34:56Z",
            "payload": {},
            "repo": {"name": "octocat/hello-world"}
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert!(!event.is_push());
    }
}
