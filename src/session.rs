//! Session fetching and lifecycle
//!
//! One search produces one [`Session`]: profile, repositories, synthesized
//! timeline, and the commit list derived from the event feed. Sessions are
//! replaced wholesale; a failed search leaves no partial data behind.

use crate::data::{short_repo_name, Commit, Event, Repository, UserProfile};
use crate::error::{Error, Result};
use crate::timeline;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Read operations of the upstream data source, keyed by username.
///
/// [`crate::github::GitHubClient`] is the production implementation; tests
/// substitute stubs.
pub trait UserDataSource {
    fn fetch_user(&self, username: &str) -> Result<UserProfile>;
    fn fetch_repositories(&self, username: &str) -> Result<Vec<Repository>>;
    fn fetch_events(&self, username: &str) -> Result<Vec<Event>>;
}

/// Complete result of one successful search
#[derive(Debug, Clone, serde::Serialize)]
pub struct Session {
    pub profile: UserProfile,
    pub repositories: Vec<Repository>,
    /// Dense day map over the full synthesis horizon
    pub timeline: BTreeMap<chrono::NaiveDate, u64>,
    /// Commits extracted from push events, unfiltered
    pub commits: Vec<Commit>,
    pub fetched_at: DateTime<Utc>,
}

/// Fetch everything for a username and build the session.
///
/// The profile lookup runs first; its failure short-circuits the remaining
/// calls. Success is all-or-nothing across the three fetches plus
/// synthesis.
pub fn fetch_session<S: UserDataSource, R: Rng>(
    source: &S,
    username: &str,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<Session> {
    info!("Fetching profile for '{}'", username);
    let profile = source.fetch_user(username)?;

    let repositories = source.fetch_repositories(username)?;
    let events = source.fetch_events(username)?;
    debug!(
        "Fetched {} repositories and {} events",
        repositories.len(),
        events.len()
    );

    let timeline = timeline::synthesize(
        &events,
        profile.created_at.date_naive(),
        now.date_naive(),
        rng,
    );
    let commits = extract_commits(&events);
    debug!("Extracted {} commits from push events", commits.len());

    Ok(Session {
        profile,
        repositories,
        timeline,
        commits,
        fetched_at: now,
    })
}

/// Flatten the commit records embedded in push events.
pub fn extract_commits(events: &[Event]) -> Vec<Commit> {
    events
        .iter()
        .filter(|e| e.is_push())
        .flat_map(|event| {
            let repo = short_repo_name(&event.repo.name);
            let timestamp = event.created_at;
            event
                .payload
                .commits
                .iter()
                .flatten()
                .map(move |c| Commit {
                    id: c.sha.clone(),
                    message: c.message.lines().next().unwrap_or("").to_string(),
                    repo: repo.clone(),
                    timestamp,
                    author: c
                        .author
                        .as_ref()
                        .map(|a| a.name.clone())
                        .unwrap_or_else(|| "unknown".to_string()),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Holder of the currently displayed session.
///
/// A new search clears the previous session and error before fetching and
/// commits the new session only when the whole fetch chain succeeds, so
/// stale or partial results are never shown.
#[derive(Debug, Default)]
pub struct SessionStore {
    session: Option<Session>,
    error: Option<String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a search, replacing all prior state.
    pub fn search<S: UserDataSource, R: Rng>(
        &mut self,
        source: &S,
        username: &str,
        rng: &mut R,
        now: DateTime<Utc>,
    ) {
        self.session = None;
        self.error = None;

        match fetch_session(source, username, rng, now) {
            Ok(session) => self.session = Some(session),
            Err(err) => self.error = Some(user_message(&err, username)),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// User-facing message for a failed search
fn user_message(err: &Error, username: &str) -> String {
    if err.is_not_found() {
        format!("User '{}' not found", username)
    } else {
        "Failed to fetch data from GitHub".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{EventCommit, EventCommitAuthor, EventPayload, EventRepo};
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap()
    }

    fn profile() -> UserProfile {
        UserProfile {
            login: "octocat".to_string(),
            name: Some("The Octocat".to_string()),
            avatar_url: "https://example.com/avatar.png".to_string(),
            bio: None,
            company: None,
            location: None,
            blog: None,
            created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            followers: 10,
            following: 2,
            public_repos: 8,
        }
    }

    fn push_event(now: DateTime<Utc>) -> Event {
        Event {
            event_type: "PushEvent".to_string(),
            created_at: now,
            payload: EventPayload {
                size: Some(2),
                commits: Some(vec![
                    EventCommit {
                        sha: "abc123".to_string(),
                        message: "Fix parser\n\nLonger body".to_string(),
                        author: Some(EventCommitAuthor {
                            name: "Octo Cat".to_string(),
                        }),
                    },
                    EventCommit {
                        sha: "def456".to_string(),
                        message: "Add tests".to_string(),
                        author: None,
                    },
                ]),
            },
            repo: EventRepo {
                name: "octocat/hello-world".to_string(),
            },
        }
    }

    /// Stub source counting calls per operation
    struct StubSource {
        user_found: bool,
        events_fail: bool,
        repo_calls: Cell<usize>,
        event_calls: Cell<usize>,
    }

    impl StubSource {
        fn new() -> Self {
            Self {
                user_found: true,
                events_fail: false,
                repo_calls: Cell::new(0),
                event_calls: Cell::new(0),
            }
        }
    }

    impl UserDataSource for StubSource {
        fn fetch_user(&self, username: &str) -> Result<UserProfile> {
            if self.user_found {
                Ok(profile())
            } else {
                Err(Error::UserNotFound(username.to_string()))
            }
        }

        fn fetch_repositories(&self, _username: &str) -> Result<Vec<Repository>> {
            self.repo_calls.set(self.repo_calls.get() + 1);
            Ok(Vec::new())
        }

        fn fetch_events(&self, _username: &str) -> Result<Vec<Event>> {
            self.event_calls.set(self.event_calls.get() + 1);
            if self.events_fail {
                Err(Error::GitHubError("boom".to_string()))
            } else {
                Ok(vec![push_event(now())])
            }
        }
    }

    #[test]
    fn test_extract_commits_from_push_events() {
        let commits = extract_commits(&[push_event(now())]);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].id, "abc123");
        assert_eq!(commits[0].message, "Fix parser");
        assert_eq!(commits[0].repo, "hello-world");
        assert_eq!(commits[0].author, "Octo Cat");
        assert_eq!(commits[1].author, "unknown");
    }

    #[test]
    fn test_successful_search_builds_full_session() {
        let source = StubSource::new();
        let mut store = SessionStore::new();
        let mut rng = StdRng::seed_from_u64(1);

        store.search(&source, "octocat", &mut rng, now());

        let session = store.session().expect("session should be set");
        assert_eq!(session.profile.login, "octocat");
        assert_eq!(session.commits.len(), 2);
        assert_eq!(
            session.timeline.len(),
            crate::timeline::MAX_HISTORY_DAYS as usize
        );
        assert!(store.error().is_none());
    }

    #[test]
    fn test_unknown_user_short_circuits_remaining_fetches() {
        let mut source = StubSource::new();
        source.user_found = false;
        let mut store = SessionStore::new();
        let mut rng = StdRng::seed_from_u64(1);

        store.search(&source, "nobody", &mut rng, now());

        assert!(store.session().is_none());
        assert_eq!(store.error(), Some("User 'nobody' not found"));
        assert_eq!(source.repo_calls.get(), 0);
        assert_eq!(source.event_calls.get(), 0);
    }

    #[test]
    fn test_failed_search_clears_previous_session() {
        let source = StubSource::new();
        let mut store = SessionStore::new();
        let mut rng = StdRng::seed_from_u64(1);

        store.search(&source, "octocat", &mut rng, now());
        assert!(store.session().is_some());

        let mut failing = StubSource::new();
        failing.events_fail = true;
        store.search(&failing, "octocat", &mut rng, now());

        assert!(store.session().is_none(), "no partial session may survive");
        assert_eq!(store.error(), Some("Failed to fetch data from GitHub"));
    }
}
