//! octoview - GitHub user activity dashboard
//!
//! This library fetches profile, repository, and event data for a GitHub
//! username and derives a long-range contribution timeline from the
//! short-range event feed: the API only returns ~90 days of events, so the
//! older portion of the timeline is backfilled with a synthetic pattern.
//!
//! # Features
//!
//! - GitHub REST client for profile, repositories, and public events
//! - Dense 10-year day map with synthetic backfill of the unobserved past
//! - Day/week/month re-aggregation over selectable time windows
//! - Summary statistics and a filtered, paginated commit list
//! - HTML dashboard generation with Chart.js
//!
//! # Example
//!
//! ```no_run
//! use octoview::{data::TimePeriod, github::GitHubClient, session, view};
//! use chrono::Utc;
//!
//! let client = GitHubClient::new(None).unwrap();
//! let mut rng = rand::thread_rng();
//! let now = Utc::now();
//!
//! let session = session::fetch_session(&client, "octocat", &mut rng, now).unwrap();
//! let view = view::build_view(&session.timeline, TimePeriod::Quarter, &session.commits, 0, now);
//! println!("{} contributions in 90 days", view.stats.total);
//! ```

pub mod data;
pub mod error;
pub mod github;
pub mod html;
pub mod session;
pub mod timeline;
pub mod view;

pub use error::{Error, Result};
