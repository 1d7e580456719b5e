//! Player configuration from the environment
//!
//! `.env.local` and `.env` at the repo root are loaded first (local overrides
//! win), then variables are read from the process environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use eventdeck_domain::{DomainError, EventId, UserId};
use thiserror::Error;

use crate::infrastructure::DEFAULT_ROTATE_INTERVAL;

pub const EVENTS_PATH_VAR: &str = "EVENTDECK_EVENTS_PATH";
pub const ROTATE_INTERVAL_VAR: &str = "EVENTDECK_ROTATE_INTERVAL_MS";
pub const PREVIEW_ROTATIONS_VAR: &str = "EVENTDECK_PREVIEW_ROTATIONS";
pub const USER_ID_VAR: &str = "EVENTDECK_USER_ID";
pub const NOW_VAR: &str = "EVENTDECK_NOW";
pub const REGISTERED_EVENTS_VAR: &str = "EVENTDECK_REGISTERED_EVENTS";

const DEFAULT_EVENTS_PATH: &str = "events.json";
const DEFAULT_PREVIEW_ROTATIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must be an RFC3339 timestamp, got {value:?}")]
    InvalidTimestamp { var: &'static str, value: String },

    #[error("{var} contains an invalid id: {source}")]
    InvalidId {
        var: &'static str,
        #[source]
        source: DomainError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    pub events_path: PathBuf,
    pub rotate_interval: Duration,
    pub preview_rotations: u32,
    /// Signed-in user; `None` previews the logged-out listing.
    pub user_id: Option<UserId>,
    /// Pins the clock for reproducible countdown labels.
    pub now: Option<DateTime<Utc>>,
    /// Events the preview user is registered for in the in-memory store.
    pub registered_events: Vec<EventId>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            events_path: PathBuf::from(DEFAULT_EVENTS_PATH),
            rotate_interval: DEFAULT_ROTATE_INTERVAL,
            preview_rotations: DEFAULT_PREVIEW_ROTATIONS,
            user_id: None,
            now: None,
            registered_events: Vec::new(),
        }
    }
}

impl PlayerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from any variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let events_path = get(EVENTS_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or(defaults.events_path);

        let rotate_interval = match get(ROTATE_INTERVAL_VAR) {
            Some(value) => Duration::from_millis(parse_positive(ROTATE_INTERVAL_VAR, value)?),
            None => defaults.rotate_interval,
        };

        let preview_rotations = match get(PREVIEW_ROTATIONS_VAR) {
            Some(value) => {
                let rotations = parse_positive(PREVIEW_ROTATIONS_VAR, value.clone())?;
                u32::try_from(rotations).map_err(|_| ConfigError::InvalidNumber {
                    var: PREVIEW_ROTATIONS_VAR,
                    value,
                })?
            }
            None => defaults.preview_rotations,
        };

        let user_id = get(USER_ID_VAR)
            .map(UserId::new)
            .transpose()
            .map_err(|source| ConfigError::InvalidId {
                var: USER_ID_VAR,
                source,
            })?;

        let registered_events = get(REGISTERED_EVENTS_VAR)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(EventId::new)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()
            .map_err(|source| ConfigError::InvalidId {
                var: REGISTERED_EVENTS_VAR,
                source,
            })?
            .unwrap_or_default();

        let now = get(NOW_VAR)
            .map(|value| {
                DateTime::parse_from_rfc3339(&value)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|_| ConfigError::InvalidTimestamp {
                        var: NOW_VAR,
                        value,
                    })
            })
            .transpose()?;

        Ok(Self {
            events_path,
            rotate_interval,
            preview_rotations,
            user_id,
            now,
            registered_events,
        })
    }
}

fn parse_positive(var: &'static str, value: String) -> Result<u64, ConfigError> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber { var, value }),
    }
}

/// Loads `.env.local` then `.env` from `root`, if present.
pub fn load_dotenv(root: &Path) {
    for filename in [".env.local", ".env"] {
        let path = root.join(filename);
        if path.exists() {
            if let Err(e) = dotenvy::from_path(&path) {
                tracing::warn!(path = ?path, error = %e, "failed to load env file");
            }
        }
    }
}
