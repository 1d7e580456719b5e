//! Event list loading for the preview runner
//!
//! Reads a JSON array of event documents in the store's camelCase shape.

use std::fs;
use std::path::{Path, PathBuf};

use eventdeck_domain::Event;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventSourceError {
    #[error("Failed to read events file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse events file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads events in file order.
///
/// Events that break a domain invariant are kept and logged; the listing
/// still shows them with whatever fallback text applies.
pub fn load_events(path: impl AsRef<Path>) -> Result<Vec<Event>, EventSourceError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| EventSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let events: Vec<Event> =
        serde_json::from_str(&data).map_err(|source| EventSourceError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    for event in &events {
        if let Err(e) = event.validate() {
            tracing::warn!(event_id = %event.id, error = %e, "event failed validation");
        }
    }

    tracing::debug!(count = events.len(), path = ?path, "events loaded");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_loads_events_in_order() {
        let file = write_file(
            r#"[
                {"id": "a", "title": "First", "eventType": "online", "isFree": true},
                {"id": "b", "title": "Second", "eventType": "in-person", "price": 15}
            ]"#,
        );

        let events = load_events(file.path()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id.as_str(), "a");
        assert_eq!(events[1].price, Some(15.0));
    }

    #[test]
    fn test_invalid_event_is_kept() {
        let file = write_file(
            r#"[{"id": "a", "title": "Neg", "eventType": "online", "price": -5}]"#,
        );

        let events = load_events(file.path()).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_events(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, EventSourceError::Io { .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let file = write_file("{not json");
        let err = load_events(file.path()).unwrap_err();
        assert!(matches!(err, EventSourceError::Parse { .. }));
    }

    #[test]
    fn test_unknown_event_type_is_parse_error() {
        let file = write_file(r#"[{"id": "a", "title": "X", "eventType": "hybrid"}]"#);
        let err = load_events(file.path()).unwrap_err();
        assert!(matches!(err, EventSourceError::Parse { .. }));
    }
}
