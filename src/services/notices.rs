//! Broken-profile acknowledgment queue.
//!
//! Broken profiles are surfaced one at a time and must be acknowledged
//! individually. The queue is keyed by file path and kept separate from any
//! rendering concern, so the acknowledgment logic is testable on its own.
//! Draining a queue that was populated by a load containing broken entries
//! is the presentation layer's cue to land in the rescue configuration.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::models::ProfileParseError;

/// FIFO queue of broken-profile notices with per-path acknowledgment.
#[derive(Debug, Clone, Default)]
pub struct NoticeQueue {
    errors: Vec<ProfileParseError>,
    acked: HashSet<PathBuf>,
}

impl NoticeQueue {
    /// Builds a queue over a load's broken-profile list, discovery order
    /// preserved.
    #[must_use]
    pub fn new(errors: Vec<ProfileParseError>) -> Self {
        Self {
            errors,
            acked: HashSet::new(),
        }
    }

    /// The first not-yet-acknowledged notice, if any.
    #[must_use]
    pub fn next(&self) -> Option<&ProfileParseError> {
        self.errors.iter().find(|e| !self.acked.contains(&e.path))
    }

    /// Acknowledges the notice for `path`. Unknown paths are ignored.
    pub fn acknowledge(&mut self, path: &Path) {
        if self.errors.iter().any(|e| e.path == path) {
            self.acked.insert(path.to_path_buf());
        }
    }

    /// Number of notices still awaiting acknowledgment.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.errors
            .iter()
            .filter(|e| !self.acked.contains(&e.path))
            .count()
    }

    /// Whether every notice has been acknowledged.
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.remaining() == 0
    }

    /// Whether the queue ever held any notices.
    #[must_use]
    pub fn had_notices(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(name: &str) -> ProfileParseError {
        ProfileParseError::new(
            name,
            PathBuf::from(format!("/tmp/{name}.profile.toml")),
            "no settings found",
        )
    }

    #[test]
    fn test_empty_queue_is_drained() {
        let queue = NoticeQueue::default();
        assert!(queue.is_drained());
        assert!(!queue.had_notices());
        assert_eq!(queue.next(), None);
    }

    #[test]
    fn test_notices_surface_in_fifo_order() {
        let mut queue = NoticeQueue::new(vec![notice("first"), notice("second")]);
        assert_eq!(queue.remaining(), 2);

        let path = queue.next().unwrap().path.clone();
        assert!(path.ends_with("first.profile.toml"));
        queue.acknowledge(&path);

        let path = queue.next().unwrap().path.clone();
        assert!(path.ends_with("second.profile.toml"));
        queue.acknowledge(&path);

        assert!(queue.is_drained());
        assert!(queue.had_notices());
    }

    #[test]
    fn test_acknowledge_is_idempotent_and_ignores_unknown() {
        let mut queue = NoticeQueue::new(vec![notice("only")]);
        let path = queue.next().unwrap().path.clone();

        queue.acknowledge(&path);
        queue.acknowledge(&path);
        queue.acknowledge(Path::new("/tmp/stranger.profile.toml"));

        assert!(queue.is_drained());
        assert_eq!(queue.remaining(), 0);
    }

    #[test]
    fn test_acknowledging_out_of_order_keeps_fifo_for_rest() {
        let mut queue = NoticeQueue::new(vec![notice("a"), notice("b"), notice("c")]);
        let b_path = PathBuf::from("/tmp/b.profile.toml");
        queue.acknowledge(&b_path);

        assert!(queue.next().unwrap().path.ends_with("a.profile.toml"));
        assert_eq!(queue.remaining(), 2);
    }
}
