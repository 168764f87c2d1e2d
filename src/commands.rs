//! Guarded show/hide commands for the host's command palette
//!
//! Hosts expose a pair of toggles for the annotation layer. Each command is
//! guarded by [`ViewCommand::is_enabled`] so the pair never offers a
//! redundant toggle: show is enabled only while annotations are hidden, and
//! hide only while they are shown.

use crate::store::ErrorStore;

/// A host-invocable command over the annotation layer
pub trait ViewCommand {
    /// Whether the command would change anything right now
    fn is_enabled(&self, store: &ErrorStore) -> bool;

    /// Apply the command; the host re-renders affected buffers afterwards
    fn run(&self, store: &ErrorStore);
}

/// Turn annotation display on
pub struct ShowErrors;

impl ViewCommand for ShowErrors {
    fn is_enabled(&self, store: &ErrorStore) -> bool {
        !store.is_visible()
    }

    fn run(&self, store: &ErrorStore) {
        store.set_visible(true);
    }
}

/// Turn annotation display off without discarding the batch
pub struct HideErrors;

impl ViewCommand for HideErrors {
    fn is_enabled(&self, store: &ErrorStore) -> bool {
        store.is_visible()
    }

    fn run(&self, store: &ErrorStore) {
        store.set_visible(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guards_are_mutually_exclusive() {
        let store = ErrorStore::new();

        assert!(HideErrors.is_enabled(&store));
        assert!(!ShowErrors.is_enabled(&store));

        HideErrors.run(&store);
        assert!(!store.is_visible());
        assert!(ShowErrors.is_enabled(&store));
        assert!(!HideErrors.is_enabled(&store));

        ShowErrors.run(&store);
        assert!(store.is_visible());
    }

    #[test]
    fn test_hide_keeps_batch() {
        let store = ErrorStore::new();
        store.replace_all(vec![crate::types::ErrorRecord {
            file: crate::types::normalize_path("/tmp/a.c"),
            line: Some(1),
            column: None,
            message: "error: x".to_string(),
            class_index: 0,
        }]);

        HideErrors.run(&store);
        assert_eq!(store.len(), 1);
    }
}
