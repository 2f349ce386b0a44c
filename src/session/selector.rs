use dracin_source_manager::prelude::{SourceDescriptor, SourceId};
use tokio::sync::watch;

/// The only mutable handle over the active source.
#[derive(Debug)]
pub struct SourceSelector(watch::Sender<SourceId>);

/// Read only view of the active source.
#[derive(Clone, Debug)]
pub struct SourceSelection(watch::Receiver<SourceId>);

impl Default for SourceSelector {
    fn default() -> Self {
        Self::new(SourceId::default())
    }
}

impl SourceSelector {
    pub fn new(initial: SourceId) -> Self {
        let (sender, _) = watch::channel(initial);
        Self(sender)
    }

    pub fn current(&self) -> SourceId {
        *self.0.borrow()
    }

    pub fn descriptor(&self) -> &'static SourceDescriptor {
        self.current().descriptor()
    }

    /// Returns `true` when the active source actually changed.
    pub fn set_current(&self, id: SourceId) -> bool {
        self.0.send_if_modified(|current| {
            if *current == id {
                false
            } else {
                tracing::debug!("switching source from {current} to {id}");
                *current = id;
                true
            }
        })
    }

    pub fn selection(&self) -> SourceSelection {
        SourceSelection(self.0.subscribe())
    }
}

impl SourceSelection {
    pub fn current(&self) -> SourceId {
        *self.0.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_first_source() {
        let selector = SourceSelector::default();
        assert_eq!(selector.current(), SourceId::Dramabox);
        assert_eq!(selector.descriptor().display_name, "DramaBox");
    }

    #[test]
    fn should_be_idempotent() {
        let selector = SourceSelector::default();
        assert!(selector.set_current(SourceId::Melolo));
        assert!(!selector.set_current(SourceId::Melolo));
        assert_eq!(selector.current(), SourceId::Melolo);
    }

    #[test]
    fn selection_should_see_changes_immediately() {
        let selector = SourceSelector::default();
        let selection = selector.selection();
        selector.set_current(SourceId::Freereels);
        assert_eq!(selection.current(), SourceId::Freereels);
        selector.set_current(SourceId::Netshort);
        assert_eq!(selection.clone().current(), SourceId::Netshort);
    }
}
