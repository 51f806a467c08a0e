//! Registry of open overlay dialogs.
//!
//! Forced navigation to the login view (for example after a 401 mid-action)
//! must not leave an unrelated dialog stacked over the login form, so the
//! controller closes everything tracked here before probing the backend.

use std::cell::{Cell, RefCell};
use std::fmt::{self, Debug, Formatter};

use tracing::debug;

/// A displayed dialog that can be dismissed.
pub trait ModalHandle {
    /// Dismiss the dialog. Must tolerate repeated calls.
    fn close(&self);
}

impl<F: Fn()> ModalHandle for F {
    fn close(&self) {
        self();
    }
}

/// Registry-assigned identifier of an open dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModalId(u64);

impl ModalId {
    /// Raw numeric value, for keyed rendering.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Ordered registry of currently open dialogs.
#[derive(Default)]
pub struct ModalRegistry {
    open: RefCell<Vec<(ModalId, Box<dyn ModalHandle>)>>,
    next_id: Cell<u64>,
}

impl ModalRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a newly displayed dialog.
    pub fn open(&self, handle: impl ModalHandle + 'static) -> ModalId {
        let id = ModalId(self.next_id.get());
        self.next_id.set(self.next_id.get().wrapping_add(1));
        self.open.borrow_mut().push((id, Box::new(handle)));
        id
    }

    /// Close and forget one dialog. Returns `false` when it was not tracked.
    pub fn close(&self, id: ModalId) -> bool {
        let removed = {
            let mut open = self.open.borrow_mut();
            open.iter()
                .position(|(candidate, _)| *candidate == id)
                .map(|index| open.remove(index))
        };
        removed.is_some_and(|(_, handle)| {
            handle.close();
            true
        })
    }

    /// Number of tracked dialogs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.open.borrow().len()
    }

    /// Whether no dialog is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.borrow().is_empty()
    }

    /// Close every tracked dialog, most recent first, and empty the registry.
    ///
    /// Handles are detached before being closed, so a handle that calls back
    /// into [`ModalRegistry::close`] finds nothing left to close.
    pub fn close_all(&self) -> usize {
        let drained = std::mem::take(&mut *self.open.borrow_mut());
        let count = drained.len();
        for (_, handle) in drained.into_iter().rev() {
            handle.close();
        }
        if count > 0 {
            debug!(count, "closed open dialogs");
        }
        count
    }
}

impl Debug for ModalRegistry {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ModalRegistry")
            .field("open", &self.len())
            .finish_non_exhaustive()
    }
}
