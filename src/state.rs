//! Controller state
//!
//! [`ControllerState`] is the single mutable cell shared between the form
//! state tracker, the navigation guard predicate and the confirmation flow.
//! It combines the observed slice of form state ([`FormSnapshot`]) with the
//! prompt machine ([`PromptState`]).

use crate::Destination;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Shared handle to the controller state.
///
/// Every reader borrows it at call time, so callbacks registered once at
/// mount always observe the most recent update.
pub type SharedState = Rc<RefCell<ControllerState>>;

// ============================================================================
// FormState / FormSnapshot
// ============================================================================

/// Live form state as emitted by a form engine.
///
/// Engines fill in whatever they track; the guard only ever reads the four
/// fields captured by [`FormSnapshot::observe`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[allow(clippy::struct_excessive_bools)]
pub struct FormState {
    pub active: Option<String>,
    pub dirty: bool,
    pub dirty_since_last_submit: bool,
    pub invalid: bool,
    pub pristine: bool,
    pub submit_failed: bool,
    pub submit_succeeded: bool,
    pub submitting: bool,
    pub valid: bool,
    pub validating: bool,
}

/// The slice of form state the guard depends on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[allow(clippy::struct_excessive_bools)]
pub struct FormSnapshot {
    pub dirty: bool,
    pub invalid: bool,
    pub submitting: bool,
    pub submit_succeeded: bool,
}

impl FormSnapshot {
    /// Copy the observed fields out of a full form state.
    pub fn observe(state: &FormState) -> Self {
        Self {
            dirty: state.dirty,
            invalid: state.invalid,
            submitting: state.submitting,
            submit_succeeded: state.submit_succeeded,
        }
    }

    /// Whether leaving now would lose edits.
    ///
    /// A form that is mid-submit or has already been submitted successfully
    /// never prompts, even if it still reports dirty.
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty && !self.submit_succeeded && !self.submitting
    }
}

// ============================================================================
// PromptState
// ============================================================================

/// Confirmation prompt machine.
///
/// The pending destination lives inside the `PendingDecision` variant, so a
/// destination is recorded exactly when the prompt is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PromptState {
    /// No confirmation pending.
    #[default]
    Idle,
    /// A navigation is held until the user decides.
    PendingDecision {
        /// Where the held navigation was going.
        destination: Destination,
    },
}

impl PromptState {
    /// Move `Idle → PendingDecision`.
    ///
    /// Returns `false` and leaves the recorded destination untouched if a
    /// decision is already pending.
    pub fn open(&mut self, destination: Destination) -> bool {
        match self {
            Self::Idle => {
                *self = Self::PendingDecision { destination };
                true
            }
            Self::PendingDecision { .. } => false,
        }
    }

    /// Move back to `Idle`, returning the destination that was pending.
    pub fn close(&mut self) -> Option<Destination> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::PendingDecision { destination } => Some(destination),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::PendingDecision { .. })
    }

    pub fn pending_destination(&self) -> Option<&Destination> {
        match self {
            Self::Idle => None,
            Self::PendingDecision { destination } => Some(destination),
        }
    }
}

// ============================================================================
// ControllerState
// ============================================================================

/// Everything the controller tracks for one mounted form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    /// Latest observed form state.
    pub form: FormSnapshot,
    /// Confirmation prompt machine.
    pub prompt: PromptState,
}

impl ControllerState {
    pub fn dirty(&self) -> bool {
        self.form.dirty
    }

    pub fn invalid(&self) -> bool {
        self.form.invalid
    }

    pub fn submitting(&self) -> bool {
        self.form.submitting
    }

    pub fn submit_succeeded(&self) -> bool {
        self.form.submit_succeeded
    }

    pub fn prompt_open(&self) -> bool {
        self.prompt.is_open()
    }

    pub fn pending_destination(&self) -> Option<&Destination> {
        self.prompt.pending_destination()
    }

    pub(crate) fn shared(self) -> SharedState {
        Rc::new(RefCell::new(self))
    }
}

// ============================================================================
// Liveness
// ============================================================================

/// Disposal flag shared by everything that may call back into a controller.
///
/// Cloning shares the flag. Once [`dispose`](Self::dispose) runs, every clone
/// reports the instance as gone.
#[derive(Debug, Clone)]
pub struct Liveness(Rc<Cell<bool>>);

impl Liveness {
    /// Create a live flag.
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    /// Mark the instance disposed. Returns `true` only for the call that
    /// actually flipped the flag.
    pub fn dispose(&self) -> bool {
        self.0.replace(false)
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}
