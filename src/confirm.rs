//! Confirmation flow for held navigations.
//!
//! ```text
//!            guard: unsaved changes
//!   Idle ─────────────────────────────▶ PendingDecision
//!    ▲                                       │
//!    └──── Keep Editing / Discard ───────────┘
//! ```
//!
//! - **Keep Editing** closes the prompt. The guard stays registered and no
//!   navigation happens.
//! - **Discard** closes the prompt, lets the [`LastVisited`] collaborator
//!   cache the current location, releases the guard so the authorized
//!   navigation is not intercepted again, then navigates to the held
//!   destination exactly once.
//!
//! The machine never terminates; it cycles for the controller's lifetime.

use crate::guards::GuardRegistration;
use crate::navigation::NavigationSource;
use crate::state::{Liveness, SharedState};
use crate::{debug_log, info_log, Destination, GuardError};
use std::fmt;
use std::rc::Rc;

/// DOM-style id of the prompt.
pub const PROMPT_ID: &str = "cancel-editing-confirmation";

/// Message ids rendered by the prompt. Translation is the host's concern.
pub mod messages {
    pub const HEADING: &str = "form-guard.areYouSure";
    pub const UNSAVED_CHANGES: &str = "form-guard.unsavedChanges";
    pub const KEEP_EDITING: &str = "form-guard.keepEditing";
    pub const CLOSE_WITHOUT_SAVING: &str = "form-guard.closeWithoutSaving";
}

// ============================================================================
// Collaborators
// ============================================================================

/// Remembers the location the user is leaving, for later restoration.
pub trait LastVisited {
    /// Called immediately before a Discard-triggered navigation.
    fn cache_previous_url(&self);
}

/// Create a [`LastVisited`] from a closure.
pub const fn last_visited_fn<F: Fn()>(f: F) -> FnLastVisited<F> {
    FnLastVisited { f }
}

/// [`LastVisited`] created via [`last_visited_fn`].
pub struct FnLastVisited<F> {
    f: F,
}

impl<F: Fn()> LastVisited for FnLastVisited<F> {
    fn cache_previous_url(&self) {
        (self.f)();
    }
}

/// The user's answer to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    /// Stay on the form.
    KeepEditing,
    /// Leave and lose the changes.
    Discard,
}

/// What a prompt widget needs to render.
///
/// The confirm control keeps editing; the cancel control closes without
/// saving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptProps {
    pub id: &'static str,
    pub open: bool,
    pub heading: &'static str,
    pub message: &'static str,
    pub confirm_label: &'static str,
    pub cancel_label: &'static str,
}

impl PromptProps {
    pub fn new(open: bool) -> Self {
        Self {
            id: PROMPT_ID,
            open,
            heading: messages::HEADING,
            message: messages::UNSAVED_CHANGES,
            confirm_label: messages::KEEP_EDITING,
            cancel_label: messages::CLOSE_WITHOUT_SAVING,
        }
    }

    /// Choice bound to the confirm control.
    pub const fn on_confirm() -> PromptChoice {
        PromptChoice::KeepEditing
    }

    /// Choice bound to the cancel control.
    pub const fn on_cancel() -> PromptChoice {
        PromptChoice::Discard
    }
}

/// Prompt widget.
///
/// Must deliver exactly one of [`PromptProps::on_confirm`] /
/// [`PromptProps::on_cancel`] per open cycle back to the controller.
pub trait PromptUi {
    fn render(&mut self, props: &PromptProps);
}

// ============================================================================
// ConfirmationFlow
// ============================================================================

/// Owns the guard registration and the navigation side of the prompt.
pub struct ConfirmationFlow {
    state: SharedState,
    liveness: Liveness,
    source: Rc<dyn NavigationSource>,
    registration: Option<GuardRegistration>,
}

impl ConfirmationFlow {
    pub fn new(state: SharedState, liveness: Liveness, source: Rc<dyn NavigationSource>) -> Self {
        Self {
            state,
            liveness,
            source,
            registration: None,
        }
    }

    /// Take ownership of the guard registration.
    pub fn attach(&mut self, registration: GuardRegistration) {
        self.registration = Some(registration);
    }

    pub fn is_guarding(&self) -> bool {
        self.registration
            .as_ref()
            .is_some_and(GuardRegistration::is_active)
    }

    /// Release the guard. Safe to call any number of times.
    pub fn release_guard(&mut self) -> bool {
        self.registration
            .as_mut()
            .is_some_and(GuardRegistration::release)
    }

    pub fn props(&self) -> PromptProps {
        PromptProps::new(self.state.borrow().prompt_open())
    }

    /// Stay on the form: `PendingDecision → Idle`, no navigation.
    pub fn keep_editing(&mut self) -> Result<Destination, GuardError> {
        let destination = self.close()?;
        debug_log!("Keep editing; dropped navigation to '{}'", destination);
        Ok(destination)
    }

    /// Leave without saving: `PendingDecision → Idle`, then navigate.
    pub fn discard(&mut self, last_visited: &dyn LastVisited) -> Result<Destination, GuardError> {
        let destination = self.close()?;
        info_log!(
            "Discarding unsaved changes; navigating to '{}'",
            destination.href()
        );

        last_visited.cache_previous_url();
        self.release_guard();
        self.source.push(&destination.href());
        Ok(destination)
    }

    /// Dispatch a prompt answer.
    pub fn resolve(
        &mut self,
        choice: PromptChoice,
        last_visited: &dyn LastVisited,
    ) -> Result<Destination, GuardError> {
        match choice {
            PromptChoice::KeepEditing => self.keep_editing(),
            PromptChoice::Discard => self.discard(last_visited),
        }
    }

    fn close(&self) -> Result<Destination, GuardError> {
        if !self.liveness.is_alive() {
            return Err(GuardError::Disposed);
        }
        self.state
            .borrow_mut()
            .prompt
            .close()
            .ok_or(GuardError::NoPendingNavigation)
    }
}

impl fmt::Debug for ConfirmationFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmationFlow")
            .field("state", &self.state)
            .field("guarding", &self.is_guarding())
            .finish_non_exhaustive()
    }
}
