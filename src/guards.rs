//! Unsaved-changes navigation guard.
//!
//! The guard installs one predicate with the [`NavigationSource`] and answers
//! every transition attempt synchronously:
//!
//! 1. destination under a [bypass route](BypassRoutes) → allow, no state change;
//! 2. form has unsaved changes (`dirty && !submit_succeeded && !submitting`)
//!    → hold the navigation and open the confirmation prompt;
//! 3. otherwise → allow.
//!
//! While a decision is already pending, an attempt that would prompt is held
//! without replacing the recorded destination. Attempts the rule allows still
//! go through.
//!
//! The predicate reads the shared controller state at call time, never a copy
//! taken at registration.
//!
//! # Example
//!
//! ```
//! use form_guard::{decide, BypassRoutes, Destination, FormSnapshot, GuardDecision};
//!
//! let dirty = FormSnapshot { dirty: true, ..FormSnapshot::default() };
//! let bypass = BypassRoutes::default();
//!
//! assert_eq!(decide(&dirty, &Destination::parse("/items/5"), &bypass), GuardDecision::Prompt);
//! assert_eq!(decide(&dirty, &Destination::parse("/logout"), &bypass), GuardDecision::Bypass);
//! ```

use crate::navigation::{BlockPredicate, NavigationSource, UnblockHandle};
use crate::state::{Liveness, SharedState};
use crate::{debug_log, info_log, trace_log, Destination, FormSnapshot};
use std::fmt;
use std::rc::Rc;

/// Path prefix exempt from the guard by default.
pub const LOGOUT_PATH: &str = "/logout";

// ============================================================================
// BypassRoutes
// ============================================================================

/// Path prefixes that are never intercepted.
///
/// Logging out must never be blocked by a stale dirty flag, so the default
/// list contains [`LOGOUT_PATH`] and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BypassRoutes {
    prefixes: Vec<String>,
}

impl BypassRoutes {
    /// An empty list: every destination is subject to the guard.
    pub fn none() -> Self {
        Self {
            prefixes: Vec::new(),
        }
    }

    /// Add a prefix.
    #[must_use]
    pub fn with(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    /// Whether `destination`'s pathname starts with any listed prefix.
    pub fn matches(&self, destination: &Destination) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| destination.starts_with(prefix))
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

impl Default for BypassRoutes {
    fn default() -> Self {
        Self::none().with(LOGOUT_PATH)
    }
}

impl<S: Into<String>> FromIterator<S> for BypassRoutes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            prefixes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Decision rule
// ============================================================================

/// Answer to a single transition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Destination is a bypass route.
    Bypass,
    /// Nothing to lose; let the navigation through.
    Allow,
    /// Hold the navigation and ask the user.
    Prompt,
}

impl GuardDecision {
    /// The boolean handed back to the navigation source.
    pub fn allows(self) -> bool {
        !matches!(self, Self::Prompt)
    }
}

/// Apply the decision rule to a form snapshot.
pub fn decide(
    form: &FormSnapshot,
    destination: &Destination,
    bypass: &BypassRoutes,
) -> GuardDecision {
    if bypass.matches(destination) {
        GuardDecision::Bypass
    } else if form.has_unsaved_changes() {
        GuardDecision::Prompt
    } else {
        GuardDecision::Allow
    }
}

// ============================================================================
// GuardRegistration
// ============================================================================

/// Ownership of an installed blocker.
///
/// Releasing is idempotent, and dropping an active registration releases it.
#[must_use = "dropping the registration removes the navigation guard"]
pub struct GuardRegistration {
    unblock: Option<UnblockHandle>,
}

impl GuardRegistration {
    /// Wrap the handle returned by [`NavigationSource::block`].
    pub fn new(unblock: UnblockHandle) -> Self {
        Self {
            unblock: Some(unblock),
        }
    }

    pub fn is_active(&self) -> bool {
        self.unblock.is_some()
    }

    /// Remove the blocker. Returns `false` if it was already released.
    pub fn release(&mut self) -> bool {
        match self.unblock.take() {
            Some(unblock) => {
                unblock();
                info_log!("Navigation guard released");
                true
            }
            None => false,
        }
    }
}

impl Drop for GuardRegistration {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for GuardRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardRegistration")
            .field("active", &self.is_active())
            .finish()
    }
}

// ============================================================================
// NavigationGuard
// ============================================================================

/// The interception predicate bound to one controller's state.
#[derive(Clone)]
pub struct NavigationGuard {
    state: SharedState,
    liveness: Liveness,
    bypass: Rc<BypassRoutes>,
}

impl NavigationGuard {
    pub fn new(state: SharedState, liveness: Liveness, bypass: BypassRoutes) -> Self {
        Self {
            state,
            liveness,
            bypass: Rc::new(bypass),
        }
    }

    /// Evaluate one transition attempt. `true` lets it through.
    ///
    /// On [`GuardDecision::Prompt`] the destination is recorded and the prompt
    /// opens. A disposed controller never holds a navigation.
    pub fn check(&self, destination: &Destination) -> bool {
        if !self.liveness.is_alive() {
            trace_log!("Guard disposed; allowing '{}'", destination);
            return true;
        }

        let mut state = self.state.borrow_mut();
        let decision = decide(&state.form, destination, &self.bypass);
        trace_log!("Guard decision for '{}': {:?}", destination, decision);

        match decision {
            GuardDecision::Bypass => {
                debug_log!("Navigation to bypass route '{}' allowed", destination);
            }
            GuardDecision::Prompt if state.prompt_open() => {
                debug_log!(
                    "Navigation to '{}' held: a confirmation is already pending",
                    destination
                );
            }
            GuardDecision::Prompt => {
                state.prompt.open(destination.clone());
                debug_log!(
                    "Navigation to '{}' held: unsaved changes, prompting",
                    destination
                );
            }
            GuardDecision::Allow => {}
        }

        decision.allows()
    }

    /// Install this guard as `source`'s blocker.
    pub fn register<N: NavigationSource + ?Sized>(&self, source: &N) -> GuardRegistration {
        let guard = self.clone();
        let predicate: BlockPredicate = Rc::new(move |destination: &Destination| {
            guard.check(destination)
        });
        let registration = GuardRegistration::new(source.block(predicate));
        info_log!(
            "Navigation guard registered (bypass: {:?})",
            self.bypass.prefixes()
        );
        registration
    }

    pub fn bypass_routes(&self) -> &BypassRoutes {
        &self.bypass
    }
}

impl fmt::Debug for NavigationGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationGuard")
            .field("bypass", &self.bypass)
            .field("alive", &self.liveness.is_alive())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
