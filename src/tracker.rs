//! Form state tracker.
//!
//! Subscribes to the engine with a fixed, minimal field set and copies each
//! emission into the controller state, so the guard predicate can check the
//! dirty flags without re-deriving them from full form state.

use crate::options::{StateListener, Subscription, SubscriptionKey};
use crate::state::{Liveness, SharedState};
use crate::{debug_log, trace_log, FormSnapshot, FormState};

/// Fields the tracker subscribes to.
pub const OBSERVED_FIELDS: [SubscriptionKey; 4] = [
    SubscriptionKey::Dirty,
    SubscriptionKey::Invalid,
    SubscriptionKey::Submitting,
    SubscriptionKey::SubmitSucceeded,
];

/// Republishes form-engine emissions as controller state.
#[derive(Debug, Clone)]
pub struct FormStateTracker {
    state: SharedState,
    liveness: Liveness,
}

impl FormStateTracker {
    pub fn new(state: SharedState, liveness: Liveness) -> Self {
        Self { state, liveness }
    }

    /// The subscription to request from the engine.
    pub fn observed() -> Subscription {
        OBSERVED_FIELDS.into_iter().collect()
    }

    /// Apply one emission.
    ///
    /// Returns `false` when the controller is already disposed; the update is
    /// dropped and nothing is mutated.
    pub fn on_change(&self, update: &FormState) -> bool {
        if !self.liveness.is_alive() {
            trace_log!("Dropping form state update after unmount");
            return false;
        }

        let snapshot = FormSnapshot::observe(update);
        let mut state = self.state.borrow_mut();
        if state.form != snapshot {
            debug_log!("Form state changed: {:?} → {:?}", state.form, snapshot);
            state.form = snapshot;
        }
        true
    }

    /// Boxed callback for [`FormEngine::subscribe`](crate::FormEngine::subscribe).
    pub fn listener(&self) -> StateListener {
        let tracker = self.clone();
        Box::new(move |update: &FormState| {
            tracker.on_change(update);
        })
    }
}
