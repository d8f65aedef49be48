//! Unsaved-changes navigation guard for data-entry forms.
//!
//! `form-guard` sits between a form engine and a router. It tracks whether a
//! form holds unsaved edits, intercepts navigation away from it, and drives a
//! "discard changes / keep editing" confirmation prompt.
//!
//! # Pieces
//!
//! | Module | Role |
//! |--------|------|
//! | [`tracker`] | Subscribes to `{dirty, invalid, submitting, submitSucceeded}` |
//! | [`guards`] | Decision rule, bypass routes, blocker registration |
//! | [`confirm`] | Idle ⇄ PendingDecision machine, prompt props |
//! | [`options`] | Form engine contract and option composition |
//! | [`controller`] | Mount/unmount wiring of everything above |
//! | [`history`] | In-memory [`NavigationSource`] |
//!
//! The form engine, the router and the prompt widget are external and sit
//! behind [`FormEngine`], [`NavigationSource`] and [`PromptUi`].
//!
//! # Data flow
//!
//! ```text
//! FormEngine ──emits──▶ FormStateTracker ──writes──▶ ControllerState
//!                                                        ▲   │
//! NavigationSource ──attempt──▶ NavigationGuard ──reads──┘   │ opens prompt
//!        ▲                                                   ▼
//!        └────────── push(href) ◀── Discard ── ConfirmationFlow ◀── PromptUi
//! ```
//!
//! # Feature flags
//!
//! | Feature | Default | Effect |
//! |---------|---------|--------|
//! | `log` | yes | Log through the `log` crate |
//! | `tracing` | no | Log through `tracing` instead |
//! | `serde` | no | Serialize/deserialize locations, snapshots and settings |

pub mod confirm;
pub mod controller;
pub mod error;
pub mod guards;
pub mod history;
pub mod location;
pub mod logging;
pub mod navigation;
pub mod options;
pub mod state;
pub mod tracker;

pub use confirm::{
    last_visited_fn, messages, ConfirmationFlow, FnLastVisited, LastVisited, PromptChoice,
    PromptProps, PromptUi, PROMPT_ID,
};
pub use controller::FormController;
pub use error::GuardError;
pub use guards::{
    decide, BypassRoutes, GuardDecision, GuardRegistration, NavigationGuard, LOGOUT_PATH,
};
pub use history::{HistoryAction, MemoryHistory, NavigationOutcome};
pub use location::Destination;
pub use navigation::{BlockPredicate, NavigationSource, UnblockHandle};
pub use options::{
    FormConfig, FormEngine, FormOptions, GuardSettings, Mutators, StateListener, SubmitErrors,
    SubmitHandler, SubmitResult, Subscription, SubscriptionKey, Unsubscribe,
};
pub use state::{ControllerState, FormSnapshot, FormState, Liveness, PromptState, SharedState};
pub use tracker::{FormStateTracker, OBSERVED_FIELDS};
