//! Form engine contract and option composition.
//!
//! The form engine (field registration, values, validation) is external.
//! This module defines what the guard needs from it ([`FormEngine`]) and how
//! caller-supplied options are merged with the guard's own requirements
//! before the engine is created ([`FormOptions::into_config`]):
//!
//! | Option | Rule |
//! |--------|------|
//! | decorators | engine's focus-on-errors decorator first, then the caller's |
//! | mutators | caller's, then the engine's array mutators on top |
//! | subscription | `{initialValues, submitting, pristine}` ∪ caller keys |
//! | `on_submit`, `initial_values`, engine options | forwarded unmodified |

use crate::guards::BypassRoutes;
use crate::FormState;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::Rc;

// ============================================================================
// Subscription
// ============================================================================

/// A form-state field an engine subscriber can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum SubscriptionKey {
    Active,
    Dirty,
    DirtySinceLastSubmit,
    Errors,
    InitialValues,
    Invalid,
    Pristine,
    SubmitFailed,
    SubmitSucceeded,
    Submitting,
    Valid,
    Validating,
    Values,
}

/// Set of subscribed form-state fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Subscription {
    keys: BTreeSet<SubscriptionKey>,
}

impl Subscription {
    /// Empty subscription.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fields the form itself always re-renders on.
    pub fn form_defaults() -> Self {
        [
            SubscriptionKey::InitialValues,
            SubscriptionKey::Submitting,
            SubscriptionKey::Pristine,
        ]
        .into_iter()
        .collect()
    }

    /// Add a key.
    #[must_use]
    pub fn with(mut self, key: SubscriptionKey) -> Self {
        self.keys.insert(key);
        self
    }

    /// Add every key of `other`. Existing keys are never removed.
    pub fn extend_from(&mut self, other: &Subscription) {
        self.keys.extend(other.keys.iter().copied());
    }

    pub fn contains(&self, key: SubscriptionKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = SubscriptionKey> + '_ {
        self.keys.iter().copied()
    }
}

impl FromIterator<SubscriptionKey> for Subscription {
    fn from_iter<I: IntoIterator<Item = SubscriptionKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// FormEngine
// ============================================================================

/// Submission errors keyed by field name. Opaque to the guard.
pub type SubmitErrors = BTreeMap<String, String>;

/// Result of a submit handler.
pub type SubmitResult = Result<(), SubmitErrors>;

/// Submit handler forwarded to the engine.
pub type SubmitHandler<V> = Rc<dyn Fn(&V) -> SubmitResult>;

/// Callback receiving form-state emissions.
pub type StateListener = Box<dyn Fn(&FormState)>;

/// Removes a state listener.
pub type Unsubscribe = Box<dyn FnOnce()>;

/// Named mutators handed to the engine.
pub type Mutators<M> = BTreeMap<String, M>;

/// The external form engine.
///
/// The engine owns its plugins: the focus-first-invalid-field decorator and
/// the array-editing mutators are supplied by the engine and only wired in
/// by the guard.
pub trait FormEngine: Sized + 'static {
    /// Form values.
    type Values: 'static;
    /// Engine decorator (e.g. focus-on-errors).
    type Decorator;
    /// Engine mutator (e.g. array `push`/`remove`).
    type Mutator;
    /// Engine-specific settings the guard passes through untouched
    /// (validation mode, keep-dirty-on-reinitialize and the like).
    type Options: Default;

    /// Create a form from fully composed options.
    fn create(config: FormConfig<Self>) -> Self;

    /// Emit state for the subscribed fields to `listener` on every change.
    fn subscribe(&self, subscription: &Subscription, listener: StateListener) -> Unsubscribe;

    /// Decorator that focuses the first invalid field on submit.
    fn focus_on_errors() -> Self::Decorator;

    /// Array-editing mutators, keyed by name.
    fn array_mutators() -> Mutators<Self::Mutator>;
}

// ============================================================================
// GuardSettings
// ============================================================================

/// Guard configuration.
///
/// `navigation_check` enables the whole guard; when it is `false` nothing is
/// registered and nothing ever prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct GuardSettings {
    pub navigation_check: bool,
    pub bypass_routes: BypassRoutes,
}

// ============================================================================
// FormOptions / FormConfig
// ============================================================================

/// Options as given by the caller.
pub struct FormOptions<E: FormEngine> {
    on_submit: SubmitHandler<E::Values>,
    initial_values: Option<E::Values>,
    decorators: Vec<E::Decorator>,
    mutators: Mutators<E::Mutator>,
    subscription: Subscription,
    engine: E::Options,
    settings: GuardSettings,
}

/// Options after composition, ready for [`FormEngine::create`].
pub struct FormConfig<E: FormEngine> {
    pub on_submit: SubmitHandler<E::Values>,
    pub initial_values: Option<E::Values>,
    pub decorators: Vec<E::Decorator>,
    pub mutators: Mutators<E::Mutator>,
    pub subscription: Subscription,
    pub engine: E::Options,
}

impl<E: FormEngine> FormOptions<E> {
    /// Start from a submit handler.
    pub fn new<F>(on_submit: F) -> Self
    where
        F: Fn(&E::Values) -> SubmitResult + 'static,
    {
        Self {
            on_submit: Rc::new(on_submit),
            initial_values: None,
            decorators: Vec::new(),
            mutators: Mutators::new(),
            subscription: Subscription::new(),
            engine: E::Options::default(),
            settings: GuardSettings::default(),
        }
    }

    #[must_use]
    pub fn initial_values(mut self, values: E::Values) -> Self {
        self.initial_values = Some(values);
        self
    }

    /// Append a caller decorator (runs after focus-on-errors).
    #[must_use]
    pub fn decorator(mut self, decorator: E::Decorator) -> Self {
        self.decorators.push(decorator);
        self
    }

    /// Add a caller mutator.
    #[must_use]
    pub fn mutator(mut self, name: impl Into<String>, mutator: E::Mutator) -> Self {
        self.mutators.insert(name.into(), mutator);
        self
    }

    /// Subscribe the form to an extra field.
    #[must_use]
    pub fn subscribe_to(mut self, key: SubscriptionKey) -> Self {
        self.subscription.keys.insert(key);
        self
    }

    /// Engine settings, forwarded as given.
    #[must_use]
    pub fn engine_options(mut self, options: E::Options) -> Self {
        self.engine = options;
        self
    }

    /// Enable or disable the unsaved-changes guard.
    #[must_use]
    pub fn navigation_check(mut self, enabled: bool) -> Self {
        self.settings.navigation_check = enabled;
        self
    }

    /// Replace the bypass route list.
    #[must_use]
    pub fn bypass_routes(mut self, routes: BypassRoutes) -> Self {
        self.settings.bypass_routes = routes;
        self
    }

    /// Replace the guard settings wholesale.
    #[must_use]
    pub fn settings(mut self, settings: GuardSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn guard_settings(&self) -> &GuardSettings {
        &self.settings
    }

    /// Compose the engine options, dropping the guard settings.
    pub fn into_config(self) -> FormConfig<E> {
        self.into_parts().0
    }

    /// Compose the engine options and hand back the guard settings.
    pub fn into_parts(self) -> (FormConfig<E>, GuardSettings) {
        let mut decorators = Vec::with_capacity(self.decorators.len() + 1);
        decorators.push(E::focus_on_errors());
        decorators.extend(self.decorators);

        let mut mutators = self.mutators;
        mutators.extend(E::array_mutators());

        let mut subscription = Subscription::form_defaults();
        subscription.extend_from(&self.subscription);

        let config = FormConfig {
            on_submit: self.on_submit,
            initial_values: self.initial_values,
            decorators,
            mutators,
            subscription,
            engine: self.engine,
        };
        (config, self.settings)
    }
}

impl<E: FormEngine> fmt::Debug for FormOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormOptions")
            .field("decorators", &self.decorators.len())
            .field("mutators", &self.mutators.keys().collect::<Vec<_>>())
            .field("subscription", &self.subscription)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl<E: FormEngine> fmt::Debug for FormConfig<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormConfig")
            .field("decorators", &self.decorators.len())
            .field("mutators", &self.mutators.keys().collect::<Vec<_>>())
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}
