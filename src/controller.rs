//! The form controller.
//!
//! [`FormController`] owns one mounted form: the engine instance, the shared
//! state cell, the tracker subscription, the guard registration and the
//! confirmation flow. It is the only type a host usually touches.
//!
//! # Lifecycle
//!
//! 1. [`mount`](FormController::mount) composes the engine options, creates
//!    the engine, subscribes the tracker and, if `navigation_check` is set,
//!    registers the guard.
//! 2. The host renders [`form`](FormController::form) and feeds prompt
//!    answers to [`resolve`](FormController::resolve).
//! 3. [`unmount`](FormController::unmount) (or drop) disposes the instance
//!    and releases everything it registered.
//!
//! Single-threaded: state lives in `Rc<RefCell<_>>` and the controller is
//! not `Send`.
//!
//! # Example
//!
//! ```ignore
//! use form_guard::{FormController, FormOptions, MemoryHistory, last_visited_fn};
//! use std::rc::Rc;
//!
//! let history = Rc::new(MemoryHistory::new());
//! let mut controller = FormController::<MyEngine>::mount(
//!     FormOptions::new(|values| save(values)).navigation_check(true),
//!     history.clone(),
//! );
//!
//! // ... user edits, then clicks a link ...
//! if controller.state().prompt_open() {
//!     controller.discard(&last_visited_fn(|| remember_current_page()))?;
//! }
//! ```

use crate::confirm::{ConfirmationFlow, LastVisited, PromptChoice, PromptProps, PromptUi};
use crate::guards::NavigationGuard;
use crate::navigation::NavigationSource;
use crate::options::{FormEngine, FormOptions, GuardSettings, Unsubscribe};
use crate::state::{Liveness, SharedState};
use crate::tracker::FormStateTracker;
use crate::{debug_log, info_log, ControllerState, Destination, GuardError};
use std::fmt;
use std::rc::Rc;

/// A mounted form with its unsaved-changes guard.
pub struct FormController<E: FormEngine> {
    state: SharedState,
    liveness: Liveness,
    form: E,
    unsubscribe: Option<Unsubscribe>,
    flow: ConfirmationFlow,
    settings: GuardSettings,
}

impl<E: FormEngine> FormController<E> {
    /// Mount a form against `source`.
    pub fn mount(options: FormOptions<E>, source: Rc<dyn NavigationSource>) -> Self {
        let (config, settings) = options.into_parts();
        let state = ControllerState::default().shared();
        let liveness = Liveness::new();

        let form = E::create(config);
        let tracker = FormStateTracker::new(Rc::clone(&state), liveness.clone());
        let unsubscribe = form.subscribe(&FormStateTracker::observed(), tracker.listener());

        let mut flow =
            ConfirmationFlow::new(Rc::clone(&state), liveness.clone(), Rc::clone(&source));
        if settings.navigation_check {
            let guard = NavigationGuard::new(
                Rc::clone(&state),
                liveness.clone(),
                settings.bypass_routes.clone(),
            );
            flow.attach(guard.register(&*source));
        } else {
            debug_log!("Navigation check disabled; form is not guarded");
        }

        info_log!(
            "Form mounted (navigation check: {})",
            settings.navigation_check
        );

        Self {
            state,
            liveness,
            form,
            unsubscribe: Some(unsubscribe),
            flow,
            settings,
        }
    }

    /// Dispose the instance.
    ///
    /// Marks it disposed, closes any pending prompt, unsubscribes from the
    /// engine and releases the guard. Returns `false` if already unmounted.
    pub fn unmount(&mut self) -> bool {
        if !self.liveness.dispose() {
            return false;
        }

        if let Some(dropped) = self.state.borrow_mut().prompt.close() {
            debug_log!("Unmounted with pending navigation to '{}'", dropped);
        }
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
        self.flow.release_guard();

        info_log!("Form unmounted");
        true
    }

    pub fn is_mounted(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Whether a guard registration is currently active.
    pub fn is_guarding(&self) -> bool {
        self.flow.is_guarding()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ControllerState {
        self.state.borrow().clone()
    }

    /// The engine instance, for rendering fields and submitting.
    pub fn form(&self) -> &E {
        &self.form
    }

    pub fn settings(&self) -> &GuardSettings {
        &self.settings
    }

    /// Props for the prompt widget.
    pub fn prompt_props(&self) -> PromptProps {
        self.flow.props()
    }

    /// Render the prompt with the current props.
    pub fn render<P: PromptUi + ?Sized>(&self, ui: &mut P) {
        ui.render(&self.prompt_props());
    }

    /// Stay on the form.
    pub fn keep_editing(&mut self) -> Result<Destination, GuardError> {
        self.flow.keep_editing()
    }

    /// Leave the form without saving and continue the held navigation.
    pub fn discard(&mut self, last_visited: &dyn LastVisited) -> Result<Destination, GuardError> {
        self.flow.discard(last_visited)
    }

    /// Apply a prompt answer.
    pub fn resolve(
        &mut self,
        choice: PromptChoice,
        last_visited: &dyn LastVisited,
    ) -> Result<Destination, GuardError> {
        self.flow.resolve(choice, last_visited)
    }
}

impl<E: FormEngine> Drop for FormController<E> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<E: FormEngine> fmt::Debug for FormController<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("state", &self.state)
            .field("mounted", &self.is_mounted())
            .field("guarding", &self.is_guarding())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{FormConfig, Mutators, StateListener, Subscription};
    use crate::{last_visited_fn, FormState, MemoryHistory};
    use std::cell::{Cell, RefCell};

    /// Engine that keeps a single listener and counts unsubscriptions.
    struct SingleListenerForm {
        listener: Rc<RefCell<Option<StateListener>>>,
        unsubscribed: Rc<Cell<bool>>,
    }

    impl SingleListenerForm {
        fn emit(&self, state: &FormState) {
            if let Some(listener) = self.listener.borrow().as_ref() {
                listener(state);
            }
        }
    }

    impl FormEngine for SingleListenerForm {
        type Values = ();
        type Decorator = ();
        type Mutator = ();
        type Options = ();

        fn create(_config: FormConfig<Self>) -> Self {
            Self {
                listener: Rc::new(RefCell::new(None)),
                unsubscribed: Rc::new(Cell::new(false)),
            }
        }

        fn subscribe(&self, _subscription: &Subscription, listener: StateListener) -> Unsubscribe {
            *self.listener.borrow_mut() = Some(listener);
            let flag = Rc::clone(&self.unsubscribed);
            Box::new(move || flag.set(true))
        }

        fn focus_on_errors() -> Self::Decorator {}

        fn array_mutators() -> Mutators<Self::Mutator> {
            Mutators::new()
        }
    }

    fn mount(check: bool) -> (FormController<SingleListenerForm>, Rc<MemoryHistory>) {
        let history = Rc::new(MemoryHistory::new());
        let controller = FormController::mount(
            FormOptions::new(|_: &()| Ok(())).navigation_check(check),
            history.clone(),
        );
        (controller, history)
    }

    #[test]
    fn test_mount_registers_guard_when_enabled() {
        let (controller, history) = mount(true);
        assert!(controller.is_mounted());
        assert!(controller.is_guarding());
        assert!(history.is_blocked());
    }

    #[test]
    fn test_mount_without_navigation_check() {
        let (controller, history) = mount(false);
        assert!(!controller.is_guarding());
        assert!(!history.is_blocked());

        controller.form().emit(&FormState {
            dirty: true,
            ..FormState::default()
        });
        assert!(history.navigate("/elsewhere").is_committed());
        assert!(!controller.state().prompt_open());
    }

    #[test]
    fn test_unmount_disposes_and_releases() {
        let (mut controller, history) = mount(true);
        controller.form().emit(&FormState {
            dirty: true,
            ..FormState::default()
        });
        assert!(history.navigate("/next").is_blocked());
        assert!(controller.prompt_props().open);

        assert!(controller.unmount());
        assert!(!controller.unmount());
        assert!(!history.is_blocked());
        assert!(controller.form().unsubscribed.get());
        assert!(!controller.prompt_props().open);

        let before = controller.state();
        controller.form().emit(&FormState {
            submitting: true,
            ..FormState::default()
        });
        assert_eq!(controller.state(), before);
        assert_eq!(
            controller.discard(&last_visited_fn(|| {})),
            Err(GuardError::Disposed)
        );
    }

    #[test]
    fn test_drop_releases_guard() {
        let (controller, history) = mount(true);
        drop(controller);
        assert!(!history.is_blocked());
    }
}
