//! Test utilities for guard integration tests
//!
//! Provides a recording form engine, a recording prompt widget and a
//! last-visited collaborator that logs into a shared event list.

#![allow(dead_code)]

use form_guard::*;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

pub type Values = BTreeMap<String, String>;

/// Shared, ordered log of collaborator calls.
pub type Events = Rc<RefCell<Vec<String>>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn events() -> Events {
    Rc::new(RefCell::new(Vec::new()))
}

// ============================================================================
// MockForm
// ============================================================================

type Listeners = Rc<RefCell<Vec<(usize, Subscription, StateListener)>>>;

/// Form engine that records its config and lets tests emit state.
pub struct MockForm {
    pub config: FormConfig<MockForm>,
    listeners: Listeners,
    next_id: RefCell<usize>,
}

impl MockForm {
    /// Send `state` to every subscriber.
    pub fn emit(&self, state: FormState) {
        for (_, _, listener) in self.listeners.borrow().iter() {
            listener(&state);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.listeners
            .borrow()
            .iter()
            .map(|(_, sub, _)| sub.clone())
            .collect()
    }

    /// Run the forwarded submit handler with the initial values.
    pub fn submit(&self) -> SubmitResult {
        let values = self.config.initial_values.clone().unwrap_or_default();
        (self.config.on_submit)(&values)
    }
}

/// Engine-side settings the guard never looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineSettings {
    pub validate_on_blur: bool,
    pub keep_dirty_on_reinitialize: bool,
}

impl FormEngine for MockForm {
    type Values = Values;
    type Decorator = &'static str;
    type Mutator = &'static str;
    type Options = EngineSettings;

    fn create(config: FormConfig<Self>) -> Self {
        Self {
            config,
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_id: RefCell::new(0),
        }
    }

    fn subscribe(&self, subscription: &Subscription, listener: StateListener) -> Unsubscribe {
        let id = {
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            *next
        };
        self.listeners
            .borrow_mut()
            .push((id, subscription.clone(), listener));

        let listeners = Rc::clone(&self.listeners);
        Box::new(move || listeners.borrow_mut().retain(|(lid, _, _)| *lid != id))
    }

    fn focus_on_errors() -> Self::Decorator {
        "focus-on-errors"
    }

    fn array_mutators() -> Mutators<Self::Mutator> {
        ["concat", "insert", "move", "pop", "push", "remove", "shift", "swap", "unshift", "update"]
            .into_iter()
            .map(|name| (name.to_string(), "array"))
            .collect()
    }
}

/// Options with a no-op submit handler.
pub fn options() -> FormOptions<MockForm> {
    FormOptions::new(|_: &Values| Ok(()))
}

pub fn dirty() -> FormState {
    FormState {
        dirty: true,
        ..FormState::default()
    }
}

// ============================================================================
// Navigation source wrapper
// ============================================================================

/// History wrapper that logs every `push` into `events`.
pub struct RecordingHistory {
    pub history: MemoryHistory,
    pub events: Events,
}

impl NavigationSource for RecordingHistory {
    fn block(&self, predicate: BlockPredicate) -> UnblockHandle {
        self.events.borrow_mut().push("block".to_string());
        let unblock = self.history.block(predicate);
        let events = Rc::clone(&self.events);
        Box::new(move || {
            events.borrow_mut().push("unblock".to_string());
            unblock();
        })
    }

    fn push(&self, href: &str) {
        self.events.borrow_mut().push(format!("push:{href}"));
        self.history.push(href);
    }
}

// ============================================================================
// Prompt / last visited
// ============================================================================

/// Prompt widget that keeps every props it was rendered with.
#[derive(Default)]
pub struct RecordingPrompt {
    pub renders: Vec<PromptProps>,
}

impl PromptUi for RecordingPrompt {
    fn render(&mut self, props: &PromptProps) {
        self.renders.push(props.clone());
    }
}

/// Last-visited collaborator logging `cache` into `events`.
pub struct RecordingLastVisited {
    pub events: Events,
}

impl LastVisited for RecordingLastVisited {
    fn cache_previous_url(&self) {
        self.events.borrow_mut().push("cache".to_string());
    }
}
