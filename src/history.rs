//! In-memory navigation history with a single blocker slot.
//!
//! [`MemoryHistory`] is a complete [`NavigationSource`]: it keeps a stack of
//! visited locations, supports push/replace/back/forward/go, and asks the
//! installed [`BlockPredicate`] before every transition. Hosts without a
//! browser history use it directly; tests use it to drive the guard.

use crate::navigation::{BlockPredicate, NavigationSource, UnblockHandle};
use crate::{debug_log, trace_log, warn_log, Destination};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// How a committed transition changed the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    /// A new entry was pushed (forward entries discarded).
    Push,
    /// The current entry was overwritten.
    Replace,
    /// The cursor moved within the existing stack.
    Pop,
}

/// Outcome of a transition attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The transition happened.
    Committed {
        from: Destination,
        to: Destination,
        action: HistoryAction,
    },
    /// The blocker refused the transition; the stack is unchanged.
    Blocked { to: Destination },
    /// `back`/`forward`/`go` pointed outside the stack.
    OutOfRange,
}

impl NavigationOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }
}

struct Blocker {
    id: u64,
    predicate: BlockPredicate,
}

struct HistoryInner {
    entries: Vec<Destination>,
    index: usize,
    blocker: Option<Blocker>,
    next_blocker_id: u64,
}

/// In-memory history stack.
///
/// Cloning shares the same stack and blocker slot.
#[derive(Clone)]
pub struct MemoryHistory {
    inner: Rc<RefCell<HistoryInner>>,
}

impl MemoryHistory {
    /// Create a history positioned at `/`.
    pub fn new() -> Self {
        Self::with_initial("/")
    }

    /// Create a history positioned at `href`.
    pub fn with_initial(href: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(HistoryInner {
                entries: vec![Destination::parse(href)],
                index: 0,
                blocker: None,
                next_blocker_id: 0,
            })),
        }
    }

    /// Current location.
    pub fn location(&self) -> Destination {
        let inner = self.inner.borrow();
        inner.entries[inner.index].clone()
    }

    /// Number of entries in the stack.
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Cursor position within the stack.
    pub fn index(&self) -> usize {
        self.inner.borrow().index
    }

    /// Whether a blocker is currently installed.
    pub fn is_blocked(&self) -> bool {
        self.inner.borrow().blocker.is_some()
    }

    /// Push a new entry, discarding forward history.
    pub fn navigate(&self, href: &str) -> NavigationOutcome {
        let to = Destination::parse(href);
        if !self.transition_allowed(&to) {
            return NavigationOutcome::Blocked { to };
        }

        let mut inner = self.inner.borrow_mut();
        let from = inner.entries[inner.index].clone();
        let keep = inner.index + 1;
        inner.entries.truncate(keep);
        inner.entries.push(to.clone());
        inner.index += 1;
        debug_log!("History push: '{}' → '{}'", from, to);

        NavigationOutcome::Committed {
            from,
            to,
            action: HistoryAction::Push,
        }
    }

    /// Overwrite the current entry.
    pub fn replace(&self, href: &str) -> NavigationOutcome {
        let to = Destination::parse(href);
        if !self.transition_allowed(&to) {
            return NavigationOutcome::Blocked { to };
        }

        let mut inner = self.inner.borrow_mut();
        let index = inner.index;
        let from = std::mem::replace(&mut inner.entries[index], to.clone());
        debug_log!("History replace: '{}' → '{}'", from, to);

        NavigationOutcome::Committed {
            from,
            to,
            action: HistoryAction::Replace,
        }
    }

    /// Go back one entry.
    pub fn back(&self) -> NavigationOutcome {
        self.go(-1)
    }

    /// Go forward one entry.
    pub fn forward(&self) -> NavigationOutcome {
        self.go(1)
    }

    /// Move the cursor by `delta` entries.
    pub fn go(&self, delta: isize) -> NavigationOutcome {
        let (from, to, target_index) = {
            let inner = self.inner.borrow();
            let Some(target) = inner.index.checked_add_signed(delta) else {
                return NavigationOutcome::OutOfRange;
            };
            if target >= inner.entries.len() {
                return NavigationOutcome::OutOfRange;
            }
            (
                inner.entries[inner.index].clone(),
                inner.entries[target].clone(),
                target,
            )
        };

        if !self.transition_allowed(&to) {
            return NavigationOutcome::Blocked { to };
        }

        self.inner.borrow_mut().index = target_index;
        debug_log!("History pop ({:+}): '{}' → '{}'", delta, from, to);

        NavigationOutcome::Committed {
            from,
            to,
            action: HistoryAction::Pop,
        }
    }

    /// Ask the blocker, if any, whether `to` may be reached.
    ///
    /// The predicate is cloned out before it runs, so it may call back into
    /// this history without tripping the `RefCell`.
    fn transition_allowed(&self, to: &Destination) -> bool {
        let predicate = self
            .inner
            .borrow()
            .blocker
            .as_ref()
            .map(|blocker| Rc::clone(&blocker.predicate));

        match predicate {
            Some(predicate) => {
                let allowed = predicate(to);
                trace_log!("Blocker answered {} for '{}'", allowed, to);
                allowed
            }
            None => true,
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MemoryHistory")
            .field("entries", &inner.entries)
            .field("index", &inner.index)
            .field("blocked", &inner.blocker.is_some())
            .finish()
    }
}

impl NavigationSource for MemoryHistory {
    /// Install the blocker. A previously installed blocker is replaced; its
    /// handle becomes a no-op.
    fn block(&self, predicate: BlockPredicate) -> UnblockHandle {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_blocker_id;
            inner.next_blocker_id += 1;
            if inner.blocker.is_some() {
                warn_log!("Replacing an existing navigation blocker");
            }
            inner.blocker = Some(Blocker { id, predicate });
            id
        };

        let weak: Weak<RefCell<HistoryInner>> = Rc::downgrade(&self.inner);
        Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let mut inner = inner.borrow_mut();
            if inner.blocker.as_ref().is_some_and(|b| b.id == id) {
                inner.blocker = None;
                debug_log!("Navigation blocker {} removed", id);
            }
        })
    }

    fn push(&self, href: &str) {
        self.navigate(href);
    }
}
