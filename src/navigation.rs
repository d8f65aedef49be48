//! Navigation source abstraction.
//!
//! The guard never talks to a router directly. It talks to a
//! [`NavigationSource`]: something that can install a single blocking
//! predicate and can perform a navigation. Browser history wrappers, desktop
//! routers and [`MemoryHistory`](crate::MemoryHistory) all fit behind it.
//!
//! # Example
//!
//! ```
//! use form_guard::{Destination, MemoryHistory, NavigationSource};
//! use std::rc::Rc;
//!
//! let history = MemoryHistory::new();
//! let unblock = history.block(Rc::new(|to: &Destination| !to.starts_with("/admin")));
//!
//! history.push("/admin");
//! assert_eq!(history.location().pathname(), "/");
//!
//! unblock();
//! history.push("/admin");
//! assert_eq!(history.location().pathname(), "/admin");
//! ```

use crate::Destination;
use std::rc::Rc;

/// Predicate consulted for every attempted transition. `true` allows it.
pub type BlockPredicate = Rc<dyn Fn(&Destination) -> bool>;

/// Removes a previously installed [`BlockPredicate`].
pub type UnblockHandle = Box<dyn FnOnce()>;

/// A router that can intercept and perform navigations.
///
/// Implementations must evaluate the installed predicate synchronously for
/// every transition attempt, including back/forward and programmatic ones.
pub trait NavigationSource {
    /// Install `predicate` as the blocker and return the handle removing it.
    fn block(&self, predicate: BlockPredicate) -> UnblockHandle;

    /// Navigate to `href` (pathname plus search).
    fn push(&self, href: &str);
}

impl<N: NavigationSource + ?Sized> NavigationSource for Rc<N> {
    fn block(&self, predicate: BlockPredicate) -> UnblockHandle {
        (**self).block(predicate)
    }

    fn push(&self, href: &str) {
        (**self).push(href);
    }
}
