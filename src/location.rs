//! Navigation targets.
//!
//! A [`Destination`] is what the navigation source hands to the guard when a
//! transition is attempted: a pathname plus the search and hash fragments.
//!
//! # Example
//!
//! ```
//! use form_guard::Destination;
//!
//! let dest = Destination::parse("/items/5?tab=notes#history");
//! assert_eq!(dest.pathname(), "/items/5");
//! assert_eq!(dest.search(), "?tab=notes");
//! assert_eq!(dest.hash(), "#history");
//! assert_eq!(dest.href(), "/items/5?tab=notes");
//! ```

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Target location of an attempted navigation.
///
/// `search` and `hash` keep their leading `?` / `#` when non-empty, so that
/// `pathname + search` is directly usable as a navigation command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawDestination"))]
pub struct Destination {
    pathname: String,
    search: String,
    hash: String,
}

/// Wire form of a [`Destination`]; normalized on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDestination {
    #[serde(default)]
    pathname: String,
    #[serde(default)]
    search: String,
    #[serde(default)]
    hash: String,
}

#[cfg(feature = "serde")]
impl From<RawDestination> for Destination {
    fn from(raw: RawDestination) -> Self {
        Self::new(raw.pathname)
            .with_search(raw.search)
            .with_hash(raw.hash)
    }
}

impl Destination {
    /// Create a destination with the given pathname and no search or hash.
    ///
    /// An empty pathname is treated as the root `/`.
    pub fn new(pathname: impl Into<String>) -> Self {
        let pathname = pathname.into();
        Self {
            pathname: if pathname.is_empty() {
                "/".to_string()
            } else {
                pathname
            },
            search: String::new(),
            hash: String::new(),
        }
    }

    /// Parse an href of the form `pathname[?search][#hash]`.
    pub fn parse(href: &str) -> Self {
        let (rest, hash) = match href.find('#') {
            Some(idx) => (&href[..idx], &href[idx..]),
            None => (href, ""),
        };
        let (pathname, search) = match rest.find('?') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, ""),
        };

        Self::new(pathname).with_search(search).with_hash(hash)
    }

    /// Set the search fragment. A missing leading `?` is added; a bare `?`
    /// is normalized to empty.
    #[must_use]
    pub fn with_search(mut self, search: impl AsRef<str>) -> Self {
        self.search = normalize_fragment(search.as_ref(), '?');
        self
    }

    /// Set the hash fragment. A missing leading `#` is added; a bare `#` is
    /// normalized to empty.
    #[must_use]
    pub fn with_hash(mut self, hash: impl AsRef<str>) -> Self {
        self.hash = normalize_fragment(hash.as_ref(), '#');
        self
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Path plus search, the form used when re-issuing a held navigation.
    pub fn href(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }

    /// Path, search and hash.
    pub fn full_href(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }

    /// Check whether the pathname starts with `prefix`.
    ///
    /// This is a plain string prefix test: `/logout` also matches
    /// `/logout-confirm`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.pathname.starts_with(prefix)
    }
}

fn normalize_fragment(fragment: &str, marker: char) -> String {
    let body = fragment.strip_prefix(marker).unwrap_or(fragment);
    if body.is_empty() {
        String::new()
    } else {
        format!("{marker}{body}")
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}

impl FromStr for Destination {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Destination {
    fn from(href: &str) -> Self {
        Self::parse(href)
    }
}

impl From<String> for Destination {
    fn from(href: String) -> Self {
        Self::parse(&href)
    }
}
