//! Navigation targets and the navigator seam.
//!
//! Session code asks for navigation through [`Navigator`] so it never depends
//! on the router directly; the app wires in the Leptos router and tests wire
//! in a recorder.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use std::rc::Rc;

use url::form_urlencoded;

/// A path plus query parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavTarget {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl NavTarget {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), query: Vec::new() }
    }

    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Path with the query string form-encoded.
    pub fn to_href(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{}?{query}", self.path)
    }
}

pub trait Navigator {
    fn navigate(&self, target: &NavTarget);
}

/// Adapts any `Fn(&str)` taking an href, e.g. a wrapped router navigate.
pub struct FnNavigator(Rc<dyn Fn(&str)>);

impl FnNavigator {
    pub fn new(navigate: impl Fn(&str) + 'static) -> Self {
        Self(Rc::new(navigate))
    }
}

impl Navigator for FnNavigator {
    fn navigate(&self, target: &NavTarget) {
        (self.0)(&target.to_href());
    }
}
