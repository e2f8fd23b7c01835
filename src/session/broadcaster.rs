//! In-memory "who is logged in" state with replay-one subscriptions.
//!
//! DESIGN
//! ======
//! A plain observer list rather than a reactive-stream type, so the core
//! stays independent of the UI framework. The Leptos layer bridges it into a
//! signal through [`SessionBroadcaster::subscribe`].
//!
//! Notification is synchronous and in subscription order. The observer list
//! is snapshotted before dispatch, so observers may read, mutate, subscribe
//! or unsubscribe from inside a callback without a `RefCell` double borrow.
//!
//! A change made from inside a callback is queued and delivered only after
//! every observer has seen the value being dispatched, so each observer
//! receives changes in the order they happened and its last value always
//! matches `current_user()`.

#[cfg(test)]
#[path = "broadcaster_test.rs"]
mod broadcaster_test;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use super::store::{self, SessionStore};
use crate::net::types::UserProfile;

type Observer = Rc<dyn Fn(Option<&UserProfile>)>;

#[derive(Default)]
struct Inner {
    current: Option<UserProfile>,
    observers: Vec<(u64, Observer)>,
    next_id: u64,
    pending: VecDeque<Option<UserProfile>>,
    dispatching: bool,
}

/// Authoritative holder of the current principal.
///
/// Cloning yields another handle to the same state.
#[derive(Clone, Default)]
pub struct SessionBroadcaster {
    inner: Rc<RefCell<Inner>>,
}

impl SessionBroadcaster {
    /// Broadcaster with no user.
    pub fn new() -> Self {
        Self::default()
    }

    /// Broadcaster seeded from the persisted profile.
    ///
    /// A missing or malformed profile starts logged-out; corruption is logged
    /// and otherwise ignored.
    pub fn from_store(store: &dyn SessionStore) -> Self {
        let current = match store::read_profile(store) {
            Ok(profile) => profile,
            Err(e) => {
                log::warn!("ignoring persisted session: {e}");
                None
            }
        };
        Self {
            inner: Rc::new(RefCell::new(Inner { current, ..Inner::default() })),
        }
    }

    /// Snapshot of the current principal.
    pub fn current_user(&self) -> Option<UserProfile> {
        self.inner.borrow().current.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.borrow().current.is_some()
    }

    /// Register `observer`; it is called at once with the current value and
    /// then on every change until the returned handle is unsubscribed.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(Option<&UserProfile>) + 'static,
    {
        let observer: Observer = Rc::new(observer);
        let (id, current) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.observers.push((id, observer.clone()));
            (id, inner.current.clone())
        };
        observer(current.as_ref());
        Subscription { id, inner: Rc::downgrade(&self.inner) }
    }

    pub fn set_authenticated(&self, profile: UserProfile) {
        self.emit(Some(profile));
    }

    pub fn clear_authenticated(&self) {
        self.emit(None);
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }

    fn emit(&self, value: Option<UserProfile>) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.current.clone_from(&value);
            inner.pending.push_back(value);
            if inner.dispatching {
                return;
            }
            inner.dispatching = true;
        }

        loop {
            let (value, observers) = {
                let mut inner = self.inner.borrow_mut();
                let Some(value) = inner.pending.pop_front() else {
                    inner.dispatching = false;
                    return;
                };
                let observers: Vec<Observer> = inner.observers.iter().map(|(_, o)| o.clone()).collect();
                (value, observers)
            };
            for observer in observers {
                observer(value.as_ref());
            }
        }
    }
}

/// Handle returned by [`SessionBroadcaster::subscribe`].
///
/// Dropping the handle keeps the observer attached; call
/// [`Subscription::unsubscribe`] to detach it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    inner: Weak<RefCell<Inner>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().observers.retain(|(id, _)| *id != self.id);
        }
    }
}
