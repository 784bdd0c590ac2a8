//! # Registration table: event name → ordered listener registrations.
//!
//! The table is keyed by a single event name; space-delimited name lists
//! are split at the public API boundary and never reach this module.
//!
//! ## Rules
//! - Insertion order per name is delivery order (`Vec` push order).
//! - Removal matches by `Arc` pointer identity against the listener the
//!   caller originally supplied, so a pending one-shot registration is
//!   cancelable with the same handle that created it.
//! - Removing from an unknown name, or removing an unregistered listener,
//!   is a no-op.
//! - Names whose registration list becomes empty are dropped from the map;
//!   externally this is indistinguishable from an empty list.

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::listeners::ListenerRef;

/// One entry binding a listener to an event name.
pub(crate) struct Registration<A, R> {
    /// The listener to invoke; also the identity used by removal.
    pub(crate) listener: ListenerRef<A, R>,
    /// One-shot marker: a fired-flag shared by every registration created
    /// in a single `once()` call, so the listener runs at most once across
    /// all of the names it was registered under.
    pub(crate) once: Option<Arc<AtomicBool>>,
}

impl<A, R> Clone for Registration<A, R> {
    fn clone(&self) -> Self {
        Self {
            listener: Arc::clone(&self.listener),
            once: self.once.clone(),
        }
    }
}

/// Ordered multi-map from event name to listener registrations.
pub(crate) struct Registry<A, R> {
    entries: HashMap<String, Vec<Registration<A, R>>>,
}

impl<A, R> Registry<A, R> {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Appends a registration under `name`, returning the new list length.
    pub(crate) fn insert(&mut self, name: &str, reg: Registration<A, R>) -> usize {
        let list = self.entries.entry(name.to_string()).or_default();
        list.push(reg);
        list.len()
    }

    /// Returns a copy of the registrations for `name`, in insertion order.
    ///
    /// Dispatch iterates this snapshot, so listeners that mutate the table
    /// mid-flight only affect future dispatches.
    pub(crate) fn snapshot(&self, name: &str) -> Vec<Registration<A, R>> {
        self.entries.get(name).cloned().unwrap_or_default()
    }

    /// Removes every registration for every name.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Removes every registration under `name`.
    pub(crate) fn remove_name(&mut self, name: &str) {
        self.entries.remove(name);
    }

    /// Removes registrations under `name` matching `listener` by identity.
    pub(crate) fn remove_listener(&mut self, name: &str, listener: &ListenerRef<A, R>) {
        if let Some(list) = self.entries.get_mut(name) {
            list.retain(|reg| !same_listener(&reg.listener, listener));
            if list.is_empty() {
                self.entries.remove(name);
            }
        }
    }

    /// Removes registrations matching `listener` by identity, everywhere.
    pub(crate) fn remove_listener_everywhere(&mut self, listener: &ListenerRef<A, R>) {
        for list in self.entries.values_mut() {
            list.retain(|reg| !same_listener(&reg.listener, listener));
        }
        self.entries.retain(|_, list| !list.is_empty());
    }

    /// Removes every registration carrying `fired`, across all names.
    ///
    /// A one-shot listener registered under "a b" shares one flag; when it
    /// wins the flag under either name it is retired from both.
    pub(crate) fn retire(&mut self, fired: &Arc<AtomicBool>) {
        for list in self.entries.values_mut() {
            list.retain(|reg| {
                reg.once
                    .as_ref()
                    .map_or(true, |flag| !Arc::ptr_eq(flag, fired))
            });
        }
        self.entries.retain(|_, list| !list.is_empty());
    }

    /// Number of registrations under `name`.
    pub(crate) fn count(&self, name: &str) -> usize {
        self.entries.get(name).map_or(0, Vec::len)
    }

    /// Number of registrations across all names.
    pub(crate) fn total(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

/// Identity comparison by `Arc` data pointer.
///
/// Compares the allocation address only, not the vtable, so two clones of
/// one `ListenerRef` always match even across codegen units.
pub(crate) fn same_listener<A, R>(a: &ListenerRef<A, R>, b: &ListenerRef<A, R>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a).cast::<()>(),
        Arc::as_ptr(b).cast::<()>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ListenerError;
    use crate::listeners::ListenerFn;

    fn noop(name: &'static str) -> ListenerRef {
        ListenerFn::arc(name, |_: ()| async { Ok::<_, ListenerError>(()) })
    }

    fn plain(listener: &ListenerRef) -> Registration<(), ()> {
        Registration {
            listener: Arc::clone(listener),
            once: None,
        }
    }

    #[test]
    fn insert_preserves_order_and_reports_length() {
        let mut registry = Registry::new();
        let (a, b) = (noop("a"), noop("b"));

        assert_eq!(registry.insert("evt", plain(&a)), 1);
        assert_eq!(registry.insert("evt", plain(&b)), 2);

        let snap = registry.snapshot("evt");
        assert!(same_listener(&snap[0].listener, &a));
        assert!(same_listener(&snap[1].listener, &b));
    }

    #[test]
    fn remove_listener_matches_identity_not_name() {
        let mut registry = Registry::new();
        let (a, b) = (noop("a"), noop("b"));
        registry.insert("evt", plain(&a));
        registry.insert("evt", plain(&b));

        registry.remove_listener("evt", &a);

        let snap = registry.snapshot("evt");
        assert_eq!(snap.len(), 1);
        assert!(same_listener(&snap[0].listener, &b));
    }

    #[test]
    fn distinct_listeners_never_compare_equal() {
        // Two ListenerFn instances over identical closures are still two
        // allocations, so identity must not match.
        let (a, b) = (noop("same"), noop("same"));
        assert!(!same_listener(&a, &b));
        assert!(same_listener(&a, &Arc::clone(&a)));
    }

    #[test]
    fn removal_from_unknown_name_is_noop() {
        let mut registry: Registry<(), ()> = Registry::new();
        registry.remove_name("ghost");
        registry.remove_listener("ghost", &noop("x"));
        assert_eq!(registry.total(), 0);
    }

    #[test]
    fn retire_drops_the_flagged_entries_everywhere() {
        let mut registry = Registry::new();
        let l = noop("one-shot");
        let fired = Arc::new(AtomicBool::new(false));
        for name in ["a", "b"] {
            registry.insert(
                name,
                Registration {
                    listener: Arc::clone(&l),
                    once: Some(Arc::clone(&fired)),
                },
            );
        }
        registry.insert("a", plain(&l));

        registry.retire(&fired);

        assert_eq!(registry.count("a"), 1); // the plain entry survives
        assert_eq!(registry.count("b"), 0);
    }
}
