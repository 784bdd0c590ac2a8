//! # Event bus: named listener registry with sync and aggregating dispatch.
//!
//! [`EventBus`] augments plain pub/sub with three extensions:
//! - multi-name registration/removal against one space-delimited string,
//! - [`trigger_then`](EventBus::trigger_then), which invokes every listener
//!   and aggregates their futures into one all-succeed-or-first-fail result,
//! - [`once`](EventBus::once) one-shot semantics that deregister a listener
//!   before its first invocation while keeping it removable by handle.
//!
//! ## Architecture
//! ```text
//! on("save sync", l)      off(names?, l?)      once("boot", l)
//!        │                      │                    │
//!        ▼                      ▼                    ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │ EventBus ── Registry: name → [Registration..] (ordered)  │
//! └──────────────┬──────────────────────────┬────────────────┘
//!                │                          │
//!     trigger(names, args)       trigger_then("a b", args)
//!        sequential awaits,         snapshot across names,
//!        first Err aborts           try_join_all aggregation
//!                │                          │
//!                ▼                          ▼
//!   Result<(), ListenerError>   Result<Vec<R>, ListenerError>
//! ```
//!
//! ## Rules
//! - Within one dispatch call, listeners for the same name fire in
//!   registration order; multiple names are processed left-to-right.
//! - Dispatch iterates a snapshot of the table, so re-entrant `on`/`off`
//!   from inside a listener only affects future dispatches.
//! - The table lock is never held while a listener runs.
//! - Listener failures surface only through the call result; the bus never
//!   logs or swallows them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::try_join_all;

use crate::core::config::BusConfig;
use crate::core::registry::{Registration, Registry};
use crate::error::ListenerError;
use crate::listeners::ListenerRef;

/// # Named-listener event bus.
///
/// A cheaply cloneable handle over a shared registration table; all clones
/// observe the same registrations. Domain types hold an `EventBus` as a
/// field to gain pub/sub capability.
///
/// Type parameters:
/// - `A`: argument payload forwarded to listeners (cloned per invocation)
/// - `R`: value produced by listeners and collected by
///   [`trigger_then`](EventBus::trigger_then)
///
/// ## Example
/// ```rust
/// use signalbus::{EventBus, ListenerFn, ListenerRef, ListenerError};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), ListenerError> {
///     let bus: EventBus<u32, u32> = EventBus::new();
///
///     let double: ListenerRef<u32, u32> = ListenerFn::arc("double", |n: u32| async move {
///         Ok::<_, ListenerError>(n * 2)
///     });
///     bus.on("calc", double);
///
///     let out = bus.trigger_then("calc", &21).await?;
///     assert_eq!(out, vec![42]);
///     Ok(())
/// }
/// ```
pub struct EventBus<A = (), R = ()> {
    inner: Arc<Inner<A, R>>,
}

struct Inner<A, R> {
    registry: Mutex<Registry<A, R>>,
    config: BusConfig,
}

impl<A, R> Clone for EventBus<A, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, R> Default for EventBus<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, R> EventBus<A, R> {
    /// Creates a bus with the default [`BusConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    /// Creates a bus with an explicit configuration.
    #[must_use]
    pub fn with_config(config: BusConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry: Mutex::new(Registry::new()),
                config,
            }),
        }
    }

    /// Returns the configuration this bus was created with.
    pub fn config(&self) -> &BusConfig {
        &self.inner.config
    }

    /// Registers `listener` under every whitespace-separated token in
    /// `names`, preserving registration order per name.
    ///
    /// An empty or whitespace-only `names` is a no-op, not an error.
    /// Returns `&Self` for chaining.
    ///
    /// ## Example
    /// ```rust
    /// use signalbus::{EventBus, ListenerFn, ListenerRef, ListenerError};
    ///
    /// let bus: EventBus = EventBus::new();
    /// let l: ListenerRef = ListenerFn::arc("audit", |_: ()| async {
    ///     Ok::<_, ListenerError>(())
    /// });
    ///
    /// bus.on("created updated", l);
    /// assert_eq!(bus.listener_count("created"), 1);
    /// assert_eq!(bus.listener_count("updated"), 1);
    /// ```
    pub fn on(&self, names: &str, listener: ListenerRef<A, R>) -> &Self {
        let mut table = self.table();
        for name in names.split_whitespace() {
            let len = table.insert(
                name,
                Registration {
                    listener: Arc::clone(&listener),
                    once: None,
                },
            );
            self.warn_if_crowded(name, len);
        }
        self
    }

    /// Registers `listener` for at-most-once delivery under every token in
    /// `names`.
    ///
    /// All tokens share a single fired-flag: the first invocation under any
    /// of them retires the registration from every name, then runs the
    /// listener. Until it fires, `off(name, &listener)` with the original
    /// handle cancels it. Returns `&Self` for chaining.
    pub fn once(&self, names: &str, listener: ListenerRef<A, R>) -> &Self {
        let fired = Arc::new(AtomicBool::new(false));
        let mut table = self.table();
        for name in names.split_whitespace() {
            let len = table.insert(
                name,
                Registration {
                    listener: Arc::clone(&listener),
                    once: Some(Arc::clone(&fired)),
                },
            );
            self.warn_if_crowded(name, len);
        }
        self
    }

    /// Removes registrations according to which arguments are given.
    ///
    /// | `names`  | `listener` | Effect                                              |
    /// |----------|------------|-----------------------------------------------------|
    /// | `None`   | `None`     | remove every registration for every name            |
    /// | `None`   | `Some(l)`  | remove `l` from every name                          |
    /// | `Some`   | `None`     | for each token, remove all of that name's listeners |
    /// | `Some`   | `Some(l)`  | for each token, remove `l` under that name          |
    ///
    /// Matching is by `Arc` identity against the handle originally passed
    /// to [`on`](EventBus::on)/[`once`](EventBus::once), so a pending
    /// one-shot listener is cancelable with the same handle. Removing an
    /// unregistered listener or an unknown name is a no-op. Returns `&Self`
    /// for chaining.
    pub fn off(&self, names: Option<&str>, listener: Option<&ListenerRef<A, R>>) -> &Self {
        let mut table = self.table();
        match (names, listener) {
            (None, None) => table.clear(),
            (None, Some(l)) => table.remove_listener_everywhere(l),
            (Some(names), None) => {
                for name in names.split_whitespace() {
                    table.remove_name(name);
                }
            }
            (Some(names), Some(l)) => {
                for name in names.split_whitespace() {
                    table.remove_listener(name, l);
                }
            }
        }
        self
    }

    /// Number of registrations currently held for `name`.
    pub fn listener_count(&self, name: &str) -> usize {
        self.table().count(name)
    }

    /// Number of registrations across all names.
    pub fn total_listener_count(&self) -> usize {
        self.table().total()
    }

    fn table(&self) -> MutexGuard<'_, Registry<A, R>> {
        // A poisoning panic can only originate in the registry's own plain
        // data ops; the table stays structurally valid, so keep going.
        self.inner
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolves one snapshotted registration into a callable listener.
    ///
    /// One-shot registrations race for their shared flag here: the winner
    /// is retired from the table before its listener runs (so it may
    /// re-register from inside the callback), losers are skipped entirely.
    fn arm(&self, reg: Registration<A, R>) -> Option<ListenerRef<A, R>> {
        match reg.once {
            None => Some(reg.listener),
            Some(fired) => {
                if fired.swap(true, Ordering::SeqCst) {
                    return None;
                }
                self.table().retire(&fired);
                Some(reg.listener)
            }
        }
    }

    fn warn_if_crowded(&self, name: &str, len: usize) {
        let threshold = self.inner.config.listener_warn_threshold;
        if threshold > 0 && len == threshold + 1 {
            eprintln!("[signalbus] event '{name}' exceeds {threshold} listeners; possible listener leak");
        }
    }
}

impl<A, R> EventBus<A, R>
where
    A: Clone + Send + Sync + 'static,
    R: Send + 'static,
{
    /// Fire-and-forget dispatch over an iterable of name tokens.
    ///
    /// For each name in order, awaits every currently-registered listener
    /// sequentially in registration order, forwarding a clone of `args`.
    /// The first listener failure is returned immediately and aborts
    /// delivery to the remaining listeners and names. One-shot
    /// registrations are retired immediately before their listener runs.
    ///
    /// Each name's registrations are snapshotted when dispatch reaches that
    /// name, not when the call starts: a listener that registers under a
    /// *later* name of the same call is delivered within this call, while
    /// mutations to the name currently dispatching only affect future
    /// calls.
    pub async fn trigger<I, S>(&self, names: I, args: &A) -> Result<(), ListenerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let snapshot = self.table().snapshot(name.as_ref());
            for reg in snapshot {
                if let Some(listener) = self.arm(reg) {
                    listener.call(args.clone()).await?;
                }
            }
        }
        Ok(())
    }

    /// Dispatch that collects every listener's value into one aggregate.
    ///
    /// `names` is a space-delimited list; the registrations of all tokens
    /// are snapshotted into a single flat sequence (name-list order, then
    /// per-name registration order) before anything runs. Every listener is
    /// invoked with a clone of `args` and the futures are aggregated with
    /// [`try_join_all`]: on success the values come back in invocation
    /// order (not completion order); the first failure fails the whole
    /// aggregate and remaining in-flight results are dropped.
    ///
    /// Snapshotting alone never retires one-shot registrations; that
    /// happens only at invocation time inside each per-listener future, as
    /// in [`trigger`](EventBus::trigger). A future the aggregate drops
    /// before its first poll (because an earlier listener already failed)
    /// leaves its registration in the table, still eligible to fire.
    pub async fn trigger_then(&self, names: &str, args: &A) -> Result<Vec<R>, ListenerError> {
        let snapshot: Vec<Registration<A, R>> = {
            let table = self.table();
            names
                .split_whitespace()
                .flat_map(|name| table.snapshot(name))
                .collect()
        };

        let calls = snapshot.into_iter().map(|reg| {
            let bus = self.clone();
            let args = args.clone();
            async move {
                match bus.arm(reg) {
                    Some(listener) => listener.call(args).await.map(Some),
                    // Lost the one-shot race; contributes no value slot.
                    None => Ok(None),
                }
            }
        });

        let values = try_join_all(calls).await?;
        Ok(values.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::ListenerFn;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn counting_listener() -> (Arc<AtomicUsize>, ListenerRef) {
        let hits = Arc::new(AtomicUsize::new(0));
        let probe = Arc::clone(&hits);
        let listener: ListenerRef = ListenerFn::arc("counter", move |_: ()| {
            let probe = Arc::clone(&probe);
            async move {
                probe.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ListenerError>(())
            }
        });
        (hits, listener)
    }

    #[tokio::test]
    async fn same_name_listeners_fire_in_registration_order() {
        let bus: EventBus = EventBus::new();
        let calls = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let calls = Arc::clone(&calls);
            let l: ListenerRef = ListenerFn::arc(tag, move |_: ()| {
                let calls = Arc::clone(&calls);
                async move {
                    calls.lock().unwrap().push(tag);
                    Ok::<_, ListenerError>(())
                }
            });
            bus.on("evt", l);
        }

        bus.trigger(["evt"], &()).await.unwrap();
        assert_eq!(*calls.lock().unwrap(), ["first", "second"]);
    }

    #[tokio::test]
    async fn space_delimited_registration_covers_each_token() {
        let bus: EventBus = EventBus::new();
        let (hits, l) = counting_listener();

        bus.on("a b", l);
        bus.trigger(["a"], &()).await.unwrap();
        bus.trigger(["b"], &()).await.unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn once_fires_at_most_once() {
        let bus: EventBus = EventBus::new();
        let (hits, l) = counting_listener();

        bus.once("x", l);
        bus.trigger(["x"], &()).await.unwrap();
        bus.trigger(["x"], &()).await.unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn off_with_original_handle_cancels_pending_once() {
        let bus: EventBus = EventBus::new();
        let (hits, l) = counting_listener();

        bus.once("x", Arc::clone(&l));
        bus.off(Some("x"), Some(&l));
        bus.trigger(["x"], &()).await.unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn once_across_names_shares_a_single_shot() {
        let bus: EventBus = EventBus::new();
        let (hits, l) = counting_listener();

        bus.once("a b", l);
        assert_eq!(bus.listener_count("a"), 1);
        assert_eq!(bus.listener_count("b"), 1);

        bus.trigger(["a", "b"], &()).await.unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(bus.total_listener_count(), 0);
    }

    #[tokio::test]
    async fn trigger_then_collects_values_in_invocation_order() {
        let bus: EventBus<u32, u32> = EventBus::new();

        // The first listener settles last; order must still follow invocation.
        let slow: ListenerRef<u32, u32> = ListenerFn::arc("slow", |_: u32| async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, ListenerError>(1)
        });
        let fast: ListenerRef<u32, u32> = ListenerFn::arc("fast", |n: u32| async move {
            Ok::<_, ListenerError>(n)
        });
        bus.on("evt", slow);
        bus.on("evt", fast);

        let values = bus.trigger_then("evt", &2).await.unwrap();
        assert_eq!(values, vec![1, 2]);
    }

    #[tokio::test]
    async fn trigger_then_fails_with_the_first_listener_error() {
        let bus: EventBus = EventBus::new();

        let boom: ListenerRef = ListenerFn::arc("boom", |_: ()| async {
            Err::<(), _>(ListenerError::failed("boom"))
        });
        let (_, ok) = counting_listener();
        bus.on("evt", boom);
        bus.on("evt", ok);

        let err = bus.trigger_then("evt", &()).await.unwrap_err();
        match err {
            ListenerError::Failed { error } => assert_eq!(error, "boom"),
        }
    }

    #[tokio::test]
    async fn trigger_aborts_delivery_after_the_first_failure() {
        let bus: EventBus = EventBus::new();

        let boom: ListenerRef = ListenerFn::arc("boom", |_: ()| async {
            Err::<(), _>(ListenerError::failed("boom"))
        });
        let (hits, ok) = counting_listener();
        bus.on("evt", boom);
        bus.on("evt", ok);

        assert!(bus.trigger(["evt"], &()).await.is_err());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn off_without_arguments_removes_everything() {
        let bus: EventBus = EventBus::new();
        let (hits_a, a) = counting_listener();
        let (hits_b, b) = counting_listener();
        bus.on("a", a);
        bus.on("b", b);

        bus.off(None, None);
        bus.trigger(["a", "b"], &()).await.unwrap();

        assert_eq!(hits_a.load(Ordering::SeqCst), 0);
        assert_eq!(hits_b.load(Ordering::SeqCst), 0);
        assert_eq!(bus.total_listener_count(), 0);
    }

    #[tokio::test]
    async fn off_by_listener_removes_it_under_every_name() {
        let bus: EventBus = EventBus::new();
        let (_, shared) = counting_listener();
        let (_, other) = counting_listener();
        bus.on("a b", shared.clone());
        bus.on("a", other);

        bus.off(None, Some(&shared));

        assert_eq!(bus.listener_count("a"), 1);
        assert_eq!(bus.listener_count("b"), 0);
    }

    #[tokio::test]
    async fn off_by_names_clears_each_token() {
        let bus: EventBus = EventBus::new();
        let (_, l) = counting_listener();
        bus.on("a b c", l);

        bus.off(Some("a c"), None);

        assert_eq!(bus.listener_count("a"), 0);
        assert_eq!(bus.listener_count("b"), 1);
        assert_eq!(bus.listener_count("c"), 0);
    }

    #[tokio::test]
    async fn repeated_off_is_idempotent() {
        let bus: EventBus = EventBus::new();
        let (hits, l) = counting_listener();
        bus.on("evt", Arc::clone(&l));

        bus.off(Some("evt"), Some(&l));
        bus.off(Some("evt"), Some(&l));
        bus.trigger(["evt"], &()).await.unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn whitespace_only_registration_is_a_noop() {
        let bus: EventBus = EventBus::new();
        let (_, l) = counting_listener();

        bus.on("   ", l);

        assert_eq!(bus.total_listener_count(), 0);
        assert_eq!(bus.trigger_then("   ", &()).await.unwrap(), Vec::<()>::new());
    }

    #[tokio::test]
    async fn trigger_on_unknown_name_is_a_noop() {
        let bus: EventBus = EventBus::new();
        bus.trigger(["ghost"], &()).await.unwrap();
        assert_eq!(bus.trigger_then("ghost", &()).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn once_is_retired_at_invocation_not_at_snapshot() {
        let bus: EventBus = EventBus::new();
        let (hits, l) = counting_listener();

        bus.once("x", l);
        assert_eq!(bus.listener_count("x"), 1);

        assert_eq!(bus.trigger_then("x", &()).await.unwrap().len(), 1);
        assert_eq!(bus.listener_count("x"), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        assert_eq!(bus.trigger_then("x", &()).await.unwrap().len(), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn once_survives_an_earlier_failing_listener() {
        let bus: EventBus = EventBus::new();
        let boom: ListenerRef = ListenerFn::arc("boom", |_: ()| async {
            Err::<(), _>(ListenerError::failed("boom"))
        });
        let (hits, one_shot) = counting_listener();
        bus.on("evt", Arc::clone(&boom));
        bus.once("evt", one_shot);

        // The aggregate fails before the one-shot's future is ever polled;
        // its registration must stay in the table, still eligible to fire.
        assert!(bus.trigger_then("evt", &()).await.is_err());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(bus.listener_count("evt"), 2);

        bus.off(Some("evt"), Some(&boom));
        assert_eq!(bus.trigger_then("evt", &()).await.unwrap().len(), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(bus.listener_count("evt"), 0);
    }

    #[tokio::test]
    async fn trigger_sees_cross_name_registrations_made_mid_call() {
        let bus: EventBus = EventBus::new();
        let (late_hits, late) = counting_listener();

        // A listener on "a" registers another listener under "b"; "b" is
        // snapshotted only when dispatch reaches it, so the late listener
        // is delivered within the same trigger call.
        let handle = bus.clone();
        let adder: ListenerRef = ListenerFn::arc("adder", move |_: ()| {
            let handle = handle.clone();
            let late = Arc::clone(&late);
            async move {
                handle.on("b", late);
                Ok::<_, ListenerError>(())
            }
        });
        bus.on("a", adder);

        bus.trigger(["a", "b"], &()).await.unwrap();
        assert_eq!(late_hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn reentrant_registration_affects_only_future_dispatches() {
        let bus: EventBus = EventBus::new();
        let (late_hits, late) = counting_listener();

        let handle = bus.clone();
        let adder: ListenerRef = ListenerFn::arc("adder", move |_: ()| {
            let handle = handle.clone();
            let late = Arc::clone(&late);
            async move {
                handle.on("evt", late);
                Ok::<_, ListenerError>(())
            }
        });
        bus.on("evt", adder);

        bus.trigger(["evt"], &()).await.unwrap();
        assert_eq!(late_hits.load(Ordering::SeqCst), 0);

        bus.trigger(["evt"], &()).await.unwrap();
        assert_eq!(late_hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn registration_calls_chain() {
        let bus: EventBus = EventBus::new();
        let (_, a) = counting_listener();
        let (_, b) = counting_listener();

        bus.on("a", a).on("b", b.clone()).off(Some("b"), Some(&b));

        assert_eq!(bus.total_listener_count(), 1);
    }

    #[tokio::test]
    async fn warn_threshold_never_rejects_registrations() {
        let bus: EventBus = EventBus::with_config(BusConfig {
            listener_warn_threshold: 1,
        });
        for _ in 0..3 {
            let (_, l) = counting_listener();
            bus.on("crowded", l);
        }
        assert_eq!(bus.listener_count("crowded"), 3);
    }
}
