//! # signalbus
//!
//! **Signalbus** is a small event-dispatch library for Rust.
//!
//! It augments plain publish/subscribe with three extensions: registering
//! and removing listeners against a space-delimited list of event names in
//! one call, a future-aggregating trigger that collects every listener's
//! result into one all-succeed-or-first-fail outcome, and one-shot
//! listeners that deregister themselves before their first invocation while
//! staying removable by their original handle. The crate is designed as a
//! building block: domain types hold an [`EventBus`] as a field to gain
//! pub/sub capability, no inheritance or trait juggling required.
//!
//! ## Architecture
//! ```text
//!   on("save sync", l)       off(names?, l?)       once("boot", l)
//!          │                       │                     │
//!          ▼                       ▼                     ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │ EventBus (cloneable handle)                                 │
//! │   Registry: event name ──► [Registration, ..] (ordered)     │
//! └────────────────┬──────────────────────────┬─────────────────┘
//!                  │                          │
//!       trigger(names, args)        trigger_then("a b", args)
//!          sequential awaits,          flat snapshot across names,
//!          first Err aborts            try_join_all aggregation
//!                  │                          │
//!                  ▼                          ▼
//!     Result<(), ListenerError>    Result<Vec<R>, ListenerError>
//! ```
//!
//! ## Features
//! | Area             | Description                                                       | Key types / traits             |
//! |------------------|-------------------------------------------------------------------|--------------------------------|
//! | **Dispatch**     | Fire-and-forget and value-collecting triggers.                    | [`EventBus`]                   |
//! | **Listeners**    | Define listeners as closures or trait impls, shared via `Arc`.    | [`Listen`], [`ListenerFn`], [`ListenerRef`] |
//! | **One-shot**     | At-most-once delivery with cancel-before-fire support.            | [`EventBus::once`]             |
//! | **Errors**       | Typed listener failures forwarded to the dispatching caller.      | [`ListenerError`]              |
//! | **Configuration**| Per-instance settings (listener-leak tripwire).                   | [`BusConfig`]                  |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogListener`] _(demo/reference only)_.
//!
//! ## Guarantees
//! - Listeners for one name fire in registration order within a dispatch
//!   call; names are processed left-to-right. No ordering is promised
//!   across separate dispatch calls for different names.
//! - Dispatch iterates a snapshot, so listeners may register or remove
//!   listeners mid-flight without skipping or duplicating deliveries in
//!   the in-progress call.
//! - Listener failures are the caller's to observe: `trigger` returns the
//!   first error and stops; `trigger_then` fails its aggregate with the
//!   first error. The bus itself never logs, retries, or swallows them.
//!
//! ## Example
//! ```rust
//! use signalbus::{EventBus, ListenerError, ListenerFn, ListenerRef};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), ListenerError> {
//!     let bus: EventBus<String, usize> = EventBus::new();
//!
//!     let measure: ListenerRef<String, usize> = ListenerFn::arc("measure", |s: String| async move {
//!         Ok::<_, ListenerError>(s.len())
//!     });
//!     let shout: ListenerRef<String, usize> = ListenerFn::arc("shout", |s: String| async move {
//!         println!("{}!", s.to_uppercase());
//!         Ok::<_, ListenerError>(0)
//!     });
//!
//!     // One call registers under both names.
//!     bus.on("saved synced", measure);
//!     bus.once("saved", shout);
//!
//!     let lengths = bus.trigger_then("saved", &"payload".to_string()).await?;
//!     assert_eq!(lengths, vec![7, 0]);
//!
//!     // The one-shot listener is gone; only `measure` remains.
//!     assert_eq!(bus.listener_count("saved"), 1);
//!     Ok(())
//! }
//! ```

mod core;
mod error;
mod listeners;

// ---- Public re-exports ----

pub use crate::core::{BusConfig, EventBus};
pub use error::ListenerError;
pub use listeners::{Listen, ListenerFn, ListenerRef};

// Optional: expose a simple built-in logging listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::LogListener;
