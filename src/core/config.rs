//! # Bus configuration.
//!
//! Provides [`BusConfig`], the per-instance settings for an
//! [`EventBus`](crate::EventBus).
//!
//! ## Sentinel values
//! - `listener_warn_threshold = 0` → the leak tripwire is disabled

/// Configuration for one [`EventBus`](crate::EventBus) instance.
///
/// ## Field semantics
/// - `listener_warn_threshold`: leak tripwire (`0` = disabled)
///
/// ## Notes
/// All fields are public for flexibility; `Default` provides sane values
/// for typical use.
#[derive(Clone, Debug)]
pub struct BusConfig {
    /// Number of registrations a single event name may accumulate before
    /// the bus prints a one-line warning to stderr.
    ///
    /// Crossing the threshold is reported once per crossing and never
    /// rejects the registration. Runaway growth under one name usually
    /// means a caller re-registers on every dispatch without a matching
    /// [`off`](crate::EventBus::off).
    ///
    /// `0` disables the warning entirely.
    pub listener_warn_threshold: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            listener_warn_threshold: 64,
        }
    }
}
