//! Built-in stdout listener from the `logging` feature.
//!
//! Run with: `cargo run --example log_listener --features logging`

use std::sync::Arc;

use signalbus::{EventBus, ListenerError, LogListener, ListenerRef};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ListenerError> {
    let bus: EventBus<String> = EventBus::new();

    let log: ListenerRef<String> = Arc::new(LogListener);
    bus.on("order.placed order.shipped", log);

    bus.trigger(["order.placed"], &"order-1042".to_string()).await?;
    bus.trigger(["order.shipped"], &"order-1042".to_string()).await?;

    Ok(())
}
