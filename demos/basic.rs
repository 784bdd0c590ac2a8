//! Minimal subscribe/trigger round trip.
//!
//! Run with: `cargo run --example basic`

use signalbus::{EventBus, ListenerError, ListenerFn, ListenerRef};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ListenerError> {
    let bus: EventBus<String> = EventBus::new();

    let greeter: ListenerRef<String> = ListenerFn::arc("greeter", |who: String| async move {
        println!("hello, {who}!");
        Ok::<_, ListenerError>(())
    });

    // One call registers the listener under both names.
    bus.on("user.created user.renamed", greeter);

    bus.trigger(["user.created"], &"ada".to_string()).await?;
    bus.trigger(["user.renamed"], &"grace".to_string()).await?;

    // Unknown names are a no-op, never an error.
    bus.trigger(["user.deleted"], &"nobody".to_string()).await?;

    Ok(())
}
