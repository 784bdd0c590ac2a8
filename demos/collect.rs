//! Value-collecting dispatch with `trigger_then`.
//!
//! Each listener contributes a value; the aggregate resolves once all of
//! them settle, in invocation order, or fails with the first error.
//!
//! Run with: `cargo run --example collect`

use std::time::Duration;

use signalbus::{EventBus, ListenerError, ListenerFn, ListenerRef};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ListenerError> {
    let bus: EventBus<u64, u64> = EventBus::new();

    let immediate: ListenerRef<u64, u64> = ListenerFn::arc("immediate", |n: u64| async move {
        Ok::<_, ListenerError>(n + 1)
    });
    let delayed: ListenerRef<u64, u64> = ListenerFn::arc("delayed", |n: u64| async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok::<_, ListenerError>(n * 2)
    });

    bus.on("calc", immediate);
    bus.on("calc", delayed);

    // `delayed` settles last but still lands second in the output.
    let values = bus.trigger_then("calc", &10).await?;
    println!("collected: {values:?}");
    assert_eq!(values, vec![11, 20]);

    // A failing listener fails the whole aggregate.
    let boom: ListenerRef<u64, u64> = ListenerFn::arc("boom", |_: u64| async {
        Err::<u64, _>(ListenerError::failed("downstream unavailable"))
    });
    bus.on("calc", boom);

    match bus.trigger_then("calc", &10).await {
        Ok(_) => unreachable!("aggregate must fail"),
        Err(err) => println!("aggregate failed: {err} (label={})", err.as_label()),
    }

    Ok(())
}
