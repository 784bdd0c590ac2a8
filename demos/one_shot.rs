//! One-shot listeners: at-most-once delivery and cancel-before-fire.
//!
//! Run with: `cargo run --example one_shot`

use signalbus::{EventBus, ListenerError, ListenerFn, ListenerRef};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ListenerError> {
    let bus: EventBus = EventBus::new();

    let banner: ListenerRef = ListenerFn::arc("banner", |_: ()| async {
        println!("ready (you will see this once)");
        Ok::<_, ListenerError>(())
    });
    bus.once("boot reload", banner);

    // Fires under "boot", which retires the listener from "reload" too.
    bus.trigger(["boot"], &()).await?;
    bus.trigger(["boot", "reload"], &()).await?;
    assert_eq!(bus.total_listener_count(), 0);

    // A pending one-shot is cancelable with the handle that registered it.
    let never: ListenerRef = ListenerFn::arc("never", |_: ()| async {
        Err::<(), _>(ListenerError::failed("this listener must never fire"))
    });
    bus.once("boot", never.clone());
    bus.off(Some("boot"), Some(&never));
    bus.trigger(["boot"], &()).await?;
    println!("cancelled one-shot stayed silent");

    Ok(())
}
