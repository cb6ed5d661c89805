//! End-to-end tracing scenarios that install process-wide plugins.
//!
//! These live in an integration test (own process) because the plugin
//! registry is install-once for the process lifetime.

use std::sync::{Arc, Mutex};

use errvisor::{
    failure, subscribe_future, Failure, Listener, Plugins, SubscriptionError, TraceLogger,
};

#[derive(Debug, thiserror::Error)]
#[error("fetch failed: logging listener")]
struct LoggedCase;

#[derive(Debug, thiserror::Error)]
#[error("fetch failed: custom listener")]
struct CustomCase;

fn install_recording_plugins() -> Arc<Mutex<Vec<Failure>>> {
    let logged = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&logged);
    Plugins::default()
        .with_log_sink(move |fail: Failure| sink.lock().unwrap().push(fail))
        .with_tracing(TraceLogger::with_predicate(|_source, _terminal| true))
        .install()
        .expect("first install");
    logged
}

fn logged_decorations(logged: &Mutex<Vec<Failure>>, cause_message: &str) -> Vec<Failure> {
    logged
        .lock()
        .unwrap()
        .iter()
        .filter(|fail| fail.to_string().contains(cause_message))
        .cloned()
        .collect()
}

#[tokio::test(flavor = "current_thread")]
async fn traced_failures_log_origin_without_double_logging() {
    let logged = install_recording_plugins();

    // A values-only listener is a pure logger: its failure must produce
    // exactly one log entry, the decoration, and nothing else.
    let fail = failure(LoggedCase);
    let original = fail.clone();
    subscribe_future(
        async move { Err::<u32, _>(original) },
        Listener::values(|_v| {}),
    )
    .join()
    .await;

    let entries = logged_decorations(&logged, "logging listener");
    assert_eq!(entries.len(), 1, "one log entry, not two");
    let decoration = entries[0]
        .downcast_ref::<SubscriptionError>()
        .expect("log sink sees the decoration");
    assert!(Arc::ptr_eq(decoration.cause(), &fail));
    assert!(
        !decoration.subscribed_at().is_empty(),
        "origin stack was captured"
    );

    // A listener with its own error handling still observes the original
    // failure value, never the decoration; the log gets the decoration.
    let fail = failure(CustomCase);
    let original = fail.clone();
    let delivered = Arc::new(Mutex::new(None::<Failure>));
    let slot = Arc::clone(&delivered);
    subscribe_future(
        async move { Err::<u32, _>(original) },
        Listener::terminal(move |outcome| {
            *slot.lock().unwrap() = outcome;
        }),
    )
    .join()
    .await;

    let got = delivered.lock().unwrap().clone().expect("error delivered");
    assert!(Arc::ptr_eq(&got, &fail));
    assert!(got.downcast_ref::<SubscriptionError>().is_none());

    let entries = logged_decorations(&logged, "custom listener");
    assert_eq!(entries.len(), 1);
    let decoration = entries[0]
        .downcast_ref::<SubscriptionError>()
        .expect("decoration logged for custom listener too");
    assert!(Arc::ptr_eq(decoration.cause(), &fail));
}
