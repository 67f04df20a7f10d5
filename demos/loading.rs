//! Tracks two simulated fetches and prints what a UI would display at each
//! state change: nothing inside the pending delay, then a loading line, then
//! the result or the error.

use promistate::{PromiseTracker, ViewBinding};
use std::time::Duration;
use tokio::sync::watch;

async fn print_until_settled(
    updates: &mut watch::Receiver<promistate::StateSnapshot<String>>,
    view: &ViewBinding<String, String>,
) {
    loop {
        let settled = {
            let snapshot = updates.borrow_and_update();
            if let Some(line) = view.render(&snapshot) {
                println!("{line}");
            }
            !snapshot.is_pending()
        };
        if settled || updates.changed().await.is_err() {
            break;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let view: ViewBinding<String, String> = ViewBinding::new()
        .on_pending(|previous| match previous {
            Some(previous) => format!("loading... (still showing \"{previous}\")"),
            None => "loading...".to_string(),
        })
        .on_resolved(|data| format!("loaded: {}", data.map(String::as_str).unwrap_or("<none>")))
        .on_rejected(|error| format!("failed: {error}"));

    let mut tracker = PromiseTracker::new();
    let mut updates = tracker.subscribe();

    tracker.track(async {
        tokio::time::sleep(Duration::from_millis(350)).await;
        Ok("user profile".to_string())
    });
    print_until_settled(&mut updates, &view).await;

    tracker.track(async {
        tokio::time::sleep(Duration::from_millis(350)).await;
        Err(anyhow::anyhow!("profile service unreachable"))
    });
    print_until_settled(&mut updates, &view).await;

    tracker.clear();
    Ok(())
}
