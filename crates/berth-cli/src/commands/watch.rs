//! Live session view: the console's rendition of the dashboard panel.

use super::AppContext;
use super::sessions::print_row;
use anyhow::{Result, bail};
use berth_application::{AuthController, PollingRefresher, SessionListController};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

pub async fn run(ctx: &AppContext, workspace_id: &str, interval_secs: Option<u64>) -> Result<()> {
    let auth = AuthController::new(ctx.client.clone(), ctx.store.clone());
    auth.initialize().await;
    if !auth.current().is_authenticated() {
        bail!("not logged in; run `berth login`");
    }
    let mut auth_rx = auth.subscribe();

    let cancel = CancellationToken::new();
    let watchdog = auth.spawn_expiry_watchdog(ctx.config.expiry_check_interval(), cancel.clone());

    let mut sessions = SessionListController::new(ctx.client.clone(), workspace_id);
    sessions.load().await?;
    let sessions = Arc::new(Mutex::new(sessions));

    let interval = interval_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| ctx.config.poll_interval());
    let poller = PollingRefresher::spawn(sessions.clone(), interval);

    println!(
        "Watching sessions of workspace {workspace_id} every {}s (ctrl-c to stop)",
        interval.as_secs()
    );

    loop {
        {
            let guard = sessions.lock().await;
            println!("-- {}", chrono::Utc::now().to_rfc3339());
            if guard.items().is_empty() {
                println!("no sessions");
            }
            for session in guard.items() {
                print_row(session);
            }
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = auth_rx.changed() => {
                if changed.is_err() || !auth_rx.borrow().is_authenticated() {
                    eprintln!("session ended; stopping watch");
                    break;
                }
            }
            _ = tokio::time::sleep(interval) => {}
        }
    }

    poller.shutdown().await;
    cancel.cancel();
    let _ = watchdog.await;
    Ok(())
}
