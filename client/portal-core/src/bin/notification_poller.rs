use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::fmt::init;

use htportal_core::api::auth::login_and_persist;
use htportal_core::models::auth::LoginRequest;
use htportal_core::services::poller::PeriodicTask;
use htportal_core::{ApiClient, AuthorizationGate, PortalConfig, SessionStore};

/// Worker that keeps the notification badge and score fresh: logs in once,
/// then runs the cancellable periodic refresh until Ctrl-C.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();

    let config = PortalConfig::load().context("Failed to load configuration")?;
    let gate = AuthorizationGate::new(SessionStore::new(&config.storage_dir));
    let client = Arc::new(ApiClient::new(&config)?);

    let req = LoginRequest {
        email: std::env::var("PORTAL_EMAIL").context("PORTAL_EMAIL must be set")?,
        password: std::env::var("PORTAL_PASSWORD").context("PORTAL_PASSWORD must be set")?,
    };
    let session = login_and_persist(&client, &gate, &req).await?;
    tracing::info!(email = %session.email, "logged in");

    let poll_client = client.clone();
    let task = PeriodicTask::spawn(
        "notification-refresh",
        Duration::from_secs(config.poll_interval_secs),
        move || {
            let client = poll_client.clone();
            async move {
                let notifications = client.list_notifications().await?;
                let unread = notifications.iter().filter(|n| !n.read).count();
                let score = client.my_score().await?;
                tracing::info!(
                    total = notifications.len(),
                    unread,
                    score = score.score,
                    "refreshed"
                );
                Ok(())
            }
        },
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down {}", task.name());
    task.stop().await;

    Ok(())
}
