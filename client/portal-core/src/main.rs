use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use htportal_core::api::auth::login_and_persist;
use htportal_core::models::auth::LoginRequest;
use htportal_core::{ApiClient, AuthorizationGate, PortalConfig, QuizRound, SessionStore};

/// Diagnostic console: logs in with env-provided credentials, resolves the
/// authorization gate, and prints a dashboard snapshot. A smoke harness for
/// the library, not a product UI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "htportal_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting HT Portal console");

    let config = PortalConfig::load().context("Failed to load configuration")?;
    tracing::info!(base_url = %config.api_base_url, "Configuration loaded");

    let store = SessionStore::new(&config.storage_dir);
    let gate = AuthorizationGate::new(store);
    let client = Arc::new(ApiClient::new(&config)?);

    let req = LoginRequest {
        email: std::env::var("PORTAL_EMAIL").context("PORTAL_EMAIL must be set")?,
        password: std::env::var("PORTAL_PASSWORD").context("PORTAL_PASSWORD must be set")?,
    };
    let session = login_and_persist(&client, &gate, &req)
        .await
        .context("Login failed")?;

    println!("Logged in as {} <{}>", session.full_name, session.email);
    println!(
        "Edit/delete affordances: {}",
        if gate.is_authorized(&session) {
            "shown (admin)"
        } else {
            "hidden (member)"
        }
    );

    // Independent sections load concurrently; read-path failures degrade to
    // empty sections, matching the console's page behavior, and never abort
    // the snapshot.
    let (notifications, score, questions) = futures::join!(
        client.list_notifications(),
        client.my_score(),
        client.list_questions(config.quiz_year),
    );

    match notifications {
        Ok(notifications) => {
            let unread = notifications.iter().filter(|n| !n.read).count();
            println!("Notifications: {} ({} unread)", notifications.len(), unread);
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch notifications");
            println!("Notifications: unavailable");
        }
    }

    let mut round = QuizRound::new();
    match score {
        Ok(score) => round.set_score(score.score),
        Err(e) => tracing::warn!(error = %e, "failed to fetch score"),
    }

    match questions {
        Ok(questions) => {
            println!(
                "Quiz {}: {} question(s), score {}",
                config.quiz_year,
                questions.len(),
                round.score()
            );
            for q in &questions {
                println!(
                    "  #{} [{}] {} — {:?}",
                    q.id,
                    round.time_remaining(q),
                    q.question_text,
                    round.state_for(q)
                );
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch quiz questions");
            println!("Quiz {}: unavailable", config.quiz_year);
        }
    }

    Ok(())
}
