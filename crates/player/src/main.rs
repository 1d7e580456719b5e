//! EventDeck Player - preview runner.
//!
//! Loads an event list, prints the listing-card view models, then runs the
//! featured carousel's auto-advance timer for a few rotations and prints the
//! carousel view after each one.

use std::sync::Arc;

use anyhow::Context;
use tokio::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eventdeck_domain::TimeFormatter;
use eventdeck_player::config::{self, PlayerConfig};
use eventdeck_player::infrastructure::{load_events, FixedClock, InMemoryRegistrationStore, SystemClock};
use eventdeck_player::ports::outbound::{ClockPort, RegistrationStorePort};
use eventdeck_player::{EventCardView, FeaturedCarouselState, RegistrationWatcher};

/// Slack after each expected tick before the view is sampled.
const SAMPLE_DELAY: std::time::Duration = std::time::Duration::from_millis(50);

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");
    config::load_dotenv(&repo_root);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventdeck_player=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting EventDeck Player preview");

    let config = PlayerConfig::from_env().context("invalid configuration")?;
    let events = load_events(&config.events_path)
        .with_context(|| format!("loading events from {}", config.events_path.display()))?;

    let clock: Arc<dyn ClockPort> = match config.now {
        Some(now) => Arc::new(FixedClock(now)),
        None => Arc::new(SystemClock::new()),
    };
    let formatter = TimeFormatter::default();

    // Registration store, seeded with the preview user's registrations
    let store = InMemoryRegistrationStore::new();
    if let Some(user_id) = &config.user_id {
        for event_id in &config.registered_events {
            store.register(event_id, user_id);
        }
    }
    let store: Arc<dyn RegistrationStorePort> = Arc::new(store);

    // Listing cards
    let watchers: Vec<RegistrationWatcher> = events
        .iter()
        .map(|event| {
            RegistrationWatcher::new(Arc::clone(&store), event.id.clone(), config.user_id.clone())
        })
        .collect();

    for (event, watcher) in events.iter().zip(&watchers) {
        let card = EventCardView::from_watcher(event, &formatter, watcher);
        println!("{}", serde_json::to_string_pretty(&card)?);
    }

    // Featured carousel
    let carousel = FeaturedCarouselState::new(events, clock, formatter);
    let Some(view) = carousel.view() else {
        tracing::info!("No featured events; carousel not shown");
        return Ok(());
    };
    println!("{}", serde_json::to_string_pretty(&view)?);

    let started = Instant::now();
    let timer = carousel.start_auto_advance(config.rotate_interval);

    for rotation in 1..=config.preview_rotations {
        tokio::time::sleep_until(started + config.rotate_interval * rotation + SAMPLE_DELAY).await;
        if let Some(view) = carousel.view() {
            tracing::info!(rotation, active = view.active_index, title = %view.title, "carousel rotated");
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }

    timer.stop();
    drop(watchers);
    tracing::info!("Preview finished");
    Ok(())
}
