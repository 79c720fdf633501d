use std::process::ExitCode;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use booking_core::api::{ApiClient, FileSearchProvider, SearchProvider};
use booking_core::cache::CachedSearchClient;
use booking_core::config::{AppConfig, CheckoutTarget};
use booking_core::domain::{OrderPayload, TrainOffer};
use booking_core::filter::ResultView;
use booking_core::payment::{PaymentSession, SessionStatus};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::from(2);
        }
    };

    let Some(criteria) = config.search.clone() else {
        eprintln!("Nothing to do: set BOOKING_FROM and BOOKING_TO to search.");
        return ExitCode::from(2);
    };

    let client = ApiClient::new(config.api.clone()).expect("Failed to create booking API client");

    // Search, from file or backend
    let results = match &config.results_file {
        Some(path) => {
            info!(path = %path.display(), "serving results from file");
            let provider = FileSearchProvider::new(path).expect("Failed to load results file");
            provider.search(&criteria).await
        }
        None => {
            let cached = CachedSearchClient::new(client.clone(), &config.cache);
            cached.search(&criteria).await
        }
    };
    let results = match results {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Search failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "{} trains from {} to {} on {}",
        results.len(),
        criteria.from,
        criteria.to,
        criteria.date
    );

    let mut view = ResultView::new(results);
    for facet in view.facets().iter().filter(|f| !f.is_empty()) {
        let labels: Vec<&str> = facet.values.iter().map(|v| v.label.as_str()).collect();
        println!("  {:<20} {}", facet.key.as_str(), labels.join(", "));
    }

    view.set_only_available(true);
    println!("{} with seats left:", view.visible().len());
    for offer in view.visible() {
        println!("  {}", describe(offer));
    }

    let Some(target) = &config.checkout else {
        return ExitCode::SUCCESS;
    };

    let payload = match checkout_payload(view.visible(), target) {
        Ok(payload) => payload,
        Err(message) => {
            eprintln!("Cannot check out: {message}");
            return ExitCode::FAILURE;
        }
    };

    // Checkout, cancelled by Ctrl-C
    let session = PaymentSession::new(client, config.session.clone());
    let handle = session.handle();
    let mut updates = handle.subscribe();
    let run = session.start(payload);
    tokio::pin!(run);

    let outcome = loop {
        tokio::select! {
            outcome = &mut run => break outcome,
            _ = tokio::signal::ctrl_c() => {
                if handle.cancel() {
                    warn!("checkout cancelled by user");
                }
            }
            Ok(()) = updates.changed() => {
                let snapshot = updates.borrow_and_update().clone();
                match snapshot.status() {
                    SessionStatus::Pending => {
                        println!("  waiting for payment, {}s left", snapshot.remaining_secs())
                    }
                    status => println!("  {status}"),
                }
            }
        }
    };

    match outcome.reason() {
        None => println!("Checkout {}", outcome.status()),
        Some(reason) => println!("Checkout {}: {}", outcome.status(), reason),
    }

    if outcome.status() == SessionStatus::Succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn describe(offer: &TrainOffer) -> String {
    let departure = offer
        .departure
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());
    let category = offer
        .category
        .as_ref()
        .map(|c| c.label().to_string())
        .unwrap_or_default();
    let seats: Vec<String> = offer
        .seats
        .iter()
        .map(|s| format!("{} x{}", s.seat_type, s.remaining))
        .collect();

    format!(
        "{:<8} {} {:<24} {}",
        offer.train_no,
        departure,
        category,
        seats.join(", ")
    )
}

fn checkout_payload(
    visible: &[Arc<TrainOffer>],
    target: &CheckoutTarget,
) -> Result<OrderPayload, String> {
    let offer = visible
        .iter()
        .find(|o| o.train_no == target.train_no)
        .ok_or_else(|| format!("train {} has no seats left", target.train_no))?;

    let train_id = offer
        .train_id
        .ok_or_else(|| format!("train {} has no backend id", offer.train_no))?;

    let seat = match &target.seat_type {
        Some(seat_type) => offer
            .seat(seat_type)
            .filter(|s| s.remaining > 0)
            .ok_or_else(|| format!("no {} seats left on {}", seat_type, offer.train_no))?,
        None => offer
            .seats
            .iter()
            .find(|s| s.remaining > 0)
            .ok_or_else(|| format!("no seats left on {}", offer.train_no))?,
    };

    Ok(OrderPayload::new(train_id, seat.seat_type.clone(), seat.price_cents))
}
