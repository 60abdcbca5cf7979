use std::sync::Arc;

use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use rzp_gateway::adapters::firestore::FirestoreDocumentStore;
use rzp_gateway::adapters::http::{build_app, HttpOptions, PaymentAppState};
use rzp_gateway::adapters::razorpay::{RazorpayApiConfig, RazorpayPaymentAdapter};
use rzp_gateway::adapters::storage::NoopDocumentStore;
use rzp_gateway::config::{AppConfig, StoreConfig};
use rzp_gateway::domain::payment::{PaymentSignatureVerifier, WebhookSignatureVerifier};
use rzp_gateway::ports::DocumentStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let capture_mode = config.razorpay.capture_mode()?;
    if !config.razorpay.webhook_secret_configured() {
        warn!("Webhook secret not configured; every webhook will be rejected");
    }
    if config.is_production() && config.razorpay.is_test_mode() {
        warn!("Running in production with Razorpay test keys");
    }

    let processor = RazorpayPaymentAdapter::new(
        RazorpayApiConfig::new(
            config.razorpay.key_id.clone(),
            config.razorpay.key_secret.clone(),
        )
        .with_base_url(config.razorpay.api_base_url.clone()),
    );

    let state = PaymentAppState {
        processor: Arc::new(processor),
        store: build_store(&config.store)?,
        payment_verifier: PaymentSignatureVerifier::new(
            config.razorpay.key_secret.expose_secret().clone(),
        ),
        webhook_verifier: WebhookSignatureVerifier::new(
            config.razorpay.webhook_secret.expose_secret().clone(),
        ),
        collections: config.store.collections(),
        capture_mode,
        environment: config.server.environment.to_string(),
    };

    let app = build_app(
        state,
        HttpOptions {
            frontend_origin: config.server.frontend_origin_header()?,
            request_timeout: config.server.request_timeout(),
        },
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        environment = %config.server.environment,
        capture = capture_mode.as_flag(),
        "Payment gateway listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

/// Firestore when credentials are configured, otherwise a store that
/// discards writes.
fn build_store(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, BoxError> {
    match config.credential_source() {
        Some(source) => {
            let key = source.load()?;
            let store = FirestoreDocumentStore::new(key, config.project_id.clone());
            info!(
                credentials = %source.describe(),
                project_id = %store.config().project_id,
                "Firestore document store enabled"
            );
            Ok(Arc::new(store))
        }
        None => {
            warn!("No store credentials configured; documents will not be persisted");
            Ok(Arc::new(NoopDocumentStore::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down");
}
