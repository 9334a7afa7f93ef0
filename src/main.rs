use std::process::ExitCode;
use std::sync::Arc;

use secrecy::ExposeSecret;
use tokio::net::TcpListener;

use farm_registration::adapters::http::{app_router, HttpSettings, RegistrationAppState};
use farm_registration::adapters::http::registration::ServiceInfo;
use farm_registration::adapters::{
    postgres, InMemoryRegistrationRepository, PostgresRegistrationRepository, RazorpayConfig,
    RazorpayPaymentAdapter,
};
use farm_registration::application::OrderPolicy;
use farm_registration::config::{AppConfig, RegistrationStore};
use farm_registration::domain::registration::PaymentSignatureVerifier;
use farm_registration::ports::RegistrationRepository;
use farm_registration::telemetry;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load_validated() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = telemetry::init_tracing(&config.server) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server exited with error");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let repository: Arc<dyn RegistrationRepository> = match config.database.store() {
        RegistrationStore::Postgres => {
            let pool = postgres::connect(&config.database).await?;
            tracing::info!("Connected to PostgreSQL");
            Arc::new(PostgresRegistrationRepository::new(pool))
        }
        RegistrationStore::InMemory => {
            tracing::warn!("No database URL configured, registrations are kept in memory");
            Arc::new(InMemoryRegistrationRepository::new())
        }
    };

    let payment = &config.payment;
    let gateway = RazorpayPaymentAdapter::new(
        RazorpayConfig::new(
            payment.razorpay_key_id.clone(),
            payment.razorpay_key_secret.clone(),
        )
        .with_base_url(payment.api_base_url.clone())
        .with_timeout(payment.timeout()),
    )?;

    let state = RegistrationAppState {
        registration_repository: repository,
        payment_gateway: Arc::new(gateway),
        signature_verifier: PaymentSignatureVerifier::new(payment.razorpay_key_secret.clone()),
        order_policy: OrderPolicy {
            amount: payment.amount,
            currency: payment.currency.clone(),
        },
        service_info: ServiceInfo {
            environment: config.server.environment.to_string(),
            gateway_key_configured: !payment.razorpay_key_id.is_empty()
                && !payment.razorpay_key_secret.expose_secret().is_empty(),
        },
    };

    let settings = HttpSettings {
        cors_origins: config.server.cors_origins_list(),
        request_timeout: config.server.request_timeout(),
    };
    let app = app_router(state, &settings);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = %config.server.environment,
        test_mode = payment.is_test_mode(),
        "Farm registration service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
