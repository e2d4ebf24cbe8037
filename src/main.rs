use clap::Parser;
use lead_notifier::{
    config, create_router,
    handlers::AppState,
    mailer::{self, SmtpMailer},
    service::LeadService,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lead-notifier")]
#[command(about = "Lead notification service sending through Brevo")]
struct Args {
    /// Log in to the configured SMTP relay, report the result and exit
    #[arg(long)]
    check_smtp: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to locate or load config: {e}");
    });

    if args.check_smtp {
        check_smtp(&cfg).await;
        return;
    }

    cfg.validate().unwrap_or_else(|e| {
        tracing::error!("Invalid config: {e}");
        panic!("invalid config: {e}");
    });
    tracing::info!(
        "Successfully loaded lead service config, transport: {:?}, recipients: {}",
        cfg.email_transport,
        cfg.recipient_emails.join(", ")
    );

    if cfg.webhook_secret.is_some() {
        tracing::warn!("webhook_secret is set but incoming webhooks are not verified against it");
    }

    // Setup service
    let mailer = mailer::from_config(&cfg).unwrap_or_else(|e| {
        tracing::error!("Failed to set up email transport: {e}");
        panic!("failed to set up email transport: {e}");
    });
    let service = LeadService::new(mailer, cfg.recipient_emails.clone(), cfg.app_name.clone());

    // Setup router
    let router = create_router(AppState {
        service,
        app_name: cfg.app_name.clone(),
    });

    // Start server
    let listener = tokio::net::TcpListener::bind(cfg.bind_address())
        .await
        .expect("Failed to bind to address");
    let addr = listener.local_addr().expect("Failed to read local address");

    tracing::info!("{} starting, listening on {}", cfg.app_name, addr);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}

async fn check_smtp(cfg: &config::Config) {
    if cfg.smtp_username.is_none() || cfg.smtp_password.is_none() {
        tracing::error!("smtp_username and smtp_password must be set to check the SMTP login");
        std::process::exit(1);
    }

    let result = match SmtpMailer::new(cfg) {
        Ok(mailer) => mailer.check_connection().await,
        Err(e) => {
            tracing::error!("Failed to set up SMTP transport: {e}");
            std::process::exit(1);
        }
    };

    match result {
        Ok(()) => tracing::info!(
            "SMTP login to {}:{} succeeded",
            cfg.smtp_host,
            cfg.smtp_port
        ),
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    }
}
