use std::sync::Arc;

use trip_wizard::client::{HttpSubmissionClient, SubmissionClient};
use trip_wizard::config::WizardConfig;
use trip_wizard::print::FilePrinter;
use trip_wizard::render::ResultRenderer;
use trip_wizard::server::{EXPIRY_SWEEP_INTERVAL, SessionStore, spawn_expiry_sweep, wizard_routes};
use trip_wizard::terminal::TerminalFrontend;
use trip_wizard::wizard::{Notifications, WizardController};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = WizardConfig::from_env()?;
    let client: Arc<dyn SubmissionClient> =
        Arc::new(HttpSubmissionClient::new(config.api_base_url.clone()));
    let renderer = ResultRenderer::new(config.render_style);

    let serve = std::env::args().nth(1).is_some_and(|arg| arg == "serve");

    eprintln!("✈️  Trip Wizard v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend: {}", config.api_base_url);
    eprintln!("   Render style: {}", config.render_style);

    if serve {
        eprintln!(
            "   Wizard API: http://0.0.0.0:{}/api/wizard/sessions",
            config.port
        );
        eprintln!("   Session idle timeout: {}s\n", config.session_idle.as_secs());
        let store = SessionStore::new(
            client,
            renderer,
            config.notification_ttl_chrono(),
            config.session_idle_chrono(),
        );
        let _sweep = spawn_expiry_sweep(Arc::clone(&store), EXPIRY_SWEEP_INTERVAL);
        let app = wizard_routes(store);
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
        tracing::info!(port = config.port, "Wizard server listening");
        axum::serve(listener, app).await?;
        return Ok(());
    }

    eprintln!("   Printable output: {}\n", config.output_path.display());

    let mut wizard = WizardController::new(
        client,
        renderer,
        Notifications::new(config.notification_ttl_chrono()),
    );
    let printer = FilePrinter::new(config.output_path.clone());
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut frontend = TerminalFrontend::new(stdin, std::io::stdout());
    frontend.run(&mut wizard, &printer).await?;

    Ok(())
}
