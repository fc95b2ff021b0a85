use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use moderation_service::{routes, Config, ModerationService};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Config::from_env();
    tracing::info!(
        service = %config.service_name,
        environment = %config.environment,
        data_dir = %config.data_dir.display(),
        "Configuration loaded"
    );

    let service = web::Data::new(ModerationService::from_config(&config));
    let bind_addr = (config.host.clone(), config.port);

    tracing::info!(host = %config.host, port = config.port, "Starting moderation service");

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(service.clone())
            .configure(routes::configure_routes)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
