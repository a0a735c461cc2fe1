use clap::Parser;
use poem::{listener::TcpListener, Server};

use siteuser_auth::api::build_routes;
use siteuser_auth::cli::{self, Cli, Commands};
use siteuser_auth::config::{init_logging, LoggingConfig, Settings, SystemEnvironment};
use siteuser_auth::AppData;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging(&LoggingConfig::from_env_provider(&SystemEnvironment))?;

    let cli = Cli::parse();
    let settings = Settings::from_env()?;
    tracing::debug!(?settings, "Settings loaded");

    let app_data = AppData::init(&settings).await?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&app_data, &settings).await?,
        command => cli::execute_command(command, &app_data).await?,
    }

    Ok(())
}

async fn serve(app_data: &AppData, settings: &Settings) -> Result<(), std::io::Error> {
    let address = settings.server_address();
    let public_url = format!("http://localhost:{}", settings.server_port());

    let app = build_routes(app_data, &public_url);

    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at {}/swagger", public_url);

    Server::new(TcpListener::bind(address)).run(app).await
}
