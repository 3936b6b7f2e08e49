use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use blog_api_gateway::auth::TokenCodec;
use blog_api_gateway::backend::grpc;
use blog_api_gateway::cli::{self, Cli, Commands};
use blog_api_gateway::config::config;
use blog_api_gateway::middleware::Authorizer;
use blog_api_gateway::{router, AppState, RouterOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up JWT_SECRET and service addresses
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Cli::parse();
    let config = config();

    let permissions_path = args
        .permissions
        .clone()
        .or_else(|| config.security.permissions_file.clone().map(Into::into));
    let permissions = cli::load_permissions(permissions_path.as_deref()).context("loading permission table")?;

    match args.command.unwrap_or(Commands::Serve) {
        Commands::Token {
            user_id,
            role,
            ttl_minutes,
        } => {
            let token = cli::mint_token(&config.security.jwt_secret, user_id, role.into(), ttl_minutes)
                .context("minting token")?;
            println!("{}", token);
            Ok(())
        }
        Commands::Permissions => {
            print!("{}", cli::render_permissions(&permissions)?);
            Ok(())
        }
        Commands::Serve => {
            config.validate().context("invalid configuration")?;
            tracing::info!("Starting blog API gateway in {:?} mode", config.environment);

            let codec = TokenCodec::new(&config.security.jwt_secret).context("building token codec")?;
            let backend = grpc::connect(&config.services, &config.rpc)
                .await
                .context("connecting to backend services")?;

            let state = AppState::new(backend, Authorizer::new(codec, Arc::new(permissions)));
            let app = router(
                state,
                &RouterOptions {
                    cors_origins: config.security.cors_origins.clone(),
                    request_logging: config.http.enable_request_logging,
                },
            );

            let port = args.port.unwrap_or(config.http.port);
            let bind_addr = format!("0.0.0.0:{}", port);
            let listener = tokio::net::TcpListener::bind(&bind_addr)
                .await
                .with_context(|| format!("failed to bind {}", bind_addr))?;

            tracing::info!("blog API gateway listening on http://{}", bind_addr);
            axum::serve(listener, app).await.context("server error")?;
            Ok(())
        }
    }
}
