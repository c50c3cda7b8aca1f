use actix_web::{web, App, HttpServer};
use hopline::{api, AppState, Config, HoplineError, RELAY_CHANNEL_SIZE};
use hopline_relay::spawn_relay;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> Result<(), HoplineError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let relay = spawn_relay(RELAY_CHANNEL_SIZE);
    let state = web::Data::new(AppState::new(relay));

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        cors = ?config.cors,
        "starting relay server"
    );

    let cors_config = config.cors.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(cors_config.middleware())
            .app_data(state.clone())
            .service(api::health)
            .service(api::players)
            .service(api::websocket)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
