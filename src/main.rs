use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use dotenv::dotenv;
use log::{error, info, warn};

use yaddoo_chat::config::Config;
use yaddoo_chat::model::{GroqClient, ModelManager};
use yaddoo_chat::web::error::json_error_handlers;
use yaddoo_chat::web::routes;
use yaddoo_chat::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Yaddoo chat service");

    let config = Config::from_env();
    info!("Loaded configuration: {:?}", config);
    if !config.has_key() {
        warn!("GROQ_API_KEY is not set; model replies will report the missing key");
    }

    let client = match GroqClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let model = ModelManager::new(Arc::new(client), &config);
    let bind = (config.host.clone(), config.port);
    let static_dir = config.static_dir.clone();

    let app_state = Data::new(AppState { config, model });

    info!("Listening on {}:{}", bind.0, bind.1);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(json_error_handlers())
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(app_state.clone())
            .configure(|cfg| routes::configure(cfg, &static_dir))
    });

    let server = match server.bind(&bind) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to bind {}:{}: {}", bind.0, bind.1, e);
            std::process::exit(1);
        }
    };

    server.run().await
}
