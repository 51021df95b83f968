use std::env;

use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use ikimina_savings::clients::prediction::HttpLoanPredictor;
use ikimina_savings::db::establish_connection_pool_with;
use ikimina_savings::models::config::ServerConfig;
use ikimina_savings::repository::DieselRepository;
use ikimina_savings::routes;

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    config::Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build()?
        .try_deserialize()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let server_config = match load_config() {
        Ok(server_config) => server_config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool_with(
        &server_config.database_url,
        server_config.pool_options(),
    ) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let predictor = match HttpLoanPredictor::new(
        server_config.prediction_url.clone(),
        server_config.prediction_timeout(),
    ) {
        Ok(predictor) => predictor,
        Err(e) => {
            log::error!("Failed to build loan prediction client: {e}");
            std::process::exit(1);
        }
    };

    let bind_address = (server_config.bind_address.clone(), server_config.port);
    log::info!("Starting Ikimina savings service on {}:{}", bind_address.0, bind_address.1);

    let repo = web::Data::new(DieselRepository::new(pool));
    let predictor = web::Data::new(predictor);
    let server_config = web::Data::new(server_config);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(repo.clone())
            .app_data(predictor.clone())
            .app_data(server_config.clone())
            .service(web::scope("/api").configure(routes::configure))
    })
    .bind(bind_address)?
    .run()
    .await
}
