use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use std::sync::Arc;

use taskshare::config::Config;
use taskshare::db::{self, PgStorage};
use taskshare::routes;
use taskshare::store::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = db::connect_pool(&config)
        .await
        .expect("Failed to connect to database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let state = web::Data::new(AppState::new(Arc::new(PgStorage::new(pool))));
    let allowed_origins = config.cors_allowed_origins.clone();

    log::info!("Starting taskshare server at {}", config.server_url());

    HttpServer::new(move || {
        // Pinned origins in deployment; permissive only when none are
        // configured (local dev).
        let cors = match &allowed_origins {
            Some(origins) => {
                let mut cors = Cors::default()
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
                    .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
                    .supports_credentials();
                for origin in origins {
                    cors = cors.allowed_origin(origin);
                }
                cors
            }
            None => Cors::permissive(),
        };

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(web::scope("/api").configure(routes::config))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
