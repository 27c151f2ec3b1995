mod analysis;
mod auth;
mod config;
mod routes;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use auth::middleware::BasicAuthGate;
use config::AppConfig;
use routes::configure_routes;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    let frontend_dir = if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        format!("{}/../frontend/dist", manifest_dir)
    } else {
        "/usr/src/app/frontend/dist".to_string()
    };

    let app_config = AppConfig::from_env();
    if app_config.basic_auth.is_some() {
        log::info!("Basic auth gate armed for non-API routes");
    }
    if app_config.anthropic_api_key.is_some() {
        log::info!("Analysis configured with model {}", app_config.model);
    }

    let auth_gate = BasicAuthGate::new(app_config.basic_auth.clone());

    let port = env::var("PORT").unwrap_or_else(|_| "8081".to_string());
    let bind_address = format!("0.0.0.0:{}", port);

    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::AUTHORIZATION,
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .wrap(auth_gate.clone())
            .app_data(web::Data::new(app_config.clone()))
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
