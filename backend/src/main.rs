mod config;
mod csrf;
mod pages;
mod repository;
mod services;
mod state;

use crate::config::AppConfig;
use crate::state::AppState;
use actix_web::{middleware, web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::io;
use std::thread;
use std::time::Duration;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = AppConfig::from_env();

    let state = AppState::new(&config).map_err(io::Error::other)?;
    state.repository.init_schema().map_err(io::Error::other)?;
    info!("Using database {}", state.repository.path().display());

    let url = config.url();
    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url);
        });
    }

    info!("Server running at {}", url);

    let state = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(web::FormConfig::default().limit(16 * 1024))
            .service(services::assets::configure_routes())
            .configure(services::cafes::configure_routes)
            .default_service(web::route().to(services::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
