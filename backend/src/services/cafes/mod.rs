//! # Cafe Directory Endpoints
//!
//! Registers the three cafe routes at the root of the application:
//!
//! *   **`GET /`** (`list::process`): renders every stored cafe as an HTML table.
//! *   **`GET /add-cafe`** (`add::form`): renders an empty submission form.
//! *   **`POST /add-cafe`** (`add::submit`): validates the posted form, inserts the
//!     cafe and redirects to `/` with `303 See Other`. Invalid submissions and
//!     duplicate names re-render the form with inline errors and a `200 OK`.
//! *   **`GET /all`** (`all::process`): returns `{"cafes": [...]}` as JSON.
//!
//! Storage calls are blocking and run on actix's blocking pool via
//! `with_repository`. A store failure never escapes a handler: it becomes a
//! `500` response and an error log line.

mod add;
mod all;
mod list;

use crate::repository::{CafeRepository, RepositoryError};
use crate::state::AppState;
use actix_web::web::{self, get, post, resource};
use actix_web::HttpResponse;
use log::error;
use tera::Context;

const UNAVAILABLE_MESSAGE: &str =
    "The cafe directory is temporarily unavailable. Please try again later.";

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(resource("/").route(get().to(list::process)))
        .service(
            resource("/add-cafe")
                .route(get().to(add::form))
                .route(post().to(add::submit)),
        )
        .service(resource("/all").route(get().to(all::process)));
}

/// Runs a repository operation off the async workers.
async fn with_repository<T, F>(state: &AppState, op: F) -> Result<T, RepositoryError>
where
    F: FnOnce(&CafeRepository) -> Result<T, RepositoryError> + Send + 'static,
    T: Send + 'static,
{
    let repository = state.repository.clone();
    web::block(move || op(&repository)).await?
}

fn server_error(state: &AppState, e: &RepositoryError) -> HttpResponse {
    error!("Cafe storage failure: {}", e);
    let mut context = Context::new();
    context.insert("message", UNAVAILABLE_MESSAGE);
    state
        .pages
        .respond(HttpResponse::InternalServerError(), "error.html", &context)
}
