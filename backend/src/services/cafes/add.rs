//! # Cafe Submission
//!
//! `GET /add-cafe` renders the form; `POST /add-cafe` runs the submission
//! through three gates before anything is stored:
//!
//! 1.  **CSRF**: the hidden token must match the browser's nonce cookie.
//! 2.  **Validation**: `common::validation::validate_submission` checks every
//!     field and reports all problems at once.
//! 3.  **Insert**: the repository writes the row. A taken name comes back as
//!     `RepositoryError::DuplicateName` and is shown next to the name input.
//!
//! Any rejection re-renders the form with `200 OK`, keeping what the user typed.
//! Success answers `303 See Other` to `/`, so reloading the listing does not
//! post the form again.

use super::{server_error, with_repository};
use crate::csrf::CSRF_FIELD;
use crate::repository::RepositoryError;
use crate::state::AppState;
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use common::model::cafe::{NAME_MAX_LEN, TEXT_MAX_LEN, URL_MAX_LEN};
use common::requests::CafeSubmission;
use common::validation::{rules, validate_submission, ValidationErrors};
use log::{info, warn};
use serde::Serialize;
use tera::Context;

/// One input of the form, in display order.
struct FormField {
    /// `Cafe` field name; errors are keyed by it.
    name: &'static str,
    /// Name of the HTML input.
    input: &'static str,
    label: &'static str,
    checkbox: bool,
    max_length: usize,
}

impl FormField {
    const fn text(
        name: &'static str,
        input: &'static str,
        label: &'static str,
        max_length: usize,
    ) -> Self {
        Self {
            name,
            input,
            label,
            checkbox: false,
            max_length,
        }
    }

    const fn checkbox(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            input: name,
            label,
            checkbox: true,
            max_length: 0,
        }
    }
}

const FORM_FIELDS: [FormField; 10] = [
    FormField::text("name", "cafe", "Cafe name", NAME_MAX_LEN),
    FormField::text("location", "location", "City Name", TEXT_MAX_LEN),
    FormField::text("map_url", "map_url", "Cafe Location on Google Maps (URL)", URL_MAX_LEN),
    FormField::text("img_url", "img_url", "Image URL of the Cafe", URL_MAX_LEN),
    FormField::checkbox("has_sockets", "Does the Cafe have Sockets?"),
    FormField::checkbox("has_toilet", "Does the Cafe have Toilets?"),
    FormField::checkbox("has_wifi", "Does the Cafe have Wi-Fi?"),
    FormField::checkbox("can_take_calls", "Can You take Calls here?"),
    FormField::text("seats", "seats", "How many seats are available", TEXT_MAX_LEN),
    FormField::text(
        "coffee_price",
        "coffee_price",
        "What is the Price of the Coffee here?",
        TEXT_MAX_LEN,
    ),
];

/// Template view of a `FormField` filled with the submitted value and its errors.
#[derive(Serialize)]
struct FieldView<'a> {
    name: &'static str,
    input: &'static str,
    label: &'static str,
    checkbox: bool,
    max_length: usize,
    value: &'a str,
    checked: bool,
    errors: &'a [String],
}

/// `GET /add-cafe`
pub(super) async fn form(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    render_form(&req, &state, &CafeSubmission::default(), &ValidationErrors::new())
}

/// `POST /add-cafe`
pub(super) async fn submit(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Form<Vec<(String, String)>>,
) -> HttpResponse {
    let submission = CafeSubmission::from_pairs(payload.into_inner());
    let csrf = state.csrf.verify(&req, submission.csrf_token.as_deref());

    let candidate = match (validate_submission(&submission), csrf) {
        (Ok(candidate), Ok(())) => candidate,
        (validated, csrf) => {
            let mut errors = validated.err().unwrap_or_default();
            if let Err(message) = csrf {
                errors.add(CSRF_FIELD, message);
            }
            warn!("Rejected cafe submission: {}", errors);
            return render_form(&req, &state, &submission, &errors);
        }
    };

    match with_repository(&state, move |repository| repository.insert(candidate)).await {
        Ok(cafe) => {
            info!("Added cafe {} ({})", cafe.id, cafe.name);
            HttpResponse::SeeOther()
                .insert_header((header::LOCATION, "/"))
                .finish()
        }
        Err(RepositoryError::DuplicateName(name)) => {
            warn!("Rejected cafe submission: duplicate name {}", name);
            let mut errors = ValidationErrors::new();
            errors.add("name", format!("A cafe named \"{}\" already exists.", name));
            render_form(&req, &state, &submission, &errors)
        }
        Err(e) => server_error(&state, &e),
    }
}

fn render_form(
    req: &HttpRequest,
    state: &AppState,
    submission: &CafeSubmission,
    errors: &ValidationErrors,
) -> HttpResponse {
    let ticket = state.csrf.issue(req);

    let fields: Vec<FieldView> = FORM_FIELDS
        .iter()
        .map(|field| {
            let value = submitted_value(submission, field.name).unwrap_or_default();
            FieldView {
                name: field.name,
                input: field.input,
                label: field.label,
                checkbox: field.checkbox,
                max_length: field.max_length,
                value,
                checked: field.checkbox && rules::boolean(Some(value)).unwrap_or(false),
                errors: errors.get(field.name).unwrap_or_default(),
            }
        })
        .collect();

    let mut context = Context::new();
    context.insert("fields", &fields);
    context.insert("form_errors", errors.get(CSRF_FIELD).unwrap_or_default());
    context.insert("csrf_token", &ticket.token);

    let mut builder = HttpResponse::Ok();
    if let Some(cookie) = ticket.cookie {
        builder.cookie(cookie);
    }
    state.pages.respond(builder, "add-cafe.html", &context)
}

fn submitted_value<'a>(submission: &'a CafeSubmission, field: &str) -> Option<&'a str> {
    let value = match field {
        "name" => &submission.name,
        "location" => &submission.location,
        "map_url" => &submission.map_url,
        "img_url" => &submission.img_url,
        "has_sockets" => &submission.has_sockets,
        "has_toilet" => &submission.has_toilet,
        "has_wifi" => &submission.has_wifi,
        "can_take_calls" => &submission.can_take_calls,
        "seats" => &submission.seats,
        "coffee_price" => &submission.coffee_price,
        _ => return None,
    };
    value.as_deref()
}
