use std::collections::BTreeMap;

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::database::models::{Hotel, Report, ReportListing};
use crate::database::queries::Queries;
use crate::error::EcoHotelError;
use crate::web::AppState;

/// Submitted report form, kept as raw text so every field can be checked
/// and reported on its own.
#[derive(Debug, Default, Deserialize)]
pub struct ReportForm {
    pub hotel_id: Option<String>,
    pub energy_produced: Option<String>,
    pub energy_consumed: Option<String>,
}

/// Field-keyed validation messages, rendered as a 400 response.
#[derive(Debug, Default)]
struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a required whole-number field, noting what is wrong with it.
    fn integer(&mut self, field: &'static str, value: Option<&str>) -> Option<i64> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => {
                self.add(field, "This field is required.");
                None
            }
            Some(raw) => match raw.parse::<i64>() {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    self.add(field, "Enter a whole number.");
                    None
                }
            },
        }
    }

    /// Parse a required non-negative whole-number field.
    fn non_negative(&mut self, field: &'static str, value: Option<&str>) -> Option<i64> {
        let parsed = self.integer(field, value)?;
        if parsed < 0 {
            self.add(field, "Ensure this value is greater than or equal to 0.");
            return None;
        }
        Some(parsed)
    }
}

impl IntoResponse for FormErrors {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "result": "failure", "errors": self.0 })),
        )
            .into_response()
    }
}

pub async fn list_hotels(State(state): State<AppState>) -> Result<Json<Vec<Hotel>>, EcoHotelError> {
    Ok(Json(Queries::list_hotels(state.database.pool()).await?))
}

pub async fn list_reports(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReportListing>>, EcoHotelError> {
    Ok(Json(Queries::list_reports(state.database.pool()).await?))
}

pub async fn get_report(
    State(state): State<AppState>,
    Path(report_id): Path<i64>,
) -> Result<Json<Report>, EcoHotelError> {
    Queries::get_report(state.database.pool(), report_id)
        .await?
        .map(Json)
        .ok_or_else(|| EcoHotelError::NotFound(format!("report {}", report_id)))
}

/// Create a report for a hotel and record it on the ledger.
///
/// Success redirects to the listing. The ledger call is awaited inline;
/// any recording fault surfaces as a plain 500.
pub async fn create_report(
    State(state): State<AppState>,
    form: Result<Form<ReportForm>, FormRejection>,
) -> Result<Response, EcoHotelError> {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            debug!("Rejected report form: {}", rejection);
            let mut errors = FormErrors::default();
            errors.add("__all__", rejection.body_text());
            return Ok(errors.into_response());
        }
    };

    let mut errors = FormErrors::default();
    let hotel_id = errors.integer("hotel_id", form.hotel_id.as_deref());
    let energy_produced = errors.non_negative("energy_produced", form.energy_produced.as_deref());
    let energy_consumed = errors.non_negative("energy_consumed", form.energy_consumed.as_deref());

    let hotel = match hotel_id {
        Some(id) => Queries::get_hotel(state.database.pool(), id).await?,
        None => None,
    };
    if hotel_id.is_some() && hotel.is_none() {
        errors.add("hotel_id", "Select a valid choice.");
    }

    let (hotel, energy_produced, energy_consumed) = match (hotel, energy_produced, energy_consumed) {
        (Some(hotel), Some(produced), Some(consumed)) if errors.is_empty() => {
            (hotel, produced, consumed)
        }
        _ => return Ok(errors.into_response()),
    };

    info!(
        "Recording report for {} (produced {}, consumed {})",
        hotel.name, energy_produced, energy_consumed
    );

    let ledger = state.ledger.connect()?;
    let mut report = Report::new(hotel.id, energy_produced, energy_consumed);
    state.recorder.record(ledger.as_ref(), &mut report).await?;

    Ok(Redirect::to("/reports").into_response())
}
