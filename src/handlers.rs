use crate::errors::{AppError, TrackerError};
use crate::models::{DateRequest, DayRecord, EntryRequest, FieldsRequest, StateResponse, SummaryResponse};
use crate::persistence;
use crate::state::{AppState, Session};
use crate::storage::persist_store;
use crate::tracker::parse_date;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use std::collections::HashMap;
use tracing::warn;

pub const DROPDOWN_FIELD: &str = "entry-dropdown";
pub const DATE_FIELD: &str = "log-date";

type FormFields = HashMap<String, String>;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let mut session = state.session.lock().await;
    let alert = session.alert.take();
    Html(render_index(&session.tracker, alert.as_deref()))
}

pub async fn add_entry(
    State(state): State<AppState>,
    Form(fields): Form<FormFields>,
) -> Result<Redirect, AppError> {
    let mut session = state.session.lock().await;
    sync_fields(&mut session, &fields);
    let section = fields.get(DROPDOWN_FIELD).map(String::as_str).unwrap_or_default();
    let result = session.tracker.add_entry(section);
    finish(&state, &mut session, result).await
}

pub async fn calculate(
    State(state): State<AppState>,
    Form(fields): Form<FormFields>,
) -> Result<Redirect, AppError> {
    let mut session = state.session.lock().await;
    sync_fields(&mut session, &fields);
    let result = session.tracker.calculate();
    finish(&state, &mut session, result).await
}

pub async fn clear(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let mut session = state.session.lock().await;
    session.tracker.clear_all();
    finish(&state, &mut session, Ok(())).await
}

/// Page edits are carried over to the new day but never written for the old one.
pub async fn change_date(
    State(state): State<AppState>,
    Form(fields): Form<FormFields>,
) -> Result<Redirect, AppError> {
    let mut session = state.session.lock().await;
    sync_fields(&mut session, &fields);
    let raw = fields.get(DATE_FIELD).map(String::as_str).unwrap_or_default();
    let result = parse_date(raw).and_then(|date| session.tracker.change_date(date));
    record_alert(&mut session, result);
    Ok(Redirect::to("/"))
}

pub async fn toggle_theme(
    State(state): State<AppState>,
    Form(fields): Form<FormFields>,
) -> Result<Redirect, AppError> {
    let mut session = state.session.lock().await;
    sync_fields(&mut session, &fields);
    session.tracker.toggle_theme();
    Ok(Redirect::to("/"))
}

pub async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    let session = state.session.lock().await;
    Json(session.tracker.snapshot())
}

pub async fn api_add_entry(
    State(state): State<AppState>,
    Json(payload): Json<EntryRequest>,
) -> Result<Json<StateResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.tracker.add_entry(payload.section.trim())?;
    persist_store(&state.data_path, session.tracker.store()).await?;
    Ok(Json(session.tracker.snapshot()))
}

pub async fn api_calculate(
    State(state): State<AppState>,
    Json(payload): Json<FieldsRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.tracker.form_mut().apply_fields(
        payload
            .fields
            .iter()
            .map(|(id, value)| (id.as_str(), value.as_str())),
    );
    let summary = session.tracker.calculate()?;
    persist_store(&state.data_path, session.tracker.store()).await?;
    Ok(Json(summary.to_response()))
}

pub async fn api_clear(State(state): State<AppState>) -> Result<Json<StateResponse>, AppError> {
    let mut session = state.session.lock().await;
    session.tracker.clear_all();
    persist_store(&state.data_path, session.tracker.store()).await?;
    Ok(Json(session.tracker.snapshot()))
}

pub async fn api_change_date(
    State(state): State<AppState>,
    Json(payload): Json<DateRequest>,
) -> Result<Json<StateResponse>, AppError> {
    let mut session = state.session.lock().await;
    let date = parse_date(&payload.date)?;
    session.tracker.change_date(date)?;
    Ok(Json(session.tracker.snapshot()))
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayRecord>, AppError> {
    let date = parse_date(&date)?;
    let session = state.session.lock().await;
    persistence::read_record(date, session.tracker.store())?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no record for {date}")))
}

fn sync_fields(session: &mut Session, fields: &FormFields) {
    session
        .tracker
        .form_mut()
        .apply_fields(fields.iter().map(|(id, value)| (id.as_str(), value.as_str())));
}

fn record_alert<T>(session: &mut Session, result: Result<T, TrackerError>) -> bool {
    match result {
        Ok(_) => true,
        Err(err) => {
            warn!("{err}");
            session.alert = Some(err.to_string());
            false
        }
    }
}

/// Surfaces a failed action as an alert; persists the store after a successful one.
async fn finish<T>(
    state: &AppState,
    session: &mut Session,
    result: Result<T, TrackerError>,
) -> Result<Redirect, AppError> {
    if record_alert(session, result) {
        persist_store(&state.data_path, session.tracker.store()).await?;
    }
    Ok(Redirect::to("/"))
}
