use crate::errors::AppError;
use crate::models::{DayQuery, DayView, EntryView, LogEntry, MonthQuery, MonthView};
use crate::state::AppState;
use crate::storage::persist_logs;
use crate::store;
use crate::ui::render_index;
use crate::view::{counts_for_month, day_view, entry_view, parse_date};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Json,
};
use chrono::{Datelike, Local, NaiveDate, Utc};
use tracing::{debug, info};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let today = today();
    let logs = state.logs.lock().await;
    let mut month = counts_for_month(&logs, today.year(), today.month(), &Local)?;
    month.mark_today(today);
    Ok(Html(render_index(today, &month)))
}

pub async fn list_logs(State(state): State<AppState>) -> Json<Vec<EntryView>> {
    let logs = state.logs.lock().await;
    Json(logs.iter().map(|entry| entry_view(entry, &Local)).collect())
}

pub async fn add_log(State(state): State<AppState>) -> Result<(StatusCode, Json<EntryView>), AppError> {
    let entry = record_now(&state).await?;
    Ok((StatusCode::CREATED, Json(entry_view(&entry, &Local))))
}

pub async fn add_log_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    record_now(&state).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete_log(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode, AppError> {
    let mut logs = state.logs.lock().await;
    let before = logs.len();
    let updated = store::remove(logs.clone(), id);
    if updated.len() == before {
        debug!(id, "no entry to delete");
    }

    persist_logs(&state.data_path, &updated).await?;
    *logs = updated;
    info!(id, remaining = logs.len(), "deleted entry");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_month(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthView>, AppError> {
    let today = today();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    let logs = state.logs.lock().await;
    let mut view = counts_for_month(&logs, year, month, &Local)?;
    view.mark_today(today);
    Ok(Json(view))
}

pub async fn get_day(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> Result<Json<DayView>, AppError> {
    let today = today();
    let date = match query.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => today,
    };

    let logs = state.logs.lock().await;
    Ok(Json(day_view(&logs, date, today, &Local)))
}

/// Appends an entry stamped now and persists before committing it in memory,
/// so a failed write leaves the collection unchanged.
async fn record_now(state: &AppState) -> Result<LogEntry, AppError> {
    let mut logs = state.logs.lock().await;
    let (updated, entry) = store::append(logs.clone(), Utc::now());

    persist_logs(&state.data_path, &updated).await?;
    *logs = updated;
    info!(id = entry.id, total = logs.len(), "logged entry");

    Ok(entry)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
