use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use serde::Deserialize;
use tracing::{error, info};

use super::render::{render_page, render_print, PageView};
use super::AppState;
use crate::dtr::{DtrSheet, MonthlyLog};
use crate::error::{DtrResult, Error};
use crate::store::{fetch_employee_names, fetch_monthly_log, filter_names};
use crate::utils::time::{current_month, parse_month};

/// Query parameters of the viewer page
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    /// Selected employee
    pub name: Option<String>,
    /// Name search text
    pub q: Option<String>,
    /// Month to show, YYYY-MM
    pub month: Option<String>,
}

/// Query parameters selecting a month
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

/// Query parameters of the name listing
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::Store(_) | Error::Http(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!("Request failed ({}): {}", status, self);
        (status, self.to_string()).into_response()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Requested month, or the current month in the configured zone
fn resolve_month(state: &AppState, month: Option<&str>) -> DtrResult<(i32, u32)> {
    match non_empty(month) {
        Some(month) => parse_month(month),
        None => Ok(current_month(&state.timezone)),
    }
}

/// Fetch the employee's log and lay it out; no employee gives a blank sheet
async fn load_sheet(
    state: &AppState,
    employee: Option<&str>,
    year: i32,
    month: u32,
) -> DtrResult<DtrSheet> {
    let Some(employee) = employee else {
        return Ok(DtrSheet::build("", year, month, &MonthlyLog::new()));
    };

    let log = fetch_monthly_log(state.store.as_ref(), &state.logs_path, employee, year, month)
        .await?;
    let sheet = DtrSheet::build(employee, year, month, &log);

    info!(
        "Loaded DTR for {} ({}): {} days logged, total {}",
        employee,
        sheet.month_path,
        sheet.days_logged(),
        sheet.total
    );
    Ok(sheet)
}

/// Handler for the viewer page
pub async fn index_handler(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Html<String>, Error> {
    let (year, month) = resolve_month(&state, query.month.as_deref())?;
    let search = query.q.as_deref().unwrap_or("");
    let selected = non_empty(query.name.as_deref());

    let names = fetch_employee_names(state.store.as_ref(), &state.names_path).await?;
    let names = filter_names(&names, search);
    let sheet = load_sheet(&state, selected, year, month).await?;

    Ok(Html(render_page(&PageView {
        names: &names,
        selected,
        search,
        sheet: &sheet,
        print: &state.print,
    })))
}

/// Handler for the print page
pub async fn print_handler(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Html<String>, Error> {
    let (year, month) = resolve_month(&state, query.month.as_deref())?;
    let sheet = load_sheet(&state, non_empty(query.name.as_deref()), year, month).await?;

    Ok(Html(render_print(&sheet, &state.print)))
}

/// Handler listing the employee names, optionally filtered
pub async fn employees_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<String>>, Error> {
    let names = fetch_employee_names(state.store.as_ref(), &state.names_path).await?;
    Ok(Json(filter_names(&names, query.q.as_deref().unwrap_or(""))))
}

/// Handler returning one employee's timesheet as JSON
pub async fn sheet_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<DtrSheet>, Error> {
    let (year, month) = resolve_month(&state, query.month.as_deref())?;
    let sheet = load_sheet(&state, Some(name.as_str()), year, month).await?;
    Ok(Json(sheet))
}

// Handler for API health check
pub async fn health_handler() -> &'static str {
    "OK"
}
