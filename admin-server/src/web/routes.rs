//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Form, Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use chrono::{Datelike, Local};
use serde::Deserialize;
use tower_http::services::ServeDir;
use uuid::Uuid;

use crate::domain::WalletStatus;
use crate::editor::{EntryKey, TransitSequence};
use crate::gateway::{ConvertError, GatewayError, PageQuery, loaded_transits, wallet_status};
use crate::payments::{GatewayCommandSource, StatusWatcher};

use super::auth::{AuthContext, login_cookie, logout_cookie};
use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Rows per page on list pages.
const PAGE_SIZE: u32 = 10;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/login", get(login_page).post(login_submit))
        .route("/logout", post(logout))
        .route("/dashboard", get(dashboard_page))
        .route("/trips", get(trips_page).post(create_trip))
        .route("/trips/:trip_id", post(update_trip))
        .route("/trips/:trip_id/delete", post(delete_trip))
        .route("/trips/:trip_id/transits", get(transit_editor_page))
        .route(
            "/trips/:trip_id/schedules",
            get(schedules_page).post(create_schedule),
        )
        .route("/trips/:trip_id/schedules/:schedule_id", post(update_schedule))
        .route(
            "/trips/:trip_id/schedules/:schedule_id/delete",
            post(delete_schedule),
        )
        .route("/transit-points", get(transit_points_page).post(create_point))
        .route("/transit-points/:point_id", post(update_point))
        .route("/transit-points/:point_id/delete", post(delete_point))
        .route("/bookings", get(bookings_page))
        .route("/withdrawals", get(withdrawals_page))
        .route("/withdrawals/:command_id", get(withdrawal_detail_page))
        .route("/withdrawals/:command_id/resolve", post(resolve_withdrawal))
        .route("/api/transit-points/search", get(search_points))
        .route("/api/editor/:session_id/entries", post(add_entry))
        .route(
            "/api/editor/:session_id/entries/:key",
            post(update_entry).delete(remove_entry),
        )
        .route("/api/editor/:session_id/reorder", post(reorder_entries))
        .route("/api/editor/:session_id/save", post(save_sequence))
        .route("/api/withdrawals/:command_id/status", get(withdrawal_status))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found_page)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Everything lives under the dashboard.
async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

/// Render a template into an HTML response.
fn render<T: Template>(template: T) -> Result<Html<String>, AppError> {
    template.render().map(Html).map_err(|e| AppError::Internal {
        message: format!("Template error: {e}"),
    })
}

/// Require a signed-in operator; missing token means a redirect to login.
fn require_auth(headers: &HeaderMap) -> Result<AuthContext, AppError> {
    AuthContext::from_headers(headers).ok_or(AppError::Unauthorized)
}

/// Common query parameters for list pages.
#[derive(Debug, Deserialize)]
struct ListQuery {
    page: Option<u32>,
    q: Option<String>,
    status: Option<String>,
    kind: Option<String>,
}

impl ListQuery {
    fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    fn keyword(&self) -> &str {
        self.q.as_deref().unwrap_or("").trim()
    }
}

// ============================================================================
// Auth
// ============================================================================

async fn login_page(headers: HeaderMap) -> Result<Response, AppError> {
    // Already signed in? Straight to the dashboard.
    if AuthContext::from_headers(&headers).is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }
    Ok(render(LoginTemplate { error: None })?.into_response())
}

async fn login_submit(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let tokens = match state.gateway.login(&form.email, &form.password).await {
        Ok(tokens) => tokens,
        Err(GatewayError::Unauthorized) => {
            return Ok(render(LoginTemplate {
                error: Some("Wrong email or password".to_string()),
            })?
            .into_response());
        }
        Err(e) => return Err(e.into()),
    };

    // The gateway signs anyone in; the dashboard is for admins only.
    let authority = state.gateway.my_authorities(&tokens.access_token).await?;
    if !authority.is_admin() {
        return Ok(render(LoginTemplate {
            error: Some("This account is not an administrator".to_string()),
        })?
        .into_response());
    }

    tracing::info!(email = %form.email, "operator signed in");

    Ok((
        [(header::SET_COOKIE, login_cookie(&tokens.access_token))],
        Redirect::to("/dashboard"),
    )
        .into_response())
}

async fn logout() -> Response {
    (
        [(header::SET_COOKIE, logout_cookie())],
        Redirect::to("/login"),
    )
        .into_response()
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Deserialize)]
struct DashboardQuery {
    year: Option<String>,
}

async fn dashboard_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, AppError> {
    let auth = require_auth(&headers)?;

    let year = query
        .year
        .filter(|y| !y.trim().is_empty())
        .unwrap_or_else(|| Local::now().year().to_string());
    let start = format!("{year}-01-01");
    let end = format!("{year}-12-31");

    let token = &auth.token;
    let (bookings, revenue, trips, money_in, money_out) = futures::try_join!(
        state.gateway.booking_statistics(token, Some(&year)),
        state.gateway.booking_revenue_statistics(token, Some(&year)),
        state.gateway.trip_statistics(token, Some(&year)),
        state
            .gateway
            .transaction_statistics(token, &start, &end, "in"),
        state
            .gateway
            .transaction_statistics(token, &start, &end, "out"),
    )?;

    let revenue_total: f64 = revenue.iter().map(|p| p.value).sum();

    render(DashboardTemplate {
        user_name: auth.display_name().to_string(),
        revenue_total: crate::domain::Vnd::new(revenue_total as i64).to_string(),
        money_in: crate::domain::Vnd::new(money_in.value as i64).to_string(),
        money_out: crate::domain::Vnd::new(money_out.value as i64).to_string(),
        booking_chart: ChartView::from_points("Bookings per month", &bookings, false),
        revenue_chart: ChartView::from_points("Revenue per month", &revenue, true),
        trip_chart: ChartView::from_points("Trips per month", &trips, false),
        year,
    })
}

// ============================================================================
// Trips
// ============================================================================

async fn trips_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let auth = require_auth(&headers)?;

    let mut page_query = PageQuery::page(query.page(), PAGE_SIZE);
    if !query.keyword().is_empty() {
        page_query = page_query.with_keyword(query.keyword());
    }

    let paged = state.gateway.list_trips(&auth.token, &page_query).await?;

    render(TripsTemplate {
        user_name: auth.display_name().to_string(),
        trips: paged.data.iter().map(TripView::from_dto).collect(),
        pager: PagerView::from_page(query.page(), &paged.page),
        keyword: query.keyword().to_string(),
    })
}

async fn create_trip(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<TripForm>,
) -> Result<Redirect, AppError> {
    let auth = require_auth(&headers)?;

    let trip = form.to_trip(&Uuid::new_v4().to_string())?;
    state.gateway.create_trip(&auth.token, &trip).await?;
    tracing::info!(code = %trip.code, "trip created");

    Ok(Redirect::to("/trips"))
}

async fn update_trip(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(trip_id): Path<String>,
    Form(form): Form<TripForm>,
) -> Result<Redirect, AppError> {
    let auth = require_auth(&headers)?;

    let trip = form.to_trip(&trip_id)?;
    state.gateway.update_trip(&auth.token, &trip_id, &trip).await?;

    Ok(Redirect::to("/trips"))
}

async fn delete_trip(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(trip_id): Path<String>,
) -> Result<Redirect, AppError> {
    let auth = require_auth(&headers)?;

    state.gateway.delete_trip(&auth.token, &trip_id).await?;
    tracing::info!(%trip_id, "trip deleted");

    Ok(Redirect::to("/trips"))
}

// ============================================================================
// Transit-sequence editor
// ============================================================================

/// Open the editor: load the trip's transits and start a fresh session.
async fn transit_editor_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(trip_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let auth = require_auth(&headers)?;

    let trip = state.gateway.get_trip(&auth.token, &trip_id).await?;
    let loaded = loaded_transits(&trip)?;
    let sequence = TransitSequence::from_loaded(&trip.id, loaded);

    let session_id = state.sessions.create(sequence).await;
    tracing::debug!(%trip_id, %session_id, sessions = state.sessions.entry_count(), "editor session opened");

    let session = state
        .sessions
        .get(&session_id)
        .await
        .ok_or_else(|| AppError::Internal {
            message: "session vanished immediately after creation".to_string(),
        })?;
    let sequence = session.lock().await;

    render(TransitEditorTemplate {
        user_name: auth.display_name().to_string(),
        trip_id: trip.id.clone(),
        trip_code: trip.code.clone(),
        trip_name: trip.name.clone(),
        session_id: session_id.to_string(),
        entries: sequence.entries().iter().map(EntryView::from_entry).collect(),
    })
}

/// Look up a live editing session by its id.
async fn editor_session(
    state: &AppState,
    session_id: &str,
) -> Result<crate::editor::SharedSequence, AppError> {
    let id = Uuid::parse_str(session_id).map_err(|_| AppError::BadRequest {
        message: format!("Invalid session id: {session_id}"),
    })?;
    state.sessions.get(&id).await.ok_or_else(|| AppError::NotFound {
        message: "Editing session expired; reload the page".to_string(),
    })
}

fn sequence_response(session_id: &str, sequence: &TransitSequence) -> SequenceResponse {
    SequenceResponse {
        session_id: session_id.to_string(),
        trip_id: sequence.trip_id().to_string(),
        dirty: sequence.is_dirty(),
        entries: sequence.entries().iter().map(EntryDto::from_entry).collect(),
    }
}

async fn add_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(session_id): Path<String>,
    Json(req): Json<AddEntryRequest>,
) -> Result<Json<SequenceResponse>, AppError> {
    require_auth(&headers)?;

    let entry = req.to_new_entry()?;
    let session = editor_session(&state, &session_id).await?;
    let mut sequence = session.lock().await;
    sequence.add(entry);

    Ok(Json(sequence_response(&session_id, &sequence)))
}

async fn remove_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((session_id, key)): Path<(String, String)>,
) -> Result<Json<SequenceResponse>, AppError> {
    require_auth(&headers)?;

    let key = EntryKey::decode(&key).ok_or_else(|| AppError::BadRequest {
        message: format!("Invalid entry key: {key}"),
    })?;

    let session = editor_session(&state, &session_id).await?;
    let mut sequence = session.lock().await;
    if !sequence.remove(&key) {
        return Err(AppError::NotFound {
            message: "No such entry in this session".to_string(),
        });
    }

    Ok(Json(sequence_response(&session_id, &sequence)))
}

async fn update_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((session_id, key)): Path<(String, String)>,
    Json(req): Json<UpdateEntryRequest>,
) -> Result<Json<SequenceResponse>, AppError> {
    require_auth(&headers)?;

    let key = EntryKey::decode(&key).ok_or_else(|| AppError::BadRequest {
        message: format!("Invalid entry key: {key}"),
    })?;

    let arrival_time = req
        .arrival_time
        .as_deref()
        .map(crate::domain::ArrivalTime::parse)
        .transpose()
        .map_err(|e| AppError::BadRequest {
            message: format!("arrival_time: {e}"),
        })?;
    let transit_type = req
        .transit_type
        .as_deref()
        .map(crate::domain::TransitType::parse)
        .transpose()
        .map_err(|e| AppError::BadRequest {
            message: format!("transit_type: {e}"),
        })?;

    let session = editor_session(&state, &session_id).await?;
    let mut sequence = session.lock().await;

    let mut found = true;
    if let Some(time) = arrival_time {
        found &= sequence.set_arrival_time(&key, time);
    }
    if let Some(transit_type) = transit_type {
        found &= sequence.set_transit_type(&key, transit_type);
    }
    if !found {
        return Err(AppError::NotFound {
            message: "No such entry in this session".to_string(),
        });
    }

    Ok(Json(sequence_response(&session_id, &sequence)))
}

async fn reorder_entries(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(session_id): Path<String>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<SequenceResponse>, AppError> {
    require_auth(&headers)?;

    let session = editor_session(&state, &session_id).await?;
    let mut sequence = session.lock().await;

    // A missing destination, an out-of-range index, or a drop back onto the
    // entry's own position is a cancelled drag: the sequence is untouched
    // and the current state is the answer.
    sequence.reorder(req.source, req.destination);

    Ok(Json(sequence_response(&session_id, &sequence)))
}

/// Save the session: replace the trip's transits wholesale.
async fn save_sequence(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(session_id): Path<String>,
) -> Result<Json<SequenceResponse>, AppError> {
    let auth = require_auth(&headers)?;

    let session = editor_session(&state, &session_id).await?;

    // Hold the lock across the gateway call so a concurrent edit cannot
    // slip between building the payload and marking the session clean.
    let mut sequence = session.lock().await;
    let payload = sequence.save_payload();
    state
        .gateway
        .replace_trip_transits(&auth.token, sequence.trip_id(), &payload)
        .await?;
    sequence.mark_saved();

    tracing::info!(trip_id = %sequence.trip_id(), entries = payload.len(), "transit sequence saved");

    Ok(Json(sequence_response(&session_id, &sequence)))
}

/// Autocomplete for the editor's add dialog.
async fn search_points(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<PointSearchRequest>,
) -> Result<Json<Vec<PointOption>>, AppError> {
    let auth = require_auth(&headers)?;

    let keyword = req.q.trim();
    if keyword.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let limit = req.limit.unwrap_or(10).min(50);
    let points = state
        .gateway
        .search_transit_points(&auth.token, keyword, limit)
        .await?;

    let options = points
        .into_iter()
        .map(|p| PointOption {
            id: p.id,
            name: p.name,
            address: p.address,
        })
        .collect();

    Ok(Json(options))
}

// ============================================================================
// Trip schedules
// ============================================================================

async fn schedules_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(trip_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let auth = require_auth(&headers)?;

    let (trip, schedules) = futures::try_join!(
        state.gateway.get_trip(&auth.token, &trip_id),
        state.gateway.list_trip_schedules(&auth.token, &trip_id),
    )?;

    render(SchedulesTemplate {
        user_name: auth.display_name().to_string(),
        trip_id: trip.id.clone(),
        trip_code: trip.code.clone(),
        schedules: schedules.iter().map(ScheduleView::from_dto).collect(),
    })
}

async fn create_schedule(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(trip_id): Path<String>,
    Form(form): Form<ScheduleForm>,
) -> Result<Redirect, AppError> {
    let auth = require_auth(&headers)?;

    let schedule = form.to_schedule(&trip_id)?;
    state
        .gateway
        .create_trip_schedule(&auth.token, &trip_id, &schedule)
        .await?;

    Ok(Redirect::to(&format!("/trips/{trip_id}/schedules")))
}

async fn update_schedule(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((trip_id, schedule_id)): Path<(String, String)>,
    Form(form): Form<ScheduleForm>,
) -> Result<Redirect, AppError> {
    let auth = require_auth(&headers)?;

    let schedule = form.to_schedule(&trip_id)?;
    state
        .gateway
        .update_trip_schedule(&auth.token, &trip_id, &schedule_id, &schedule)
        .await?;

    Ok(Redirect::to(&format!("/trips/{trip_id}/schedules")))
}

async fn delete_schedule(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((trip_id, schedule_id)): Path<(String, String)>,
) -> Result<Redirect, AppError> {
    let auth = require_auth(&headers)?;

    state
        .gateway
        .delete_trip_schedule(&auth.token, &trip_id, &schedule_id)
        .await?;

    Ok(Redirect::to(&format!("/trips/{trip_id}/schedules")))
}

// ============================================================================
// Transit points
// ============================================================================

async fn transit_points_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let auth = require_auth(&headers)?;

    let mut page_query = PageQuery::page(query.page(), PAGE_SIZE);
    if !query.keyword().is_empty() {
        page_query = page_query.with_keyword(query.keyword());
    }

    let kind_filter = query.kind.as_deref().unwrap_or("").to_string();
    let kinds: Vec<&str> = if kind_filter.is_empty() {
        Vec::new()
    } else {
        vec![kind_filter.as_str()]
    };

    let paged = state
        .gateway
        .list_transit_points(&auth.token, &page_query, &kinds)
        .await?;

    render(TransitPointsTemplate {
        user_name: auth.display_name().to_string(),
        points: paged.data.iter().map(PointView::from_dto).collect(),
        pager: PagerView::from_page(query.page(), &paged.page),
        keyword: query.keyword().to_string(),
        kind_filter,
    })
}

async fn create_point(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<PointForm>,
) -> Result<Redirect, AppError> {
    let auth = require_auth(&headers)?;

    let point = form.to_point()?;
    state.gateway.create_transit_point(&auth.token, &point).await?;

    Ok(Redirect::to("/transit-points"))
}

async fn update_point(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(point_id): Path<String>,
    Form(form): Form<PointForm>,
) -> Result<Redirect, AppError> {
    let auth = require_auth(&headers)?;

    let point = form.to_point()?;
    state
        .gateway
        .update_transit_point(&auth.token, &point_id, &point)
        .await?;

    Ok(Redirect::to("/transit-points"))
}

async fn delete_point(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(point_id): Path<String>,
) -> Result<Redirect, AppError> {
    let auth = require_auth(&headers)?;

    state.gateway.delete_transit_point(&auth.token, &point_id).await?;

    Ok(Redirect::to("/transit-points"))
}

// ============================================================================
// Bookings
// ============================================================================

async fn bookings_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let auth = require_auth(&headers)?;

    let page_query = PageQuery::page(query.page(), PAGE_SIZE);
    let status_filter = query.status.as_deref().unwrap_or("").to_string();
    let statuses: Vec<&str> = if status_filter.is_empty() {
        Vec::new()
    } else {
        vec![status_filter.as_str()]
    };

    let paged = state
        .gateway
        .list_bookings(&auth.token, &page_query, &statuses)
        .await?;

    render(BookingsTemplate {
        user_name: auth.display_name().to_string(),
        bookings: paged.data.iter().map(BookingView::from_dto).collect(),
        pager: PagerView::from_page(query.page(), &paged.page),
        status_filter,
    })
}

// ============================================================================
// Withdrawals
// ============================================================================

async fn withdrawals_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let auth = require_auth(&headers)?;

    let page_query = PageQuery::page(query.page(), PAGE_SIZE);
    let status_filter = query.status.as_deref().unwrap_or("").to_string();
    let statuses: Vec<&str> = if status_filter.is_empty() {
        Vec::new()
    } else {
        vec![status_filter.as_str()]
    };

    // The sidebar always shows the first page of recent transactions.
    let tx_query = PageQuery::page(1, PAGE_SIZE);
    let (withdrawals, transactions) = futures::try_join!(
        state
            .gateway
            .list_wallet_commands(&auth.token, &page_query, &statuses),
        state.gateway.list_transactions(&auth.token, &tx_query, &[]),
    )?;

    render(WithdrawalsTemplate {
        user_name: auth.display_name().to_string(),
        withdrawals: withdrawals
            .data
            .iter()
            .map(WithdrawalView::from_dto)
            .collect(),
        transactions: transactions
            .data
            .iter()
            .map(TransactionView::from_dto)
            .collect(),
        pager: PagerView::from_page(query.page(), &withdrawals.page),
        status_filter,
    })
}

async fn withdrawal_detail_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(command_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let auth = require_auth(&headers)?;

    let dto = state.gateway.get_wallet_command(&auth.token, &command_id).await?;

    render(WithdrawalDetailTemplate {
        user_name: auth.display_name().to_string(),
        withdrawal: WithdrawalView::from_dto(&dto),
    })
}

#[derive(Debug, Deserialize)]
struct ResolveForm {
    decision: String,
}

/// Approve or reject a pending withdrawal.
///
/// Approval moves the command to `WAIT_TO_PAY` and starts a watcher that
/// follows it until the payment settles.
async fn resolve_withdrawal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(command_id): Path<String>,
    Form(form): Form<ResolveForm>,
) -> Result<Redirect, AppError> {
    let auth = require_auth(&headers)?;

    let status = match form.decision.as_str() {
        "approve" => WalletStatus::WaitToPay,
        "reject" => WalletStatus::Rejected,
        other => {
            return Err(AppError::BadRequest {
                message: format!("Unknown decision: {other}"),
            });
        }
    };

    state
        .gateway
        .resolve_wallet_command(&auth.token, &command_id, status.as_str())
        .await?;
    tracing::info!(%command_id, status = %status, "withdrawal resolved");

    if status == WalletStatus::WaitToPay {
        let source = GatewayCommandSource::new(state.gateway.clone(), &auth.token);
        let watcher = StatusWatcher::spawn(source, &command_id, &state.watch_config);
        // Re-approving replaces the old watcher; its task aborts on drop.
        state.track_watcher(command_id.clone(), watcher).await;
    }

    Ok(Redirect::to(&format!("/withdrawals/{command_id}")))
}

/// Live status for the detail page's polling script.
async fn withdrawal_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(command_id): Path<String>,
) -> Result<Json<WithdrawStatusResponse>, AppError> {
    let auth = require_auth(&headers)?;

    {
        let mut watchers = state.watchers.lock().await;
        if let Some(watcher) = watchers.get(&command_id) {
            let status = watcher.latest();
            let finished = watcher.is_finished();
            if finished {
                watchers.remove(&command_id);
            }
            return Ok(Json(WithdrawStatusResponse {
                status: status.map(|s| s.as_str().to_string()),
                label: status.map(|s| s.label().to_string()),
                terminal: status.is_some_and(|s| s.is_terminal()),
                watching: !finished,
            }));
        }
    }

    // No watcher running (server restarted, or nothing was approved here):
    // answer with a one-off fetch.
    let dto = state.gateway.get_wallet_command(&auth.token, &command_id).await?;
    let status = wallet_status(&dto)?;

    Ok(Json(WithdrawStatusResponse {
        status: Some(status.as_str().to_string()),
        label: Some(status.label().to_string()),
        terminal: status.is_terminal(),
        watching: false,
    }))
}

// ============================================================================
// Fallback
// ============================================================================

async fn not_found_page(headers: HeaderMap) -> Result<(StatusCode, Html<String>), AppError> {
    let user_name = AuthContext::from_headers(&headers)
        .map(|a| a.display_name().to_string())
        .unwrap_or_else(|| "Operator".to_string());

    let html = render(ErrorTemplate {
        user_name,
        title: "Page not found".to_string(),
        message: "The page you asked for does not exist.".to_string(),
    })?;

    Ok((StatusCode::NOT_FOUND, html))
}

// ============================================================================
// Errors
// ============================================================================

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unauthorized,
    Internal { message: String },
}

impl From<GatewayError> for AppError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Unauthorized => AppError::Unauthorized,
            GatewayError::NotFound => AppError::NotFound {
                message: "Not found".to_string(),
            },
            other => AppError::Internal {
                message: other.to_string(),
            },
        }
    }
}

impl From<ConvertError> for AppError {
    fn from(e: ConvertError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<FieldError> for AppError {
    fn from(e: FieldError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // An expired or rejected token sends the operator back to login
        // with the cookie cleared.
        if let AppError::Unauthorized = self {
            return (
                [(header::SET_COOKIE, logout_cookie())],
                Redirect::to("/login"),
            )
                .into_response();
        }

        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Unauthorized => unreachable!("handled above"),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        match status {
            StatusCode::INTERNAL_SERVER_ERROR => tracing::error!(%status, %message, "request failed"),
            _ => tracing::warn!(%status, %message, "request rejected"),
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
