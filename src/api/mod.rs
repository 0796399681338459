use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Settings;
use crate::db::{
    create_pool, get_all_locked_leaderboards, get_current_week, get_games_for_week, get_pigeons, get_schedule_signal,
    get_week_picks, init_database,
};
use crate::error::Result;
use crate::models::{
    ApiResponse, CurrentWeek, Game, LeaderboardEntry, Pigeon, ScheduleSignal, WeekBoard, WeekPick, YtdRow,
};
use crate::services::{aggregate_ytd, build_leaderboard, build_week_board, PayoutTable};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub payouts: PayoutTable,
}

type ApiResult<T> = Result<Json<ApiResponse<T>>>;

pub async fn serve(settings: &Settings, port: u16) -> anyhow::Result<()> {
    let pool = create_pool(&settings.database_url).await?;
    init_database(&pool).await?;

    let state = AppState {
        pool,
        payouts: settings.payouts.clone(),
    };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!("Pigeon Pool API server listening on port {}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/pigeons", get(pigeons_handler))
        .route("/schedule/current_week", get(current_week_handler))
        .route("/schedule/signal", get(schedule_signal_handler))
        .route("/schedule/{week}/games", get(week_games_handler))
        .route("/results/weeks/{week}/picks", get(week_picks_handler))
        .route("/results/weeks/{week}/leaderboard", get(week_leaderboard_handler))
        .route("/results/weeks/{week}/board", get(week_board_handler))
        .route("/results/leaderboard", get(all_leaderboards_handler))
        .route("/results/ytd", get(ytd_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

// Health check endpoint
async fn health_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("Pigeon Pool API is running"))
}

// GET /pigeons
async fn pigeons_handler(State(state): State<AppState>) -> ApiResult<Vec<Pigeon>> {
    let pigeons = get_pigeons(&state.pool).await?;
    Ok(Json(ApiResponse::success(pigeons)))
}

// GET /schedule/current_week - latest locked week and its game status
async fn current_week_handler(State(state): State<AppState>) -> ApiResult<CurrentWeek> {
    let current = get_current_week(&state.pool).await?;
    Ok(Json(ApiResponse::success(current)))
}

// GET /schedule/signal - live week and next picks week
async fn schedule_signal_handler(State(state): State<AppState>) -> ApiResult<ScheduleSignal> {
    let signal = get_schedule_signal(&state.pool).await?;
    Ok(Json(ApiResponse::success(signal)))
}

// GET /schedule/{week}/games
async fn week_games_handler(State(state): State<AppState>, Path(week): Path<u32>) -> ApiResult<Vec<Game>> {
    let games = get_games_for_week(&state.pool, week).await?;
    Ok(Json(ApiResponse::success(games)))
}

// GET /results/weeks/{week}/picks - raw picks for a locked week
async fn week_picks_handler(State(state): State<AppState>, Path(week): Path<u32>) -> ApiResult<Vec<WeekPick>> {
    let picks = get_week_picks(&state.pool, week).await?;
    Ok(Json(ApiResponse::success(picks)))
}

// GET /results/weeks/{week}/leaderboard
async fn week_leaderboard_handler(
    State(state): State<AppState>,
    Path(week): Path<u32>,
) -> ApiResult<Vec<LeaderboardEntry>> {
    let picks = get_week_picks(&state.pool, week).await?;
    Ok(Json(ApiResponse::success(build_leaderboard(&picks))))
}

// GET /results/weeks/{week}/board - shaped rows, games, consensus and week state
async fn week_board_handler(State(state): State<AppState>, Path(week): Path<u32>) -> ApiResult<WeekBoard> {
    let picks = get_week_picks(&state.pool, week).await?;
    let leaderboard = build_leaderboard(&picks);
    let signal = get_schedule_signal(&state.pool).await?;

    let board = build_week_board(week, &picks, &leaderboard, &signal);
    Ok(Json(ApiResponse::success(board)))
}

// GET /results/leaderboard - all locked weeks
async fn all_leaderboards_handler(State(state): State<AppState>) -> ApiResult<Vec<LeaderboardEntry>> {
    let entries = get_all_locked_leaderboards(&state.pool).await?;
    Ok(Json(ApiResponse::success(entries)))
}

// GET /results/ytd - season standings, live week excluded
async fn ytd_handler(State(state): State<AppState>) -> ApiResult<Vec<YtdRow>> {
    let entries = get_all_locked_leaderboards(&state.pool).await?;
    let signal = get_schedule_signal(&state.pool).await?;

    let rows = aggregate_ytd(&entries, signal.live_week, &state.payouts);
    Ok(Json(ApiResponse::success(rows)))
}
