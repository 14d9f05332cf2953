use crate::guard::require_admin_json;
use crate::upload::BreweryForm;
use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, FromRef, FromRequest, Multipart, Path, Query, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use brewfest_app::domain::{Brewery, Leaderboard, Vote, VoteSubmission};
use brewfest_app::infrastructure::auth::AdminSession;
use brewfest_app::AppContext;
use brewfest_errors::AppError;
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use tower_sessions::Session;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExportQuery {
    /// `votes` for raw votes, anything else for the leaderboard.
    pub kind: Option<String>,
}

pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    AppContext: FromRef<S>,
{
    let admin = Router::new()
        .route("/api/admin/breweries", get(list_breweries).post(create_brewery))
        .route(
            "/api/admin/breweries/{id}",
            get(get_brewery).patch(update_brewery).delete(delete_brewery),
        )
        .route("/api/admin/votes", get(list_votes).delete(reset_votes))
        .route("/api/admin/votes/export", get(export_votes))
        .route("/api/admin/votes/backfill", post(backfill_votes))
        .route_layer(middleware::from_fn(require_admin_json));

    Router::new()
        .route("/api/breweries", get(list_breweries))
        .route("/api/breweries/{id}", get(get_brewery))
        .route("/api/votes", post(submit_vote))
        .route("/api/leaderboard", get(leaderboard))
        .route("/api/admin/login", post(admin_login))
        .route("/api/admin/logout", post(admin_logout))
        .route("/api/admin/check", get(admin_check))
        .merge(admin)
}

async fn list_breweries(State(ctx): State<AppContext>) -> Result<Json<Vec<Brewery>>, AppError> {
    Ok(Json(ctx.manage_breweries.list().await?))
}

async fn get_brewery(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Brewery>, AppError> {
    Ok(Json(ctx.manage_breweries.get(id).await?))
}

async fn submit_vote(
    State(ctx): State<AppContext>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    payload: Result<Json<VoteSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<Vote>), AppError> {
    let Json(submission) = payload.map_err(bad_json)?;
    ctx.vote_limiter.check_rate_limit(addr.ip())?;
    let vote = ctx.submit_vote.execute(submission).await?;
    Ok((StatusCode::CREATED, Json(vote)))
}

async fn leaderboard(State(ctx): State<AppContext>) -> Result<Json<Leaderboard>, AppError> {
    Ok(Json(ctx.tally_votes.leaderboard().await?))
}

async fn admin_login(
    State(ctx): State<AppContext>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    session: Session,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(credentials) = payload.map_err(bad_json)?;
    ctx.login_limiter.check_rate_limit(addr.ip())?;
    AdminSession::login(
        &session,
        &ctx.admin_credentials,
        &credentials.username,
        &credentials.password,
    )
    .await?;
    Ok(Json(json!({ "ok": true })))
}

async fn admin_logout(session: Session) -> Result<Json<Value>, AppError> {
    AdminSession::logout(&session).await?;
    Ok(Json(json!({ "ok": true })))
}

async fn admin_check(session: Session) -> Result<Json<Value>, AppError> {
    AdminSession::require(&session).await?;
    Ok(Json(json!({ "ok": true })))
}

async fn create_brewery(
    State(ctx): State<AppContext>,
    request: Request,
) -> Result<(StatusCode, Json<Brewery>), AppError> {
    let form = read_brewery_body(request).await?;
    let brewery = ctx.manage_breweries.create(form.into_new()?).await?;
    Ok((StatusCode::CREATED, Json(brewery)))
}

async fn update_brewery(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    request: Request,
) -> Result<Json<Brewery>, AppError> {
    let (patch, logo) = read_brewery_body(request).await?.into_patch();
    Ok(Json(ctx.manage_breweries.update(id, patch, logo).await?))
}

async fn delete_brewery(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ctx.manage_breweries.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_votes(State(ctx): State<AppContext>) -> Result<Json<Vec<Vote>>, AppError> {
    Ok(Json(ctx.tally_votes.list_votes().await?))
}

async fn reset_votes(State(ctx): State<AppContext>) -> Result<Json<Value>, AppError> {
    let deleted = ctx.tally_votes.reset().await?;
    Ok(Json(json!({ "deleted": deleted })))
}

async fn export_votes(
    State(ctx): State<AppContext>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    csv_response(&ctx, &query).await
}

async fn backfill_votes(State(ctx): State<AppContext>) -> Result<Json<Value>, AppError> {
    let updated = ctx.tally_votes.backfill_legacy_targets().await?;
    Ok(Json(json!({ "updated": updated })))
}

/// Accepts either a multipart form (with an optional logo file) or a JSON body.
async fn read_brewery_body(request: Request) -> Result<BreweryForm, AppError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        BreweryForm::from_multipart(multipart).await
    } else {
        let Json(form) = Json::<BreweryForm>::from_request(request, &())
            .await
            .map_err(bad_json)?;
        Ok(form)
    }
}

/// Malformed JSON is a validation failure with the usual `{"message"}` body.
fn bad_json(rejection: JsonRejection) -> AppError {
    AppError::Validation(rejection.body_text())
}

pub async fn csv_response(ctx: &AppContext, query: &ExportQuery) -> Result<Response, AppError> {
    let date = chrono::Utc::now().format("%Y%m%d");
    let (body, filename) = match query.kind.as_deref() {
        Some("votes") => (
            ctx.tally_votes.export_votes_csv().await?,
            format!("brewfest-votes-{}.csv", date),
        ),
        _ => (
            ctx.tally_votes.export_leaderboard_csv().await?,
            format!("brewfest-leaderboard-{}.csv", date),
        ),
    };

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response())
}
