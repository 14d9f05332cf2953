use crate::api::{csv_response, Credentials, ExportQuery};
use crate::guard::require_admin_page;
use crate::render::{
    render_dashboard, render_error_page, render_login_page, render_vote_result, Dashboard, Flash,
    Tab,
};
use crate::upload::BreweryForm;
use axum::extract::{ConnectInfo, FromRef, Multipart, Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{middleware, Form, Router};
use brewfest_app::domain::{Vote, VoteSubmission};
use brewfest_app::infrastructure::auth::{AdminSession, VoterSession};
use brewfest_app::AppContext;
use brewfest_errors::AppError;
use serde::Deserialize;
use std::net::SocketAddr;
use tower_sessions::Session;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VoteForm {
    brewery_id: String,
    rating: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DashboardQuery {
    tab: Option<String>,
    notice: Option<String>,
    error: Option<String>,
}

/// Public vote form plus the server-rendered admin dashboard.
pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    AppContext: FromRef<S>,
{
    let dashboard = Router::new()
        .route("/admin/dashboard", get(dashboard))
        .route("/admin/breweries", post(create_brewery))
        .route("/admin/breweries/{id}", post(update_brewery))
        .route("/admin/breweries/{id}/delete", post(delete_brewery))
        .route("/admin/votes/reset", post(reset_votes))
        .route("/admin/votes/backfill", post(backfill_votes))
        .route("/admin/votes.csv", get(export_csv))
        .route_layer(middleware::from_fn(require_admin_page));

    Router::new()
        .route("/vote", post(vote_form))
        .route("/admin", get(|| async { Redirect::to("/admin/dashboard") }))
        .route("/admin/login", get(login_page).post(login_submit))
        .route("/admin/logout", post(logout))
        .merge(dashboard)
}

async fn vote_form(
    State(ctx): State<AppContext>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    session: Session,
    Form(form): Form<VoteForm>,
) -> Response {
    match record_vote(&ctx, addr, &session, form).await {
        Ok(vote) => Html(render_vote_result(&vote.target_name, vote.rating)).into_response(),
        Err(err) => error_page(err, "/vote"),
    }
}

async fn record_vote(
    ctx: &AppContext,
    addr: SocketAddr,
    session: &Session,
    form: VoteForm,
) -> Result<Vote, AppError> {
    ctx.vote_limiter.check_rate_limit(addr.ip())?;

    let target_id = form
        .brewery_id
        .trim()
        .parse::<Uuid>()
        .map_err(|_| AppError::Validation("Please choose a brewery".to_string()))?;
    let rating = form
        .rating
        .trim()
        .parse::<i32>()
        .map_err(|_| AppError::Validation("Please pick a rating from 1 to 10".to_string()))?;
    let voter_identity = VoterSession::identity(session).await?;

    ctx.submit_vote
        .execute(VoteSubmission {
            voter_identity,
            target_id,
            target_name: None,
            rating,
        })
        .await
}

async fn login_page(session: Session) -> Response {
    match AdminSession::is_admin(&session).await {
        Ok(true) => Redirect::to("/admin/dashboard").into_response(),
        _ => Html(render_login_page(None)).into_response(),
    }
}

async fn login_submit(
    State(ctx): State<AppContext>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    session: Session,
    Form(credentials): Form<Credentials>,
) -> Response {
    match attempt_login(&ctx, addr, &session, &credentials).await {
        Ok(()) => Redirect::to("/admin/dashboard").into_response(),
        Err(err) => (
            err.status_code(),
            Html(render_login_page(Some(&err.user_message()))),
        )
            .into_response(),
    }
}

async fn attempt_login(
    ctx: &AppContext,
    addr: SocketAddr,
    session: &Session,
    credentials: &Credentials,
) -> Result<(), AppError> {
    ctx.login_limiter.check_rate_limit(addr.ip())?;
    AdminSession::login(
        session,
        &ctx.admin_credentials,
        &credentials.username,
        &credentials.password,
    )
    .await
}

async fn logout(session: Session) -> Response {
    if let Err(err) = AdminSession::logout(&session).await {
        tracing::error!("Logout failed: {}", err);
    }
    Redirect::to("/admin/login").into_response()
}

async fn dashboard(
    State(ctx): State<AppContext>,
    session: Session,
    Query(query): Query<DashboardQuery>,
) -> Response {
    match load_dashboard(&ctx, &session, query).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => error_page(err, "/admin/dashboard"),
    }
}

async fn load_dashboard(
    ctx: &AppContext,
    session: &Session,
    query: DashboardQuery,
) -> Result<String, AppError> {
    let admin = AdminSession::current(session)
        .await?
        .map(|marker| marker.username)
        .unwrap_or_default();
    let breweries = ctx.manage_breweries.list().await?;
    let leaderboard = ctx.tally_votes.leaderboard().await?;
    let recent_votes = ctx.tally_votes.list_votes().await?;
    let legacy_votes = recent_votes.iter().filter(|v| v.target_id.is_none()).count();

    let flash = match (query.error, query.notice) {
        (Some(msg), _) => Some(Flash::Error(msg)),
        (None, Some(msg)) => Some(Flash::Notice(msg)),
        (None, None) => None,
    };

    Ok(render_dashboard(&Dashboard {
        tab: Tab::parse(query.tab.as_deref()),
        flash,
        admin: &admin,
        breweries: &breweries,
        leaderboard: &leaderboard,
        recent_votes: &recent_votes,
        uploads_enabled: ctx.manage_breweries.uploads_enabled(),
        match_policy: ctx.tally_votes.policy(),
        legacy_votes,
    }))
}

async fn create_brewery(State(ctx): State<AppContext>, multipart: Multipart) -> Redirect {
    let outcome = async {
        let input = BreweryForm::from_multipart(multipart).await?.into_new()?;
        let brewery = ctx.manage_breweries.create(input).await?;
        Ok::<_, AppError>(format!("{} added", brewery.name))
    }
    .await;
    back_to(Tab::Breweries, outcome)
}

async fn update_brewery(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Redirect {
    let outcome = async {
        let (patch, logo) = BreweryForm::from_multipart(multipart).await?.into_patch();
        let brewery = ctx.manage_breweries.update(id, patch, logo).await?;
        Ok::<_, AppError>(format!("{} updated", brewery.name))
    }
    .await;
    back_to(Tab::Breweries, outcome)
}

async fn delete_brewery(State(ctx): State<AppContext>, Path(id): Path<Uuid>) -> Redirect {
    let outcome = ctx
        .manage_breweries
        .delete(id)
        .await
        .map(|()| "Brewery deleted".to_string());
    back_to(Tab::Breweries, outcome)
}

async fn reset_votes(State(ctx): State<AppContext>) -> Redirect {
    let outcome = ctx
        .tally_votes
        .reset()
        .await
        .map(|n| format!("{} votes cleared", n));
    back_to(Tab::Leaderboard, outcome)
}

async fn backfill_votes(State(ctx): State<AppContext>) -> Redirect {
    let outcome = ctx
        .tally_votes
        .backfill_legacy_targets()
        .await
        .map(|n| format!("{} legacy votes linked", n));
    back_to(Tab::Settings, outcome)
}

async fn export_csv(State(ctx): State<AppContext>, Query(query): Query<ExportQuery>) -> Response {
    match csv_response(&ctx, &query).await {
        Ok(response) => response,
        Err(err) => error_page(err, "/admin/dashboard?tab=leaderboard"),
    }
}

/// Redirects to a dashboard tab with the outcome as a flash message.
fn back_to(tab: Tab, outcome: Result<String, AppError>) -> Redirect {
    let (key, message) = match outcome {
        Ok(notice) => ("notice", notice),
        Err(err) => {
            if !err.is_expected() {
                tracing::error!("Dashboard action failed: {}", err);
            }
            ("error", err.user_message())
        }
    };

    Redirect::to(&format!(
        "/admin/dashboard?tab={}&{}={}",
        tab.slug(),
        key,
        urlencoding::encode(&message)
    ))
}

fn error_page(err: AppError, back_href: &str) -> Response {
    if !err.is_expected() {
        tracing::error!("{}", err);
    }
    (
        err.status_code(),
        Html(render_error_page(&err.user_message(), back_href)),
    )
        .into_response()
}
