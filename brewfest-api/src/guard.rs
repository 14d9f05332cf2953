use crate::render::render_error_page;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Redirect, Response};
use brewfest_app::infrastructure::auth::AdminSession;
use tower_sessions::Session;

/// JSON admin API: 401 without an admin session.
pub async fn require_admin_json(session: Session, request: Request, next: Next) -> Response {
    match AdminSession::require(&session).await {
        Ok(()) => next.run(request).await,
        Err(err) => err.into_response(),
    }
}

/// HTML dashboard: bounce to the login page without an admin session.
pub async fn require_admin_page(session: Session, request: Request, next: Next) -> Response {
    match AdminSession::is_admin(&session).await {
        Ok(true) => next.run(request).await,
        Ok(false) => Redirect::to("/admin/login").into_response(),
        Err(err) => {
            tracing::error!("Admin check failed: {}", err);
            (
                err.status_code(),
                Html(render_error_page(&err.user_message(), "/admin/login")),
            )
                .into_response()
        }
    }
}
