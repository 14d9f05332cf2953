mod api;
mod forms;
mod guard;
mod render;
mod upload;


use axum::body::Body;
use axum::extract::{DefaultBodyLimit, FromRef, Request, State};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use brewfest_app::infrastructure::auth::{ephemeral_session_key, session_key};
use brewfest_app::infrastructure::image_host::MAX_LOGO_BYTES;
use brewfest_app::{AppConfig, AppContext};
use brewfest_ui::pages::{GetBreweriesFn, GetPodiumFn};
use brewfest_ui::App;
use leptos::prelude::*;
use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};
use std::net::SocketAddr;
use tower_http::compression::CompressionLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

/// Headroom above the logo cap for the other multipart fields.
const BODY_LIMIT: usize = MAX_LOGO_BYTES + 1024 * 1024;

#[derive(Clone)]
struct AppState {
    leptos_options: LeptosOptions,
    ctx: AppContext,
}

impl FromRef<AppState> for LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.clone()
    }
}

impl FromRef<AppState> for AppContext {
    fn from_ref(state: &AppState) -> Self {
        state.ctx.clone()
    }
}

/// Session layer carrying the admin marker and the anonymous voter token.
fn session_layer(config: &AppConfig) -> SessionManagerLayer<MemoryStore, tower_sessions::service::SignedCookie> {
    let key = match &config.session_secret {
        Some(secret) => session_key(secret),
        None => {
            tracing::warn!("SESSION_SECRET not set, sessions will not survive a restart");
            ephemeral_session_key()
        }
    };

    SessionManagerLayer::new(MemoryStore::default())
        .with_name("brewfest.sid")
        .with_secure(config.secure_cookies)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(
            brewfest_app::infrastructure::auth::ADMIN_SESSION_HOURS,
        )))
        .with_signed(key)
}

/// JSON API and HTML form routes, without the Leptos pages.
fn app_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    AppContext: FromRef<S>,
{
    Router::new()
        .merge(api::routes())
        .merge(forms::routes())
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}

async fn server_fn_handler(State(ctx): State<AppContext>, request: Request<Body>) -> impl IntoResponse {
    handle_server_fns_with_context(move || provide_context(ctx.clone()), request).await
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let conf = match get_configuration(Some("Cargo.toml")) {
        Ok(conf) => conf,
        Err(e) => {
            tracing::error!("Failed to load Leptos config: {}", e);
            std::process::exit(1);
        }
    };
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    let sessions = session_layer(&config);
    let app_context = match AppContext::connect(config).await {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    let routes = generate_route_list(App);

    server_fn::axum::register_explicit::<GetBreweriesFn>();
    server_fn::axum::register_explicit::<GetPodiumFn>();
    tracing::info!("Registered server functions: GetBreweriesFn, GetPodiumFn");

    let state = AppState {
        leptos_options: leptos_options.clone(),
        ctx: app_context.clone(),
    };

    let app = Router::new()
        .merge(app_routes())
        .route("/api/fn/{*fn_name}", post(server_fn_handler))
        .leptos_routes_with_context(
            &state,
            routes,
            {
                let ctx = app_context.clone();
                move || provide_context(ctx.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler::<AppState, _>(shell))
        .layer(sessions)
        .layer(CompressionLayer::new())
        .with_state(state);

    tracing::info!("Listening on http://{}", addr);
    tracing::info!(
        "Rate limits: {}, {}",
        app_context.vote_limiter.limit(),
        app_context.login_limiter.limit()
    );

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        tracing::error!("Server error: {}", e);
    }
}

fn shell(options: LeptosOptions) -> impl IntoView {
    use leptos_meta::*;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🍺</text></svg>"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}
