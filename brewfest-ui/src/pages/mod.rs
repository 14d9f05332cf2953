mod awards;
mod breweries;
mod home;
mod schedule;
mod sponsors;
mod vote;

pub use awards::{get_podium, AwardsPage, GetPodiumFn};
pub use breweries::{get_breweries, BreweriesPage, GetBreweriesFn};
pub use home::HomePage;
pub use schedule::SchedulePage;
pub use sponsors::SponsorsPage;
pub use vote::VotePage;

/// Context the server functions run against; missing when called outside the server.
#[cfg(feature = "ssr")]
fn app_context(
    fn_name: &str,
) -> Result<brewfest_app::AppContext, server_fn::ServerFnError> {
    leptos::prelude::use_context::<brewfest_app::AppContext>().ok_or_else(|| {
        tracing::warn!("{}: no AppContext provided", fn_name);
        server_fn::ServerFnError::new("The festival data is unavailable right now.")
    })
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_fns_fail_without_context() {
        assert!(get_breweries().await.is_err());
        assert!(get_podium().await.is_err());
    }
}
