use brewfest_app::domain::{Brewery, Leaderboard, MatchPolicy, Rating, Vote};
use std::fmt::Write;

/// Dashboard tabs, selected with `?tab=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Breweries,
    Leaderboard,
    Settings,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Overview, Tab::Breweries, Tab::Leaderboard, Tab::Settings];

    pub fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or_default() {
            "breweries" => Self::Breweries,
            "leaderboard" => Self::Leaderboard,
            "settings" => Self::Settings,
            _ => Self::Overview,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Breweries => "breweries",
            Self::Leaderboard => "leaderboard",
            Self::Settings => "settings",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Breweries => "Breweries",
            Self::Leaderboard => "Leaderboard",
            Self::Settings => "Settings",
        }
    }
}

/// Flash message carried through a redirect's query string.
pub enum Flash {
    Notice(String),
    Error(String),
}

/// Everything the dashboard shows, loaded by the handler.
pub struct Dashboard<'a> {
    pub tab: Tab,
    pub flash: Option<Flash>,
    pub admin: &'a str,
    pub breweries: &'a [Brewery],
    pub leaderboard: &'a Leaderboard,
    pub recent_votes: &'a [Vote],
    pub uploads_enabled: bool,
    pub match_policy: MatchPolicy,
    pub legacy_votes: usize,
}

const RECENT_VOTES: usize = 10;

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🍺</text></svg>">
    <style>{CSS}</style>
</head>
<body>
    <main class="container">
{body}
    </main>
</body>
</html>"#,
        title = escape_html(title),
        body = body,
        CSS = CSS
    )
}

pub fn render_vote_result(brewery_name: &str, rating: Rating) -> String {
    let body = format!(
        r#"<div class="card card--success">
    <p class="card__icon">✅</p>
    <h2 class="card__title">Vote Recorded!</h2>
    <p>You gave <strong>{name}</strong> a {rating}/10 <span class="emoji">{emoji}</span></p>
    <div class="card__actions">
        <a href="/vote" class="button button--primary">Vote for another booth</a>
        <a href="/" class="button">Back to the festival</a>
    </div>
</div>"#,
        name = escape_html(brewery_name),
        rating = rating,
        emoji = rating.emoji()
    );
    page("Vote recorded", &body)
}

pub fn render_error_page(message: &str, back_href: &str) -> String {
    let body = format!(
        r#"<div class="error">
    <p class="error__title">Something went wrong</p>
    <p class="error__message">{message}</p>
    <a href="{href}" class="button button--danger">Try again</a>
</div>"#,
        message = escape_html(message),
        href = escape_html(back_href)
    );
    page("Error - Brewfest", &body)
}

pub fn render_login_page(error: Option<&str>) -> String {
    let error = error
        .map(|msg| format!(r#"<div class="flash flash--error">{}</div>"#, escape_html(msg)))
        .unwrap_or_default();

    let body = format!(
        r#"<div class="card login">
    <h1 class="card__title">Admin Login</h1>
    {error}
    <form action="/admin/login" method="post" class="form">
        <label>Username <input type="text" name="username" autocomplete="username" required></label>
        <label>Password <input type="password" name="password" autocomplete="current-password" required></label>
        <button type="submit" class="button button--primary">Log in</button>
    </form>
    <a href="/" class="login__back">← Back to the festival</a>
</div>"#
    );
    page("Admin Login - Brewfest", &body)
}

pub fn render_dashboard(dashboard: &Dashboard<'_>) -> String {
    let mut body = String::new();

    let _ = write!(
        body,
        r#"<header class="dash-header">
    <h1>Festival Dashboard</h1>
    <div class="dash-header__user">Signed in as <strong>{admin}</strong>
        <form action="/admin/logout" method="post" class="inline"><button type="submit" class="button">Log out</button></form>
    </div>
</header>
<nav class="tabs">"#,
        admin = escape_html(dashboard.admin)
    );
    for tab in Tab::ALL {
        let active = if tab == dashboard.tab { " tabs__tab--active" } else { "" };
        let _ = write!(
            body,
            r#"<a href="/admin/dashboard?tab={slug}" class="tabs__tab{active}">{label}</a>"#,
            slug = tab.slug(),
            label = tab.label()
        );
    }
    body.push_str("</nav>\n");

    match &dashboard.flash {
        Some(Flash::Notice(msg)) => {
            let _ = write!(body, r#"<div class="flash flash--notice">{}</div>"#, escape_html(msg));
        }
        Some(Flash::Error(msg)) => {
            let _ = write!(body, r#"<div class="flash flash--error">{}</div>"#, escape_html(msg));
        }
        None => {}
    }

    match dashboard.tab {
        Tab::Overview => overview_tab(&mut body, dashboard),
        Tab::Breweries => breweries_tab(&mut body, dashboard),
        Tab::Leaderboard => leaderboard_tab(&mut body, dashboard.leaderboard),
        Tab::Settings => settings_tab(&mut body, dashboard),
    }

    page("Dashboard - Brewfest", &body)
}

fn overview_tab(out: &mut String, d: &Dashboard<'_>) {
    let board = d.leaderboard;
    let _ = write!(
        out,
        r#"<section class="stats">
    <div class="stats__item"><span class="stats__value">{breweries}</span><span class="stats__label">Breweries</span></div>
    <div class="stats__item"><span class="stats__value">{votes}</span><span class="stats__label">Votes</span></div>
    <div class="stats__item"><span class="stats__value">{avg:.1}</span><span class="stats__label">Average rating</span></div>
</section>
<h2>Podium</h2>"#,
        breweries = d.breweries.len(),
        votes = board.total_votes,
        avg = board.overall_average
    );

    if board.podium().iter().all(|s| s.vote_count == 0) {
        out.push_str(r#"<p class="muted">No votes yet.</p>"#);
    } else {
        out.push_str(r#"<ol class="podium">"#);
        for (stat, medal) in board.podium().iter().zip(["🥇", "🥈", "🥉"]) {
            let _ = write!(
                out,
                r#"<li><span class="podium__medal">{medal}</span> {name} <span class="muted">{avg:.1} / 10 · {count} votes</span></li>"#,
                name = escape_html(&stat.brewery.name),
                avg = stat.average_rating,
                count = stat.vote_count
            );
        }
        out.push_str("</ol>");
    }

    out.push_str("<h2>Recent votes</h2>");
    if d.recent_votes.is_empty() {
        out.push_str(r#"<p class="muted">No votes yet.</p>"#);
        return;
    }
    out.push_str(
        r#"<table class="table"><thead><tr><th>When</th><th>Voter</th><th>Brewery</th><th>Rating</th></tr></thead><tbody>"#,
    );
    for vote in d.recent_votes.iter().take(RECENT_VOTES) {
        let when = vote
            .submitted_at
            .map(|t| t.format("%b %d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = write!(
            out,
            "<tr><td>{when}</td><td>{voter}</td><td>{brewery}</td><td>{rating} {emoji}</td></tr>",
            voter = escape_html(&vote.voter_identity),
            brewery = escape_html(&vote.target_name),
            rating = vote.rating,
            emoji = vote.rating.emoji()
        );
    }
    out.push_str("</tbody></table>");
}

fn breweries_tab(out: &mut String, d: &Dashboard<'_>) {
    let upload_field = if d.uploads_enabled {
        r#"<label>Logo file <input type="file" name="logo" accept="image/*"></label>
        <p class="muted">Upload a file or paste a hosted URL above.</p>"#
    } else {
        r#"<p class="muted">Image hosting is not configured, so logos must be given as URLs.</p>"#
    };

    let _ = write!(
        out,
        r#"<section class="card">
    <h2 class="card__title">Add a brewery</h2>
    <form action="/admin/breweries" method="post" enctype="multipart/form-data" class="form">
        <label>Name <input type="text" name="name" required></label>
        <label>Description <textarea name="description" rows="3" required></textarea></label>
        <label>Location link <input type="url" name="location_url" placeholder="https://maps.google.com/..." required></label>
        <label>Logo URL <input type="url" name="logo_url" placeholder="https://..."></label>
        {upload_field}
        <button type="submit" class="button button--primary">Add brewery</button>
    </form>
</section>
<h2>Breweries ({count})</h2>"#,
        count = d.breweries.len()
    );

    if d.breweries.is_empty() {
        out.push_str(r#"<p class="muted">No breweries yet.</p>"#);
        return;
    }

    for brewery in d.breweries {
        let file_field = if d.uploads_enabled {
            r#"<label>Replace logo <input type="file" name="logo" accept="image/*"></label>"#
        } else {
            ""
        };
        let _ = write!(
            out,
            r#"<article class="brewery-row">
    <img src="{logo}" alt="" class="brewery-row__logo">
    <div class="brewery-row__body">
        <h3>{name}</h3>
        <p class="muted">{description}</p>
        <details>
            <summary>Edit</summary>
            <form action="/admin/breweries/{id}" method="post" enctype="multipart/form-data" class="form">
                <label>Name <input type="text" name="name" value="{name}"></label>
                <label>Description <textarea name="description" rows="3">{description}</textarea></label>
                <label>Location link <input type="url" name="location_url" value="{location}"></label>
                <label>Logo URL <input type="url" name="logo_url" value="{logo}"></label>
                {file_field}
                <button type="submit" class="button button--primary">Save</button>
            </form>
        </details>
    </div>
    <form action="/admin/breweries/{id}/delete" method="post" class="inline" onsubmit="return confirm('Delete this brewery? Its votes stay stored but stop counting.');">
        <button type="submit" class="button button--danger">Delete</button>
    </form>
</article>"#,
            id = brewery.id,
            name = escape_html(&brewery.name),
            description = escape_html(&brewery.description),
            location = escape_html(&brewery.location_url),
            logo = escape_html(&brewery.logo_url),
        );
    }
}

fn leaderboard_tab(out: &mut String, board: &Leaderboard) {
    out.push_str(
        r#"<div class="toolbar">
    <a href="/admin/votes.csv" class="button">Export leaderboard CSV</a>
    <a href="/admin/votes.csv?kind=votes" class="button">Export raw votes CSV</a>
    <form action="/admin/votes/reset" method="post" class="inline" onsubmit="return confirm('Delete every vote? This cannot be undone.');">
        <button type="submit" class="button button--danger">Reset all votes</button>
    </form>
</div>"#,
    );

    if board.entries().is_empty() {
        out.push_str(r#"<p class="muted">No breweries yet.</p>"#);
        return;
    }

    out.push_str(
        r#"<table class="table"><thead><tr><th>#</th><th>Brewery</th><th>Votes</th><th>Average</th></tr></thead><tbody>"#,
    );
    for (i, stat) in board.entries().iter().enumerate() {
        let _ = write!(
            out,
            "<tr><td>{rank}</td><td>{name}</td><td>{count}</td><td>{avg:.1}</td></tr>",
            rank = i + 1,
            name = escape_html(&stat.brewery.name),
            count = stat.vote_count,
            avg = stat.average_rating
        );
    }
    out.push_str("</tbody></table>");

    let unattributed = board.total_votes - board.attributed_votes();
    if unattributed > 0 {
        let _ = write!(
            out,
            r#"<p class="muted">{unattributed} stored votes match no current brewery and are not counted.</p>"#
        );
    }
}

fn settings_tab(out: &mut String, d: &Dashboard<'_>) {
    let _ = write!(
        out,
        r#"<section class="card">
    <h2 class="card__title">Configuration</h2>
    <dl class="settings">
        <dt>Admin user</dt><dd>{admin}</dd>
        <dt>Logo uploads</dt><dd>{uploads}</dd>
        <dt>Vote matching</dt><dd>{policy}</dd>
    </dl>
    <p class="muted">Settings come from the server environment and are read at startup.</p>
</section>
<section class="card">
    <h2 class="card__title">Legacy votes</h2>
    <p>{legacy} votes were stored without a brewery id and {treatment}.</p>
    <form action="/admin/votes/backfill" method="post" class="inline">
        <button type="submit" class="button">Link legacy votes to breweries</button>
    </form>
</section>"#,
        admin = escape_html(d.admin),
        uploads = if d.uploads_enabled { "Cloudinary" } else { "Disabled (URL only)" },
        policy = d.match_policy.as_str(),
        legacy = d.legacy_votes,
        treatment = legacy_treatment(d.match_policy)
    );
}

fn legacy_treatment(policy: MatchPolicy) -> &'static str {
    match policy {
        MatchPolicy::IdOrLegacyName => "are matched by name",
        MatchPolicy::IdOnly => "are not counted until linked",
    }
}

const CSS: &str = r#"
:root {
    --teal: #00B5B5;
    --orange: #F08E1E;
    --navy: #1A3C5A;
    --base: #F8F9FA;
    --surface: #ffffff;
    --overlay: #e6eef2;
    --muted: #7b8a97;
    --danger: #c0392b;
}
* { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: 'Inter', -apple-system, sans-serif; background: var(--base); color: var(--navy); min-height: 100vh; }
.container { max-width: 960px; margin: 0 auto; padding: 1.5rem; }
h2 { margin: 1.5rem 0 0.75rem; }
.muted { color: var(--muted); font-size: 0.9rem; }
.card { background: var(--surface); border: 2px solid var(--overlay); border-radius: 16px; padding: 1.5rem; margin: 1.5rem 0; }
.card--success { text-align: center; border-color: var(--teal); }
.card__icon { font-size: 3rem; }
.card__title { margin: 0 0 1rem; color: var(--navy); }
.card__actions { margin-top: 1.5rem; display: flex; gap: 0.75rem; justify-content: center; flex-wrap: wrap; }
.emoji { font-size: 1.5rem; }
.button { display: inline-block; padding: 0.6rem 1.2rem; border: 2px solid var(--overlay); background: var(--surface); color: var(--navy); border-radius: 10px; font-weight: 600; cursor: pointer; text-decoration: none; font-size: 0.95rem; }
.button--primary { background: var(--teal); border-color: var(--teal); color: #fff; }
.button--danger { background: var(--danger); border-color: var(--danger); color: #fff; }
.form { display: flex; flex-direction: column; gap: 0.75rem; }
.form label { display: flex; flex-direction: column; gap: 0.25rem; font-weight: 600; font-size: 0.9rem; }
.form input, .form textarea { padding: 0.6rem 0.8rem; border: 2px solid var(--overlay); border-radius: 8px; font: inherit; }
.form input:focus, .form textarea:focus { outline: none; border-color: var(--teal); }
.inline { display: inline; }
.login { max-width: 420px; margin: 4rem auto; }
.login__back { display: inline-block; margin-top: 1rem; color: var(--muted); }
.flash { padding: 0.75rem 1rem; border-radius: 8px; margin: 1rem 0; font-weight: 600; }
.flash--notice { background: #e0f7f8; color: #006b6b; }
.flash--error { background: #fdecea; color: var(--danger); }
.error { background: #fdecea; border: 2px solid var(--danger); border-radius: 12px; padding: 1.25rem; margin: 2rem 0; }
.error__title { color: var(--danger); font-weight: 700; margin-bottom: 0.5rem; }
.error__message { margin-bottom: 1rem; }
.dash-header { display: flex; justify-content: space-between; align-items: center; flex-wrap: wrap; gap: 1rem; }
.tabs { display: flex; gap: 0.5rem; margin: 1.5rem 0 0.5rem; border-bottom: 2px solid var(--overlay); }
.tabs__tab { padding: 0.6rem 1rem; color: var(--muted); text-decoration: none; font-weight: 600; border-bottom: 3px solid transparent; }
.tabs__tab--active { color: var(--teal); border-bottom-color: var(--orange); }
.stats { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; margin: 1rem 0; }
.stats__item { background: var(--surface); border-radius: 12px; padding: 1rem; text-align: center; border: 2px solid var(--overlay); }
.stats__value { display: block; font-size: 2rem; font-weight: 800; color: var(--teal); }
.stats__label { color: var(--muted); font-size: 0.85rem; text-transform: uppercase; letter-spacing: 0.05em; }
.podium { list-style: none; display: flex; flex-direction: column; gap: 0.5rem; }
.podium li { background: var(--surface); padding: 0.75rem 1rem; border-radius: 10px; border: 2px solid var(--overlay); }
.table { width: 100%; border-collapse: collapse; background: var(--surface); border-radius: 12px; overflow: hidden; }
.table th, .table td { padding: 0.6rem 0.8rem; text-align: left; border-bottom: 1px solid var(--overlay); }
.table th { background: var(--overlay); font-size: 0.85rem; text-transform: uppercase; }
.toolbar { display: flex; gap: 0.5rem; flex-wrap: wrap; margin: 1rem 0; }
.brewery-row { display: flex; gap: 1rem; align-items: flex-start; background: var(--surface); border: 2px solid var(--overlay); border-radius: 12px; padding: 1rem; margin-bottom: 0.75rem; }
.brewery-row__logo { width: 64px; height: 64px; object-fit: contain; border-radius: 8px; background: var(--base); }
.brewery-row__body { flex: 1; }
.brewery-row details { margin-top: 0.5rem; }
.settings { display: grid; grid-template-columns: max-content 1fr; gap: 0.4rem 1.5rem; margin-bottom: 1rem; }
.settings dt { font-weight: 600; }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn brewery(name: &str) -> Brewery {
        Brewery::new(
            name.to_string(),
            "desc".to_string(),
            "https://maps.example.com".to_string(),
            "https://img.example.com/logo.png".to_string(),
        )
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script> & 'co'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;co&#39;"
        );
    }

    #[test]
    fn test_tab_parse() {
        assert_eq!(Tab::parse(Some("breweries")), Tab::Breweries);
        assert_eq!(Tab::parse(Some("settings")), Tab::Settings);
        assert_eq!(Tab::parse(Some("bogus")), Tab::Overview);
        assert_eq!(Tab::parse(None), Tab::Overview);
    }

    #[test]
    fn test_vote_result_shows_emoji() {
        let html = render_vote_result("Sak <Pub>", Rating::new(10).unwrap());
        assert!(html.contains("Sak &lt;Pub&gt;"));
        assert!(html.contains("10/10"));
        assert!(html.contains("👑"));
    }

    #[test]
    fn test_dashboard_escapes_brewery_names() {
        let breweries = vec![brewery("<b>Bold</b>")];
        let board = Leaderboard::compute(&[], &breweries, MatchPolicy::default());
        let dashboard = Dashboard {
            tab: Tab::Breweries,
            flash: Some(Flash::Notice("Brewery added".to_string())),
            admin: "admin",
            breweries: &breweries,
            leaderboard: &board,
            recent_votes: &[],
            uploads_enabled: false,
            match_policy: MatchPolicy::IdOrLegacyName,
            legacy_votes: 0,
        };

        let html = render_dashboard(&dashboard);
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt;"));
        assert!(!html.contains("<b>Bold</b>"));
        assert!(html.contains("Brewery added"));
        assert!(html.contains("logos must be given as URLs"));
        assert!(html.contains("tabs__tab tabs__tab--active\">Breweries"));
    }

    #[test]
    fn test_leaderboard_tab_lists_every_brewery() {
        let breweries = vec![brewery("A"), brewery("B")];
        let board = Leaderboard::compute(&[], &breweries, MatchPolicy::default());
        let mut out = String::new();

        leaderboard_tab(&mut out, &board);

        assert!(out.contains("<td>1</td><td>A</td><td>0</td><td>0.0</td>"));
        assert!(out.contains("<td>2</td><td>B</td><td>0</td><td>0.0</td>"));
    }

    #[test]
    fn test_settings_describe_legacy_votes_per_policy() {
        let board = Leaderboard::compute(&[], &[], MatchPolicy::default());
        let settings = |match_policy| {
            let mut out = String::new();
            settings_tab(
                &mut out,
                &Dashboard {
                    tab: Tab::Settings,
                    flash: None,
                    admin: "admin",
                    breweries: &[],
                    leaderboard: &board,
                    recent_votes: &[],
                    uploads_enabled: true,
                    match_policy,
                    legacy_votes: 3,
                },
            );
            out
        };

        let by_name = settings(MatchPolicy::IdOrLegacyName);
        assert!(by_name.contains("3 votes were stored without a brewery id and are matched by name."));
        assert!(by_name.contains("<dd>id-or-name</dd>"));

        let id_only = settings(MatchPolicy::IdOnly);
        assert!(id_only.contains("are not counted until linked."));
        assert!(!id_only.contains("matched by name"));
        assert!(id_only.contains("<dd>id-only</dd>"));
    }
}
