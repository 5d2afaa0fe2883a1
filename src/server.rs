use axum::{
    Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::avatar::{self, Avatar};
use crate::error::CardError;
use crate::github::GithubClient;
use crate::rank::calculate_rank;
use crate::stats::demo_stats;
use crate::svg;
use crate::theme::Theme;

const CACHE_TTL_SECONDS: u64 = 60 * 60;

#[derive(Clone)]
struct AppState {
    http: Client,
}

#[derive(Deserialize, Default)]
struct CardQuery {
    theme: Option<String>,
    demo: Option<String>,
}

impl CardQuery {
    fn theme(&self) -> Theme {
        self.theme
            .as_deref()
            .map(Theme::parse)
            .unwrap_or(Theme::Dark)
    }
}

pub fn router() -> Router {
    let state = AppState {
        http: Client::new(),
    };
    Router::new()
        .route("/", get(info_card))
        .route("/:username", get(stat_card))
        .with_state(state)
}

async fn info_card(Query(query): Query<CardQuery>) -> Response {
    svg_response(svg::render_info(query.theme()), StatusCode::OK, false)
}

async fn stat_card(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<CardQuery>,
) -> Response {
    let theme = query.theme();

    if is_demo_request(&username, &query) {
        let stats = demo_stats(&username);
        let rank = calculate_rank(&stats);
        // The demo card must render with no network access, so the avatar
        // URL passes through instead of being inlined.
        let avatar = Avatar::Remote(stats.avatar_url.clone());
        let card = svg::render_card(&stats, &rank, &avatar, theme);
        return svg_response(card, StatusCode::OK, false);
    }

    match live_card(&state, &username, theme).await {
        Ok(card) => svg_response(card, StatusCode::OK, true),
        Err(err) => {
            warn!(%username, error = %err, "card request failed");
            svg_response(svg::render_error(&err.to_string(), theme), err.status(), false)
        }
    }
}

async fn live_card(state: &AppState, username: &str, theme: Theme) -> Result<String, CardError> {
    let token = std::env::var("GITHUB_TOKEN").map_err(|_| CardError::MissingToken)?;
    let client = GithubClient::new(token);

    let stats = client
        .fetch_user_stats(username)
        .await?
        .ok_or(CardError::UserNotFound)?;

    let avatar = avatar::resolve(&state.http, &stats.avatar_url, true).await;
    let rank = calculate_rank(&stats);
    Ok(svg::render_card(&stats, &rank, &avatar, theme))
}

fn is_demo_request(username: &str, query: &CardQuery) -> bool {
    username.eq_ignore_ascii_case("demo")
        || username.eq_ignore_ascii_case("test")
        || query.demo.as_deref() == Some("1")
}

fn svg_response(body: String, status: StatusCode, cacheable: bool) -> Response {
    let mut response = (
        status,
        [(header::CONTENT_TYPE, "image/svg+xml; charset=utf-8")],
        body,
    )
        .into_response();
    if cacheable {
        if let Ok(value) =
            header::HeaderValue::from_str(&format!("public, max-age={CACHE_TTL_SECONDS}"))
        {
            response.headers_mut().insert(header::CACHE_CONTROL, value);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_handles_and_flag_are_recognized() {
        let plain = CardQuery::default();
        assert!(is_demo_request("demo", &plain));
        assert!(is_demo_request("TEST", &plain));
        assert!(!is_demo_request("octocat", &plain));

        let flagged = CardQuery {
            demo: Some("1".to_string()),
            ..CardQuery::default()
        };
        assert!(is_demo_request("octocat", &flagged));

        let off = CardQuery {
            demo: Some("0".to_string()),
            ..CardQuery::default()
        };
        assert!(!is_demo_request("octocat", &off));
    }

    #[test]
    fn theme_flag_selects_palette_with_dark_fallback() {
        let query = CardQuery {
            theme: Some("matrix".to_string()),
            ..CardQuery::default()
        };
        assert_eq!(query.theme(), Theme::Matrix);
        assert_eq!(CardQuery::default().theme(), Theme::Dark);

        let unknown = CardQuery {
            theme: Some("neon".to_string()),
            ..CardQuery::default()
        };
        assert_eq!(unknown.theme(), Theme::Dark);
    }
}
