//! Avatar resolution degrades to the placeholder instead of failing: any
//! fetch problem yields `Avatar::Missing` and the card must still render.

use reqwest::Client;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ghcard::avatar::{self, Avatar};
use ghcard::rank::calculate_rank;
use ghcard::stats::demo_stats;
use ghcard::svg;
use ghcard::theme::Theme;

#[tokio::test]
async fn inlines_an_image_as_a_data_uri() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/avatar.png"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(vec![0x89, b'P', b'N', b'G'], "image/png"),
        )
        .mount(&server)
        .await;

    let url = format!("{}/avatar.png", server.uri());
    let resolved = avatar::resolve(&Client::new(), &url, true).await;
    assert_eq!(
        resolved,
        Avatar::Inline("data:image/png;base64,iVBORw==".to_string())
    );
}

#[tokio::test]
async fn missing_image_degrades_to_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/gone.png", server.uri());
    assert_eq!(avatar::resolve(&Client::new(), &url, true).await, Avatar::Missing);
}

#[tokio::test]
async fn non_image_content_type_degrades_to_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/avatar"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let url = format!("{}/avatar", server.uri());
    assert_eq!(avatar::resolve(&Client::new(), &url, true).await, Avatar::Missing);
}

#[tokio::test]
async fn transport_error_degrades_to_placeholder() {
    // Nothing listens on port 1, so the connection itself fails.
    let resolved = avatar::resolve(&Client::new(), "http://127.0.0.1:1/a.png", true).await;
    assert_eq!(resolved, Avatar::Missing);
}

#[tokio::test]
async fn card_renders_for_every_degraded_avatar() {
    let stats = demo_stats("demo");
    let rank = calculate_rank(&stats);

    let svg = svg::render_card(&stats, &rank, &Avatar::Missing, Theme::Dark);
    assert!(svg.starts_with("<?xml"));
    assert!(!svg.contains("<image"));
    assert!(svg.contains("avatarClip"));
}
