//! HTTP front end: the upload page, its assets, and the generate endpoint.

use std::num::NonZeroU16;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::campaign::{self, CampaignResponse};
use crate::error::CampaignError;
use crate::genai::GenerativeService;

mod upload;
mod views;

use upload::read_campaign_form;
use views::index_handler;

#[derive(Clone)]
pub(crate) struct AppState {
    service: Arc<dyn GenerativeService>,
}

impl AppState {
    fn new(service: Arc<dyn GenerativeService>) -> Self {
        Self { service }
    }
}

async fn generate_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CampaignResponse>, CampaignError> {
    let request = read_campaign_form(multipart).await?;
    let response = campaign::run(state.service.as_ref(), &request).await?;
    info!(
        "Campaign ready: {:?} with {} poster(s)",
        response.copy.title,
        response.posters.len()
    );
    Ok(Json(response))
}

fn create_router(upload_limit: usize) -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::get(index_handler))
        .route("/static/styles.css", axum::routing::get(styles_handler))
        .route("/static/app.js", axum::routing::get(script_handler))
        .route("/api/generate", axum::routing::post(generate_handler))
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(TraceLayer::new_for_http())
}

async fn styles_handler() -> impl IntoResponse {
    const STYLES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/styles.css"));
    ([(CONTENT_TYPE, "text/css")], STYLES)
}

async fn script_handler() -> impl IntoResponse {
    const SCRIPT: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/app.js"));
    ([(CONTENT_TYPE, "text/javascript")], SCRIPT)
}

/// Binds the listener and serves until the server stops.
pub async fn setup_server(
    listen_addr: &str,
    port: NonZeroU16,
    service: Arc<dyn GenerativeService>,
    upload_limit: usize,
) -> Result<(), anyhow::Error> {
    let app = create_router(upload_limit).with_state(AppState::new(service));

    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server error: {}", err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use base64::Engine;
    use base64::engine::general_purpose;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::constants::POSTER_STYLES;
    use crate::genai::testing::{ScriptedService, png_bytes};

    const BOUNDARY: &str = "campaignerboundary";

    fn app(service: ScriptedService) -> Router {
        create_router(4 * 1024 * 1024).with_state(AppState::new(Arc::new(service)))
    }

    fn multipart_body(files: &[(&str, Vec<u8>)], count: Option<&str>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, bytes) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{name}.png\"\r\nContent-Type: image/png\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        if let Some(count) = count {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"variationCount\"\r\n\r\n{count}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn generate_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/generate")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn index_page_renders_form() {
        let request = Request::builder()
            .method("GET")
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = app(ScriptedService::default()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = String::from_utf8_lossy(&bytes);
        assert!(body.contains("name=\"brandLogo\""));
        assert!(body.contains("name=\"productImage\""));
        assert!(body.contains("name=\"variationCount\""));
        assert!(body.contains(POSTER_STYLES[1]));
    }

    #[tokio::test]
    async fn static_script_is_served() {
        let request = Request::builder()
            .method("GET")
            .uri("/static/app.js")
            .body(Body::empty())
            .unwrap();
        let response = app(ScriptedService::default()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "text/javascript"
        );
    }

    #[tokio::test]
    async fn missing_product_is_bad_request() {
        let service = Arc::new(ScriptedService::new("{}"));
        let app = create_router(1024 * 1024).with_state(AppState::new(service.clone()));
        let body = multipart_body(&[("brandLogo", png_bytes(2, 2, [1, 2, 3]))], Some("2"));

        let response = app.oneshot(generate_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = read_json(response).await;
        assert_eq!(
            json["error"],
            "Both brand logo and product image are required"
        );
        assert_eq!(service.text_calls(), 0);
        assert_eq!(service.image_calls(), 0);
    }

    #[tokio::test]
    async fn corrupt_upload_is_bad_request() {
        let body = multipart_body(
            &[
                ("brandLogo", b"not an image at all".to_vec()),
                ("productImage", png_bytes(2, 2, [1, 2, 3])),
            ],
            None,
        );
        let response = app(ScriptedService::new("{}"))
            .oneshot(generate_request(body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn successful_generation_returns_copy_posters_and_zip() {
        let service = ScriptedService::new(r#"{"title":"Shine Bright All Day Long","caption":"Glow."}"#)
            .then_image("image/png", b"poster-one")
            .then_image("image/jpeg", b"poster-two");
        let body = multipart_body(
            &[
                ("brandLogo", png_bytes(2, 2, [9, 9, 9])),
                ("productImage", png_bytes(4, 3, [200, 10, 10])),
            ],
            Some("2"),
        );

        let response = app(service).oneshot(generate_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["copy"]["title"], "Shine Bright All Day Long");
        assert_eq!(json["copy"]["caption"], "Glow.");
        let posters = json["posters"].as_array().expect("posters");
        assert_eq!(posters.len(), 2);
        assert_eq!(posters[0]["style"], POSTER_STYLES[0]);
        assert_eq!(
            posters[1]["image_data_url"],
            format!(
                "data:image/jpeg;base64,{}",
                general_purpose::STANDARD.encode(b"poster-two")
            )
        );
        let zip_b64 = json["zip_base64"].as_str().expect("zip");
        assert!(!general_purpose::STANDARD.decode(zip_b64).expect("base64").is_empty());
    }

    #[tokio::test]
    async fn no_posters_is_bad_gateway() {
        let service = ScriptedService::new("{}")
            .then_error("quota exhausted")
            .then_error("quota exhausted");
        let body = multipart_body(
            &[
                ("brandLogo", png_bytes(2, 2, [9, 9, 9])),
                ("productImage", png_bytes(2, 2, [1, 1, 1])),
            ],
            Some("2"),
        );

        let response = app(service).oneshot(generate_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json = read_json(response).await;
        assert_eq!(json["error"], "Gemini could not render any posters. Try again.");
    }
}
