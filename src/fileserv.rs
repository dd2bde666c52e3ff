use crate::app::App;
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use leptos::*;
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// Serves files from the site root and falls back to the app's not-found page.
pub async fn file_and_error_handler(
    uri: Uri,
    State(options): State<LeptosOptions>,
    req: Request<Body>,
) -> Response {
    let root = options.site_root.clone();
    match get_static_file(uri, &root).await {
        Ok(res) if res.status() == StatusCode::OK => res.into_response(),
        Ok(_) => {
            let handler = leptos_axum::render_app_to_stream(options, App);
            handler(req).await.into_response()
        }
        Err((status, message)) => {
            log::error!("{}", message);
            (status, message).into_response()
        }
    }
}

async fn get_static_file(uri: Uri, root: &str) -> Result<Response, (StatusCode, String)> {
    let req = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .map_err(|err| (StatusCode::BAD_REQUEST, format!("Bad static file request: {err}")))?;
    // `ServeDir` implements `tower::Service`
    match ServeDir::new(root).oneshot(req).await {
        Ok(res) => Ok(res.into_response()),
        Err(err) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to serve static file: {err}"),
        )),
    }
}
