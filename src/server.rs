use crate::{app::App, domain::trim_input, fileserv::file_and_error_handler, session, Domain, Flash};
use axum::{
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    routing::post,
    Form, Router,
};
use leptos::LeptosOptions;
use leptos_axum::{generate_route_list, LeptosRoutes};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
    #[serde(default)]
    pub csrf_token: Option<String>,
}

/// The whole site: leptos pages and server functions, the analyze form
/// handler, then static files and the not-found page.
pub fn app_router(leptos_options: LeptosOptions) -> Router {
    let routes = generate_route_list(App);
    Router::new()
        .leptos_routes(&leptos_options, routes, App)
        .merge(self::routes())
        .fallback(file_and_error_handler)
        .with_state(leptos_options)
}

/// Routes handled outside of leptos. Generic over the state so they merge into
/// the app router.
pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/analyze", post(analyze))
}

/// Receives the analyze form. Clients without the WASM bundle skip the submit
/// guard, so the domain is checked again here.
pub async fn analyze(headers: HeaderMap, Form(request): Form<AnalyzeRequest>) -> Response {
    if let Err(err) = session::csrf_key().check(&headers, request.csrf_token.as_deref()) {
        log::warn!("Rejected analyze form: {}", err);
        return flash_redirect(Flash::FormExpired);
    }
    match redirect_target(&request.url) {
        Ok(target) => Redirect::to(&target).into_response(),
        Err(flash) => flash_redirect(flash),
    }
}

pub fn redirect_target(url: &str) -> Result<String, Flash> {
    let url = trim_input(url);
    match url.parse::<Domain>() {
        Ok(domain) => {
            log::info!("Analyzing {}", domain);
            Ok(crate::domain_href(&domain))
        }
        Err(err) => {
            log::info!("Rejected {:?}: {}", url, err);
            Err(Flash::InvalidDomain)
        }
    }
}

/// Back to the home page, which shows `flash` once.
fn flash_redirect(flash: Flash) -> Response {
    match session::set_cookie(session::FLASH_COOKIE, flash.as_str()) {
        Ok(cookie) => ([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response(),
        Err(err) => {
            log::error!("Failed to build flash cookie: {}", err);
            Redirect::to("/").into_response()
        }
    }
}

/// Token cancelled once Ctrl-C is received.
pub fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                log::info!("Received Ctrl-C, shutting down");
                child.cancel();
            }
            Err(err) => log::error!("Failed to listen for Ctrl-C: {}", err),
        }
    });
    token
}
