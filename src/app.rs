use crate::{
    controls::BrowserAlert,
    error_template::{AppError, ErrorTemplate},
    icon_toggle::{toggle_icon, Chevron, TOGGLE_MARKER_CLASS},
    submit_guard::SubmitGuard,
    Domain, DomainReport, Flash,
};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
const BOOTSTRAP_ICONS_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap-icons@1.11.3/font/bootstrap-icons.min.css";
const BOOTSTRAP_JS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js";

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    view! {
        <Stylesheet href=BOOTSTRAP_CSS/>
        <Stylesheet href=BOOTSTRAP_ICONS_CSS/>
        <Stylesheet id="leptos" href="/pkg/spoofy.css"/>
        <Script src=BOOTSTRAP_JS/>

        <Title text="Spoofy | Domain Spoofing Test"/>

        <Router fallback=|| {
            let mut outside_errors = Errors::default();
            outside_errors.insert_with_default_key(AppError::NotFound);
            view! { <ErrorTemplate outside_errors/> }.into_view()
        }>
            <main>
                <Routes>
                    <Route path="" view=HomePage ssr=SsrMode::Async/>
                </Routes>
            </main>
        </Router>
    }
}

/// Busy indicator shown while the analyze form is being submitted.
#[component]
pub fn Loading(handle: NodeRef<html::Span>) -> impl IntoView {
    view! {
        <span
            id="spinner"
            class="spinner-border spinner-border-sm"
            style="display: none"
            role="status"
            aria-hidden="true"
            node_ref=handle
        ></span>
    }
}

/// Chevron button that flips between pointing down and up on every click.
#[component]
pub fn ToggleIcon(#[prop(into)] target: String) -> impl IntoView {
    let icon = create_node_ref::<html::I>();
    let target_clone = target.clone();
    let on_click = move |_: ev::MouseEvent| {
        let icon = icon.get_untracked();
        let icon = icon
            .as_deref()
            .map(|icon| AsRef::<web_sys::Element>::as_ref(icon));
        if let Some(state) = toggle_icon(icon) {
            log::debug!("{} chevron now {:?}", target_clone, state);
        }
    };
    view! {
        <button
            type="button"
            class=format!("btn btn-sm btn-link {TOGGLE_MARKER_CLASS}")
            data-bs-toggle="collapse"
            data-bs-target=format!("#{target}")
            aria-controls=target.clone()
            aria-expanded="false"
            on:click=on_click
        >
            <i class=format!("bi {}", Chevron::default().class()) node_ref=icon></i>
        </button>
    }
}

/// Signs the browser's CSRF nonce, issuing a fresh nonce cookie when the
/// request has none.
#[server]
async fn issue_csrf_token() -> Result<String, ServerFnError> {
    use crate::session;
    use http::{header, request::Parts};

    let nonce = use_context::<Parts>()
        .and_then(|parts| session::csrf_nonce(&parts.headers).map(str::to_string));
    let nonce = match nonce {
        Some(nonce) => nonce,
        None => {
            let nonce = session::new_nonce();
            let cookie = session::set_cookie(session::CSRF_COOKIE, &nonce)?;
            match use_context::<leptos_axum::ResponseOptions>() {
                Some(response) => response.append_header(header::SET_COOKIE, cookie),
                None => log::warn!("No response to set the CSRF cookie on"),
            }
            nonce
        }
    };
    Ok(session::csrf_key().token(&nonce))
}

/// Returns the pending flash message and clears its cookie.
#[server]
async fn take_flash() -> Result<Option<Flash>, ServerFnError> {
    use crate::session;
    use http::{header, request::Parts};

    let Some(flash) = use_context::<Parts>().and_then(|parts| session::flash(&parts.headers)) else {
        return Ok(None);
    };
    if let Some(response) = use_context::<leptos_axum::ResponseOptions>() {
        response.append_header(header::SET_COOKIE, session::clear_cookie(session::FLASH_COOKIE)?);
    }
    Ok(Some(flash))
}

#[component]
fn AnalyzeForm() -> impl IntoView {
    let csrf_token = create_blocking_resource(|| (), |_| issue_csrf_token());
    let url_input = create_node_ref::<html::Input>();
    let submit_button = create_node_ref::<html::Button>();
    let spinner = create_node_ref::<html::Span>();

    let on_submit = move |ev: ev::SubmitEvent| {
        let (Some(input), Some(button), Some(spinner)) = (
            url_input.get_untracked(),
            submit_button.get_untracked(),
            spinner.get_untracked(),
        ) else {
            log::warn!("Analyze form is not mounted");
            return;
        };
        let spinner: &web_sys::HtmlElement = &spinner;
        let event: &web_sys::Event = &ev;
        SubmitGuard::new(&*input, &*button, spinner, &BrowserAlert).on_submit(event);
    };

    view! {
        <form id="analyzeForm" method="post" action="/analyze" class="row g-2" on:submit=on_submit>
            <Transition fallback=|| ()>
                {move || {
                    csrf_token
                        .get()
                        .map(|token| match token {
                            Ok(token) => {
                                view! { <input type="hidden" name="csrf_token" value=token/> }
                                    .into_view()
                            }
                            Err(err) => {
                                log::warn!("No CSRF token for the analyze form: {}", err);
                                ().into_view()
                            }
                        })
                }}

            </Transition>
            <div class="col-sm-8">
                <label for="url" class="visually-hidden">
                    "Domain"
                </label>
                <input
                    type="text"
                    id="url"
                    name="url"
                    class="form-control"
                    placeholder="example.com"
                    autocomplete="off"
                    node_ref=url_input
                />
            </div>
            <div class="col-sm-4">
                <button type="submit" id="submitButton" class="btn btn-primary" node_ref=submit_button>
                    <Loading handle=spinner/>
                    " Analyze"
                </button>
            </div>
        </form>
    }
}

#[component]
fn FlashMessage(flash: Flash) -> impl IntoView {
    view! {
        <div class="alert alert-danger" role="alert">
            {flash.message()}
        </div>
    }
}

#[component]
fn ReportCard(#[prop(into)] name: String, title: &'static str, children: Children) -> impl IntoView {
    let details = format!("{name}-details");
    view! {
        <div class="card mt-3">
            <div class="card-header d-flex justify-content-between align-items-center">
                <span>{title}</span>
                <ToggleIcon target=details.clone()/>
            </div>
            <div class="collapse" id=details>
                <div class="card-body">{children()}</div>
            </div>
        </div>
    }
}

#[component]
fn DomainReportView(report: DomainReport) -> impl IntoView {
    let DomainReport {
        domain,
        labels,
        top_level,
        root,
        suffix,
        parents,
    } = report;
    let unknown = || "Unknown".to_string();
    view! {
        <h2 class="h4 mt-4">{format!("Results for {domain}")}</h2>
        <ReportCard name="overview" title="Overview">
            <table class="table table-sm mb-0">
                <tr>
                    <td>"Domain"</td>
                    <td>{domain.to_string()}</td>
                </tr>
                <tr>
                    <td>"Top-level label"</td>
                    <td>{top_level}</td>
                </tr>
                <tr>
                    <td>"Registrable domain"</td>
                    <td>{root.unwrap_or_else(unknown)}</td>
                </tr>
                <tr>
                    <td>"Public suffix"</td>
                    <td>{suffix.unwrap_or_else(unknown)}</td>
                </tr>
            </table>
        </ReportCard>
        <ReportCard name="labels" title="Labels">
            <ol class="mb-0">
                {labels.into_iter().map(|label| view! { <li>{label}</li> }).collect_view()}
            </ol>
        </ReportCard>
        <ReportCard name="parents" title="Parent domains">
            {if parents.is_empty() {
                view! { <p class="mb-0">"None"</p> }.into_view()
            } else {
                view! {
                    <ul class="mb-0">
                        {parents
                            .into_iter()
                            .map(|parent| {
                                view! {
                                    <li>
                                        <A href=crate::domain_href(&parent) class="link-secondary">
                                            {parent.to_string()}
                                        </A>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                }
                    .into_view()
            }}

        </ReportCard>
    }
}

/// Renders the home page: the analyze form and, after a submission, its report.
#[component]
fn HomePage() -> impl IntoView {
    let query = use_query_map();
    let flash = create_blocking_resource(|| (), |_| take_flash());
    let report = move || {
        query.with(|query| {
            query
                .get("domain")
                .map(|domain| domain.parse::<Domain>().map(|domain| domain.report()))
        })
    };

    view! {
        <div class="container py-4">
            <h1 class="mb-3">"Spoofy"</h1>
            <p class="text-muted">"Enter a URL to check how its domain is put together."</p>
            <Transition fallback=|| ()>
                {move || {
                    flash
                        .get()
                        .and_then(|flash| match flash {
                            Ok(flash) => flash,
                            Err(err) => {
                                log::warn!("Failed to read the flash message: {}", err);
                                None
                            }
                        })
                        .map(|flash| view! { <FlashMessage flash/> })
                }}

            </Transition>
            <AnalyzeForm/>
            {move || match report() {
                None => view! {}.into_view(),
                Some(Err(err)) => {
                    log::info!("Ignoring domain query: {}", err);
                    view! { <FlashMessage flash=Flash::InvalidDomain/> }.into_view()
                }
                Some(Ok(report)) => view! { <DomainReportView report/> }.into_view(),
            }}

        </div>
    }
}
