use http::status::StatusCode;
use leptos::*;
#[cfg(feature = "ssr")]
use leptos_axum::ResponseOptions;

#[derive(Clone, Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

#[component]
pub fn ErrorTemplate(
    #[prop(optional)] outside_errors: Option<Errors>,
    #[prop(optional)] errors: Option<RwSignal<Errors>>,
) -> impl IntoView {
    let errors = match outside_errors {
        Some(e) => create_rw_signal(e),
        None => errors.unwrap_or_else(|| create_rw_signal(Errors::default())),
    };
    // Get Errors from Signal
    let errors = errors.get_untracked();

    // Downcast lets us take a type that implements `std::error::Error`
    let errors: Vec<AppError> = errors
        .into_iter()
        .filter_map(|(_k, v)| v.downcast_ref::<AppError>().cloned())
        .collect();
    log::warn!("Errors: {:#?}", &errors);

    // Only the first error decides the response status
    #[cfg(feature = "ssr")]
    {
        let response = use_context::<ResponseOptions>();
        if let (Some(response), Some(error)) = (response, errors.first()) {
            response.set_status(error.status_code());
        }
    }

    view! {
        <div class="container py-5">
            <h1>{if errors.len() > 1 { "Errors" } else { "Error" }}</h1>
            <For
                // a function that returns the items we're iterating over; a signal is fine
                each=move || { errors.clone().into_iter().enumerate() }
                // a unique key for each item as a reference
                key=|(index, _error)| *index
                // renders each item to a view
                children=move |error| {
                    let error_string = error.1.to_string();
                    let error_code = error.1.status_code();
                    view! {
                        <h2>{error_code.to_string()}</h2>
                        <p>"Error: " {error_string}</p>
                    }
                }
            />

            <a href="/" class="btn btn-outline-secondary">
                "Back to the start"
            </a>
        </div>
    }
}
