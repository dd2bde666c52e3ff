pub mod app;
pub mod controls;
pub mod domain;
pub mod error_template;
pub mod icon_toggle;
pub mod submit_guard;

#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod fileserv;
#[cfg(feature = "ssr")]
pub mod server;
#[cfg(feature = "ssr")]
pub mod session;

pub use domain::{Domain, DomainParseError, DomainReport};

use serde::{Deserialize, Serialize};

/// Message set in a cookie by a rejected submission and shown on the next
/// page load only.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Flash {
    InvalidDomain,
    FormExpired,
}

impl Flash {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidDomain => "invalid_domain",
            Self::FormExpired => "form_expired",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidDomain => submit_guard::INVALID_DOMAIN_MESSAGE,
            Self::FormExpired => "The form has expired. Please submit it again.",
        }
    }
}

/// Link to the home page showing the report for `domain`.
pub fn domain_href(domain: &Domain) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("domain", domain.as_ref())
        .finish();
    format!("/?{query}")
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid flash message")]
pub struct InvalidFlashError;

impl std::str::FromStr for Flash {
    type Err = InvalidFlashError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invalid_domain" => Ok(Self::InvalidDomain),
            "form_expired" => Ok(Self::FormExpired),
            _ => Err(InvalidFlashError),
        }
    }
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount_to_body(App);
}

#[cfg(test)]
mod tests {
    use super::{domain_href, Domain, Flash};

    #[test]
    fn flash_round_trips_through_cookie_value() {
        for flash in [Flash::InvalidDomain, Flash::FormExpired] {
            assert_eq!(flash.as_str().parse::<Flash>().unwrap(), flash);
        }
        assert!("something_else".parse::<Flash>().is_err());
        assert_eq!(Flash::InvalidDomain.message(), "Please enter a valid domain.");
    }

    #[test]
    fn domain_href_is_query_encoded() {
        let domain: Domain = "Sub.Example.com".parse().unwrap();
        assert_eq!(domain_href(&domain), "/?domain=sub.example.com");
    }
}
