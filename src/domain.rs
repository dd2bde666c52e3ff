use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{str::FromStr, sync::Arc};

lazy_static! {
    static ref DOMAIN_PATTERN: Regex =
        Regex::new(r"^(?:[a-zA-Z0-9_-]+\.)*[a-zA-Z0-9][a-zA-Z0-9_-]+\.[a-zA-Z]{2,11}$").unwrap();
}

/// Checks `value` against the domain pattern used by the analyze form.
///
/// The value is matched as given, so callers handling user input trim it first.
pub fn is_valid_domain(value: &str) -> bool {
    !value.starts_with("://") && DOMAIN_PATTERN.is_match(value)
}

/// Strips what a browser's `String.prototype.trim` strips from form input:
/// Unicode whitespace and the byte order mark.
pub fn trim_input(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

#[derive(Debug, Clone, thiserror::Error)]
pub struct DomainParseError;

impl std::fmt::Display for DomainParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid domain")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Domain(Arc<str>);

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Domain {
    type Err = DomainParseError;
    fn from_str(domain: &str) -> Result<Domain, Self::Err> {
        if !is_valid_domain(domain) {
            return Err(DomainParseError);
        }
        Ok(Domain(domain.to_ascii_lowercase().into()))
    }
}

impl Domain {
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.split('.')
    }

    pub fn top_level(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Every proper suffix of this domain that is itself a valid domain,
    /// nearest parent first.
    pub fn iter_parent_domains(&self) -> impl Iterator<Item = Domain> + '_ {
        self.0
            .match_indices('.')
            .map(move |(i, _)| self.0.split_at(i + 1).1)
            .filter_map(|parent| parent.parse::<Domain>().ok())
    }

    pub fn report(&self) -> DomainReport {
        let (root, suffix) = match addr::parse_domain_name(&self.0) {
            Ok(name) => (
                name.root().map(str::to_string),
                name.has_known_suffix().then(|| name.suffix().to_string()),
            ),
            Err(err) => {
                log::debug!("No public suffix information for {}: {}", self, err);
                (None, None)
            }
        };
        DomainReport {
            domain: self.clone(),
            labels: self.labels().map(str::to_string).collect(),
            top_level: self.top_level().to_string(),
            root,
            suffix,
            parents: self.iter_parent_domains().collect(),
        }
    }
}

/// Lexical breakdown of a submitted domain. Nothing here touches the network.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainReport {
    pub domain: Domain,
    pub labels: Vec<String>,
    pub top_level: String,
    /// Registrable domain according to the public suffix list.
    pub root: Option<String>,
    pub suffix: Option<String>,
    pub parents: Vec<Domain>,
}
