//! Site profiles for the recognized news sources
//!
//! Each recognized source ships one [`SiteProfile`] implementation that knows
//! how to match its host and how to tell an article URL from a navigation
//! URL. The registry is a fixed list checked in order; anything no profile
//! claims is [`Source::Other`] and is never treated as an article or
//! followed.

mod rbc;
mod ria;

pub use rbc::RbcProfile;
pub use ria::RiaProfile;

use url::Url;

/// Priority assigned to frontier entries whose URL matches an article pattern
pub const PRIORITY_ARTICLE: i64 = 10;

/// Priority assigned to all other frontier entries
pub const PRIORITY_NAVIGATION: i64 = 1;

/// Identifier of a known news source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Ria,
    Rbc,
    /// Catch-all for hosts no profile claims
    Other,
}

impl Source {
    /// Converts the source to its database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Ria => "ria",
            Self::Rbc => "rbc",
            Self::Other => "other",
        }
    }

    /// Parses a source from its database string representation
    ///
    /// Unknown labels fall back to `Other` rather than failing; the store may
    /// hold rows from seed lists with labels we no longer recognize.
    pub fn from_db_string(s: &str) -> Self {
        match s {
            "ria" => Self::Ria,
            "rbc" => Self::Rbc,
            _ => Self::Other,
        }
    }

    /// Returns true if this source is one of the recognized sites
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other)
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_db_string())
    }
}

/// Per-source classification behavior
///
/// One implementation per recognized source. `priority_for` has a default
/// implementation deriving the two-tier priority from `is_article`.
pub trait SiteProfile: Send + Sync {
    /// The source identifier this profile claims
    fn source(&self) -> Source;

    /// Returns true if the host belongs to this source
    fn matches_host(&self, host: &str) -> bool;

    /// Returns true if the URL matches this source's article pattern
    fn is_article(&self, url: &Url) -> bool;

    /// Frontier priority for a URL of this source
    fn priority_for(&self, url: &Url) -> i64 {
        if self.is_article(url) {
            PRIORITY_ARTICLE
        } else {
            PRIORITY_NAVIGATION
        }
    }
}

/// Fixed, ordered registry of site profiles
pub struct SiteRegistry {
    profiles: Vec<Box<dyn SiteProfile>>,
}

impl SiteRegistry {
    /// Builds the registry of known sources
    pub fn known() -> Self {
        Self {
            profiles: vec![Box::new(RiaProfile), Box::new(RbcProfile)],
        }
    }

    /// Builds a registry from explicit profiles (used by tests)
    pub fn with_profiles(profiles: Vec<Box<dyn SiteProfile>>) -> Self {
        Self { profiles }
    }

    fn profile_for(&self, url: &Url) -> Option<&dyn SiteProfile> {
        let host = url.host_str()?;
        self.profiles
            .iter()
            .find(|p| p.matches_host(host))
            .map(|p| p.as_ref())
    }

    /// Maps a URL to its source, `Source::Other` if no profile claims it
    pub fn classify(&self, url: &Url) -> Source {
        self.profile_for(url)
            .map(|p| p.source())
            .unwrap_or(Source::Other)
    }

    /// Returns true if the URL matches its source's article pattern
    ///
    /// URLs from unrecognized sources are never articles.
    pub fn is_article(&self, url: &Url) -> bool {
        self.profile_for(url)
            .map(|p| p.is_article(url))
            .unwrap_or(false)
    }

    /// Frontier priority for a URL
    pub fn priority_for(&self, url: &Url) -> i64 {
        self.profile_for(url)
            .map(|p| p.priority_for(url))
            .unwrap_or(PRIORITY_NAVIGATION)
    }
}
