use std::fmt;
use std::str::FromStr;
use trackflix_models::{Media, MediaKind, WatchStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(WatchStatus),
}

impl StatusFilter {
    pub fn matches(&self, media: &Media) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => media.status == *status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => f.write_str(status.as_str()),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<WatchStatus>()
            .map(StatusFilter::Only)
            .map_err(|e| e.to_string())
    }
}

/// Case-insensitive substring match on a title, folding non-ASCII letters too.
pub fn title_contains(title: &str, needle: &str) -> bool {
    title.to_lowercase().contains(&needle.to_lowercase())
}

/// Kind, status and title criteria applied to a listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub kind: Option<MediaKind>,
    pub status: StatusFilter,
    pub search: Option<String>,
}

impl ListQuery {
    pub fn matches(&self, media: &Media) -> bool {
        if let Some(kind) = self.kind {
            if media.kind() != kind {
                return false;
            }
        }
        if !self.status.matches(media) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => title_contains(&media.title, term),
            _ => true,
        }
    }

    pub fn apply(&self, items: Vec<Media>) -> Vec<Media> {
        items.into_iter().filter(|m| self.matches(m)).collect()
    }
}
