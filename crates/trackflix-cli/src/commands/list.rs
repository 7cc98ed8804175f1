use clap::ValueEnum;
use color_eyre::Result;
use serde_json::json;
use trackflix_core::{CatalogService, ListQuery, MediaStore, StatusFilter};
use trackflix_models::{Media, MediaId, MediaKind};

use super::render;
use crate::output::Output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ListScope {
    #[default]
    All,
    Movies,
    Series,
}

impl ListScope {
    pub fn kind(self) -> Option<MediaKind> {
        match self {
            ListScope::All => None,
            ListScope::Movies => Some(MediaKind::Movie),
            ListScope::Series => Some(MediaKind::Series),
        }
    }
}

pub fn build_query(scope: ListScope, status: StatusFilter, search: Option<String>) -> ListQuery {
    ListQuery {
        kind: scope.kind(),
        status,
        search: search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
    }
}

fn empty_message(query: &ListQuery) -> String {
    let noun = match query.kind {
        Some(MediaKind::Movie) => "movies",
        Some(MediaKind::Series) => "series",
        None => "entries",
    };
    if query.status == StatusFilter::All && query.search.is_none() {
        format!("No {} yet. Add one with `trackflix add`.", noun)
    } else {
        format!("No {} match the current filter.", noun)
    }
}

pub fn print_media_list(items: &[Media], query: &ListQuery, output: &Output) {
    if output.is_json() {
        output.json(&json!({
            "count": items.len(),
            "status": query.status.to_string(),
            "search": query.search,
            "items": items,
        }));
        return;
    }

    if items.is_empty() {
        output.info(empty_message(query));
        return;
    }
    output.table(&render::media_table(items));
    output.info(format!("Total: {}", items.len()));
}

pub fn run_list<S: MediaStore>(catalog: &CatalogService<S>, query: &ListQuery, output: &Output) -> Result<()> {
    let items = catalog.list(query)?;
    print_media_list(&items, query, output);
    Ok(())
}

pub fn run_show<S: MediaStore>(catalog: &CatalogService<S>, id: MediaId, output: &Output) -> Result<()> {
    let media = catalog.require(id)?;
    if output.is_json() {
        output.json(&json!({ "media": media }));
    } else {
        output.table(&render::detail_table(&media));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackflix_models::WatchStatus;

    #[test]
    fn test_build_query() {
        let query = build_query(ListScope::Series, StatusFilter::Only(WatchStatus::Watching), Some("  ".to_string()));
        assert_eq!(query.kind, Some(MediaKind::Series));
        assert_eq!(query.search, None);

        let query = build_query(ListScope::All, StatusFilter::All, Some(" dark ".to_string()));
        assert_eq!(query.kind, None);
        assert_eq!(query.search.as_deref(), Some("dark"));
    }

    #[test]
    fn test_empty_message() {
        let query = build_query(ListScope::Movies, StatusFilter::All, None);
        assert!(empty_message(&query).starts_with("No movies yet"));

        let query = build_query(ListScope::All, StatusFilter::Only(WatchStatus::Planned), None);
        assert_eq!(empty_message(&query), "No entries match the current filter.");
    }
}
