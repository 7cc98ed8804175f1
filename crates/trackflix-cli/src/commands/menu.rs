use color_eyre::Result;
use owo_colors::OwoColorize;
use tracing::debug;
use trackflix_core::{CatalogService, ListQuery, MediaStore, StatusFilter};
use trackflix_models::{MediaId, MediaKind, WatchStatus, MAX_RATING, MIN_RATING};

use super::{add, list, prompts, stats, update, AppContext};
use crate::output::Output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    AddMovie,
    AddSeries,
    Movies,
    Series,
    Show,
    Progress,
    Watched,
    Rate,
    Delete,
    Search,
    Filter,
    Statistics,
    Export,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 14] = [
        MenuAction::AddMovie,
        MenuAction::AddSeries,
        MenuAction::Movies,
        MenuAction::Series,
        MenuAction::Show,
        MenuAction::Progress,
        MenuAction::Watched,
        MenuAction::Rate,
        MenuAction::Delete,
        MenuAction::Search,
        MenuAction::Filter,
        MenuAction::Statistics,
        MenuAction::Export,
        MenuAction::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            MenuAction::AddMovie => "Add movie",
            MenuAction::AddSeries => "Add series",
            MenuAction::Movies => "My movies",
            MenuAction::Series => "My series",
            MenuAction::Show => "Show details",
            MenuAction::Progress => "Update series progress",
            MenuAction::Watched => "Mark movie watched",
            MenuAction::Rate => "Rate",
            MenuAction::Delete => "Delete",
            MenuAction::Search => "Search titles",
            MenuAction::Filter => "Filter by status",
            MenuAction::Statistics => "Statistics",
            MenuAction::Export => "Export to CSV",
            MenuAction::Quit => "Quit",
        }
    }
}

/// The interactive main menu. Filter and search text live here, per session.
pub struct Menu<'a, S> {
    catalog: CatalogService<S>,
    ctx: &'a AppContext,
    output: &'a Output,
    filter: StatusFilter,
    search: Option<String>,
}

impl<'a, S: MediaStore> Menu<'a, S> {
    pub fn new(catalog: CatalogService<S>, ctx: &'a AppContext, output: &'a Output) -> Self {
        Self {
            catalog,
            ctx,
            output,
            filter: StatusFilter::All,
            search: None,
        }
    }

    fn query(&self, kind: MediaKind) -> ListQuery {
        ListQuery {
            kind: Some(kind),
            status: self.filter,
            search: self.search.clone(),
        }
    }

    fn banner(&self) -> String {
        let mut banner = format!("{}", "TrackFlix".bold().cyan());
        if self.filter != StatusFilter::All {
            banner.push_str(&format!("  status: {}", self.filter));
        }
        if let Some(search) = &self.search {
            banner.push_str(&format!("  search: \"{}\"", search));
        }
        banner
    }

    pub fn run(mut self) -> Result<()> {
        prompts::ensure_interactive("A subcommand")?;
        let labels: Vec<&str> = MenuAction::ALL.iter().map(MenuAction::label).collect();

        loop {
            self.output.info(format!("\n{}", self.banner()));
            let action = MenuAction::ALL[prompts::prompt_select("Choose an option", &labels, 0)?];
            debug!("Menu action: {:?}", action);

            if action == MenuAction::Quit {
                self.output.info("Thanks for using TrackFlix. See you soon!");
                return Ok(());
            }

            if let Err(e) = self.dispatch(action) {
                let message = e.chain().map(|c| c.to_string()).collect::<Vec<_>>().join(": ");
                self.output.error(message);
            }
        }
    }

    fn dispatch(&mut self, action: MenuAction) -> Result<()> {
        let defaults = &self.ctx.config.defaults;
        match action {
            MenuAction::AddMovie => {
                add::run_add_movie(&mut self.catalog, add::MovieArgs::default(), defaults, self.output)?;
            }
            MenuAction::AddSeries => {
                add::run_add_series(&mut self.catalog, add::SeriesArgs::default(), defaults, self.output)?;
            }
            MenuAction::Movies => list::run_list(&self.catalog, &self.query(MediaKind::Movie), self.output)?,
            MenuAction::Series => list::run_list(&self.catalog, &self.query(MediaKind::Series), self.output)?,
            MenuAction::Show => {
                if let Some(id) = self.pick(None)? {
                    list::run_show(&self.catalog, id, self.output)?;
                }
            }
            MenuAction::Progress => self.progress()?,
            MenuAction::Watched => {
                if let Some(id) = self.pick(Some(MediaKind::Movie))? {
                    update::run_watched(&mut self.catalog, id, self.output)?;
                }
            }
            MenuAction::Rate => self.rate()?,
            MenuAction::Delete => {
                if let Some(id) = self.pick(None)? {
                    update::run_delete(&mut self.catalog, id, false, self.output)?;
                }
            }
            MenuAction::Search => {
                let term = prompts::prompt_string("Search titles (empty clears)", self.search.as_deref())?;
                self.search = Some(term).filter(|t| !t.is_empty());
                match &self.search {
                    Some(term) => {
                        let results = self.catalog.search(term)?;
                        let query = ListQuery {
                            search: Some(term.clone()),
                            ..ListQuery::default()
                        };
                        list::print_media_list(&results, &query, self.output);
                    }
                    None => self.output.info("Search cleared"),
                }
            }
            MenuAction::Filter => {
                let mut options = vec![StatusFilter::All];
                options.extend(WatchStatus::ALL.into_iter().map(StatusFilter::Only));
                let labels: Vec<String> = options.iter().map(|f| f.to_string()).collect();
                let current = options.iter().position(|f| *f == self.filter).unwrap_or(0);
                self.filter = options[prompts::prompt_select("Show status", &labels, current)?];
            }
            MenuAction::Statistics => {
                stats::run_stats(&self.catalog, self.output)?;
            }
            MenuAction::Export => {
                super::export::run_export(&self.catalog, None, &self.ctx.paths.export_dir(), self.output)?;
            }
            MenuAction::Quit => {}
        }
        Ok(())
    }

    /// Choose an entry from the catalog, optionally of one kind.
    fn pick(&self, kind: Option<MediaKind>) -> Result<Option<MediaId>> {
        let items = match kind {
            Some(kind) => self.catalog.list(&ListQuery {
                kind: Some(kind),
                ..ListQuery::default()
            })?,
            None => self.catalog.all()?,
        };
        if items.is_empty() {
            self.output.warn("Nothing to choose from yet");
            return Ok(None);
        }

        let labels: Vec<String> = items.iter().map(|m| m.to_string()).collect();
        let index = prompts::prompt_select("Which one?", &labels, 0)?;
        Ok(items[index].id)
    }

    fn progress(&mut self) -> Result<()> {
        let Some(id) = self.pick(Some(MediaKind::Series))? else {
            return Ok(());
        };
        let media = self.catalog.require(id)?;
        let Some(series) = media.as_series() else {
            return Ok(());
        };

        let season = prompts::prompt_number(
            "Season",
            Some(series.current_season),
            1,
            series.total_seasons,
            self.output,
        )?;
        let episode = prompts::prompt_number(
            "Episode",
            Some(series.current_episode),
            1,
            series.episodes_per_season,
            self.output,
        )?;
        update::run_progress(&mut self.catalog, id, season, episode, self.output)?;
        Ok(())
    }

    fn rate(&mut self) -> Result<()> {
        let Some(id) = self.pick(None)? else {
            return Ok(());
        };
        let media = self.catalog.require(id)?;
        let rating = prompts::prompt_number("Rating (0-5)", Some(media.rating), MIN_RATING, MAX_RATING, self.output)?;
        let comment = prompts::prompt_string("Comment", Some(media.comment.as_str()))?;
        update::run_rate(&mut self.catalog, id, rating, Some(comment), self.output)
    }
}
