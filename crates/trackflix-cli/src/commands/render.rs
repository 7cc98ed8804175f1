use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use trackflix_core::Statistics;
use trackflix_models::{compute_progress_percentage, Media, MediaDetails, WatchStatus};

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn header(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn status_color(status: WatchStatus) -> Color {
    match status {
        WatchStatus::Planned => Color::Blue,
        WatchStatus::Watching => Color::Yellow,
        WatchStatus::Completed => Color::Green,
    }
}

fn status_cell(status: WatchStatus) -> Cell {
    Cell::new(status.label()).fg(status_color(status))
}

pub fn rating_label(rating: f64) -> String {
    if rating > 0.0 {
        format!("⭐ {:.1}", rating)
    } else {
        "Not rated".to_string()
    }
}

/// Short per-kind summary: runtime and director, or position and progress.
pub fn details_label(media: &Media) -> String {
    match &media.details {
        MediaDetails::Movie(movie) => match &movie.director {
            Some(director) => format!("{}min | {}", movie.duration, director),
            None => format!("{}min", movie.duration),
        },
        MediaDetails::Series(series) => format!(
            "{} ({:.1}%)",
            series.position_label(),
            compute_progress_percentage(series)
        ),
    }
}

pub fn media_table(items: &[Media]) -> Table {
    let mut table = styled_table();
    table.set_header(vec![
        header("ID"),
        header("Title"),
        header("Year"),
        header("Kind"),
        header("Status"),
        header("Rating"),
        header("Details"),
    ]);

    for media in items {
        table.add_row(vec![
            Cell::new(media.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(&media.title),
            Cell::new(media.year),
            Cell::new(media.kind()),
            status_cell(media.status),
            Cell::new(rating_label(media.rating)),
            Cell::new(details_label(media)),
        ]);
    }
    table
}

pub fn detail_table(media: &Media) -> Table {
    let mut table = styled_table();
    table.set_header(vec![
        Cell::new(&media.title).fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);

    let mut rows: Vec<(&str, String)> = vec![
        ("ID", media.id.map(|id| id.to_string()).unwrap_or_default()),
        ("Kind", media.kind().to_string()),
        ("Year", media.year.to_string()),
        ("Genres", media.genres_text()),
        ("Rating", rating_label(media.rating)),
        ("Comment", media.comment.clone()),
    ];

    match &media.details {
        MediaDetails::Movie(movie) => {
            rows.push(("Duration", format!("{} min", movie.duration)));
            rows.push(("Director", movie.director.clone().unwrap_or_default()));
            rows.push((
                "Watched",
                movie
                    .watched_date
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default(),
            ));
        }
        MediaDetails::Series(series) => {
            rows.push(("Seasons", series.total_seasons.to_string()));
            rows.push(("Episodes / season", series.episodes_per_season.to_string()));
            rows.push(("Total episodes", series.total_episodes().to_string()));
            rows.push((
                "Episode length",
                series.episode_duration.map(|d| format!("{} min", d)).unwrap_or_default(),
            ));
            rows.push(("Position", series.position_label()));
            rows.push(("Progress", format!("{:.2}%", compute_progress_percentage(series))));
        }
    }

    for (label, value) in rows {
        table.add_row(vec![header(label), Cell::new(value)]);
    }
    table.add_row(vec![header("Status"), status_cell(media.status)]);
    table
}

pub fn stats_table(stats: &Statistics) -> Table {
    let mut table = styled_table();
    table.set_header(vec![
        Cell::new("Statistics").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    table.add_row(vec![header("Movies"), Cell::new(stats.movies)]);
    table.add_row(vec![header("Series"), Cell::new(stats.series)]);
    table.add_row(vec![header("Total"), Cell::new(stats.total)]);
    table.add_row(vec![header("Planned"), status_count_cell(WatchStatus::Planned, stats.planned)]);
    table.add_row(vec![header("Watching"), status_count_cell(WatchStatus::Watching, stats.watching)]);
    table.add_row(vec![header("Completed"), status_count_cell(WatchStatus::Completed, stats.completed)]);

    let rate = stats
        .completion_rate()
        .map(|rate| format!("{:.1}%", rate))
        .unwrap_or_else(|| "-".to_string());
    table.add_row(vec![header("Completion rate"), Cell::new(rate)]);

    let goal = stats
        .goal_tier()
        .map(|tier| format!("{} (≥ {:.0}%)", tier, tier.threshold()))
        .unwrap_or_else(|| "Keep watching!".to_string());
    table.add_row(vec![header("Goal"), Cell::new(goal)]);
    table
}

fn status_count_cell(status: WatchStatus, count: u64) -> Cell {
    Cell::new(count).fg(status_color(status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackflix_models::update_progress;

    #[test]
    fn test_rating_label() {
        assert_eq!(rating_label(0.0), "Not rated");
        assert_eq!(rating_label(4.5), "⭐ 4.5");
    }

    #[test]
    fn test_details_label() {
        let movie = Media::movie("Alien", 1979, vec![], 117, Some("Ridley Scott".to_string()));
        assert_eq!(details_label(&movie), "117min | Ridley Scott");

        let mut series = Media::series("Dark", 2017, vec![], 2, 10, Some(50));
        update_progress(&mut series, 1, 5);
        assert_eq!(details_label(&series), "S1E05 (25.0%)");
    }

    #[test]
    fn test_media_table_lists_every_item() {
        let items = vec![
            Media::movie("Alien", 1979, vec![], 117, None),
            Media::series("Dark", 2017, vec![], 3, 8, None),
        ];
        let rendered = media_table(&items).to_string();
        assert!(rendered.contains("Alien"));
        assert!(rendered.contains("S1E01"));
        assert!(rendered.contains("Not rated"));
    }
}
