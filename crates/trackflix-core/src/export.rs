use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;
use tracing::debug;
use trackflix_models::{compute_progress_percentage, Media, MediaDetails, WatchStatus};

const HEADER: [&str; 10] = [
    "id", "kind", "title", "year", "genres", "rating", "comment", "status", "progress", "details",
];

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: Option<i64>,
    kind: &'static str,
    title: &'a str,
    year: i32,
    genres: String,
    rating: f64,
    comment: &'a str,
    status: &'static str,
    progress: f64,
    details: String,
}

impl<'a> From<&'a Media> for ExportRow<'a> {
    fn from(media: &'a Media) -> Self {
        let (progress, details) = match &media.details {
            MediaDetails::Movie(movie) => {
                let progress = if media.status == WatchStatus::Completed { 100.0 } else { 0.0 };
                let details = match &movie.director {
                    Some(director) => format!("{}min | {}", movie.duration, director),
                    None => format!("{}min", movie.duration),
                };
                (progress, details)
            }
            MediaDetails::Series(series) => (
                compute_progress_percentage(series),
                format!("S{}E{}", series.current_season, series.current_episode),
            ),
        };

        Self {
            id: media.id,
            kind: media.kind().as_str(),
            title: &media.title,
            year: media.year,
            genres: media.genres_text(),
            rating: media.rating,
            comment: &media.comment,
            status: media.status.as_str(),
            progress,
            details,
        }
    }
}

/// Write the given records as CSV with a header row. Returns the number of rows written.
pub fn export_csv<W: Write>(writer: W, items: &[Media]) -> Result<usize, csv::Error> {
    // Written by hand so an empty catalog still gets a header
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(HEADER)?;
    for media in items {
        wtr.serialize(ExportRow::from(media))?;
    }
    wtr.flush()?;
    debug!("Exported {} records", items.len());
    Ok(items.len())
}

pub fn default_export_file_name(date: NaiveDate) -> String {
    format!("trackflix_export_{}.csv", date.format("%Y%m%d"))
}
