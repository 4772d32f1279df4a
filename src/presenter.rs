use crate::domain::Coordinate;
use crate::geo::RankedRecord;
use crate::session::PresenterView;
use std::fmt::Write;
use tokio::sync::watch::Receiver;
use tracing::instrument;

/// Prints every view published by the session to stdout, skipping frames identical to the last.
#[instrument(skip_all)]
pub async fn present(mut rx: Receiver<PresenterView>) {
    let mut last = render(&rx.borrow_and_update());
    println!("{}", last);

    while rx.changed().await.is_ok() {
        let frame = render(&rx.borrow_and_update());
        if frame != last {
            println!("{}", frame);
            last = frame;
        }
    }
}

/// Shown as the heading of each result when the dataset has it.
const TITLE_ATTRIBUTE: &str = "name";

pub fn render(view: &PresenterView) -> String {
    let mut out = String::new();

    if let Some(position) = &view.user_position {
        writeln!(out, "📍 You are at {}", position).unwrap_or_default();
    }
    if let Some(error) = &view.error {
        writeln!(out, "❌ {}", error).unwrap_or_default();
    }
    if view.loading {
        let waiting_for = match (view.user_position.is_some(), view.records_loaded.is_some()) {
            (false, false) if view.error.is_none() => "your position and the locations",
            (false, true) => "your position",
            (true, false) => "the locations",
            _ => "the remaining data",
        };
        writeln!(out, "⏳ Waiting for {}...", waiting_for).unwrap_or_default();
    } else if view.error.is_none() && view.results.is_empty() {
        writeln!(out, "🤷 No locations found").unwrap_or_default();
    }

    for (index, ranked) in view.results.iter().enumerate() {
        render_result(&mut out, index + 1, ranked);
    }

    out.trim_end().to_string()
}

fn render_result(out: &mut String, rank: usize, ranked: &RankedRecord) {
    let record = ranked.record();
    let title_key = match record.attribute(TITLE_ATTRIBUTE) {
        Some(_) => Some(TITLE_ATTRIBUTE),
        None => record.attributes().first().map(|(name, _)| name.as_str()),
    };

    let title = title_key.and_then(|key| record.attribute(key)).unwrap_or("Unnamed location");
    writeln!(out, "{}. {} ({:.2} km)", rank, title, ranked.distance_km()).unwrap_or_default();
    for (name, value) in record.attributes().iter().filter(|(name, _)| Some(name.as_str()) != title_key) {
        writeln!(out, "   {}: {}", name, value).unwrap_or_default();
    }
    writeln!(out, "   map: {}", map_link(record.coordinate())).unwrap_or_default();
}

pub fn map_link(coordinate: &Coordinate) -> String {
    format!("https://www.google.com/maps?q={},{}&z=15", coordinate.latitude(), coordinate.longitude())
}
