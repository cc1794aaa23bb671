//! Fixed-width board written into each city file.
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │               ANKARA                │
//! ├─────────────────────────────────────┤
//! │          17.10.2026 07:00           │
//! ├─────────────────────────────────────┤
//! │   İmsak     05:00                   │
//! │ ► Güneş     06:30                   │
//! │   ...                               │
//! ├─────────────────────────────────────┤
//! │ Şu an: Güneş                        │
//! │ Geçen: 00:30                        │
//! │ Öğle vaktine: 05:15                 │
//! └─────────────────────────────────────┘
//! ```

use std::fmt::Write;

use chrono::DateTime;
use chrono_tz::Tz;

use crate::cities::{turkish_upper, City};
use crate::clock::format_span;
use crate::resolver::Resolution;
use crate::schedule::PrayerSchedule;

/// Columns between the two vertical borders.
pub const INNER_WIDTH: usize = 37;

const MARKER: char = '►';

pub fn render_board(
    city: &City,
    schedule: &PrayerSchedule,
    resolution: &Resolution,
    now: DateTime<Tz>,
) -> String {
    let mut out = String::new();
    rule(&mut out, '┌', '┐');
    row(&mut out, &centered(&turkish_upper(city.name)));
    rule(&mut out, '├', '┤');
    row(&mut out, &centered(&now.format("%d.%m.%Y %H:%M").to_string()));
    rule(&mut out, '├', '┤');
    for (period, time) in schedule.iter() {
        let marker = if period == resolution.current { MARKER } else { ' ' };
        row(
            &mut out,
            &format!(" {marker} {:<9} {}", period.label(), time.format("%H:%M")),
        );
    }
    rule(&mut out, '├', '┤');
    row(&mut out, &format!(" Şu an: {}", resolution.current));
    row(
        &mut out,
        &format!(" Geçen: {}", format_span(resolution.elapsed_minutes)),
    );
    row(
        &mut out,
        &format!(
            " {} vaktine: {}",
            resolution.next,
            format_span(resolution.remaining_minutes)
        ),
    );
    rule(&mut out, '└', '┘');
    out
}

fn rule(out: &mut String, left: char, right: char) {
    let _ = writeln!(out, "{left}{}{right}", "─".repeat(INNER_WIDTH));
}

/* pads (or cuts) `content` to the inner width, counting characters */
fn row(out: &mut String, content: &str) {
    let fitted: String = content.chars().take(INNER_WIDTH).collect();
    let pad = INNER_WIDTH - fitted.chars().count();
    let _ = writeln!(out, "│{fitted}{}│", " ".repeat(pad));
}

fn centered(text: &str) -> String {
    let len = text.chars().count();
    if len >= INNER_WIDTH {
        return text.to_string();
    }
    let left = (INNER_WIDTH - len) / 2;
    format!("{}{text}", " ".repeat(left))
}
