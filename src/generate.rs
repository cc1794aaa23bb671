use std::fs;
use std::path::PathBuf;

use chrono::DateTime;
use chrono_tz::Tz;
use log::{info, warn};

use crate::cities::City;
use crate::error::{Error, Result};
use crate::render::render_board;
use crate::resolver::resolve;
use crate::source::ScheduleSource;

/// Outcome of one generation run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(&'static str, Error)>,
}

impl RunReport {
    pub fn all_failed(&self) -> bool {
        self.written.is_empty() && !self.failed.is_empty()
    }
}

pub struct Generator<'a> {
    source: &'a dyn ScheduleSource,
    cities: Vec<&'static City>,
    output_dir: PathBuf,
    extension: String,
}

impl<'a> Generator<'a> {
    pub fn new(
        source: &'a dyn ScheduleSource,
        cities: Vec<&'static City>,
        output_dir: impl Into<PathBuf>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            source,
            cities,
            output_dir: output_dir.into(),
            extension: extension.into(),
        }
    }

    /// Writes one board per city, in table order. A failing city is logged
    /// and recorded; the others are still generated.
    pub fn run(&self, now: DateTime<Tz>) -> Result<RunReport> {
        fs::create_dir_all(&self.output_dir)?;

        let mut report = RunReport::default();
        for city in &self.cities {
            match self.generate_city(city, now) {
                Ok(path) => {
                    info!("wrote {} ({})", path.display(), city.name);
                    report.written.push(path);
                }
                Err(e) => {
                    warn!("skipping {}: {}", city.slug, e);
                    report.failed.push((city.slug, e));
                }
            }
        }
        info!(
            "{} boards written, {} failed (source: {})",
            report.written.len(),
            report.failed.len(),
            self.source.name()
        );
        Ok(report)
    }

    fn generate_city(&self, city: &City, now: DateTime<Tz>) -> Result<PathBuf> {
        let schedule = self.source.fetch(city, now.date_naive())?;
        let resolution = resolve(&schedule, now)?;
        let board = render_board(city, &schedule, &resolution, now);

        let path = self
            .output_dir
            .join(format!("{}{}", city.slug, self.extension));
        fs::write(&path, board)?;
        Ok(path)
    }
}
