use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::clock::parse_clock;
use crate::error::{Error, Result};
use crate::period::{Period, PERIOD_COUNT};

/// Today's six prayer instants in canonical order (İmsak .. Yatsı).
///
/// The instants are expected to be non-decreasing, but upstream data is not
/// always well formed and that is not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrayerSchedule {
    times: [DateTime<Tz>; PERIOD_COUNT],
}

impl PrayerSchedule {
    pub fn new(times: [DateTime<Tz>; PERIOD_COUNT]) -> Self {
        Self { times }
    }

    /// Builds a schedule from clock strings such as `"05:12"` for `date` in `tz`.
    pub fn from_clock_times<S: AsRef<str>>(date: NaiveDate, tz: Tz, clocks: &[S]) -> Result<Self> {
        if clocks.len() != PERIOD_COUNT {
            return Err(Error::malformed(format!(
                "expected {PERIOD_COUNT} times, got {}",
                clocks.len()
            )));
        }
        let mut parsed = Vec::with_capacity(PERIOD_COUNT);
        for clock in clocks {
            parsed.push(parse_clock(clock.as_ref())?);
        }
        Self::from_naive_times(date, tz, &parsed)
    }

    pub fn from_naive_times(date: NaiveDate, tz: Tz, clocks: &[NaiveTime]) -> Result<Self> {
        let times = clocks
            .iter()
            .map(|clock| localize(date, *clock, tz))
            .collect::<Result<Vec<_>>>()?;
        Self::try_from(times)
    }

    pub fn get(&self, period: Period) -> DateTime<Tz> {
        self.times[period.index()]
    }

    pub fn times(&self) -> &[DateTime<Tz>; PERIOD_COUNT] {
        &self.times
    }

    pub fn timezone(&self) -> Tz {
        self.times[0].timezone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Period, DateTime<Tz>)> + '_ {
        Period::ALL.iter().map(|period| (*period, self.get(*period)))
    }
}

impl TryFrom<Vec<DateTime<Tz>>> for PrayerSchedule {
    type Error = Error;

    fn try_from(times: Vec<DateTime<Tz>>) -> Result<Self> {
        let count = times.len();
        let times: [DateTime<Tz>; PERIOD_COUNT] = times.try_into().map_err(|_| {
            Error::malformed(format!("expected {PERIOD_COUNT} times, got {count}"))
        })?;
        Ok(Self::new(times))
    }
}

fn localize(date: NaiveDate, clock: NaiveTime, tz: Tz) -> Result<DateTime<Tz>> {
    tz.from_local_datetime(&date.and_time(clock))
        .earliest()
        .ok_or_else(|| Error::malformed(format!("{date} {clock} does not exist in {tz}")))
}
