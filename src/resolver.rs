//! Works out which prayer period is active at a given instant.
//!
//! The scan walks the schedule in canonical order and stops at the first
//! instant still in the future; everything before that has started. An
//! instant equal to `now` counts as started. Before İmsak the active period
//! is the previous evening's Yatsı, and after Yatsı the next boundary is the
//! following day's İmsak. Both wraps move the date by one calendar day and
//! keep the time of day, so a DST change overnight shifts the result by the
//! size of the change.

use chrono::{DateTime, Days, TimeDelta};
use chrono_tz::Tz;

use crate::error::{Error, Result};
use crate::period::Period;
use crate::schedule::PrayerSchedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub current: Period,
    pub next: Period,
    /// When the current period began; yesterday's Yatsı before İmsak.
    pub started_at: DateTime<Tz>,
    /// When the next period begins; tomorrow's İmsak after Yatsı.
    pub ends_at: DateTime<Tz>,
    pub elapsed_minutes: u32,
    pub remaining_minutes: u32,
}

pub fn resolve(schedule: &PrayerSchedule, now: DateTime<Tz>) -> Result<Resolution> {
    check_same_day(schedule, now)?;

    let current = Period::ALL
        .iter()
        .take_while(|period| schedule.get(**period) <= now)
        .last()
        .copied();

    let dawn = schedule.get(Period::Dawn);
    let (current, started_at, ends_at) = match current {
        Some(period) if period.is_last() => (period, schedule.get(period), shift_days(dawn, 1)),
        Some(period) => (period, schedule.get(period), schedule.get(period.next())),
        None => (Period::Night, shift_days(schedule.get(Period::Night), -1), dawn),
    };

    Ok(Resolution {
        current,
        next: current.next(),
        started_at,
        ends_at,
        elapsed_minutes: whole_minutes(now - started_at),
        remaining_minutes: whole_minutes(ends_at - now),
    })
}

fn check_same_day(schedule: &PrayerSchedule, now: DateTime<Tz>) -> Result<()> {
    let day = now.date_naive();
    for (period, time) in schedule.iter() {
        if time.timezone() != now.timezone() {
            return Err(Error::malformed(format!(
                "{period} is in {} but now is in {}",
                time.timezone(),
                now.timezone()
            )));
        }
        if time.date_naive() != day {
            return Err(Error::malformed(format!(
                "{period} falls on {} but now is {day}",
                time.date_naive()
            )));
        }
    }
    Ok(())
}

/* same time of day, `days` calendar days away */
fn shift_days(time: DateTime<Tz>, days: i64) -> DateTime<Tz> {
    let shifted = if days >= 0 {
        time.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        time.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(time + TimeDelta::days(days))
}

/* truncated; negative spans only come from malformed schedules and clamp to zero */
fn whole_minutes(delta: TimeDelta) -> u32 {
    u32::try_from(delta.num_minutes().max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use chrono_tz::Europe::Istanbul;

    const SAMPLE: [&str; 6] = ["05:00", "06:30", "12:15", "15:45", "18:20", "19:45"];

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn sample() -> PrayerSchedule {
        PrayerSchedule::from_clock_times(day(), Istanbul, &SAMPLE).unwrap()
    }

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Tz> {
        Istanbul
            .from_local_datetime(&day().and_hms_opt(hour, minute, second).unwrap())
            .unwrap()
    }

    #[test]
    fn morning_after_sunrise() {
        let r = resolve(&sample(), at(7, 0, 0)).unwrap();
        assert_eq!(r.current, Period::Sunrise);
        assert_eq!(r.next, Period::Midday);
        assert_eq!(r.elapsed_minutes, 30);
        assert_eq!(r.remaining_minutes, 315);
    }

    #[test]
    fn before_dawn_is_still_night() {
        let r = resolve(&sample(), at(4, 0, 0)).unwrap();
        assert_eq!(r.current, Period::Night);
        assert_eq!(r.next, Period::Dawn);
        assert_eq!(r.remaining_minutes, 60);
        // yesterday 19:45 -> 04:00
        assert_eq!(r.elapsed_minutes, 8 * 60 + 15);
        assert_eq!(r.started_at.date_naive(), day().pred_opt().unwrap());
        assert_eq!(r.ends_at, at(5, 0, 0));
    }

    #[test]
    fn after_night_wraps_to_next_dawn() {
        let r = resolve(&sample(), at(20, 30, 0)).unwrap();
        assert_eq!(r.current, Period::Night);
        assert_eq!(r.elapsed_minutes, 45);
        assert_eq!(r.remaining_minutes, 8 * 60 + 30);
        assert_eq!(r.ends_at.date_naive(), day().succ_opt().unwrap());
    }

    #[test]
    fn exact_boundary_counts_as_started() {
        let schedule = sample();
        for period in Period::ALL {
            let r = resolve(&schedule, schedule.get(period)).unwrap();
            assert_eq!(r.current, period);
            assert_eq!(r.elapsed_minutes, 0);
        }
    }

    #[test]
    fn sub_minute_spans_are_truncated() {
        let r = resolve(&sample(), at(6, 30, 59)).unwrap();
        assert_eq!(r.elapsed_minutes, 0);
        // 12:15:00 - 06:30:59 = 5h 44m 01s
        assert_eq!(r.remaining_minutes, 344);
    }

    #[test]
    fn equal_consecutive_times_pick_the_later_period() {
        let schedule = PrayerSchedule::from_clock_times(
            day(),
            Istanbul,
            &["05:00", "06:30", "12:15", "12:15", "18:20", "19:45"],
        )
        .unwrap();
        let r = resolve(&schedule, at(12, 15, 0)).unwrap();
        assert_eq!(r.current, Period::Afternoon);
        assert_eq!(r.remaining_minutes, 6 * 60 + 5);
    }

    #[test]
    fn out_of_order_schedule_stops_at_the_first_future_time() {
        // Öğle after İkindi; at 12:00 Öğle is still ahead, so İkindi is never reached
        let schedule = PrayerSchedule::from_clock_times(
            day(),
            Istanbul,
            &["05:00", "06:30", "13:20", "11:40", "18:20", "19:45"],
        )
        .unwrap();
        let r = resolve(&schedule, at(12, 0, 0)).unwrap();
        assert_eq!(r.current, Period::Sunrise);
        assert_eq!(r.next, Period::Midday);
        assert_eq!(r.elapsed_minutes, 330);
        assert_eq!(r.remaining_minutes, 80);
        assert_eq!(r.ends_at, at(13, 20, 0));
    }

    #[test]
    fn other_day_is_malformed() {
        let tomorrow = at(7, 0, 0).checked_add_days(Days::new(1)).unwrap();
        assert!(matches!(
            resolve(&sample(), tomorrow),
            Err(Error::MalformedSchedule(_))
        ));
    }

    #[test]
    fn other_zone_is_malformed() {
        let berlin = chrono_tz::Europe::Berlin
            .from_local_datetime(&day().and_hms_opt(7, 0, 0).unwrap())
            .unwrap();
        assert!(matches!(
            resolve(&sample(), berlin),
            Err(Error::MalformedSchedule(_))
        ));
    }
}
