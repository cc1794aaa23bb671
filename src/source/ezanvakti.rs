use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::{agent, get_json, ScheduleSource};
use crate::cities::City;
use crate::error::{Error, Result};
use crate::schedule::PrayerSchedule;

pub const DEFAULT_BASE_URL: &str = "https://ezanvakti.herokuapp.com";

/// The service answers either with a single day or with a list of days.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Days(Vec<Day>),
    Day(Day),
}

#[derive(Debug)]
struct Day {
    imsak: String,
    gunes: String,
    ogle: String,
    ikindi: String,
    aksam: String,
    yatsi: String,
    /// dd.mm.yyyy
    date: Option<String>,
}

const TIME_KEYS: [&str; 6] = ["imsak", "gunes", "ogle", "ikindi", "aksam", "yatsi"];

/* keys are matched ignoring ASCII case; everything else in the object is skipped */
impl<'de> Deserialize<'de> for Day {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DayVisitor;

        impl<'de> Visitor<'de> for DayVisitor {
            type Value = Day;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object with imsak, gunes, ogle, ikindi, aksam and yatsi")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Day, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut times: [Option<String>; 6] = Default::default();
                let mut date = None;
                while let Some(key) = map.next_key::<String>()? {
                    let key = key.to_ascii_lowercase();
                    if let Some(slot) = TIME_KEYS.iter().position(|name| *name == key) {
                        times[slot] = Some(map.next_value()?);
                    } else if key == "miladitarihkisa" {
                        date = map.next_value()?;
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }

                if let Some(slot) = times.iter().position(Option::is_none) {
                    return Err(de::Error::missing_field(TIME_KEYS[slot]));
                }
                let [imsak, gunes, ogle, ikindi, aksam, yatsi] =
                    times.map(Option::unwrap_or_default);
                Ok(Day {
                    imsak,
                    gunes,
                    ogle,
                    ikindi,
                    aksam,
                    yatsi,
                    date,
                })
            }
        }

        deserializer.deserialize_map(DayVisitor)
    }
}

impl Day {
    fn in_order(&self) -> [&str; 6] {
        [
            self.imsak.as_str(),
            self.gunes.as_str(),
            self.ogle.as_str(),
            self.ikindi.as_str(),
            self.aksam.as_str(),
            self.yatsi.as_str(),
        ]
    }

    fn is_on(&self, date: NaiveDate) -> bool {
        self.date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%d.%m.%Y").ok())
            == Some(date)
    }
}

impl Payload {
    /// The day matching `date`, otherwise the first one listed.
    fn pick(self, date: NaiveDate) -> Option<Day> {
        match self {
            Payload::Day(day) => Some(day),
            Payload::Days(days) => {
                let matching = days.iter().position(|day| day.is_on(date)).unwrap_or(0);
                days.into_iter().nth(matching)
            }
        }
    }
}

/// `vakitler/{id}` endpoint of the EzanVakti mirror of the Diyanet tables,
/// keyed by plate number.
pub struct EzanVaktiSource {
    agent: ureq::Agent,
    base_url: String,
    tz: Tz,
}

impl EzanVaktiSource {
    pub fn new(base_url: &str, tz: Tz, timeout: Duration) -> Self {
        Self {
            agent: agent(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
            tz,
        }
    }
}

impl ScheduleSource for EzanVaktiSource {
    fn name(&self) -> &'static str {
        "ezanvakti"
    }

    fn fetch(&self, city: &City, date: NaiveDate) -> Result<PrayerSchedule> {
        let url = format!("{}/vakitler/{}", self.base_url, city.plate);
        let payload: Payload = get_json(self.name(), self.agent.get(&url))?;
        let day = payload.pick(date).ok_or_else(|| Error::Decode {
            source_name: self.name(),
            message: "response lists no days".to_string(),
        })?;
        PrayerSchedule::from_clock_times(date, self.tz, &day.in_order())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn accepts_a_single_lowercase_day() {
        let body = r#"{"imsak": "06:01", "gunes": "07:27", "ogle": "13:05",
                       "ikindi": "16:11", "aksam": "18:37", "yatsi": "19:57"}"#;
        let payload: Payload = serde_json::from_str(body).unwrap();
        let day = payload.pick(date()).unwrap();
        assert_eq!(day.in_order()[0], "06:01");
        assert_eq!(day.in_order()[5], "19:57");
    }

    #[test]
    fn picks_the_requested_day_from_a_list() {
        let body = r#"[
            {"MiladiTarihKisa": "16.10.2026", "Imsak": "06:00", "Gunes": "07:26", "Ogle": "13:05",
             "Ikindi": "16:12", "Aksam": "18:38", "Yatsi": "19:59"},
            {"MiladiTarihKisa": "17.10.2026", "Imsak": "06:01", "Gunes": "07:27", "Ogle": "13:05",
             "Ikindi": "16:11", "Aksam": "18:37", "Yatsi": "19:57"}
        ]"#;
        let payload: Payload = serde_json::from_str(body).unwrap();
        let day = payload.pick(date()).unwrap();
        assert_eq!(day.imsak, "06:01");
    }

    #[test]
    fn falls_back_to_the_first_listed_day() {
        let body = r#"[
            {"MiladiTarihKisa": "01.01.2020", "Imsak": "06:49", "Gunes": "08:22", "Ogle": "13:13",
             "Ikindi": "15:37", "Aksam": "17:54", "Yatsi": "19:21"}
        ]"#;
        let payload: Payload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.pick(date()).unwrap().imsak, "06:49");
    }

    #[test]
    fn keys_match_in_any_case() {
        let body = r#"{"IMSAK": "06:01", "gUnEs": "07:27", "Ogle": "13:05",
                       "ikindi": "16:11", "AKSAM": "18:37", "Yatsi": "19:57",
                       "miladitarihkisa": "17.10.2026", "GreenwichOrtalamaZamani": 3.0}"#;
        let day: Day = serde_json::from_str(body).unwrap();
        assert_eq!(
            day.in_order(),
            ["06:01", "07:27", "13:05", "16:11", "18:37", "19:57"]
        );
        assert!(day.is_on(date()));
    }

    #[test]
    fn missing_time_is_an_error() {
        let body = r#"{"imsak": "06:01", "gunes": "07:27", "ogle": "13:05",
                       "ikindi": "16:11", "aksam": "18:37"}"#;
        let err = serde_json::from_str::<Day>(body).unwrap_err();
        assert!(err.to_string().contains("yatsi"), "{err}");
    }

    #[test]
    fn empty_list_has_no_day() {
        let payload: Payload = serde_json::from_str("[]").unwrap();
        assert!(payload.pick(date()).is_none());
    }
}
