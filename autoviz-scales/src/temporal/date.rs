use autoviz_data::value::{date_from_days, days_since_epoch};
use autoviz_data::DateUnit;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

use crate::array;

/// Upper bound on generated ticks, guards against degenerate intervals
const MAX_TICKS: usize = 10_000;

/// A calendar interval that date values can be floored to and stepped by
pub trait DateInterval: Send + Sync + std::fmt::Debug {
    fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime;
    fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime;

    /// Approximate length in days
    fn approx_days(&self) -> f64;

    fn ceil(&self, date: &NaiveDateTime) -> NaiveDateTime {
        let floored = self.floor(date);
        if &floored == date {
            *date
        } else {
            self.offset(floored, 1)
        }
    }
}

pub mod interval {
    use super::*;

    /// Fixed-length interval aligned to the epoch (seconds up to days)
    #[derive(Debug, Clone)]
    pub struct FixedInterval {
        seconds: i64,
    }

    #[derive(Debug, Clone)]
    pub struct WeekInterval {
        weekday: Weekday,
    }

    #[derive(Debug, Clone)]
    pub struct MonthInterval {
        every: i64,
    }

    #[derive(Debug, Clone)]
    pub struct YearInterval {
        every: i32,
    }

    impl DateInterval for FixedInterval {
        fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime {
            let ts = date.and_utc().timestamp();
            DateTime::from_timestamp(ts - ts.rem_euclid(self.seconds), 0)
                .map(|d| d.naive_utc())
                .unwrap_or(*date)
        }

        fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime {
            date + Duration::seconds(self.seconds * step)
        }

        fn approx_days(&self) -> f64 {
            self.seconds as f64 / 86_400.0
        }
    }

    impl DateInterval for WeekInterval {
        fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime {
            let day = date.date();
            let days_from_sunday = day.weekday().num_days_from_sunday();
            let target_from_sunday = self.weekday.num_days_from_sunday();
            let days_to_subtract = (days_from_sunday + 7 - target_from_sunday) % 7;
            (day - Duration::days(days_to_subtract as i64))
                .and_hms_opt(0, 0, 0)
                .unwrap_or(*date)
        }

        fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime {
            date + Duration::weeks(step)
        }

        fn approx_days(&self) -> f64 {
            7.0
        }
    }

    impl MonthInterval {
        fn index(date: &NaiveDateTime) -> i64 {
            date.year() as i64 * 12 + date.month0() as i64
        }

        fn start_of(index: i64) -> Option<NaiveDateTime> {
            NaiveDate::from_ymd_opt(
                index.div_euclid(12) as i32,
                index.rem_euclid(12) as u32 + 1,
                1,
            )
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        }
    }

    impl DateInterval for MonthInterval {
        fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime {
            let index = Self::index(date);
            Self::start_of(index - index.rem_euclid(self.every)).unwrap_or(*date)
        }

        fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime {
            Self::start_of(Self::index(&date) + step * self.every).unwrap_or(date)
        }

        fn approx_days(&self) -> f64 {
            self.every as f64 * DateUnit::Month.approx_days()
        }
    }

    impl DateInterval for YearInterval {
        fn floor(&self, date: &NaiveDateTime) -> NaiveDateTime {
            let year = date.year() - date.year().rem_euclid(self.every);
            NaiveDate::from_ymd_opt(year, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or(*date)
        }

        fn offset(&self, date: NaiveDateTime, step: i64) -> NaiveDateTime {
            NaiveDate::from_ymd_opt(date.year() + (step as i32) * self.every, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or(date)
        }

        fn approx_days(&self) -> f64 {
            self.every as f64 * DateUnit::Year.approx_days()
        }
    }

    pub fn seconds(n: i64) -> Box<dyn DateInterval> {
        Box::new(FixedInterval { seconds: n })
    }

    pub fn minutes(n: i64) -> Box<dyn DateInterval> {
        seconds(n * 60)
    }

    pub fn hours(n: i64) -> Box<dyn DateInterval> {
        seconds(n * 3_600)
    }

    pub fn days(n: i64) -> Box<dyn DateInterval> {
        seconds(n * 86_400)
    }

    pub fn week_sunday() -> Box<dyn DateInterval> {
        Box::new(WeekInterval {
            weekday: Weekday::Sun,
        })
    }

    pub fn months(n: i64) -> Box<dyn DateInterval> {
        Box::new(MonthInterval { every: n.max(1) })
    }

    pub fn years(n: i32) -> Box<dyn DateInterval> {
        Box::new(YearInterval { every: n.max(1) })
    }

    /// Candidate tick intervals from finest to coarsest
    pub fn standard() -> Vec<Box<dyn DateInterval>> {
        vec![
            seconds(1),
            seconds(5),
            seconds(15),
            seconds(30),
            minutes(1),
            minutes(5),
            minutes(15),
            minutes(30),
            hours(1),
            hours(3),
            hours(6),
            hours(12),
            days(1),
            days(2),
            week_sunday(),
            months(1),
            months(3),
            years(1),
        ]
    }
}

/// Calendar-aware domain and tick construction for date axes.
///
/// The domain is held in days since the epoch, matching date field statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct DateScale {
    domain_start: f64,
    domain_end: f64,
    unit: Option<DateUnit>,
}

impl DateScale {
    pub fn new(domain: (f64, f64)) -> Self {
        let (start, end) = if domain.0 <= domain.1 {
            domain
        } else {
            (domain.1, domain.0)
        };
        Self {
            domain_start: start,
            domain_end: end,
            unit: None,
        }
    }

    /// Granularity of the underlying data; ticks are never finer than this
    pub fn with_unit(mut self, unit: Option<DateUnit>) -> Self {
        self.unit = unit;
        self
    }

    pub fn get_domain(&self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Widen a single instant by one data unit on each side
    pub fn expand_degenerate(mut self) -> Self {
        if self.domain_start == self.domain_end {
            let half = self.unit.unwrap_or(DateUnit::Day).approx_days();
            self.domain_start -= half;
            self.domain_end += half;
        }
        self
    }

    pub fn pad(mut self, pad_fraction: [f64; 2]) -> Self {
        let span = self.domain_end - self.domain_start;
        self.domain_start -= pad_fraction[0] * span;
        self.domain_end += pad_fraction[1] * span;
        self
    }

    /// Choose the tick interval giving roughly `count` ticks over the domain
    pub fn tick_interval(&self, count: usize) -> Box<dyn DateInterval> {
        let span_days = self.domain_end - self.domain_start;
        let target = span_days / count.max(1) as f64;
        let finest = self.unit.map(|u| u.approx_days() * 0.99).unwrap_or(0.0);

        interval::standard()
            .into_iter()
            .filter(|i| i.approx_days() >= finest)
            .find(|i| i.approx_days() >= target)
            .unwrap_or_else(|| {
                let span_years = span_days / DateUnit::Year.approx_days();
                let every = array::tick_step(0.0, span_years, count.max(1) as f64)
                    .map(|s| s.ceil() as i32)
                    .unwrap_or(1);
                interval::years(every)
            })
    }

    /// Extends the domain outwards to interval boundaries
    pub fn nice(mut self, interval: &dyn DateInterval) -> Self {
        if let (Some(start), Some(end)) = (
            date_from_days(self.domain_start),
            date_from_days(self.domain_end),
        ) {
            self.domain_start = days_since_epoch(&interval.floor(&start));
            self.domain_end = days_since_epoch(&interval.ceil(&end));
        }
        self
    }

    /// Interval boundaries inside the domain, in days
    pub fn ticks(&self, interval: &dyn DateInterval) -> Vec<f64> {
        let (Some(start), Some(end)) = (
            date_from_days(self.domain_start),
            date_from_days(self.domain_end),
        ) else {
            return vec![];
        };

        let mut ticks = Vec::new();
        let mut tick = interval.ceil(&start);
        while tick <= end && ticks.len() < MAX_TICKS {
            ticks.push(days_since_epoch(&tick));
            let next = interval.offset(tick, 1);
            if next <= tick {
                break;
            }
            tick = next;
        }
        ticks
    }
}
