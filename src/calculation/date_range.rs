use jiff::Zoned;
use jiff::civil::Date;

use crate::error::Error;
use crate::prelude::*;

/// A closed range of calendar days, as the query endpoint expects it.
///
/// Both ends serialize as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: Date,
    pub to: Date,
}

impl DateRange {
    /// Yesterday, according to the local clock and time zone.
    pub fn yesterday() -> AppResult<Self> {
        // The billing day is the local one, not UTC.
        let today = Zoned::now().date();

        Self::yesterday_of(today)
    }

    /// The single day before `today`.
    ///
    /// Month, year and leap day rollovers are the calendar's job, not ours.
    pub fn yesterday_of(today: Date) -> AppResult<Self> {
        let day = today.yesterday().map_err(|_| Error::InvalidDate(today))?;

        Ok(DateRange { from: day, to: day })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn middle_of_the_month() {
        let range = DateRange::yesterday_of(date(2025, 6, 15)).unwrap();

        assert_eq!(range.from, date(2025, 6, 14));
        assert_eq!(range.from, range.to);
    }

    #[test]
    fn first_of_march_rolls_back_to_february() {
        let range = DateRange::yesterday_of(date(2025, 3, 1)).unwrap();

        assert_eq!(range.from, date(2025, 2, 28));
        assert_eq!(range.to, date(2025, 2, 28));
    }

    #[test]
    fn leap_years_keep_the_29th() {
        let range = DateRange::yesterday_of(date(2024, 3, 1)).unwrap();

        assert_eq!(range.from, date(2024, 2, 29));
    }

    #[test]
    fn new_year_rolls_back_to_december() {
        let range = DateRange::yesterday_of(date(2025, 1, 1)).unwrap();

        assert_eq!(range.from, date(2024, 12, 31));
    }

    #[test]
    fn serializes_as_plain_dates() {
        let range = DateRange::yesterday_of(date(2025, 1, 1)).unwrap();

        let json = serde_json::to_value(range).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "from": "2024-12-31", "to": "2024-12-31" })
        );
    }

    #[test]
    fn there_is_nothing_before_the_minimum_date() {
        assert!(DateRange::yesterday_of(Date::MIN).is_err());
    }

    #[test]
    fn local_yesterday_is_a_single_day() {
        let range = DateRange::yesterday().unwrap();

        assert_eq!(range.from, range.to);
    }
}
