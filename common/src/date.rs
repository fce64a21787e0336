//! Calendar [`Date`] definitions.

#[cfg(feature = "postgres")]
use std::error::Error as StdError;
use std::{fmt, str::FromStr};

use derive_more::{Display, Error};
#[cfg(feature = "postgres")]
use postgres_types::{
    accepts, private::BytesMut, to_sql_checked, FromSql, IsNull, ToSql, Type,
};
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Month,
};

/// `YYYY-MM-DD` format of a [`Date`].
const FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]");

/// Calendar date without a time zone.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Returns the current [`Date`] in UTC.
    #[must_use]
    pub fn today() -> Self {
        Self(time::OffsetDateTime::now_utc().date())
    }

    /// Creates a new [`Date`] from the provided calendar components.
    ///
    /// [`None`] is returned if the components don't form a valid date.
    #[must_use]
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = Month::try_from(month).ok()?;
        time::Date::from_calendar_date(year, month, day).ok().map(Self)
    }

    /// Returns the number of whole days from this [`Date`] until the `other`
    /// one.
    ///
    /// The result is negative if `other` precedes this [`Date`].
    #[must_use]
    pub fn days_until(self, other: Self) -> i64 {
        (other.0 - self.0).whole_days()
    }

    /// Returns the [`Date`] following this one by the provided number of
    /// `days`.
    ///
    /// [`None`] is returned on calendar overflow.
    #[must_use]
    pub fn plus_days(self, days: i64) -> Option<Self> {
        self.0
            .checked_add(time::Duration::days(days))
            .map(Self)
    }
}

impl From<time::Date> for Date {
    fn from(date: time::Date) -> Self {
        Self(date)
    }
}

impl From<Date> for time::Date {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.format(FORMAT).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `[year]` tolerates a leading sign.
        if !s.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(ParseError::SignedYear);
        }
        time::Date::parse(s, FORMAT)
            .map(Self)
            .map_err(ParseError::Format)
    }
}

/// Error of parsing a [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// String is not a valid `YYYY-MM-DD` calendar date.
    #[display("expected `YYYY-MM-DD` calendar date: {_0}")]
    Format(time::error::Parse),

    /// Year is prefixed with a sign.
    #[display("expected `YYYY-MM-DD` calendar date: signed year")]
    SignedYear,
}

#[cfg(feature = "postgres")]
impl FromSql<'_> for Date {
    accepts!(DATE);

    fn from_sql(
        ty: &Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn StdError + Sync + Send>> {
        time::Date::from_sql(ty, raw).map(Self)
    }
}

#[cfg(feature = "postgres")]
impl ToSql for Date {
    accepts!(DATE);
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        self.0.to_sql(ty, w)
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Calendar date in a `YYYY-MM-DD` format.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Date = super::Date;

    impl Date {
        fn to_output<S: ScalarValue>(d: &Date) -> Value<S> {
            Value::scalar(d.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Date` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Date` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::Date;

    #[test]
    fn from_str() {
        assert_eq!(
            Date::from_str("2024-01-04").unwrap(),
            Date::from_ymd(2024, 1, 4).unwrap(),
        );
        assert_eq!(
            Date::from_str("2024-02-29").unwrap(),
            Date::from_ymd(2024, 2, 29).unwrap(),
        );

        assert!(Date::from_str("2023-02-29").is_err());
        assert!(Date::from_str("2024-1-04").is_err());
        assert!(Date::from_str("2024-13-01").is_err());
        assert!(Date::from_str("20240104").is_err());
        assert!(Date::from_str("2024-01-04T").is_err());
        assert!(Date::from_str("").is_err());
    }

    #[test]
    fn rejects_signed_components() {
        for signed in [
            "+999-01-01",
            "+2024-01-04",
            "-2024-01-04",
            "2024-+1-04",
            "2024-01-+4",
            "2024--1-04",
        ] {
            assert!(Date::from_str(signed).is_err(), "`{signed}` is parsed");
        }
    }

    #[test]
    fn round_trips_through_string() {
        for date in ["0987-12-31", "2024-02-29", "2024-01-04"] {
            assert_eq!(Date::from_str(date).unwrap().to_string(), date);
        }
    }

    #[test]
    fn to_string() {
        assert_eq!(
            Date::from_ymd(2024, 1, 4).unwrap().to_string(),
            "2024-01-04",
        );
        assert_eq!(
            Date::from_ymd(987, 12, 31).unwrap().to_string(),
            "0987-12-31",
        );
    }

    #[test]
    fn days_until() {
        let check_in = Date::from_ymd(2024, 1, 1).unwrap();
        let check_out = Date::from_ymd(2024, 1, 4).unwrap();

        assert_eq!(check_in.days_until(check_out), 3);
        assert_eq!(check_out.days_until(check_in), -3);
        assert_eq!(check_in.days_until(check_in), 0);
        assert_eq!(
            Date::from_ymd(2023, 12, 31)
                .unwrap()
                .days_until(Date::from_ymd(2024, 3, 1).unwrap()),
            61,
        );
    }

    #[test]
    fn plus_days() {
        assert_eq!(
            Date::from_ymd(2024, 2, 28).unwrap().plus_days(2),
            Date::from_ymd(2024, 3, 1),
        );
        assert_eq!(
            Date::from_ymd(2024, 1, 1).unwrap().plus_days(-1),
            Date::from_ymd(2023, 12, 31),
        );
    }
}
