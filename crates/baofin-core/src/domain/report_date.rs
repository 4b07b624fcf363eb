use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::ValidationError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar date in strict `YYYY-MM-DD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportDate(Date);

impl ReportDate {
    pub fn today() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Self::parse_field("date", input)
    }

    /// Parse a date, naming `field` in the validation error.
    pub fn parse_field(field: &'static str, input: &str) -> Result<Self, ValidationError> {
        Date::parse(input, DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                field,
                value: input.to_owned(),
            })
    }

    pub const fn from_date(value: Date) -> Self {
        Self(value)
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    pub const fn year(self) -> i32 {
        self.0.year()
    }
}

impl Display for ReportDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl Serialize for ReportDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReportDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
