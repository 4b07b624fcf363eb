use std::fmt::{Display, Formatter};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use time::{Date, Month};

use crate::ValidationError;

const MAX_YEAR: i32 = 9999;

/// One fiscal quarter of one reporting year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FiscalQuarter {
    year: i32,
    quarter: u8,
}

impl FiscalQuarter {
    pub fn new(year: i32, quarter: u8) -> Result<Self, ValidationError> {
        if !(0..=MAX_YEAR).contains(&year) {
            return Err(ValidationError::InvalidYear {
                value: year.to_string(),
            });
        }
        if !(1..=4).contains(&quarter) {
            return Err(ValidationError::InvalidQuarter { value: quarter });
        }
        Ok(Self { year, quarter })
    }

    /// Parse a 4-digit year label together with a quarter number.
    pub fn from_label(year: &str, quarter: u8) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidYear {
            value: year.to_owned(),
        };
        if year.len() != 4 || !year.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        Self::new(year, quarter)
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn quarter(self) -> u8 {
        self.quarter
    }

    /// Year as the 4-digit string used by the remote provider.
    pub fn year_label(self) -> String {
        format!("{:04}", self.year)
    }

    /// First calendar day of the quarter.
    pub fn first_day(self) -> Result<Date, ValidationError> {
        let month = match self.quarter {
            1 => Month::January,
            2 => Month::April,
            3 => Month::July,
            _ => Month::October,
        };
        self.calendar_date(month, 1)
    }

    /// Last calendar day of the quarter (the report's statement date).
    pub fn last_day(self) -> Result<Date, ValidationError> {
        let (month, day) = match self.quarter {
            1 => (Month::March, 31),
            2 => (Month::June, 30),
            3 => (Month::September, 30),
            _ => (Month::December, 31),
        };
        self.calendar_date(month, day)
    }

    fn calendar_date(self, month: Month, day: u8) -> Result<Date, ValidationError> {
        Date::from_calendar_date(self.year, month, day).map_err(|_| ValidationError::InvalidYear {
            value: self.year.to_string(),
        })
    }
}

impl Display for FiscalQuarter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}Q{}", self.year, self.quarter)
    }
}

impl Serialize for FiscalQuarter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("FiscalQuarter", 2)?;
        state.serialize_field("year", &self.year_label())?;
        state.serialize_field("quarter", &self.quarter)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_quarter_boundaries() {
        let q3 = FiscalQuarter::new(2023, 3).expect("valid quarter");
        assert_eq!(q3.first_day().expect("in range").to_string(), "2023-07-01");
        assert_eq!(q3.last_day().expect("in range").to_string(), "2023-09-30");
        assert_eq!(q3.to_string(), "2023Q3");
    }

    #[test]
    fn validates_year_label_and_quarter() {
        assert!(FiscalQuarter::from_label("2023", 4).is_ok());
        assert!(matches!(
            FiscalQuarter::from_label("23", 1),
            Err(ValidationError::InvalidYear { .. })
        ));
        assert!(matches!(
            FiscalQuarter::from_label("20x3", 1),
            Err(ValidationError::InvalidYear { .. })
        ));
        assert_eq!(
            FiscalQuarter::new(2023, 5),
            Err(ValidationError::InvalidQuarter { value: 5 })
        );
    }

    #[test]
    fn serializes_year_as_label() {
        let value = serde_json::to_value(FiscalQuarter::new(987, 2).expect("valid"))
            .expect("serializes");
        assert_eq!(value, serde_json::json!({ "year": "0987", "quarter": 2 }));
    }
}
