use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Which calendar "today" is read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateBasis {
    /// Date portion of the current UTC timestamp
    #[default]
    Utc,
    /// Date in the host's local time zone
    Local,
}

/// Source of the date a forecast is anchored on.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Reads the wall clock on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    basis: DateBasis,
}

impl SystemClock {
    pub fn new(basis: DateBasis) -> Self {
        Self { basis }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        match self.basis {
            DateBasis::Utc => Utc::now().date_naive(),
            DateBasis::Local => Local::now().date_naive(),
        }
    }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utc_clock_matches_utc_date() {
        let before = Utc::now().date_naive();
        let today = SystemClock::new(DateBasis::Utc).today();
        let after = Utc::now().date_naive();
        assert!(today == before || today == after);
    }

    #[test]
    fn test_boxed_clock_delegates() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let clock: Box<dyn Clock> = Box::new(FixedClock(date));
        assert_eq!(clock.today(), date);
    }

    #[test]
    fn test_date_basis_deserializes_lowercase() {
        let basis: DateBasis = serde_json::from_str(r#""local""#).unwrap();
        assert_eq!(basis, DateBasis::Local);
        assert_eq!(DateBasis::default(), DateBasis::Utc);
    }
}
