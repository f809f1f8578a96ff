use std::{fmt::Display, time::SystemTime};

use chrono::{DateTime, Local};

/// Header timestamp in local time, e.g. `Tue, 5 Mar 2024 09:07:03 +0100`.
pub struct HttpDate(pub DateTime<Local>);

impl HttpDate {
    pub fn now() -> Self {
        Self(Local::now())
    }
}

impl From<SystemTime> for HttpDate {
    fn from(time: SystemTime) -> Self {
        Self(DateTime::<Local>::from(time))
    }
}

impl Display for HttpDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%a, %-d %b %Y %H:%M:%S %z"))
    }
}

/// Listing timestamp in local time, e.g. `3/5/2024 09:07:03`.
pub struct ListingDate(pub DateTime<Local>);

impl From<SystemTime> for ListingDate {
    fn from(time: SystemTime) -> Self {
        Self(DateTime::<Local>::from(time))
    }
}

impl Display for ListingDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%-m/%-d/%Y %H:%M:%S"))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 5, 9, 7, 3).unwrap()
    }

    #[test]
    fn http_date_uses_unpadded_day() {
        let formatted = HttpDate(sample()).to_string();

        assert!(formatted.starts_with("Tue, 5 Mar 2024 09:07:03 "));
        // numeric zone offset such as +0100
        let zone = formatted.rsplit(' ').next().unwrap();
        assert_eq!(zone.len(), 5);
        assert!(zone.starts_with('+') || zone.starts_with('-'));
    }

    #[test]
    fn listing_date_pads_time_only() {
        assert_eq!(ListingDate(sample()).to_string(), "3/5/2024 09:07:03");

        let december = Local.with_ymd_and_hms(2023, 12, 25, 23, 59, 0).unwrap();
        assert_eq!(ListingDate(december).to_string(), "12/25/2023 23:59:00");
    }
}
