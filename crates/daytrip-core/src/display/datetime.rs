//! Time, distance and duration display utilities.

use std::fmt;

use jiff::civil::Time;

/// A time of day as `HH:MM`.
pub struct ClockTime<'a>(pub &'a Time);

impl fmt::Display for ClockTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%H:%M"))
    }
}

/// A walking distance: metres below one kilometre, kilometres with one
/// decimal above.
pub struct Distance(pub u32);

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 1000 {
            write!(f, "{} m", self.0)
        } else {
            write!(f, "{:.1} km", f64::from(self.0) / 1000.0)
        }
    }
}

/// A travel time in whole minutes, rounded up, with hours when needed.
pub struct TravelTime(pub u32);

impl fmt::Display for TravelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.0.div_ceil(60);
        if minutes < 60 {
            write!(f, "{minutes} min")
        } else {
            write!(f, "{} h {:02} min", minutes / 60, minutes % 60)
        }
    }
}
