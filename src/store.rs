use hifitime::prelude::Duration;
use serde::Serialize;

use crate::nmea::{gga::Position, vtg::Velocity};

/// Latest navigation solution
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
pub struct NavigationRecord {
    /// UTC time of the fix, as HHMMSS.sss
    pub utc_time: f64,

    /// Decimal degrees, positive north
    pub latitude: f64,

    /// Decimal degrees, positive east
    pub longitude: f64,

    /// Meters above mean sea level
    pub altitude: i32,

    pub num_satellites: u8,

    /// GGA fix indicator
    pub fix_quality: u8,

    /// True course over ground, in degrees
    pub heading: u16,

    /// km/h
    pub ground_speed: f64,
}

impl NavigationRecord {
    /// Converts [NavigationRecord::utc_time] to a time of day
    pub fn time_of_day(&self) -> Duration {
        let hhmmss = self.utc_time.trunc() as u32;
        let (hours, minutes, seconds) = (hhmmss / 10_000, (hhmmss / 100) % 100, hhmmss % 100);

        let seconds = hours * 3_600 + minutes * 60 + seconds;
        Duration::from_seconds(f64::from(seconds) + self.utc_time.fract())
    }
}

impl std::fmt::Display for NavigationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "utc={:010.3} lat={:.6} lon={:.6} alt={}m sv={} fix={} hdg={} speed={:.2}km/h",
            self.utc_time,
            self.latitude,
            self.longitude,
            self.altitude,
            self.num_satellites,
            self.fix_quality,
            self.heading,
            self.ground_speed,
        )
    }
}

/// [NavigationStore] holds the published [NavigationRecord]
/// and whether it was updated since last observed.
///
/// Position and velocity fields are each updated as a group,
/// in a single `&mut self` call, so a snapshot never mixes halves of an update.
#[derive(Debug, Default)]
pub struct NavigationStore {
    record: NavigationRecord,
    available: bool,
}

impl NavigationStore {
    /// Returns a copy of the current record
    pub fn snapshot(&self) -> NavigationRecord {
        self.record
    }

    /// Returns true if the record was updated since the previous call
    pub fn consume_available(&mut self) -> bool {
        std::mem::take(&mut self.available)
    }

    /// Publishes a decoded GGA. Empty fields keep their previous value.
    pub fn apply_position(&mut self, position: &Position) {
        let record = &mut self.record;

        if let Some(utc_time) = position.utc_time {
            record.utc_time = utc_time;
        }
        if let Some(latitude) = position.latitude {
            record.latitude = latitude;
        }
        if let Some(longitude) = position.longitude {
            record.longitude = longitude;
        }
        if let Some(fix_quality) = position.fix_quality {
            record.fix_quality = fix_quality;
        }
        if let Some(num_satellites) = position.num_satellites {
            record.num_satellites = num_satellites;
        }
        if let Some(altitude) = position.altitude {
            record.altitude = altitude;
        }

        self.available = true;
    }

    /// Publishes a decoded VTG. Empty fields keep their previous value.
    pub fn apply_velocity(&mut self, velocity: &Velocity) {
        if let Some(heading) = velocity.heading {
            self.record.heading = heading;
        }
        if let Some(ground_speed) = velocity.ground_speed {
            self.record.ground_speed = ground_speed;
        }

        self.available = true;
    }
}
