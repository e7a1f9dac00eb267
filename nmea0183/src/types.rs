use alloc::vec::Vec;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    constants::{KNOTS_TO_METERS_PER_SECOND, KPH_TO_METERS_PER_SECOND},
    sentence::Talker,
};

/// Represents a world position in signed decimal degrees, north and east positive.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Latitude in degrees
    pub lat: f64,

    /// Longitude in degrees
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity {
    /// m/s over the ground
    pub speed: f64,

    /// Heading in degrees
    pub heading: f64, // degrees
}

/// GGA fix quality indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FixQuality {
    Invalid,
    Gps,
    Dgps,
    Pps,
    RtkFixed,
    RtkFloat,
    Estimated,
    Manual,
    Simulation,
    Unknown(u8),
}

impl From<u8> for FixQuality {
    fn from(value: u8) -> Self {
        match value {
            0 => FixQuality::Invalid,
            1 => FixQuality::Gps,
            2 => FixQuality::Dgps,
            3 => FixQuality::Pps,
            4 => FixQuality::RtkFixed,
            5 => FixQuality::RtkFloat,
            6 => FixQuality::Estimated,
            7 => FixQuality::Manual,
            8 => FixQuality::Simulation,
            other => FixQuality::Unknown(other),
        }
    }
}

/// GLL/RMC status field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataStatus {
    /// `A`
    Valid,
    /// `V`
    Invalid,
}

impl DataStatus {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(DataStatus::Valid),
            'V' => Some(DataStatus::Invalid),
            _ => None,
        }
    }
}

/// Positioning mode indicator, NMEA 2.3 and later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModeIndicator {
    Autonomous,
    Differential,
    Estimated,
    RtkFloat,
    Manual,
    NotValid,
    Precise,
    RtkFixed,
    Simulator,
    Unknown(char),
}

impl From<char> for ModeIndicator {
    fn from(c: char) -> Self {
        match c {
            'A' => ModeIndicator::Autonomous,
            'D' => ModeIndicator::Differential,
            'E' => ModeIndicator::Estimated,
            'F' => ModeIndicator::RtkFloat,
            'M' => ModeIndicator::Manual,
            'N' => ModeIndicator::NotValid,
            'P' => ModeIndicator::Precise,
            'R' => ModeIndicator::RtkFixed,
            'S' => ModeIndicator::Simulator,
            other => ModeIndicator::Unknown(other),
        }
    }
}

/// Sentence a [`GnssFix`] was decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FixSource {
    Gga,
    Gll,
    Rmc,
}

/// Position report decoded from GGA, GLL or RMC.
///
/// Fields a sentence does not carry, or carries empty, are `None`. A result
/// is produced even when the receiver reports no fix, use [`GnssFix::has_fix`]
/// before trusting the coordinates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GnssFix {
    pub talker: Talker,
    pub source: FixSource,
    /// UTC time of the fix
    pub time: Option<NaiveTime>,
    /// UTC date, RMC only
    pub date: Option<NaiveDate>,
    pub position: Option<Position>,
    /// Altitude above mean sea level in meters, GGA only
    pub altitude: Option<f64>,
    /// Geoid separation in meters, GGA only
    pub geoid_separation: Option<f64>,
    pub quality: Option<FixQuality>,
    pub status: Option<DataStatus>,
    pub mode: Option<ModeIndicator>,
    pub satellites_used: Option<u8>,
    pub hdop: Option<f64>,
    /// Ground speed in m/s
    pub speed: Option<f64>,
    /// Course over ground in degrees from true north
    pub course: Option<f64>,
    /// Magnetic variation in degrees, west negative
    pub magnetic_variation: Option<f64>,
    /// Age of differential corrections in seconds
    pub dgps_age: Option<f64>,
    pub dgps_station: Option<u16>,
}

impl GnssFix {
    pub fn new(talker: Talker, source: FixSource) -> Self {
        Self {
            talker,
            source,
            time: None,
            date: None,
            position: None,
            altitude: None,
            geoid_separation: None,
            quality: None,
            status: None,
            mode: None,
            satellites_used: None,
            hdop: None,
            speed: None,
            course: None,
            magnetic_variation: None,
            dgps_age: None,
            dgps_station: None,
        }
    }

    /// Whether the receiver reported a usable position
    pub fn has_fix(&self) -> bool {
        self.position.is_some()
            && !matches!(self.quality, Some(FixQuality::Invalid))
            && !matches!(self.status, Some(DataStatus::Invalid))
            && !matches!(self.mode, Some(ModeIndicator::NotValid))
    }

    /// Date and time combined, available for RMC
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        Some(self.date?.and_time(self.time?))
    }

    pub fn speed_knots(&self) -> Option<f64> {
        self.speed.map(|speed| speed / KNOTS_TO_METERS_PER_SECOND)
    }

    pub fn velocity(&self) -> Option<Velocity> {
        Some(Velocity {
            speed: self.speed?,
            heading: self.course?,
        })
    }
}

/// GSA fix selection mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionMode {
    Manual,
    Automatic,
}

impl SelectionMode {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'M' => Some(SelectionMode::Manual),
            'A' => Some(SelectionMode::Automatic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FixType {
    NoFix,
    Fix2D,
    Fix3D,
}

impl FixType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(FixType::NoFix),
            2 => Some(FixType::Fix2D),
            3 => Some(FixType::Fix3D),
            _ => None,
        }
    }
}

/// Satellites used in the navigation solution (GSA)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSatellites {
    pub talker: Talker,
    pub selection_mode: Option<SelectionMode>,
    pub fix_type: Option<FixType>,
    /// PRNs of the satellites used, empty slots skipped
    pub prns: Vec<u16>,
    pub pdop: Option<f64>,
    pub hdop: Option<f64>,
    pub vdop: Option<f64>,
    /// GNSS system ID, NMEA 4.11 only
    pub system_id: Option<u8>,
}

/// One satellite of a GSV report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Satellite {
    pub prn: u16,
    /// Elevation in degrees, -90 to 90
    pub elevation: Option<i16>,
    /// Azimuth in degrees from true north
    pub azimuth: Option<u16>,
    /// Signal to noise ratio in dB-Hz, absent when not tracking
    pub snr: Option<u8>,
}

/// Complete GSV cycle, all pages accumulated
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SatellitesInView {
    pub talker: Talker,
    /// Total announced by the receiver, may differ from `satellites.len()`
    pub in_view: Option<u16>,
    pub satellites: Vec<Satellite>,
}

/// Course and speed over ground (VTG)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CourseOverGround {
    pub talker: Talker,
    /// Degrees from true north
    pub true_course: Option<f64>,
    /// Degrees from magnetic north
    pub magnetic_course: Option<f64>,
    pub speed_knots: Option<f64>,
    pub speed_kph: Option<f64>,
    pub mode: Option<ModeIndicator>,
}

impl CourseOverGround {
    /// Ground speed in m/s, from knots when present and km/h otherwise
    pub fn speed(&self) -> Option<f64> {
        self.speed_knots
            .map(|knots| knots * KNOTS_TO_METERS_PER_SECOND)
            .or_else(|| self.speed_kph.map(|kph| kph * KPH_TO_METERS_PER_SECOND))
    }
}

/// Any decoded result
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Message {
    Gga(GnssFix),
    Gll(GnssFix),
    Rmc(GnssFix),
    Gsa(ActiveSatellites),
    Gsv(SatellitesInView),
    Vtg(CourseOverGround),
}

impl Message {
    pub fn sentence_id(&self) -> &'static str {
        match self {
            Message::Gga(_) => "GGA",
            Message::Gll(_) => "GLL",
            Message::Rmc(_) => "RMC",
            Message::Gsa(_) => "GSA",
            Message::Gsv(_) => "GSV",
            Message::Vtg(_) => "VTG",
        }
    }

    pub fn talker(&self) -> &Talker {
        match self {
            Message::Gga(fix) | Message::Gll(fix) | Message::Rmc(fix) => &fix.talker,
            Message::Gsa(active) => &active.talker,
            Message::Gsv(view) => &view.talker,
            Message::Vtg(course) => &course.talker,
        }
    }

    /// Position fix, for GGA, GLL and RMC
    pub fn fix(&self) -> Option<&GnssFix> {
        match self {
            Message::Gga(fix) | Message::Gll(fix) | Message::Rmc(fix) => Some(fix),
            _ => None,
        }
    }
}
