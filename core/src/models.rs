use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::metrics::{is_positive, pace, speed};

/// Map position, persisted as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.lat, c.lng]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Running,
    Cycling,
}

impl Variant {
    pub fn label(self) -> &'static str {
        match self {
            Variant::Running => "Running",
            Variant::Cycling => "Cycling",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Variant::Running => "🏃‍♂️",
            Variant::Cycling => "🚴",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Running => "running",
            Variant::Cycling => "cycling",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(Variant::Running),
            "cycling" => Ok(Variant::Cycling),
            other => Err(ValidationError::UnknownVariant(other.to_string())),
        }
    }
}

/// Variant-specific attributes together with the derived metric.
/// Flattened into the record on disk, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Activity {
    Running {
        /// steps/min
        cadence: u32,
        /// min/km
        #[serde(default, deserialize_with = "metric_or_zero")]
        pace: f64,
    },
    Cycling {
        /// meters, may be negative
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        /// km/h
        #[serde(default, deserialize_with = "metric_or_zero")]
        speed: f64,
    },
}

impl Activity {
    pub fn variant(&self) -> Variant {
        match self {
            Activity::Running { .. } => Variant::Running,
            Activity::Cycling { .. } => Variant::Cycling,
        }
    }
}

/// A single logged workout.
///
/// The derived metric and `description` are computed once by the
/// constructors. `clicks` lives in memory only and is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    id: String,
    #[serde(rename = "date")]
    created_at: DateTime<Utc>,
    coords: Coordinates,
    /// km
    distance: f64,
    /// min
    duration: f64,
    description: String,
    #[serde(flatten)]
    activity: Activity,
    #[serde(skip)]
    clicks: u32,
}

impl Workout {
    pub fn running(
        id: impl Into<String>,
        created_at: DateTime<Utc>,
        coords: Coordinates,
        distance: f64,
        duration: f64,
        cadence: u32,
    ) -> Result<Self, ValidationError> {
        check_distance_duration(distance, duration)?;
        if cadence == 0 {
            return Err(ValidationError::NotPositive { field: "cadence" });
        }
        let pace = finite_metric("pace", pace(duration, distance))?;
        Ok(Self::build(
            id.into(),
            created_at,
            coords,
            distance,
            duration,
            Activity::Running { cadence, pace },
        ))
    }

    pub fn cycling(
        id: impl Into<String>,
        created_at: DateTime<Utc>,
        coords: Coordinates,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Result<Self, ValidationError> {
        check_distance_duration(distance, duration)?;
        // elevation gain may be zero or negative (downhill)
        if !elevation_gain.is_finite() {
            return Err(ValidationError::NotANumber {
                field: "elevationGain",
            });
        }
        let speed = finite_metric("speed", speed(distance, duration))?;
        Ok(Self::build(
            id.into(),
            created_at,
            coords,
            distance,
            duration,
            Activity::Cycling {
                elevation_gain,
                speed,
            },
        ))
    }

    fn build(
        id: String,
        created_at: DateTime<Utc>,
        coords: Coordinates,
        distance: f64,
        duration: f64,
        activity: Activity,
    ) -> Self {
        let description = describe(activity.variant(), created_at);
        Self {
            id,
            created_at,
            coords,
            distance,
            duration,
            description,
            activity,
            clicks: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coords(&self) -> Coordinates {
        self.coords
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn variant(&self) -> Variant {
        self.activity.variant()
    }

    pub fn cadence(&self) -> Option<u32> {
        match self.activity {
            Activity::Running { cadence, .. } => Some(cadence),
            Activity::Cycling { .. } => None,
        }
    }

    pub fn elevation_gain(&self) -> Option<f64> {
        match self.activity {
            Activity::Cycling { elevation_gain, .. } => Some(elevation_gain),
            Activity::Running { .. } => None,
        }
    }

    pub fn pace(&self) -> Option<f64> {
        match self.activity {
            Activity::Running { pace, .. } => Some(pace),
            Activity::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.activity {
            Activity::Cycling { speed, .. } => Some(speed),
            Activity::Running { .. } => None,
        }
    }

    pub fn interaction_count(&self) -> u32 {
        self.clicks
    }

    pub fn click(&mut self) -> u32 {
        self.clicks += 1;
        self.clicks
    }

    pub(crate) fn set_id(&mut self, id: String) {
        self.id = id;
    }

    /// Recompute the derived metric after loading plain data from storage.
    /// The description is kept verbatim.
    pub(crate) fn rehydrate(mut self) -> Self {
        let (distance, duration) = (self.distance, self.duration);
        match &mut self.activity {
            Activity::Running { pace: p, .. } => *p = pace(duration, distance),
            Activity::Cycling { speed: s, .. } => *s = speed(distance, duration),
        }
        self.clicks = 0;
        self
    }
}

fn finite_metric(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange { field })
    }
}

/// Non-finite metrics serialize as `null`; they are recomputed on load anyway.
fn metric_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

fn check_distance_duration(distance: f64, duration: f64) -> Result<(), ValidationError> {
    for (field, value) in [("distance", distance), ("duration", duration)] {
        if !value.is_finite() {
            return Err(ValidationError::NotANumber { field });
        }
        if !is_positive(value) {
            return Err(ValidationError::NotPositive { field });
        }
    }
    Ok(())
}

/// "Running on April 14", in local time.
pub fn describe(variant: Variant, created_at: DateTime<Utc>) -> String {
    let local = created_at.with_timezone(&Local);
    format!("{} on {}", variant.label(), local.format("%B %-d"))
}

/// Last 10 digits of the epoch-millisecond timestamp.
pub fn id_from_timestamp(ts: DateTime<Utc>) -> String {
    format!("{:010}", ts.timestamp_millis().rem_euclid(ID_MODULUS))
}

pub(crate) const ID_MODULUS: i64 = 10_000_000_000;
