use serde::{Deserialize, Serialize};

use crate::models::{Variant, Workout};

/// Untyped form submission, exactly as typed by the user.
/// `extra` is cadence for running and elevation gain for cycling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWorkout {
    pub variant: String,
    pub distance: String,
    pub duration: String,
    pub extra: String,
}

impl RawWorkout {
    pub fn new(
        variant: impl Into<String>,
        distance: impl Into<String>,
        duration: impl Into<String>,
        extra: impl Into<String>,
    ) -> Self {
        Self {
            variant: variant.into(),
            distance: distance.into(),
            duration: duration.into(),
            extra: extra.into(),
        }
    }
}

/// Values used to reopen the entry form when a workout is edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormPrefill {
    pub variant: Variant,
    pub distance: f64,
    pub duration: f64,
    pub cadence: Option<u32>,
    pub elevation_gain: Option<f64>,
}

impl FormPrefill {
    /// The prefill as a form submission, e.g. to resubmit it unchanged.
    pub fn to_raw(&self) -> RawWorkout {
        let extra = match self.variant {
            Variant::Running => self.cadence.map(|c| c.to_string()),
            Variant::Cycling => self.elevation_gain.map(|e| e.to_string()),
        };
        RawWorkout::new(
            self.variant.as_str(),
            self.distance.to_string(),
            self.duration.to_string(),
            extra.unwrap_or_default(),
        )
    }
}

impl From<&Workout> for FormPrefill {
    fn from(w: &Workout) -> Self {
        Self {
            variant: w.variant(),
            distance: w.distance(),
            duration: w.duration(),
            cadence: w.cadence(),
            elevation_gain: w.elevation_gain(),
        }
    }
}

/// What the user clicked on a rendered list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListAction {
    /// Click on the entry body: pan the map to the workout.
    Focus,
    Edit,
    Remove,
}
