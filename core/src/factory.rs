use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::metrics::is_positive;
use crate::models::{id_from_timestamp, Coordinates, Variant, Workout};
use crate::types::RawWorkout;

/// Source of creation timestamps.
pub type Clock = fn() -> DateTime<Utc>;

/// Turns raw form strings into a validated [`Workout`].
///
/// Has no side effects: it never touches the collection or storage.
#[derive(Debug, Clone, Copy)]
pub struct WorkoutFactory {
    clock: Clock,
}

impl Default for WorkoutFactory {
    fn default() -> Self {
        Self { clock: Utc::now }
    }
}

impl WorkoutFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self { clock }
    }

    pub fn create(&self, coords: Coordinates, raw: &RawWorkout) -> Result<Workout, ValidationError> {
        let variant: Variant = raw.variant.parse()?;

        // 1) everything must be a finite number
        let distance = coerce("distance", &raw.distance)?;
        let duration = coerce("duration", &raw.duration)?;
        let extra_field = match variant {
            Variant::Running => "cadence",
            Variant::Cycling => "elevationGain",
        };
        let extra = coerce(extra_field, &raw.extra)?;

        // 2) positivity; elevation gain is exempt
        require_positive("distance", distance)?;
        require_positive("duration", duration)?;

        let created_at = (self.clock)();
        let id = id_from_timestamp(created_at);

        match variant {
            Variant::Running => {
                require_positive("cadence", extra)?;
                let cadence = whole_number("cadence", extra)?;
                Workout::running(id, created_at, coords, distance, duration, cadence)
            }
            Variant::Cycling => Workout::cycling(id, created_at, coords, distance, duration, extra),
        }
    }
}

/// Form-field coercion: surrounding whitespace is ignored and an empty field
/// counts as zero.
fn coerce(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::NotANumber { field }),
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if is_positive(value) {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field })
    }
}

fn whole_number(field: &'static str, value: f64) -> Result<u32, ValidationError> {
    if value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(ValidationError::NotWholeNumber { field });
    }
    Ok(value as u32)
}
