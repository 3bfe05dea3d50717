use crate::error::GeolocationError;
use crate::models::Coordinates;

/// Source of the device position. Queried once per session.
pub trait GeolocationProvider {
    fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Fixed position (or none), for embedding without a device and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticPositionProvider {
    pub position: Option<Coordinates>,
}

impl StaticPositionProvider {
    pub fn at(lat: f64, lng: f64) -> Self {
        Self {
            position: Some(Coordinates::new(lat, lng)),
        }
    }

    pub fn unavailable() -> Self {
        Self { position: None }
    }
}

impl GeolocationProvider for StaticPositionProvider {
    fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.position
            .ok_or_else(|| GeolocationError::Unavailable("no position configured".into()))
    }
}
