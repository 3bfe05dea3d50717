//! Mapty core: workout records, form validation and the persistent workout
//! collection behind the map UI.

pub mod app;
pub mod config;
pub mod error;
pub mod factory;
pub mod geolocation;
pub mod metrics;
pub mod models;
pub mod presenter;
pub mod state;
pub mod storage;
pub mod telemetry;
pub mod types;

pub use app::App;
pub use config::Config;
pub use error::{AppError, GeolocationError, Result, StorageError, ValidationError};
pub use factory::WorkoutFactory;
pub use geolocation::{GeolocationProvider, StaticPositionProvider};
pub use models::{Activity, Coordinates, Variant, Workout};
pub use presenter::{LogPresenter, Presenter};
pub use state::WorkoutStore;
pub use storage::{load_workouts, save_workouts, FileStore, KeyValueStore, MemoryStore};
pub use types::{FormPrefill, ListAction, RawWorkout};
