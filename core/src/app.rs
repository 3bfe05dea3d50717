//! Composition root: wires storage, the workout store and the presenter
//! together and turns UI events into store operations.

use log::{debug, warn};
use once_cell::unsync::OnceCell;

use crate::config::Config;
use crate::error::{AppError, GeolocationError, Result};
use crate::factory::WorkoutFactory;
use crate::geolocation::GeolocationProvider;
use crate::models::{Coordinates, Workout};
use crate::presenter::Presenter;
use crate::state::WorkoutStore;
use crate::storage::KeyValueStore;
use crate::types::{ListAction, RawWorkout};

/// One application session.
///
/// Map-dependent events are refused until the device position has resolved.
/// The position resolves at most once.
pub struct App<S, P> {
    config: Config,
    store: WorkoutStore<S>,
    presenter: P,
    position: OnceCell<Coordinates>,
    selected: Option<Coordinates>,
}

impl<S: KeyValueStore, P: Presenter> App<S, P> {
    /// Builds the store and loads the persisted workouts into the list.
    pub fn new(config: Config, storage: S, presenter: P) -> Self {
        Self::with_factory(config, storage, presenter, WorkoutFactory::default())
    }

    pub fn with_factory(config: Config, storage: S, mut presenter: P, factory: WorkoutFactory) -> Self {
        let mut store = WorkoutStore::new(storage, &config).with_factory(factory);
        store.initialize(&mut presenter);
        Self {
            config,
            store,
            presenter,
            position: OnceCell::new(),
            selected: None,
        }
    }

    /// Asks `provider` for the device position and dispatches the outcome.
    pub fn locate(&mut self, provider: &dyn GeolocationProvider) -> Result<Coordinates> {
        match provider.current_position() {
            Ok(coords) => {
                self.on_geolocation_ready(coords);
                Ok(coords)
            }
            Err(e) => {
                self.on_geolocation_failed(&e);
                Err(AppError::GeolocationUnavailable)
            }
        }
    }

    pub fn on_geolocation_ready(&mut self, coords: Coordinates) {
        if self.position.set(coords).is_err() {
            warn!("position already resolved, ignoring [{}, {}]", coords.lat, coords.lng);
            return;
        }
        self.presenter.show_map(coords, self.config.map_zoom);
        self.store.enable_map(&mut self.presenter);
    }

    pub fn on_geolocation_failed(&mut self, err: &GeolocationError) {
        if self.position.get().is_some() {
            debug!("late geolocation failure ignored: {}", err);
            return;
        }
        warn!("geolocation failed: {}", err);
        self.presenter
            .show_error(&AppError::GeolocationUnavailable.to_string());
    }

    /// Remembers the clicked spot and opens the entry form.
    pub fn on_map_click(&mut self, coords: Coordinates) -> Result<()> {
        self.require_map()?;
        self.selected = Some(coords);
        self.presenter.show_form();
        Ok(())
    }

    /// Creates a workout at the last clicked spot.
    pub fn on_form_submit(&mut self, raw: &RawWorkout) -> Result<&Workout> {
        self.require_map()?;
        let coords = self.selected.ok_or(AppError::NoLocationSelected)?;
        let workout = self.store.add_workout(coords, raw, &mut self.presenter)?;
        self.presenter.hide_form();
        Ok(workout)
    }

    pub fn on_list_click(&mut self, id: &str, action: ListAction) -> Result<()> {
        debug!("list click {} {:?}", id, action);
        match action {
            ListAction::Focus => {
                self.require_map()?;
                self.store.record_interaction(id)?;
                let workout = self.store.find_by_id(id)?;
                self.presenter.focus_record(workout, self.config.map_zoom);
            }
            ListAction::Edit => {
                self.store.begin_edit(id, &mut self.presenter)?;
            }
            ListAction::Remove => {
                self.store.remove_workout(id, &mut self.presenter)?;
            }
        }
        Ok(())
    }

    pub fn on_reset(&mut self) -> Result<()> {
        self.selected = None;
        self.store.reset(&mut self.presenter)
    }

    pub fn store(&self) -> &WorkoutStore<S> {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn position(&self) -> Option<Coordinates> {
        self.position.get().copied()
    }

    pub fn selected_location(&self) -> Option<Coordinates> {
        self.selected
    }

    fn require_map(&self) -> Result<()> {
        match self.position.get() {
            Some(_) => Ok(()),
            None => Err(AppError::GeolocationUnavailable),
        }
    }
}
