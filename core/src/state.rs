//! The authoritative workout collection and its synchronization with storage.

use log::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::factory::WorkoutFactory;
use crate::models::{Coordinates, Workout, ID_MODULUS};
use crate::presenter::Presenter;
use crate::storage::{load_workouts, save_workouts, KeyValueStore};
use crate::telemetry::Metrics;
use crate::types::{FormPrefill, RawWorkout};

/// Owns the ordered workout collection (insertion order is display order)
/// and mediates every mutation of it.
///
/// Structural mutations (remove, reset) persist first and then re-render
/// everything from what was persisted.
pub struct WorkoutStore<S> {
    storage: S,
    key: String,
    factory: WorkoutFactory,
    workouts: Vec<Workout>,
    map_enabled: bool,
    metrics: Metrics,
}

impl<S: KeyValueStore> WorkoutStore<S> {
    /// Creates an empty store. Call [`initialize`](Self::initialize) to load
    /// what is persisted.
    pub fn new(storage: S, config: &Config) -> Self {
        Self {
            storage,
            key: config.storage_key.clone(),
            factory: WorkoutFactory::default(),
            workouts: Vec::new(),
            map_enabled: false,
            metrics: Metrics::new(),
        }
    }

    pub fn with_factory(mut self, factory: WorkoutFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Loads the persisted collection and renders each workout in stored
    /// order. Never fails: absent or unreadable data leaves the collection
    /// empty.
    pub fn initialize(&mut self, presenter: &mut dyn Presenter) {
        self.workouts = load_workouts(&self.storage, &self.key, &self.metrics);
        info!("initialized with {} workouts", self.workouts.len());

        for w in &self.workouts {
            presenter.render_list_entry(w);
            if self.map_enabled {
                presenter.render_marker(w);
            }
        }
    }

    /// Validates the form input, appends the new workout, persists the
    /// collection and renders the workout.
    ///
    /// On failure the collection and storage are left as they were and the
    /// message is shown through the presenter.
    pub fn add_workout(
        &mut self,
        coords: Coordinates,
        raw: &RawWorkout,
        presenter: &mut dyn Presenter,
    ) -> Result<&Workout> {
        let mut workout = match self.factory.create(coords, raw) {
            Ok(w) => w,
            Err(e) => {
                self.metrics.validation_failed();
                warn!("rejected {:?}: {}", raw, e);
                presenter.show_error(&e.to_string());
                return Err(e.into());
            }
        };

        let id = self.free_id(workout.id());
        if id != workout.id() {
            debug!("id {} taken, using {}", workout.id(), id);
            workout.set_id(id);
        }

        self.workouts.push(workout);
        if let Err(e) = save_workouts(&mut self.storage, &self.key, &self.workouts) {
            self.workouts.pop();
            self.metrics.storage_error();
            presenter.show_error(&e.to_string());
            return Err(e.into());
        }

        let idx = self.workouts.len() - 1;
        let workout = &self.workouts[idx];
        self.metrics.workout_created(workout.variant());
        info!("added {} ({})", workout.id(), workout.description());

        if self.map_enabled {
            presenter.render_marker(workout);
        }
        presenter.render_list_entry(workout);
        Ok(workout)
    }

    /// Removes the workout with `id`, persists, and reloads from storage.
    /// Returns `false` (and changes nothing) when no workout has that id.
    pub fn remove_workout(&mut self, id: &str, presenter: &mut dyn Presenter) -> Result<bool> {
        let before = self.workouts.len();
        let remaining: Vec<Workout> = self
            .workouts
            .iter()
            .filter(|w| w.id() != id)
            .cloned()
            .collect();
        if remaining.len() == before {
            debug!("remove: no workout {}", id);
            return Ok(false);
        }

        if let Err(e) = save_workouts(&mut self.storage, &self.key, &remaining) {
            self.metrics.storage_error();
            presenter.show_error(&e.to_string());
            return Err(e.into());
        }
        self.metrics.workouts_removed((before - remaining.len()) as u64);
        info!("removed {}", id);

        self.reload(presenter);
        Ok(true)
    }

    pub fn find_by_id(&self, id: &str) -> Result<&Workout> {
        self.workouts
            .iter()
            .find(|w| w.id() == id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    /// Deletes the persisted collection and reloads, leaving it empty.
    pub fn reset(&mut self, presenter: &mut dyn Presenter) -> Result<()> {
        if let Err(e) = self.storage.remove(&self.key) {
            self.metrics.storage_error();
            presenter.show_error(&e.to_string());
            return Err(e.into());
        }
        info!("reset: removed '{}'", self.key);
        self.reload(presenter);
        Ok(())
    }

    /// Bumps the interaction counter. In memory only; the count is lost on
    /// reload.
    pub fn record_interaction(&mut self, id: &str) -> Result<u32> {
        let w = self
            .workouts
            .iter_mut()
            .find(|w| w.id() == id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        self.metrics.interaction();
        Ok(w.click())
    }

    /// Hides the workout's list entry and reopens the form with its values.
    ///
    /// The next submission is an ordinary [`add_workout`](Self::add_workout):
    /// the edited workout is appended next to the original, which stays in
    /// storage and reappears on the next reload.
    pub fn begin_edit(&mut self, id: &str, presenter: &mut dyn Presenter) -> Result<FormPrefill> {
        let prefill = FormPrefill::from(self.find_by_id(id)?);
        presenter.hide_list_entry(id);
        presenter.show_form_with_values(&prefill);
        debug!("editing {}: {:?}", id, prefill);
        Ok(prefill)
    }

    /// Called once the map exists: renders a marker for every workout, and
    /// for every workout added or reloaded afterwards.
    pub fn enable_map(&mut self, presenter: &mut dyn Presenter) {
        self.map_enabled = true;
        for w in &self.workouts {
            presenter.render_marker(w);
        }
    }

    /// Clears everything rendered and re-runs [`initialize`](Self::initialize).
    pub fn reload(&mut self, presenter: &mut dyn Presenter) {
        presenter.clear();
        self.initialize(presenter);
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn is_map_enabled(&self) -> bool {
        self.map_enabled
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// `candidate` if unused, otherwise the next free 10-digit id after it.
    fn free_id(&self, candidate: &str) -> String {
        let taken = |id: &str| self.workouts.iter().any(|w| w.id() == id);
        if !taken(candidate) {
            return candidate.to_string();
        }
        let mut n: i64 = candidate.parse().unwrap_or(0);
        loop {
            n = (n + 1).rem_euclid(ID_MODULUS);
            let id = format!("{n:010}");
            if !taken(&id) {
                return id;
            }
        }
    }
}

impl<S> std::fmt::Debug for WorkoutStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkoutStore")
            .field("key", &self.key)
            .field("workouts", &self.workouts.len())
            .field("map_enabled", &self.map_enabled)
            .finish()
    }
}
