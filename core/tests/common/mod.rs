#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use mapty_core::models::Coordinates;
use mapty_core::presenter::Presenter;
use mapty_core::types::FormPrefill;
use mapty_core::Workout;

/// Everything the core asked the UI to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ShowMap(Coordinates, u8),
    Marker(String),
    ListEntry(String),
    Focus(String, u8),
    ShowForm,
    HideForm,
    Prefill(FormPrefill),
    HideListEntry(String),
    Clear,
    Error(String),
}

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub calls: Vec<Call>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_entries(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::ListEntry(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn markers(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Marker(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Error(msg) => Some(msg.clone()),
                _ => None,
            })
            .collect()
    }

    /// Calls made after the most recent `clear()`.
    pub fn since_clear(&self) -> &[Call] {
        match self.calls.iter().rposition(|c| *c == Call::Clear) {
            Some(i) => &self.calls[i + 1..],
            None => &self.calls,
        }
    }

    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn show_map(&mut self, center: Coordinates, zoom: u8) {
        self.calls.push(Call::ShowMap(center, zoom));
    }

    fn render_marker(&mut self, workout: &Workout) {
        self.calls.push(Call::Marker(workout.id().to_string()));
    }

    fn render_list_entry(&mut self, workout: &Workout) {
        self.calls.push(Call::ListEntry(workout.id().to_string()));
    }

    fn focus_record(&mut self, workout: &Workout, zoom: u8) {
        self.calls.push(Call::Focus(workout.id().to_string(), zoom));
    }

    fn show_form(&mut self) {
        self.calls.push(Call::ShowForm);
    }

    fn hide_form(&mut self) {
        self.calls.push(Call::HideForm);
    }

    fn show_form_with_values(&mut self, prefill: &FormPrefill) {
        self.calls.push(Call::Prefill(prefill.clone()));
    }

    fn hide_list_entry(&mut self, id: &str) {
        self.calls.push(Call::HideListEntry(id.to_string()));
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn show_error(&mut self, message: &str) {
        self.calls.push(Call::Error(message.to_string()));
    }
}

pub fn coords() -> Coordinates {
    Coordinates::new(39.0, 12.0)
}

/// Always the same instant, so consecutive workouts collide on id.
pub fn frozen_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 14, 9, 30, 0).unwrap()
}
