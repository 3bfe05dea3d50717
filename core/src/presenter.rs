//! Interface to the map/list UI, plus the text the UI shows for a workout.

use log::{debug, info, warn};

use crate::models::{Activity, Coordinates, Workout};
use crate::types::FormPrefill;

/// The rendering side of the application.
///
/// Implementations only read workouts during a call; they report workouts
/// back by id and never keep references.
pub trait Presenter {
    fn show_map(&mut self, center: Coordinates, zoom: u8);
    fn render_marker(&mut self, workout: &Workout);
    fn render_list_entry(&mut self, workout: &Workout);
    fn focus_record(&mut self, workout: &Workout, zoom: u8);
    fn show_form(&mut self);
    fn hide_form(&mut self);
    fn show_form_with_values(&mut self, prefill: &FormPrefill);
    fn hide_list_entry(&mut self, id: &str);
    /// Drop every rendered marker and list entry before a full re-render.
    fn clear(&mut self);
    fn show_error(&mut self, message: &str);
}

/// One value/unit row of a list entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

/// Marker popup text, e.g. "🚴 Cycling on April 14".
pub fn popup_content(workout: &Workout) -> String {
    format!("{} {}", workout.variant().icon(), workout.description())
}

/// CSS class of the marker popup.
pub fn popup_class(workout: &Workout) -> String {
    format!("{}-popup", workout.variant())
}

/// Rows of a list entry: distance, duration, derived metric, extra.
/// Pace and speed are shown with one decimal.
pub fn list_details(workout: &Workout) -> Vec<Detail> {
    let mut rows = vec![
        Detail {
            icon: workout.variant().icon(),
            value: workout.distance().to_string(),
            unit: "km",
        },
        Detail {
            icon: "⏱",
            value: workout.duration().to_string(),
            unit: "min",
        },
    ];
    match *workout.activity() {
        Activity::Running { cadence, pace } => {
            rows.push(Detail {
                icon: "⚡️",
                value: format!("{pace:.1}"),
                unit: "min/km",
            });
            rows.push(Detail {
                icon: "🦶🏼",
                value: cadence.to_string(),
                unit: "spm",
            });
        }
        Activity::Cycling {
            elevation_gain,
            speed,
        } => {
            rows.push(Detail {
                icon: "⚡️",
                value: format!("{speed:.1}"),
                unit: "km/h",
            });
            rows.push(Detail {
                icon: "⛰",
                value: elevation_gain.to_string(),
                unit: "m",
            });
        }
    }
    rows
}

/// Presenter that writes everything to the `log` facade.
#[derive(Debug, Default)]
pub struct LogPresenter {
    form_visible: bool,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form_visible(&self) -> bool {
        self.form_visible
    }
}

impl Presenter for LogPresenter {
    fn show_map(&mut self, center: Coordinates, zoom: u8) {
        info!("map at [{:.4}, {:.4}] zoom {}", center.lat, center.lng, zoom);
    }

    fn render_marker(&mut self, workout: &Workout) {
        let c = workout.coords();
        info!(
            "marker [{:.4}, {:.4}] ({}) {}",
            c.lat,
            c.lng,
            popup_class(workout),
            popup_content(workout)
        );
    }

    fn render_list_entry(&mut self, workout: &Workout) {
        let details: Vec<String> = list_details(workout)
            .into_iter()
            .map(|d| format!("{} {} {}", d.icon, d.value, d.unit))
            .collect();
        info!("[{}] {} | {}", workout.id(), workout.description(), details.join(" | "));
    }

    fn focus_record(&mut self, workout: &Workout, zoom: u8) {
        let c = workout.coords();
        debug!("focus {} at [{:.4}, {:.4}] zoom {}", workout.id(), c.lat, c.lng, zoom);
    }

    fn show_form(&mut self) {
        self.form_visible = true;
        debug!("form shown");
    }

    fn hide_form(&mut self) {
        self.form_visible = false;
        debug!("form hidden");
    }

    fn show_form_with_values(&mut self, prefill: &FormPrefill) {
        self.form_visible = true;
        debug!("form shown with {:?}", prefill);
    }

    fn hide_list_entry(&mut self, id: &str) {
        debug!("list entry {} hidden", id);
    }

    fn clear(&mut self) {
        debug!("cleared rendered workouts");
    }

    fn show_error(&mut self, message: &str) {
        warn!("{}", message);
    }
}
