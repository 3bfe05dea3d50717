mod common;

use mapty_core::factory::WorkoutFactory;
use mapty_core::storage::MemoryStore;
use mapty_core::types::{ListAction, RawWorkout};
use mapty_core::{
    App, AppError, Config, Coordinates, GeolocationError, StaticPositionProvider, Variant,
};

use common::{coords, frozen_clock, Call, RecordingPresenter};

type TestApp = App<MemoryStore, RecordingPresenter>;

fn app() -> TestApp {
    App::with_factory(
        Config::default(),
        MemoryStore::new(),
        RecordingPresenter::new(),
        WorkoutFactory::with_clock(frozen_clock),
    )
}

fn located_app() -> TestApp {
    let mut app = app();
    app.locate(&StaticPositionProvider::at(39.0, 12.0)).unwrap();
    app
}

fn submit(app: &mut TestApp, raw: RawWorkout) -> String {
    app.on_map_click(coords()).unwrap();
    app.on_form_submit(&raw).unwrap().id().to_string()
}

#[test]
fn geolocation_shows_map_at_configured_zoom() {
    let app = located_app();
    assert_eq!(app.position(), Some(Coordinates::new(39.0, 12.0)));
    assert_eq!(app.presenter().calls, vec![Call::ShowMap(coords(), 13)]);
    assert!(app.store().is_map_enabled());
}

#[test]
fn geolocation_failure_is_surfaced_and_map_stays_disabled() {
    let mut app = app();
    let err = app.locate(&StaticPositionProvider::unavailable()).unwrap_err();
    assert!(matches!(err, AppError::GeolocationUnavailable));
    assert_eq!(
        app.presenter().errors(),
        vec!["Could not get the current position".to_string()]
    );

    assert!(matches!(
        app.on_map_click(coords()),
        Err(AppError::GeolocationUnavailable)
    ));
    assert!(matches!(
        app.on_form_submit(&RawWorkout::new("running", "5", "25", "170")),
        Err(AppError::GeolocationUnavailable)
    ));
    assert!(app.store().is_empty());
}

#[test]
fn position_resolves_only_once() {
    let mut app = located_app();
    app.on_geolocation_ready(Coordinates::new(0.0, 0.0));
    assert_eq!(app.position(), Some(coords()));
    assert_eq!(
        app.presenter()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::ShowMap(..)))
            .count(),
        1
    );

    // a late failure does not undo a resolved position
    app.on_geolocation_failed(&GeolocationError::Unavailable("timeout".into()));
    assert!(app.on_map_click(coords()).is_ok());
}

#[test]
fn submit_requires_a_clicked_location() {
    let mut app = located_app();
    assert!(matches!(
        app.on_form_submit(&RawWorkout::new("running", "5", "25", "170")),
        Err(AppError::NoLocationSelected)
    ));
}

#[test]
fn map_click_then_submit_creates_renders_and_hides_form() {
    let mut app = located_app();
    app.presenter_mut().reset();

    app.on_map_click(Coordinates::new(40.0, 13.0)).unwrap();
    let workout = app
        .on_form_submit(&RawWorkout::new("cycling", "34", "78", "12"))
        .unwrap();
    assert_eq!(workout.coords(), Coordinates::new(40.0, 13.0));
    let id = workout.id().to_string();

    assert_eq!(
        app.presenter().calls,
        vec![
            Call::ShowForm,
            Call::Marker(id.clone()),
            Call::ListEntry(id),
            Call::HideForm,
        ]
    );
}

#[test]
fn invalid_submit_keeps_form_open() {
    let mut app = located_app();
    app.on_map_click(coords()).unwrap();
    app.presenter_mut().reset();

    let err = app
        .on_form_submit(&RawWorkout::new("running", "abc", "24", "189"))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(
        app.presenter().calls,
        vec![Call::Error("input must be a number".to_string())]
    );
    assert!(app.store().is_empty());
}

#[test]
fn focus_click_pans_and_counts() {
    let mut app = located_app();
    let id = submit(&mut app, RawWorkout::new("running", "5.2", "24", "189"));
    app.presenter_mut().reset();

    app.on_list_click(&id, ListAction::Focus).unwrap();
    app.on_list_click(&id, ListAction::Focus).unwrap();

    assert_eq!(
        app.presenter().calls,
        vec![Call::Focus(id.clone(), 13), Call::Focus(id.clone(), 13)]
    );
    assert_eq!(app.store().find_by_id(&id).unwrap().interaction_count(), 2);
    assert_eq!(app.store().metrics().interactions_total(), 2);
}

#[test]
fn remove_click_removes_and_rerenders_from_storage() {
    let mut app = located_app();
    let first = submit(&mut app, RawWorkout::new("running", "5.2", "24", "189"));
    let second = submit(&mut app, RawWorkout::new("cycling", "34", "78", "12"));

    app.on_list_click(&first, ListAction::Remove).unwrap();

    assert_eq!(app.store().len(), 1);
    assert_eq!(app.store().workouts()[0].id(), second);
    // list entry and marker come back for the survivor only
    assert_eq!(
        app.presenter().since_clear(),
        &[Call::ListEntry(second.clone()), Call::Marker(second)]
    );
}

#[test]
fn edit_click_then_submit_appends_new_workout() {
    let mut app = located_app();
    let original = submit(&mut app, RawWorkout::new("cycling", "34", "78", "12"));

    app.on_list_click(&original, ListAction::Edit).unwrap();
    assert!(app
        .presenter()
        .calls
        .contains(&Call::HideListEntry(original.clone())));

    let edited = app
        .on_form_submit(&RawWorkout::new("cycling", "35", "78", "12"))
        .unwrap()
        .id()
        .to_string();

    assert_ne!(edited, original);
    assert_eq!(app.store().len(), 2);
    assert_eq!(app.store().workouts()[1].distance(), 35.0);
    assert_eq!(app.store().workouts()[1].variant(), Variant::Cycling);
}

#[test]
fn unknown_id_clicks_are_not_found() {
    let mut app = located_app();
    for action in [ListAction::Focus, ListAction::Edit] {
        assert!(matches!(
            app.on_list_click("missing", action),
            Err(AppError::NotFound(_))
        ));
    }
    // removal of an unknown id is a silent no-op
    assert!(app.on_list_click("missing", ListAction::Remove).is_ok());
}

#[test]
fn reset_empties_everything() {
    let mut app = located_app();
    submit(&mut app, RawWorkout::new("running", "5.2", "24", "189"));
    submit(&mut app, RawWorkout::new("running", "10", "50", "170"));

    app.on_reset().unwrap();

    assert!(app.store().is_empty());
    assert_eq!(app.selected_location(), None);
    assert!(app.presenter().since_clear().is_empty());
}

#[test]
fn new_session_restores_list_then_markers_after_location() {
    let storage = {
        let mut app = located_app();
        submit(&mut app, RawWorkout::new("running", "5.2", "24", "189"));
        submit(&mut app, RawWorkout::new("cycling", "34", "78", "12"));
        app.store().storage().clone()
    };

    let mut app = App::new(Config::default(), storage, RecordingPresenter::new());
    let ids: Vec<String> = app.store().workouts().iter().map(|w| w.id().to_string()).collect();
    assert_eq!(app.presenter().list_entries(), ids);
    assert!(app.presenter().markers().is_empty());

    app.on_geolocation_ready(coords());
    assert_eq!(app.presenter().markers(), ids);
}
