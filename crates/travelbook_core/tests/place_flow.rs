mod common;

use common::{long_press_at, Harness, NavEvent};
use std::sync::Arc;
use travelbook_core::{
    AnnotationKind, Coordinate, DetailMode, DetailRoute, ListScreen, SqlitePlaceRepository,
};

fn list_for(harness: &Harness<SqlitePlaceRepository>) -> ListScreen<SqlitePlaceRepository> {
    ListScreen::new(
        Arc::clone(&harness.service),
        harness.channel.clone(),
        harness.navigator.clone(),
    )
}

#[test]
fn add_then_reopen_from_list() {
    let harness = Harness::in_memory();
    let mut list = list_for(&harness);
    list.load();
    list.appear();
    assert!(list.row_titles().is_empty());

    list.tap_add();
    let route = harness.navigator.last_route().expect("add should push detail");
    assert!(!route.is_view());

    let mut detail = harness.open_detail(route);
    detail.set_name("Home");
    detail.set_comment("Sweet home");
    assert!(detail.on_long_press(long_press_at(40.0, -75.0)));
    let saved_id = detail.save().unwrap();
    drop(detail);

    assert_eq!(list.row_titles(), vec!["Home"]);

    assert!(list.select_row(0));
    let route = harness.navigator.last_route().expect("row tap should push detail");
    assert_eq!(route, DetailRoute::view("Home", saved_id));

    let detail = harness.open_detail(route);
    assert!(matches!(detail.mode(), DetailMode::View(_)));
    assert_eq!(detail.name(), "Home");
    assert_eq!(detail.comment(), "Sweet home");
    let annotations = detail.map().annotations();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].coordinate, Coordinate::new(40.0, -75.0));
    assert_eq!(annotations[0].kind, AnnotationKind::Saved);
}

#[test]
fn saving_a_place_grows_the_visible_list_by_one() {
    let harness = Harness::in_memory();
    harness
        .service
        .create_place("Home", "Sweet home", Coordinate::new(40.0, -75.0))
        .unwrap();
    let mut list = list_for(&harness);
    list.load();
    list.appear();
    let before = list.rows().len();

    list.tap_add();
    let mut detail = harness.open_detail(DetailRoute::create());
    detail.set_name("Park");
    detail.set_comment("Nice view");
    detail.on_long_press(long_press_at(10.0, 20.0));
    detail.save().unwrap();

    assert_eq!(list.rows().len(), before + 1);
    assert_eq!(list.row_titles(), vec!["Home", "Park"]);
    assert_eq!(
        harness.navigator.events(),
        vec![NavEvent::PushDetail(DetailRoute::create()), NavEvent::Pop]
    );
}
