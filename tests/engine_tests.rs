mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

use rideplan::api::{PlaceAPI, SessionAPI};
use rideplan::entities::{
    GeoPoint, RoutePreference, SessionOptions, SessionView, StopSource, WaypointKind,
};
use rideplan::engine::Engine;

use common::{MockMaps, BENGALURU, CHENNAI, MANDYA, MYSURU};

fn at(location: GeoPoint) -> StopSource {
    StopSource::Coordinates { location }
}

async fn bengaluru_to_mysuru(engine: &Engine) -> SessionView {
    engine
        .create_session(at(BENGALURU), at(MYSURU), SessionOptions::default())
        .await
        .unwrap()
}

#[tokio::test]
async fn session_starts_with_two_waypoints_and_a_route() {
    let (engine, maps) = common::engine();

    let session = bengaluru_to_mysuru(&engine).await;

    assert_eq!(session.waypoints.len(), 2);
    assert_eq!(session.waypoints[0].id, 1);
    assert_eq!(session.waypoints[0].kind, WaypointKind::Origin);
    assert_eq!(session.waypoints[1].id, 2);
    assert_eq!(session.waypoints[1].kind, WaypointKind::Destination);
    assert_eq!(session.waypoints[0].display_name, "Mocktown");
    assert_eq!(session.routes.len(), 2);
    assert_eq!(session.selected_route, Some(0));
    assert_eq!(session.segments.len(), 1);
    assert_eq!(maps.directions_calls(), 1);
    assert_eq!(engine.session_count().await, 1);
}

#[tokio::test]
async fn zero_seats_are_rejected() {
    let (engine, _) = common::engine();
    let options = SessionOptions {
        seats: 0,
        ..SessionOptions::default()
    };

    let err = engine
        .create_session(at(BENGALURU), at(MYSURU), options)
        .await
        .unwrap_err();

    assert_eq!(err.code, 101);
    assert_eq!(err.message, "seat count must be at least 1");
}

#[tokio::test]
async fn bad_rate_is_rejected_before_geocoding() {
    let (engine, maps) = common::engine();
    let options = SessionOptions {
        rate_per_km: Some(-3.0),
        ..SessionOptions::default()
    };

    let err = engine
        .create_session(at(BENGALURU), at(MYSURU), options)
        .await
        .unwrap_err();

    assert_eq!(err.code, 101);
    assert_eq!(maps.geocode_calls(), 0);
    assert_eq!(engine.session_count().await, 0);
}

#[tokio::test]
async fn stop_near_the_route_is_inserted_before_the_destination() {
    let (engine, maps) = common::engine();
    let session = bengaluru_to_mysuru(&engine).await;

    let session = engine.add_stop(session.id, at(MANDYA)).await.unwrap();

    let kinds: Vec<WaypointKind> = session.waypoints.iter().map(|w| w.kind).collect();
    let ids: Vec<u32> = session.waypoints.iter().map(|w| w.id).collect();

    assert_eq!(
        kinds,
        vec![
            WaypointKind::Origin,
            WaypointKind::Intermediate,
            WaypointKind::Destination
        ]
    );
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(session.waypoints[1].location, MANDYA);
    assert_eq!(session.segments.len(), 2);
    assert_eq!(maps.directions_calls(), 2);
}

#[tokio::test]
async fn stop_far_from_the_route_is_refused_with_its_distance() {
    let (engine, maps) = common::engine();
    let session = bengaluru_to_mysuru(&engine).await;
    let geocoded = maps.geocode_calls();

    let err = engine.add_stop(session.id, at(CHENNAI)).await.unwrap_err();

    assert_eq!(err.code, 102);
    assert!(err.distance_km.unwrap() > 50.0);
    assert_eq!(maps.geocode_calls(), geocoded);

    let session = engine.find_session(session.id).await.unwrap();
    assert_eq!(session.waypoints.len(), 2);
}

#[tokio::test]
async fn place_selection_is_added_with_its_place_id() {
    let (engine, _) = common::engine();
    let session = bengaluru_to_mysuru(&engine).await;

    let source = StopSource::GooglePlaces {
        place_id: "mandya-place".into(),
        session_token: "token".into(),
    };
    let session = engine.add_stop(session.id, source).await.unwrap();

    assert_eq!(session.waypoints[1].display_name, "Mandya");
    assert_eq!(
        session.waypoints[1].external_place_id.as_deref(),
        Some("mandya-place")
    );
}

#[tokio::test]
async fn stops_need_a_selected_route() {
    let maps = MockMaps::default();
    maps.fail_directions.store(true, Ordering::SeqCst);
    let (engine, maps) = common::engine_with(maps);

    let session = bengaluru_to_mysuru(&engine).await;
    assert!(session.routes.is_empty());
    assert_eq!(session.display_path, vec![BENGALURU, MYSURU]);

    let err = engine.add_stop(session.id, at(MANDYA)).await.unwrap_err();
    assert_eq!(err.code, 104);

    maps.fail_directions.store(false, Ordering::SeqCst);
    let session = engine.refresh_routes(session.id).await.unwrap();
    assert_eq!(session.selected_route, Some(0));

    assert_ok!(engine.add_stop(session.id, at(MANDYA)).await);
}

#[tokio::test]
async fn origin_and_destination_cannot_be_removed_or_moved() {
    let (engine, _) = common::engine();
    let session = bengaluru_to_mysuru(&engine).await;

    let err = engine.remove_stop(session.id, 1).await.unwrap_err();
    assert_eq!(err.code, 103);

    let err = engine.move_stop(session.id, 2, MANDYA).await.unwrap_err();
    assert_eq!(err.code, 103);
}

#[tokio::test]
async fn removing_a_stop_renumbers_the_rest() {
    let (engine, _) = common::engine();
    let session = bengaluru_to_mysuru(&engine).await;
    engine.add_stop(session.id, at(MANDYA)).await.unwrap();

    let session = engine.remove_stop(session.id, 2).await.unwrap();

    let ids: Vec<u32> = session.waypoints.iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(session.waypoints[1].kind, WaypointKind::Destination);
    assert_eq!(session.segments.len(), 1);
}

#[tokio::test]
async fn moved_stop_keeps_its_position() {
    let (engine, _) = common::engine();
    let session = bengaluru_to_mysuru(&engine).await;
    engine.add_stop(session.id, at(MANDYA)).await.unwrap();

    let moved_to = GeoPoint::new(12.6, 77.0);
    let session = engine.move_stop(session.id, 2, moved_to).await.unwrap();

    assert_eq!(session.waypoints[1].id, 2);
    assert_eq!(session.waypoints[1].kind, WaypointKind::Intermediate);
    assert_eq!(session.waypoints[1].location, moved_to);
}

#[tokio::test]
async fn full_car_drops_intermediate_stops_with_a_notice() {
    let (engine, _) = common::engine();
    let session = bengaluru_to_mysuru(&engine).await;
    engine.add_stop(session.id, at(MANDYA)).await.unwrap();

    let session = engine.set_full_car(session.id, true).await.unwrap();

    assert!(session.full_car);
    assert_eq!(session.waypoints.len(), 2);
    assert_eq!(
        session.notice.as_deref(),
        Some("1 stop was removed for the full car ride")
    );

    let err = engine.add_stop(session.id, at(MANDYA)).await.unwrap_err();
    assert_eq!(err.code, 103);

    let session = engine.set_full_car(session.id, false).await.unwrap();
    assert!(!session.full_car);
    assert_ok!(engine.add_stop(session.id, at(MANDYA)).await);
}

#[tokio::test]
async fn fare_matrix_prices_every_ordered_pair() {
    let (engine, _) = common::engine();
    let session = bengaluru_to_mysuru(&engine).await;
    engine.add_stop(session.id, at(MANDYA)).await.unwrap();

    let fares = engine.fare_matrix(session.id).await.unwrap();

    assert_eq!(fares.combinations.len(), 3);
    for combination in &fares.combinations {
        assert!(combination.from_waypoint_id < combination.to_waypoint_id);
        assert!(combination.fare >= 10);
        assert_eq!(combination.fare % 10, 0);
    }

    let whole_trip = fares
        .combinations
        .iter()
        .find(|c| c.from_waypoint_id == 1 && c.to_waypoint_id == 3)
        .unwrap();
    assert!((whole_trip.distance_km - fares.total_distance_km).abs() < 1e-9);
}

#[tokio::test]
async fn selecting_the_longer_alternative_changes_fares() {
    let (engine, _) = common::engine();
    let session = bengaluru_to_mysuru(&engine).await;

    let direct = engine.fare_matrix(session.id).await.unwrap();
    let session = engine.select_route(session.id, 1).await.unwrap();
    let scenic = engine.fare_matrix(session.id).await.unwrap();

    assert_eq!(session.selected_route, Some(1));
    assert!(scenic.total_distance_km > direct.total_distance_km);

    let err = engine.select_route(session.id, 7).await.unwrap_err();
    assert_eq!(err.code, 101);
}

#[tokio::test]
async fn preference_change_refetches_routes() {
    let (engine, maps) = common::engine();
    let session = bengaluru_to_mysuru(&engine).await;

    let session = engine
        .set_route_preference(session.id, RoutePreference::AvoidTolls)
        .await
        .unwrap();
    assert_eq!(session.preference, RoutePreference::AvoidTolls);
    assert_eq!(maps.directions_calls(), 2);

    engine
        .set_route_preference(session.id, RoutePreference::AvoidTolls)
        .await
        .unwrap();
    assert_eq!(maps.directions_calls(), 2);
}

#[tokio::test]
async fn failed_geocoding_falls_back_to_coordinates() {
    let maps = MockMaps::default();
    maps.fail_geocoding.store(true, Ordering::SeqCst);
    let (engine, _) = common::engine_with(maps);

    let name = engine.resolve_name(MANDYA).await.unwrap();

    assert_eq!(name.name, "Location (12.5218, 76.8951)");
    assert_eq!(name.address, "12.521800, 76.895100");
}

#[tokio::test]
async fn names_are_geocoded_once_per_point() {
    let (engine, maps) = common::engine();

    let first = engine.resolve_name(MANDYA).await.unwrap();
    let second = engine.resolve_name(MANDYA).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.name, "Mocktown");
    assert_eq!(maps.geocode_calls(), 1);
    assert_eq!(engine.namer().cache().len().await, 1);
}

#[tokio::test]
async fn only_the_latest_search_is_answered() {
    let (engine, _) = common::engine();
    let session = bengaluru_to_mysuru(&engine).await;

    let (first, second) = tokio::join!(engine.search_places(session.id, "Man".into()), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        engine.search_places(session.id, "Mandya".into()).await
    });

    let first = first.unwrap();
    let second = second.unwrap();

    assert!(first.superseded);
    assert!(first.candidates.is_empty());
    assert!(!second.superseded);
    assert_eq!(second.candidates[0].name, "Mandya");
    assert_eq!(second.candidates[0].location, BENGALURU);
}

#[tokio::test]
async fn blank_search_returns_nothing() {
    let (engine, _) = common::engine();
    let session = bengaluru_to_mysuru(&engine).await;

    let results = engine.search_places(session.id, "   ".into()).await.unwrap();

    assert!(!results.superseded);
    assert!(results.candidates.is_empty());
}

#[tokio::test]
async fn suggestions_come_from_the_provider() {
    let (engine, _) = common::engine();

    let suggestions = engine
        .find_place_suggestions("Mys".into(), BENGALURU, 5000.0, "token".into())
        .await
        .unwrap();

    assert_eq!(suggestions[0].place_id, "place-Mys");
}

#[tokio::test]
async fn unknown_and_deleted_sessions_are_not_found() {
    let (engine, _) = common::engine();

    let err = engine.find_session(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.code, 106);

    let session = bengaluru_to_mysuru(&engine).await;
    assert_ok!(engine.delete_session(session.id).await);
    assert_err!(engine.find_session(session.id).await);
    assert_eq!(engine.session_count().await, 0);
}

#[tokio::test]
async fn directions_for_a_replaced_preference_are_dropped() {
    let (engine, maps) = common::engine();
    let session = bengaluru_to_mysuru(&engine).await;
    maps.fastest_delay_ms.store(80, Ordering::SeqCst);

    let (refreshed, changed) = tokio::join!(engine.refresh_routes(session.id), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        engine
            .set_route_preference(session.id, RoutePreference::AvoidTolls)
            .await
    });

    assert_ok!(refreshed);
    assert_eq!(changed.unwrap().routes[0].summary, "Direct AvoidTolls");

    let session = engine.find_session(session.id).await.unwrap();
    assert_eq!(session.preference, RoutePreference::AvoidTolls);
    assert_eq!(session.routes[0].summary, "Direct AvoidTolls");
    assert_eq!(maps.directions_calls(), 3);
}
