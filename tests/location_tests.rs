use buswatch::{
    location::{Error, LocationPoint, LocationService, SimulatedLocationService},
    shared::Coordinate,
};

#[tokio::test]
async fn unavailable_location_test() {
    let service = SimulatedLocationService::new();
    assert_eq!(service.current_location().await, Err(Error::Unavailable));
}

#[tokio::test]
async fn current_location_test() {
    let point = LocationPoint::new(Coordinate::new(28.6139, 77.2090)).with_address("New Delhi");
    let service = SimulatedLocationService::new().with_current(point.clone());
    assert_eq!(service.current_location().await, Ok(point));
}

#[tokio::test]
async fn directions_test() {
    let service = SimulatedLocationService::new()
        .with_path_points(5)
        .with_speed(26.0);
    let origin = LocationPoint::new(Coordinate::new(28.6139, 77.2090));
    let destination = LocationPoint::new(Coordinate::new(28.7, 77.3));
    let directions = service.directions(&origin, &destination).await.unwrap();

    let straight = service.calculate_distance(&origin.coordinate, &destination.coordinate);
    assert!((straight.as_kilometers() - 13.06).abs() < 0.05);
    assert!(directions.distance > straight);
    assert!((directions.distance.as_kilometers() - 16.97).abs() < 0.05);
    // About 17 km at 26 km/h.
    assert_eq!(directions.duration.as_minutes(), 39);

    assert_eq!(directions.path.len(), 5);
    assert_eq!(directions.path.first(), Some(&origin.coordinate));
    assert_eq!(directions.path.last(), Some(&destination.coordinate));
}

#[tokio::test]
async fn directions_to_same_point_fail_test() {
    let service = SimulatedLocationService::new();
    let point = LocationPoint::new(Coordinate::new(28.6139, 77.2090));
    assert!(matches!(
        service.directions(&point, &point).await,
        Err(Error::NoDirections(_))
    ));
}
