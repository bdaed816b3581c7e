use buswatch::shared::{Coordinate, Distance};

#[test]
fn distance_test() {
    let connaught_place = Coordinate::new(28.6315, 77.2167);
    let india_gate = Coordinate::new(28.6129, 77.2295);
    let d = connaught_place.distance(&india_gate);
    assert!((d.as_kilometers() - 2.416).abs() < 0.01);
}

#[test]
fn distance_is_symmetric_test() {
    let a = Coordinate::new(28.6139, 77.2090);
    let b = Coordinate::new(28.7, 77.3);
    assert!((a.distance(&b).as_meters() - b.distance(&a).as_meters()).abs() < 1e-6);
    assert_eq!(a.distance(&a), Distance::from_meters(0.0));
}

#[test]
fn network_distance_is_longer_test() {
    let a = Coordinate::new(28.6139, 77.2090);
    let b = Coordinate::new(28.7, 77.3);
    assert!(a.network_distance(&b) > a.distance(&b));
}

#[test]
fn distance_display_test() {
    assert_eq!(Distance::from_meters(4_560.0).to_string(), "4.6 km");
}
