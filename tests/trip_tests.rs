use buswatch::trip::{Error, MAX_STOP_NAME_LEN, TripController, TripStatus};
use rand::{Rng, SeedableRng, rngs::StdRng};

#[test]
fn passenger_count_never_negative_test() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let mut trip = TripController::new();
        let mut expected: i64 = 0;
        for _ in 0..200 {
            if rng.random_bool(0.45) {
                trip.add_passenger();
                expected += 1;
            } else {
                trip.remove_passenger();
                expected = (expected - 1).max(0);
            }
            assert_eq!(trip.passenger_count() as i64, expected);
        }
    }
}

#[test]
fn remove_passenger_at_zero_test() {
    let mut trip = TripController::new();
    assert_eq!(trip.remove_passenger(), 0);
    assert_eq!(trip.add_passenger(), 1);
    assert_eq!(trip.remove_passenger(), 0);
    assert_eq!(trip.remove_passenger(), 0);
}

#[test]
fn start_is_idempotent_test() {
    let mut trip = TripController::new();
    assert!(trip.start_trip());
    trip.add_passenger();
    assert!(!trip.start_trip());
    assert_eq!(trip.status(), TripStatus::Active);
    assert_eq!(trip.passenger_count(), 1);
}

#[test]
fn end_only_from_active_test() {
    let mut trip = TripController::new();
    assert!(!trip.end_trip());
    assert_eq!(trip.status(), TripStatus::Idle);

    trip.start_trip();
    assert!(trip.end_trip());
    assert_eq!(trip.status(), TripStatus::Ended);
    assert!(!trip.end_trip());
    assert_eq!(trip.status(), TripStatus::Ended);
}

#[test]
fn reset_from_every_state_test() {
    let setups: [fn(&mut TripController); 3] = [
        |_| {},
        |trip| {
            trip.start_trip();
        },
        |trip| {
            trip.start_trip();
            trip.end_trip();
        },
    ];
    for setup in setups {
        let mut trip = TripController::new();
        setup(&mut trip);
        trip.add_passenger();
        trip.add_passenger();
        trip.reset_trip();
        assert_eq!(trip.status(), TripStatus::Idle);
        assert_eq!(trip.passenger_count(), 0);
    }
}

#[test]
fn reset_keeps_stops_test() {
    let mut trip = TripController::new();
    trip.add_stop("Rajiv Chowk").unwrap();
    trip.start_trip();
    trip.reset_trip();
    assert_eq!(trip.stops(), ["Rajiv Chowk"]);
}

#[test]
fn add_stop_rejects_blank_test() {
    let mut trip = TripController::new();
    assert_eq!(trip.add_stop(""), Err(Error::EmptyStopName));
    assert_eq!(trip.add_stop("   "), Err(Error::EmptyStopName));
    assert!(trip.stops().is_empty());
}

#[test]
fn add_stop_length_limit_test() {
    let mut trip = TripController::new();
    let exact = "a".repeat(MAX_STOP_NAME_LEN);
    assert_eq!(trip.add_stop(&exact), Ok(1));

    let padded = format!("  {}  ", "b".repeat(MAX_STOP_NAME_LEN));
    assert_eq!(trip.add_stop(&padded), Ok(2));
    assert_eq!(trip.stops()[1], "b".repeat(MAX_STOP_NAME_LEN));

    let too_long = "c".repeat(MAX_STOP_NAME_LEN + 1);
    assert_eq!(trip.add_stop(&too_long), Err(Error::StopNameTooLong));
    assert_eq!(trip.stops().len(), 2);
}

#[test]
fn add_stop_keeps_call_order_test() {
    let mut trip = TripController::new();
    for name in ["ISBT", " Red Fort", "Chandni Chowk "] {
        trip.add_stop(name).unwrap();
    }
    assert_eq!(trip.stops(), ["ISBT", "Red Fort", "Chandni Chowk"]);
}

#[test]
fn stops_editable_in_any_state_test() {
    let mut trip = TripController::new();
    trip.start_trip();
    assert!(trip.add_stop("India Gate").is_ok());
    trip.end_trip();
    assert_eq!(trip.remove_stop(0), Ok("India Gate".to_string()));
}

#[test]
fn remove_stop_out_of_range_test() {
    let mut trip = TripController::new();
    trip.add_stop("A").unwrap();
    trip.add_stop("B").unwrap();
    assert!(trip.remove_stop(2).is_err());
    assert!(trip.remove_stop(usize::MAX).is_err());
    assert_eq!(trip.stops(), ["A", "B"]);

    assert_eq!(trip.remove_stop(0), Ok("A".to_string()));
    assert_eq!(trip.stops(), ["B"]);
}
