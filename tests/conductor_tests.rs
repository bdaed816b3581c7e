use buswatch::{
    conductor::{ConductorSession, Error, FixedCredentials},
    feed,
    location::{LocationPoint, SimulatedLocationService},
    shared::Coordinate,
    trip::{self, TripStatus},
};
use std::time::Duration;

fn session() -> ConductorSession<FixedCredentials> {
    ConductorSession::new(FixedCredentials::default(), feed::Config::default().with_seed(5))
}

fn verified() -> ConductorSession<FixedCredentials> {
    let mut session = session();
    session.verify("COND001", "password123").unwrap();
    session
}

#[test]
fn verify_test() {
    let mut session = session();
    assert!(!session.is_verified());
    assert_eq!(session.verify("", "password123"), Err(Error::MissingCredentials));
    assert_eq!(session.verify("COND001", "   "), Err(Error::MissingCredentials));
    assert_eq!(
        session.verify(&"x".repeat(51), "password123"),
        Err(Error::CredentialsTooLong)
    );
    assert_eq!(session.verify("COND001", "letmein"), Err(Error::InvalidCredentials));
    assert!(!session.is_verified());
    assert_eq!(session.verify("COND001", "password123"), Ok(()));
    assert!(session.is_verified());
}

#[test]
fn verification_does_not_survive_restart_test() {
    let first = verified();
    assert!(first.is_verified());
    drop(first);
    let second = session();
    assert!(!second.is_verified());
}

#[test]
fn operations_require_verification_test() {
    let mut session = session();
    assert_eq!(session.add_passenger(), Err(Error::NotVerified));
    assert_eq!(session.start_trip(None), Err(Error::NotVerified));
    assert_eq!(session.add_stop("ISBT"), Err(Error::NotVerified));
    assert!(session.state().is_err());
}

#[test]
fn scan_adds_one_passenger_test() {
    let mut session = verified();
    assert_eq!(session.scan_ticket("TICKET-1"), Ok(1));
    assert_eq!(session.scan_ticket("TICKET-2"), Ok(2));
    assert_eq!(session.state().unwrap().passenger_count, 2);
}

#[test]
fn stop_errors_pass_through_test() {
    let mut session = verified();
    assert_eq!(
        session.add_stop("  "),
        Err(Error::Trip(trip::Error::EmptyStopName))
    );
    assert_eq!(
        session.remove_stop(0),
        Err(Error::Trip(trip::Error::StopOutOfRange { index: 0, len: 0 }))
    );
}

#[tokio::test(start_paused = true)]
async fn feed_follows_trip_state_test() {
    let mut session = verified();
    assert!(!session.is_broadcasting());
    assert_eq!(session.latest_position(), Ok(None));

    assert_eq!(session.start_trip(Some(Coordinate::new(28.6, 77.2))), Ok(true));
    assert!(session.is_broadcasting());
    assert_eq!(session.latest_position().unwrap().unwrap().sequence, 0);
    assert_eq!(session.start_trip(None), Ok(false));

    tokio::time::sleep(Duration::from_secs(21)).await;
    assert_eq!(session.latest_position().unwrap().unwrap().sequence, 2);

    assert_eq!(session.end_trip(), Ok(true));
    assert!(!session.is_broadcasting());
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(session.latest_position().unwrap().unwrap().sequence, 2);
    assert_eq!(session.end_trip(), Ok(false));
    assert_eq!(session.start_trip(None), Ok(false));

    session.reset_trip().unwrap();
    assert_eq!(session.state().unwrap().status, TripStatus::Idle);
    assert_eq!(session.latest_position(), Ok(None));
}

#[tokio::test(start_paused = true)]
async fn reset_while_active_stops_feed_test() {
    let mut session = verified();
    session.start_trip(None).unwrap();
    session.add_passenger().unwrap();
    session.reset_trip().unwrap();
    assert!(!session.is_broadcasting());
    let state = session.state().unwrap();
    assert_eq!(state.status, TripStatus::Idle);
    assert_eq!(state.passenger_count, 0);
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(session.latest_position(), Ok(None));
}

#[tokio::test(start_paused = true)]
async fn start_uses_device_location_test() {
    let here = Coordinate::new(28.5355, 77.3910);
    let service = SimulatedLocationService::new().with_current(LocationPoint::new(here));
    let mut session = verified();
    assert_eq!(session.start_trip_located(&service).await, Ok(true));
    assert_eq!(session.latest_position().unwrap().unwrap().coordinate, here);
}

#[tokio::test(start_paused = true)]
async fn start_falls_back_when_location_unavailable_test() {
    let service = SimulatedLocationService::new();
    let mut session = verified();
    assert_eq!(session.start_trip_located(&service).await, Ok(true));
    assert_eq!(
        session.latest_position().unwrap().unwrap().coordinate,
        feed::DEFAULT_COORDINATE
    );
}

#[tokio::test(start_paused = true)]
async fn logout_tears_down_session_test() {
    let mut session = verified();
    session.start_trip(None).unwrap();
    session.add_stop("ISBT").unwrap();
    session.logout();
    assert!(!session.is_verified());
    assert!(!session.is_broadcasting());

    session.verify("COND001", "password123").unwrap();
    let state = session.state().unwrap();
    assert_eq!(state.status, TripStatus::Idle);
    assert!(state.stops.is_empty());
}

#[test]
fn emergency_notice_test() {
    let session = verified();
    let notice = session.emergency_notice();
    assert_eq!(notice.title, "Emergency Call");
}
