use buswatch::{
    feed::PositionSample,
    roster::{BusStatus, Occupancy, Roster},
    shared::{Coordinate, Distance},
    source::{self, Source},
};
use chrono::Utc;
use rand::{SeedableRng, rngs::StdRng};
use std::{fs, io::Write, path::PathBuf};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR")))
}

fn load() -> Roster {
    let source = Source::new(source::Config::default()).from_directory(fixture("roster"));
    Roster::new().with_source(source).unwrap()
}

fn sample(bus_id: &str, coordinate: Coordinate) -> PositionSample {
    PositionSample {
        bus_id: bus_id.into(),
        bus_number: bus_id.to_uppercase(),
        coordinate,
        heading: 90.0,
        speed: 35.0,
        sequence: 0,
        recorded_at: Utc::now(),
    }
}

#[test]
fn load_from_directory_test() {
    let roster = load();
    let ids: Vec<_> = roster.buses.iter().map(|bus| bus.id.as_ref()).collect();
    assert_eq!(ids, ["bus-101", "bus-202", "bus-303", "bus-404"]);
    assert_eq!(roster.stops.len(), 7);

    let bus = roster.bus_by_id("bus-101").unwrap();
    assert_eq!(bus.number.as_ref(), "DL-101");
    assert_eq!(bus.fare, 25.0);
    let route: Vec<_> = bus.route.iter().map(|stop| stop.as_ref()).collect();
    assert_eq!(route, ["Connaught Place", "India Gate", "Khan Market"]);

    let bus = roster.bus_by_id("bus-303").unwrap();
    assert_eq!(bus.occupancy, Occupancy::High);
    assert_eq!(bus.status, BusStatus::Inactive);

    let bus = roster.bus_by_id("bus-404").unwrap();
    assert_eq!(bus.occupancy, Occupancy::Low);
    assert_eq!(bus.status, BusStatus::Active);
    assert!(bus.route.is_empty());

    assert!(roster.bus_by_id("bus-999").is_none());
    assert_eq!(roster.stop_by_id("stop-rf").unwrap().name.as_ref(), "Red Fort");
}

#[test]
fn load_from_zip_test() {
    let path = std::env::temp_dir().join(format!("buswatch-roster-{}.zip", std::process::id()));
    {
        let file = fs::File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for name in ["buses.txt", "bus_routes.txt", "stops.txt"] {
            let options = zip::write::SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Stored);
            writer.start_file(name, options).unwrap();
            let content = fs::read(fixture("roster").join(name)).unwrap();
            writer.write_all(&content).unwrap();
        }
        writer.finish().unwrap();
    }

    let source = Source::new(source::Config::default()).from_zip(path.clone());
    let roster = Roster::new().with_source(source).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(roster.buses().len(), 4);
    assert_eq!(roster.stops().len(), 7);
}

#[test]
fn missing_file_test() {
    let source = Source::new(source::Config::default()).from_directory(fixture("nothing-here"));
    let result = Roster::new().with_source(source);
    assert!(matches!(result, Err(source::Error::FileNotFound(name)) if name == "buses.txt"));
}

#[test]
fn route_for_unknown_bus_test() {
    let source = Source::new(source::Config::default()).from_directory(fixture("orphan_route"));
    let result = Roster::new().with_source(source);
    assert!(matches!(result, Err(source::Error::UnknownBus(id)) if id == "bus-999"));
}

#[test]
fn duplicate_bus_keeps_first_test() {
    let source = Source::new(source::Config::default()).from_directory(fixture("duplicate_bus"));
    let roster = Roster::new().with_source(source).unwrap();
    let ids: Vec<_> = roster.buses().iter().map(|bus| bus.id.as_ref()).collect();
    assert_eq!(ids, ["bus-1", "bus-2"]);

    let bus = roster.bus_by_id("bus-1").unwrap();
    assert_eq!(bus.number.as_ref(), "DL-1");
    assert_eq!(bus.index, 0);
    assert_eq!(bus.route.len(), 2);
    assert_eq!(roster.bus_by_id("bus-2").unwrap().index, 1);

    let serving: Vec<_> = roster
        .buses_by_stop_name("India Gate")
        .into_iter()
        .map(|bus| bus.number.as_ref())
        .collect();
    assert_eq!(serving, ["DL-1"]);
}

#[test]
fn misnamed_header_fails_load_test() {
    let source = Source::new(source::Config::default()).from_directory(fixture("bad_header"));
    let result = Roster::new().with_source(source);
    assert!(matches!(
        result,
        Err(source::Error::MissingHeader { file, column })
            if file == "buses.txt" && column == "bus_number"
    ));
}

#[test]
fn update_position_replaces_latest_test() {
    let mut roster = load();
    assert!(roster.position_by_bus_id("bus-101").is_none());

    assert!(roster.update_position(sample("bus-101", Coordinate::new(28.6, 77.2))));
    assert!(roster.update_position(sample("bus-101", Coordinate::new(28.7, 77.3))));
    let latest = roster.position_by_bus_id("bus-101").unwrap();
    assert_eq!(latest.coordinate, Coordinate::new(28.7, 77.3));

    assert!(!roster.update_position(sample("bus-999", Coordinate::new(28.7, 77.3))));
    assert!(roster.position_by_bus_id("bus-999").is_none());

    assert!(roster.clear_position("bus-101"));
    assert!(roster.position_by_bus_id("bus-101").is_none());
}

#[test]
fn scatter_positions_test() {
    let mut roster = load();
    let center = Coordinate::new(28.6139, 77.2090);
    let mut rng = StdRng::seed_from_u64(3);
    roster.scatter_positions(center, 0.1, &mut rng);
    for bus in roster.buses.iter() {
        let position = roster.position_by_bus_id(&bus.id).unwrap();
        assert!((position.coordinate.latitude - center.latitude).abs() <= 0.05);
        assert!((position.coordinate.longitude - center.longitude).abs() <= 0.05);
        assert!((20.0..60.0).contains(&position.speed));
        assert_eq!(position.bus_number, bus.number.as_ref());
    }
}

#[test]
fn search_stops_by_name_test() {
    let roster = load();
    let results = roster.search_stops_by_name("chandni");
    assert_eq!(results.first().unwrap().id.as_ref(), "stop-cc");

    let results = roster.search_stops_by_name("Conaught");
    assert_eq!(results.first().unwrap().id.as_ref(), "stop-cp");

    assert!(roster.search_stops_by_name("   ").is_empty());
}

#[test]
fn stops_near_test() {
    let roster = load();
    let connaught = roster.stop_by_id("stop-cp").unwrap().coordinate;
    let nearby = roster.stops_near(&connaught, Distance::from_kilometers(3.0));
    let ids: Vec<_> = nearby.iter().map(|near| near.stop.id.as_ref()).collect();
    assert_eq!(ids, ["stop-cp", "stop-ig", "stop-cc"]);

    let routes: Vec<_> = nearby[0].routes.iter().map(|route| route.as_ref()).collect();
    assert_eq!(routes, ["DL-101", "DL-303"]);
    assert!((nearby[1].distance.as_kilometers() - 2.42).abs() < 0.05);
}

#[test]
fn buses_by_stop_name_test() {
    let roster = load();
    let numbers: Vec<_> = roster
        .buses_by_stop_name("connaught place")
        .into_iter()
        .map(|bus| bus.number.as_ref())
        .collect();
    assert_eq!(numbers, ["DL-101", "DL-303"]);
}
