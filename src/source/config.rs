pub struct Config {
    pub buses_file_name: String,
    pub bus_routes_file_name: String,
    pub stops_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buses_file_name: "buses.txt".into(),
            bus_routes_file_name: "bus_routes.txt".into(),
            stops_file_name: "stops.txt".into(),
        }
    }
}
