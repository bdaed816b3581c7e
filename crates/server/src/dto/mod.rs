mod bus;
mod directions;
mod stop;

pub use bus::*;
pub use directions::*;
pub use stop::*;
