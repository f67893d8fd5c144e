// Domain layer: records, the continent lookup table and the loader port.

pub mod continents;
pub mod model;
pub mod ports;
