// Domain layer: value types and ports (interfaces).

pub mod model;
pub mod ports;
