// Domain layer: menu models and the storage port.

pub mod model;
pub mod ports;
