// Domain layer: booking record, prediction types and the ports the core depends on.

pub mod model;
pub mod ports;
