// Domain layer: report model and ports. No external dependencies beyond std.

pub mod model;
pub mod ports;
