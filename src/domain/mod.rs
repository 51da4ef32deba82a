// Domain layer: core models, filter state and ports (interfaces). No I/O here.

pub mod filter;
pub mod model;
pub mod ports;
