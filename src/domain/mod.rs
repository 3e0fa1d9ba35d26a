// Domain layer: the RealScout schema, conversion outcomes and the ports the shell talks through.

pub mod model;
pub mod ports;
