// Domain layer: phone book / filter models and the remote API port.

pub mod model;
pub mod ports;
