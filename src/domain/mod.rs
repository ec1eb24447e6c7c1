// Domain layer: employee model, validation rules and ports (interfaces).

pub mod model;
pub mod ports;
pub mod validation;
