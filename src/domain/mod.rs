// Domain layer: wire models, option tables and ports (interfaces).

pub mod codes;
pub mod model;
pub mod ports;
