// Domain layer: button/pin model and the ports (interfaces) the core drives.
// No hardware or network code lives here.

pub mod model;
pub mod ports;
