// Adapters layer: concrete implementations for external systems (GPIO hardware, HTTP server).

pub mod gpio;
pub mod http;
