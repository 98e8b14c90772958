mod promocion_handler;

pub use promocion_handler::*;
