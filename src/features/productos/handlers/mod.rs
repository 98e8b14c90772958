mod producto_handler;

pub use producto_handler::*;
