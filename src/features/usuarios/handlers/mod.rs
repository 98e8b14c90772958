mod usuario_handler;

pub use usuario_handler::*;
