mod categoria_handler;

pub use categoria_handler::*;
