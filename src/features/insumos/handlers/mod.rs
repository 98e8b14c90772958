mod insumo_handler;

pub use insumo_handler::*;
