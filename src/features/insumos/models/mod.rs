mod insumo;

pub use insumo::*;
