mod insumo_dto;

pub use insumo_dto::*;
