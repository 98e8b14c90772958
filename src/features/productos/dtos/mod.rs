mod producto_dto;

pub use producto_dto::*;
