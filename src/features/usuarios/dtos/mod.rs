mod usuario_dto;

pub use usuario_dto::*;
