mod promocion_dto;

pub use promocion_dto::*;
