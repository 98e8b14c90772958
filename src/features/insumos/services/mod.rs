mod insumo_service;

pub use insumo_service::InsumoService;
