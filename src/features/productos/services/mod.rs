mod producto_service;

pub use producto_service::ProductoService;
