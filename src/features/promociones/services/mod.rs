mod promocion_service;

pub use promocion_service::PromocionService;
