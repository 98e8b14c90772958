mod promocion_repository;

pub use promocion_repository::PgPromocionRepository;
