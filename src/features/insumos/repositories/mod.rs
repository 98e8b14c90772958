mod insumo_repository;

pub use insumo_repository::PgInsumoRepository;
