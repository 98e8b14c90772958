mod producto_repository;

pub use producto_repository::PgProductoRepository;
