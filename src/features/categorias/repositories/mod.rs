mod categoria_repository;

pub use categoria_repository::PgCategoriaRepository;
