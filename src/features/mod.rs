//! Catalog features. Each one follows the same layout:
//! `models` (rows), `repositories` (data access), `services`, `dtos`,
//! `handlers` and `routes`.

pub mod categorias;
pub mod insumos;
pub mod productos;
pub mod promociones;
pub mod usuarios;
