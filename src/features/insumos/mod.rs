//! Supplies (insumos) used by the kitchen.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/insumo` | List supplies (`activo`, `estado`, `id_categoria` filters) |
//! | POST | `/api/insumo` | Create supply |
//! | GET | `/api/insumo/{id}` | Get supply |
//! | PUT | `/api/insumo/{id}` | Replace supply |
//! | DELETE | `/api/insumo/{id}` | Deactivate supply |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::InsumoService;
