//! Products (productos) offered on the public menu.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/producto` | List products (`activo`, `estado`, `id_categoria` filters) |
//! | POST | `/api/producto` | Create product |
//! | GET | `/api/producto/{id}` | Get product |
//! | PUT | `/api/producto/{id}` | Replace product |
//! | DELETE | `/api/producto/{id}` | Deactivate product |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::ProductoService;
