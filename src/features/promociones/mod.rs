//! Promotions (promociones) with their validity window and linked products.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/promocion` | List promotions (`id_categoria`, `vigente` filters) |
//! | POST | `/api/promocion` | Create promotion |
//! | GET | `/api/promocion/{id}` | Get promotion |
//! | PUT | `/api/promocion/{id}` | Replace promotion and its product links |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::PromocionService;
