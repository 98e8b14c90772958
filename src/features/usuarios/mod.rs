//! Registered users and their loyalty points.
//!
//! Users sign up through the storefront; this feature only reads them and
//! overwrites their points balance.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/usuario` | List users |
//! | GET | `/api/usuario/{id}` | Get user |
//! | PUT | `/api/usuario/puntos/{id}` | Set points balance |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::UsuarioService;
