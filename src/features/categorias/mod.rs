//! Category families for supplies, products and promotions.
//!
//! All three families share one table and one set of routes; the family is
//! the first path segment after `/api/categoria`.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/categoria/{tipo}` | List categories of a family |
//! | POST | `/api/categoria/{tipo}` | Create category |
//! | GET | `/api/categoria/{tipo}/{id}` | Get category |
//! | PUT | `/api/categoria/{tipo}/{id}` | Replace category |
//! | DELETE | `/api/categoria/{tipo}/{id}` | Deactivate category |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::CategoriaService;
