//! Back office and public catalog API for a food-service business.
//!
//! The crate is split in two halves that share the [`schemas`] module:
//!
//! - the server side (`core`, `features`, [`app`]) exposes validated REST
//!   routes for products, supplies, promotions, their categories and user
//!   loyalty points, backed by PostgreSQL or an in-memory store;
//! - the [`client`] side drives those routes the way the admin dashboard does:
//!   cached queries, notifying mutations, form sessions and page controllers.

pub mod app;
pub mod client;
pub mod core;
pub mod features;
pub mod schemas;
pub mod shared;
