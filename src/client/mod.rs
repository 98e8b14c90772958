//! Typed client for the admin dashboard.
//!
//! Mirrors what the dashboard pages do against the REST API: cached list and
//! detail queries, mutations that notify and invalidate, form dialogs that
//! validate with the same schemas as the server, and page controllers tying
//! them together.

pub mod api;
pub mod cache;
pub mod error;
pub mod forms;
pub mod hooks;
pub mod notify;
pub mod page;
pub mod resources;

pub use api::ApiClient;
pub use cache::{ListFilter, QueryCache, QueryKey};
pub use error::ClientError;
pub use hooks::{ClientContext, Mutations, Queries, QueryState};
pub use notify::{Notification, Notifier, ToastQueue, TracingNotifier};
pub use page::CatalogPage;
