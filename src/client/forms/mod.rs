//! Create and update dialogs for the catalog entities.

mod fields;
mod image;
mod session;

pub use fields::{FieldKind, FieldSpec, FormLayout, FormOptions, SelectOption};
pub use image::{ImageFile, ImageUploader};
pub use session::{FormMode, FormSession, FormStatus, SubmitOutcome};
