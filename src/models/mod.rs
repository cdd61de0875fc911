//! Domain types for Genie Space promotion.

mod environment;
mod space;

pub use environment::Environment;
pub use space::{ImportPayload, SpaceDocument, SpaceExport, SpaceId, export_file_name};

pub(crate) use space::is_unset;
