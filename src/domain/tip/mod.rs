//! Audio tip domain module

mod audio_tip;
mod catalog;
mod policy;
mod record;

pub use audio_tip::{AudioTip, TipFileName};
pub use catalog::{CatalogId, ALL_CATALOGS};
pub use policy::GenerationPolicy;
pub use record::{sort_newest_first, StoredTip, TipRecord, NO_TRANSCRIPT, UNTITLED};
