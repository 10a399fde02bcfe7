//! Mail records and their enumerations.
//!
//! A [`MailRecord`] is immutable authored content. The rest of the crate
//! only ever holds shared references to records (`Arc<MailRecord>`); nothing
//! at runtime mutates them.

mod record;
mod types;

pub use record::MailRecord;
pub use types::{
    Action, AssetHandle, ContrabandKind, Country, Dimensions, MailId, MailKind,
    NarrativeImportance, OffenceKind, PostageType, ReplyCategory, SpawnType, SubstanceKind,
};
