//! Sample records as delivered by the ingestion layer.

mod record;
mod value;

pub use record::{Identifier, Record, SAMPLE_NAME_COLUMN};
pub use value::{
    is_sentinel, FieldValue, NOT_APPLICABLE, NOT_COLLECTED, NOT_PROVIDED, RESTRICTED_ACCESS,
    SENTINELS,
};
