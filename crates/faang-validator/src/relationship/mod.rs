//! Relationship graph validation.
//!
//! Runs after per-record validation, over the records that passed it.
//! Parents are looked up in the batch first, then in the remote repository
//! when the reference carries the BioSamples accession prefix.

mod graph;
mod mock;
mod repository;

pub use graph::{GraphNode, RelationshipValidator};
pub use mock::MockSampleRepository;
pub use repository::{
    is_remote_id, BioSamplesClient, RemoteEntry, RemoteEntryCache, SampleRepository,
    DEFAULT_BIOSAMPLES_URL, REMOTE_ID_PREFIX,
};
