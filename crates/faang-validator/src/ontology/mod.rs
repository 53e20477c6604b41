//! Controlled-vocabulary term resolution.
//!
//! Term ids are normalized to `NS:code`, looked up once per run through a
//! [`TermAuthority`] and checked against allowed classes. Breed terms get an
//! extra compatibility check against the organism's species.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use faang_validator::ontology::{MockTermAuthority, TermResolver};
//!
//! let resolver = TermResolver::new(Arc::new(MockTermAuthority::with_livestock_terms()));
//! let resolution = resolver.resolve("PATO_0000384", "PATO", &["PATO:0000047"], Some("male"));
//! assert!(resolution.found);
//! assert!(resolution.errors.is_empty());
//! ```

mod authority;
mod breed;
mod mock;
mod resolver;
mod term;

pub use authority::{OlsClient, TermAuthority, DEFAULT_OLS_URL};
pub use breed::{breed_class_for, incompatibility_message, BreedSpeciesChecker, SPECIES_BREED_LINKS};
pub use mock::MockTermAuthority;
pub use resolver::{TermCache, TermResolver};
pub use term::{normalize_term, TermCandidate, TermId, TermRecord, TermResolution, OBO_IRI_PREFIX};
