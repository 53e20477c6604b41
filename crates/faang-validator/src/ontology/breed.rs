//! Breed-versus-species compatibility.

use crate::sample::{NOT_APPLICABLE, RESTRICTED_ACCESS};

use super::resolver::TermResolver;
use super::term::normalize_term;

/// Species term to the LBO class its breeds descend from.
pub const SPECIES_BREED_LINKS: &[(&str, &str)] = &[
    ("NCBITaxon:9913", "LBO:0000001"),  // cattle
    ("NCBITaxon:9031", "LBO:0000002"),  // chicken
    ("NCBITaxon:9823", "LBO:0000003"),  // pig
    ("NCBITaxon:9940", "LBO:0000004"),  // sheep
    ("NCBITaxon:9796", "LBO:0000713"),  // horse
    ("NCBITaxon:9925", "LBO:0000954"),  // goat
    ("NCBITaxon:89462", "LBO:0001042"), // water buffalo
];

/// Breed class for a species term, if the species has one.
pub fn breed_class_for(species_term: &str) -> Option<&'static str> {
    let species = normalize_term(species_term);
    SPECIES_BREED_LINKS
        .iter()
        .find(|(s, _)| *s == species)
        .map(|(_, class)| *class)
}

/// Checks that a breed term sits under its species' breed class.
#[derive(Clone)]
pub struct BreedSpeciesChecker {
    resolver: TermResolver,
}

impl BreedSpeciesChecker {
    pub fn new(resolver: TermResolver) -> Self {
        Self { resolver }
    }

    /// Reasons the pair is incompatible; empty when compatible.
    ///
    /// A species without a breed link is rejected before anything else.
    /// "not applicable" and "restricted access" breeds then pass unchecked.
    pub fn check(&self, species_term: &str, breed_term: &str) -> Vec<String> {
        let species = normalize_term(species_term);
        let Some(class) = breed_class_for(&species) else {
            return vec![format!("Organism '{}' has no defined breed links.", species)];
        };

        if [NOT_APPLICABLE, RESTRICTED_ACCESS].contains(&breed_term.trim()) {
            return Vec::new();
        }

        let resolution = self.resolver.resolve(breed_term, "LBO", &[class], None);
        if resolution.is_ok() {
            Vec::new()
        } else {
            vec!["Breed doesn't match the animal species".to_string()]
        }
    }
}

/// The user-facing error for an incompatible pair, named by their texts.
pub fn incompatibility_message(breed_text: &str, species_text: &str) -> String {
    format!(
        "Breed '{}' is not compatible with species '{}'",
        breed_text, species_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::MockTermAuthority;
    use std::sync::Arc;

    fn checker() -> BreedSpeciesChecker {
        let authority = MockTermAuthority::new()
            .with_term("LBO:0000156", "Holstein", "lbo", &["LBO:0000001", "LBO:0000000"])
            .with_term("LBO:0000358", "Large White", "lbo", &["LBO:0000003", "LBO:0000000"]);
        BreedSpeciesChecker::new(TermResolver::new(Arc::new(authority)))
    }

    #[test]
    fn test_breed_class_lookup() {
        assert_eq!(breed_class_for("NCBITaxon_9913"), Some("LBO:0000001"));
        assert_eq!(breed_class_for("NCBITaxon:9606"), None);
    }

    #[test]
    fn test_compatible_breed() {
        assert!(checker().check("NCBITaxon:9913", "LBO_0000156").is_empty());
    }

    #[test]
    fn test_incompatible_breed() {
        let errors = checker().check("NCBITaxon:9913", "LBO:0000358");
        assert_eq!(errors, vec!["Breed doesn't match the animal species".to_string()]);
    }

    #[test]
    fn test_species_without_links() {
        let errors = checker().check("NCBITaxon_9606", "LBO:0000156");
        assert_eq!(errors, vec!["Organism 'NCBITaxon:9606' has no defined breed links.".to_string()]);
    }

    #[test]
    fn test_sentinel_breed_passes() {
        assert!(checker().check("NCBITaxon:9913", "not applicable").is_empty());
        assert!(checker().check("NCBITaxon:9823", "restricted access").is_empty());
    }

    #[test]
    fn test_species_link_is_checked_before_sentinel_breed() {
        let errors = checker().check("NCBITaxon:9606", "not applicable");
        assert_eq!(errors, vec!["Organism 'NCBITaxon:9606' has no defined breed links.".to_string()]);
    }

    #[test]
    fn test_incompatibility_message_uses_texts() {
        assert_eq!(
            incompatibility_message("Large White", "Bos taurus"),
            "Breed 'Large White' is not compatible with species 'Bos taurus'"
        );
    }
}
