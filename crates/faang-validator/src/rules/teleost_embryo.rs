//! Teleost embryo rule table.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{standard, FieldDef, Rule, RuleSet, SampleKind};

const ORIGINS: &[&str] = &[
    "Domesticated diploid",
    "Domesticated Double-haploid",
    "Domesticated Isogenic",
    "Wild",
    "restricted access",
];
const REPRODUCTIVE_STRATEGIES: &[&str] = &[
    "gonochoric",
    "simultaneous hermaphrodite",
    "successive hermaphrodite",
    "restricted access",
];
const HATCHING: &[&str] = &["pre", "post", "restricted access"];
const TIME_UNITS: &[&str] = &["hours", "days", "months", "years", "restricted access"];
const CELSIUS: &[&str] = &["Degrees celsius", "restricted access"];
const THERMAL_TIME: &[&str] = &["Thermal time", "restricted access"];
const GROWTH_MEDIA: &[&str] = &["Water", "Growing medium", "restricted access"];
const DAYS: &[&str] = &["days", "restricted access"];
const PERCENT: &[&str] = &["%", "restricted access"];
const SALINITY_UNITS: &[&str] = &["parts per thousand", "restricted access"];
const GENERATION_UNITS: &[&str] = &[
    "generations from wild",
    "not applicable",
    "not collected",
    "not provided",
    "restricted access",
];

/// Light and dark hours, e.g. `16L:8D`.
static PHOTOPERIOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(2[0-4]|1[0-9]|[1-9])L:(2[0-4]|1[0-9]|[0-9])D$").unwrap()
});

pub(crate) static RULES: Lazy<RuleSet> = Lazy::new(|| {
    let mut fields = standard::fields("Material Term Source ID");
    fields.extend([
        FieldDef::new("origin", "Origin"),
        FieldDef::new("reproductive_strategy", "Reproductive Strategy"),
        FieldDef::new("hatching", "Hatching"),
        FieldDef::new("time_post_fertilisation", "Time Post Fertilisation"),
        FieldDef::new("time_post_fertilisation_unit", "Time Post Fertilisation Unit"),
        FieldDef::new("pre_hatching_water_temperature_average", "Pre-hatching Water Temperature Average"),
        FieldDef::new(
            "pre_hatching_water_temperature_average_unit",
            "Pre-hatching Water Temperature Average Unit",
        ),
        FieldDef::new("post_hatching_water_temperature_average", "Post-hatching Water Temperature Average"),
        FieldDef::new(
            "post_hatching_water_temperature_average_unit",
            "Post-hatching Water Temperature Average Unit",
        ),
        FieldDef::new("degree_days", "Degree Days"),
        FieldDef::new("degree_days_unit", "Degree Days Unit"),
        FieldDef::new("growth_media", "Growth Media"),
        FieldDef::new("medium_replacement_frequency", "Medium Replacement Frequency"),
        FieldDef::new("medium_replacement_frequency_unit", "Medium Replacement Frequency Unit"),
        FieldDef::new("percentage_total_somite_number", "Percentage Total Somite Number"),
        FieldDef::new("percentage_total_somite_number_unit", "Percentage Total Somite Number Unit"),
        FieldDef::new("average_water_salinity", "Average Water Salinity"),
        FieldDef::new("average_water_salinity_unit", "Average Water Salinity Unit"),
        FieldDef::new("photoperiod", "Photoperiod"),
        FieldDef::new("generations_from_wild", "Generations From Wild"),
        FieldDef::new("generations_from_wild_unit", "Generations From Wild Unit"),
    ]);

    let mut rules = standard::rules(&["specimen from organism"], true);
    for field in [
        "origin",
        "reproductive_strategy",
        "hatching",
        "time_post_fertilisation",
        "time_post_fertilisation_unit",
        "pre_hatching_water_temperature_average",
        "pre_hatching_water_temperature_average_unit",
        "post_hatching_water_temperature_average",
        "post_hatching_water_temperature_average_unit",
        "degree_days",
        "degree_days_unit",
        "growth_media",
        "medium_replacement_frequency",
        "medium_replacement_frequency_unit",
        "percentage_total_somite_number",
        "percentage_total_somite_number_unit",
        "average_water_salinity",
        "average_water_salinity_unit",
        "photoperiod",
    ] {
        rules.push(Rule::Required(field));
    }
    rules.extend([
        Rule::OneOf { field: "origin", allowed: ORIGINS },
        Rule::OneOf { field: "reproductive_strategy", allowed: REPRODUCTIVE_STRATEGIES },
        Rule::OneOf { field: "hatching", allowed: HATCHING },
        Rule::OneOf { field: "time_post_fertilisation_unit", allowed: TIME_UNITS },
        Rule::OneOf { field: "pre_hatching_water_temperature_average_unit", allowed: CELSIUS },
        Rule::OneOf { field: "post_hatching_water_temperature_average_unit", allowed: CELSIUS },
        Rule::OneOf { field: "degree_days_unit", allowed: THERMAL_TIME },
        Rule::OneOf { field: "growth_media", allowed: GROWTH_MEDIA },
        Rule::OneOf { field: "medium_replacement_frequency_unit", allowed: DAYS },
        Rule::OneOf { field: "percentage_total_somite_number_unit", allowed: PERCENT },
        Rule::OneOf { field: "average_water_salinity_unit", allowed: SALINITY_UNITS },
        Rule::OneOf { field: "generations_from_wild_unit", allowed: GENERATION_UNITS },
        Rule::Numeric {
            field: "time_post_fertilisation",
            label: "Time Post Fertilisation",
            range: None,
            unit: "",
        },
        Rule::Numeric {
            field: "pre_hatching_water_temperature_average",
            label: "Pre-hatching Water Temperature Average",
            range: None,
            unit: "",
        },
        Rule::Numeric {
            field: "post_hatching_water_temperature_average",
            label: "Post-hatching Water Temperature Average",
            range: None,
            unit: "",
        },
        Rule::Numeric { field: "degree_days", label: "Degree Days", range: None, unit: "" },
        Rule::Numeric {
            field: "medium_replacement_frequency",
            label: "Medium Replacement Frequency",
            range: None,
            unit: "",
        },
        Rule::Numeric {
            field: "percentage_total_somite_number",
            label: "Percentage Total Somite Number",
            range: Some((0.0, 100.0)),
            unit: "%",
        },
        Rule::Numeric {
            field: "average_water_salinity",
            label: "Average Water Salinity",
            range: None,
            unit: "",
        },
        Rule::Numeric {
            field: "generations_from_wild",
            label: "Generations From Wild",
            range: None,
            unit: "",
        },
        Rule::Pattern {
            field: "photoperiod",
            regex: &PHOTOPERIOD,
            exempt: &["natural light", "restricted access"],
            hint: "Must be 'natural light', 'restricted access', or match pattern like '16L:8D'",
        },
    ]);

    RuleSet {
        kind: SampleKind::TeleostEmbryo,
        fields,
        nested: Vec::new(),
        rules,
        relationship: None,
    }
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photoperiod_pattern() {
        assert!(PHOTOPERIOD.is_match("16L:8D"));
        assert!(PHOTOPERIOD.is_match("24L:0D"));
        assert!(PHOTOPERIOD.is_match("9L:15D"));
        assert!(!PHOTOPERIOD.is_match("16:8"));
        assert!(!PHOTOPERIOD.is_match("25L:8D"));
        assert!(!PHOTOPERIOD.is_match("16L:8D extra"));
    }
}
