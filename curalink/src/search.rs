//! Case-insensitive substring filters used by the list views.
//!
//! An empty term matches everything; results keep catalog order.

use crate::model::{ClinicalTrial, Expert, Publication};

fn matches_any(term: &str, fields: &[&str]) -> bool {
    let term = term.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

pub fn filter_trials<'a>(trials: &'a [ClinicalTrial], term: &str) -> Vec<&'a ClinicalTrial> {
    trials
        .iter()
        .filter(|trial| matches_any(term, &[trial.title.as_str()]))
        .collect()
}

pub fn filter_publications<'a>(
    publications: &'a [Publication],
    term: &str,
) -> Vec<&'a Publication> {
    publications
        .iter()
        .filter(|publication| matches_any(term, &[publication.title.as_str()]))
        .collect()
}

/// Experts match on name or specialty.
pub fn filter_experts<'a>(experts: &'a [Expert], term: &str) -> Vec<&'a Expert> {
    experts
        .iter()
        .filter(|expert| matches_any(term, &[expert.name.as_str(), expert.specialty.as_str()]))
        .collect()
}
