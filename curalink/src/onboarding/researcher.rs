use serde::{Deserialize, Serialize};

use crate::{
    error::{CuraError, Result},
    model::ResearcherProfile,
};

/// Raw field values of the single-page researcher form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearcherForm {
    pub name: String,
    /// Comma-separated
    pub specialties: String,
    /// Comma-separated
    pub research_interests: String,
    pub orcid: String,
    pub research_gate: String,
    pub available_for_meetings: bool,
}

impl Default for ResearcherForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            specialties: String::new(),
            research_interests: String::new(),
            orcid: String::new(),
            research_gate: String::new(),
            available_for_meetings: true,
        }
    }
}

/// Partial update of [`ResearcherForm`]; absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearcherFormPatch {
    pub name: Option<String>,
    pub specialties: Option<String>,
    pub research_interests: Option<String>,
    pub orcid: Option<String>,
    pub research_gate: Option<String>,
    pub available_for_meetings: Option<bool>,
}

impl ResearcherForm {
    pub fn apply(&mut self, patch: ResearcherFormPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(specialties) = patch.specialties {
            self.specialties = specialties;
        }
        if let Some(interests) = patch.research_interests {
            self.research_interests = interests;
        }
        if let Some(orcid) = patch.orcid {
            self.orcid = orcid;
        }
        if let Some(research_gate) = patch.research_gate {
            self.research_gate = research_gate;
        }
        if let Some(available) = patch.available_for_meetings {
            self.available_for_meetings = available;
        }
    }

    /// List fields count as filled only when they hold at least one entry,
    /// so `","` is as empty as `""`.
    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty()
            && !split_list(&self.specialties).is_empty()
            && !split_list(&self.research_interests).is_empty()
    }

    pub fn to_profile(&self) -> Result<ResearcherProfile> {
        if !self.can_submit() {
            return Err(CuraError::Validation(
                "name, specialties and research interests are required".to_string(),
            ));
        }
        Ok(ResearcherProfile {
            name: self.name.clone(),
            specialties: split_list(&self.specialties),
            research_interests: split_list(&self.research_interests),
            orcid: non_blank(&self.orcid),
            research_gate: non_blank(&self.research_gate),
            available_for_meetings: self.available_for_meetings,
        })
    }
}

/// Split a comma-separated field into trimmed, non-empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
