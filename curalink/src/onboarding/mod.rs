pub mod patient;
pub mod researcher;

pub use patient::{PatientOnboarding, PatientStep};
pub use researcher::{ResearcherForm, ResearcherFormPatch, split_list};

use crate::model::UserType;

/// In-progress onboarding for the role picked on the landing screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Onboarding {
    Patient(PatientOnboarding),
    Researcher(ResearcherForm),
}

impl Onboarding {
    pub fn for_role(user_type: UserType) -> Self {
        match user_type {
            UserType::Patient => Onboarding::Patient(PatientOnboarding::new()),
            UserType::Researcher => Onboarding::Researcher(ResearcherForm::default()),
        }
    }

    pub fn user_type(&self) -> UserType {
        match self {
            Onboarding::Patient(_) => UserType::Patient,
            Onboarding::Researcher(_) => UserType::Researcher,
        }
    }
}
