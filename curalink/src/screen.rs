//! Serializable view models for every top-level screen.

use serde::Serialize;

use crate::{
    dashboard::DashboardScreen,
    model::UserType,
    navigation::View,
    onboarding::{PatientOnboarding, PatientStep, ResearcherForm},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Landing(LandingScreen),
    PatientOnboarding(PatientOnboardingScreen),
    ResearcherOnboarding(ResearcherOnboardingScreen),
    Dashboard(DashboardScreen),
}

impl Screen {
    pub fn view(&self) -> View {
        match self {
            Screen::Landing(_) => View::Landing,
            Screen::PatientOnboarding(_) | Screen::ResearcherOnboarding(_) => View::Onboarding,
            Screen::Dashboard(_) => View::Dashboard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleOption {
    pub role: UserType,
    pub heading: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandingScreen {
    pub title: &'static str,
    pub tagline: &'static str,
    pub prompt: &'static str,
    pub roles: Vec<RoleOption>,
}

impl LandingScreen {
    pub fn new() -> Self {
        Self {
            title: "CuraLink",
            tagline: "Connecting patients and researchers to discover relevant clinical trials, publications, and health experts.",
            prompt: "How would you like to get started?",
            roles: vec![
                RoleOption {
                    role: UserType::Patient,
                    heading: "I am a Patient or Caregiver",
                    description: "Find personalized clinical trials, health experts, and the latest research.",
                },
                RoleOption {
                    role: UserType::Researcher,
                    heading: "I am a Researcher",
                    description: "Discover collaborators, manage trials, and engage with the community.",
                },
            ],
        }
    }
}

impl Default for LandingScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientOnboardingScreen {
    pub title: &'static str,
    pub step: PatientStep,
    pub progress: u8,
    pub description: String,
    pub analyzing: bool,
    pub can_continue: bool,
    pub conditions: Vec<String>,
    pub name: String,
    pub location: String,
    pub can_complete: bool,
}

impl From<&PatientOnboarding> for PatientOnboardingScreen {
    fn from(onboarding: &PatientOnboarding) -> Self {
        Self {
            title: "Patient Profile Setup",
            step: onboarding.step(),
            progress: onboarding.progress(),
            description: onboarding.description().to_string(),
            analyzing: onboarding.is_analyzing(),
            can_continue: onboarding.can_continue(),
            conditions: onboarding.conditions().to_vec(),
            name: onboarding.name().to_string(),
            location: onboarding.location().to_string(),
            can_complete: onboarding.can_complete(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResearcherOnboardingScreen {
    pub title: &'static str,
    pub form: ResearcherForm,
    pub can_submit: bool,
}

impl From<&ResearcherForm> for ResearcherOnboardingScreen {
    fn from(form: &ResearcherForm) -> Self {
        Self {
            title: "Researcher Profile Setup",
            form: form.clone(),
            can_submit: form.can_submit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_serializes_with_screen_tag() {
        let screen = Screen::Landing(LandingScreen::new());
        assert_eq!(screen.view(), View::Landing);

        let value = serde_json::to_value(&screen).unwrap();
        assert_eq!(value["screen"], "landing");
        assert_eq!(value["title"], "CuraLink");
        assert_eq!(value["roles"][0]["role"], "patient");
        assert_eq!(value["roles"][1]["heading"], "I am a Researcher");
    }

    #[test]
    fn patient_onboarding_starts_at_half_progress() {
        let screen: PatientOnboardingScreen = (&PatientOnboarding::new()).into();
        assert_eq!(screen.step, PatientStep::DescribeCondition);
        assert_eq!(screen.progress, 50);
        assert!(!screen.can_continue);
        assert!(!screen.analyzing);

        let value = serde_json::to_value(Screen::PatientOnboarding(screen)).unwrap();
        assert_eq!(value["screen"], "patient_onboarding");
        assert_eq!(value["step"], "describe_condition");
    }

    #[test]
    fn researcher_form_defaults_to_available() {
        let screen: ResearcherOnboardingScreen = (&ResearcherForm::default()).into();
        assert!(screen.form.available_for_meetings);
        assert!(!screen.can_submit);
    }
}
