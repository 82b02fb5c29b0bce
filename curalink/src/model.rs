use serde::{Deserialize, Serialize};
use std::fmt;

/// The two roles a visitor can pick on the landing screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Patient,
    Researcher,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserType::Patient => write!(f, "patient"),
            UserType::Researcher => write!(f, "researcher"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub name: String,
    pub conditions: Vec<String>,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearcherProfile {
    pub name: String,
    pub specialties: Vec<String>,
    pub research_interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_gate: Option<String>,
    pub available_for_meetings: bool,
}

/// Completed identity record produced by onboarding.
///
/// Serialized with an explicit `type` discriminant so clients can dispatch on
/// the role without inspecting fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum UserProfile {
    Patient(PatientProfile),
    Researcher(ResearcherProfile),
}

impl UserProfile {
    pub fn user_type(&self) -> UserType {
        match self {
            UserProfile::Patient(_) => UserType::Patient,
            UserProfile::Researcher(_) => UserType::Researcher,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            UserProfile::Patient(profile) => &profile.name,
            UserProfile::Researcher(profile) => &profile.name,
        }
    }
}

impl From<PatientProfile> for UserProfile {
    fn from(profile: PatientProfile) -> Self {
        UserProfile::Patient(profile)
    }
}

impl From<ResearcherProfile> for UserProfile {
    fn from(profile: ResearcherProfile) -> Self {
        UserProfile::Researcher(profile)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialStatus {
    Recruiting,
    Completed,
    #[serde(rename = "Not yet recruiting")]
    NotYetRecruiting,
}

impl fmt::Display for TrialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrialStatus::Recruiting => write!(f, "Recruiting"),
            TrialStatus::Completed => write!(f, "Completed"),
            TrialStatus::NotYetRecruiting => write!(f, "Not yet recruiting"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalTrial {
    pub id: String,
    pub title: String,
    pub status: TrialStatus,
    pub location: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub id: String,
    pub title: String,
    pub journal: String,
    pub authors: Vec<String>,
    pub year: u16,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expert {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub institution: String,
    pub publications: u32,
    pub research_interests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumReply {
    pub id: String,
    pub author: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub content: String,
    pub replies: Vec<ForumReply>,
}
