//! Text-generation capability used by onboarding and dashboard cards.
//!
//! [`AiService`] is the seam a real generative backend would plug into. The
//! shipped [`MockAiService`] answers locally with canned output after a fixed
//! artificial delay, which can be switched off for tests.

use async_trait::async_trait;
use serde::Serialize;
use std::{str::FromStr, sync::Arc, time::Duration};
use tracing::debug;

use crate::{
    dataset::{Dataset, head, window},
    error::Result,
    model::{ClinicalTrial, Expert, Publication, UserProfile},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRecommendations {
    pub trials: Vec<ClinicalTrial>,
    pub experts: Vec<Expert>,
    pub publications: Vec<Publication>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResearcherRecommendations {
    pub trials: Vec<ClinicalTrial>,
    pub collaborators: Vec<Expert>,
    pub publications: Vec<Publication>,
}

#[async_trait]
pub trait AiService: Send + Sync {
    /// Turn a free-text description into condition tags.
    async fn parse_condition(&self, text: &str) -> Result<Vec<String>>;

    async fn publication_summary(&self, publication: &Publication) -> Result<String>;

    async fn trial_summary(&self, trial: &ClinicalTrial) -> Result<String>;

    async fn patient_recommendations(
        &self,
        profile: &UserProfile,
    ) -> Result<PatientRecommendations>;

    async fn researcher_recommendations(
        &self,
        profile: &UserProfile,
    ) -> Result<ResearcherRecommendations>;
}

/// Artificial delays applied by [`MockAiService`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub parse: Duration,
    pub summary: Duration,
    pub recommendations: Duration,
}

impl Latency {
    pub fn simulated() -> Self {
        Self {
            parse: Duration::from_millis(500),
            summary: Duration::from_millis(700),
            recommendations: Duration::from_millis(1000),
        }
    }

    pub fn none() -> Self {
        Self {
            parse: Duration::ZERO,
            summary: Duration::ZERO,
            recommendations: Duration::ZERO,
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::simulated()
    }
}

impl FromStr for Latency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulated" => Ok(Self::simulated()),
            "none" | "off" => Ok(Self::none()),
            other => Err(format!(
                "unknown latency profile '{other}', expected 'simulated' or 'none'"
            )),
        }
    }
}

/// Keyword rules for condition parsing, checked in order
const CONDITION_RULES: &[(&str, &[&str])] = &[
    ("brain cancer", &["Brain Cancer", "Glioma"]),
    ("lung cancer", &["Lung Cancer", "Immunotherapy"]),
];

const GENERAL_HEALTH: &str = "General Health";

/// Tags for a free-text condition description.
pub fn condition_tags(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tags: &[&str] = CONDITION_RULES
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, tags)| *tags)
        .unwrap_or(&[GENERAL_HEALTH]);
    tags.iter().map(|tag| tag.to_string()).collect()
}

/// Canned summary sentence for a titled document.
pub fn templated_summary(title: &str) -> String {
    format!(
        "This document, titled \"{title}\", discusses key aspects of its subject matter in a concise format. It aims to provide a clear overview for patients and researchers, highlighting the main objectives, methods, and potential implications of the study or work."
    )
}

/// Local stand-in for a generative AI backend.
#[derive(Debug, Clone)]
pub struct MockAiService {
    dataset: Arc<Dataset>,
    latency: Latency,
}

impl MockAiService {
    pub fn new(dataset: Arc<Dataset>, latency: Latency) -> Self {
        Self { dataset, latency }
    }

    /// Zero-delay instance over the built-in catalog.
    pub fn instant() -> Self {
        Self::new(Arc::new(Dataset::builtin()), Latency::none())
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    async fn delay(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

#[async_trait]
impl AiService for MockAiService {
    async fn parse_condition(&self, text: &str) -> Result<Vec<String>> {
        debug!(input_length = text.len(), "Simulating condition parsing");
        self.delay(self.latency.parse).await;
        Ok(condition_tags(text))
    }

    async fn publication_summary(&self, publication: &Publication) -> Result<String> {
        debug!(publication_id = %publication.id, "Simulating publication summary");
        self.delay(self.latency.summary).await;
        Ok(templated_summary(&publication.title))
    }

    async fn trial_summary(&self, trial: &ClinicalTrial) -> Result<String> {
        debug!(trial_id = %trial.id, "Simulating trial summary");
        self.delay(self.latency.summary).await;
        Ok(templated_summary(&trial.title))
    }

    async fn patient_recommendations(
        &self,
        profile: &UserProfile,
    ) -> Result<PatientRecommendations> {
        debug!(name = %profile.name(), "Simulating patient recommendations");
        self.delay(self.latency.recommendations).await;
        Ok(PatientRecommendations {
            trials: head(&self.dataset.trials, 3).to_vec(),
            experts: head(&self.dataset.experts, 4).to_vec(),
            publications: head(&self.dataset.publications, 3).to_vec(),
        })
    }

    async fn researcher_recommendations(
        &self,
        profile: &UserProfile,
    ) -> Result<ResearcherRecommendations> {
        debug!(name = %profile.name(), "Simulating researcher recommendations");
        self.delay(self.latency.recommendations).await;
        Ok(ResearcherRecommendations {
            trials: window(&self.dataset.trials, 1, 4).to_vec(),
            collaborators: window(&self.dataset.experts, 2, 6).to_vec(),
            publications: window(&self.dataset.publications, 2, 5).to_vec(),
        })
    }
}
