//! Static catalog backing every dashboard.
//!
//! The catalog is fixed at construction and never mutated. Forum posts are the
//! one exception at runtime: each dashboard clones [`Dataset::forums`] into its
//! own [`crate::forum::Forum`] and appends replies there.

use crate::model::{ClinicalTrial, Expert, ForumPost, ForumReply, Publication, TrialStatus};

#[derive(Debug, Clone)]
pub struct Dataset {
    pub trials: Vec<ClinicalTrial>,
    pub publications: Vec<Publication>,
    pub experts: Vec<Expert>,
    pub forums: Vec<ForumPost>,
}

impl Dataset {
    /// The built-in mock catalog.
    pub fn builtin() -> Self {
        Self {
            trials: builtin_trials(),
            publications: builtin_publications(),
            experts: builtin_experts(),
            forums: builtin_forums(),
        }
    }

    pub fn trial(&self, id: &str) -> Option<&ClinicalTrial> {
        self.trials.iter().find(|trial| trial.id == id)
    }

    pub fn publication(&self, id: &str) -> Option<&Publication> {
        self.publications.iter().find(|publication| publication.id == id)
    }

    pub fn expert(&self, id: &str) -> Option<&Expert> {
        self.experts.iter().find(|expert| expert.id == id)
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::builtin()
    }
}

/// First `n` elements, or the whole slice when it is shorter.
pub(crate) fn head<T>(items: &[T], n: usize) -> &[T] {
    &items[..n.min(items.len())]
}

/// Elements in `start..end`, clamped to the slice bounds.
pub(crate) fn window<T>(items: &[T], start: usize, end: usize) -> &[T] {
    let end = end.min(items.len());
    let start = start.min(end);
    &items[start..end]
}

fn trial(
    id: &str,
    title: &str,
    status: TrialStatus,
    location: &str,
    description: &str,
) -> ClinicalTrial {
    ClinicalTrial {
        id: id.to_string(),
        title: title.to_string(),
        status,
        location: location.to_string(),
        description: description.to_string(),
        url: "#".to_string(),
    }
}

fn builtin_trials() -> Vec<ClinicalTrial> {
    vec![
        trial(
            "trial1",
            "Immunotherapy Combination for Recurrent Glioblastoma",
            TrialStatus::Recruiting,
            "New York, USA",
            "A phase II clinical trial evaluating the efficacy of a new immunotherapy combination for patients with recurrent glioblastoma.",
        ),
        trial(
            "trial2",
            "A Study of a New Oral Treatment for NSCLC",
            TrialStatus::Recruiting,
            "London, UK",
            "This study will test a new oral medication for non-small cell lung cancer.",
        ),
        trial(
            "trial3",
            "CAR-T Cell Therapy for Advanced Melanoma",
            TrialStatus::Completed,
            "Global",
            "A completed trial on the use of CAR-T cell therapy in advanced melanoma patients.",
        ),
        trial(
            "trial4",
            "Preventative Vaccine for High-Risk Individuals",
            TrialStatus::NotYetRecruiting,
            "Boston, USA",
            "A future trial for a vaccine aimed at individuals with a high genetic risk for certain cancers.",
        ),
    ]
}

fn publication(id: &str, title: &str, journal: &str, authors: [&str; 2], year: u16) -> Publication {
    Publication {
        id: id.to_string(),
        title: title.to_string(),
        journal: journal.to_string(),
        authors: authors.iter().map(|author| author.to_string()).collect(),
        year,
        url: "#".to_string(),
    }
}

fn builtin_publications() -> Vec<Publication> {
    vec![
        publication(
            "pub1",
            "Advances in Glioblastoma Immunotherapy",
            "Nature Medicine",
            ["Dr. Emily Carter", "Dr. Ben Hanson"],
            2023,
        ),
        publication(
            "pub2",
            "Targeted Gene Therapy for Lung Cancer",
            "The Lancet",
            ["Dr. Sarah Jenkins", "Dr. Omar Rashid"],
            2023,
        ),
        publication(
            "pub3",
            "A Phase III Study of a Novel Kinase Inhibitor",
            "NEJM",
            ["Dr. David Chen", "Dr. Maria Rodriguez"],
            2022,
        ),
        publication(
            "pub4",
            "The Role of AI in Diagnostic Radiology",
            "JAMA",
            ["Dr. Alex Schmidt", "Dr. Priya Sharma"],
            2024,
        ),
    ]
}

fn expert(
    id: &str,
    name: &str,
    specialty: &str,
    institution: &str,
    publications: u32,
    interests: [&str; 2],
) -> Expert {
    Expert {
        id: id.to_string(),
        name: name.to_string(),
        specialty: specialty.to_string(),
        institution: institution.to_string(),
        publications,
        research_interests: interests.iter().map(|interest| interest.to_string()).collect(),
    }
}

fn builtin_experts() -> Vec<Expert> {
    vec![
        expert(
            "exp1",
            "Dr. Emily Carter",
            "Neuro-Oncology",
            "Global Cancer Institute",
            75,
            ["Immunotherapy", "Glioma Biology"],
        ),
        expert(
            "exp2",
            "Dr. Sarah Jenkins",
            "Thoracic Oncology",
            "Unity Health System",
            112,
            ["Gene Therapy", "Targeted Agents"],
        ),
        expert(
            "exp3",
            "Dr. David Chen",
            "Clinical Trials",
            "Advanced Research Center",
            98,
            ["Pharmacology", "Trial Design"],
        ),
        expert(
            "exp4",
            "Dr. Alex Schmidt",
            "Radiology & AI",
            "TechMed University",
            45,
            ["Medical Imaging", "Machine Learning"],
        ),
    ]
}

fn builtin_forums() -> Vec<ForumPost> {
    vec![
        ForumPost {
            id: "forum1".to_string(),
            title: "Managing side effects of new immunotherapy?".to_string(),
            author: "John D.".to_string(),
            category: "Cancer Research".to_string(),
            content: "I'm about to start a new immunotherapy trial and was wondering what to expect in terms of side effects. Any advice from researchers on how to best manage them?".to_string(),
            replies: vec![ForumReply {
                id: "reply1".to_string(),
                author: "Dr. Emily Carter".to_string(),
                content: "This is an excellent question. Common side effects include fatigue and skin reactions. It is crucial to maintain open communication with your clinical team, as they can provide supportive care measures tailored to your specific experience. We are seeing promising management strategies emerge from recent studies.".to_string(),
            }],
        },
        ForumPost {
            id: "forum2".to_string(),
            title: "What's the future of gene therapy?".to_string(),
            author: "Jane S.".to_string(),
            category: "Clinical Trials Insights".to_string(),
            content: "I keep hearing about gene therapy. How far away are we from it being a common treatment for cancers like lung cancer?".to_string(),
            replies: Vec::new(),
        },
    ]
}
