//! CuraLink connects patients and researchers to clinical trials, publications,
//! health experts and community forums.
//!
//! The crate holds everything except the transport: the navigation state
//! machine, onboarding for both roles, the two dashboards, and a
//! [`SessionRunner`] that applies client [`Action`]s to stored sessions and
//! renders the next [`Screen`] as a serializable view model.

pub mod action;
pub mod ai;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod favorites;
pub mod forum;
pub mod model;
pub mod navigation;
pub mod onboarding;
pub mod runner;
pub mod screen;
pub mod search;
pub mod session;
pub mod storage;
pub mod summary;

// Re-export commonly used types
pub use action::{Action, Completion, Effect};
pub use ai::{AiService, Latency, MockAiService};
pub use dataset::Dataset;
pub use error::{CuraError, Result};
pub use model::{
    ClinicalTrial, Expert, ForumPost, ForumReply, PatientProfile, Publication, ResearcherProfile,
    TrialStatus, UserProfile, UserType,
};
pub use navigation::{NavEvent, Navigator, View};
pub use runner::SessionRunner;
pub use screen::Screen;
pub use session::Session;
pub use storage::{InMemorySessionStorage, SessionStorage};
