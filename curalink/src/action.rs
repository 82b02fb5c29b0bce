use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    ai::AiService,
    error::Result,
    favorites::FavoriteCategory,
    model::UserType,
    onboarding::ResearcherFormPatch,
    summary::{CardKey, CardKind, SummarySubject},
};

/// A UI event sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    SelectRole {
        role: UserType,
    },
    /// "Back to role selection" during onboarding
    Back,
    Logout,

    SubmitCondition {
        description: String,
    },
    EditPatientDetails {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        location: Option<String>,
    },
    CreatePatientProfile,
    EditResearcherForm(ResearcherFormPatch),
    SubmitResearcherForm,

    ShowView {
        view: String,
    },
    Search {
        term: String,
    },
    ToggleFavorite {
        category: FavoriteCategory,
        id: String,
    },
    RequestSummary {
        kind: CardKind,
        id: String,
    },
    SetReplyDraft {
        post_id: String,
        text: String,
    },
    PostReply {
        post_id: String,
    },
    ToggleTrialForm,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SelectRole { .. } => "select_role",
            Action::Back => "back",
            Action::Logout => "logout",
            Action::SubmitCondition { .. } => "submit_condition",
            Action::EditPatientDetails { .. } => "edit_patient_details",
            Action::CreatePatientProfile => "create_patient_profile",
            Action::EditResearcherForm(_) => "edit_researcher_form",
            Action::SubmitResearcherForm => "submit_researcher_form",
            Action::ShowView { .. } => "show_view",
            Action::Search { .. } => "search",
            Action::ToggleFavorite { .. } => "toggle_favorite",
            Action::RequestSummary { .. } => "request_summary",
            Action::SetReplyDraft { .. } => "set_reply_draft",
            Action::PostReply { .. } => "post_reply",
            Action::ToggleTrialForm => "toggle_trial_form",
        }
    }
}

/// Asynchronous work requested by an action. `token` identifies the request
/// so a late result cannot land on state started by a newer one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    ParseCondition {
        token: Uuid,
        text: String,
    },
    Summarize {
        key: CardKey,
        token: Uuid,
        subject: SummarySubject,
    },
}

/// Outcome of an [`Effect`], fed back into the session that requested it.
#[derive(Debug)]
pub enum Completion {
    ConditionParsed {
        token: Uuid,
        outcome: Result<Vec<String>>,
    },
    SummaryReady {
        key: CardKey,
        token: Uuid,
        outcome: Result<String>,
    },
}

impl Effect {
    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }

    pub async fn run(self, ai: &dyn AiService) -> Option<Completion> {
        match self {
            Effect::None => None,
            Effect::ParseCondition { token, text } => {
                let outcome = ai.parse_condition(&text).await;
                Some(Completion::ConditionParsed { token, outcome })
            }
            Effect::Summarize {
                key,
                token,
                subject,
            } => {
                let outcome = subject.summarize(ai).await;
                Some(Completion::SummaryReady {
                    key,
                    token,
                    outcome,
                })
            }
        }
    }
}
