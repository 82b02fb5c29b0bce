use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    ai::AiService,
    error::{CuraError, Result},
    model::PatientProfile,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientStep {
    DescribeCondition,
    ConfirmDetails,
}

impl PatientStep {
    fn number(self) -> u8 {
        match self {
            PatientStep::DescribeCondition => 1,
            PatientStep::ConfirmDetails => 2,
        }
    }
}

/// A condition parse in flight, tagged so its result can be matched to
/// the submission that started it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingParse {
    pub token: Uuid,
    pub text: String,
}

/// Two-step patient onboarding: describe the condition in free text, then
/// confirm name, location and the condition tags derived from the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientOnboarding {
    step: PatientStep,
    description: String,
    analyzing: Option<PendingParse>,
    conditions: Vec<String>,
    name: String,
    location: String,
}

impl PatientOnboarding {
    pub fn new() -> Self {
        Self {
            step: PatientStep::DescribeCondition,
            description: String::new(),
            analyzing: None,
            conditions: Vec::new(),
            name: String::new(),
            location: String::new(),
        }
    }

    pub fn step(&self) -> PatientStep {
        self.step
    }

    /// Completion percentage shown in the progress bar.
    pub fn progress(&self) -> u8 {
        self.step.number() * 50
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing.is_some()
    }

    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn set_description(&mut self, text: impl Into<String>) {
        self.description = text.into();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn can_continue(&self) -> bool {
        self.step == PatientStep::DescribeCondition
            && self.analyzing.is_none()
            && !self.description.trim().is_empty()
    }

    /// Start parsing the current description.
    pub fn begin_analysis(&mut self) -> Result<PendingParse> {
        if self.step != PatientStep::DescribeCondition {
            return Err(CuraError::ScreenMismatch {
                action: "submit a condition description",
            });
        }
        if self.analyzing.is_some() {
            return Err(CuraError::Validation(
                "condition description is already being analyzed".to_string(),
            ));
        }
        if self.description.trim().is_empty() {
            return Err(CuraError::Validation(
                "condition description is required".to_string(),
            ));
        }
        let pending = PendingParse {
            token: Uuid::new_v4(),
            text: self.description.clone(),
        };
        self.analyzing = Some(pending.clone());
        Ok(pending)
    }

    /// Record the parse outcome and advance to the confirmation step.
    ///
    /// A failed parse never surfaces: the raw input becomes the only tag.
    /// Returns `false` when `token` is not the parse currently in flight.
    pub fn finish_analysis(&mut self, token: Uuid, outcome: Result<Vec<String>>) -> bool {
        let Some(pending) = self.analyzing.take_if(|pending| pending.token == token) else {
            debug!(%token, "Ignoring result of a superseded condition parse");
            return false;
        };
        self.conditions = match outcome {
            Ok(conditions) => conditions,
            Err(e) => {
                warn!(error = %e, "Condition parsing failed, using raw input as the condition");
                vec![pending.text]
            }
        };
        self.step = PatientStep::ConfirmDetails;
        info!(conditions = ?self.conditions, "Condition tags ready for review");
        true
    }

    /// Parse the description through `ai` and advance to step 2.
    pub async fn submit_condition(&mut self, ai: &dyn AiService) -> Result<()> {
        let pending = self.begin_analysis()?;
        let outcome = ai.parse_condition(&pending.text).await;
        self.finish_analysis(pending.token, outcome);
        Ok(())
    }

    pub fn can_complete(&self) -> bool {
        self.step == PatientStep::ConfirmDetails
            && !self.name.trim().is_empty()
            && !self.location.trim().is_empty()
            && !self.conditions.is_empty()
    }

    pub fn complete(&self) -> Result<PatientProfile> {
        if self.step != PatientStep::ConfirmDetails {
            return Err(CuraError::ScreenMismatch {
                action: "create a patient profile",
            });
        }
        if !self.can_complete() {
            return Err(CuraError::Validation(
                "name, location and at least one condition are required".to_string(),
            ));
        }
        Ok(PatientProfile {
            name: self.name.clone(),
            conditions: self.conditions.clone(),
            location: self.location.clone(),
        })
    }
}

impl Default for PatientOnboarding {
    fn default() -> Self {
        Self::new()
    }
}
