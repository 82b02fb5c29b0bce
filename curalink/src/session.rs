use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    action::{Action, Completion, Effect},
    ai::AiService,
    dashboard::Dashboard,
    dataset::Dataset,
    error::{CuraError, Result},
    navigation::{NavEvent, Navigator, View},
    onboarding::{Onboarding, PatientOnboarding, ResearcherForm},
    screen::{LandingScreen, Screen},
    summary::{CardKey, SummarySubject},
};

/// Screen-local state owned by the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Stage {
    Landing,
    Onboarding(Onboarding),
    Dashboard(Dashboard),
}

/// Everything one visitor has done since opening the app.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    navigator: Navigator,
    stage: Stage,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            navigator: Navigator::new(),
            stage: Stage::Landing,
        }
    }

    pub fn new_random() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    pub fn view(&self) -> View {
        self.navigator.view()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match &self.stage {
            Stage::Dashboard(dashboard) => Some(dashboard),
            _ => None,
        }
    }

    /// Apply one client action. On error the session is left untouched
    /// except for fields the failing action had already validated.
    pub fn apply(&mut self, action: Action, dataset: &Dataset) -> Result<Effect> {
        let name = action.name();
        debug!(session_id = %self.id, action = name, view = %self.view(), "Applying action");

        match action {
            Action::SelectRole { role } => {
                self.navigate(NavEvent::SelectUserType(role), dataset)?;
            }
            Action::Back => {
                self.onboarding_mut("go back to role selection")?;
                self.navigate(NavEvent::Logout, dataset)?;
            }
            Action::Logout => {
                self.dashboard_mut("log out")?;
                self.navigate(NavEvent::Logout, dataset)?;
            }
            Action::SubmitCondition { description } => {
                let onboarding = self.patient_onboarding_mut("submit a condition")?;
                onboarding.set_description(description);
                let pending = onboarding.begin_analysis()?;
                return Ok(Effect::ParseCondition {
                    token: pending.token,
                    text: pending.text,
                });
            }
            Action::EditPatientDetails { name, location } => {
                let onboarding = self.patient_onboarding_mut("edit patient details")?;
                if let Some(name) = name {
                    onboarding.set_name(name);
                }
                if let Some(location) = location {
                    onboarding.set_location(location);
                }
            }
            Action::CreatePatientProfile => {
                let profile = self
                    .patient_onboarding_mut("create a patient profile")?
                    .complete()?;
                info!(session_id = %self.id, "Patient profile created");
                self.navigate(NavEvent::Complete(profile.into()), dataset)?;
            }
            Action::EditResearcherForm(patch) => {
                self.researcher_form_mut("edit the researcher form")?
                    .apply(patch);
            }
            Action::SubmitResearcherForm => {
                let profile = self
                    .researcher_form_mut("submit the researcher form")?
                    .to_profile()?;
                info!(session_id = %self.id, "Researcher profile created");
                self.navigate(NavEvent::Complete(profile.into()), dataset)?;
            }
            Action::ShowView { view } => {
                self.dashboard_mut("switch views")?.show_view(&view)?;
            }
            Action::Search { term } => {
                self.dashboard_mut("search")?.set_search_term(term);
            }
            Action::ToggleFavorite { category, id } => {
                let saved = self
                    .dashboard_mut("toggle a favorite")?
                    .toggle_favorite(dataset, category, &id)?;
                debug!(session_id = %self.id, %category, item_id = %id, saved, "Favorite toggled");
            }
            Action::RequestSummary { kind, id } => {
                let key = CardKey { kind, id };
                let summaries = self.dashboard_mut("request an AI summary")?.summaries_mut()?;
                let subject = SummarySubject::resolve(dataset, &key)?;
                let token = summaries.begin(key.clone())?;
                return Ok(Effect::Summarize {
                    key,
                    token,
                    subject,
                });
            }
            Action::SetReplyDraft { post_id, text } => {
                self.dashboard_mut("draft a reply")?
                    .researcher_mut("draft a reply")?
                    .set_reply_draft(&post_id, text)?;
            }
            Action::PostReply { post_id } => {
                let reply = self
                    .dashboard_mut("post a reply")?
                    .researcher_mut("post a reply")?
                    .post_reply(&post_id)?;
                match reply {
                    Some(reply) => {
                        info!(session_id = %self.id, %post_id, reply_id = %reply.id, "Reply posted")
                    }
                    None => debug!(session_id = %self.id, %post_id, "Ignoring empty reply"),
                }
            }
            Action::ToggleTrialForm => {
                self.dashboard_mut("toggle the trial form")?
                    .researcher_mut("toggle the trial form")?
                    .toggle_trial_form();
            }
        }
        Ok(Effect::None)
    }

    /// Feed the result of an [`Effect`] back in. Returns `false` when the
    /// session moved on and the result no longer applies.
    pub fn complete(&mut self, completion: Completion) -> bool {
        let applied = match (completion, &mut self.stage) {
            (
                Completion::ConditionParsed { token, outcome },
                Stage::Onboarding(Onboarding::Patient(onboarding)),
            ) => onboarding.finish_analysis(token, outcome),
            (
                Completion::SummaryReady {
                    key,
                    token,
                    outcome,
                },
                Stage::Dashboard(dashboard),
            ) => dashboard
                .summaries_mut()
                .map(|summaries| summaries.finish(&key, token, outcome))
                .unwrap_or(false),
            _ => false,
        };
        if !applied {
            debug!(session_id = %self.id, "Discarding stale completion");
        }
        applied
    }

    /// Apply an action and run its effect to completion in place.
    pub async fn dispatch(
        &mut self,
        action: Action,
        dataset: &Dataset,
        ai: &dyn AiService,
    ) -> Result<()> {
        let effect = self.apply(action, dataset)?;
        if let Some(completion) = effect.run(ai).await {
            self.complete(completion);
        }
        Ok(())
    }

    pub fn render(&self, dataset: &Dataset) -> Screen {
        match &self.stage {
            Stage::Landing => Screen::Landing(LandingScreen::new()),
            Stage::Onboarding(Onboarding::Patient(onboarding)) => {
                Screen::PatientOnboarding(onboarding.into())
            }
            Stage::Onboarding(Onboarding::Researcher(form)) => {
                Screen::ResearcherOnboarding(form.into())
            }
            Stage::Dashboard(dashboard) => Screen::Dashboard(dashboard.render(dataset)),
        }
    }

    /// Move the navigator and rebuild the screen-local state for the new view.
    fn navigate(&mut self, event: NavEvent, dataset: &Dataset) -> Result<()> {
        self.navigator.apply(event)?;
        self.stage = match (self.navigator.user_type(), self.navigator.profile()) {
            (_, Some(profile)) => Stage::Dashboard(Dashboard::mount(profile.clone(), dataset)),
            (Some(user_type), None) => Stage::Onboarding(Onboarding::for_role(user_type)),
            (None, None) => Stage::Landing,
        };
        Ok(())
    }

    fn onboarding_mut(&mut self, action: &'static str) -> Result<&mut Onboarding> {
        match &mut self.stage {
            Stage::Onboarding(onboarding) => Ok(onboarding),
            _ => Err(CuraError::ScreenMismatch { action }),
        }
    }

    fn patient_onboarding_mut(&mut self, action: &'static str) -> Result<&mut PatientOnboarding> {
        match self.onboarding_mut(action)? {
            Onboarding::Patient(onboarding) => Ok(onboarding),
            Onboarding::Researcher(_) => Err(CuraError::ScreenMismatch { action }),
        }
    }

    fn researcher_form_mut(&mut self, action: &'static str) -> Result<&mut ResearcherForm> {
        match self.onboarding_mut(action)? {
            Onboarding::Researcher(form) => Ok(form),
            Onboarding::Patient(_) => Err(CuraError::ScreenMismatch { action }),
        }
    }

    fn dashboard_mut(&mut self, action: &'static str) -> Result<&mut Dashboard> {
        match &mut self.stage {
            Stage::Dashboard(dashboard) => Ok(dashboard),
            _ => Err(CuraError::ScreenMismatch { action }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ai::MockAiService,
        dashboard::{DashboardContent, PatientContent, ResearcherContent},
        favorites::FavoriteCategory,
        model::UserType,
        onboarding::{PatientStep, ResearcherFormPatch},
        summary::{CardKind, SummaryState},
    };

    fn researcher_on_dashboard(dataset: &Dataset) -> Session {
        let mut session = Session::new("s1");
        session
            .apply(
                Action::SelectRole {
                    role: UserType::Researcher,
                },
                dataset,
            )
            .unwrap();
        session
            .apply(
                Action::EditResearcherForm(ResearcherFormPatch {
                    name: Some("Dr. X".to_string()),
                    specialties: Some("Oncology".to_string()),
                    research_interests: Some("AI".to_string()),
                    ..Default::default()
                }),
                dataset,
            )
            .unwrap();
        session
            .apply(Action::SubmitResearcherForm, dataset)
            .unwrap();
        session
    }

    #[test]
    fn new_session_renders_landing() {
        let session = Session::new("s1");
        let Screen::Landing(landing) = session.render(&Dataset::builtin()) else {
            panic!("expected landing screen");
        };
        assert_eq!(landing.title, "CuraLink");
        assert_eq!(landing.roles.len(), 2);
        assert_eq!(session.view(), View::Landing);
    }

    #[test]
    fn researcher_reaches_dashboard_with_welcome() {
        let dataset = Dataset::builtin();
        let session = researcher_on_dashboard(&dataset);
        assert_eq!(session.view(), View::Dashboard);

        let Screen::Dashboard(screen) = session.render(&dataset) else {
            panic!("expected dashboard screen");
        };
        assert_eq!(screen.sidebar.active().unwrap().label, "Dashboard");
        let DashboardContent::Researcher(ResearcherContent::Dashboard { header, .. }) =
            screen.content
        else {
            panic!("expected researcher summary");
        };
        assert_eq!(header.title, "Welcome, Dr. X");
    }

    #[tokio::test]
    async fn patient_condition_is_parsed_into_tags() {
        let dataset = Dataset::builtin();
        let ai = MockAiService::instant();
        let mut session = Session::new("s1");
        session
            .dispatch(
                Action::SelectRole {
                    role: UserType::Patient,
                },
                &dataset,
                &ai,
            )
            .await
            .unwrap();
        session
            .dispatch(
                Action::SubmitCondition {
                    description: "I have Lung Cancer".to_string(),
                },
                &dataset,
                &ai,
            )
            .await
            .unwrap();

        let Screen::PatientOnboarding(screen) = session.render(&dataset) else {
            panic!("expected patient onboarding");
        };
        assert_eq!(screen.step, PatientStep::ConfirmDetails);
        assert_eq!(screen.progress, 100);
        assert_eq!(screen.conditions, ["Lung Cancer", "Immunotherapy"]);
        assert!(!screen.analyzing);
    }

    #[test]
    fn condition_submission_returns_parse_effect_and_marks_analyzing() {
        let dataset = Dataset::builtin();
        let mut session = Session::new("s1");
        session
            .apply(
                Action::SelectRole {
                    role: UserType::Patient,
                },
                &dataset,
            )
            .unwrap();
        let effect = session
            .apply(
                Action::SubmitCondition {
                    description: "headaches".to_string(),
                },
                &dataset,
            )
            .unwrap();
        let Effect::ParseCondition { text, .. } = effect else {
            panic!("expected a parse effect");
        };
        assert_eq!(text, "headaches");
        let Screen::PatientOnboarding(screen) = session.render(&dataset) else {
            panic!("expected patient onboarding");
        };
        assert!(screen.analyzing);
    }

    #[test]
    fn back_returns_to_landing_and_clears_form() {
        let dataset = Dataset::builtin();
        let mut session = Session::new("s1");
        session
            .apply(
                Action::SelectRole {
                    role: UserType::Researcher,
                },
                &dataset,
            )
            .unwrap();
        session
            .apply(
                Action::EditResearcherForm(ResearcherFormPatch {
                    name: Some("Dr. X".to_string()),
                    ..Default::default()
                }),
                &dataset,
            )
            .unwrap();
        session.apply(Action::Back, &dataset).unwrap();
        assert_eq!(session.view(), View::Landing);

        session
            .apply(
                Action::SelectRole {
                    role: UserType::Researcher,
                },
                &dataset,
            )
            .unwrap();
        let Screen::ResearcherOnboarding(screen) = session.render(&dataset) else {
            panic!("expected researcher onboarding");
        };
        assert_eq!(screen.form.name, "");
    }

    #[test]
    fn actions_for_other_screens_are_rejected() {
        let dataset = Dataset::builtin();
        let mut session = Session::new("s1");

        let err = session
            .apply(
                Action::Search {
                    term: "x".to_string(),
                },
                &dataset,
            )
            .unwrap_err();
        assert!(matches!(err, CuraError::ScreenMismatch { .. }));

        let err = session.apply(Action::Logout, &dataset).unwrap_err();
        assert!(matches!(err, CuraError::ScreenMismatch { .. }));

        let err = session
            .apply(Action::SubmitResearcherForm, &dataset)
            .unwrap_err();
        assert!(matches!(err, CuraError::ScreenMismatch { .. }));
        assert_eq!(session.view(), View::Landing);
    }

    #[test]
    fn selecting_a_role_twice_is_an_invalid_transition() {
        let dataset = Dataset::builtin();
        let mut session = Session::new("s1");
        session
            .apply(
                Action::SelectRole {
                    role: UserType::Patient,
                },
                &dataset,
            )
            .unwrap();
        let err = session
            .apply(
                Action::SelectRole {
                    role: UserType::Researcher,
                },
                &dataset,
            )
            .unwrap_err();
        assert!(matches!(err, CuraError::InvalidTransition { .. }));
    }

    #[test]
    fn logout_drops_dashboard_state() {
        let dataset = Dataset::builtin();
        let mut session = researcher_on_dashboard(&dataset);
        session
            .apply(
                Action::ToggleFavorite {
                    category: FavoriteCategory::Trials,
                    id: "trial2".to_string(),
                },
                &dataset,
            )
            .unwrap();
        let favorites = session.dashboard().unwrap().favorites();
        assert!(favorites.contains(FavoriteCategory::Trials, "trial2"));

        session.apply(Action::Logout, &dataset).unwrap();
        assert_eq!(session.view(), View::Landing);
        assert!(session.dashboard().is_none());
        assert!(session.navigator().profile().is_none());
    }

    #[test]
    fn researcher_cannot_request_summaries() {
        let dataset = Dataset::builtin();
        let mut session = researcher_on_dashboard(&dataset);
        let err = session
            .apply(
                Action::RequestSummary {
                    kind: CardKind::Trial,
                    id: "trial1".to_string(),
                },
                &dataset,
            )
            .unwrap_err();
        assert!(matches!(err, CuraError::ScreenMismatch { .. }));
    }

    #[tokio::test]
    async fn patient_summary_flows_through_effect() {
        let dataset = Dataset::builtin();
        let ai = MockAiService::instant();
        let mut session = Session::new("s1");
        for action in [
            Action::SelectRole {
                role: UserType::Patient,
            },
            Action::SubmitCondition {
                description: "brain cancer".to_string(),
            },
            Action::EditPatientDetails {
                name: Some("Jane".to_string()),
                location: Some("Oslo".to_string()),
            },
            Action::CreatePatientProfile,
            Action::ShowView {
                view: "publications".to_string(),
            },
        ] {
            session.dispatch(action, &dataset, &ai).await.unwrap();
        }

        let effect = session
            .apply(
                Action::RequestSummary {
                    kind: CardKind::Publication,
                    id: "pub2".to_string(),
                },
                &dataset,
            )
            .unwrap();
        let completion = effect.run(&ai).await.unwrap();
        assert!(session.complete(completion));

        let Screen::Dashboard(screen) = session.render(&dataset) else {
            panic!("expected dashboard");
        };
        let DashboardContent::Patient(PatientContent::Publications { publications, .. }) =
            screen.content
        else {
            panic!("expected publications");
        };
        let card = publications.iter().find(|card| card.id == "pub2").unwrap();
        assert!(matches!(card.summary, Some(SummaryState::Ready(_))));
        let other = publications.iter().find(|card| card.id == "pub1").unwrap();
        assert_eq!(other.summary, Some(SummaryState::Idle));
    }

    #[tokio::test]
    async fn stale_completion_is_discarded_after_back() {
        let dataset = Dataset::builtin();
        let ai = MockAiService::instant();
        let mut session = Session::new("s1");
        session
            .apply(
                Action::SelectRole {
                    role: UserType::Patient,
                },
                &dataset,
            )
            .unwrap();
        let effect = session
            .apply(
                Action::SubmitCondition {
                    description: "diabetes".to_string(),
                },
                &dataset,
            )
            .unwrap();
        session.apply(Action::Back, &dataset).unwrap();

        let completion = effect.run(&ai).await.unwrap();
        assert!(!session.complete(completion));
        assert_eq!(session.view(), View::Landing);
    }

    #[tokio::test]
    async fn earlier_parse_cannot_complete_a_resubmitted_condition() {
        let dataset = Dataset::builtin();
        let ai = MockAiService::instant();
        let mut session = Session::new("s1");
        let select_patient = Action::SelectRole {
            role: UserType::Patient,
        };
        session.apply(select_patient.clone(), &dataset).unwrap();
        let earlier = session
            .apply(
                Action::SubmitCondition {
                    description: "diabetes".to_string(),
                },
                &dataset,
            )
            .unwrap();
        session.apply(Action::Back, &dataset).unwrap();
        session.apply(select_patient, &dataset).unwrap();
        let current = session
            .apply(
                Action::SubmitCondition {
                    description: "My mother has brain cancer".to_string(),
                },
                &dataset,
            )
            .unwrap();

        assert!(!session.complete(earlier.run(&ai).await.unwrap()));
        let Screen::PatientOnboarding(screen) = session.render(&dataset) else {
            panic!("expected patient onboarding");
        };
        assert!(screen.analyzing);

        assert!(session.complete(current.run(&ai).await.unwrap()));
        let Screen::PatientOnboarding(screen) = session.render(&dataset) else {
            panic!("expected patient onboarding");
        };
        assert_eq!(screen.conditions, vec!["Brain Cancer", "Glioma"]);
    }
}
