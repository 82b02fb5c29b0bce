//! Role-specific dashboards: sidebar navigation, list views with search,
//! favorites, forums and per-card AI summaries.

pub mod patient;
pub mod researcher;

pub use patient::{PatientContent, PatientDashboard, PatientView};
pub use researcher::{ResearcherContent, ResearcherDashboard, ResearcherView};

use serde::Serialize;
use std::str::FromStr;

use crate::{
    dataset::Dataset,
    error::{CuraError, Result},
    favorites::{FavoriteCategory, Favorites},
    forum::Forum,
    model::{ClinicalTrial, Expert, ForumReply, Publication, TrialStatus, UserProfile},
    summary::{CardKey, SummaryCards, SummaryState},
};

/// The dashboard matching the signed-in profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dashboard {
    Patient(PatientDashboard),
    Researcher(ResearcherDashboard),
}

impl Dashboard {
    /// Mount a fresh dashboard: empty favorites, forum seeded from the catalog.
    pub fn mount(profile: UserProfile, dataset: &Dataset) -> Self {
        let forum = Forum::new(dataset.forums.clone());
        match profile {
            UserProfile::Patient(profile) => {
                Dashboard::Patient(PatientDashboard::new(profile, forum))
            }
            UserProfile::Researcher(profile) => {
                Dashboard::Researcher(ResearcherDashboard::new(profile, forum))
            }
        }
    }

    pub fn show_view(&mut self, view: &str) -> Result<()> {
        match self {
            Dashboard::Patient(dashboard) => dashboard.shell.show(view.parse()?),
            Dashboard::Researcher(dashboard) => dashboard.shell.show(view.parse()?),
        }
        Ok(())
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        *self.shell_search() = term.into();
    }

    fn shell_search(&mut self) -> &mut String {
        match self {
            Dashboard::Patient(dashboard) => &mut dashboard.shell.search_term,
            Dashboard::Researcher(dashboard) => &mut dashboard.shell.search_term,
        }
    }

    pub fn favorites(&self) -> &Favorites {
        match self {
            Dashboard::Patient(dashboard) => &dashboard.shell.favorites,
            Dashboard::Researcher(dashboard) => &dashboard.shell.favorites,
        }
    }

    pub fn toggle_favorite(
        &mut self,
        dataset: &Dataset,
        category: FavoriteCategory,
        id: &str,
    ) -> Result<bool> {
        ensure_in_catalog(dataset, category, id)?;
        let favorites = match self {
            Dashboard::Patient(dashboard) => &mut dashboard.shell.favorites,
            Dashboard::Researcher(dashboard) => &mut dashboard.shell.favorites,
        };
        Ok(favorites.toggle(category, id))
    }

    pub fn forum(&self) -> &Forum {
        match self {
            Dashboard::Patient(dashboard) => &dashboard.shell.forum,
            Dashboard::Researcher(dashboard) => &dashboard.shell.forum,
        }
    }

    /// Replying is a researcher capability; the patient forum is read-only.
    pub fn researcher_mut(&mut self, action: &'static str) -> Result<&mut ResearcherDashboard> {
        match self {
            Dashboard::Researcher(dashboard) => Ok(dashboard),
            Dashboard::Patient(_) => Err(CuraError::ScreenMismatch { action }),
        }
    }

    /// Card summaries exist on the patient dashboard only.
    pub fn summaries_mut(&mut self) -> Result<&mut SummaryCards> {
        match self {
            Dashboard::Patient(dashboard) => Ok(&mut dashboard.summaries),
            Dashboard::Researcher(_) => Err(CuraError::ScreenMismatch {
                action: "request an AI summary",
            }),
        }
    }

    pub fn render(&self, dataset: &Dataset) -> DashboardScreen {
        match self {
            Dashboard::Patient(dashboard) => DashboardScreen {
                sidebar: dashboard.sidebar(),
                content: DashboardContent::Patient(dashboard.content(dataset)),
            },
            Dashboard::Researcher(dashboard) => DashboardScreen {
                sidebar: dashboard.sidebar(),
                content: DashboardContent::Researcher(dashboard.content(dataset)),
            },
        }
    }
}

fn ensure_in_catalog(dataset: &Dataset, category: FavoriteCategory, id: &str) -> Result<()> {
    let found = match category {
        FavoriteCategory::Trials => dataset.trial(id).is_some(),
        FavoriteCategory::Experts => dataset.expert(id).is_some(),
        FavoriteCategory::Publications => dataset.publication(id).is_some(),
    };
    if found {
        Ok(())
    } else {
        Err(CuraError::UnknownItem {
            category: match category {
                FavoriteCategory::Trials => "trial",
                FavoriteCategory::Experts => "expert",
                FavoriteCategory::Publications => "publication",
            },
            id: id.to_string(),
        })
    }
}

/// Navigation entries of a dashboard, in sidebar order.
pub trait NavView: Copy + PartialEq + FromStr<Err = CuraError> + 'static {
    const ALL: &'static [Self];

    fn id(self) -> &'static str;
    fn label(self) -> &'static str;
}

/// State shared by both dashboards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell<V> {
    pub active_view: V,
    pub search_term: String,
    pub favorites: Favorites,
    pub forum: Forum,
}

impl<V: NavView> Shell<V> {
    pub fn new(start: V, forum: Forum) -> Self {
        Self {
            active_view: start,
            search_term: String::new(),
            favorites: Favorites::new(),
            forum,
        }
    }

    /// Switch views. List views start with an empty search box.
    pub fn show(&mut self, view: V) {
        if self.active_view != view {
            self.search_term.clear();
        }
        self.active_view = view;
    }

    pub fn nav_items(&self) -> Vec<NavItem> {
        V::ALL
            .iter()
            .map(|view| NavItem {
                id: view.id(),
                label: view.label(),
                active: *view == self.active_view,
            })
            .collect()
    }
}

pub(crate) fn parse_view<V: NavView>(s: &str) -> Result<V> {
    V::ALL
        .iter()
        .copied()
        .find(|view| view.id() == s)
        .ok_or_else(|| CuraError::Validation(format!("unknown dashboard view '{s}'")))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardScreen {
    pub sidebar: Sidebar,
    pub content: DashboardContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DashboardContent {
    Patient(PatientContent),
    Researcher(ResearcherContent),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sidebar {
    pub brand: &'static str,
    pub tagline: &'static str,
    pub items: Vec<NavItem>,
    pub user_name: String,
    pub user_initial: String,
    pub profile_label: &'static str,
}

impl Sidebar {
    pub fn active(&self) -> Option<&NavItem> {
        self.items.iter().find(|item| item.active)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageHeader {
    pub title: String,
    pub subtitle: &'static str,
}

impl PageHeader {
    pub fn new(title: impl Into<String>, subtitle: &'static str) -> Self {
        Self {
            title: title.into(),
            subtitle,
        }
    }

    pub fn welcome(name: &str, subtitle: &'static str) -> Self {
        Self::new(format!("Welcome, {name}"), subtitle)
    }
}

pub(crate) fn initial(name: &str) -> String {
    name.chars().next().map(String::from).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialCard {
    pub id: String,
    pub title: String,
    pub status: TrialStatus,
    pub location: String,
    pub description: String,
    pub url: String,
    pub saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryState>,
}

impl TrialCard {
    pub fn new(trial: &ClinicalTrial, saved: bool, summary: Option<SummaryState>) -> Self {
        Self {
            id: trial.id.clone(),
            title: trial.title.clone(),
            status: trial.status,
            location: trial.location.clone(),
            description: trial.description.clone(),
            url: trial.url.clone(),
            saved,
            summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicationCard {
    pub id: String,
    pub title: String,
    pub journal: String,
    pub authors: Vec<String>,
    pub year: u16,
    pub url: String,
    pub saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryState>,
}

impl PublicationCard {
    pub fn new(publication: &Publication, saved: bool, summary: Option<SummaryState>) -> Self {
        Self {
            id: publication.id.clone(),
            title: publication.title.clone(),
            journal: publication.journal.clone(),
            authors: publication.authors.clone(),
            year: publication.year,
            url: publication.url.clone(),
            saved,
            summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpertCard {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub institution: String,
    pub publications: u32,
    pub research_interests: Vec<String>,
    pub saved: bool,
}

impl ExpertCard {
    pub fn new(expert: &Expert, saved: bool) -> Self {
        Self {
            id: expert.id.clone(),
            name: expert.name.clone(),
            specialty: expert.specialty.clone(),
            institution: expert.institution.clone(),
            publications: expert.publications,
            research_interests: expert.research_interests.clone(),
            saved,
        }
    }
}

/// A forum post as shown in a forum view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForumThread {
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub content: String,
    pub reply_count: usize,
    pub replies: Vec<ForumReply>,
    /// Present only where the viewer can reply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_post: Option<bool>,
}

/// Saved items in catalog order, for the favorites view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedItems {
    pub empty: bool,
    pub trials: Vec<TrialCard>,
    pub experts: Vec<ExpertCard>,
    pub publications: Vec<PublicationCard>,
}

impl SavedItems {
    pub(crate) fn collect(
        dataset: &Dataset,
        favorites: &Favorites,
        summaries: Option<&SummaryCards>,
    ) -> Self {
        let trials: Vec<_> = dataset
            .trials
            .iter()
            .filter(|trial| favorites.contains(FavoriteCategory::Trials, &trial.id))
            .map(|trial| {
                let summary = summaries.map(|cards| cards.state(&CardKey::trial(&trial.id)));
                TrialCard::new(trial, true, summary)
            })
            .collect();
        let experts: Vec<_> = dataset
            .experts
            .iter()
            .filter(|expert| favorites.contains(FavoriteCategory::Experts, &expert.id))
            .map(|expert| ExpertCard::new(expert, true))
            .collect();
        let publications: Vec<_> = dataset
            .publications
            .iter()
            .filter(|publication| {
                favorites.contains(FavoriteCategory::Publications, &publication.id)
            })
            .map(|publication| {
                let summary =
                    summaries.map(|cards| cards.state(&CardKey::publication(&publication.id)));
                PublicationCard::new(publication, true, summary)
            })
            .collect();

        Self {
            empty: trials.is_empty() && experts.is_empty() && publications.is_empty(),
            trials,
            experts,
            publications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PatientProfile, ResearcherProfile};

    fn researcher() -> UserProfile {
        UserProfile::Researcher(ResearcherProfile {
            name: "Dr. X".to_string(),
            specialties: vec!["Oncology".to_string()],
            research_interests: vec!["AI".to_string()],
            orcid: None,
            research_gate: None,
            available_for_meetings: true,
        })
    }

    fn patient() -> UserProfile {
        UserProfile::Patient(PatientProfile {
            name: "Jane".to_string(),
            conditions: vec!["Glioma".to_string()],
            location: "Boston".to_string(),
        })
    }

    #[test]
    fn mount_matches_profile_role() {
        let dataset = Dataset::builtin();
        assert!(matches!(
            Dashboard::mount(patient(), &dataset),
            Dashboard::Patient(_)
        ));
        assert!(matches!(
            Dashboard::mount(researcher(), &dataset),
            Dashboard::Researcher(_)
        ));
    }

    #[test]
    fn unknown_view_is_rejected() {
        let dataset = Dataset::builtin();
        let mut dashboard = Dashboard::mount(researcher(), &dataset);
        assert!(dashboard.show_view("publications").is_err());
        assert!(dashboard.show_view("collaborators").is_ok());

        let mut dashboard = Dashboard::mount(patient(), &dataset);
        assert!(dashboard.show_view("collaborators").is_err());
        assert!(dashboard.show_view("publications").is_ok());
    }

    #[test]
    fn favorites_must_reference_catalog_items() {
        let dataset = Dataset::builtin();
        let mut dashboard = Dashboard::mount(patient(), &dataset);

        assert!(
            dashboard
                .toggle_favorite(&dataset, FavoriteCategory::Trials, "trial2")
                .unwrap()
        );
        assert!(matches!(
            dashboard.toggle_favorite(&dataset, FavoriteCategory::Experts, "trial2"),
            Err(CuraError::UnknownItem { category: "expert", .. })
        ));
    }

    #[test]
    fn saved_items_follow_catalog_order() {
        let dataset = Dataset::builtin();
        let mut favorites = Favorites::new();
        favorites.toggle(FavoriteCategory::Trials, "trial4");
        favorites.toggle(FavoriteCategory::Trials, "trial1");

        let saved = SavedItems::collect(&dataset, &favorites, None);
        let ids: Vec<_> = saved.trials.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["trial1", "trial4"]);
        assert!(!saved.empty);
        assert!(saved.trials.iter().all(|t| t.saved && t.summary.is_none()));
    }

    #[test]
    fn initial_handles_empty_and_multibyte_names() {
        assert_eq!(initial("Émile"), "É");
        assert_eq!(initial(""), "");
    }
}
