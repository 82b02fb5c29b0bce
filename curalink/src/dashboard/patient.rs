use serde::Serialize;
use std::str::FromStr;

use super::{
    ExpertCard, ForumThread, NavView, PageHeader, PublicationCard, SavedItems, Shell, Sidebar,
    TrialCard, initial, parse_view,
};
use crate::{
    dataset::{Dataset, head},
    error::CuraError,
    favorites::FavoriteCategory,
    forum::Forum,
    model::PatientProfile,
    search::{filter_experts, filter_publications, filter_trials},
    summary::{CardKey, SummaryCards},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientView {
    Dashboard,
    Experts,
    Trials,
    Publications,
    Forums,
    Favorites,
}

impl NavView for PatientView {
    const ALL: &'static [Self] = &[
        PatientView::Dashboard,
        PatientView::Experts,
        PatientView::Trials,
        PatientView::Publications,
        PatientView::Forums,
        PatientView::Favorites,
    ];

    fn id(self) -> &'static str {
        match self {
            PatientView::Dashboard => "dashboard",
            PatientView::Experts => "experts",
            PatientView::Trials => "trials",
            PatientView::Publications => "publications",
            PatientView::Forums => "forums",
            PatientView::Favorites => "favorites",
        }
    }

    fn label(self) -> &'static str {
        match self {
            PatientView::Dashboard => "Dashboard",
            PatientView::Experts => "Health Experts",
            PatientView::Trials => "Clinical Trials",
            PatientView::Publications => "Publications",
            PatientView::Forums => "Forums",
            PatientView::Favorites => "My Favorites",
        }
    }
}

impl FromStr for PatientView {
    type Err = CuraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_view(s)
    }
}

/// One line in a dashboard summary card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntry {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum PatientContent {
    Dashboard {
        header: PageHeader,
        recommended_trials: Vec<ListEntry>,
        top_experts: Vec<ListEntry>,
        latest_publications: Vec<ListEntry>,
    },
    Experts {
        header: PageHeader,
        search_term: String,
        experts: Vec<ExpertCard>,
    },
    Trials {
        header: PageHeader,
        search_term: String,
        trials: Vec<TrialCard>,
    },
    Publications {
        header: PageHeader,
        search_term: String,
        publications: Vec<PublicationCard>,
    },
    Forums {
        header: PageHeader,
        posts: Vec<ForumThread>,
    },
    Favorites {
        header: PageHeader,
        saved: SavedItems,
    },
}

/// Number of entries per card on the summary view
const SUMMARY_ENTRIES: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientDashboard {
    profile: PatientProfile,
    pub(crate) shell: Shell<PatientView>,
    pub(crate) summaries: SummaryCards,
}

impl PatientDashboard {
    pub fn new(profile: PatientProfile, forum: Forum) -> Self {
        Self {
            profile,
            shell: Shell::new(PatientView::Dashboard, forum),
            summaries: SummaryCards::new(),
        }
    }

    pub fn profile(&self) -> &PatientProfile {
        &self.profile
    }

    pub fn active_view(&self) -> PatientView {
        self.shell.active_view
    }

    pub fn summaries(&self) -> &SummaryCards {
        &self.summaries
    }

    pub fn sidebar(&self) -> Sidebar {
        Sidebar {
            brand: "CuraLink",
            tagline: "For Patients",
            items: self.shell.nav_items(),
            user_name: self.profile.name.clone(),
            user_initial: initial(&self.profile.name),
            profile_label: "Patient Profile",
        }
    }

    pub fn content(&self, dataset: &Dataset) -> PatientContent {
        let favorites = &self.shell.favorites;
        let term = self.shell.search_term.as_str();

        match self.shell.active_view {
            PatientView::Dashboard => PatientContent::Dashboard {
                header: PageHeader::welcome(
                    &self.profile.name,
                    "Here are your personalized recommendations based on your profile.",
                ),
                recommended_trials: head(&dataset.trials, SUMMARY_ENTRIES)
                    .iter()
                    .map(|trial| ListEntry {
                        id: trial.id.clone(),
                        label: trial.title.clone(),
                    })
                    .collect(),
                top_experts: head(&dataset.experts, SUMMARY_ENTRIES)
                    .iter()
                    .map(|expert| ListEntry {
                        id: expert.id.clone(),
                        label: format!("{} - {}", expert.name, expert.specialty),
                    })
                    .collect(),
                latest_publications: head(&dataset.publications, SUMMARY_ENTRIES)
                    .iter()
                    .map(|publication| ListEntry {
                        id: publication.id.clone(),
                        label: publication.title.clone(),
                    })
                    .collect(),
            },
            PatientView::Experts => PatientContent::Experts {
                header: PageHeader::new(
                    "Health Experts",
                    "Connect with specialists in your area of interest.",
                ),
                search_term: term.to_string(),
                experts: filter_experts(&dataset.experts, term)
                    .into_iter()
                    .map(|expert| {
                        let saved = favorites.contains(FavoriteCategory::Experts, &expert.id);
                        ExpertCard::new(expert, saved)
                    })
                    .collect(),
            },
            PatientView::Trials => PatientContent::Trials {
                header: PageHeader::new(
                    "Clinical Trials",
                    "Find trials relevant to your condition and location.",
                ),
                search_term: term.to_string(),
                trials: filter_trials(&dataset.trials, term)
                    .into_iter()
                    .map(|trial| {
                        let saved = favorites.contains(FavoriteCategory::Trials, &trial.id);
                        let summary = self.summaries.state(&CardKey::trial(&trial.id));
                        TrialCard::new(trial, saved, Some(summary))
                    })
                    .collect(),
            },
            PatientView::Publications => PatientContent::Publications {
                header: PageHeader::new(
                    "Publications",
                    "Explore the latest research papers and articles.",
                ),
                search_term: term.to_string(),
                publications: filter_publications(&dataset.publications, term)
                    .into_iter()
                    .map(|publication| {
                        let saved =
                            favorites.contains(FavoriteCategory::Publications, &publication.id);
                        let summary = self.summaries.state(&CardKey::publication(&publication.id));
                        PublicationCard::new(publication, saved, Some(summary))
                    })
                    .collect(),
            },
            PatientView::Forums => PatientContent::Forums {
                header: PageHeader::new("Forums", "Ask questions and get answers from researchers."),
                posts: self
                    .shell
                    .forum
                    .posts()
                    .iter()
                    .map(|post| ForumThread {
                        id: post.id.clone(),
                        title: post.title.clone(),
                        author: post.author.clone(),
                        category: post.category.clone(),
                        content: post.content.clone(),
                        reply_count: post.replies.len(),
                        // Patients see a preview of the first researcher reply
                        replies: head(&post.replies, 1).to_vec(),
                        draft: None,
                        can_post: None,
                    })
                    .collect(),
            },
            PatientView::Favorites => PatientContent::Favorites {
                header: PageHeader::new(
                    "My Favorites",
                    "Your saved trials, experts, and publications.",
                ),
                saved: SavedItems::collect(dataset, favorites, Some(&self.summaries)),
            },
        }
    }
}
