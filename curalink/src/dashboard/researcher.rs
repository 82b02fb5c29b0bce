use serde::Serialize;
use std::str::FromStr;

use super::{
    ExpertCard, ForumThread, NavView, PageHeader, SavedItems, Shell, Sidebar, TrialCard, initial,
    parse_view,
};
use crate::{
    dataset::{Dataset, head},
    error::{CuraError, Result},
    favorites::FavoriteCategory,
    forum::Forum,
    model::{ForumReply, ResearcherProfile, TrialStatus},
    search::filter_experts,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResearcherView {
    Dashboard,
    Collaborators,
    Trials,
    Forums,
    Favorites,
}

impl NavView for ResearcherView {
    const ALL: &'static [Self] = &[
        ResearcherView::Dashboard,
        ResearcherView::Collaborators,
        ResearcherView::Trials,
        ResearcherView::Forums,
        ResearcherView::Favorites,
    ];

    fn id(self) -> &'static str {
        match self {
            ResearcherView::Dashboard => "dashboard",
            ResearcherView::Collaborators => "collaborators",
            ResearcherView::Trials => "trials",
            ResearcherView::Forums => "forums",
            ResearcherView::Favorites => "favorites",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ResearcherView::Dashboard => "Dashboard",
            ResearcherView::Collaborators => "Collaborators",
            ResearcherView::Trials => "Manage Trials",
            ResearcherView::Forums => "Forums",
            ResearcherView::Favorites => "My Favorites",
        }
    }
}

impl FromStr for ResearcherView {
    type Err = CuraError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_view(s)
    }
}

/// Link from a summary card to another dashboard view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shortcut {
    pub view: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialForm {
    pub visible: bool,
    pub toggle_label: &'static str,
    pub status_options: Vec<TrialStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ResearcherContent {
    Dashboard {
        header: PageHeader,
        managed_trials: usize,
        open_questions: usize,
        shortcuts: Vec<Shortcut>,
    },
    Collaborators {
        header: PageHeader,
        search_term: String,
        collaborators: Vec<ExpertCard>,
    },
    Trials {
        header: PageHeader,
        form: TrialForm,
        active_trials: Vec<TrialCard>,
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

/// Trials shown as managed by the signed-in researcher
const MANAGED_TRIALS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearcherDashboard {
    profile: ResearcherProfile,
    pub(crate) shell: Shell<ResearcherView>,
    show_trial_form: bool,
}

impl ResearcherDashboard {
    pub fn new(profile: ResearcherProfile, forum: Forum) -> Self {
        Self {
            profile,
            shell: Shell::new(ResearcherView::Dashboard, forum),
            show_trial_form: false,
        }
    }

    pub fn profile(&self) -> &ResearcherProfile {
        &self.profile
    }

    pub fn active_view(&self) -> ResearcherView {
        self.shell.active_view
    }

    pub fn toggle_trial_form(&mut self) -> bool {
        self.show_trial_form = !self.show_trial_form;
        self.show_trial_form
    }

    pub fn set_reply_draft(&mut self, post_id: &str, text: impl Into<String>) -> Result<()> {
        self.shell.forum.set_draft(post_id, text)
    }

    /// Post the pending draft for `post_id` under this researcher's name.
    pub fn post_reply(&mut self, post_id: &str) -> Result<Option<ForumReply>> {
        self.shell.forum.post_reply(post_id, &self.profile.name)
    }

    pub fn sidebar(&self) -> Sidebar {
        Sidebar {
            brand: "CuraLink",
            tagline: "For Researchers",
            items: self.shell.nav_items(),
            user_name: self.profile.name.clone(),
            user_initial: initial(&self.profile.name),
            profile_label: "Researcher Profile",
        }
    }

    pub fn content(&self, dataset: &Dataset) -> ResearcherContent {
        let favorites = &self.shell.favorites;
        let forum = &self.shell.forum;

        match self.shell.active_view {
            ResearcherView::Dashboard => ResearcherContent::Dashboard {
                header: PageHeader::welcome(
                    &self.profile.name,
                    "Here's a summary of your activities and recommendations.",
                ),
                managed_trials: head(&dataset.trials, MANAGED_TRIALS).len(),
                open_questions: forum.awaiting_reply().count(),
                shortcuts: vec![
                    Shortcut {
                        view: ResearcherView::Trials.id(),
                        label: "Add or Manage Trials",
                    },
                    Shortcut {
                        view: ResearcherView::Forums.id(),
                        label: "View Forums",
                    },
                ],
            },
            ResearcherView::Collaborators => ResearcherContent::Collaborators {
                header: PageHeader::new(
                    "Collaborators",
                    "Find and connect with fellow researchers.",
                ),
                search_term: self.shell.search_term.clone(),
                collaborators: filter_experts(&dataset.experts, &self.shell.search_term)
                    .into_iter()
                    .map(|expert| {
                        let saved = favorites.contains(FavoriteCategory::Experts, &expert.id);
                        ExpertCard::new(expert, saved)
                    })
                    .collect(),
            },
            ResearcherView::Trials => ResearcherContent::Trials {
                header: PageHeader::new(
                    "Manage Clinical Trials",
                    "Add new trials or update existing ones.",
                ),
                form: TrialForm {
                    visible: self.show_trial_form,
                    toggle_label: if self.show_trial_form {
                        "Cancel"
                    } else {
                        "Add New Trial"
                    },
                    status_options: vec![
                        TrialStatus::Recruiting,
                        TrialStatus::NotYetRecruiting,
                        TrialStatus::Completed,
                    ],
                },
                active_trials: head(&dataset.trials, MANAGED_TRIALS)
                    .iter()
                    .map(|trial| {
                        let saved = favorites.contains(FavoriteCategory::Trials, &trial.id);
                        TrialCard::new(trial, saved, None)
                    })
                    .collect(),
            },
            ResearcherView::Forums => ResearcherContent::Forums {
                header: PageHeader::new(
                    "Forums",
                    "Engage with patients by answering their questions.",
                ),
                posts: forum
                    .posts()
                    .iter()
                    .map(|post| {
                        let draft = forum.draft(&post.id);
                        ForumThread {
                            id: post.id.clone(),
                            title: post.title.clone(),
                            author: post.author.clone(),
                            category: post.category.clone(),
                            content: post.content.clone(),
                            reply_count: post.replies.len(),
                            replies: post.replies.clone(),
                            draft: Some(draft.to_string()),
                            can_post: Some(!draft.trim().is_empty()),
                        }
                    })
                    .collect(),
            },
            ResearcherView::Favorites => ResearcherContent::Favorites {
                header: PageHeader::new(
                    "My Favorites",
                    "Your saved collaborators, trials, and publications.",
                ),
                saved: SavedItems::collect(dataset, favorites, None),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> (ResearcherDashboard, Dataset) {
        let dataset = Dataset::builtin();
        let profile = ResearcherProfile {
            name: "Dr. X".to_string(),
            specialties: vec!["Oncology".to_string()],
            research_interests: vec!["AI".to_string()],
            orcid: None,
            research_gate: None,
            available_for_meetings: true,
        };
        let forum = Forum::new(dataset.forums.clone());
        (ResearcherDashboard::new(profile, forum), dataset)
    }

    #[test]
    fn starts_on_dashboard_with_welcome_header() {
        let (dashboard, dataset) = dashboard();
        let sidebar = dashboard.sidebar();
        assert_eq!(sidebar.active().unwrap().label, "Dashboard");
        assert_eq!(sidebar.items.len(), 5);
        assert_eq!(sidebar.profile_label, "Researcher Profile");

        let ResearcherContent::Dashboard {
            header,
            managed_trials,
            open_questions,
            shortcuts,
        } = dashboard.content(&dataset)
        else {
            panic!("expected dashboard content");
        };
        assert_eq!(header.title, "Welcome, Dr. X");
        assert_eq!(managed_trials, 3);
        assert_eq!(open_questions, 1);
        assert_eq!(shortcuts[0].view, "trials");
    }

    #[test]
    fn reply_uses_researcher_name_and_updates_open_questions() {
        let (mut dashboard, dataset) = dashboard();
        dashboard
            .set_reply_draft("forum2", "Several trials are already under way.")
            .unwrap();

        let reply = dashboard.post_reply("forum2").unwrap().unwrap();
        assert_eq!(reply.author, "Dr. X");

        let ResearcherContent::Dashboard { open_questions, .. } = dashboard.content(&dataset)
        else {
            panic!("expected dashboard content");
        };
        assert_eq!(open_questions, 0);
    }

    #[test]
    fn forum_view_exposes_drafts_and_all_replies() {
        let (mut dashboard, dataset) = dashboard();
        dashboard.shell.show(ResearcherView::Forums);
        dashboard.set_reply_draft("forum1", "  ").unwrap();
        dashboard.set_reply_draft("forum2", "Soon.").unwrap();

        let ResearcherContent::Forums { posts, .. } = dashboard.content(&dataset) else {
            panic!("expected forums content");
        };
        assert_eq!(posts[0].draft.as_deref(), Some("  "));
        assert_eq!(posts[0].can_post, Some(false));
        assert_eq!(posts[1].can_post, Some(true));
        assert_eq!(posts[0].replies.len(), 1);
    }

    #[test]
    fn trial_form_toggles_label() {
        let (mut dashboard, dataset) = dashboard();
        dashboard.shell.show(ResearcherView::Trials);

        assert!(dashboard.toggle_trial_form());
        let ResearcherContent::Trials {
            form,
            active_trials,
            ..
        } = dashboard.content(&dataset)
        else {
            panic!("expected trials content");
        };
        assert!(form.visible);
        assert_eq!(form.toggle_label, "Cancel");
        assert_eq!(active_trials.len(), 3);

        assert!(!dashboard.toggle_trial_form());
    }

    #[test]
    fn collaborator_search_matches_specialty() {
        let (mut dashboard, dataset) = dashboard();
        dashboard.shell.show(ResearcherView::Collaborators);
        dashboard.shell.search_term = "radiology".to_string();
        dashboard
            .shell
            .favorites
            .toggle(FavoriteCategory::Experts, "exp4");

        let ResearcherContent::Collaborators { collaborators, .. } = dashboard.content(&dataset)
        else {
            panic!("expected collaborators content");
        };
        assert_eq!(collaborators.len(), 1);
        assert_eq!(collaborators[0].name, "Dr. Alex Schmidt");
        assert!(collaborators[0].saved);
    }
}
