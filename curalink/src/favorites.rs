use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt, sync::Arc};

/// Bookmark category. Researchers call experts "collaborators".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteCategory {
    Trials,
    #[serde(alias = "collaborators")]
    Experts,
    Publications,
}

impl fmt::Display for FavoriteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FavoriteCategory::Trials => write!(f, "trials"),
            FavoriteCategory::Experts => write!(f, "experts"),
            FavoriteCategory::Publications => write!(f, "publications"),
        }
    }
}

pub type IdSet = Arc<BTreeSet<String>>;

/// Per-dashboard bookmark sets, one per category.
///
/// A toggle swaps in a fresh set for the touched category only; the other
/// categories keep pointing at the same allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Favorites {
    trials: IdSet,
    experts: IdSet,
    publications: IdSet,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: FavoriteCategory) -> &IdSet {
        match category {
            FavoriteCategory::Trials => &self.trials,
            FavoriteCategory::Experts => &self.experts,
            FavoriteCategory::Publications => &self.publications,
        }
    }

    fn slot(&mut self, category: FavoriteCategory) -> &mut IdSet {
        match category {
            FavoriteCategory::Trials => &mut self.trials,
            FavoriteCategory::Experts => &mut self.experts,
            FavoriteCategory::Publications => &mut self.publications,
        }
    }

    pub fn contains(&self, category: FavoriteCategory, id: &str) -> bool {
        self.get(category).contains(id)
    }

    /// Flip membership of `id`. Returns whether it is now a favorite.
    pub fn toggle(&mut self, category: FavoriteCategory, id: &str) -> bool {
        let slot = self.slot(category);
        let mut next: BTreeSet<String> = (**slot).clone();
        let saved = if next.remove(id) {
            false
        } else {
            next.insert(id.to_string());
            true
        };
        *slot = Arc::new(next);
        saved
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty() && self.experts.is_empty() && self.publications.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_membership() {
        let mut favorites = Favorites::new();

        assert!(favorites.toggle(FavoriteCategory::Trials, "trial1"));
        assert!(favorites.contains(FavoriteCategory::Trials, "trial1"));

        assert!(!favorites.toggle(FavoriteCategory::Trials, "trial1"));
        assert!(!favorites.contains(FavoriteCategory::Trials, "trial1"));
        assert!(favorites.is_empty());
    }

    #[test]
    fn double_toggle_restores_original_set() {
        let mut favorites = Favorites::new();
        favorites.toggle(FavoriteCategory::Experts, "exp1");
        favorites.toggle(FavoriteCategory::Experts, "exp3");
        let before = favorites.clone();

        for id in ["exp1", "exp2"] {
            favorites.toggle(FavoriteCategory::Experts, id);
            favorites.toggle(FavoriteCategory::Experts, id);
            assert_eq!(favorites, before);
        }
    }

    #[test]
    fn toggle_replaces_only_the_touched_category() {
        let mut favorites = Favorites::new();
        favorites.toggle(FavoriteCategory::Publications, "pub1");

        let trials = Arc::clone(favorites.get(FavoriteCategory::Trials));
        let experts = Arc::clone(favorites.get(FavoriteCategory::Experts));
        let publications = Arc::clone(favorites.get(FavoriteCategory::Publications));

        favorites.toggle(FavoriteCategory::Publications, "pub2");

        assert!(Arc::ptr_eq(&trials, favorites.get(FavoriteCategory::Trials)));
        assert!(Arc::ptr_eq(&experts, favorites.get(FavoriteCategory::Experts)));
        assert!(!Arc::ptr_eq(
            &publications,
            favorites.get(FavoriteCategory::Publications)
        ));
        assert_eq!(publications.len(), 1);
    }

    #[test]
    fn collaborators_alias_maps_to_experts() {
        let category: FavoriteCategory = serde_json::from_str("\"collaborators\"").unwrap();
        assert_eq!(category, FavoriteCategory::Experts);
    }
}
