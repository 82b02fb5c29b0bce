use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    ai::AiService,
    dataset::Dataset,
    error::{CuraError, Result},
    model::{ClinicalTrial, Publication},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Trial,
    Publication,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardKey {
    pub kind: CardKind,
    pub id: String,
}

impl CardKey {
    pub fn trial(id: impl Into<String>) -> Self {
        Self {
            kind: CardKind::Trial,
            id: id.into(),
        }
    }

    pub fn publication(id: impl Into<String>) -> Self {
        Self {
            kind: CardKind::Publication,
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "text", rename_all = "snake_case")]
pub enum SummaryState {
    Idle,
    Loading,
    Ready(String),
}

/// Catalog item a summary is requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarySubject {
    Trial(ClinicalTrial),
    Publication(Publication),
}

impl SummarySubject {
    pub fn resolve(dataset: &Dataset, key: &CardKey) -> Result<Self> {
        match key.kind {
            CardKind::Trial => dataset
                .trial(&key.id)
                .cloned()
                .map(SummarySubject::Trial)
                .ok_or_else(|| CuraError::UnknownItem {
                    category: "trial",
                    id: key.id.clone(),
                }),
            CardKind::Publication => dataset
                .publication(&key.id)
                .cloned()
                .map(SummarySubject::Publication)
                .ok_or_else(|| CuraError::UnknownItem {
                    category: "publication",
                    id: key.id.clone(),
                }),
        }
    }

    pub async fn summarize(&self, ai: &dyn AiService) -> Result<String> {
        match self {
            SummarySubject::Trial(trial) => ai.trial_summary(trial).await,
            SummarySubject::Publication(publication) => ai.publication_summary(publication).await,
        }
    }
}

/// Stored card state. A loading card remembers which request it waits for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Card {
    Loading(Uuid),
    Ready(String),
}

/// Summary state of every card on a dashboard. Cards never share state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryCards {
    cards: HashMap<CardKey, Card>,
}

impl SummaryCards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, key: &CardKey) -> SummaryState {
        match self.cards.get(key) {
            None => SummaryState::Idle,
            Some(Card::Loading(_)) => SummaryState::Loading,
            Some(Card::Ready(text)) => SummaryState::Ready(text.clone()),
        }
    }

    /// Mark a card as loading and return the token its result must carry.
    /// A card that is already loading is refused.
    pub fn begin(&mut self, key: CardKey) -> Result<Uuid> {
        if matches!(self.cards.get(&key), Some(Card::Loading(_))) {
            return Err(CuraError::Validation(format!(
                "summary for {} is already being generated",
                key.id
            )));
        }
        let token = Uuid::new_v4();
        self.cards.insert(key, Card::Loading(token));
        Ok(token)
    }

    /// Store the outcome for a loading card. A failed call resets the card.
    /// Returns `false` unless the card is loading for `token`.
    pub fn finish(&mut self, key: &CardKey, token: Uuid, outcome: Result<String>) -> bool {
        let Some(card) = self.cards.get_mut(key) else {
            return false;
        };
        if *card != Card::Loading(token) {
            debug!(card_id = %key.id, %token, "Ignoring result of a superseded summary request");
            return false;
        }
        match outcome {
            Ok(text) => *card = Card::Ready(text),
            Err(e) => {
                warn!(card_id = %key.id, error = %e, "Summary generation failed");
                self.cards.remove(key);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MockAiService, templated_summary};

    #[test]
    fn cards_start_idle() {
        let cards = SummaryCards::new();
        assert_eq!(cards.state(&CardKey::trial("trial1")), SummaryState::Idle);
    }

    #[test]
    fn loading_card_refuses_second_request() {
        let mut cards = SummaryCards::new();
        cards.begin(CardKey::trial("trial1")).unwrap();
        assert!(cards.begin(CardKey::trial("trial1")).is_err());
        // A different card is unaffected
        cards.begin(CardKey::publication("trial1")).unwrap();
    }

    #[test]
    fn finish_sets_text_or_resets() {
        let mut cards = SummaryCards::new();
        let ok = CardKey::trial("trial1");
        let failed = CardKey::trial("trial2");
        let ok_token = cards.begin(ok.clone()).unwrap();
        let failed_token = cards.begin(failed.clone()).unwrap();

        assert!(cards.finish(&ok, ok_token, Ok("short".to_string())));
        assert!(cards.finish(
            &failed,
            failed_token,
            Err(CuraError::AiService("down".to_string()))
        ));

        assert_eq!(cards.state(&ok), SummaryState::Ready("short".to_string()));
        assert_eq!(cards.state(&failed), SummaryState::Idle);
        assert!(!cards.finish(&ok, ok_token, Ok("late".to_string())));
    }

    #[test]
    fn result_for_an_earlier_request_is_ignored() {
        let mut cards = SummaryCards::new();
        let key = CardKey::trial("trial1");
        let earlier = cards.begin(key.clone()).unwrap();
        cards.finish(&key, earlier, Err(CuraError::AiService("down".to_string())));

        let current = cards.begin(key.clone()).unwrap();
        assert!(!cards.finish(&key, earlier, Ok("stale".to_string())));
        assert_eq!(cards.state(&key), SummaryState::Loading);

        assert!(cards.finish(&key, current, Ok("fresh".to_string())));
        assert_eq!(cards.state(&key), SummaryState::Ready("fresh".to_string()));
    }

    #[test]
    fn ready_card_can_regenerate() {
        let mut cards = SummaryCards::new();
        let key = CardKey::publication("pub1");
        let token = cards.begin(key.clone()).unwrap();
        cards.finish(&key, token, Ok("first".to_string()));
        cards.begin(key.clone()).unwrap();
        assert_eq!(cards.state(&key), SummaryState::Loading);
    }

    #[tokio::test]
    async fn subject_resolves_and_summarizes() {
        let dataset = Dataset::builtin();
        let ai = MockAiService::instant();

        let subject = SummarySubject::resolve(&dataset, &CardKey::publication("pub3")).unwrap();
        let text = subject.summarize(&ai).await.unwrap();
        assert_eq!(text, templated_summary("A Phase III Study of a Novel Kinase Inhibitor"));

        assert!(matches!(
            SummarySubject::resolve(&dataset, &CardKey::trial("pub3")),
            Err(CuraError::UnknownItem { category: "trial", .. })
        ));
    }
}
