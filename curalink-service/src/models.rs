use curalink::{ClinicalTrial, Expert, Publication, Screen};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub view: curalink::View,
    pub screen: Screen,
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse<T> {
    pub query: String,
    pub count: usize,
    pub items: Vec<T>,
}

impl<T: Clone> CatalogResponse<T> {
    pub fn new(query: String, items: Vec<&T>) -> Self {
        Self {
            query,
            count: items.len(),
            items: items.into_iter().cloned().collect(),
        }
    }
}

pub type TrialCatalog = CatalogResponse<ClinicalTrial>;
pub type ExpertCatalog = CatalogResponse<Expert>;
pub type PublicationCatalog = CatalogResponse<Publication>;
