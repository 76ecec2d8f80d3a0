//! Free-text search across phones and services.
//!
//! Phone hits come from the first [`PhoneMatcher`] in [`PHONE_MATCHERS`] that
//! applies to the query. Service hits are name substring matches. Phones are
//! listed before services and each kind is capped at [`RESULT_LIMIT`].

use std::sync::Arc;

use tracing::{debug, info, instrument};

use common::phone::normalize;
use models::service;

use crate::domain::{SearchKind, SearchResult};
use crate::errors::ServiceError;
use crate::repository::{NamedRepository, PhoneRepository};

pub const RESULT_LIMIT: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneMatcher {
    /// The query is itself a phone number; match on its canonical form.
    Canonical,
    /// Fallback: case-insensitive substring of the stored number.
    RawSubstring,
}

/// Tried in order; the first matcher yielding a needle wins.
pub const PHONE_MATCHERS: [PhoneMatcher; 2] = [PhoneMatcher::Canonical, PhoneMatcher::RawSubstring];

impl PhoneMatcher {
    /// Substring to look for in stored numbers, or `None` when the matcher does not apply.
    pub fn needle(self, query: &str) -> Option<String> {
        match self {
            PhoneMatcher::Canonical => normalize(query).ok().map(|n| n.into_string()),
            PhoneMatcher::RawSubstring => Some(query.to_string()),
        }
    }
}

/// First applicable matcher together with its needle.
pub fn select_matcher(query: &str) -> Option<(PhoneMatcher, String)> {
    PHONE_MATCHERS.iter().find_map(|m| m.needle(query).map(|n| (*m, n)))
}

#[derive(Clone)]
pub struct SearchService {
    phones: Arc<dyn PhoneRepository>,
    services: Arc<dyn NamedRepository<service::Model>>,
}

impl SearchService {
    pub fn new(phones: Arc<dyn PhoneRepository>, services: Arc<dyn NamedRepository<service::Model>>) -> Self {
        Self { phones, services }
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ServiceError> {
        if query.is_empty() {
            return Err(ServiceError::Validation("Search query required".into()));
        }

        let mut results = Vec::new();
        if let Some((matcher, needle)) = select_matcher(query) {
            debug!(?matcher, %needle, "phone matcher selected");
            for p in self.phones.search_number(&needle, RESULT_LIMIT).await? {
                results.push(SearchResult { kind: SearchKind::Phone, id: p.id, display_text: p.number });
            }
        }
        for s in self.services.search_name(query, RESULT_LIMIT).await? {
            results.push(SearchResult { kind: SearchKind::Service, id: s.id, display_text: s.name });
        }

        info!(hits = results.len(), "search_done");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repositories;

    #[test]
    fn matchers_are_tried_in_order() {
        let (m, needle) = select_matcher("8 (965) 109-11-62").unwrap();
        assert_eq!(m, PhoneMatcher::Canonical);
        assert_eq!(needle, "+7 965 109 11 62");

        let (m, needle) = select_matcher("965").unwrap();
        assert_eq!(m, PhoneMatcher::RawSubstring);
        assert_eq!(needle, "965");
    }

    async fn seeded() -> Result<(SearchService, Repositories), anyhow::Error> {
        let repos = Repositories::in_memory();
        let op = repos.operators.create("MTS", None).await?;
        repos.phones.create(&normalize("89651091162")?, op.id).await?;
        repos.phones.create(&normalize("9161234567")?, op.id).await?;
        repos.services.create("Telegram", None).await?;
        repos.services.create("WhatsApp", None).await?;
        Ok((SearchService::new(repos.phones.clone(), repos.services.clone()), repos))
    }

    #[tokio::test]
    async fn partial_digits_find_the_phone() -> Result<(), anyhow::Error> {
        let (svc, _) = seeded().await?;
        let hits = svc.search("965").await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, SearchKind::Phone);
        assert_eq!(hits[0].display_text, "+7 965 109 11 62");
        Ok(())
    }

    #[tokio::test]
    async fn any_spelling_of_a_number_finds_it() -> Result<(), anyhow::Error> {
        let (svc, _) = seeded().await?;
        for q in ["+79161234567", "8 916 123-45-67", "9161234567"] {
            let hits = svc.search(q).await?;
            assert_eq!(hits.len(), 1, "query {q}");
            assert_eq!(hits[0].display_text, "+7 916 123 45 67");
        }
        Ok(())
    }

    #[tokio::test]
    async fn service_names_match_case_insensitively() -> Result<(), anyhow::Error> {
        let (svc, _) = seeded().await?;
        let hits = svc.search("telegram").await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, SearchKind::Service);
        assert_eq!(hits[0].display_text, "Telegram");

        let hits = svc.search("a").await?;
        assert!(hits.iter().all(|h| h.kind == SearchKind::Service));
        assert_eq!(hits.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn phones_come_first_and_each_kind_is_capped() -> Result<(), anyhow::Error> {
        let repos = Repositories::in_memory();
        let op = repos.operators.create("Tele2", None).await?;
        for i in 0..15 {
            repos.phones.create(&normalize(&format!("99900000{i:02}"))?, op.id).await?;
            repos.services.create(&format!("app 999 #{i}"), None).await?;
        }
        let svc = SearchService::new(repos.phones.clone(), repos.services.clone());
        let hits = svc.search("999").await?;
        assert_eq!(hits.len(), 20);
        assert!(hits[..10].iter().all(|h| h.kind == SearchKind::Phone));
        assert!(hits[10..].iter().all(|h| h.kind == SearchKind::Service));
        Ok(())
    }

    #[tokio::test]
    async fn empty_query_is_rejected() {
        let (svc, _) = seeded().await.unwrap();
        assert!(matches!(svc.search("").await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn surrounding_spaces_are_part_of_the_query() -> Result<(), anyhow::Error> {
        let repos = Repositories::in_memory();
        repos.services.create("VK Pay", None).await?;
        repos.services.create("VKontakte", None).await?;
        let op = repos.operators.create("MTS", None).await?;
        repos.phones.create(&normalize("9651091162")?, op.id).await?;
        let svc = SearchService::new(repos.phones.clone(), repos.services.clone());

        let names: Vec<String> = svc.search("VK ").await?.into_iter().map(|h| h.display_text).collect();
        assert_eq!(names, ["VK Pay"]);

        // every canonical number contains a space, only one service name does
        let hits = svc.search(" ").await?;
        assert_eq!(hits.iter().filter(|h| h.kind == SearchKind::Phone).count(), 1);
        let services: Vec<&str> = hits.iter().filter(|h| h.kind == SearchKind::Service).map(|h| h.display_text.as_str()).collect();
        assert_eq!(services, ["VK Pay"]);
        Ok(())
    }
}
