//! Link relevance ranking.
//!
//! A record usually lists several identifier URLs. The most relevant one
//! mentions the record's local identifier and lives on the repository's
//! own host; each of those facts is worth one point.

use serde::Serialize;

use crate::models::{HeuristicContext, ScoredLink};
use crate::utils::url::netloc;

/// Scores candidate links against a record's host and identifier.
#[derive(Debug, Clone)]
pub struct HyperlinkRelevanceScorer {
    context: HeuristicContext,
    host: String,
}

impl HyperlinkRelevanceScorer {
    pub fn new(context: HeuristicContext) -> Self {
        let host = context.host.to_lowercase();
        Self { context, host }
    }

    pub fn context(&self) -> &HeuristicContext {
        &self.context
    }

    /// `[identifier occurs in link] + [link host == context host]`.
    pub fn score(&self, link: &str) -> u8 {
        let mut score = 0;
        if link.contains(&self.context.identifier) {
            score += 1;
        }
        if netloc(link).is_some_and(|location| location == self.host) {
            score += 1;
        }
        score
    }

    /// Rank links by descending score. Links with equal scores keep their
    /// original relative order.
    pub fn rank<I, S>(&self, links: I) -> RankedLinks
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut links: Vec<ScoredLink> = links
            .into_iter()
            .map(|link| {
                let url: String = link.into();
                let score = self.score(&url);
                ScoredLink { url, score }
            })
            .collect();
        links.sort_by(|a, b| b.score.cmp(&a.score));
        RankedLinks { links }
    }
}

/// Links in descending relevance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RankedLinks {
    links: Vec<ScoredLink>,
}

impl RankedLinks {
    /// The highest scoring link. `None` only when no links were ranked;
    /// callers are expected to rank a non-empty list.
    pub fn most_relevant(&self) -> Option<&ScoredLink> {
        self.links.first()
    }

    /// Every link after the most relevant one, in ranked order.
    pub fn rest(&self) -> &[ScoredLink] {
        self.links.get(1..).unwrap_or_default()
    }

    pub fn links(&self) -> &[ScoredLink] {
        &self.links
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Split into the primary link and the alternates.
    pub fn into_primary_and_rest(self) -> Option<(String, Vec<String>)> {
        let mut urls = self.links.into_iter().map(|l| l.url);
        let primary = urls.next()?;
        Some((primary, urls.collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> HyperlinkRelevanceScorer {
        HyperlinkRelevanceScorer::new(HeuristicContext::new("repo.x.edu", "bbb-1000"))
    }

    #[test]
    fn test_score_components() {
        let scorer = scorer();
        assert_eq!(scorer.score("http://archives.x.edu/collection/bbb-1000"), 1);
        assert_eq!(scorer.score("http://repo.x.edu/item/bbb-1000"), 2);
        assert_eq!(scorer.score("http://repo.x.edu/item/other"), 1);
        assert_eq!(scorer.score("http://elsewhere.org/"), 0);
    }

    #[test]
    fn test_host_compared_case_insensitively() {
        let scorer =
            HyperlinkRelevanceScorer::new(HeuristicContext::new("Repo.X.edu", "bbb-1000"));
        assert_eq!(scorer.score("http://REPO.x.edu/item/x"), 1);
    }

    #[test]
    fn test_most_relevant_scenario() {
        let ranked = scorer().rank([
            "http://archives.x.edu/collection/bbb-1000",
            "http://repo.x.edu/item/bbb-1000",
        ]);
        let best = ranked.most_relevant().unwrap();
        assert_eq!(best.url, "http://repo.x.edu/item/bbb-1000");
        assert_eq!(best.score, 2);
        assert_eq!(ranked.rest().len(), 1);
        assert_eq!(ranked.rest()[0].url, "http://archives.x.edu/collection/bbb-1000");
    }

    #[test]
    fn test_stable_among_equal_scores() {
        let ranked = scorer().rank([
            "http://a.org/1",
            "http://repo.x.edu/item/bbb-1000",
            "http://b.org/2",
            "http://c.org/3",
        ]);
        let urls: Vec<&str> = ranked.links().iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "http://repo.x.edu/item/bbb-1000",
                "http://a.org/1",
                "http://b.org/2",
                "http://c.org/3"
            ]
        );
    }

    #[test]
    fn test_single_link_has_no_rest() {
        let ranked = scorer().rank(["http://a.org/1"]);
        assert!(ranked.rest().is_empty());
        let (primary, rest) = ranked.into_primary_and_rest().unwrap();
        assert_eq!(primary, "http://a.org/1");
        assert!(rest.is_empty());
    }

    #[test]
    fn test_empty_ranking() {
        let ranked = scorer().rank(Vec::<String>::new());
        assert!(ranked.is_empty());
        assert!(ranked.most_relevant().is_none());
        assert!(ranked.rest().is_empty());
        assert!(ranked.into_primary_and_rest().is_none());
    }
}
