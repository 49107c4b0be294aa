//! Link ranking data structures.

use serde::{Deserialize, Serialize};

use crate::utils::url::local_identifier;

/// Host and identifier used to judge how relevant a link is to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicContext {
    /// Network location of the repository the record came from
    pub host: String,

    /// Local part of the record identifier (or the whole identifier when
    /// it is not namespaced)
    pub identifier: String,
}

impl HeuristicContext {
    pub fn new(host: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            identifier: identifier.into(),
        }
    }

    /// Build the context for a record, reducing a namespaced identifier
    /// such as `oai:repo.x.edu:bbb-1000` to its local part.
    pub fn for_record(host: impl Into<String>, record_identifier: &str, scheme: &str) -> Self {
        Self::new(host, local_identifier(record_identifier, scheme))
    }
}

/// A candidate link with its relevance score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredLink {
    pub url: String,
    pub score: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_record_namespaced() {
        let ctx = HeuristicContext::for_record("repo.x.edu", "oai:repo.x.edu:bbb-1000", "oai");
        assert_eq!(ctx.identifier, "bbb-1000");
        assert_eq!(ctx.host, "repo.x.edu");
    }

    #[test]
    fn test_for_record_plain() {
        let ctx = HeuristicContext::for_record("repo.x.edu", "bbb-1000", "oai");
        assert_eq!(ctx.identifier, "bbb-1000");
    }
}
