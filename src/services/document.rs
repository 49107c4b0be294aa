// src/services/document.rs

//! Index field building for harvested records.
//!
//! Maps a Dublin Core record to the fields consumed by the index document
//! builder: keyword copies of each element, decade facets, and the primary
//! and alternate external links.

use crate::models::{Config, DcRecord, HeuristicContext, IndexFields};
use crate::services::facets::{DateFacets, DecadeFacetEngine};
use crate::services::links::HyperlinkRelevanceScorer;
use crate::utils::url::{is_http_url, path_extension};

/// The fifteen unqualified Dublin Core elements.
pub const DUBLIN_CORE_ELEMENTS: [&str; 15] = [
    "title",
    "creator",
    "subject",
    "description",
    "publisher",
    "contributor",
    "date",
    "type",
    "format",
    "identifier",
    "source",
    "language",
    "relation",
    "coverage",
    "rights",
];

/// Index field name for a Dublin Core element.
pub fn keyword_field(element: &str) -> String {
    format!("{element}_keyword")
}

/// Builds [`IndexFields`] for records of one repository.
pub struct DocumentBuilder<'a> {
    config: &'a Config,
    engine: DecadeFacetEngine,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            engine: DecadeFacetEngine::from_flag(config.facets.filter_future),
        }
    }

    /// Replace the faceting engine (e.g. to pin the future cutoff).
    pub fn with_engine(mut self, engine: DecadeFacetEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Build the index fields of `record`, harvested from `host`.
    pub fn build(&self, record: &DcRecord, host: &str) -> IndexFields {
        let mut fields = IndexFields {
            id: record.identifier.clone(),
            ..Default::default()
        };

        for field in &record.fields {
            if !DUBLIN_CORE_ELEMENTS.contains(&field.name.as_str()) {
                continue;
            }
            fields
                .keywords
                .entry(keyword_field(&field.name))
                .or_default()
                .push(field.value.clone());
        }
        fields.first_title = record.values("title").next().map(str::to_string);

        let dates: Vec<&str> = record.values("date").collect();
        if !dates.is_empty() {
            let mut facets = DateFacets::new(dates.iter().copied()).with_engine(self.engine);
            fields.decades = facets.decades().iter().copied().collect();
            fields.sort_decade = facets.sort_decade();
            log::debug!("dates {:?} -> decades {:?}", dates, fields.decades);
        }

        let candidates = self.candidate_links(record);
        if !candidates.is_empty() {
            let context = HeuristicContext::for_record(
                host,
                &record.identifier,
                &self.config.links.identifier_scheme,
            );
            let ranked = HyperlinkRelevanceScorer::new(context).rank(candidates);
            if let Some((primary, rest)) = ranked.into_primary_and_rest() {
                fields.external_link = Some(primary);
                fields.alternate_external_link = rest;
            }
        }

        fields
    }

    /// Identifier values that look like landing pages rather than images.
    pub fn candidate_links<'r>(&self, record: &'r DcRecord) -> Vec<&'r str> {
        record
            .values("identifier")
            .filter(|value| is_http_url(value))
            .filter(|value| {
                path_extension(value).is_none_or(|ext| !self.config.links.is_excluded(&ext))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DcField;

    fn record(fields: &[(&str, &str)]) -> DcRecord {
        DcRecord {
            identifier: "oai:repo.x.edu:bbb-1000".to_string(),
            fields: fields.iter().map(|(n, v)| DcField::new(*n, *v)).collect(),
        }
    }

    #[test]
    fn test_keywords_and_first_title() {
        let config = Config::default();
        let rec = record(&[
            ("title", "Harbor map"),
            ("title", "Alternate title"),
            ("subject", "Maps"),
            ("thumbnail", "ignored"),
        ]);
        let fields = DocumentBuilder::new(&config).build(&rec, "repo.x.edu");

        assert_eq!(fields.id, "oai:repo.x.edu:bbb-1000");
        assert_eq!(fields.first_title.as_deref(), Some("Harbor map"));
        assert_eq!(
            fields.keywords["title_keyword"],
            vec!["Harbor map".to_string(), "Alternate title".to_string()]
        );
        assert_eq!(fields.keywords["subject_keyword"], vec!["Maps".to_string()]);
        assert!(!fields.keywords.contains_key("thumbnail_keyword"));
    }

    #[test]
    fn test_decades_from_all_dates() {
        let config = Config::default();
        let rec = record(&[("date", "1903], c1895"), ("date", "2nd C BC")]);
        let fields = DocumentBuilder::new(&config).build(&rec, "repo.x.edu");

        assert_eq!(fields.sort_decade, Some(-200));
        assert!(fields.decades.contains(&1890));
        assert!(fields.decades.contains(&1900));
        assert!(fields.decades.contains(&-110));
        assert!(fields.decades.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_future_filter_from_engine() {
        let config = Config::default();
        let rec = record(&[("date", "1990"), ("date", "2150")]);
        let fields = DocumentBuilder::new(&config)
            .with_engine(DecadeFacetEngine::with_cutoff(2020))
            .build(&rec, "repo.x.edu");
        assert_eq!(fields.decades, vec![1990]);
    }

    #[test]
    fn test_undated_record_has_no_decades() {
        let config = Config::default();
        let rec = record(&[("date", "n.d.")]);
        let fields = DocumentBuilder::new(&config).build(&rec, "repo.x.edu");
        assert!(fields.decades.is_empty());
        assert_eq!(fields.sort_decade, None);
    }

    #[test]
    fn test_links_ranked_and_images_excluded() {
        let config = Config::default();
        let rec = record(&[
            ("identifier", "http://archives.x.edu/collection/bbb-1000"),
            ("identifier", "http://repo.x.edu/thumbs/bbb-1000.jpg"),
            ("identifier", "bbb-1000"),
            ("identifier", "http://repo.x.edu/item/bbb-1000"),
        ]);
        let fields = DocumentBuilder::new(&config).build(&rec, "repo.x.edu");

        assert_eq!(
            fields.external_link.as_deref(),
            Some("http://repo.x.edu/item/bbb-1000")
        );
        assert_eq!(
            fields.alternate_external_link,
            vec!["http://archives.x.edu/collection/bbb-1000".to_string()]
        );
    }

    #[test]
    fn test_no_candidate_links() {
        let config = Config::default();
        let rec = record(&[("identifier", "bbb-1000")]);
        let fields = DocumentBuilder::new(&config).build(&rec, "repo.x.edu");
        assert!(fields.external_link.is_none());
        assert!(fields.alternate_external_link.is_empty());
    }
}
