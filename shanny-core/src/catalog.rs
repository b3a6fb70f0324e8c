//! Services catalog: slug lookup, filter tags and search

use shanny_model::Service;

/// Most tag chips offered by [`ServiceCatalog::tags`].
pub const MAX_TAGS: usize = 10;

/// Read-only list of services in display order.
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl ServiceCatalog {
    pub fn new(services: Vec<Service>) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn by_slug(&self, slug: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.slug == slug)
    }

    /// First word of every feature, deduplicated in first-seen order and
    /// capped at [`MAX_TAGS`].
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        let seeds = self
            .services
            .iter()
            .flat_map(|service| &service.features)
            .filter_map(|feature| feature.split(' ').next())
            .filter(|seed| !seed.is_empty());

        for seed in seeds {
            if tags.len() == MAX_TAGS {
                break;
            }
            if !tags.iter().any(|tag| tag == seed) {
                tags.push(seed.to_string());
            }
        }
        tags
    }

    /// Services matching both the tag and the free-text query.
    ///
    /// Matching is case-insensitive substring search. A tag matches any
    /// feature containing it; the query is trimmed and checked against the
    /// title, both descriptions and the space-joined features. An empty query
    /// or tag does not filter.
    pub fn filter(&self, query: &str, tag: Option<&str>) -> Vec<&Service> {
        let query = query.trim().to_lowercase();
        let tag = tag.map(str::to_lowercase).filter(|tag| !tag.is_empty());

        self.services
            .iter()
            .filter(|service| {
                tag.as_deref().is_none_or(|tag| has_feature(service, tag))
                    && (query.is_empty() || mentions(service, &query))
            })
            .collect()
    }
}

fn has_feature(service: &Service, tag: &str) -> bool {
    service
        .features
        .iter()
        .any(|feature| feature.to_lowercase().contains(tag))
}

fn mentions(service: &Service, query: &str) -> bool {
    [&service.title, &service.short, &service.long]
        .into_iter()
        .any(|text| text.to_lowercase().contains(query))
        || service.features.join(" ").to_lowercase().contains(query)
}

/// Search box and tag chip state of the services page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceFilter {
    query: String,
    active_tag: Option<String>,
}

impl ServiceFilter {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn active_tag(&self) -> Option<&str> {
        self.active_tag.as_deref()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Selects `tag`, or clears the selection when `tag` is already active.
    pub fn toggle_tag(&mut self, tag: &str) -> Option<&str> {
        if self.active_tag.as_deref() == Some(tag) {
            self.active_tag = None;
        } else {
            self.active_tag = Some(tag.to_string());
        }
        self.active_tag()
    }

    /// The "All" chip.
    pub fn clear_tag(&mut self) {
        self.active_tag = None;
    }

    pub fn apply<'a>(&self, catalog: &'a ServiceCatalog) -> Vec<&'a Service> {
        catalog.filter(&self.query, self.active_tag())
    }
}
