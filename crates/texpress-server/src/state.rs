//! Application state.
//!
//! Shared state for all request handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use minijinja::Environment;
use serde::Serialize;
use texpress_browse::{BundleRegistry, STATIC_VIEWS_ROOT};
use texpress_storage::Storage;

use crate::templates;
use crate::{ServerConfig, StaticSite};

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Storage backend for reading templates.
    pub(crate) storage: Arc<dyn Storage>,
    /// Installed bundles.
    pub(crate) bundles: BundleRegistry,
    /// Configured static sites by slug.
    pub(crate) sites: BTreeMap<String, StaticSite>,
    /// Serve unconfigured slugs from matching static bundles.
    pub(crate) discovery: bool,
    /// Show template sources and detailed template errors.
    pub(crate) debug: bool,
}

/// Static site entry of the root page.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub(crate) struct SiteEntry {
    pub(crate) slug: String,
    pub(crate) bundle: String,
    pub(crate) url: String,
    pub(crate) discovered: bool,
}

impl AppState {
    pub(crate) fn new(config: &ServerConfig, storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            bundles: config.registry(),
            sites: config.sites.clone(),
            discovery: config.discovery,
            debug: config.debug,
        }
    }

    /// Static site served under `slug`, configured or discovered.
    pub(crate) fn site(&self, slug: &str) -> Option<StaticSite> {
        if let Some(site) = self.sites.get(slug) {
            return Some(site.clone());
        }
        if !self.discovery {
            return None;
        }
        let bundle = self.bundles.find_static_bundle(self.storage.as_ref(), slug)?;
        tracing::debug!(slug = %slug, bundle = %bundle, "Discovered static bundle");
        Some(StaticSite {
            bundle: bundle.to_owned(),
            root: STATIC_VIEWS_ROOT.to_owned(),
        })
    }

    /// All static sites, configured first, then discovered ones.
    pub(crate) fn site_entries(&self) -> Vec<SiteEntry> {
        let mut entries: Vec<SiteEntry> = self
            .sites
            .iter()
            .map(|(slug, site)| SiteEntry {
                slug: slug.clone(),
                bundle: site.bundle.clone(),
                url: format!("/{slug}/"),
                discovered: false,
            })
            .collect();

        if self.discovery {
            for (slug, bundle) in self.bundles.discoverable(self.storage.as_ref()) {
                if self.sites.contains_key(&slug) {
                    continue;
                }
                entries.push(SiteEntry {
                    url: format!("/{slug}/"),
                    slug,
                    bundle: bundle.to_owned(),
                    discovered: true,
                });
            }
        }

        entries
    }

    /// A fresh template environment; templates are never cached between requests.
    pub(crate) fn environment(&self) -> Environment<'static> {
        templates::environment(self.bundles.clone(), Arc::clone(&self.storage))
    }
}
