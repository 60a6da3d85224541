//! Installed bundles.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use texpress_storage::Storage;

use crate::error::BrowseError;
use crate::template_ref::NAME_RULES;

/// Views folder of a bundle, relative to its root.
pub const VIEWS_ROOT: &str = "Resources/views";

/// Conventional static-views folder of a bundle, relative to its root.
pub const STATIC_VIEWS_ROOT: &str = "Resources/views/static";

/// Slug under which discovery serves a bundle (`AppBundle` → `app`).
///
/// The inverse of [`BundleRegistry::find_static_bundle`]. Returns `None` for
/// names without the `Bundle` suffix.
pub fn discovery_slug(bundle_name: &str) -> Option<String> {
    let lower = bundle_name.to_lowercase();
    lower
        .strip_suffix("bundle")
        .filter(|short| !short.is_empty())
        .map(str::to_owned)
}

/// Installed bundles by name.
#[derive(Clone, Debug, Default)]
pub struct BundleRegistry {
    bundles: BTreeMap<String, PathBuf>,
}

impl BundleRegistry {
    /// Create a registry from `(name, root path)` pairs.
    pub fn new(bundles: impl IntoIterator<Item = (String, PathBuf)>) -> Self {
        Self {
            bundles: bundles.into_iter().collect(),
        }
    }

    /// Root path of an installed bundle.
    pub fn locate(&self, name: &str) -> Result<&Path, BrowseError> {
        self.bundles
            .get(name)
            .map(PathBuf::as_path)
            .ok_or_else(|| BrowseError::UnknownBundle(name.to_owned()))
    }

    /// Names of all installed bundles, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bundles.keys().map(String::as_str)
    }

    /// Names of installed bundles that have a static-views folder.
    pub fn static_bundles<S: Storage + ?Sized>(&self, storage: &S) -> Vec<&str> {
        self.bundles
            .iter()
            .filter(|(_, path)| storage.is_dir(&path.join(STATIC_VIEWS_ROOT)))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Find a static bundle from a short, case-insensitive name.
    ///
    /// `"app"` matches `AppBundle`.
    pub fn find_static_bundle<S: Storage + ?Sized>(
        &self,
        storage: &S,
        short_name: &str,
    ) -> Option<&str> {
        let wanted = format!("{}bundle", short_name.to_lowercase());
        self.static_bundles(storage)
            .into_iter()
            .find(|name| name.to_lowercase() == wanted)
    }

    /// Static bundles that discovery serves, as `(slug, bundle name)` pairs.
    ///
    /// Only bundles named `…Bundle` have a slug (see [`discovery_slug`]).
    pub fn discoverable<S: Storage + ?Sized>(&self, storage: &S) -> Vec<(String, &str)> {
        self.static_bundles(storage)
            .into_iter()
            .filter_map(|name| discovery_slug(name).map(|slug| (slug, name)))
            .collect()
    }

    /// System path for a template name in `@Bundle/…` or `@Short/…` form.
    ///
    /// Returns `None` for names that don't start with a known bundle alias.
    pub fn resolve_template(&self, name: &str) -> Option<PathBuf> {
        if !name.starts_with('@') {
            return None;
        }
        NAME_RULES.iter().find_map(|rule| {
            self.bundles
                .iter()
                .find_map(|(bundle, path)| rule.apply(name, bundle, path))
                .map(|location| location.path)
        })
    }
}
