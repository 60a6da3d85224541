//! Template reference aliases.
//!
//! Templates are referenced in three forms:
//!
//! - `@AppBundle/Resources/views/static/page.twig` (bundle root alias)
//! - `@App/static/page.twig` (views alias: bundle name minus `Bundle`,
//!   relative to `Resources/views`)
//! - `/srv/app/src/AppBundle/Resources/views/static/page.twig` (system path)
//!
//! [`AliasRule`]s are tried in that order; the first one that matches wins.

use std::path::{Path, PathBuf};

use crate::bundles::VIEWS_ROOT;

/// Where a template reference points, and how to show it to a human.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateLocation {
    /// System path of the template.
    pub path: PathBuf,
    /// Bundle-relative name (e.g., `@AppBundle/Resources/views/page.twig`).
    pub label: String,
}

/// One way of spelling a template reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AliasRule {
    /// `@{Bundle}/…`, relative to the bundle root.
    BundleRoot,
    /// `@{Bundle minus "Bundle"}/…`, relative to `Resources/views`.
    BundleViews,
    /// A system path inside the bundle.
    SystemPath,
}

/// Rules in priority order.
pub(crate) const ALIAS_RULES: [AliasRule; 3] = [
    AliasRule::BundleRoot,
    AliasRule::BundleViews,
    AliasRule::SystemPath,
];

/// Rules that apply to template names (aliases only).
pub(crate) const NAME_RULES: [AliasRule; 2] = [AliasRule::BundleRoot, AliasRule::BundleViews];

/// Short alias of a bundle (`AppBundle` → `App`).
pub(crate) fn short_name(bundle_name: &str) -> &str {
    bundle_name.strip_suffix("Bundle").unwrap_or(bundle_name)
}

impl AliasRule {
    /// Apply this rule to a reference, if it matches.
    pub(crate) fn apply(
        self,
        reference: &str,
        bundle_name: &str,
        bundle_path: &Path,
    ) -> Option<TemplateLocation> {
        match self {
            Self::BundleRoot => {
                let rest = reference.strip_prefix(&format!("@{bundle_name}/"))?;
                Some(TemplateLocation {
                    path: bundle_path.join(rest),
                    label: reference.to_owned(),
                })
            }
            Self::BundleViews => {
                let rest = reference.strip_prefix(&format!("@{}/", short_name(bundle_name)))?;
                Some(TemplateLocation {
                    path: bundle_path.join(VIEWS_ROOT).join(rest),
                    label: format!("@{bundle_name}/{VIEWS_ROOT}/{rest}"),
                })
            }
            Self::SystemPath => {
                let rest = Path::new(reference).strip_prefix(bundle_path).ok()?;
                let rest: Vec<_> = rest
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect();
                Some(TemplateLocation {
                    path: PathBuf::from(reference),
                    label: format!("@{bundle_name}/{}", rest.join("/")),
                })
            }
        }
    }
}

/// Resolve a template reference against one bundle.
///
/// References matching none of the alias forms are returned verbatim, both as
/// path and label.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use texpress_browse::locate_template_ref;
///
/// let location = locate_template_ref("@App/layout.html.twig", "AppBundle", Path::new("/srv/AppBundle"));
/// assert_eq!(location.path, Path::new("/srv/AppBundle/Resources/views/layout.html.twig"));
/// assert_eq!(location.label, "@AppBundle/Resources/views/layout.html.twig");
/// ```
pub fn locate_template_ref(
    reference: &str,
    bundle_name: &str,
    bundle_path: &Path,
) -> TemplateLocation {
    ALIAS_RULES
        .iter()
        .find_map(|rule| rule.apply(reference, bundle_name, bundle_path))
        .unwrap_or_else(|| TemplateLocation {
            path: PathBuf::from(reference),
            label: reference.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const BUNDLE: &str = "/srv/app/src/AppBundle";

    fn locate(reference: &str) -> TemplateLocation {
        locate_template_ref(reference, "AppBundle", Path::new(BUNDLE))
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("AppBundle"), "App");
        assert_eq!(short_name("Shop"), "Shop");
    }

    #[test]
    fn test_bundle_root_alias() {
        assert_eq!(
            locate("@AppBundle/Resources/views/static/page.twig"),
            TemplateLocation {
                path: PathBuf::from(format!("{BUNDLE}/Resources/views/static/page.twig")),
                label: "@AppBundle/Resources/views/static/page.twig".to_owned(),
            }
        );
    }

    #[test]
    fn test_views_alias() {
        assert_eq!(
            locate("@App/static/_menu.html.twig"),
            TemplateLocation {
                path: PathBuf::from(format!("{BUNDLE}/Resources/views/static/_menu.html.twig")),
                label: "@AppBundle/Resources/views/static/_menu.html.twig".to_owned(),
            }
        );
    }

    #[test]
    fn test_system_path() {
        assert_eq!(
            locate(&format!("{BUNDLE}/Resources/views/static/page.twig")),
            TemplateLocation {
                path: PathBuf::from(format!("{BUNDLE}/Resources/views/static/page.twig")),
                label: "@AppBundle/Resources/views/static/page.twig".to_owned(),
            }
        );
    }

    #[test]
    fn test_unknown_reference_is_verbatim() {
        assert_eq!(
            locate("@OtherBundle/page.twig"),
            TemplateLocation {
                path: PathBuf::from("@OtherBundle/page.twig"),
                label: "@OtherBundle/page.twig".to_owned(),
            }
        );
    }

    #[test]
    fn test_sibling_directory_is_not_inside_bundle() {
        let location = locate("/srv/app/src/AppBundleExtra/page.twig");

        assert_eq!(location.label, "/srv/app/src/AppBundleExtra/page.twig");
    }

    #[test]
    fn test_bundle_root_rule_has_priority() {
        // A bundle named without the "Bundle" suffix has identical aliases;
        // the bundle root reading wins.
        let location = locate_template_ref("@Shop/page.twig", "Shop", Path::new("/srv/Shop"));

        assert_eq!(location.path, PathBuf::from("/srv/Shop/page.twig"));
    }
}
