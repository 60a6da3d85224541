//! Breadcrumb navigation.

use serde::Serialize;

use crate::path::{TEMPLATE_EXTENSION, TEMPLATE_SUFFIX, extension};

/// Breadcrumb navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breadcrumb {
    /// Link target (absolute URL path).
    pub url: String,
    /// Display label.
    pub label: String,
    /// Whether this item is the linked `.twig` extension of the previous one.
    pub is_extension_segment: bool,
    /// Whether this item is the current page.
    pub is_active: bool,
}

impl Breadcrumb {
    fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
            is_extension_segment: false,
            is_active: false,
        }
    }
}

/// Builds breadcrumb trails for paths under one base URL.
///
/// # Example
///
/// ```
/// use texpress_browse::BreadcrumbBuilder;
///
/// let crumbs = BreadcrumbBuilder::new("/app", "AppBundle").build("docs/intro");
/// let urls: Vec<_> = crumbs.iter().map(|c| c.url.as_str()).collect();
///
/// assert_eq!(urls, ["/app/", "/app/docs/", "/app/docs/intro/"]);
/// assert!(crumbs[2].is_active);
/// ```
#[derive(Clone, Debug)]
pub struct BreadcrumbBuilder<'a> {
    base_url: &'a str,
    root_label: &'a str,
    requested_path: Option<&'a str>,
}

impl<'a> BreadcrumbBuilder<'a> {
    /// Create a builder.
    ///
    /// `base_url` has no trailing slash; the first crumb links to `base_url + "/"`.
    pub fn new(base_url: &'a str, root_label: &'a str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/'),
            root_label,
            requested_path: None,
        }
    }

    /// Set the path the client actually asked for.
    ///
    /// When a trail ends in a `.twig` file, the extension segment is active
    /// only if this path carries the `.twig` extension too (source view);
    /// otherwise the name segment is (rendered view).
    #[must_use]
    pub fn requested_path(mut self, path: &'a str) -> Self {
        self.requested_path = Some(path);
        self
    }

    /// Build the trail for a slash-delimited path.
    pub fn build(&self, path: &str) -> Vec<Breadcrumb> {
        let mut url = format!("{}/", self.base_url);
        let mut crumbs = vec![Breadcrumb::new(url.clone(), self.root_label)];

        let mut fragments: Vec<&str> = path.split('/').filter(|f| !f.is_empty()).collect();
        let last = fragments.pop();

        for fragment in fragments {
            url.push_str(fragment);
            url.push('/');
            crumbs.push(Breadcrumb::new(url.clone(), fragment));
        }

        let Some(last) = last else {
            mark_last_active(&mut crumbs);
            return crumbs;
        };

        let ext = extension(last);
        if ext == Some(TEMPLATE_EXTENSION) {
            let name = &last[..last.len() - TEMPLATE_SUFFIX.len()];
            let source_requested = self.requested_path.and_then(extension) == ext;

            crumbs.push(Breadcrumb {
                is_active: !source_requested,
                ..Breadcrumb::new(format!("{url}{name}"), name)
            });
            crumbs.push(Breadcrumb {
                is_extension_segment: true,
                is_active: source_requested,
                ..Breadcrumb::new(format!("{url}{last}"), TEMPLATE_SUFFIX)
            });
            return crumbs;
        }

        url.push_str(last);
        if ext.is_none() {
            url.push('/');
        }
        crumbs.push(Breadcrumb::new(url, last));
        mark_last_active(&mut crumbs);
        crumbs
    }
}

fn mark_last_active(crumbs: &mut [Breadcrumb]) {
    if let Some(last) = crumbs.last_mut() {
        last.is_active = true;
    }
}

/// Build a breadcrumb trail for `path`, treating `path` as the requested path.
pub fn build_breadcrumbs(base_url: &str, root_label: &str, path: &str) -> Vec<Breadcrumb> {
    BreadcrumbBuilder::new(base_url, root_label)
        .requested_path(path)
        .build(path)
}
