//! Theme stylesheet catalog.
//!
//! Maps a theme name from update metadata to a hosted stylesheet. All
//! themes share one head slot, so switching replaces the previous
//! stylesheet instead of stacking a new one.

use crate::host::HostPage;

/// Slot id the themed stylesheet occupies in the document head.
pub const THEME_SLOT: &str = "water-stylesheet";

const CATALOG: [(&str, &str); 3] = [
    (
        "auto",
        "https://cdn.jsdelivr.net/npm/water.css@2/out/water.min.css",
    ),
    (
        "light",
        "https://cdn.jsdelivr.net/npm/water.css@2/out/light.min.css",
    ),
    (
        "dark",
        "https://cdn.jsdelivr.net/npm/water.css@2/out/dark.min.css",
    ),
];

/// Resolve a theme name to its stylesheet location, ignoring case.
pub fn resolve(name: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, url)| *url)
}

/// The "none" sentinel disables theming rather than naming a theme.
pub fn is_disabled(name: &str) -> bool {
    name.eq_ignore_ascii_case("none")
}

/// Apply a named theme to the page.
///
/// The "none" sentinel and unknown names leave the page untouched;
/// unknown names get a debug note so a typo in page metadata is
/// discoverable.
pub fn apply(page: &mut impl HostPage, name: &str) {
    if is_disabled(name) {
        return;
    }
    match resolve(name) {
        Some(url) => page.attach_stylesheet(THEME_SLOT, url),
        None => crate::debug!("page"; "unknown theme `{name}`, keeping current stylesheet"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryPage;

    #[test]
    fn test_resolve_ignores_case() {
        assert_eq!(resolve("dark"), resolve("Dark"));
        assert!(resolve("AUTO").is_some());
        assert!(resolve("solarized").is_none());
    }

    #[test]
    fn test_none_sentinel() {
        assert!(is_disabled("none"));
        assert!(is_disabled("NONE"));
        assert!(!is_disabled("dark"));
    }

    #[test]
    fn test_apply_attaches_to_shared_slot() {
        let mut page = MemoryPage::new("root", "t");
        apply(&mut page, "light");
        apply(&mut page, "dark");

        let html = page.to_html();
        assert_eq!(html.matches(THEME_SLOT).count(), 1);
        assert!(html.contains("dark.min.css"));
        assert!(!html.contains("light.min.css"));
    }

    #[test]
    fn test_apply_skips_none_and_unknown() {
        let mut page = MemoryPage::new("root", "t");
        let pristine = page.to_html();
        apply(&mut page, "none");
        apply(&mut page, "no-such-theme");
        assert_eq!(page.to_html(), pristine);
    }
}
