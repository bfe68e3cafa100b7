//! Delivered dependency attachment.
//!
//! A structured content update declares its full dependency set on
//! every delivery. Each locator is attached anew under a fresh id and
//! recorded; there is no deduplication by locator, repeated deliveries
//! attach repeatedly. Attachment only initiates the load, nothing waits
//! for completion.

use crate::host::HostPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Stylesheet,
    Module,
}

/// One attachment, as recorded in the ledger.
#[derive(Debug, Clone)]
pub struct ResourceRecord {
    pub id: String,
    pub kind: ResourceKind,
    pub locator: String,
}

/// Attaches resources to the page head and keeps the attachment ledger.
#[derive(Debug, Default)]
pub struct ResourceLoader {
    next_id: u64,
    records: Vec<ResourceRecord>,
}

impl ResourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `locator` to the page. A `.css` suffix means a
    /// stylesheet; everything else is loaded as an executable module.
    pub fn ensure(&mut self, page: &mut impl HostPage, locator: &str) {
        let kind = if locator.ends_with(".css") {
            ResourceKind::Stylesheet
        } else {
            ResourceKind::Module
        };
        let id = format!("res-{}", self.next_id);
        self.next_id += 1;

        match kind {
            ResourceKind::Stylesheet => page.attach_stylesheet(&id, locator),
            ResourceKind::Module => page.attach_module(&id, locator),
        }
        crate::debug!("page"; "attached {} as {id}", locator);

        self.records.push(ResourceRecord {
            id,
            kind,
            locator: locator.to_string(),
        });
    }

    /// Attachments made so far, in order.
    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    /// Forget all attachments. Used when the page itself is reset, so
    /// fresh ids cannot collide with anything still attached.
    pub fn clear(&mut self) {
        self.records.clear();
        self.next_id = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryPage;

    #[test]
    fn test_classification_by_suffix() {
        let mut page = MemoryPage::new("root", "t");
        let mut loader = ResourceLoader::new();
        loader.ensure(&mut page, "/static/app.css");
        loader.ensure(&mut page, "/static/app.js");
        loader.ensure(&mut page, "/static/helper");

        let kinds: Vec<_> = loader.records().iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ResourceKind::Stylesheet,
                ResourceKind::Module,
                ResourceKind::Module
            ]
        );

        let html = page.to_html();
        assert!(html.contains(r#"href="/static/app.css""#));
        assert!(html.contains(r#"src="/static/app.js""#));
    }

    #[test]
    fn test_suffix_match_is_exact() {
        let mut page = MemoryPage::new("root", "t");
        let mut loader = ResourceLoader::new();
        loader.ensure(&mut page, "/static/app.CSS");
        assert_eq!(loader.records()[0].kind, ResourceKind::Module);
    }

    #[test]
    fn test_repeated_locator_attaches_twice() {
        let mut page = MemoryPage::new("root", "t");
        let mut loader = ResourceLoader::new();
        loader.ensure(&mut page, "/app.css");
        loader.ensure(&mut page, "/app.css");

        assert_eq!(loader.records().len(), 2);
        assert_ne!(loader.records()[0].id, loader.records()[1].id);
        assert_eq!(page.to_html().matches("/app.css").count(), 2);
    }

    #[test]
    fn test_ids_are_fresh_across_kinds() {
        let mut page = MemoryPage::new("root", "t");
        let mut loader = ResourceLoader::new();
        loader.ensure(&mut page, "/a.css");
        loader.ensure(&mut page, "/b.js");
        assert_eq!(loader.records()[0].id, "res-0");
        assert_eq!(loader.records()[1].id, "res-1");
    }

    #[test]
    fn test_clear_restarts_ledger() {
        let mut page = MemoryPage::new("root", "t");
        let mut loader = ResourceLoader::new();
        loader.ensure(&mut page, "/a.css");
        loader.clear();
        assert!(loader.records().is_empty());
        loader.ensure(&mut page, "/b.js");
        assert_eq!(loader.records()[0].id, "res-0");
    }
}
