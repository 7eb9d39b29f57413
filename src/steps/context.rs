use crate::data::{PageData, PageKind};

/// Where a scenario stands with respect to page snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Idle,
    HasSnapshot,
}

/// State shared by the steps of one scenario.
///
/// A fresh context is created for every scenario and passed by reference to
/// each step; nothing carries over between scenarios.
#[derive(Debug, Default)]
pub struct ScenarioContext {
    test_url: Option<String>,
    base_page: Option<PageData>,
    brand_page: Option<PageData>,
    brand_item_page: Option<PageData>,
    latest: Option<PageKind>,
}

impl ScenarioContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ContextState {
        if self.base_page.is_some() || self.brand_page.is_some() || self.brand_item_page.is_some()
        {
            ContextState::HasSnapshot
        } else {
            ContextState::Idle
        }
    }

    pub fn test_url(&self) -> Option<&str> {
        self.test_url.as_deref()
    }

    pub fn set_test_url(&mut self, url: &str) {
        self.test_url = Some(url.to_string());
    }

    fn slot(&self, kind: PageKind) -> &Option<PageData> {
        match kind {
            PageKind::Base => &self.base_page,
            PageKind::Brand => &self.brand_page,
            PageKind::BrandItem => &self.brand_item_page,
        }
    }

    fn slot_mut(&mut self, kind: PageKind) -> &mut Option<PageData> {
        match kind {
            PageKind::Base => &mut self.base_page,
            PageKind::Brand => &mut self.brand_page,
            PageKind::BrandItem => &mut self.brand_item_page,
        }
    }

    /// Hold `page` as the current snapshot of its kind, replacing any older one
    pub fn store(&mut self, page: PageData) -> &PageData {
        let kind = page.kind();
        self.latest = Some(kind);
        self.slot_mut(kind).insert(page)
    }

    pub fn snapshot(&self, kind: PageKind) -> Option<&PageData> {
        self.slot(kind).as_ref()
    }

    /// The most recently stored snapshot of any kind
    pub fn latest(&self) -> Option<&PageData> {
        self.latest.and_then(|kind| self.snapshot(kind))
    }

    /// Release the snapshot of `kind` once a step has consumed it
    pub fn take(&mut self, kind: PageKind) -> Option<PageData> {
        if self.latest == Some(kind) {
            self.latest = None;
        }
        self.slot_mut(kind).take()
    }

    /// Drop every snapshot and the test URL, returning to `Idle`
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
