use crate::data::{BasePageData, PageData, PageKind};
use crate::steps::{ContextState, ScenarioContext};

fn page(url: &str) -> PageData {
    PageData::base(BasePageData::new(
        url.to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        Vec::new(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_idle() {
        let ctx = ScenarioContext::new();
        assert_eq!(ctx.state(), ContextState::Idle);
        assert!(ctx.test_url().is_none());
        assert!(ctx.latest().is_none());
    }

    #[test]
    fn test_store_and_clear() {
        let mut ctx = ScenarioContext::new();
        ctx.set_test_url("https://example.com/a");
        ctx.store(page("https://example.com/a"));
        assert_eq!(ctx.state(), ContextState::HasSnapshot);
        assert_eq!(ctx.latest().map(|p| p.url()), Some("https://example.com/a"));

        ctx.clear();
        assert_eq!(ctx.state(), ContextState::Idle);
        assert!(ctx.test_url().is_none());
        assert!(ctx.snapshot(PageKind::Base).is_none());
    }

    #[test]
    fn test_take_releases_snapshot() {
        let mut ctx = ScenarioContext::new();
        ctx.store(page("https://example.com/a"));
        let taken = ctx.take(PageKind::Base);
        assert!(taken.is_some());
        assert!(ctx.latest().is_none());
        assert_eq!(ctx.state(), ContextState::Idle);
    }

    #[test]
    fn test_newer_snapshot_replaces_older() {
        let mut ctx = ScenarioContext::new();
        ctx.store(page("https://example.com/a"));
        ctx.store(page("https://example.com/b"));
        assert_eq!(
            ctx.snapshot(PageKind::Base).map(|p| p.url()),
            Some("https://example.com/b")
        );
    }
}
