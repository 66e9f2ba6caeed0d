//! The current page view: document location plus referrer.

use crate::domain::{apex_domain, apex_of_url};
use url::Url;
use utmzz_core::{Error, RawContext, Result};

/// One page view as seen by the browser.
#[derive(Debug, Clone)]
pub struct PageView {
    location: Url,
    referrer: Option<String>,
}

impl PageView {
    /// Parse the document location. An empty referrer means none was sent.
    pub fn new(location: &str, referrer: Option<&str>) -> Result<Self> {
        let location = Url::parse(location).map_err(|e| Error::InvalidUrl {
            url: location.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            location,
            referrer: referrer.filter(|r| !r.is_empty()).map(String::from),
        })
    }

    pub fn hostname(&self) -> &str {
        self.location.host_str().unwrap_or_default()
    }

    pub fn referrer(&self) -> Option<&str> {
        self.referrer.as_deref()
    }

    pub fn current_apex(&self) -> Option<String> {
        apex_domain(self.hostname())
    }

    pub fn referrer_apex(&self) -> Option<String> {
        self.referrer.as_deref().and_then(apex_of_url)
    }

    /// Query string and fragment joined as `query#fragment`, without the
    /// leading `?` and `#`.
    pub fn combined_params(&self) -> String {
        format!(
            "{}#{}",
            self.location.query().unwrap_or_default(),
            self.location.fragment().unwrap_or_default()
        )
    }

    /// Assemble the resolution input for this page view.
    pub fn context(&self, stored: Option<String>, same_session: bool) -> RawContext {
        RawContext {
            current_apex: self.current_apex(),
            referrer: self.referrer.clone(),
            referrer_apex: self.referrer_apex(),
            params: self.combined_params(),
            stored,
            same_session,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_location() {
        let page = PageView::new(
            "https://www.example.com/landing?utm_source=news&x=1#utm_campaign=spring",
            Some("https://blog.partner.io/post"),
        )
        .unwrap();
        assert_eq!(page.hostname(), "www.example.com");
        assert_eq!(page.current_apex().as_deref(), Some("example.com"));
        assert_eq!(page.referrer_apex().as_deref(), Some("partner.io"));
        assert_eq!(page.combined_params(), "utm_source=news&x=1#utm_campaign=spring");
    }

    #[test]
    fn missing_query_and_fragment() {
        let page = PageView::new("https://example.com/", None).unwrap();
        assert_eq!(page.combined_params(), "#");
        assert!(page.referrer().is_none());
    }

    #[test]
    fn empty_referrer_is_none() {
        let page = PageView::new("https://example.com/", Some("")).unwrap();
        assert!(page.referrer().is_none());
        assert!(page.referrer_apex().is_none());
    }

    #[test]
    fn rejects_relative_location() {
        let err = PageView::new("/landing?utm_source=x", None).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }

    #[test]
    fn builds_context() {
        let page = PageView::new(
            "https://shop.example.com/?gclid=abc",
            Some("https://www.example.com/"),
        )
        .unwrap();
        let ctx = page.context(Some("utmcsr=x|utmcmd=y".into()), true);
        assert!(ctx.is_same_site());
        assert!(ctx.same_session);
        assert_eq!(ctx.params, "gclid=abc#");
        assert_eq!(ctx.stored.as_deref(), Some("utmcsr=x|utmcmd=y"));
    }
}
