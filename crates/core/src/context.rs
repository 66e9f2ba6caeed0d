//! Per-page-view input to attribution resolution.

/// Everything resolution needs to know about one page view.
///
/// Assembled once per page view by the caller and consumed by a single
/// resolution. Apex domains are `None` when they could not be derived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawContext {
    /// Apex domain of the current page.
    pub current_apex: Option<String>,

    /// Full referrer URL, if the browser sent one.
    pub referrer: Option<String>,

    /// Apex domain of the referrer.
    pub referrer_apex: Option<String>,

    /// Query string and fragment joined as `query#fragment`.
    pub params: String,

    /// Previously persisted attribution string.
    pub stored: Option<String>,

    /// Whether a same-session marker was present.
    pub same_session: bool,
}

impl RawContext {
    /// Referrer and current page share an apex domain.
    ///
    /// An underivable apex on either side counts as a different site.
    pub fn is_same_site(&self) -> bool {
        matches!(
            (&self.referrer_apex, &self.current_apex),
            (Some(referrer), Some(current)) if referrer == current
        )
    }
}
