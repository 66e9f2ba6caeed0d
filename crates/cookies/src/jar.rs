//! In-memory cookie jar.

use tracing::trace;
use utmzz_core::{CookieStore, SetCookie};

/// Cookies visible to one page view, plus the writes made during it.
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    /// Current name/value pairs in header order. Names may repeat.
    cookies: Vec<(String, String)>,
    /// Every write, in order.
    written: Vec<SetCookie>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `name=value; name2=value2` header.
    ///
    /// Pieces without `=` are skipped. Values keep any further `=`.
    pub fn from_header(header: &str) -> Self {
        let cookies = header
            .split(';')
            .filter_map(|piece| {
                let (name, value) = piece.trim_start().split_once('=')?;
                let name = name.trim();
                (!name.is_empty()).then(|| (name.to_string(), value.to_string()))
            })
            .collect();
        Self {
            cookies,
            written: Vec::new(),
        }
    }

    /// Writes made so far, oldest first.
    pub fn written(&self) -> &[SetCookie] {
        &self.written
    }

    /// `Set-Cookie` header values for every write.
    pub fn set_cookie_headers(&self) -> Vec<String> {
        self.written.iter().map(SetCookie::header_value).collect()
    }

    /// Render the current cookies as a `Cookie` header.
    pub fn header(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl CookieStore for CookieJar {
    /// The last cookie with this name wins, as with `document.cookie`.
    fn read(&self, name: &str) -> Option<String> {
        self.cookies
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn write(&mut self, cookie: SetCookie) {
        trace!(name = %cookie.name, "Cookie written");
        self.cookies.retain(|(n, _)| *n != cookie.name);
        self.cookies.push((cookie.name.clone(), cookie.value.clone()));
        self.written.push(cookie);
    }
}
