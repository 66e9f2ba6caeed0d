//! Cookie store trait — the persistence seam of the tracker.
//!
//! The tracker reads the previous attribution and the session marker through
//! a [`CookieStore`], then writes both back as [`SetCookie`] directives. How
//! those directives reach the browser is up to the implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Read/write access to the visitor's cookies.
pub trait CookieStore {
    /// Current value of the named cookie.
    fn read(&self, name: &str) -> Option<String>;

    /// Set a cookie. Later reads of the same name observe the new value.
    fn write(&mut self, cookie: SetCookie);
}

/// A cookie to be set on the visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCookie {
    pub name: String,

    pub value: String,

    /// `None` makes it a session cookie.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl SetCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires: None,
            path: None,
            domain: None,
        }
    }

    pub fn with_expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the cookie domain. `None` leaves it host-only.
    pub fn with_domain(mut self, domain: Option<String>) -> Self {
        self.domain = domain;
        self
    }

    pub fn is_session(&self) -> bool {
        self.expires.is_none()
    }

    /// Render as a `Set-Cookie` / `document.cookie` assignment string.
    pub fn header_value(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SetCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={};", self.name, self.value)?;
        if let Some(expires) = &self.expires {
            write!(f, "Expires={};", expires.format("%a, %d %b %Y %H:%M:%S GMT"))?;
        }
        if let Some(path) = self.path.as_deref().filter(|p| !p.is_empty()) {
            write!(f, "Path={path};")?;
        }
        if let Some(domain) = self.domain.as_deref().filter(|d| !d.is_empty()) {
            write!(f, "Domain={domain};")?;
        }
        Ok(())
    }
}
