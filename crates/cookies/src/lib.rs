//! Cookie store implementations for utmzz.
//!
//! [`CookieJar`] reads cookies from a request `Cookie` header (or a
//! `document.cookie` string) and records every write as a
//! [`SetCookie`](utmzz_core::SetCookie) directive for the response.

mod jar;

pub use jar::CookieJar;
