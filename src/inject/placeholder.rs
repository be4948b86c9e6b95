//! Base URL placeholder substitution.

use crate::site::url::{BaseUrl, PLACEHOLDER};
use std::borrow::Cow;

/// Replace every placeholder with the base URL, or drop it (site-relative).
pub fn substitute<'a>(html: &'a str, base: Option<&BaseUrl>) -> Cow<'a, str> {
    if !html.contains(PLACEHOLDER) {
        return Cow::Borrowed(html);
    }
    Cow::Owned(html.replace(PLACEHOLDER, base.map_or("", BaseUrl::as_str)))
}
