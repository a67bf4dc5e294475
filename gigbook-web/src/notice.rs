//! One-shot notices attached to form redirects
//!
//! Form submissions answer with `303 See Other`. The message for the user
//! rides along in the `x-notice` header, its severity in `x-notice-level`.

use axum::http::{HeaderName, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};

pub const NOTICE_HEADER: HeaderName = HeaderName::from_static("x-notice");
pub const NOTICE_LEVEL_HEADER: HeaderName = HeaderName::from_static("x-notice-level");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

impl NoticeLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// `303 See Other` to `location` carrying this notice
    pub fn redirect(self, location: &str) -> Response {
        let mut response = Redirect::to(location).into_response();
        let headers = response.headers_mut();
        // Header values reject control characters; drop them rather than the notice
        let message: String = self.message.chars().filter(|c| !c.is_control()).collect();
        if let Ok(value) = HeaderValue::from_bytes(message.as_bytes()) {
            headers.insert(NOTICE_HEADER, value);
        }
        headers.insert(
            NOTICE_LEVEL_HEADER,
            HeaderValue::from_static(self.level.as_str()),
        );
        response
    }
}
