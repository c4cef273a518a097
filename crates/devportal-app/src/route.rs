//! In-process routes of the portal

use std::fmt;

/// Path of the confirmation view
pub const SUCCESSFUL_PATH: &str = "/successful";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`: no device selected
    Home,
    /// `/device/{id}`
    Device(String),
    /// `/successful`: ticket confirmation
    Successful,
}

impl Route {
    /// Parse a route string. A bare id (no leading slash) is a device route.
    ///
    /// Unknown paths fall back to [`Route::Home`].
    pub fn parse(raw: &str) -> Route {
        let raw = raw.trim();
        if raw.is_empty() || raw == "/" {
            return Route::Home;
        }
        if raw.trim_end_matches('/') == SUCCESSFUL_PATH {
            return Route::Successful;
        }
        if let Some(id) = raw.strip_prefix("/device/") {
            let id = id.trim_matches('/');
            return if id.is_empty() {
                Route::Home
            } else {
                Route::Device(id.to_string())
            };
        }
        if !raw.starts_with('/') {
            return Route::Device(raw.to_string());
        }
        tracing::warn!("Unknown route '{}', showing home", raw);
        Route::Home
    }

    pub fn device_id(&self) -> Option<&str> {
        match self {
            Route::Device(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Device(id) => write!(f, "/device/{id}"),
            Route::Successful => write!(f, "{SUCCESSFUL_PATH}"),
        }
    }
}
