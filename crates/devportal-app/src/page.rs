//! Device page state: fetch lifecycle and error boundary

use std::sync::Arc;

use devportal_core::{DeviceRecord, RemoteFailure};

#[derive(Debug, Clone, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Loaded(Arc<DeviceRecord>),
    Failed(RemoteFailure),
}

impl FetchState {
    pub fn record(&self) -> Option<&Arc<DeviceRecord>> {
        match self {
            FetchState::Loaded(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }
}

#[derive(Debug, Clone)]
pub struct PageState {
    pub fetch: FetchState,
    /// Fault captured by the error boundary; the page shows the fallback view
    pub boundary_error: Option<String>,
    pub details_expanded: bool,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            fetch: FetchState::Idle,
            boundary_error: None,
            details_expanded: true,
        }
    }
}

impl PageState {
    pub fn capture_fault(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("Error boundary captured: {}", message);
        self.boundary_error = Some(message);
    }

    /// Clear the boundary and forget any fetched data
    pub fn reset_boundary(&mut self) {
        self.boundary_error = None;
        self.fetch = FetchState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_expanded_by_default() {
        assert!(PageState::default().details_expanded);
    }

    #[test]
    fn test_boundary_reset() {
        let mut page = PageState::default();
        page.fetch = FetchState::Loaded(Arc::new(DeviceRecord::default()));
        page.capture_fault("bad payload");
        assert!(page.boundary_error.is_some());

        page.reset_boundary();
        assert!(page.boundary_error.is_none());
        assert!(page.fetch.record().is_none());
    }
}
