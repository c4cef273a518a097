//! Application state (Model in TEA pattern)

use std::sync::Arc;
use std::time::Instant;

use crate::config::Settings;
use crate::confirm_dialog::ConfirmDialogState;
use crate::otp::OtpState;
use crate::page::{FetchState, PageState};
use crate::route::Route;
use crate::snackbar::{Severity, Snackbar};
use crate::ticket_form::TicketForm;
use devportal_core::{sample_record, DeviceRecord, Localizer, Session, TicketConfirmation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// What the body of the screen shows, derived from route and session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Phone/code verification
    Otp,
    /// Device fetch in flight
    Loading,
    /// Device card plus ticket form
    Device,
    /// Authenticated on `/` with no device id
    NoDevice,
    /// Ticket confirmation (`/successful`)
    Confirmation,
    /// The error boundary caught a fault
    ErrorFallback,
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,
    pub route: Route,
    /// Last device id seen in a device route; survives the confirmation view
    pub device_id: Option<String>,
    pub session: Session,
    pub localizer: Localizer,
    pub otp: OtpState,
    pub page: PageState,
    pub ticket: Option<TicketForm>,
    pub confirmation: Option<TicketConfirmation>,
    pub snackbar: Option<Snackbar>,
    pub confirm_dialog: Option<ConfirmDialogState>,
    pub settings: Settings,
    /// The autofill capability can deliver codes
    pub autofill_supported: bool,
}

impl AppState {
    pub fn new(route: Route, settings: Settings) -> Self {
        let device_id = route.device_id().map(str::to_string);
        let session = Session::for_device(device_id.as_deref());
        if session.test_mode {
            tracing::info!("Test mode enabled for device {:?}", device_id);
        }
        Self {
            phase: AppPhase::Running,
            route,
            device_id,
            session,
            localizer: Localizer::new(settings.ui.language),
            otp: OtpState::new(),
            page: PageState::default(),
            ticket: None,
            confirmation: None,
            snackbar: None,
            confirm_dialog: None,
            autofill_supported: settings.otp.autofill_file.is_some(),
            settings,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    /// Gate the body view on boundary, route and authentication
    pub fn screen(&self) -> Screen {
        if self.page.boundary_error.is_some() {
            return Screen::ErrorFallback;
        }
        if self.route == Route::Successful {
            return Screen::Confirmation;
        }
        if !self.session.authenticated {
            return Screen::Otp;
        }
        match &self.route {
            Route::Home => Screen::NoDevice,
            Route::Device(_) => match self.page.fetch {
                FetchState::Loaded(_) => Screen::Device,
                _ => Screen::Loading,
            },
            Route::Successful => Screen::Confirmation,
        }
    }

    pub fn record(&self) -> Option<&Arc<DeviceRecord>> {
        self.page.fetch.record()
    }

    pub fn show_snackbar(&mut self, key: &'static str, severity: Severity) {
        self.push_snackbar(Snackbar::new(
            key,
            severity,
            Instant::now(),
            self.settings.snackbar_ttl(),
        ));
    }

    pub fn push_snackbar(&mut self, snackbar: Snackbar) {
        self.snackbar = Some(snackbar);
    }

    pub fn snackbar_ttl(&self) -> std::time::Duration {
        self.settings.snackbar_ttl()
    }

    /// Load a record into the page and start a form for it
    pub fn set_record(&mut self, record: Arc<DeviceRecord>) {
        self.ticket = Some(TicketForm::new(&record));
        self.page.fetch = FetchState::Loaded(record);
    }

    /// Switch language; test-mode sample data follows the new language
    pub fn toggle_language(&mut self) {
        let (code, direction) = self.localizer.toggle();
        tracing::info!("Language switched to {} ({:?})", code, direction);
        if self.session.test_mode && self.page.fetch.record().is_some() {
            let record = Arc::new(sample_record(self.localizer.current()));
            // Keep what the user typed; only the displayed record changes
            self.page.fetch = FetchState::Loaded(record);
        }
    }

    pub fn navigate(&mut self, route: Route) {
        tracing::debug!("Navigate {} -> {}", self.route, route);
        if let Some(id) = route.device_id() {
            self.device_id = Some(id.to_string());
        }
        self.route = route;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devportal_core::Language;

    fn device_state(id: &str) -> AppState {
        AppState::new(Route::Device(id.into()), Settings::default())
    }

    #[test]
    fn test_unauthenticated_device_route_shows_otp() {
        assert_eq!(device_state("SN-1").screen(), Screen::Otp);
    }

    #[test]
    fn test_authenticated_device_route_loading_then_device() {
        let mut state = device_state("SN-1");
        state.session.authenticate("0501234567");
        state.page.fetch = FetchState::Loading;
        assert_eq!(state.screen(), Screen::Loading);

        state.set_record(Arc::new(DeviceRecord::default()));
        assert_eq!(state.screen(), Screen::Device);
        assert!(state.ticket.is_some());
    }

    #[test]
    fn test_home_route_authenticated_shows_no_device() {
        let mut state = AppState::new(Route::Home, Settings::default());
        state.session.authenticate("0501234567");
        assert_eq!(state.screen(), Screen::NoDevice);
    }

    #[test]
    fn test_successful_route_shows_confirmation_without_session() {
        let state = AppState::new(Route::Successful, Settings::default());
        assert_eq!(state.screen(), Screen::Confirmation);
    }

    #[test]
    fn test_boundary_takes_precedence() {
        let mut state = device_state("SN-1");
        state.page.capture_fault("boom");
        assert_eq!(state.screen(), Screen::ErrorFallback);
    }

    #[test]
    fn test_test_mode_detected_from_route() {
        assert!(device_state("1234").session.test_mode);
        assert!(!device_state("12345").session.test_mode);
    }

    #[test]
    fn test_toggle_language_regenerates_sample_in_test_mode() {
        let mut state = device_state("1234");
        state.session.authenticate("1234");
        state.set_record(Arc::new(sample_record(Language::English)));

        state.toggle_language();

        assert_eq!(state.localizer.current(), Language::Hebrew);
        let record = state.record().unwrap();
        assert_eq!(**record, sample_record(Language::Hebrew));
    }

    #[test]
    fn test_navigate_remembers_device_id() {
        let mut state = device_state("SN-1");
        state.navigate(Route::Successful);
        assert_eq!(state.device_id.as_deref(), Some("SN-1"));
    }
}
