//! Custom widget components

mod confirm_dialog;
mod confirmation;
mod device_card;
pub mod modal_overlay;
mod navbar;
mod notice;
mod otp_panel;
mod snackbar;
mod ticket_form;

pub use confirm_dialog::ConfirmDialog;
pub use confirmation::ConfirmationView;
pub use device_card::DeviceCard;
pub use navbar::Navbar;
pub use notice::{Notice, NoticeKind};
pub use otp_panel::OtpPanel;
pub use snackbar::SnackbarBar;
pub use ticket_form::TicketFormView;
