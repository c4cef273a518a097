//! Authentication session for one portal run (never persisted)

/// Device id that switches the portal into offline test mode
pub const TEST_MODE_DEVICE_ID: &str = "1234";

/// Phone number and code accepted in test mode
pub const TEST_MODE_SENTINEL: &str = "1234";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    pub phone: String,
    pub test_mode: bool,
}

impl Session {
    /// Start an unauthenticated session for the given device id
    pub fn for_device(device_id: Option<&str>) -> Self {
        Self {
            authenticated: false,
            phone: String::new(),
            test_mode: device_id == Some(TEST_MODE_DEVICE_ID),
        }
    }

    /// Mark the session verified for `phone`
    pub fn authenticate(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
        self.authenticated = true;
    }

    /// Drop authentication, keeping test mode
    pub fn sign_out(&mut self) {
        self.authenticated = false;
        self.phone.clear();
    }
}
