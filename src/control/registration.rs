use crate::network::api::RegistryApi;
use crate::notifications::{Notification, Notifier};
use crate::objects::registration::{RegistrationField, RegistrationForm, ValidationError};


pub const REGISTERED_MESSAGE: &str = "User registered successfully";
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed";

#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Required fields were missing; nothing was sent.
    Invalid(ValidationError),
    /// A submission is already running.
    Busy,
    Registered,
    Failed,
}

/// The public registration form and its submit handling.
pub struct RegistrationFlow {
    form: RegistrationForm,
    loading: bool,
}

impl RegistrationFlow {
    pub fn new() -> RegistrationFlow {
        RegistrationFlow {
            form: RegistrationForm::new(),
            loading: false,
        }
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn set_field(&mut self, field: RegistrationField, value: &str) {
        self.form.set(field, value);
    }

    pub fn set_membership_status(&mut self, value: bool) {
        self.form.set_membership_status(value);
    }

    /// Submit control is disabled while a submission runs.
    pub fn can_submit(&self) -> bool {
        !self.loading
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Validates, then sends the form once. The form is cleared only on success.
    pub fn submit(&mut self, api: &dyn RegistryApi, notifier: &dyn Notifier) -> SubmitOutcome {
        if self.loading {
            return SubmitOutcome::Busy
        }
        let request = match self.form.validate() {
            Ok(r) => r,
            Err(e) => {
                log::debug!("registration form incomplete: {e}");
                return SubmitOutcome::Invalid(e)
            }
        };
        self.loading = true;
        let result = api.submit_registration(&request);
        self.loading = false;
        match result {
            Ok(_) => {
                log::info!("registered {} {}", request.first_name, request.surname);
                notifier.notify(Notification::success(REGISTERED_MESSAGE));
                self.form.reset();
                SubmitOutcome::Registered
            },
            Err(e) => {
                log::warn!("registration failed: {e}");
                let message = if e.message().is_empty() { REGISTRATION_FAILED_MESSAGE } else { e.message() };
                notifier.notify(Notification::error(message));
                SubmitOutcome::Failed
            }
        }
    }
}

impl Default for RegistrationFlow {
    fn default() -> Self {
        RegistrationFlow::new()
    }
}
