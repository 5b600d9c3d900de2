//! Simulated login and signup.
//!
//! Submits only check that required fields are filled in, wait a fixed
//! delay and land on the dashboard. No credentials are checked or stored.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::notify::Notifier;
use crate::route::Route;

/// Notice raised after a login.
pub const LOGIN_SUCCESS: &str = "Welcome back!";

/// Notice raised after a signup.
pub const SIGNUP_SUCCESS: &str = "Account created successfully!";

/// Notice raised by the forgot-password link.
pub const PASSWORD_RESET_STUB: &str = "Password reset coming soon";

/// The login form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

impl LoginForm {
    /// Check that every required field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        require("login", "email", &self.email)?;
        require("login", "password", &self.password)
    }
}

/// The signup form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password again. Not compared with `password`.
    pub confirm_password: String,
}

impl SignupForm {
    /// Check that every required field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        require("signup", "name", &self.name)?;
        require("signup", "email", &self.email)?;
        require("signup", "password", &self.password)?;
        require("signup", "confirm_password", &self.confirm_password)
    }
}

fn require(form: &'static str, field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::missing_field(form, field));
    }
    Ok(())
}

/// Submit handlers for the auth page.
#[derive(Debug, Clone)]
pub struct AuthForms {
    notifier: Notifier,
    submit_delay: Duration,
}

impl AuthForms {
    /// Create handlers that wait `submit_delay` before completing.
    #[must_use]
    pub fn new(submit_delay: Duration, notifier: Notifier) -> Self {
        Self {
            notifier,
            submit_delay,
        }
    }

    /// Submit the login form and return where to go next.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if a required field is empty.
    pub async fn login(&self, form: &LoginForm) -> Result<Route> {
        form.validate()?;
        debug!("login submitted");
        tokio::time::sleep(self.submit_delay).await;
        self.notifier.success(LOGIN_SUCCESS);
        Ok(Route::Dashboard)
    }

    /// Submit the signup form and return where to go next.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if a required field is empty.
    pub async fn signup(&self, form: &SignupForm) -> Result<Route> {
        form.validate()?;
        debug!("signup submitted");
        tokio::time::sleep(self.submit_delay).await;
        self.notifier.success(SIGNUP_SUCCESS);
        Ok(Route::Dashboard)
    }

    /// The forgot-password link.
    pub fn forgot_password(&self) {
        self.notifier.info(PASSWORD_RESET_STUB);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{drain, NoticeLevel};

    fn login_form() -> LoginForm {
        LoginForm {
            email: "doctor@example.com".to_string(),
            password: "hunter2".to_string(),
        }
    }

    fn signup_form() -> SignupForm {
        SignupForm {
            name: "Dr. John Smith".to_string(),
            email: "doctor@example.com".to_string(),
            password: "hunter2".to_string(),
            confirm_password: "different".to_string(),
        }
    }

    #[test]
    fn test_login_validate() {
        assert!(login_form().validate().is_ok());

        let form = LoginForm {
            email: String::new(),
            ..login_form()
        };
        let err = form.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::MissingField {
                form: "login",
                field: "email"
            }
        ));
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let form = LoginForm {
            password: "   ".to_string(),
            ..login_form()
        };
        assert!(matches!(
            form.validate(),
            Err(Error::MissingField {
                field: "password",
                ..
            })
        ));
    }

    #[test]
    fn test_signup_validate_reports_first_missing_field() {
        let form = SignupForm {
            name: String::new(),
            email: String::new(),
            ..signup_form()
        };
        assert!(matches!(
            form.validate(),
            Err(Error::MissingField { field: "name", .. })
        ));

        let form = SignupForm {
            confirm_password: String::new(),
            ..signup_form()
        };
        assert!(matches!(
            form.validate(),
            Err(Error::MissingField {
                field: "confirm_password",
                ..
            })
        ));
    }

    #[test]
    fn test_mismatched_confirmation_is_accepted() {
        assert!(signup_form().validate().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_then_lands_on_dashboard() {
        let (notifier, mut rx) = Notifier::channel();
        let forms = AuthForms::new(Duration::from_secs(1), notifier);

        let start = tokio::time::Instant::now();
        let route = forms.login(&login_form()).await.unwrap();
        assert_eq!(route, Route::Dashboard);
        assert!(start.elapsed() >= Duration::from_secs(1));

        let notices = drain(&mut rx);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Success);
        assert_eq!(notices[0].message, LOGIN_SUCCESS);
    }

    #[tokio::test(start_paused = true)]
    async fn test_signup_notice() {
        let (notifier, mut rx) = Notifier::channel();
        let forms = AuthForms::new(Duration::from_millis(10), notifier);

        forms.signup(&signup_form()).await.unwrap();
        assert_eq!(drain(&mut rx)[0].message, SIGNUP_SUCCESS);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_submit_is_immediate_and_silent() {
        let (notifier, mut rx) = Notifier::channel();
        let forms = AuthForms::new(Duration::from_secs(1), notifier);

        let start = tokio::time::Instant::now();
        assert!(forms.login(&LoginForm::default()).await.is_err());
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_forgot_password() {
        let (notifier, mut rx) = Notifier::channel();
        AuthForms::new(Duration::ZERO, notifier).forgot_password();

        let notices = drain(&mut rx);
        assert_eq!(notices[0].level, NoticeLevel::Info);
        assert_eq!(notices[0].message, PASSWORD_RESET_STUB);
    }
}
