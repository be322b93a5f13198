//! Contact, login and sign-up form validation.

use thiserror::Error;

use crate::notice::Notice;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

impl FormError {
    pub fn notice(&self) -> Notice {
        Notice::error(self.to_string())
    }
}

fn any_blank(fields: &[&str]) -> bool {
    fields.iter().any(|f| f.trim().is_empty())
}

/// The "Contact Us" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if any_blank(&[&self.name, &self.email, &self.message]) {
            return Err(FormError::MissingFields);
        }
        Ok(())
    }

    /// Validate and, on success, clear the form.
    pub fn submit(&mut self) -> Result<Notice, FormError> {
        self.validate()?;
        tracing::info!(email = %self.email, "contact message submitted");
        *self = Self::default();
        Ok(Notice::success("Message Sent!", "We'll get back to you soon."))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if any_blank(&[&self.email, &self.password]) {
            return Err(FormError::MissingFields);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if any_blank(&[
            &self.name,
            &self.email,
            &self.password,
            &self.confirm_password,
        ]) {
            return Err(FormError::MissingFields);
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_requires_all_fields() {
        let mut form = ContactForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            message: " ".into(),
        };
        assert_eq!(form.submit().unwrap_err(), FormError::MissingFields);
        assert_eq!(form.name, "Ana");

        form.message = "Is Max still available?".into();
        let notice = form.submit().unwrap();
        assert_eq!(notice.title, "Message Sent!");
        assert_eq!(form, ContactForm::default());
    }

    #[test]
    fn signup_checks_password_confirmation() {
        let mut form = SignupForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "hunter22".into(),
            confirm_password: "hunter23".into(),
        };
        assert_eq!(form.validate().unwrap_err(), FormError::PasswordMismatch);
        assert_eq!(
            form.validate().unwrap_err().notice().description,
            "Passwords do not match"
        );

        form.confirm_password = "hunter22".into();
        assert!(form.validate().is_ok());

        form.name.clear();
        assert_eq!(form.validate().unwrap_err(), FormError::MissingFields);
    }

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            email: "ana@example.com".into(),
            password: String::new(),
        };
        assert!(form.validate().is_err());
    }
}
