use serde::{Deserialize, Serialize};
use validator::Validate;

/// What the visitor has typed so far. Any field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }

    /// Trim and validate the draft. This is the only way to obtain a
    /// [`ContactSubmission`].
    pub fn into_submission(self) -> Result<ContactSubmission, validator::ValidationErrors> {
        let submission = ContactSubmission {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            message: self.message.trim().to_owned(),
        };

        submission.validate()?;

        Ok(submission)
    }
}

/// A validated contact message, ready to hand to the delivery collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ContactSubmission {
    #[validate(length(min = 1, max = 100))]
    name: String,
    #[validate(email)]
    email: String,
    #[validate(length(min = 1, max = 5000))]
    message: String,
}

impl ContactSubmission {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn form(&self) -> ContactForm {
        ContactForm::new(&self.name, &self.email, &self.message)
    }

    pub fn variables(&self) -> EmailVariables {
        EmailVariables {
            user_name: self.name.to_owned(),
            user_email: self.email.to_owned(),
            message: self.message.to_owned(),
        }
    }
}

/// Template variables understood by the email template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailVariables {
    pub user_name: String,
    pub user_email: String,
    pub message: String,
}
