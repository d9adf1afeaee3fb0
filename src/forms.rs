use std::sync::OnceLock;

use chrono::{DateTime, Local, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::MembershipTier;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"))
}

fn name_regex() -> &'static Regex {
    static NAME: OnceLock<Regex> = OnceLock::new();
    NAME.get_or_init(|| Regex::new(r"^[A-Za-z\s-]{7,}$").expect("static regex"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Feedback,
    Suggestion,
    Bug,
    Partnership,
    Other,
}

impl Subject {
    pub const ALL: [Subject; 5] = [
        Subject::Feedback,
        Subject::Suggestion,
        Subject::Bug,
        Subject::Partnership,
        Subject::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Subject::Feedback => "Feedback",
            Subject::Suggestion => "Suggestion",
            Subject::Bug => "Bug Report",
            Subject::Partnership => "Partnership Inquiry",
            Subject::Other => "Other",
        }
    }
}

/// Editable contact form state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub subject: Option<Subject>,
    pub message: String,
    pub newsletter: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub full_name: String,
    pub email: String,
    /// Empty when the optional field was left blank.
    #[serde(default)]
    pub phone: String,
    pub subject: Subject,
    pub message: String,
    pub newsletter: bool,
    pub submitted_at: String,
}

impl ContactForm {
    /// Checks the fields in form order and stops at the first failure.
    pub fn validate(&self) -> Result<Subject, ValidationError> {
        if self.full_name.trim().is_empty() {
            return Err(ValidationError::MissingFullName);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        let subject = self.subject.ok_or(ValidationError::MissingSubject)?;
        if self.message.trim().is_empty() {
            return Err(ValidationError::MissingMessage);
        }
        Ok(subject)
    }

    /// Validates, snapshots and resets the form.
    pub fn submit(&mut self, now: DateTime<Local>) -> Result<ContactSubmission, ValidationError> {
        let subject = self.validate()?;
        let submission = ContactSubmission {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.trim().to_string(),
            subject,
            message: self.message.clone(),
            newsletter: self.newsletter,
            submitted_at: now.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        };
        *self = ContactForm::default();
        Ok(submission)
    }
}

/// Chamber membership application.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinForm {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub organization: String,
    pub membership: Option<MembershipTier>,
    pub description: String,
    /// Set when the form is opened.
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct JoinApplication {
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
    pub email: String,
    pub phone: String,
    pub organization: String,
    pub membership: MembershipTier,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl JoinForm {
    pub fn new(opened_at: DateTime<Utc>) -> Self {
        JoinForm {
            first_name: String::new(),
            last_name: String::new(),
            title: String::new(),
            email: String::new(),
            phone: String::new(),
            organization: String::new(),
            membership: None,
            description: String::new(),
            timestamp: opened_at,
        }
    }

    pub fn validate(&self) -> Result<JoinApplication, ValidationError> {
        check_name(&self.first_name, "first name")?;
        check_name(&self.last_name, "last name")?;
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.phone.trim().is_empty() {
            return Err(ValidationError::MissingField("phone"));
        }
        if self.organization.trim().is_empty() {
            return Err(ValidationError::MissingField("organization"));
        }
        let membership = self.membership.ok_or(ValidationError::MissingMembership)?;
        let title = self.title.trim();

        Ok(JoinApplication {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            title: (!title.is_empty()).then(|| title.to_string()),
            email: self.email.clone(),
            phone: self.phone.clone(),
            organization: self.organization.clone(),
            membership,
            description: self.description.clone(),
            timestamp: self.timestamp,
        })
    }
}

fn check_name(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::MissingField(field))
    } else if !name_regex().is_match(value) {
        Err(ValidationError::InvalidName(field))
    } else {
        Ok(())
    }
}

pub fn newsletter_accepts(email: &str) -> bool {
    !email.is_empty() && email.contains('@')
}
