//! Client-side validation of the login and registration forms.
//!
//! A form with any error is not submitted. The LMS validates again on post.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([\w.%+-]+)@([\w-]+\.)+([\w]{2,})$").expect("email pattern compiles")
});

static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("username pattern compiles"));

const MIN_PASSWORD_CHARS: usize = 8;

/// Errors shown under the login form fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoginErrors {
    pub email_or_username: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl LoginErrors {
    /// Returns true if the form may be submitted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.email_or_username.is_none() && self.password.is_none()
    }
}

/// Validates the login form.
#[must_use]
pub fn validate_login(email_or_username: &str, password: &str) -> LoginErrors {
    let email_or_username = if email_or_username.is_empty() {
        Some("Enter your username or email")
    } else if email_or_username.chars().count() < 3 {
        Some("Username or email must have at least 3 characters.")
    } else if !EMAIL_REGEX.is_match(email_or_username) {
        Some("The email address you've provided isn't formatted correctly.")
    } else {
        None
    };

    let password = password.is_empty().then_some("Enter your password");

    LoginErrors {
        email_or_username,
        password,
    }
}

/// Values entered in the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub country: String,
}

/// Errors shown under the registration form fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistrationErrors {
    pub name: Option<&'static str>,
    pub username: Option<&'static str>,
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl RegistrationErrors {
    /// Returns true if the form may be submitted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.name.is_none()
            && self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
    }
}

/// Validates the registration form.
#[must_use]
pub fn validate_registration(form: &RegistrationForm) -> RegistrationErrors {
    RegistrationErrors {
        name: form
            .name
            .trim()
            .is_empty()
            .then_some("Please enter your Full Name."),
        username: validate_username(&form.username),
        email: validate_email(&form.email),
        password: validate_password(&form.password),
    }
}

fn validate_username(username: &str) -> Option<&'static str> {
    let length = username.chars().count();
    if username.is_empty() {
        Some("Please enter your Public Username.")
    } else if !(2..=30).contains(&length) {
        Some("Username must be between 2 and 30 characters long.")
    } else if !USERNAME_REGEX.is_match(username) {
        Some(
            "Usernames can only contain letters (A-Z, a-z), numerals (0-9), underscores (_), and hyphens (-).",
        )
    } else {
        None
    }
}

fn validate_email(email: &str) -> Option<&'static str> {
    if email.is_empty() {
        Some("Please enter your Email.")
    } else if email.chars().count() < 3 {
        Some("Email must have 3 characters.")
    } else if !EMAIL_REGEX.is_match(email) {
        Some("The email address you provided isn't formatted correctly.")
    } else {
        None
    }
}

fn validate_password(password: &str) -> Option<&'static str> {
    if password.is_empty() {
        return Some("Please enter your Password.");
    }
    let long_enough = password.chars().count() >= MIN_PASSWORD_CHARS;
    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if long_enough && has_letter && has_digit {
        None
    } else {
        Some("Your password must contain at least 8 characters, including a letter and a number.")
    }
}
