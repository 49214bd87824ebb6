use lazy_static::lazy_static;
use regex::Regex;

use super::{FieldCheck, ValidationErrors};
use crate::auth::repo_types::User;

pub const EMAIL_MAX_LEN: usize = 50;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 30;

pub trait UserValidator: Send + Sync {
    fn validate_user(&self, user: &User) -> Result<(), ValidationErrors>;
}

/// Rules shared by signup and login.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardUserValidator;

impl StandardUserValidator {
    pub fn new() -> Self {
        Self
    }
}

impl UserValidator for StandardUserValidator {
    fn validate_user(&self, user: &User) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        FieldCheck::new(&user.email)
            .required("email is required")
            .rune_length(1, EMAIL_MAX_LEN, "email must be at most 50 characters")
            .matches(is_valid_email, "email must be a valid email address")
            .record("email", &mut errors);

        FieldCheck::new(&user.password)
            .required("password is required")
            .rune_length(
                PASSWORD_MIN_LEN,
                PASSWORD_MAX_LEN,
                "password must be between 6 and 30 characters",
            )
            .record("password", &mut errors);

        errors.into_result()
    }
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        // dot-atom local part, domain with at least two labels
        static ref EMAIL_RE: Regex = Regex::new(
            r##"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$"##
        )
        .unwrap();
    }
    match email.rsplit_once('@') {
        Some((local, _)) if local.chars().count() <= 64 => EMAIL_RE.is_match(email),
        _ => false,
    }
}
