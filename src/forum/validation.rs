// SPDX-License-Identifier: MPL-2.0
//! Client-side checks run before a form is submitted.
//!
//! Lengths count characters, not bytes. The first failing rule wins.

use thiserror::Error;

pub const MIN_USERNAME_CHARS: usize = 3;
pub const MIN_PASSWORD_CHARS: usize = 6;
pub const MIN_TITLE_CHARS: usize = 5;
pub const MIN_CONTENT_CHARS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("username must be at least 3 characters")]
    UsernameTooShort,
    #[error("password must be at least 6 characters")]
    PasswordTooShort,
    #[error("title must be at least 5 characters")]
    TitleTooShort,
    #[error("content must be at least 20 characters")]
    ContentTooShort,
    #[error("a category is required")]
    CategoryMissing,
}

impl ValidationError {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ValidationError::UsernameTooShort => "validation-username-too-short",
            ValidationError::PasswordTooShort => "validation-password-too-short",
            ValidationError::TitleTooShort => "validation-title-too-short",
            ValidationError::ContentTooShort => "validation-content-too-short",
            ValidationError::CategoryMissing => "validation-category-missing",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.chars().count() < MIN_USERNAME_CHARS {
            return Err(ValidationError::UsernameTooShort);
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ValidationError::PasswordTooShort);
        }
        Ok(())
    }
}

/// A new post, submitted as multipart to `/create-post`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    /// Category id as entered; empty means none selected.
    pub category: String,
    /// Comma-separated tags, optional.
    pub tags: String,
}

impl PostDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.chars().count() < MIN_TITLE_CHARS {
            return Err(ValidationError::TitleTooShort);
        }
        if self.content.chars().count() < MIN_CONTENT_CHARS {
            return Err(ValidationError::ContentTooShort);
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::CategoryMissing);
        }
        Ok(())
    }
}
