//! Shape validation - structural checks independent of stored data
//!
//! Each failure is its own error kind so the presentation layer can surface a
//! precise message. Uniqueness against the store is checked separately by the
//! lifecycle workers.

use crate::error::DomainError;

/// Check nickname shape: 3-32 characters, ASCII letters, digits, and
/// underscores only.
pub fn check_nickname(nickname: &str) -> Result<(), DomainError> {
    if !(3..=32).contains(&nickname.chars().count()) {
        return Err(DomainError::IncorrectNicknameLength);
    }
    if !nickname
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(DomainError::NicknameInvalidCharacters);
    }
    Ok(())
}

/// Check password shape: 8-512 characters with at least one non-whitespace
/// character.
pub fn check_password(password: &str) -> Result<(), DomainError> {
    if !(8..=512).contains(&password.chars().count()) {
        return Err(DomainError::IncorrectPasswordLength);
    }
    if password.trim().is_empty() {
        return Err(DomainError::InsecurePassword);
    }
    Ok(())
}

/// Check email shape: full match of `word@word.word` where a word is one or
/// more ASCII alphanumerics or underscores.
pub fn check_email(email: &str) -> Result<(), DomainError> {
    fn is_word(s: &str) -> bool {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(DomainError::IncorrectEmailFormat);
    };
    let Some((host, tld)) = domain.split_once('.') else {
        return Err(DomainError::IncorrectEmailFormat);
    };
    if is_word(local) && is_word(host) && is_word(tld) {
        Ok(())
    } else {
        Err(DomainError::IncorrectEmailFormat)
    }
}
