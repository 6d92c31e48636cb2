//! Input checks for the auth and settings forms.
//!
//! These run before any gateway call so obviously bad submissions never hit
//! the network. Messages are shown inline exactly as returned.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

const MISSING_CREDENTIALS: &str = "Enter both email and password.";
const SIGNUP_MISMATCH: &str = "Passwords do not match!";
const NEW_PASSWORD_MISMATCH: &str = "New passwords do not match";
const MISSING_CURRENT_PASSWORD: &str = "Enter your current password.";
const MISSING_NEW_PASSWORD: &str = "Enter a new password.";

/// Trim the email and require both fields. The password is kept verbatim.
///
/// # Errors
///
/// Returns the inline message when either field is blank.
pub fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_CREDENTIALS);
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Login checks plus the confirmation field.
///
/// # Errors
///
/// Returns the inline message for blank fields or a confirmation mismatch.
pub fn validate_signup_input(email: &str, password: &str, confirm: &str) -> Result<(String, String), &'static str> {
    let credentials = validate_login_input(email, password)?;
    if password != confirm {
        return Err(SIGNUP_MISMATCH);
    }
    Ok(credentials)
}

/// # Errors
///
/// Returns the inline message for a blank field or a confirmation mismatch.
pub fn validate_password_change<'a>(
    current: &'a str,
    new: &'a str,
    confirm: &str,
) -> Result<(&'a str, &'a str), &'static str> {
    if current.is_empty() {
        return Err(MISSING_CURRENT_PASSWORD);
    }
    if new.is_empty() {
        return Err(MISSING_NEW_PASSWORD);
    }
    if new != confirm {
        return Err(NEW_PASSWORD_MISMATCH);
    }
    Ok((current, new))
}

/// Strength meter shown under the sign-up password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    Empty,
    Weak,
    Fair,
    Good,
    Strong,
}

impl PasswordStrength {
    /// Meter fill percentage.
    #[must_use]
    pub fn score(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Weak => 25,
            Self::Fair => 50,
            Self::Good => 75,
            Self::Strong => 100,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Empty => "",
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Strong => "Strong",
        }
    }
}

/// Length first, then character mix: 10+ chars with lower, upper, and a
/// digit is `Strong`; 10+ otherwise is `Good`.
#[must_use]
pub fn password_strength(password: &str) -> PasswordStrength {
    let len = password.chars().count();
    if len == 0 {
        return PasswordStrength::Empty;
    }
    if len < 6 {
        return PasswordStrength::Weak;
    }
    if len < 10 {
        return PasswordStrength::Fair;
    }
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if has_lower && has_upper && has_digit { PasswordStrength::Strong } else { PasswordStrength::Good }
}
