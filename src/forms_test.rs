use super::*;

#[test]
fn validate_login_input_trims_email_and_requires_both_fields() {
    assert_eq!(
        validate_login_input("  a@x.com ", "pw"),
        Ok(("a@x.com".to_owned(), "pw".to_owned()))
    );
    assert_eq!(validate_login_input("   ", "pw"), Err("Enter both email and password."));
    assert_eq!(validate_login_input("a@x.com", ""), Err("Enter both email and password."));
}

#[test]
fn validate_login_input_keeps_password_whitespace() {
    assert_eq!(
        validate_login_input("a@x.com", " pw "),
        Ok(("a@x.com".to_owned(), " pw ".to_owned()))
    );
}

#[test]
fn validate_signup_input_requires_matching_confirmation() {
    assert_eq!(validate_signup_input("a@x.com", "secret", "secreT"), Err("Passwords do not match!"));
    assert_eq!(
        validate_signup_input("a@x.com", "secret", "secret"),
        Ok(("a@x.com".to_owned(), "secret".to_owned()))
    );
}

#[test]
fn validate_password_change_messages() {
    assert_eq!(validate_password_change("", "new", "new"), Err("Enter your current password."));
    assert_eq!(validate_password_change("old", "", ""), Err("Enter a new password."));
    assert_eq!(validate_password_change("old", "new", "other"), Err("New passwords do not match"));
    assert_eq!(validate_password_change("old", "new", "new"), Ok(("old", "new")));
}

#[test]
fn password_strength_levels() {
    assert_eq!(password_strength(""), PasswordStrength::Empty);
    assert_eq!(password_strength("abc"), PasswordStrength::Weak);
    assert_eq!(password_strength("abcdef"), PasswordStrength::Fair);
    assert_eq!(password_strength("abcdefghij"), PasswordStrength::Good);
    assert_eq!(password_strength("Abcdefghi1"), PasswordStrength::Strong);
    assert_eq!(password_strength("ABCDEFGHI1"), PasswordStrength::Good);
}

#[test]
fn password_strength_scores_and_labels() {
    assert_eq!(PasswordStrength::Empty.score(), 0);
    assert_eq!(PasswordStrength::Weak.label(), "Weak");
    assert_eq!(PasswordStrength::Fair.score(), 50);
    assert_eq!(PasswordStrength::Good.score(), 75);
    assert_eq!(PasswordStrength::Strong.label(), "Strong");
    assert!(PasswordStrength::Strong > PasswordStrength::Good);
}
