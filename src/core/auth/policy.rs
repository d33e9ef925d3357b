//! Password strength policy
//!
//! Every rule is checked independently so a weak password reports all of its
//! problems at once instead of only the first one.

use std::fmt;

/// Minimum number of characters a password must contain
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Separator used when violations are joined for display
pub const VIOLATION_SEPARATOR: &str = " | ";

/// A single reason a password fails the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordViolation {
    TooShort,
    MissingLowercase,
    MissingUppercase,
    MissingDigit,
    MissingSymbol,
}

impl PasswordViolation {
    /// Human readable message for this violation
    pub fn message(&self) -> &'static str {
        match self {
            PasswordViolation::TooShort => "Error: the password need to be long than 8 characters",
            PasswordViolation::MissingLowercase => {
                "Error: password must contain lowercase letter(s)"
            }
            PasswordViolation::MissingUppercase => {
                "Error: password must contain uppercase letter(s)"
            }
            PasswordViolation::MissingDigit => "Error: password must contain number(s)",
            PasswordViolation::MissingSymbol => "Error: password must contain symbol(s)",
        }
    }
}

impl fmt::Display for PasswordViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Per-class character counts. Each character lands in exactly one bucket.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CharacterClasses {
    lowercase: usize,
    uppercase: usize,
    digits: usize,
    symbols: usize,
}

impl CharacterClasses {
    fn count(password: &str) -> Self {
        let mut classes = Self::default();

        for c in password.chars() {
            if c.is_ascii_lowercase() {
                classes.lowercase += 1;
            } else if c.is_ascii_uppercase() {
                classes.uppercase += 1;
            } else if c.is_ascii_digit() {
                classes.digits += 1;
            } else {
                classes.symbols += 1;
            }
        }

        classes
    }
}

/// Validate password strength.
///
/// Returns an empty list when the password is acceptable. Violations are
/// ordered: length, lowercase, uppercase, digit, symbol.
pub fn validate_password(password: &str) -> Vec<PasswordViolation> {
    let mut violations = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        violations.push(PasswordViolation::TooShort);
    }

    let classes = CharacterClasses::count(password);

    if classes.lowercase == 0 {
        violations.push(PasswordViolation::MissingLowercase);
    }
    if classes.uppercase == 0 {
        violations.push(PasswordViolation::MissingUppercase);
    }
    if classes.digits == 0 {
        violations.push(PasswordViolation::MissingDigit);
    }
    if classes.symbols == 0 {
        violations.push(PasswordViolation::MissingSymbol);
    }

    violations
}

/// Join violation messages into a single display string
pub fn join_violations(violations: &[PasswordViolation]) -> String {
    violations
        .iter()
        .map(PasswordViolation::message)
        .collect::<Vec<_>>()
        .join(VIOLATION_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Acceptable Passwords
    // ========================================================================

    #[test]
    fn test_strong_password_has_no_violations() {
        assert!(validate_password("Abcdef1!").is_empty());
        assert!(validate_password("Newpass1$").is_empty());
        assert!(validate_password("MyP@ssw0rd!").is_empty());
    }

    #[test]
    fn test_exactly_min_length_is_accepted() {
        let password = "Aa1!aaaa";
        assert_eq!(password.chars().count(), MIN_PASSWORD_LENGTH);
        assert!(validate_password(password).is_empty());
    }

    #[test]
    fn test_long_password_has_no_upper_bound() {
        let password = format!("Aa1!{}", "x".repeat(500));
        assert!(validate_password(&password).is_empty());
    }

    // ========================================================================
    // Length Rule
    // ========================================================================

    #[test]
    fn test_short_passwords_report_too_short() {
        for password in ["", "A", "Ab1!", "Abc12!x"] {
            let violations = validate_password(password);
            assert!(
                violations.contains(&PasswordViolation::TooShort),
                "expected TooShort for {:?}",
                password
            );
        }
    }

    #[test]
    fn test_short_password_with_all_classes_only_too_short() {
        assert_eq!(
            validate_password("Ab1!"),
            vec![PasswordViolation::TooShort]
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 7 characters, but well over 8 bytes
        let password = "Aé1!ééé";
        assert_eq!(password.chars().count(), 7);
        assert!(validate_password(password).contains(&PasswordViolation::TooShort));
    }

    // ========================================================================
    // Character Class Rules
    // ========================================================================

    #[test]
    fn test_missing_digit_only() {
        assert_eq!(
            validate_password("Abcdefg!"),
            vec![PasswordViolation::MissingDigit]
        );
    }

    #[test]
    fn test_missing_symbol_only() {
        assert_eq!(
            validate_password("Abcdefg1"),
            vec![PasswordViolation::MissingSymbol]
        );
    }

    #[test]
    fn test_missing_uppercase_only() {
        assert_eq!(
            validate_password("abcdefg1!"),
            vec![PasswordViolation::MissingUppercase]
        );
    }

    #[test]
    fn test_missing_lowercase_only() {
        assert_eq!(
            validate_password("ABCDEFG1!"),
            vec![PasswordViolation::MissingLowercase]
        );
    }

    #[test]
    fn test_only_lowercase_reports_missing_classes() {
        assert_eq!(
            validate_password("abcdefgh"),
            vec![
                PasswordViolation::MissingUppercase,
                PasswordViolation::MissingDigit,
                PasswordViolation::MissingSymbol,
            ]
        );
    }

    #[test]
    fn test_empty_password_reports_every_rule_in_order() {
        assert_eq!(
            validate_password(""),
            vec![
                PasswordViolation::TooShort,
                PasswordViolation::MissingLowercase,
                PasswordViolation::MissingUppercase,
                PasswordViolation::MissingDigit,
                PasswordViolation::MissingSymbol,
            ]
        );
    }

    #[test]
    fn test_non_ascii_letters_count_as_symbols() {
        // 'ß' and 'É' are letters but fall outside the ASCII classes
        assert_eq!(validate_password("Abcdef1ß"), Vec::new());
        assert_eq!(
            validate_password("ÉÉÉÉÉÉÉÉ"),
            vec![
                PasswordViolation::MissingLowercase,
                PasswordViolation::MissingUppercase,
                PasswordViolation::MissingDigit,
            ]
        );
    }

    #[test]
    fn test_whitespace_counts_as_symbol() {
        assert!(validate_password("Abc def1").is_empty());
    }

    #[test]
    fn test_character_class_counts() {
        let classes = CharacterClasses::count("aB3$xY9 ");
        assert_eq!(
            classes,
            CharacterClasses {
                lowercase: 2,
                uppercase: 2,
                digits: 2,
                symbols: 2,
            }
        );
    }

    #[test]
    fn test_validate_is_idempotent() {
        for password in ["", "abc", "Abcdef1!", "ALLUPPER", "12345678"] {
            assert_eq!(validate_password(password), validate_password(password));
        }
    }

    // ========================================================================
    // Messages
    // ========================================================================

    #[test]
    fn test_violation_display_matches_message() {
        assert_eq!(
            PasswordViolation::TooShort.to_string(),
            "Error: the password need to be long than 8 characters"
        );
        assert_eq!(
            PasswordViolation::MissingSymbol.to_string(),
            "Error: password must contain symbol(s)"
        );
    }

    #[test]
    fn test_join_violations() {
        let joined = join_violations(&validate_password("abcdefgh1"));
        assert_eq!(
            joined,
            "Error: password must contain uppercase letter(s) | Error: password must contain symbol(s)"
        );
    }

    #[test]
    fn test_join_no_violations_is_empty() {
        assert_eq!(join_violations(&[]), "");
    }
}
