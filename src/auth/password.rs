/// Password strength policy applied before registration reaches the backend.
///
/// A password must contain at least one ASCII uppercase letter, one ASCII
/// lowercase letter, one ASCII digit and one character outside those classes.
pub fn is_strong_password(password: &str) -> bool {
    let mut upper = false;
    let mut lower = false;
    let mut digit = false;
    let mut symbol = false;

    for c in password.chars() {
        match c {
            'A'..='Z' => upper = true,
            'a'..='z' => lower = true,
            '0'..='9' => digit = true,
            _ => symbol = true,
        }
    }

    upper && lower && digit && symbol
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_all_four_classes() {
        assert!(is_strong_password("Abcdef1!"));
    }

    #[test]
    fn rejects_missing_classes() {
        assert!(!is_strong_password("abcdefg1"));
        assert!(!is_strong_password("ABCDEFG!"));
        assert!(!is_strong_password(""));
    }

    #[test]
    fn non_ascii_counts_as_symbol() {
        assert!(is_strong_password("Abcdef1é"));
        // 'Á' is not an ASCII capital
        assert!(!is_strong_password("Ábcdef1"));
    }
}
