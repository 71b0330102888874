//! Payment-card validation.
//!
//! Runs as one batch over all four fields and returns every failure in
//! field order, so the view can both mark each field and scroll to the
//! first invalid one. An empty [`CardErrors`] means the card is valid.

use chrono::{Datelike, NaiveDate};

/// Raw card form input, exactly as the user typed it.
#[derive(Debug, Clone, Default)]
pub struct CardInput {
    /// Card number; may contain grouping spaces.
    pub number: String,
    /// Expiry in `MM/YY` form.
    pub expiry: String,
    /// Card verification value.
    pub cvv: String,
    /// Name on the card.
    pub holder_name: String,
}

/// The card form fields, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardField {
    /// The card number.
    Number,
    /// The expiry date.
    Expiry,
    /// The CVV.
    Cvv,
    /// The cardholder name.
    HolderName,
}

impl CardField {
    /// Stable field name, matching the form input names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Number => "card_number",
            Self::Expiry => "expiry",
            Self::Cvv => "cvv",
            Self::HolderName => "holder_name",
        }
    }
}

impl std::fmt::Display for CardField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures keyed by field, in validation order.
#[derive(Debug, Clone, Default)]
pub struct CardErrors {
    errors: Vec<(CardField, String)>,
}

impl CardErrors {
    fn push(&mut self, field: CardField, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    /// Whether validation passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The first failed field and its message - the one the view scrolls
    /// to.
    #[must_use]
    pub fn first(&self) -> Option<(CardField, &str)> {
        self.errors.first().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// The message for a specific field, if it failed.
    #[must_use]
    pub fn message(&self, field: CardField) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| msg.as_str())
    }

    /// Iterate over failures in validation order.
    pub fn iter(&self) -> impl Iterator<Item = (CardField, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl std::fmt::Display for CardErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, msg) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {msg}")?;
            first = false;
        }
        Ok(())
    }
}

/// Luhn checksum over a string of ASCII digits.
///
/// Doubles every second digit from the rightmost, subtracting 9 from any
/// doubled digit above 9; the sum of all digits must be divisible by 10.
/// Any non-digit character fails the check.
#[must_use]
pub fn luhn_valid(digits: &str) -> bool {
    let mut sum = 0u32;
    let mut double = false;
    for c in digits.chars().rev() {
        let Some(mut digit) = c.to_digit(10) else {
            return false;
        };
        if double {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        double = !double;
    }
    sum % 10 == 0
}

/// Validate a card form against `today`.
///
/// The two-digit expiry year is compared against `today`'s year modulo
/// 100, matching how the form is filled in.
#[must_use]
pub fn validate_card(input: &CardInput, today: NaiveDate) -> CardErrors {
    let mut errors = CardErrors::default();

    // Card number: strip grouping spaces, then 16 digits + Luhn.
    let number: String = input
        .number
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if number.len() != 16 || !number.chars().all(|c| c.is_ascii_digit()) {
        errors.push(
            CardField::Number,
            "Please enter a valid 16-digit card number",
        );
    } else if !luhn_valid(&number) {
        errors.push(CardField::Number, "Invalid card number");
    }

    // Expiry: MM/YY, month in range, not strictly before the current month.
    match parse_expiry(&input.expiry) {
        None => errors.push(CardField::Expiry, "Use MM/YY format"),
        Some((month, _)) if !(1..=12).contains(&month) => {
            errors.push(CardField::Expiry, "Invalid month");
        }
        Some((month, year)) => {
            let current_year = u32::try_from(today.year().rem_euclid(100)).unwrap_or(0);
            let current_month = today.month();
            if year < current_year || (year == current_year && month < current_month) {
                errors.push(CardField::Expiry, "Card has expired");
            }
        }
    }

    // CVV: 3 or 4 digits.
    let cvv = input.cvv.trim();
    if !(cvv.len() == 3 || cvv.len() == 4) || !cvv.chars().all(|c| c.is_ascii_digit()) {
        errors.push(CardField::Cvv, "CVV must be 3 or 4 digits");
    }

    // Cardholder name: non-blank, at least two characters after trimming.
    let name = input.holder_name.trim();
    if name.is_empty() {
        errors.push(CardField::HolderName, "Name on card is required");
    } else if name.chars().count() < 2 {
        errors.push(CardField::HolderName, "Please enter a valid name");
    }

    errors
}

/// Split a strict `MM/YY` string into `(month, year)`.
fn parse_expiry(expiry: &str) -> Option<(u32, u32)> {
    let (month, year) = expiry.split_once('/')?;
    if month.len() != 2 || year.len() != 2 {
        return None;
    }
    if !month.chars().all(|c| c.is_ascii_digit()) || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((month.parse().ok()?, year.parse().ok()?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
    }

    fn valid_input() -> CardInput {
        CardInput {
            number: "4539 5787 6362 1486".to_string(),
            expiry: "12/28".to_string(),
            cvv: "123".to_string(),
            holder_name: "Asha Rao".to_string(),
        }
    }

    #[test]
    fn test_luhn_vectors() {
        assert!(luhn_valid("4539578763621486"));
        assert!(!luhn_valid("4539578763621487"));
        assert!(!luhn_valid("4539-5787"));
    }

    #[test]
    fn test_valid_card_passes() {
        let errors = validate_card(&valid_input(), today());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_number_must_be_sixteen_digits() {
        let mut input = valid_input();
        input.number = "4539".to_string();
        let errors = validate_card(&input, today());
        assert_eq!(
            errors.message(CardField::Number),
            Some("Please enter a valid 16-digit card number")
        );
    }

    #[test]
    fn test_number_failing_luhn_is_invalid() {
        let mut input = valid_input();
        input.number = "4539578763621487".to_string();
        let errors = validate_card(&input, today());
        assert_eq!(errors.message(CardField::Number), Some("Invalid card number"));
    }

    #[test]
    fn test_expiry_format() {
        let mut input = valid_input();
        input.expiry = "1/30".to_string();
        let errors = validate_card(&input, today());
        assert_eq!(errors.message(CardField::Expiry), Some("Use MM/YY format"));
    }

    #[test]
    fn test_expiry_month_out_of_range() {
        let mut input = valid_input();
        input.expiry = "13/30".to_string();
        let errors = validate_card(&input, today());
        assert_eq!(errors.message(CardField::Expiry), Some("Invalid month"));
    }

    #[test]
    fn test_expiry_in_the_past_is_rejected() {
        let mut input = valid_input();
        input.expiry = "01/20".to_string();
        let errors = validate_card(&input, today());
        assert_eq!(errors.message(CardField::Expiry), Some("Card has expired"));

        // Same year, earlier month.
        input.expiry = "07/26".to_string();
        let errors = validate_card(&input, today());
        assert_eq!(errors.message(CardField::Expiry), Some("Card has expired"));

        // The current month is still valid.
        input.expiry = "08/26".to_string();
        let errors = validate_card(&input, today());
        assert!(errors.message(CardField::Expiry).is_none());
    }

    #[test]
    fn test_cvv_length() {
        let mut input = valid_input();
        for bad in ["12", "12345", "12a"] {
            input.cvv = bad.to_string();
            let errors = validate_card(&input, today());
            assert_eq!(
                errors.message(CardField::Cvv),
                Some("CVV must be 3 or 4 digits"),
                "cvv {bad:?} should be rejected"
            );
        }
        input.cvv = "1234".to_string();
        assert!(validate_card(&input, today()).is_empty());
    }

    #[test]
    fn test_holder_name_rules() {
        let mut input = valid_input();
        input.holder_name = "   ".to_string();
        let errors = validate_card(&input, today());
        assert_eq!(
            errors.message(CardField::HolderName),
            Some("Name on card is required")
        );

        input.holder_name = "A".to_string();
        let errors = validate_card(&input, today());
        assert_eq!(
            errors.message(CardField::HolderName),
            Some("Please enter a valid name")
        );
    }

    #[test]
    fn test_first_error_is_in_field_order() {
        let input = CardInput::default();
        let errors = validate_card(&input, today());
        let (field, _) = errors.first().unwrap();
        assert_eq!(field, CardField::Number);
        assert_eq!(errors.len(), 4);
    }
}
