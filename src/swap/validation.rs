use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid amount")]
    NotANumber,

    #[error("Amount must be greater than zero")]
    NotPositive,

    #[error("Insufficient balance")]
    InsufficientBalance,
}

/// Parse a user-typed decimal amount; None for empty or non-numeric input
pub fn parse_amount(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Accepts iff `0 < amount <= balance`. An unreadable balance counts as empty.
pub fn validate_amount(amount: &str, balance: &str) -> Result<f64, ValidationError> {
    let amount = parse_amount(amount).ok_or(ValidationError::NotANumber)?;
    if amount <= 0.0 {
        return Err(ValidationError::NotPositive);
    }

    let balance = parse_amount(balance).unwrap_or(0.0);
    if amount > balance {
        return Err(ValidationError::InsufficientBalance);
    }

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_balances() {
        assert_eq!(validate_amount("2", "1.5"), Err(ValidationError::InsufficientBalance));
        assert_eq!(validate_amount("1", "1.5"), Ok(1.0));
    }

    #[test]
    fn test_accepts_up_to_balance() {
        assert_eq!(validate_amount("1.5", "1.5"), Ok(1.5));
        assert_eq!(validate_amount(" 0.000001 ", "1.5"), Ok(0.000001));
    }

    #[test]
    fn test_rejects_non_positive() {
        assert_eq!(validate_amount("0", "1.5"), Err(ValidationError::NotPositive));
        assert_eq!(validate_amount("-0.5", "1.5"), Err(ValidationError::NotPositive));
    }

    #[test]
    fn test_rejects_garbage() {
        for bad in ["", "   ", "abc", "1.2.3", "NaN", "inf"] {
            assert_eq!(validate_amount(bad, "1.5"), Err(ValidationError::NotANumber), "input {bad:?}");
        }
    }

    #[test]
    fn test_unreadable_balance_rejects() {
        assert_eq!(validate_amount("0.1", ""), Err(ValidationError::InsufficientBalance));
        assert_eq!(validate_amount("0.1", "oops"), Err(ValidationError::InsufficientBalance));
    }

    #[test]
    fn test_property_over_grid() {
        let balances = [0.0, 0.5, 1.5, 100.0];
        let amounts = [-1.0, 0.0, 0.25, 0.5, 1.0, 1.5, 2.0, 150.0];
        for balance in balances {
            for amount in amounts {
                let accepted = validate_amount(&amount.to_string(), &balance.to_string()).is_ok();
                assert_eq!(accepted, amount > 0.0 && amount <= balance, "{amount} vs {balance}");
            }
        }
    }
}
