use std::fmt;

/// Money is represented as integer cents to avoid floating-point drift.
/// 1 unit = 100 cents, so 50.00 = 5000 cents. Rounding to two decimals
/// happens only at presentation time.
pub type Cents = i64;

/// Format cents as a decimal string with two places.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Parse a decimal amount string into cents.
/// Example: "50" -> 5000, "12.34" -> 1234, "12.5" -> 1250
///
/// Expense amounts are entered by hand, so this is strict: no sign, at
/// most two decimal places (never silently drop sub-cent digits).
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    if input.starts_with('-') || input.starts_with('+') {
        return Err(ParseCentsError::Signed);
    }

    let (units_str, decimal_str) = match input.split_once('.') {
        None => (input, ""),
        Some((u, d)) => {
            if d.contains('.') {
                return Err(ParseCentsError::InvalidFormat);
            }
            (u, d)
        }
    };

    let units: i64 = if units_str.is_empty() && !decimal_str.is_empty() {
        0
    } else {
        units_str
            .parse()
            .map_err(|_| ParseCentsError::InvalidFormat)?
    };

    let decimal_cents: i64 = match decimal_str.len() {
        0 => 0,
        // A single digit like "5" means 50 cents
        1 => {
            decimal_str
                .parse::<i64>()
                .map_err(|_| ParseCentsError::InvalidFormat)?
                * 10
        }
        2 => decimal_str
            .parse()
            .map_err(|_| ParseCentsError::InvalidFormat)?,
        _ => return Err(ParseCentsError::TooManyDecimals),
    };

    // Keep absurdly large inputs an error instead of an i64 wraparound
    units
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(decimal_cents))
        .ok_or(ParseCentsError::InvalidFormat)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
    TooManyDecimals,
    Signed,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::TooManyDecimals => {
                write!(f, "amounts support at most two decimal places")
            }
            ParseCentsError::Signed => write!(f, "amounts must be given without a sign"),
        }
    }
}

impl std::error::Error for ParseCentsError {}
