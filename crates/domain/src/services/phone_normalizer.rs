//! Canonicalises user-entered phone numbers into `+<country code><number>`.
//!
//! Numbers with a `+` or `00` prefix are taken as international. Anything
//! else is a national number and gets a calling code applied first: the
//! submitter's country hint, a country named in the location, or the
//! configured default, in that order.

use crate::errors::DomainError;

/// E.164 caps the full number (country code included) at 15 digits.
const MAX_DIGITS: usize = 15;
const MIN_DIGITS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallingCode {
    pub country: &'static str,
    /// Lowercase names that identify the country in free text.
    pub aliases: &'static [&'static str],
    pub code: &'static str,
    pub min_national: usize,
    pub max_national: usize,
}

impl CallingCode {
    fn accepts_national(&self, national: &str) -> bool {
        (self.min_national..=self.max_national).contains(&national.len())
    }
}

pub const CALLING_CODES: &[CallingCode] = &[
    CallingCode { country: "India", aliases: &["india"], code: "91", min_national: 10, max_national: 10 },
    CallingCode { country: "USA", aliases: &["usa", "united states"], code: "1", min_national: 10, max_national: 10 },
    CallingCode { country: "Canada", aliases: &["canada"], code: "1", min_national: 10, max_national: 10 },
    CallingCode { country: "UK", aliases: &["uk", "united kingdom", "england"], code: "44", min_national: 9, max_national: 10 },
    CallingCode { country: "Australia", aliases: &["australia"], code: "61", min_national: 9, max_national: 9 },
    CallingCode { country: "Germany", aliases: &["germany"], code: "49", min_national: 7, max_national: 11 },
    CallingCode { country: "France", aliases: &["france"], code: "33", min_national: 9, max_national: 9 },
    CallingCode { country: "UAE", aliases: &["uae", "united arab emirates"], code: "971", min_national: 8, max_national: 9 },
    CallingCode { country: "Pakistan", aliases: &["pakistan"], code: "92", min_national: 10, max_national: 10 },
    CallingCode { country: "Bangladesh", aliases: &["bangladesh"], code: "880", min_national: 10, max_national: 10 },
    CallingCode { country: "Nepal", aliases: &["nepal"], code: "977", min_national: 8, max_national: 10 },
    CallingCode { country: "Sri Lanka", aliases: &["sri lanka", "srilanka"], code: "94", min_national: 9, max_national: 9 },
];

/// Looks a country up by name, ignoring case and spacing.
pub fn calling_code_for_country(country: &str) -> Option<&'static CallingCode> {
    let wanted = squash(country);
    if wanted.is_empty() {
        return None;
    }
    CALLING_CODES.iter().find(|entry| {
        squash(entry.country) == wanted || entry.aliases.iter().any(|alias| squash(alias) == wanted)
    })
}

/// Finds a country named as a whole word (or phrase) inside a place name.
pub fn infer_calling_code(location: &str) -> Option<&'static CallingCode> {
    let words: String = location
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let padded = format!(" {} ", words.split_whitespace().collect::<Vec<_>>().join(" "));

    CALLING_CODES.iter().find(|entry| {
        entry
            .aliases
            .iter()
            .any(|alias| padded.contains(&format!(" {} ", alias)))
    })
}

fn calling_code_by_code(code: &str) -> Option<&'static CallingCode> {
    CALLING_CODES.iter().find(|entry| entry.code == code)
}

fn squash(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn invalid(raw: &str) -> DomainError {
    DomainError::InvalidPhoneNumber(raw.trim().to_string())
}

/// Normalises `raw`, applying `default_code` (digits, no `+`) to national numbers.
pub fn normalize_phone(raw: &str, default_code: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    let (international, rest) = if let Some(rest) = trimmed.strip_prefix('+') {
        (true, rest)
    } else if let Some(rest) = trimmed.strip_prefix("00") {
        (true, rest)
    } else {
        (false, trimmed)
    };

    let mut digits = String::with_capacity(rest.len());
    for c in rest.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' | '.' | '(' | ')' | '/' => {}
            _ => return Err(invalid(raw)),
        }
    }
    if digits.is_empty() {
        return Err(invalid(raw));
    }

    let full = if international {
        digits
    } else {
        apply_calling_code(&digits, default_code).ok_or_else(|| invalid(raw))?
    };

    if is_plausible_international(&full) {
        Ok(format!("+{}", full))
    } else {
        Err(invalid(raw))
    }
}

fn apply_calling_code(digits: &str, code: &str) -> Option<String> {
    let national = digits.strip_prefix('0').unwrap_or(digits);

    match calling_code_by_code(code) {
        Some(entry) if entry.accepts_national(national) => Some(format!("{}{}", code, national)),
        // Already carries the calling code, just without the `+`.
        Some(entry) => digits
            .strip_prefix(code)
            .filter(|rest| entry.accepts_national(rest))
            .map(|_| digits.to_string()),
        None => (4..=MAX_DIGITS.saturating_sub(code.len()))
            .contains(&national.len())
            .then(|| format!("{}{}", code, national)),
    }
}

fn is_plausible_international(full: &str) -> bool {
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&full.len()) || full.starts_with('0') {
        return false;
    }

    // Longest known calling code wins; unknown codes only get the length check.
    let known = (1..=3).rev().find_map(|len| {
        full.get(..len)
            .and_then(calling_code_by_code)
            .map(|entry| (entry, &full[len..]))
    });
    match known {
        Some((entry, national)) => entry.accepts_national(national),
        None => true,
    }
}
