use crate::entities::BloodType;
use regex::Regex;

/// Tokens pulled out of a free-text chat or voice request. Either field is
/// empty when nothing could be extracted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub blood_type: String,
    pub location: String,
}

impl ParsedQuery {
    pub fn is_complete(&self) -> bool {
        !self.blood_type.is_empty() && !self.location.is_empty()
    }
}

/// Extracts a blood group and a place from sentences like
/// "Need A+ blood in Hyderabad urgently".
#[derive(Debug, Clone)]
pub struct QueryParser {
    location_pattern: Regex,
}

impl QueryParser {
    pub fn new() -> Self {
        Self {
            // The captured phrase runs to the first non-letter, trailing words included.
            location_pattern: Regex::new(r"(?i)\bin\s+([a-z\s]+)")
                .expect("location pattern is a valid regex"),
        }
    }

    pub fn parse(&self, text: &str) -> ParsedQuery {
        ParsedQuery {
            blood_type: self.extract_blood_type(text),
            location: self.extract_location(text),
        }
    }

    /// First token in table order wins. A token glued to a preceding letter
    /// is skipped so "AB+" never reads as "B+".
    pub fn extract_blood_type(&self, text: &str) -> String {
        let upper = text.to_uppercase();
        for blood_type in BloodType::ALL {
            let token = blood_type.as_str();
            let standalone = upper.match_indices(token).any(|(idx, _)| {
                !upper[..idx]
                    .chars()
                    .next_back()
                    .is_some_and(char::is_alphabetic)
            });
            if standalone {
                return token.to_string();
            }
        }
        String::new()
    }

    pub fn extract_location(&self, text: &str) -> String {
        self.location_pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default()
    }
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new()
    }
}
