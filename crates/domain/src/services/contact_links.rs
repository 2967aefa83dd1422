use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters a browser's `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn contact_digits(contact: &str) -> String {
    contact.chars().filter(char::is_ascii_digit).collect()
}

pub fn call_link(contact: &str) -> String {
    format!("tel:{}", contact)
}

pub fn message_link(contact: &str) -> String {
    format!("https://wa.me/{}", contact_digits(contact))
}

/// Messaging link with a pre-filled greeting addressed to the donor.
pub fn greeting_link(name: &str, contact: &str) -> String {
    let greeting = format!(
        "Hi {}, I found your details on the Blood Connect app. Are you available for donation?",
        name
    );
    format!(
        "{}?text={}",
        message_link(contact),
        utf8_percent_encode(&greeting, URI_COMPONENT)
    )
}
