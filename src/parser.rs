//! Header block and address parsing

use crate::error::{Error, Result};
use crate::types::{MessageFields, ParsedAddress};
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use chrono::DateTime;
use encoding_rs::Encoding;
use mailparse::MailHeaderMap;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::debug;

/// Headers that contribute addresses, in extraction order
pub const ADDRESS_HEADERS: [&str; 4] = ["to", "from", "cc", "bcc"];

// RFC 5322 address pattern by Moritz Poldrack
const ADDR_PATTERN: &str = concat!(
    r#"(?:[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*"#,
    r#"|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21\x23-\x5b\x5d-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")"#,
    r#"@"#,
    r#"(?:(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?"#,
    r#"|\[(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}"#,
    r#"(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?"#,
    r#"|[a-z0-9-]*[a-z0-9]:"#,
    r#"(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21-\x5a\x53-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])+)\])"#,
);

static ADDRESS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&["(?i)(.*?)<?(", ADDR_PATTERN, ")>?"].concat()).unwrap()
});

static ENCODED_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=\?([^?\s]+)\?([bBqQ])\?([^?\s]*)\?=").unwrap());

// Some mailers drop the trailing padding of B-encoded words
const MIME_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Parse a raw header block into its addresses and timestamp
///
/// Only To, From, Cc, Bcc and Date are looked at. The first occurrence of
/// each header wins; missing headers contribute nothing and a missing or
/// malformed date yields timestamp 0.
pub fn parse_message(raw: &[u8]) -> Result<MessageFields> {
    let (headers, _) =
        mailparse::parse_headers(raw).map_err(|e| Error::Parse(e.to_string()))?;

    let addresses = ADDRESS_HEADERS
        .iter()
        .filter_map(|name| headers.get_first_header(name))
        .flat_map(|h| parse_header(h.get_value_raw()))
        .collect();

    let timestamp = headers
        .get_first_header("date")
        .map_or(0, |h| parse_date(&h.get_value()));

    Ok(MessageFields {
        addresses,
        timestamp,
    })
}

/// Parse a date header into seconds since the epoch, 0 on failure
#[must_use]
pub fn parse_date(value: &str) -> i64 {
    let value = value.trim();
    DateTime::parse_from_rfc2822(value)
        .map(|dt| dt.timestamp())
        .ok()
        .or_else(|| mailparse::dateparse(value).ok())
        .unwrap_or(0)
}

/// Parse one raw header value into every address it names
///
/// A value that is not UTF-8, or that holds an encoded word which cannot be
/// decoded, yields nothing at all.
#[must_use]
pub fn parse_header(raw: &[u8]) -> Vec<ParsedAddress> {
    let Ok(value) = std::str::from_utf8(raw) else {
        debug!("Skipping header with non UTF-8 bytes");
        return Vec::new();
    };
    let value: String = value.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
    if value.trim().is_empty() {
        return Vec::new();
    }

    let mut addresses = Vec::new();
    for segment in split_addresses(&value) {
        let Some(decoded) = decode_words(segment) else {
            debug!("Discarding header with undecodable word: {value}");
            return Vec::new();
        };
        if let Some(address) = parse_address(&decoded) {
            addresses.push(address);
        }
    }
    addresses
}

/// Split an address list on commas that sit outside quotes
///
/// A comma splits when an even number of quote characters (`"` and `'`
/// counted together) follows it. This is a heuristic, not the RFC 5322
/// grammar: unbalanced or nested quoting can split in the wrong place.
#[must_use]
pub fn split_addresses(value: &str) -> Vec<&str> {
    let mut quotes_after = value.bytes().filter(|b| matches!(b, b'"' | b'\'')).count();
    let mut segments = Vec::new();
    let mut start = 0;

    for (idx, byte) in value.bytes().enumerate() {
        match byte {
            b'"' | b'\'' => quotes_after -= 1,
            b',' if quotes_after % 2 == 0 => {
                segments.push(&value[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    segments.push(&value[start..]);
    segments
}

/// Match a single decoded address such as `Name <addr@example.com>`
#[must_use]
pub fn parse_address(segment: &str) -> Option<ParsedAddress> {
    let caps = ADDRESS_REGEX.captures(segment)?;
    let name = caps.get(1).map_or("", |m| m.as_str()).replace('"', "");
    let address = caps.get(2)?.as_str().trim().to_lowercase();

    Some(ParsedAddress::new(name.trim(), address))
}

/// Decode RFC 2047 encoded words, joining the pieces with single spaces
///
/// Returns `None` if any encoded word is malformed, names an unknown
/// charset, or holds bytes that are invalid in its charset.
#[must_use]
pub fn decode_words(value: &str) -> Option<String> {
    let value = value.trim();
    let mut parts: Vec<String> = Vec::new();
    let mut last_end = 0;
    let mut previous_was_word = false;

    for caps in ENCODED_WORD_REGEX.captures_iter(value) {
        let word = caps.get(0)?;
        let gap = &value[last_end..word.start()];
        let decoded = decode_word(&caps[1], &caps[2], &caps[3])?;

        // Whitespace between adjacent encoded words is not part of the text
        if previous_was_word
            && gap.trim().is_empty()
            && let Some(last) = parts.last_mut()
        {
            last.push_str(&decoded);
        } else {
            parts.push(gap.to_string());
            parts.push(decoded);
        }
        previous_was_word = true;
        last_end = word.end();
    }
    parts.push(value[last_end..].to_string());

    Some(
        parts
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    )
}

fn decode_word(charset: &str, encoding: &str, text: &str) -> Option<String> {
    let bytes = if encoding.eq_ignore_ascii_case("b") {
        MIME_BASE64.decode(text).ok()?
    } else {
        decode_quoted_printable(text)?
    };

    // RFC 2231 allows a language suffix: utf-8*en
    let label = charset.split('*').next().unwrap_or(charset);
    let encoding = Encoding::for_label(label.trim().as_bytes())?;
    encoding
        .decode_without_bom_handling_and_without_replacement(&bytes)
        .map(Cow::into_owned)
}

fn decode_quoted_printable(text: &str) -> Option<Vec<u8>> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut idx = 0;

    while idx < bytes.len() {
        match bytes[idx] {
            b'_' => {
                out.push(b' ');
                idx += 1;
            }
            b'=' => {
                let hex = bytes.get(idx + 1..idx + 3)?;
                out.push((hex_value(hex[0])? << 4) | hex_value(hex[1])?);
                idx += 3;
            }
            other => {
                out.push(other);
                idx += 1;
            }
        }
    }
    Some(out)
}

const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
