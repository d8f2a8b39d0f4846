use maildir_rank_addr::*;
use std::path::Path;

// --- MessageId ---

#[test]
fn test_message_id_new() {
    let id = MessageId::new("1700000000.M1P2.host");
    assert_eq!(id.as_str(), "1700000000.M1P2.host");
}

#[test]
fn test_message_id_from_path_strips_flags() {
    let path = Path::new("/mail/INBOX/cur/1700000000.M1P2.host,U=12:2,S");
    let id = MessageId::from_path(path).unwrap();
    assert_eq!(id.as_str(), "1700000000.M1P2.host");
}

#[test]
fn test_message_id_from_path_without_flags() {
    let id = MessageId::from_path(Path::new("/mail/INBOX/new/1700000000.M1P2.host")).unwrap();
    assert_eq!(id.as_str(), "1700000000.M1P2.host");
}

#[test]
fn test_message_id_from_path_empty_id() {
    let id = MessageId::from_path(Path::new("/mail/INBOX/cur/,S")).unwrap();
    assert_eq!(id.as_str(), "");
}

#[test]
fn test_message_id_display() {
    let id = MessageId::new("abc.host");
    assert_eq!(id.to_string(), "abc.host");
}

#[test]
fn test_message_id_serializes_as_string() {
    let id = MessageId::new("abc.host");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc.host\"");
}

// --- ParsedAddress ---

#[test]
fn test_parsed_address_local_part() {
    let addr = ParsedAddress::new("John", "john.doe@example.com");
    assert_eq!(addr.local_part(), "john.doe");
}

#[test]
fn test_parsed_address_display_with_name() {
    let addr = ParsedAddress::new("John Doe", "john@example.com");
    assert_eq!(addr.to_string(), "John Doe <john@example.com>");
}

#[test]
fn test_parsed_address_display_without_name() {
    let addr = ParsedAddress::new("", "john@example.com");
    assert_eq!(addr.to_string(), "john@example.com");
}

#[test]
fn test_local_part_without_at() {
    assert_eq!(local_part("postmaster"), "postmaster");
}

// --- AddressEntry ---

#[test]
fn test_address_entry_push() {
    let mut entry = AddressEntry::default();
    entry.push("John", 100);
    entry.push("Johnny", 50);

    assert_eq!(entry.names, vec!["John", "Johnny"]);
    assert_eq!(entry.dates, vec![100, 50]);
    assert_eq!(entry.frequency(), 2);
    assert_eq!(entry.recency(), 100);
}

#[test]
fn test_address_entry_undated() {
    let mut entry = AddressEntry::default();
    entry.push("", 0);
    entry.push("", 0);

    assert_eq!(entry.frequency(), 2);
    assert_eq!(entry.recency(), 0);
}

#[test]
fn test_address_entry_empty_recency() {
    assert_eq!(AddressEntry::default().recency(), 0);
}

// --- Ranks ---

#[test]
fn test_ranks_blended_default_weight() {
    let ranks = Ranks {
        frequency_rank: 2,
        recency_rank: 4,
    };
    assert!((ranks.blended(0.5) - 3.0).abs() < f64::EPSILON);
}

#[test]
fn test_ranks_blended_frequency_only() {
    let ranks = Ranks {
        frequency_rank: 2,
        recency_rank: 4,
    };
    assert!((ranks.blended(1.0) - 2.0).abs() < f64::EPSILON);
    assert!((ranks.blended(0.0) - 4.0).abs() < f64::EPSILON);
}
