mod common;

use common::{MailStore, message};
use maildir_rank_addr::*;
use std::fs;

const JAN_1: &str = "Wed, 01 Jan 2025 12:00:00 +0000";
const JAN_2: &str = "Thu, 02 Jan 2025 12:00:00 +0000";
const JAN_3: &str = "Fri, 03 Jan 2025 12:00:00 +0000";

fn fields(timestamp: i64, addresses: &[&str]) -> MessageFields {
    MessageFields {
        addresses: addresses.iter().map(|a| ParsedAddress::new("", *a)).collect(),
        timestamp,
    }
}

#[test]
fn test_growth_is_cumulative_and_chronological() {
    let messages = vec![
        fields(300, &["c@example.com", "a@example.com"]),
        fields(100, &["a@example.com", "b@example.com"]),
        fields(200, &["a@example.com"]),
    ];

    let series = GrowthSeries::from_messages(messages);

    assert_eq!(
        series.points,
        vec![
            GrowthPoint { timestamp: 100, address_count: 2, message_count: 1 },
            GrowthPoint { timestamp: 200, address_count: 2, message_count: 2 },
            GrowthPoint { timestamp: 300, address_count: 3, message_count: 3 },
        ]
    );
}

#[test]
fn test_undated_messages_are_left_out() {
    let messages = vec![
        fields(0, &["ghost@example.com"]),
        fields(100, &["a@example.com"]),
        fields(0, &["ghost@example.com", "a@example.com"]),
    ];

    let series = GrowthSeries::from_messages(messages);

    assert_eq!(series.len(), 1);
    assert_eq!(series.points[0].address_count, 1);
    assert_eq!(series.points[0].message_count, 1);
}

#[test]
fn test_empty_series() {
    let series = GrowthSeries::from_messages(Vec::new());
    assert!(series.is_empty());
}

#[test]
fn test_render_writes_both_charts() {
    let store = MailStore::new();
    let series = GrowthSeries::from_messages(vec![
        fields(1_735_732_800, &["a@example.com"]),
        fields(1_735_819_200, &["b@example.com"]),
    ]);
    let out = store.path().join("charts");

    let [date_path, count_path] = series.render(&out).unwrap();

    assert_eq!(date_path, out.join(DATE_CHART_FILE));
    assert_eq!(count_path, out.join(COUNT_CHART_FILE));

    let date_svg = fs::read_to_string(&date_path).unwrap();
    assert!(date_svg.contains("<svg"));
    assert_eq!(date_svg.matches("<polyline").count(), 2);
    assert!(date_svg.contains("# addresses"));
    assert!(date_svg.contains("# emails"));
    assert!(date_svg.contains("2025-01-01"));

    let count_svg = fs::read_to_string(&count_path).unwrap();
    assert_eq!(count_svg.matches("<polyline").count(), 1);
}

#[test]
fn test_render_empty_series_still_draws_axes() {
    let store = MailStore::new();
    let [date_path, _] = GrowthSeries::default().render(store.path()).unwrap();

    let svg = fs::read_to_string(date_path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("<line"));
}

#[test]
fn test_collect_messages_reads_every_file() {
    let store = MailStore::new();
    store.add("INBOX", "cur", "1.host", &message("a@example.com", "b@example.com", Some(JAN_1)));
    store.add("INBOX", "new", "2.host", &message("c@example.com", "b@example.com", None));

    let messages = collect_messages(&store.config()).unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].timestamp, 1_735_732_800);
    assert_eq!(messages[1].timestamp, 0);
}

#[test]
fn test_generate_report() {
    let store = MailStore::new();
    store.add("INBOX", "cur", "1.host", &message("a@example.com", "me@example.com", Some(JAN_3)));
    store.add("INBOX", "cur", "2.host", &message("b@example.com", "me@example.com", Some(JAN_1)));
    store.add("Sent", "cur", "3.host", &message("me@example.com", "a@example.com", Some(JAN_2)));
    store.add("Sent", "cur", "4.host", &message("me@example.com", "x@example.com", None));
    let config = store.config();

    let series = generate_report(&config).unwrap();

    let counts: Vec<(usize, usize)> = series
        .points
        .iter()
        .map(|p| (p.message_count, p.address_count))
        .collect();
    assert_eq!(counts, vec![(1, 2), (2, 3), (3, 3)]);
    assert!(config.report_dir.join(DATE_CHART_FILE).exists());
    assert!(config.report_dir.join(COUNT_CHART_FILE).exists());
}

#[test]
fn test_report_ignores_cache() {
    let store = MailStore::new();
    store.add("INBOX", "cur", "1.host", &message("a@example.com", "b@example.com", Some(JAN_1)));
    let config = store.config();
    generate_addressbook(&config).unwrap();

    let series = generate_report(&config).unwrap();
    assert_eq!(series.len(), 1);
}

#[cfg(unix)]
#[test]
fn test_unreadable_message_is_left_out() {
    let store = MailStore::new();
    store.add("INBOX", "cur", "1.host", &message("a@example.com", "b@example.com", Some(JAN_1)));
    let locked = message("x@example.com", "y@example.com", Some(JAN_2));
    let locked = store.add("INBOX", "cur", "2.host", &locked);
    if !common::lock(&locked) {
        return;
    }

    assert_eq!(collect_messages(&store.config()).unwrap().len(), 1);

    let series = generate_report(&store.config()).unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series.points[0].address_count, 2);
}
