mod common;

use chrono::TimeDelta;
use common::{at, setup_test_dir, write_file};
use rlounge::core::{CloseOutcome, EventLog};
use rlounge::models::Occupant;
use rlounge::utils::format_usage;
use std::sync::Arc;
use std::thread;

#[test]
fn usage_text_drops_leading_zero_units() {
    assert_eq!(format_usage(TimeDelta::zero()), "0s");
    assert_eq!(format_usage(TimeDelta::seconds(9)), "9s");
    assert_eq!(format_usage(TimeDelta::seconds(309)), "5m09s");
    assert_eq!(format_usage(TimeDelta::seconds(3909)), "1h05m09s");
    assert_eq!(format_usage(TimeDelta::hours(10)), "10h00m00s");
    assert_eq!(format_usage(TimeDelta::seconds(-30)), "0s");
}

#[test]
fn usage_text_rounds_to_whole_seconds() {
    assert_eq!(format_usage(TimeDelta::milliseconds(1499)), "1s");
    assert_eq!(format_usage(TimeDelta::milliseconds(1500)), "2s");
    assert_eq!(format_usage(TimeDelta::milliseconds(59_600)), "1m00s");
}

#[test]
fn bucket_file_is_named_after_the_day() {
    let root = setup_test_dir("log_name");
    let log = EventLog::new(root.join("log"));
    let day = at(2025, 1, 7, 10, 0, 0).date_naive();

    assert_eq!(
        log.bucket_path(day),
        root.join("log").join("lounge-2025-01-07.json")
    );
    assert!(log.read_bucket(day).is_empty());
}

#[test]
fn checkout_closes_most_recent_open_match_first() {
    let root = setup_test_dir("log_reverse");
    let log = EventLog::new(root.join("log"));
    let t1 = at(2025, 6, 10, 9, 0, 0);
    let t2 = at(2025, 6, 10, 10, 0, 0);
    let day = t1.date_naive();

    log.append_checkin_on(day, &Occupant::new("1001", "Alice", 5, t1), 5)
        .unwrap();
    log.append_checkin_on(day, &Occupant::new("1001", "Alice", 5, t2), 5)
        .unwrap();

    let now = at(2025, 6, 10, 11, 0, 0);
    assert_eq!(
        log.close_checkin_at(now, "1001", 5, None).unwrap(),
        CloseOutcome::Closed
    );
    let records = log.read_bucket(day);
    assert!(records[0].is_open());
    assert_eq!(records[1].usage_duration.as_deref(), Some("1h00m00s"));

    log.close_checkin_at(now, "1001", 5, None).unwrap();
    assert_eq!(
        log.read_bucket(day)[0].usage_duration.as_deref(),
        Some("2h00m00s")
    );
    assert_eq!(
        log.close_checkin_at(now, "1001", 5, None).unwrap(),
        CloseOutcome::NoMatch
    );
}

#[test]
fn original_checkin_time_selects_the_exact_record() {
    let root = setup_test_dir("log_exact");
    let log = EventLog::new(root.join("log"));
    let t1 = at(2025, 6, 10, 9, 0, 0);
    let t2 = at(2025, 6, 10, 10, 0, 0);
    let day = t1.date_naive();

    log.append_checkin_on(day, &Occupant::new("1001", "Alice", 5, t1), 5)
        .unwrap();
    log.append_checkin_on(day, &Occupant::new("1001", "Alice", 5, t2), 5)
        .unwrap();

    let now = at(2025, 6, 10, 12, 0, 0);
    log.close_checkin_at(now, "1001", 5, Some(t1)).unwrap();

    let records = log.read_bucket(day);
    assert!(!records[0].is_open());
    assert!(records[1].is_open());

    // wrong station never matches
    assert_eq!(
        log.close_checkin_at(now, "1001", 6, Some(t2)).unwrap(),
        CloseOutcome::NoMatch
    );
}

#[test]
fn corrupt_bucket_reads_empty_and_is_overwritten() {
    let root = setup_test_dir("log_corrupt");
    let log = EventLog::new(root.join("log"));
    let t = at(2025, 6, 10, 9, 0, 0);
    let day = t.date_naive();

    write_file(&log.bucket_path(day), "[{ broken");
    assert!(log.read_bucket(day).is_empty());

    log.append_checkin_on(day, &Occupant::new("7", "Gil", 1, t), 1)
        .unwrap();
    let records = log.read_bucket(day);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].occupant_name, "Gil");
}

#[test]
fn queued_record_is_promoted_once() {
    let root = setup_test_dir("log_reassign");
    let log = EventLog::new(root.join("log"));
    let t = at(2025, 6, 10, 9, 0, 0);
    let day = t.date_naive();

    log.append_checkin_on(day, &Occupant::new("2001", "Carl", 0, t), 0)
        .unwrap();

    assert!(!log
        .reassign_station_on(day, "2001", t + TimeDelta::seconds(1), 7)
        .unwrap());
    assert!(log.reassign_station_on(day, "2001", t, 7).unwrap());
    assert!(!log.reassign_station_on(day, "2001", t, 8).unwrap());

    let records = log.read_bucket(day);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].station_id, 7);
    assert_eq!(records[0].checkin_time, t);
}

#[test]
fn every_write_marks_the_view_stale() {
    let root = setup_test_dir("log_stale");
    let log = EventLog::new(root.join("log"));
    let t = at(2025, 6, 10, 9, 0, 0);

    assert!(!log.take_stale());
    log.append_checkin_on(t.date_naive(), &Occupant::new("1", "A", 1, t), 1)
        .unwrap();
    assert!(log.take_stale());
    assert!(!log.take_stale());

    log.close_checkin_at(t, "1", 1, None).unwrap();
    assert!(log.take_stale());
}

#[test]
fn unmatched_checkout_leaves_the_log_untouched() {
    let root = setup_test_dir("log_nomatch");
    let log = EventLog::new(root.join("log"));
    let evening = at(2025, 6, 10, 23, 50, 0);
    let morning = at(2025, 6, 11, 0, 10, 0);

    log.append_checkin_on(evening.date_naive(), &Occupant::new("1", "A", 1, evening), 1)
        .unwrap();
    assert!(log.take_stale());

    let outcome = log.close_checkin_at(morning, "1", 1, Some(evening)).unwrap();
    assert_eq!(outcome, CloseOutcome::NoMatch);
    assert!(!log.bucket_path(morning.date_naive()).exists());
    assert!(!log.take_stale());

    assert!(!log.reassign_station_on(morning.date_naive(), "1", evening, 7).unwrap());
    assert!(!log.bucket_path(morning.date_naive()).exists());
    assert!(!log.take_stale());
}

#[test]
fn concurrent_writers_do_not_lose_records() {
    let root = setup_test_dir("log_threads");
    let log = Arc::new(EventLog::new(root.join("log")));
    let t = at(2025, 6, 10, 9, 0, 0);
    let day = t.date_naive();

    let handles: Vec<_> = (0..8)
        .map(|w| {
            let log = Arc::clone(&log);
            thread::spawn(move || {
                for i in 0..10 {
                    let id = format!("{w}-{i}");
                    log.append_checkin_on(day, &Occupant::new(&id, "T", 1, t), 1)
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(log.read_bucket(day).len(), 80);
}

#[test]
fn wall_clock_variants_use_todays_bucket() {
    let root = setup_test_dir("log_today");
    let log = EventLog::new(root.join("log"));
    let now = chrono::Local::now();

    log.append_checkin(&Occupant::new("9", "Ivy", 0, now), 0)
        .unwrap();
    assert!(log.reassign_station("9", now, 3).unwrap());
    assert_eq!(
        log.close_checkin("9", 3, Some(now)).unwrap(),
        CloseOutcome::Closed
    );

    let records = log.read_bucket(now.date_naive());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].station_id, 3);
    assert!(!records[0].is_open());
}
