mod common;

use chrono::TimeDelta;
use common::{at, setup_test_dir, test_config};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rlounge::core::{CheckInForm, EventLog, OccupancyLedger};
use rlounge::errors::AppError;
use rlounge::models::{StationCategory, StationStatus};
use std::cell::Cell;
use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

fn open_ledger(root: &Path) -> OccupancyLedger {
    let cfg = test_config(root);
    OccupancyLedger::from_config(&cfg, Arc::new(EventLog::new(cfg.log_dir())))
}

#[test]
fn second_checkin_on_busy_primary_station_is_rejected() {
    let root = setup_test_dir("ledger_busy");
    let mut ledger = open_ledger(&root);
    let t = at(2025, 6, 10, 14, 0, 0);

    ledger.check_in_at("Alice", "1001", 5, t).unwrap();
    let err = ledger.check_in_at("Bob", "1002", 5, t).unwrap_err();

    assert!(matches!(
        err,
        AppError::StationBusy { station_id: 5, ref holder } if holder == "1001"
    ));
    assert_eq!(ledger.occupants().len(), 1);
    assert_eq!(ledger.occupants()[0].id, "1001");
}

#[test]
fn checkout_closes_log_record_and_frees_station() {
    let root = setup_test_dir("ledger_checkout");
    let mut ledger = open_ledger(&root);
    let t = at(2025, 6, 10, 14, 0, 0);

    ledger.check_in_at("Alice", "1001", 5, t).unwrap();
    assert_eq!(ledger.station(5).unwrap().status, StationStatus::Occupied);

    let later = t + TimeDelta::seconds(3909);
    ledger.check_out_at("1001", later).unwrap();

    let station = ledger.station(5).unwrap();
    assert!(station.is_free());
    assert_eq!(station.holder, None);
    assert!(ledger.occupants().is_empty());

    let records = ledger.event_log().read_bucket(t.date_naive());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].occupant_id, "1001");
    assert_eq!(records[0].checkout_time, Some(later));
    assert_eq!(records[0].usage_duration.as_deref(), Some("1h05m09s"));
}

#[test]
fn queued_occupant_is_assigned_without_a_second_log_record() {
    let root = setup_test_dir("ledger_assign");
    let mut ledger = open_ledger(&root);
    let t = at(2025, 6, 10, 9, 30, 0);

    let occ = ledger.check_in_at("Carl", "2001", 0, t).unwrap();
    assert!(occ.is_queued());
    assert_eq!(ledger.queued().len(), 1);

    ledger
        .assign_queued_at("2001", 7, t + TimeDelta::minutes(3))
        .unwrap();

    assert_eq!(ledger.occupant("2001").unwrap().station_id, 7);
    assert!(ledger.queued().is_empty());
    assert_eq!(ledger.station(7).unwrap().holder.as_deref(), Some("2001"));

    let records = ledger.event_log().read_bucket(t.date_naive());
    let carl: Vec<_> = records.iter().filter(|r| r.occupant_id == "2001").collect();
    assert_eq!(carl.len(), 1);
    assert_eq!(carl[0].station_id, 7);
    assert!(carl[0].is_open());
}

#[test]
fn checkout_after_midnight_leaves_previous_day_record_open() {
    let root = setup_test_dir("ledger_midnight");
    let mut ledger = open_ledger(&root);
    let before = at(2025, 6, 10, 23, 59, 0);
    let after = at(2025, 6, 11, 0, 1, 0);

    ledger.check_in_at("Dana", "3001", 2, before).unwrap();
    ledger.check_out_at("3001", after).unwrap();

    // the ledger mutation still happens
    assert!(ledger.occupants().is_empty());
    assert!(ledger.station(2).unwrap().is_free());

    let day1 = ledger.event_log().read_bucket(before.date_naive());
    assert_eq!(day1.len(), 1);
    assert!(day1[0].is_open());
    assert!(ledger.event_log().read_bucket(after.date_naive()).is_empty());
}

#[test]
fn duplicate_occupant_id_is_rejected() {
    let root = setup_test_dir("ledger_dup");
    let mut ledger = open_ledger(&root);
    let t = at(2025, 6, 10, 10, 0, 0);

    ledger.check_in_at("Alice", "1001", 1, t).unwrap();
    let err = ledger.check_in_at("Alice", "1001", 2, t).unwrap_err();

    assert!(matches!(
        err,
        AppError::DuplicateOccupant { ref id, station_id: 1, .. } if id == "1001"
    ));
    assert!(ledger.station(2).unwrap().is_free());
    assert_eq!(ledger.event_log().read_bucket(t.date_naive()).len(), 1);
}

#[test]
fn unknown_station_leaves_state_untouched() {
    let root = setup_test_dir("ledger_unknown");
    let mut ledger = open_ledger(&root);
    let t = at(2025, 6, 10, 10, 0, 0);

    let err = ledger.check_in_at("Alice", "1001", 99, t).unwrap_err();
    assert!(matches!(err, AppError::UnknownStation(99)));
    assert!(ledger.occupants().is_empty());
    assert!(ledger.event_log().read_bucket(t.date_naive()).is_empty());
}

#[test]
fn auxiliary_station_hosts_many_occupants() {
    let root = setup_test_dir("ledger_aux");
    let mut ledger = open_ledger(&root);
    let t = at(2025, 6, 10, 16, 0, 0);

    assert_eq!(ledger.station(17).unwrap().category, StationCategory::Auxiliary);
    for (name, id) in [("Ann", "a1"), ("Ben", "b2"), ("Cid", "c3")] {
        ledger.check_in_at(name, id, 17, t).unwrap();
    }
    assert_eq!(ledger.occupants_on(17).len(), 3);
    assert_eq!(ledger.station(17).unwrap().holder, None);

    ledger.check_out_at("a1", t + TimeDelta::minutes(10)).unwrap();
    assert_eq!(ledger.station(17).unwrap().status, StationStatus::Occupied);

    ledger.check_out_at("b2", t + TimeDelta::minutes(11)).unwrap();
    ledger.check_out_at("c3", t + TimeDelta::minutes(12)).unwrap();
    assert!(ledger.station(17).unwrap().is_free());
}

#[test]
fn queued_occupant_cannot_be_assigned_to_an_occupied_console() {
    let root = setup_test_dir("ledger_aux_assign");
    let mut ledger = open_ledger(&root);
    let t = at(2025, 6, 10, 16, 0, 0);

    ledger.check_in_at("Ann", "a1", 17, t).unwrap();
    ledger.check_in_at("Ben", "b2", 0, t).unwrap();

    let err = ledger.assign_queued_at("b2", 17, t).unwrap_err();
    match err {
        AppError::StationBusy { station_id, holder } => {
            assert_eq!(station_id, 17);
            assert_eq!(holder, "a1");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(ledger.occupant("b2").unwrap().is_queued());
    assert_eq!(ledger.occupants_on(17).len(), 1);

    // once the console is free again the promotion goes through
    ledger.check_out_at("a1", t).unwrap();
    ledger.assign_queued_at("b2", 17, t).unwrap();
    assert_eq!(ledger.occupants_on(17).len(), 1);
}

#[test]
fn remove_queued_logs_a_checkout_from_the_queue() {
    let root = setup_test_dir("ledger_unqueue");
    let mut ledger = open_ledger(&root);
    let t = at(2025, 6, 10, 11, 0, 0);

    ledger.check_in_at("Eve", "4001", 0, t).unwrap();
    ledger
        .remove_queued_at("4001", t + TimeDelta::seconds(42))
        .unwrap();

    assert!(ledger.occupant("4001").is_none());
    let records = ledger.event_log().read_bucket(t.date_naive());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].station_id, 0);
    assert_eq!(records[0].usage_duration.as_deref(), Some("42s"));
}

#[test]
fn queue_operations_reject_seated_occupants() {
    let root = setup_test_dir("ledger_seated");
    let mut ledger = open_ledger(&root);
    let t = at(2025, 6, 10, 11, 0, 0);

    ledger.check_in_at("Fay", "5001", 3, t).unwrap();

    assert!(matches!(
        ledger.remove_queued_at("5001", t),
        Err(AppError::AlreadyAssigned { station_id: 3, .. })
    ));
    assert!(matches!(
        ledger.assign_queued_at("5001", 4, t),
        Err(AppError::AlreadyAssigned { station_id: 3, .. })
    ));
    assert!(matches!(
        ledger.assign_queued_at("nobody", 4, t),
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        ledger.check_out_at("nobody", t),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn assign_to_busy_station_keeps_occupant_queued() {
    let root = setup_test_dir("ledger_assign_busy");
    let mut ledger = open_ledger(&root);
    let t = at(2025, 6, 10, 11, 0, 0);

    ledger.check_in_at("Gus", "6001", 4, t).unwrap();
    ledger.check_in_at("Hal", "6002", 0, t).unwrap();

    let err = ledger.assign_queued_at("6002", 4, t).unwrap_err();
    assert!(matches!(err, AppError::StationBusy { station_id: 4, .. }));
    assert!(ledger.occupant("6002").unwrap().is_queued());
    assert!(matches!(
        ledger.assign_queued_at("6002", 0, t),
        Err(AppError::UnknownStation(0))
    ));
}

#[test]
fn reopening_restores_station_occupancy() {
    let root = setup_test_dir("ledger_reload");
    let t = at(2025, 6, 10, 12, 0, 0);

    let (occupants, stations) = {
        let mut ledger = open_ledger(&root);
        ledger.check_in_at("Alice", "1001", 5, t).unwrap();
        ledger.check_in_at("Bob", "1002", 6, t).unwrap();
        ledger.check_in_at("Cleo", "1003", 17, t).unwrap();
        ledger.check_in_at("Dan", "1004", 0, t).unwrap();
        ledger.check_out_at("1002", t + TimeDelta::minutes(5)).unwrap();
        (ledger.occupants().to_vec(), ledger.stations().to_vec())
    };

    let reopened = open_ledger(&root);
    assert_eq!(reopened.occupants(), occupants.as_slice());
    for (a, b) in stations.iter().zip(reopened.stations()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.status, b.status);
        assert_eq!(a.holder, b.holder);
    }
}

#[test]
fn corrupt_ledger_file_opens_empty() {
    let root = setup_test_dir("ledger_corrupt");
    let cfg = test_config(&root);
    common::write_file(&cfg.ledger_file(), "{ not json");

    let ledger = open_ledger(&root);
    assert!(ledger.occupants().is_empty());
    assert!(ledger.stations().iter().all(|s| s.is_free()));
}

#[test]
fn random_interleavings_never_share_a_primary_station() {
    let root = setup_test_dir("ledger_property");
    let mut ledger = open_ledger(&root);
    let mut rng = StdRng::seed_from_u64(20250610);
    let mut t = at(2025, 6, 10, 8, 0, 0);

    for _ in 0..400 {
        t += TimeDelta::seconds(rng.gen_range(1..90));
        if rng.gen_bool(0.6) {
            let id = format!("u{}", rng.gen_range(0..40));
            let station = rng.gen_range(0..=18);
            let _ = ledger.check_in_at("User", &id, station, t);
        } else if !ledger.occupants().is_empty() {
            let idx = rng.gen_range(0..ledger.occupants().len());
            let id = ledger.occupants()[idx].id.clone();
            ledger.check_out_at(&id, t).unwrap();
        }

        let mut seen = HashSet::new();
        for occ in ledger.occupants() {
            let Some(station) = ledger.station(occ.station_id) else {
                continue;
            };
            if station.category == StationCategory::Primary {
                assert!(seen.insert(occ.station_id), "station {} shared", occ.station_id);
                assert_eq!(station.holder.as_deref(), Some(occ.id.as_str()));
            }
        }
        for st in ledger.stations() {
            assert_eq!(st.is_free(), ledger.occupants_on(st.id).is_empty());
        }
    }
}

#[test]
fn observers_run_once_per_flush() {
    let root = setup_test_dir("ledger_notify");
    let mut ledger = open_ledger(&root);
    let t = at(2025, 6, 10, 12, 0, 0);

    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    let sub = ledger.subscribe(Box::new(move || seen.set(seen.get() + 1)));

    assert!(!ledger.flush_changes());
    ledger.check_in_at("A", "1", 1, t).unwrap();
    ledger.check_in_at("B", "2", 2, t).unwrap();
    ledger.check_out_at("1", t).unwrap();
    assert!(ledger.has_pending_changes());

    assert!(ledger.flush_changes());
    assert_eq!(calls.get(), 1);
    assert!(!ledger.flush_changes());

    // failed operations do not notify
    let _ = ledger.check_in_at("C", "3", 2, t);
    assert!(!ledger.has_pending_changes());

    assert!(ledger.unsubscribe(sub));
    ledger.check_out_at("2", t).unwrap();
    assert!(ledger.flush_changes());
    assert_eq!(calls.get(), 1);
}

#[test]
fn checkin_form_trims_and_validates() {
    let form = CheckInForm::parse("  Alice ", " 1001 ", " 5 ").unwrap();
    assert_eq!(form.name, "Alice");
    assert_eq!(form.occupant_id, "1001");
    assert_eq!(form.station_id, 5);

    assert_eq!(CheckInForm::parse("Bob", "1002", "").unwrap().station_id, 0);
    assert!(matches!(
        CheckInForm::parse("Bob", "1002", "five"),
        Err(AppError::InvalidInput(_))
    ));
    assert!(matches!(
        CheckInForm::parse("  ", "1002", "3"),
        Err(AppError::InvalidInput(_))
    ));
    assert!(matches!(
        CheckInForm::parse("Bob", "", "3"),
        Err(AppError::InvalidInput(_))
    ));
}
