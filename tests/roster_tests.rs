mod common;

use common::{setup_test_dir, write_file};
use rlounge::core::MemberRoster;
use rlounge::models::Member;
use std::fs;

#[test]
fn header_row_selects_name_and_id_columns() {
    let path = setup_test_dir("roster_header").join("membership.csv");
    write_file(
        &path,
        "Timestamp,Email,Student Name,Student Number\n\
         2024-09-01,a@x.org,Alice Smith,1001\n\
         2024-09-02,b@x.org,Bob Jones,1002\n",
    );

    let roster = MemberRoster::load(&path);
    assert_eq!(
        roster.members(),
        &[
            Member::new("Alice Smith", "1001"),
            Member::new("Bob Jones", "1002")
        ]
    );
}

#[test]
fn header_columns_may_come_in_any_order() {
    let path = setup_test_dir("roster_order").join("membership.csv");
    write_file(&path, "ID,Name\n1001,Alice\n");

    let roster = MemberRoster::load(&path);
    assert_eq!(roster.by_id("1001"), Some(&Member::new("Alice", "1001")));
}

#[test]
fn headerless_sheet_uses_third_and_fourth_columns() {
    let path = setup_test_dir("roster_plain").join("membership.csv");
    write_file(&path, ",,Alice,1001\n,,Bob,1002\n,,,\n");

    let roster = MemberRoster::load(&path);
    assert_eq!(roster.members().len(), 2);
    assert_eq!(roster.next_member_id(), "LOUNGE-3");
}

#[test]
fn search_is_case_insensitive_on_name_and_id() {
    let path = setup_test_dir("roster_search").join("membership.csv");
    write_file(&path, ",,Alice,1001\n,,Malik,2002\n,,Bob,1003\n");
    let roster = MemberRoster::load(&path);

    let names = |q: &str| -> Vec<String> {
        roster.search(q).into_iter().map(|m| m.name.clone()).collect()
    };
    assert_eq!(names("ALI"), vec!["Alice", "Malik"]);
    assert_eq!(names("100"), vec!["Alice", "Bob"]);
    assert!(names("  ").is_empty());
    assert!(names("zed").is_empty());
}

#[test]
fn unseen_ids_are_appended_once() {
    let path = setup_test_dir("roster_append").join("membership.csv");
    let mut roster = MemberRoster::load(&path);
    assert!(roster.members().is_empty());
    assert_eq!(roster.next_member_id(), "LOUNGE-1");

    assert!(roster.ensure_member(" Alice ", "1001").unwrap());
    assert!(!roster.ensure_member("Alice", "1001").unwrap());
    assert!(roster.ensure_member("Bob", "1002").unwrap());

    let raw = fs::read_to_string(&path).unwrap();
    assert_eq!(raw, ",,Alice,1001\n,,Bob,1002\n");

    let reloaded = MemberRoster::load(&path);
    assert_eq!(reloaded.members(), roster.members());
}
