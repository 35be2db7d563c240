//! Account loading, validation and appending.

use activity_core::{
    error::{SimError, ValidationError},
    pattern::{PatternKind, PatternWeights},
    registry::{AccountRegistry, AccountRow},
};

fn row(name: &str) -> AccountRow {
    AccountRow::new(name, &format!("{name}@example.com"), "pw", "forum.example.com")
}

fn registry(seed: u64) -> AccountRegistry {
    AccountRegistry::new(seed, PatternWeights::default()).unwrap()
}

#[test]
fn empty_account_list_is_rejected() {
    let mut reg = registry(1);
    let err = reg.load(&[]).unwrap_err();
    assert!(matches!(err, SimError::Validation(ValidationError::EmptyAccountList)));
}

#[test]
fn ids_start_at_zero_in_load_order() {
    let mut reg = registry(1);
    reg.load(&[row("alpha"), row("bravo"), row("charlie")]).unwrap();
    let ids: Vec<_> = reg.accounts().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert_eq!(reg.get(1).unwrap().display_name, "bravo");
}

#[test]
fn missing_or_blank_field_names_row_and_field() {
    let mut reg = registry(1);
    let mut bad = row("bravo");
    bad.secret = Some("   ".into());
    let err = reg.load(&[row("alpha"), bad]).unwrap_err();
    assert!(matches!(
        err,
        SimError::Validation(ValidationError::MissingField { row: 1, field: "secret" })
    ));

    let mut missing = row("alpha");
    missing.site = None;
    let err = reg.load(&[missing]).unwrap_err();
    assert!(matches!(
        err,
        SimError::Validation(ValidationError::MissingField { row: 0, field: "site" })
    ));
}

#[test]
fn failed_load_leaves_registry_untouched() {
    let mut reg = registry(1);
    reg.load(&[row("alpha")]).unwrap();
    let before = reg.accounts().to_vec();
    assert!(reg.load(&[row("x"), AccountRow::default()]).is_err());
    assert_eq!(reg.accounts(), before.as_slice());
}

#[test]
fn append_assigns_next_id_and_keeps_existing_accounts() {
    let mut reg = registry(9);
    reg.load(&[row("alpha"), row("bravo")]).unwrap();
    let before = reg.accounts().to_vec();

    let added = reg
        .append("delta", "delta@example.com", "pw", "forum.example.com")
        .unwrap()
        .clone();
    assert_eq!(added.id, 2);
    assert_eq!(&reg.accounts()[..2], before.as_slice());
    assert_eq!(reg.len(), 3);
}

#[test]
fn append_rejects_blank_fields() {
    let mut reg = registry(9);
    reg.load(&[row("alpha")]).unwrap();
    assert!(reg.append("", "x@example.com", "pw", "site").is_err());
    assert_eq!(reg.len(), 1);
}

#[test]
fn pattern_assignment_is_seeded() {
    let rows: Vec<_> = (0..30).map(|i| row(&format!("user{i}"))).collect();
    let mut a = registry(123);
    let mut b = registry(123);
    a.load(&rows).unwrap();
    b.load(&rows).unwrap();
    let pa: Vec<PatternKind> = a.accounts().iter().map(|x| x.pattern).collect();
    let pb: Vec<PatternKind> = b.accounts().iter().map(|x| x.pattern).collect();
    assert_eq!(pa, pb);
}

#[test]
fn zero_weight_patterns_are_never_assigned() {
    let weights = PatternWeights {
        bursty: 0,
        weekly: 1,
        monthly: 0,
        lurker_then_active: 0,
        weekend: 0,
        weekday: 0,
        uniform_random: 0,
        daily: 1,
    };
    let mut reg = AccountRegistry::new(5, weights).unwrap();
    let rows: Vec<_> = (0..50).map(|i| row(&format!("user{i}"))).collect();
    reg.load(&rows).unwrap();
    assert!(reg
        .accounts()
        .iter()
        .all(|a| matches!(a.pattern, PatternKind::Weekly | PatternKind::Daily)));
}

#[test]
fn legacy_column_names_deserialize() {
    let json = r#"{
        "forum-website": "boards.example.org",
        "email address": "old@example.org",
        "password": "pw",
        "username": "oldtimer"
    }"#;
    let parsed: AccountRow = serde_json::from_str(json).unwrap();
    assert_eq!(parsed, AccountRow::new("oldtimer", "old@example.org", "pw", "boards.example.org"));
}

#[test]
fn reloading_the_same_rows_reproduces_patterns() {
    let rows: Vec<_> = (0..30).map(|i| row(&format!("user{i}"))).collect();

    let mut once = registry(42);
    once.load(&rows).unwrap();

    let mut twice = registry(42);
    twice.load(&rows).unwrap();
    twice.load(&rows).unwrap();

    assert_eq!(once.accounts(), twice.accounts());
}

#[test]
fn appended_pattern_matches_a_fresh_load_of_the_same_rows() {
    let mut grown = registry(17);
    grown.load(&[row("alpha"), row("bravo")]).unwrap();
    grown
        .append("charlie", "charlie@example.com", "pw", "forum.example.com")
        .unwrap();

    let mut loaded = registry(17);
    loaded.load(&[row("alpha"), row("bravo"), row("charlie")]).unwrap();

    let grown_patterns: Vec<_> = grown.accounts().iter().map(|a| a.pattern).collect();
    let loaded_patterns: Vec<_> = loaded.accounts().iter().map(|a| a.pattern).collect();
    assert_eq!(grown_patterns, loaded_patterns);
}
