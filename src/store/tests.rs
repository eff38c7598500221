#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::credentials::hash_password;
use super::*;
use crate::models::{UNSPECIFIED_CATEGORY, UNTITLED};

fn open_ledger() -> (tempfile::TempDir, Ledger) {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Ledger::open(dir.path()).unwrap();
    (dir, ledger)
}

fn write_raw(ledger: &Ledger, username: &str, content: &[u8]) {
    std::fs::write(ledger.path_for(username).unwrap(), content).unwrap();
}

fn sample_record() -> UserRecord {
    let mut record = UserRecord::empty("alice");
    record.password_hash = hash_password("pw1");
    record
        .append_entry(Entry::new(
            dec!(1500),
            Some("Salary".into()),
            Some("2024-01-31".into()),
            Some("January".into()),
        ))
        .append_entry(Entry::new(
            dec!(-12.40),
            Some("Coffee".into()),
            Some("2024-02-01".into()),
            None,
        ))
        .append_entry(Entry::from_amount(dec!(0.1)))
}

// ── Load / save ───────────────────────────────────────────────

#[test]
fn test_load_missing_returns_fresh_record_without_creating_file() {
    let (_dir, ledger) = open_ledger();
    let loaded = ledger.load("alice").unwrap();
    assert_eq!(loaded.record, UserRecord::empty("alice"));
    assert!(loaded.warnings.is_empty());
    assert!(!ledger.has_record("alice").unwrap());
}

#[test]
fn test_round_trip() {
    let (_dir, ledger) = open_ledger();
    let record = sample_record();
    ledger.save(&record).unwrap();
    let loaded = ledger.load("alice").unwrap();
    assert!(loaded.warnings.is_empty());
    assert_eq!(loaded.record, record);
}

#[test]
fn test_round_trip_keeps_all_decimal_digits() {
    let (_dir, ledger) = open_ledger();
    let record = UserRecord::empty("alice")
        .append_entry(Entry::from_amount(dec!(0.1234567890123456789)))
        .append_entry(Entry::from_amount(dec!(-12345678901234567.8901)));
    ledger.save(&record).unwrap();
    let loaded = ledger.load("alice").unwrap();
    assert!(loaded.warnings.is_empty());
    assert_eq!(loaded.record.amounts(), record.amounts());
}

#[test]
fn test_round_trip_extreme_amounts() {
    let (_dir, ledger) = open_ledger();
    let record = UserRecord::empty("alice")
        .append_entry(Entry::from_amount(Decimal::MAX))
        .append_entry(Entry::from_amount(Decimal::MIN));
    ledger.save(&record).unwrap();
    let loaded = ledger.load("alice").unwrap();
    assert!(loaded.warnings.is_empty(), "{:?}", loaded.warnings);
    assert_eq!(loaded.record.amounts(), vec![Decimal::MAX, Decimal::MIN]);
}

#[test]
fn test_save_overwrites() {
    let (_dir, ledger) = open_ledger();
    ledger.save(&sample_record()).unwrap();
    let cleared = sample_record().clear();
    ledger.save(&cleared).unwrap();
    assert!(ledger.load("alice").unwrap().record.entries.is_empty());
}

#[test]
fn test_saved_file_uses_stored_layout() {
    let (_dir, ledger) = open_ledger();
    ledger.save(&sample_record()).unwrap();
    let text = std::fs::read_to_string(ledger.path_for("alice").unwrap()).unwrap();
    let doc: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["senha"], hash_password("pw1"));
    assert_eq!(doc["valores"][0]["valor"], 1500);
    assert_eq!(doc["valores"][0]["tipo_atividade"], "Salary");
    assert_eq!(doc["valores"][0]["data"], "2024-01-31");
    assert_eq!(doc["valores"][0]["titulo"], "January");
    assert_eq!(doc["valores"][1]["valor"], -12.4);
}

#[test]
fn test_legacy_bare_numbers() {
    let (_dir, ledger) = open_ledger();
    write_raw(&ledger, "alice", br#"{"valores": [10, 20.5]}"#);
    let loaded = ledger.load("alice").unwrap();
    assert!(loaded.warnings.is_empty());
    let entries = &loaded.record.entries;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].amount, dec!(10));
    assert_eq!(entries[1].amount, dec!(20.5));
    for e in entries {
        assert_eq!(e.category, UNSPECIFIED_CATEGORY);
        assert!(!e.has_known_date());
        assert_eq!(e.title, UNTITLED);
    }
}

#[test]
fn test_migration_idempotent_through_storage() {
    let (_dir, ledger) = open_ledger();
    write_raw(
        &ledger,
        "alice",
        br#"{"senha": "", "valores": [10, 20.50, {"valor": 3, "tipo_atividade": "Gym"},
            {"valor": 1.25, "tipo_atividade": "Bus", "data": "2024-03-03"}]}"#,
    );
    let first = ledger.load("alice").unwrap().record;
    ledger.save(&first).unwrap();
    let bytes_first = std::fs::read(ledger.path_for("alice").unwrap()).unwrap();

    let second = ledger.load("alice").unwrap().record;
    assert_eq!(first.entries, second.entries);
    ledger.save(&second).unwrap();
    let bytes_second = std::fs::read(ledger.path_for("alice").unwrap()).unwrap();
    assert_eq!(bytes_first, bytes_second);
}

#[test]
fn test_corrupt_file_recovers_with_parse_failure() {
    let (_dir, ledger) = open_ledger();
    write_raw(&ledger, "alice", b"\x00\xffnot json at all{{");
    let loaded = ledger.load("alice").unwrap();
    assert_eq!(loaded.record, UserRecord::empty("alice"));
    assert_eq!(loaded.warnings.len(), 1);
    assert!(matches!(loaded.warnings[0], LedgerError::ParseFailure { .. }));
}

#[test]
fn test_empty_file_is_parse_failure() {
    let (_dir, ledger) = open_ledger();
    write_raw(&ledger, "alice", b"");
    let loaded = ledger.load("alice").unwrap();
    assert!(!loaded.record.credential_is_set());
    assert!(matches!(loaded.warnings[0], LedgerError::ParseFailure { .. }));
}

#[test]
fn test_non_object_top_level_is_parse_failure() {
    let (_dir, ledger) = open_ledger();
    write_raw(&ledger, "alice", b"[1, 2, 3]");
    let loaded = ledger.load("alice").unwrap();
    assert!(loaded.record.entries.is_empty());
    assert!(matches!(loaded.warnings[0], LedgerError::ParseFailure { .. }));
}

#[test]
fn test_bad_entries_reported_good_ones_kept() {
    let (_dir, ledger) = open_ledger();
    write_raw(&ledger, "alice", br#"{"valores": [5, "five", {"other": 1}, 6]}"#);
    let loaded = ledger.load("alice").unwrap();
    assert_eq!(loaded.record.amounts(), vec![dec!(5), dec!(6)]);
    assert_eq!(loaded.warnings.len(), 2);
    assert!(loaded
        .warnings
        .iter()
        .all(|w| matches!(w, LedgerError::UnexpectedEntryShape { .. })));
}

#[test]
fn test_non_list_entries_reported() {
    let (_dir, ledger) = open_ledger();
    write_raw(&ledger, "alice", br#"{"senha": "abc", "valores": "oops"}"#);
    let loaded = ledger.load("alice").unwrap();
    assert!(loaded.record.entries.is_empty());
    assert!(loaded.record.credential_is_set());
    assert!(matches!(
        loaded.warnings.as_slice(),
        [LedgerError::EntriesNotAList { .. }]
    ));
}

#[test]
fn test_users_are_independent() {
    let (_dir, ledger) = open_ledger();
    ledger.save(&sample_record()).unwrap();
    let bob = ledger.load("bob").unwrap().record;
    assert!(bob.entries.is_empty());
    assert_eq!(bob.total().unwrap(), Decimal::ZERO);
}

#[test]
fn test_append_clear_persisted() {
    let (_dir, ledger) = open_ledger();
    let record = ledger
        .load("alice")
        .unwrap()
        .record
        .append_entry(Entry::from_amount(dec!(1)))
        .append_entry(Entry::from_amount(dec!(2)))
        .append_entry(Entry::from_amount(dec!(3)));
    ledger.save(&record).unwrap();
    assert_eq!(ledger.load("alice").unwrap().record.total().unwrap(), dec!(6));

    ledger.save(&record.clear()).unwrap();
    let reloaded = ledger.load("alice").unwrap().record;
    assert!(reloaded.entries.is_empty());
    assert_eq!(reloaded.total().unwrap(), Decimal::ZERO);
}

#[test]
fn test_save_into_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Ledger::open(dir.path()).unwrap();
    std::fs::remove_dir_all(dir.path().join("users")).unwrap();
    let err = ledger.save(&sample_record()).unwrap_err();
    assert!(matches!(err, LedgerError::Io { .. }));
}

// ── Usernames ─────────────────────────────────────────────────

#[test]
fn test_valid_usernames() {
    for name in ["alice", "Bob_2", "a.b-c", "_x", "9"] {
        assert!(validate_username(name).is_ok(), "{name}");
    }
}

#[test]
fn test_invalid_usernames() {
    let too_long = "a".repeat(65);
    for name in ["", "..", ".hidden", "-dash", "../etc", "a/b", "a\\b", "a b", too_long.as_str()] {
        assert!(
            matches!(validate_username(name), Err(LedgerError::InvalidUsername { .. })),
            "{name}"
        );
    }
}

#[test]
fn test_load_rejects_traversal() {
    let (_dir, ledger) = open_ledger();
    assert!(matches!(
        ledger.load("../outside"),
        Err(LedgerError::InvalidUsername { .. })
    ));
}

// ── Credentials ───────────────────────────────────────────────

#[test]
fn test_hash_is_hex_sha256() {
    assert_eq!(
        hash_password("abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn test_register_creates_record() {
    let (_dir, ledger) = open_ledger();
    register(&ledger, "alice", "pw1").unwrap();
    let record = ledger.load("alice").unwrap().record;
    assert!(record.credential_is_set());
    assert_eq!(record.password_hash, hash_password("pw1"));
    assert!(record.entries.is_empty());
}

#[test]
fn test_registration_exclusivity() {
    let (_dir, ledger) = open_ledger();
    register(&ledger, "alice", "pw1").unwrap();
    assert!(matches!(
        register(&ledger, "alice", "pw2"),
        Err(LedgerError::AlreadyExists { .. })
    ));
    let session = authenticate(&ledger, "alice", "pw1").unwrap();
    assert_eq!(session.username(), "alice");
    assert!(matches!(
        authenticate(&ledger, "alice", "pw2"),
        Err(LedgerError::InvalidCredentials)
    ));
}

#[test]
fn test_register_over_unset_credential_discards_entries() {
    let (_dir, ledger) = open_ledger();
    write_raw(&ledger, "alice", br#"{"senha": "", "valores": [1, 2]}"#);
    register(&ledger, "alice", "pw").unwrap();
    let record = ledger.load("alice").unwrap().record;
    assert!(record.credential_is_set());
    assert!(record.entries.is_empty());
}

#[test]
fn test_register_over_empty_file() {
    let (_dir, ledger) = open_ledger();
    write_raw(&ledger, "alice", b"");
    register(&ledger, "alice", "pw").unwrap();
    assert!(authenticate(&ledger, "alice", "pw").is_ok());
}

#[test]
fn test_authenticate_unknown_user() {
    let (_dir, ledger) = open_ledger();
    assert!(matches!(
        authenticate(&ledger, "nobody", "pw"),
        Err(LedgerError::InvalidCredentials)
    ));
}

#[test]
fn test_authenticate_never_succeeds_against_empty_hash() {
    let (_dir, ledger) = open_ledger();
    write_raw(&ledger, "alice", br#"{"senha": "", "valores": []}"#);
    assert!(matches!(
        authenticate(&ledger, "alice", "anything"),
        Err(LedgerError::InvalidCredentials)
    ));
}

#[test]
fn test_authenticate_invalid_username_is_invalid_credentials() {
    let (_dir, ledger) = open_ledger();
    assert!(matches!(
        authenticate(&ledger, "../alice", "pw"),
        Err(LedgerError::InvalidCredentials)
    ));
}

#[test]
fn test_blank_credentials_rejected() {
    let (_dir, ledger) = open_ledger();
    assert!(matches!(
        register(&ledger, "", "pw"),
        Err(LedgerError::MissingCredentials)
    ));
    assert!(matches!(
        register(&ledger, "alice", ""),
        Err(LedgerError::MissingCredentials)
    ));
    assert!(matches!(
        authenticate(&ledger, "alice", ""),
        Err(LedgerError::MissingCredentials)
    ));
}

#[test]
fn test_register_keeps_other_users_untouched() {
    let (_dir, ledger) = open_ledger();
    ledger.save(&sample_record()).unwrap();
    register(&ledger, "bob", "pw").unwrap();
    assert_eq!(ledger.load("alice").unwrap().record, sample_record());
}
