use std::fs;
use std::path::PathBuf;

use dealers_choice_engine::cards::Rank;
use dealers_choice_engine::game::RecordedAction;
use dealers_choice_engine::phase::Phase;
use dealers_choice_engine::player::Action;
use dealers_choice_engine::record::{format_hand_id, HandLogger, HandRecord};
use dealers_choice_engine::variants::VariantId;

fn tmp_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("target");
    p.push(format!("{}_{}.jsonl", name, std::process::id()));
    p
}

fn sample_record(hand_id: String) -> HandRecord {
    HandRecord {
        hand_id,
        variant: VariantId::FollowTheQueen,
        seed: Some(7),
        dealer: 0,
        actions: vec![RecordedAction::Bet {
            seat: 1,
            phase: Phase::ThirdStreet,
            action: Action::Call,
        }],
        outcome: None,
        wild_ranks: vec![Rank::Queen, Rank::Five],
        ts: None,
        meta: None,
    }
}

#[test]
fn writes_jsonl_with_lf_only() {
    let path = tmp_path("handlog");
    let mut logger = HandLogger::create(&path).expect("create logger");
    let id = logger.next_id();
    logger.write(&sample_record(id)).expect("write");
    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));
}

#[test]
fn ts_is_generated_when_missing_and_preserved_when_present() {
    let path = tmp_path("handlog_ts");
    let mut logger = HandLogger::create(&path).expect("create logger");

    logger.write(&sample_record("20260829-000001".to_string())).expect("write");
    let mut pinned = sample_record("20260829-000002".to_string());
    pinned.ts = Some("2026-01-02T03:04:05Z".to_string());
    logger.write(&pinned).expect("write");

    let text = fs::read_to_string(&path).expect("read file");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    let first: HandRecord = serde_json::from_str(lines[0]).unwrap();
    assert!(first.ts.is_some());
    let second: HandRecord = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second.ts.as_deref(), Some("2026-01-02T03:04:05Z"));
}

#[test]
fn create_builds_missing_parent_directories() {
    let mut path = PathBuf::from("target");
    path.push(format!("handlog_nested_{}", std::process::id()));
    path.push("sessions");
    path.push("log.jsonl");
    let mut logger = HandLogger::create(&path).expect("create with missing parents");
    logger.write(&sample_record("20260830-000001".to_string())).expect("write");
    assert!(path.exists());
}

#[test]
fn sequential_ids_increment() {
    let mut logger = HandLogger::sink("20261231");
    assert_eq!(logger.next_id(), "20261231-000001");
    assert_eq!(logger.next_id(), "20261231-000002");
    assert_eq!(format_hand_id("20261231", 3), "20261231-000003");
}

#[test]
fn record_replays_wild_context() {
    let line = serde_json::to_string(&sample_record("20260829-000009".to_string())).unwrap();
    let back: HandRecord = serde_json::from_str(&line).unwrap();
    assert_eq!(back.variant, VariantId::FollowTheQueen);
    assert_eq!(back.wild_ranks, vec![Rank::Queen, Rank::Five]);
    assert_eq!(back.seed, Some(7));
}
