//! Tests for the submit/snapshot service.

use board_relay::{BoardProfile, Player, RawState, SubmitRequest, SyncErrorKind, SyncService, Winner};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

const MIDGAME: &str = "0,0,0,0,0,2,1,0,0,1,2,0,0,0,0,0";

#[test]
fn test_fresh_reversi_service() {
    let service = SyncService::new(BoardProfile::Reversi);
    let snapshot = service.snapshot();

    assert_eq!(snapshot.current_player, Some(Player::One));
    assert_eq!(snapshot.game_over, Some(false));
    assert_eq!(snapshot.winner, Some(Winner::Nobody));
    assert_eq!(snapshot.grid, None);

    let typed = &snapshot.typed_array;
    assert_eq!(typed.len(), 16);
    // Same colour on each diagonal of the center square.
    assert_eq!((typed[5], typed[10]), (2, 2));
    assert_eq!((typed[6], typed[9]), (1, 1));
    assert_eq!(typed.iter().filter(|&&v| v != 0).count(), 4);
}

#[test]
fn test_submit_then_snapshot_roundtrip() {
    let service = SyncService::new(BoardProfile::Reversi);
    service.submit(&SubmitRequest::with_state(MIDGAME)).unwrap();

    let snapshot = service.snapshot();
    assert_eq!(snapshot.typed_array[5], 2);
    assert_eq!(snapshot.typed_array[6], 1);
    let expected: Vec<String> = MIDGAME.split(',').map(String::from).collect();
    assert_eq!(snapshot.raw_state, RawState::Cells(expected));
}

#[test]
fn test_wrong_length_leaves_store_unchanged() {
    let service = SyncService::new(BoardProfile::Reversi);
    service
        .submit(&SubmitRequest::with_state(MIDGAME).current_player("2"))
        .unwrap();
    let before = service.snapshot();

    let err = service
        .submit(&SubmitRequest::with_state("1,1,1").current_player("1").game_over("1"))
        .unwrap_err();
    assert_eq!(
        err.kind(),
        &SyncErrorKind::LengthMismatch {
            expected: 16,
            actual: 3
        }
    );
    assert_eq!(service.snapshot(), before);
}

#[test]
fn test_missing_state_is_malformed() {
    let service = SyncService::new(BoardProfile::Reversi);
    let before = service.snapshot();

    let err = service.submit(&SubmitRequest::default()).unwrap_err();
    assert!(matches!(err.kind(), SyncErrorKind::MalformedPayload(_)));
    assert_eq!(err.kind().to_string(), "Bad request: missing board state data");
    assert_eq!(service.snapshot(), before);
}

#[test]
fn test_bad_metadata_rejects_whole_update() {
    let service = SyncService::new(BoardProfile::Reversi);
    let before = service.snapshot();

    for request in [
        SubmitRequest::with_state(MIDGAME).current_player("black"),
        SubmitRequest::with_state(MIDGAME).current_player("3"),
        SubmitRequest::with_state(MIDGAME).winner("-1"),
    ] {
        let err = service.submit(&request).unwrap_err();
        assert!(matches!(err.kind(), SyncErrorKind::MalformedPayload(_)));
    }
    assert_eq!(service.snapshot(), before);
}

#[test]
fn test_repeated_submit_is_idempotent() {
    let service = SyncService::new(BoardProfile::Reversi);
    let request = SubmitRequest::with_state(MIDGAME).current_player("2");

    service.submit(&request).unwrap();
    let first = service.snapshot();
    service.submit(&request).unwrap();
    assert_eq!(service.snapshot(), first);
}

#[test]
fn test_game_over_and_winner_lifecycle() {
    let service = SyncService::new(BoardProfile::Reversi);

    service
        .submit(&SubmitRequest::with_state(MIDGAME).game_over("1").winner("2"))
        .unwrap();
    let finished = service.snapshot();
    assert_eq!(finished.game_over, Some(true));
    assert_eq!(finished.winner, Some(Winner::Player(Player::Two)));

    // State-only updates leave the metadata alone.
    service.submit(&SubmitRequest::with_state(MIDGAME)).unwrap();
    let still = service.snapshot();
    assert_eq!(still.game_over, Some(true));
    assert_eq!(still.winner, Some(Winner::Player(Player::Two)));

    // Anything but "1" clears the flag.
    service
        .submit(&SubmitRequest::with_state(MIDGAME).game_over("0").winner("0"))
        .unwrap();
    let reopened = service.snapshot();
    assert_eq!(reopened.game_over, Some(false));
    assert_eq!(reopened.winner, Some(Winner::Nobody));

    service
        .submit(&SubmitRequest::with_state(MIDGAME).game_over("true"))
        .unwrap();
    assert_eq!(service.snapshot().game_over, Some(false));
}

#[test]
fn test_game_over_requires_exact_one() {
    let service = SyncService::new(BoardProfile::Reversi);
    service
        .submit(&SubmitRequest::with_state(MIDGAME).game_over("1"))
        .unwrap();
    assert_eq!(service.snapshot().game_over, Some(true));

    for padded in [" 1 ", "1 ", " "] {
        service
            .submit(&SubmitRequest::with_state(MIDGAME).game_over(padded))
            .unwrap();
        assert_eq!(service.snapshot().game_over, Some(false), "gameOver {:?}", padded);
        service
            .submit(&SubmitRequest::with_state(MIDGAME).game_over("1"))
            .unwrap();
    }

    // Numbers still tolerate padding.
    service
        .submit(&SubmitRequest::with_state(MIDGAME).current_player(" 2 "))
        .unwrap();
    assert_eq!(service.snapshot().current_player, Some(Player::Two));
}

#[test]
fn test_empty_metadata_fields_are_absent() {
    let service = SyncService::new(BoardProfile::Reversi);
    service
        .submit(&SubmitRequest::with_state(MIDGAME).current_player("2"))
        .unwrap();
    service
        .submit(&SubmitRequest::with_state(MIDGAME).current_player(""))
        .unwrap();
    assert_eq!(service.snapshot().current_player, Some(Player::Two));
}

#[test]
fn test_reset_restores_initial_state() {
    let service = SyncService::new(BoardProfile::Reversi);
    let initial = service.snapshot();
    service
        .submit(&SubmitRequest::with_state(MIDGAME.replace('0', "1")).game_over("1"))
        .unwrap();
    assert_ne!(service.snapshot(), initial);

    service.reset();
    assert_eq!(service.snapshot(), initial);
}

#[test]
fn test_sensor_profile_ignores_metadata() {
    let service = SyncService::new(BoardProfile::Sensor);
    assert_eq!(service.snapshot().typed_array, vec![0; 6]);

    service
        .submit(&SubmitRequest::with_state("0,1,1,0,0,1").current_player("2"))
        .unwrap();
    let snapshot = service.snapshot();
    assert_eq!(snapshot.typed_array, vec![0, 1, 1, 0, 0, 1]);
    assert_eq!(snapshot.current_player, None);
    assert_eq!(snapshot.game_over, None);
}

#[test]
fn test_sensor_junk_cell_reads_as_unset() {
    let service = SyncService::new(BoardProfile::Sensor);
    service
        .submit(&SubmitRequest::with_state("1,0,0,1,1,x"))
        .unwrap();
    let snapshot = service.snapshot();
    assert_eq!(snapshot.typed_array, vec![1, 0, 0, 1, 1, 0]);
    assert_eq!(snapshot.typed_array[5], 0);
}

#[test]
fn test_binary_profile_grid() {
    let service = SyncService::new(BoardProfile::ChessBinary);
    let raw: String = (0..64).map(|i| if i == 9 { '0' } else { '1' }).collect();
    service.submit(&SubmitRequest::with_state(raw)).unwrap();

    let grid = service.snapshot().grid.unwrap();
    assert_eq!(grid[1][1], 0);
    let ones: usize = grid.iter().flatten().map(|&v| v as usize).sum();
    assert_eq!(ones, 63);
}

#[test]
fn test_snapshot_json_shape() {
    let service = SyncService::new(BoardProfile::Reversi);
    let json = serde_json::to_value(service.snapshot()).unwrap();
    assert_eq!(json["profile"], "reversi");
    assert_eq!(json["currentPlayer"], 1);
    assert_eq!(json["gameOver"], false);
    assert_eq!(json["winner"], 0);
    assert_eq!(json["typedArray"][5], 2);
    assert_eq!(json["rawState"][6], "1");
    assert!(json.get("grid").is_none());

    let binary = serde_json::to_value(SyncService::new(BoardProfile::ChessBinary).snapshot()).unwrap();
    assert_eq!(binary["rawState"], "0".repeat(64));
    assert_eq!(binary["grid"].as_array().unwrap().len(), 8);
    assert!(binary.get("currentPlayer").is_none());
}

#[test]
fn test_concurrent_snapshots_see_whole_updates() {
    let service = SyncService::new(BoardProfile::Reversi);
    let all_black = vec!["1"; 16].join(",");
    let all_white = vec!["2"; 16].join(",");
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let service = service.clone();
        let done = Arc::clone(&done);
        thread::spawn(move || {
            for i in 0..2_000 {
                let (state, player) = if i % 2 == 0 {
                    (&all_black, "1")
                } else {
                    (&all_white, "2")
                };
                service
                    .submit(&SubmitRequest::with_state(state.as_str()).current_player(player))
                    .unwrap();
            }
            done.store(true, Ordering::SeqCst);
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let service = service.clone();
            let done = Arc::clone(&done);
            thread::spawn(move || {
                while !done.load(Ordering::SeqCst) {
                    let snapshot = service.snapshot();
                    let first = snapshot.typed_array[0];
                    if first == 0 {
                        // Still the initial board.
                        continue;
                    }
                    assert!(snapshot.typed_array.iter().all(|&v| v == first));
                    assert_eq!(snapshot.current_player.map(Player::number), Some(first));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(service.snapshot().current_player, Some(Player::Two));
}
