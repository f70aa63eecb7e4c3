use fusen_core::{slot_top, stack_tops, ArtifactLedger, PIN_ROW_HEIGHT};

type Ledger = ArtifactLedger<&'static str, &'static str>;

#[test]
fn stack_indexes_follow_insertion_order() {
    let mut ledger = Ledger::new();
    let first = ledger.add_pin("a");
    let second = ledger.add_pin("b");
    let third = ledger.add_pin("c");

    assert_eq!(ledger.pin_index(first), Some(0));
    assert_eq!(ledger.pin_index(second), Some(1));
    assert_eq!(ledger.pin_index(third), Some(2));
}

#[test]
fn stack_indexes_stay_a_permutation_after_removal() {
    let mut ledger = Ledger::new();
    let first = ledger.add_pin("a");
    let second = ledger.add_pin("b");
    let third = ledger.add_pin("c");

    assert_eq!(ledger.remove_pin(second), Some("b"));

    let mut indexes: Vec<usize> = [first, third]
        .iter()
        .filter_map(|id| ledger.pin_index(*id))
        .collect();
    indexes.sort_unstable();
    assert_eq!(indexes, vec![0, 1]);
    assert_eq!(ledger.pin_index(first), Some(0));
    assert_eq!(ledger.pin_index(third), Some(1));
}

#[test]
fn removal_is_idempotent() {
    let mut ledger = Ledger::new();
    let id = ledger.add_pin("a");

    assert_eq!(ledger.remove_pin(id), Some("a"));
    assert_eq!(ledger.remove_pin(id), None);
    assert_eq!(ledger.pin_count(), 0);
}

#[test]
fn pins_and_notes_are_independent() {
    let mut ledger = Ledger::new();
    ledger.add_pin("pin");
    let note = ledger.add_note("note");

    assert_eq!(ledger.pin_count(), 1);
    assert_eq!(ledger.note_count(), 1);
    assert_eq!(ledger.total(), 2);

    assert_eq!(ledger.remove_note(note), Some("note"));
    assert_eq!(ledger.pin_count(), 1);
    assert_eq!(ledger.note_count(), 0);
}

#[test]
fn ids_are_unique_across_kinds() {
    let mut ledger = Ledger::new();
    let pin = ledger.add_pin("p");
    let note = ledger.add_note("n");
    let pin_two = ledger.add_pin("q");

    assert_ne!(pin.to_string(), note.to_string());
    assert_ne!(pin.to_string(), pin_two.to_string());
    assert!(pin.to_string().starts_with("fusen-pin-"));
    assert!(note.to_string().starts_with("fusen-note-"));
}

#[test]
fn note_mut_ignores_unknown_ids() {
    let mut ledger: ArtifactLedger<(), u32> = ArtifactLedger::new();
    let note = ledger.add_note(0);
    ledger.remove_note(note);
    assert!(ledger.note_mut(note).is_none());
}

#[test]
fn slot_tops_step_by_row_height() {
    assert_eq!(slot_top(48.0, 0), 48.0);
    assert_eq!(slot_top(48.0, 1), 48.0 + PIN_ROW_HEIGHT);

    let tops: Vec<f64> = stack_tops(10.0, 3).collect();
    assert_eq!(tops, vec![10.0, 70.0, 130.0]);
}
