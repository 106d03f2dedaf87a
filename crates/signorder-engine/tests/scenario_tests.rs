use mockall::mock;
use pretty_assertions::assert_eq;
use signorder_engine::renumber::{remove_signer, renumber_by_manual_entry, renumber_by_move};
use signorder_engine::{EditIntent, EditOutcome, ListObserver, RecipientEditor};
use signorder_test_utils::{names, orders, parallel_list, sequential_list};
use signorder_types::{EditorConfig, OrderingMode, RecipientError, RecipientList, SignerDraft};
use std::borrow::Cow;

mock! {
    pub Observer {}

    impl ListObserver for Observer {
        fn on_change(&mut self, revision: u64, intent: &EditIntent, list: &RecipientList);
    }
}

#[test]
fn manual_edit_sends_first_signer_last() {
    let list = sequential_list(&["A", "B", "C"]);
    let next = renumber_by_manual_entry(&list, 0, "3").unwrap();

    assert_eq!(names(&next), vec!["B", "C", "A"]);
    assert_eq!(orders(&next), vec![Some(1), Some(2), Some(3)]);
}

#[test]
fn drag_first_onto_second() {
    let list = sequential_list(&["first", "second"]);
    let next = renumber_by_move(&list, 0, Some(1)).unwrap();

    assert_eq!(names(&next), vec!["second", "first"]);
    assert_eq!(orders(&next), vec![Some(1), Some(2)]);
}

#[test]
fn blank_manual_input_returns_input_itself() {
    let list = sequential_list(&["A", "B", "C"]);
    for raw in ["", "   ", "\t\n"] {
        match renumber_by_manual_entry(&list, 1, raw).unwrap() {
            Cow::Borrowed(same) => assert!(std::ptr::eq(same, &list)),
            Cow::Owned(_) => panic!("blank input {raw:?} produced a new list"),
        }
    }
}

#[test]
fn removing_only_signer_rejected() {
    let list = sequential_list(&["solo"]);
    assert_eq!(remove_signer(&list, 0).unwrap_err(), RecipientError::LastSigner);
    assert_eq!(list.len(), 1);

    let mut editor = RecipientEditor::new(list, EditorConfig::default());
    assert!(editor.apply(EditIntent::Remove { index: 0 }).is_err());
    assert_eq!(editor.list().len(), 1);
}

#[test]
fn session_keeps_numbering_dense_through_mixed_edits() {
    let mut editor = RecipientEditor::new(parallel_list(&["A", "B"]), EditorConfig::default());

    let script = [
        EditIntent::SetMode {
            mode: OrderingMode::Sequential,
        },
        EditIntent::Add {
            draft: SignerDraft::new("C", "c@example.com"),
        },
        EditIntent::Add {
            draft: SignerDraft::new("D", "d@example.com"),
        },
        EditIntent::ManualOrder {
            index: 3,
            value: "0".into(),
        },
        EditIntent::Remove { index: 1 },
        EditIntent::Move {
            source: 2,
            destination: Some(0),
        },
    ];

    for intent in script {
        editor.apply(intent).unwrap();
        assert!(editor.list().is_consistently_numbered());
    }

    assert_eq!(names(editor.list()), vec!["C", "D", "B"]);
    assert_eq!(orders(editor.list()), vec![Some(1), Some(2), Some(3)]);
    assert_eq!(editor.revision(), 6);
}

#[test]
fn observers_see_applied_changes_only() {
    let mut observer = MockObserver::new();
    observer
        .expect_on_change()
        .withf(|revision, intent, list| {
            *revision == 1
                && matches!(intent, EditIntent::Move { .. })
                && list.is_consistently_numbered()
        })
        .times(1)
        .return_const(());

    let mut editor =
        RecipientEditor::new(sequential_list(&["A", "B", "C"]), EditorConfig::default());
    editor.subscribe(Box::new(observer));

    let cancelled = editor
        .apply(EditIntent::Move {
            source: 0,
            destination: None,
        })
        .unwrap();
    assert_eq!(cancelled, EditOutcome::Unchanged);

    let moved = editor
        .apply(EditIntent::Move {
            source: 0,
            destination: Some(2),
        })
        .unwrap();
    assert_eq!(moved, EditOutcome::Applied { revision: 1 });

    let ignored = editor
        .apply(EditIntent::ManualOrder {
            index: 0,
            value: "not a number".into(),
        })
        .unwrap();
    assert_eq!(ignored, EditOutcome::Unchanged);
}
