use list_reconciler::types::{Record, Value};
use list_reconciler::{
    Config, ListModel, ReconcileError, Reconciled, Reconciler, find_or_insert, mark_last,
    truncate_and_mark_last,
};

use crate::helpers::{fixture_model, keys, lasts, model, record};

#[test]
fn test_move_existing_record_to_front() {
    let mut m = model(
        "[{itemType: A, itemIndex: 1}, {itemType: B, itemIndex: 2}, {itemType: A, itemIndex: 3}]",
    );
    find_or_insert("A", 3, 0, &mut m, Record::new()).unwrap();
    assert_eq!(keys(&m), vec!["A[3]", "A[1]", "B[2]"]);
}

#[test]
fn test_append_new_record_with_extra() {
    let mut m = model("[{itemType: A, itemIndex: 1}]");
    find_or_insert("B", 9, 1, &mut m, record("{extra: true}")).unwrap();
    assert_eq!(
        m.records(),
        &[
            record("{itemType: A, itemIndex: 1}"),
            record("{itemType: B, itemIndex: 9, extra: true}"),
        ]
    );
}

#[test]
fn test_truncate_five_to_three() {
    let mut m = model("[{}, {}, {}, {}, {}]");
    truncate_and_mark_last(&mut m, 3).unwrap();
    assert_eq!(m.count(), 3);
    assert_eq!(lasts(&m), vec![false, false, true]);
}

#[test]
fn test_out_of_range_leaves_model_untouched() {
    let mut m = fixture_model();
    let before = m.records().to_vec();
    let e = find_or_insert("input", 9, 4, &mut m, Record::new()).unwrap_err();
    assert!(matches!(
        e,
        ReconcileError::OutOfRange {
            position: 4,
            count: 3,
            ..
        }
    ));
    assert_eq!(m.records(), before.as_slice());
}

/// Rebuilds the fixture list in a new order, the way a view refresh walks its source items.
#[test]
fn test_reconcile_full_refresh() {
    let r = Reconciler::default();
    let mut m = fixture_model();
    let wanted = [("output", 2), ("input", 3), ("input", 4)];
    for (pos, (t, i)) in wanted.iter().enumerate() {
        r.find_or_insert(t, *i, pos, &mut m, record("{label: new}"))
            .unwrap();
    }
    r.truncate_and_mark_last(&mut m, wanted.len()).unwrap();

    assert_eq!(keys(&m), vec!["output[2]", "input[3]", "input[4]"]);
    assert_eq!(lasts(&m), vec![false, false, true]);
    // existing records keep their fields, new ones get the extra fields
    let labels = m
        .records()
        .iter()
        .map(|r| r.get("label").and_then(Value::as_str).unwrap_or_default())
        .collect::<Vec<_>>();
    assert_eq!(labels, vec!["y", "z", "new"]);
}

#[test]
fn test_repeated_refresh_is_stable() {
    let r = Reconciler::default();
    let mut m = fixture_model();
    let wanted = [("input", 3), ("output", 2)];
    let mut results = vec![];
    for _ in 0..2 {
        for (pos, (t, i)) in wanted.iter().enumerate() {
            results.push(r.find_or_insert(t, *i, pos, &mut m, Record::new()).unwrap());
        }
        r.truncate_and_mark_last(&mut m, wanted.len()).unwrap();
    }
    assert_eq!(
        results,
        vec![
            Reconciled::Moved { from: 2 },
            Reconciled::Moved { from: 2 },
            Reconciled::InPlace,
            Reconciled::InPlace,
        ]
    );
    assert_eq!(keys(&m), vec!["input[3]", "output[2]"]);
}

#[test]
fn test_count_grows_by_at_most_one() {
    let r = Reconciler::default();
    let mut m = fixture_model();
    for (t, i, s) in [
        ("input", 1, 0),
        ("input", 1, 2),
        ("x", 0, 1),
        ("output", 2, 4),
    ] {
        let before = m.count();
        let res = r.find_or_insert(t, i, s, &mut m, Record::new()).unwrap();
        let grown = m.count() - before;
        assert_eq!(
            grown,
            usize::from(res == Reconciled::Inserted),
            "{t}[{i}] at {s}"
        );
        assert_eq!(m.get(s).unwrap().item_type(r.config()), Some(t));
    }
}

#[test]
fn test_mark_last_with_configured_field() {
    let c = Config::from_yaml_str("last_field: isLast").unwrap();
    let r = Reconciler::new(c);
    let mut m = model("[{}, {}]");
    r.mark_last(&mut m).unwrap();
    assert_eq!(
        m.records(),
        &[record("{isLast: false}"), record("{isLast: true}")]
    );
    // default field names aren't touched
    mark_last(&mut m).unwrap();
    assert_eq!(
        m.records(),
        &[
            record("{isLast: false, last: false}"),
            record("{isLast: true, last: true}")
        ]
    );
}
