use list_reconciler::types::Record;
use list_reconciler::{ModelChange, Reconciler};
use std::cell::RefCell;
use std::rc::Rc;

use crate::helpers::{fixture_model, keys};

fn observe(m: &mut list_reconciler::VecModel) -> Rc<RefCell<Vec<ModelChange>>> {
    let log = Rc::new(RefCell::new(vec![]));
    let l = Rc::clone(&log);
    m.subscribe(move |c| l.borrow_mut().push(c.clone()));
    log
}

#[test]
fn test_find_or_insert_emits_single_move() {
    let mut m = fixture_model();
    let log = observe(&mut m);
    Reconciler::default()
        .find_or_insert("input", 3, 0, &mut m, Record::new())
        .unwrap();
    assert_eq!(
        *log.borrow(),
        vec![ModelChange::Moved {
            from: 2,
            to: 0,
            len: 1
        }]
    );
    assert_eq!(keys(&m), vec!["input[3]", "input[1]", "output[2]"]);
}

#[test]
fn test_in_place_emits_nothing() {
    let mut m = fixture_model();
    let log = observe(&mut m);
    Reconciler::default()
        .find_or_insert("input", 1, 0, &mut m, Record::new())
        .unwrap();
    assert!(log.borrow().is_empty());
}

#[test]
fn test_truncate_emits_removals_then_field_changes() {
    let mut m = fixture_model();
    let log = observe(&mut m);
    Reconciler::default()
        .truncate_and_mark_last(&mut m, 1)
        .unwrap();
    assert_eq!(
        *log.borrow(),
        vec![
            ModelChange::Removed { pos: 1 },
            ModelChange::Removed { pos: 1 },
            ModelChange::FieldChanged {
                pos: 0,
                field: "last".into()
            },
        ]
    );

    // marking again doesn't change any values
    log.borrow_mut().clear();
    Reconciler::default().mark_last(&mut m).unwrap();
    assert!(log.borrow().is_empty());
}
