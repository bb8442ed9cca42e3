use crate::ChampMap;

#[test]
fn with_mutations_batches_many_writes() {
    let map = ChampMap::new();
    let map = map.with_mutations(|m| {
        for i in 0..1000 {
            m.set_mut(i, i);
        }
    });

    assert_eq!(map.len(), 1000);
    for i in 0..1000 {
        assert_eq!(map.get(&i), Some(&i));
    }
}

#[test]
fn batch_equivalence_with_plain_folds() {
    let keys: Vec<i32> = (0..500).collect();

    let via_batch = ChampMap::new().with_mutations(|m| {
        for k in &keys {
            m.set_mut(*k, *k * 7);
        }
    });
    let via_plain = keys.iter().fold(ChampMap::new(), |acc, k| acc.set(*k, *k * 7));

    assert_eq!(via_batch, via_plain);
}

#[test]
fn nested_with_mutations_shares_the_outer_batch() {
    let map = ChampMap::new().with_mutations(|m| {
        m.set_mut("a", 1);
        *m = m.with_mutations(|inner| inner.set_mut("b", 2));
    });
    assert_eq!(map.len(), 2);
}

/// After `as_immutable` freezes a transient, further persistent writes on
/// the frozen handle must not be observable through a clone taken before
/// the freeze — interior in-place edits must not leak across the boundary.
#[test]
fn freezing_prevents_edits_from_leaking_into_a_pre_freeze_clone() {
    let transient = ChampMap::new().as_mutable();
    let transient = transient.set("a", 1).set("b", 2);

    let snapshot_before_freeze = transient.clone();
    let frozen = transient.as_immutable();

    let frozen_then_modified = frozen.set("c", 3);

    assert_eq!(snapshot_before_freeze.len(), 2);
    assert_eq!(snapshot_before_freeze.get(&"c"), None);
    assert_eq!(frozen.len(), 2);
    assert_eq!(frozen.get(&"c"), None);
    assert_eq!(frozen_then_modified.len(), 3);
}

#[test]
fn as_mutable_on_an_already_transient_handle_reuses_the_token() {
    let transient = ChampMap::new().as_mutable();
    let still_transient = transient.as_mutable();
    let map = still_transient.set("a", 1);
    assert_eq!(map.len(), 1);
}

#[test]
fn persistent_writes_between_batches_never_share_an_owner() {
    let map = ChampMap::new().set("a", 1);
    let map2 = map.set("b", 2);
    // Two ordinary persistent writes never mutate shared structure in place;
    // this is exercised indirectly through old-handle validity elsewhere,
    // here we just confirm both handles observe their own, correct contents.
    assert_eq!(map.len(), 1);
    assert_eq!(map2.len(), 2);
}
