use std::collections::HashSet;

use crate::ChampMap;

#[test]
fn iter_yields_every_entry_exactly_once() {
    let mut map = ChampMap::new();
    for i in 0..500 {
        map = map.set(i, i * 2);
    }

    let collected: HashSet<(i32, i32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(collected.len(), map.len());
    for i in 0..500 {
        assert!(collected.contains(&(i, i * 2)));
    }
}

#[test]
fn iterate_ascending_matches_iter() {
    let mut map = ChampMap::new();
    for i in 0..200 {
        map = map.set(i, i);
    }

    let mut via_iterate = Vec::new();
    map.iterate(false, |k, v| {
        via_iterate.push((*k, *v));
        true
    });

    let via_iter: Vec<(i32, i32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(via_iterate.len(), via_iter.len());

    let as_set: HashSet<_> = via_iterate.iter().copied().collect();
    let iter_set: HashSet<_> = via_iter.iter().copied().collect();
    assert_eq!(as_set, iter_set);
}

#[test]
fn iterate_reverse_visits_the_same_multiset() {
    let mut map = ChampMap::new();
    for i in 0..200 {
        map = map.set(i, i);
    }

    let mut forward = Vec::new();
    map.iterate(false, |k, v| {
        forward.push((*k, *v));
        true
    });
    let mut backward = Vec::new();
    map.iterate(true, |k, v| {
        backward.push((*k, *v));
        true
    });

    let forward_set: HashSet<_> = forward.into_iter().collect();
    let backward_set: HashSet<_> = backward.into_iter().collect();
    assert_eq!(forward_set, backward_set);
}

#[test]
fn iterate_stops_early_when_callback_returns_false() {
    let mut map = ChampMap::new();
    for i in 0..50 {
        map = map.set(i, i);
    }

    let mut seen = 0;
    let completed = map.iterate(false, |_, _| {
        seen += 1;
        seen < 5
    });

    assert_eq!(seen, 5);
    assert!(!completed);
}

#[test]
fn empty_map_iteration_completes_immediately() {
    let map: ChampMap<i32, i32> = ChampMap::new();
    let mut calls = 0;
    let completed = map.iterate(false, |_, _| {
        calls += 1;
        true
    });
    assert!(completed);
    assert_eq!(calls, 0);
}
