use crate::ChampMap;

#[test]
fn default_is_empty() {
    let map: ChampMap<String, i32> = ChampMap::default();
    assert!(map.is_empty());
}

#[test]
fn debug_does_not_panic() {
    let map = ChampMap::new().set("a", 1);
    let rendered = format!("{map:?}");
    assert!(rendered.contains("ChampMap"));
}

#[test]
fn from_iterator_collects_all_pairs() {
    let map: ChampMap<i32, i32> = (0..100).map(|i| (i, i * 2)).collect();
    assert_eq!(map.len(), 100);
    for i in 0..100 {
        assert_eq!(map.get(&i), Some(&(i * 2)));
    }
}

#[test]
fn extend_adds_to_existing_map() {
    let mut map = ChampMap::new().set(1, "one");
    map.extend([(2, "two"), (3, "three")]);
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&2), Some(&"two"));
}

#[test]
fn index_returns_value() {
    let map = ChampMap::new().set("k", 42);
    assert_eq!(map[&"k"], 42);
}

#[test]
#[should_panic(expected = "key not found")]
fn index_panics_on_missing_key() {
    let map: ChampMap<&str, i32> = ChampMap::new();
    let _ = map[&"missing"];
}

#[test]
fn into_iterator_over_reference() {
    let map = ChampMap::new().set(1, 10).set(2, 20);
    let mut pairs: Vec<(i32, i32)> = (&map).into_iter().map(|(k, v)| (*k, *v)).collect();
    pairs.sort_unstable();
    assert_eq!(pairs, vec![(1, 10), (2, 20)]);
}

#[test]
fn equal_maps_compare_equal_regardless_of_insertion_order() {
    let a = ChampMap::new().set("x", 1).set("y", 2);
    let b = ChampMap::new().set("y", 2).set("x", 1);
    assert_eq!(a, b);
}

#[test]
fn maps_with_different_values_compare_unequal() {
    let a = ChampMap::new().set("x", 1);
    let b = ChampMap::new().set("x", 2);
    assert_ne!(a, b);
}

#[test]
fn maps_of_different_length_compare_unequal() {
    let a = ChampMap::new().set("x", 1);
    let b = ChampMap::new().set("x", 1).set("y", 2);
    assert_ne!(a, b);
}
