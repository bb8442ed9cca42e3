use crate::{ChampMap, Dynamic};

#[test]
fn merge_last_value_wins() {
    let base = ChampMap::new().merge([[("a", 1), ("b", 2)], [("b", 3), ("c", 4)]]);
    assert_eq!(base.len(), 3);
    assert_eq!(base.get(&"a"), Some(&1));
    assert_eq!(base.get(&"b"), Some(&3));
    assert_eq!(base.get(&"c"), Some(&4));
}

#[test]
fn merge_with_resolves_conflicts_via_closure() {
    let base = ChampMap::new().set("count", 10);
    let merged = base.merge_with(|existing, incoming| existing + incoming, [[("count", 5)]]);
    assert_eq!(merged.get(&"count"), Some(&15));
}

#[test]
fn merge_with_writes_incoming_when_key_is_new() {
    let base = ChampMap::new().set("a", 1);
    let merged = base.merge_with(|existing, incoming| existing + incoming, [[("b", 2)]]);
    assert_eq!(merged.get(&"a"), Some(&1));
    assert_eq!(merged.get(&"b"), Some(&2));
}

fn leaf_map(pairs: &[(&str, i32)]) -> ChampMap<&'static str, Dynamic<&'static str, i32>> {
    let mut m = ChampMap::new();
    for (k, v) in pairs {
        m = m.set(*k, Dynamic::Leaf(*v));
    }
    m
}

#[test]
fn merge_deep_recurses_into_nested_maps() {
    let inner_a = leaf_map(&[("x", 1)]);
    let inner_b = leaf_map(&[("y", 2)]);

    let base = ChampMap::new().set("a", Dynamic::Map(inner_a));
    let incoming = vec![("a", Dynamic::Map(inner_b))];

    let merged = base.merge_deep([incoming]);
    let Some(Dynamic::Map(a)) = merged.get(&"a") else { panic!("expected nested map") };
    assert_eq!(a.get(&"x"), Some(&Dynamic::Leaf(1)));
    assert_eq!(a.get(&"y"), Some(&Dynamic::Leaf(2)));
}

#[test]
fn merge_deep_replaces_at_non_map_leaves() {
    let base: ChampMap<&str, Dynamic<&str, i32>> = ChampMap::new().set("a", Dynamic::Leaf(1));
    let incoming = vec![("a", Dynamic::Leaf(2))];

    let merged = base.merge_deep([incoming]);
    assert_eq!(merged.get(&"a"), Some(&Dynamic::Leaf(2)));
}

#[test]
fn merge_deep_with_resolves_leaf_collisions() {
    let base: ChampMap<&str, Dynamic<&str, i32>> = ChampMap::new().set("a", Dynamic::Leaf(10));
    let incoming = vec![("a", Dynamic::Leaf(5))];

    let merged = base.merge_deep_with(&|existing: &i32, incoming: &i32| existing + incoming, [incoming]);
    assert_eq!(merged.get(&"a"), Some(&Dynamic::Leaf(15)));
}
