use std::collections::LinkedList;
use std::collections::VecDeque;

use chain_hash::Failure;
use chain_hash::HashMap;
use chain_hash::HashSet;
use chain_hash::Hashtable;
use chain_hash::TypeToken;
use chain_hash::Value;
use chain_hash::algorithms;
use chain_hash::collection::Associative;
use chain_hash::collection::Collection;
use chain_hash::collection::Container;
use chain_hash::collection::Sequence;
use chain_hash::views::checked::CheckedCollection;
use chain_hash::views::checked::CheckedList;
use chain_hash::views::constant::Copies;
use chain_hash::views::constant::EmptyCollection;
use chain_hash::views::read_only::ReadOnlyCollection;
use chain_hash::views::read_only::ReadOnlyList;
use chain_hash::views::read_only::ReadOnlyMap;
use chain_hash::views::synchronized::SynchronizedMap;

#[test]
fn read_only_set_rejects_add_and_keeps_contents() {
    let set: HashSet<i32> = [1, 2, 3].into_iter().collect();
    let mut view = ReadOnlyCollection::new(&set);

    assert_eq!(view.add(Some(4)), Err(Failure::MutationRejected));
    assert_eq!(view.remove_item(&Some(1)), Err(Failure::MutationRejected));
    assert_eq!(view.clear(), Err(Failure::MutationRejected));
    assert_eq!(view.len(), 3);
    assert!(view.contains(&Some(2)));
    assert_eq!(set.len(), 3);
}

#[test]
fn read_only_map_sees_backing_map() {
    let mut map: HashMap<i32, &str> = HashMap::new();
    map.insert(1, "a");
    map.insert(None, "null");

    {
        let mut view = ReadOnlyMap::new(&map);
        assert_eq!(view.get(&None), Some(&"null"));
        assert_eq!(view.put(Some(2), "b"), Err(Failure::MutationRejected));
        assert_eq!(view.remove_key(&Some(1)), Err(Failure::MutationRejected));
        assert_eq!(view.entries().count(), 2);
    }

    map.insert(2, "b");
    let view = ReadOnlyMap::new(&map);
    assert_eq!(view.len(), 3);
    assert!(view.contains_value(&"b"));
}

#[test]
fn checked_views_are_all_or_nothing() {
    let mut deque: VecDeque<Value> = VecDeque::new();
    {
        let mut view = CheckedCollection::new(&mut deque, TypeToken::of::<i32>());
        let batch = [Value::from(1), Value::from(2), Value::from("x")];
        assert!(matches!(view.add_all(batch), Err(Failure::TypeMismatch { .. })));
        assert!(view.is_empty());
        assert_eq!(view.add_all([Value::from(1), Value::from(2)]), Ok(true));
    }
    assert_eq!(deque.len(), 2);

    let mut linked: LinkedList<Value> = deque.into_iter().collect();
    let mut view = CheckedList::new(&mut linked, TypeToken::of::<i32>());
    assert!(view.insert_at(1, Value::from(1i64)).is_err());
    assert_eq!(view.insert_at(1, Value::from(9)), Ok(()));
    assert_eq!(view.at(1), Ok(&Value::from(9)));
    assert_eq!(view.len(), 3);
}

#[test]
fn hashtable_rejects_nulls_from_any_source() {
    let table: Hashtable<i32, i32> = Hashtable::new();
    assert_eq!(table.put(None, 1), Err(Failure::IllegalNull));
    assert_eq!(table.put(1, None), Err(Failure::IllegalNull));
    assert_eq!(table.put(1, 1), Ok(None));

    let mut map: HashMap<i32, i32> = (10..20).map(|i| (i, i)).collect();
    map.insert(None, 0);
    assert_eq!(table.put_all(&map), Err(Failure::IllegalNull));
    assert_eq!(table.len(), 1);

    map.remove(None);
    assert_eq!(table.put_all(&map), Ok(()));
    assert_eq!(table.len(), 11);
    assert_eq!(table.get(&15), Some(15));
}

#[test]
fn synchronized_map_wraps_any_associative() {
    let shared = SynchronizedMap::new(HashMap::<&str, i32>::new());
    assert_eq!(shared.put(Some("a"), 1), Ok(None));
    assert_eq!(shared.put(None, 2), Ok(None));
    assert_eq!(shared.get(&None), Some(2));

    let keys = shared.key_set();
    assert!(keys.contains(&Some("a")));
    assert_eq!(keys.remove(&Some("a")), Ok(true));
    assert_eq!(shared.len(), 1);
}

#[test]
fn algorithms_pick_strategy_by_access() {
    let mut vec = vec![1, 2, 3, 4, 5];
    let mut linked: LinkedList<i32> = vec.iter().copied().collect();

    algorithms::rotate(&mut vec, 2).unwrap();
    algorithms::rotate(&mut linked, 2).unwrap();
    assert_eq!(vec, vec![4, 5, 1, 2, 3]);
    assert_eq!(linked.iter().copied().collect::<Vec<_>>(), vec);

    algorithms::rotate(&mut vec, -7).unwrap();
    assert_eq!(vec, vec![1, 2, 3, 4, 5]);

    assert_eq!(algorithms::binary_search(&vec, &4), 3);
    let linked: LinkedList<i32> = vec.iter().copied().collect();
    assert_eq!(algorithms::binary_search(&linked, &4), 3);
    assert_eq!(algorithms::binary_search(&linked, &0), -1);
    assert_eq!(algorithms::binary_search(&vec, &9), -6);

    let needle: VecDeque<i32> = VecDeque::from([3, 4]);
    assert_eq!(algorithms::index_of_sub_list(&linked, &needle), 2);
    assert_eq!(algorithms::index_of_sub_list(&vec, &needle), 2);
    assert_eq!(algorithms::last_index_of_sub_list(&vec, &vec![9]), -1);
}

#[test]
fn algorithms_respect_read_only_views() {
    let mut vec = vec![3, 1, 2];
    {
        let mut view = ReadOnlyList::new(&vec);
        assert_eq!(algorithms::sort(&mut view), Err(Failure::MutationRejected));
        assert_eq!(algorithms::max(&view), Ok(&3));
        assert_eq!(algorithms::frequency(&view, &1), 1);
    }
    algorithms::sort(&mut vec).unwrap();
    assert_eq!(vec, vec![1, 2, 3]);
}

#[test]
fn constant_containers_interoperate() {
    let copies = Copies::new(3, 7);
    let empty: EmptyCollection<i32> = EmptyCollection::new();

    let mut target = vec![0; 3];
    algorithms::copy(&mut target, &copies).unwrap();
    assert_eq!(target, vec![7, 7, 7]);

    assert!(algorithms::disjoint(&copies, &empty));
    assert_eq!(algorithms::min(&empty), Err(Failure::NoSuchElement));
    assert_eq!(algorithms::index_of_sub_list(&target, &copies), 0);
}
