use super::*;
use crate::test_helpers::test_rng;
use crate::testing::counting_alloc::CountingAlloc;
use crate::testing::crash_test::{CrashTestDummy, Panic};
use crate::testing::rng::DeterministicRng;
use crate::{FnComparator, ReverseComparator};
use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use proptest::prelude::*;
use rand::Rng;
use rstest::rstest;
use std::collections::hash_map::DefaultHasher;
use std::panic::{catch_unwind, AssertUnwindSafe};

fn assert_strictly_ascending<T: Ord + Debug>(values: &[T]) {
    for pair in values.windows(2) {
        assert!(pair[0] < pair[1], "{:?} is not less than {:?}", pair[0], pair[1]);
    }
}

fn counted<T: Ord>(alloc: &CountingAlloc) -> SvSet<T, OrdComparator, CountingAlloc> {
    SvSet::new_in(OrdComparator, alloc.clone())
}

fn rand_data(len: usize) -> Vec<u32> {
    let mut rng = DeterministicRng::new();
    Vec::from_iter((0..len).map(|_| rng.next()))
}

#[test]
fn test_new_is_empty() {
    let set: SvSet<i32> = SvSet::new();
    assert_eq!(set.len(), 0);
    assert_eq!(set.capacity(), 0);
    assert!(set.is_empty());
    assert_eq!(set.first(), None);
    assert_eq!(set.last(), None);
    assert_eq!(set.find(&0), None);
    assert_eq!(set.iter().next(), None);
}

#[test]
fn test_insert_into_full_set_doubles_capacity() {
    let mut set = SvSet::from_ordered_unique(&[1, 2, 3, 4, 5, 7, 8, 9, 10]);
    assert_eq!(set.len(), 9);
    assert_eq!(set.capacity(), 9);

    assert_eq!(set.insert(6), (5, true));
    assert_eq!(set.capacity(), 18);
    assert_eq!(set.as_slice(), [1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    assert_eq!(set[5], 6);

    assert_eq!(set.insert(5), (4, false));
    assert_eq!(set.len(), 10);
    assert_eq!(set.capacity(), 18);
}

#[rstest]
#[case::begin(0, 0)]
#[case::middle(25, 2)]
#[case::end(100, 5)]
fn test_insert_without_reallocation(#[case] value: i32, #[case] index: usize) {
    let mut set = SvSet::from_ordered_unique(&[10, 20, 30, 40, 50]);
    set.reserve(20);
    let buffer = set.as_slice().as_ptr();

    assert_eq!(set.insert(value), (index, true));
    assert_eq!(set.capacity(), 20);
    assert_eq!(set.as_slice().as_ptr(), buffer);
    assert_eq!(set.len(), 6);
    assert_eq!(set[index], value);
    assert_strictly_ascending(set.as_slice());
}

#[rstest]
#[case::begin(0, 0)]
#[case::middle(25, 2)]
#[case::end(100, 5)]
fn test_insert_with_reallocation(#[case] value: i32, #[case] index: usize) {
    let mut set = SvSet::from_ordered_unique(&[10, 20, 30, 40, 50]);
    assert_eq!(set.capacity(), 5);

    assert_eq!(set.insert(value), (index, true));
    assert_eq!(set.capacity(), 10);
    assert_eq!(set.len(), 6);
    assert_eq!(set[index], value);
    assert_strictly_ascending(set.as_slice());
}

#[rstest]
#[case::first(10, 0)]
#[case::middle(30, 2)]
#[case::last(50, 4)]
fn test_insert_existing(#[case] value: i32, #[case] index: usize) {
    let mut set = SvSet::from_ordered_unique(&[10, 20, 30, 40, 50]);
    assert_eq!(set.insert(value), (index, false));
    assert_eq!(set.len(), 5);
    assert_eq!(set.capacity(), 5);
}

#[test]
fn test_growth_law() {
    let mut set = SvSet::new();
    for i in 0..100 {
        let (len, cap) = (set.len(), set.capacity());
        let expected = match (len == cap, cap) {
            (true, 0) => 1,
            (true, cap) => cap * 2,
            (false, cap) => cap,
        };
        set.insert(i);
        assert_eq!(set.capacity(), expected);
    }
    assert_eq!(set.capacity(), 128);
}

#[test]
fn test_insert_only_allocates_when_full() {
    let alloc = CountingAlloc::new();
    let mut set = counted(&alloc);
    set.insert(3);
    set.insert(1);
    assert_eq!(alloc.allocations(), 2);

    set.reserve(8);
    assert_eq!(alloc.allocations(), 3);
    for i in 10..16 {
        set.insert(i);
    }
    assert_eq!(alloc.allocations(), 3);
    assert_eq!(alloc.live(), 1);

    drop(set);
    assert_eq!(alloc.live(), 0);
}

#[test]
fn test_zero_sized() {
    let mut set = SvSet::new();
    assert_eq!(set.insert(()), (0, true));
    assert_eq!(set.insert(()), (0, false));
    assert_eq!(set.len(), 1);
    assert_eq!(set.capacity(), 1);
    assert!(set.contains(&()));
    assert_eq!(set.into_iter().count(), 1);
}

#[test]
fn test_erase() {
    let mut set = SvSet::from([1, 2, 3, 4, 5]);

    assert_eq!(set.erase(2), 2);
    assert_eq!(set[2], 4);
    assert_eq!(set.as_slice(), [1, 2, 4, 5]);
    assert_eq!(set.capacity(), 5);

    let last = set.len() - 1;
    assert_eq!(set.erase(last), set.len());
    assert_eq!(set.as_slice(), [1, 2, 4]);

    assert_eq!(set.erase(0), 0);
    assert_eq!(set.first(), Some(&2));
}

#[test]
fn test_erase_drops_once() {
    let a = CrashTestDummy::new(0);
    let b = CrashTestDummy::new(1);
    let c = CrashTestDummy::new(2);
    let mut set = SvSet::new();
    set.insert(a.spawn(Panic::Never));
    set.insert(b.spawn(Panic::Never));
    set.insert(c.spawn(Panic::Never));

    set.erase(1);
    assert_eq!(a.dropped(), 0);
    assert_eq!(b.dropped(), 1);
    assert_eq!(c.dropped(), 0);
    assert_eq!(set[1].id(), 2);

    drop(set);
    assert_eq!(a.dropped(), 1);
    assert_eq!(b.dropped(), 1);
    assert_eq!(c.dropped(), 1);
}

#[test]
#[should_panic(expected = "removal index (is 3) should be < len (is 3)")]
fn test_erase_out_of_bounds() {
    let mut set = SvSet::from([1, 2, 3]);
    set.erase(3);
}

#[test]
fn test_remove_and_take() {
    let mut set = SvSet::from(["a".to_string(), "b".to_string(), "c".to_string()]);

    assert!(set.contains("b"));
    assert_eq!(set.get("c").map(String::as_str), Some("c"));
    assert!(set.remove("b"));
    assert!(!set.remove("b"));
    assert_eq!(set.take("a"), Some("a".to_string()));
    assert_eq!(set.take("a"), None);
    assert_eq!(set.len(), 1);
}

#[test]
fn test_first_last() {
    let mut a = SvSet::new();
    assert_eq!(a.first(), None);
    assert_eq!(a.last(), None);
    a.insert(1);
    assert_eq!(a.first(), Some(&1));
    assert_eq!(a.last(), Some(&1));
    a.insert(2);
    assert_eq!(a.first(), Some(&1));
    assert_eq!(a.last(), Some(&2));
    for i in 3..=12 {
        a.insert(i);
    }
    assert_eq!(a.first(), Some(&1));
    assert_eq!(a.last(), Some(&12));
    assert_eq!(a.pop_first(), Some(1));
    assert_eq!(a.pop_last(), Some(12));
    assert_eq!(a.pop_first(), Some(2));
    assert_eq!(a.pop_last(), Some(11));
    assert_eq!(a.clone().pop_last(), Some(10));
    assert_eq!(a.len(), 8);
    while a.pop_first().is_some() {}
    assert_eq!(a.pop_first(), None);
    assert_eq!(a.pop_last(), None);
}

#[test]
fn test_reserve() {
    let mut set = SvSet::from([1, 2, 3]);

    set.reserve(2);
    assert_eq!(set.capacity(), 3);

    set.reserve(3);
    assert_eq!(set.capacity(), 3);

    set.reserve(10);
    assert_eq!(set.capacity(), 10);
    assert_eq!(set.as_slice(), [1, 2, 3]);

    let mut empty: SvSet<u8> = SvSet::new();
    empty.reserve(4);
    assert_eq!(empty.capacity(), 4);
    assert!(empty.is_empty());
}

#[test]
fn test_shrink_to_fit() {
    let alloc = CountingAlloc::new();
    let mut set = counted(&alloc);
    set.extend([5, 4, 3]);
    assert_eq!(set.capacity(), 4);

    set.shrink_to_fit();
    assert_eq!(set.capacity(), 3);
    assert_eq!(set.as_slice(), [3, 4, 5]);

    // already tight, nothing to do
    let allocations = alloc.allocations();
    set.shrink_to_fit();
    assert_eq!(alloc.allocations(), allocations);

    set.clear();
    set.shrink_to_fit();
    assert_eq!(set.capacity(), 0);
    assert_eq!(alloc.live(), 0);
}

#[test]
fn test_try_reserve_errors_leave_set_unchanged() {
    let alloc = CountingAlloc::new();
    let mut set = counted(&alloc);
    set.extend([1u32, 2, 3]);
    let before = set.as_slice().as_ptr();

    assert_eq!(set.try_reserve(usize::MAX), Err(TryReserveError::CapacityOverflow));

    alloc.fail_after(0);
    match set.try_reserve(10) {
        Err(TryReserveError::AllocError { layout }) => assert_eq!(layout.size(), 40),
        other => panic!("unexpected {other:?}"),
    }
    assert!(set.try_shrink_to_fit().is_err());

    assert_eq!(set.as_slice(), [1, 2, 3]);
    assert_eq!(set.capacity(), 4);
    assert_eq!(set.as_slice().as_ptr(), before);
    assert_eq!(alloc.live(), 1);
}

#[test]
fn test_try_insert_failure_hands_value_back() {
    let alloc = CountingAlloc::new();
    let mut set = counted(&alloc);
    set.extend(["b".to_string(), "d".to_string()]);
    assert_eq!(set.len(), set.capacity());

    alloc.fail_after(0);
    let err = set.try_insert("c".to_string()).unwrap_err();
    assert!(matches!(err.error, TryReserveError::AllocError { .. }));
    let bytes = 4 * core::mem::size_of::<String>();
    assert_eq!(
        err.to_string(),
        format!("failed to insert value: memory allocation of {bytes} bytes failed")
    );
    assert_eq!(err.into_value(), "c");
    assert_eq!(set.as_slice(), ["b", "d"]);
    assert_eq!(set.capacity(), 2);

    // an equivalent value is found without growing
    assert_eq!(set.try_insert("d".to_string()).unwrap(), (1, false));

    alloc.stop_failing();
    assert_eq!(set.try_insert("c".to_string()).unwrap(), (1, true));
    assert_eq!(set.capacity(), 4);
    assert_eq!(alloc.live(), 1);
}

#[test]
fn test_error_messages() {
    assert_eq!(TryReserveError::CapacityOverflow.to_string(), "capacity overflow");
}

#[test]
fn test_find_and_clear() {
    let a = CrashTestDummy::new(0);
    let b = CrashTestDummy::new(1);
    let mut set = SvSet::new();
    set.insert(b.spawn(Panic::Never));
    set.insert(a.spawn(Panic::Never));
    set.reserve(8);

    assert_eq!(set.find(&a.spawn(Panic::Never)), Some(0));
    assert_eq!(set.find(&b.spawn(Panic::Never)), Some(1));
    // the probes above were dropped too
    assert_eq!(a.dropped(), 1);
    assert_eq!(b.dropped(), 1);

    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.capacity(), 8);
    assert_eq!(a.dropped(), 2);
    assert_eq!(b.dropped(), 2);

    let set = SvSet::from([10, 20]);
    assert_eq!(set.find(&15), None);
    assert_eq!(set.get_index(2), None);
}

#[test]
fn test_swap() {
    let mut x = SvSet::from([1, 2, 3]);
    let mut y = SvSet::from([7]);
    y.reserve(4);
    let x_buffer = x.as_slice().as_ptr();

    x.swap(&mut y);
    assert_eq!(x.as_slice(), [7]);
    assert_eq!(x.capacity(), 4);
    assert_eq!(y.as_slice(), [1, 2, 3]);
    assert_eq!(y.capacity(), 3);
    // elements did not move, they now belong to the other set
    assert_eq!(y.as_slice().as_ptr(), x_buffer);
}

#[test]
fn test_reverse_comparator() {
    let mut set = SvSet::with_comparator(ReverseComparator);
    for i in 1..=5 {
        set.insert(i);
    }
    assert_eq!(set.as_slice(), [5, 4, 3, 2, 1]);
    assert_eq!(set.find(&2), Some(3));
    assert_eq!(set.insert(0), (5, true));
    assert_eq!(set.rank(&6), Err(0));
}

#[test]
fn test_iter_min_max_follow_ord() {
    let set = SvSet::from_ordered_unique_with(&[9, 4, 1], ReverseComparator);
    assert_eq!(set.iter().min(), Some(&1));
    assert_eq!(set.iter().max(), Some(&9));
    // the comparator's extremes are at the ends
    assert_eq!(set.first(), Some(&9));
    assert_eq!(set.last(), Some(&1));
}

#[test]
fn test_float_comparator() {
    let mut set = SvSet::with_comparator(FnComparator(f64::total_cmp));
    set.insert(0.5);
    set.insert(-2.0);
    set.insert(3.25);
    assert_eq!(set.insert(0.5), (1, false));
    assert_eq!(set.as_slice(), [-2.0, 0.5, 3.25]);

    // a positive NaN sorts above every number under a total order
    let nan = f64::NAN.copysign(1.0);
    assert_eq!(set.insert(nan), (3, true));
    assert!(set.contains(&nan));
    assert_eq!(set.insert(nan), (3, false));
}

#[test]
fn test_move_leaves_source_empty() {
    let mut src = SvSet::from_ordered_unique(&[1, 2, 3]);
    let buffer = src.as_slice().as_ptr();

    let dst = core::mem::take(&mut src);
    assert!(src.is_empty());
    assert_eq!(src.capacity(), 0);
    assert_eq!(dst.as_slice(), [1, 2, 3]);
    assert_eq!(dst.as_slice().as_ptr(), buffer);
}

#[test]
fn test_clone_eq() {
    let mut m = SvSet::new();
    m.insert(1);
    m.insert(2);
    m.reserve(16);

    let c = m.clone();
    assert_eq!(c, m);
    assert_eq!(c.capacity(), 2);

    let mut d = SvSet::from([9, 8, 7, 6, 5]);
    d.clone_from(&m);
    assert_eq!(d, m);
    assert_eq!(d.capacity(), 2);
}

#[test]
fn test_clone_panic_leaks_nothing() {
    let a = CrashTestDummy::new(0);
    let b = CrashTestDummy::new(1);
    let c = CrashTestDummy::new(2);
    let alloc = CountingAlloc::new();
    let mut set = counted(&alloc);
    set.insert(a.spawn(Panic::Never));
    set.insert(b.spawn(Panic::InClone));
    set.insert(c.spawn(Panic::Never));
    let (len, cap) = (set.len(), set.capacity());

    catch_unwind(AssertUnwindSafe(|| drop(set.clone()))).unwrap_err();

    assert_eq!(a.cloned(), 1);
    assert_eq!(b.cloned(), 1);
    assert_eq!(c.cloned(), 0);
    // the clone of `a` was dropped along with the half-built copy
    assert_eq!(a.dropped(), 1);
    assert_eq!(b.dropped(), 0);
    assert_eq!(c.dropped(), 0);
    assert_eq!((set.len(), set.capacity()), (len, cap));
    assert_eq!(alloc.live(), 1);

    drop(set);
    assert_eq!(a.dropped(), 2);
    assert_eq!(b.dropped(), 1);
    assert_eq!(c.dropped(), 1);
    assert_eq!(alloc.live(), 0);
}

#[test]
fn test_clone_from_panic_keeps_receiver() {
    let a = CrashTestDummy::new(0);
    let b = CrashTestDummy::new(1);
    let x = CrashTestDummy::new(10);
    let mut source = SvSet::new();
    source.insert(a.spawn(Panic::Never));
    source.insert(b.spawn(Panic::InClone));
    let mut receiver = SvSet::new();
    receiver.insert(x.spawn(Panic::Never));
    receiver.reserve(5);
    let buffer = receiver.as_slice().as_ptr();

    catch_unwind(AssertUnwindSafe(|| receiver.clone_from(&source))).unwrap_err();

    assert_eq!(receiver.len(), 1);
    assert_eq!(receiver.capacity(), 5);
    assert_eq!(receiver.as_slice().as_ptr(), buffer);
    assert_eq!(receiver[0].id(), 10);
    assert_eq!(x.dropped(), 0);
    assert_eq!(a.dropped(), 1);
}

#[test]
fn test_bulk_construction_panic() {
    let a = CrashTestDummy::new(0);
    let b = CrashTestDummy::new(1);
    let c = CrashTestDummy::new(2);
    let values = [a.spawn(Panic::Never), b.spawn(Panic::Never), c.spawn(Panic::InClone)];

    catch_unwind(AssertUnwindSafe(|| SvSet::from_ordered_unique(&values))).unwrap_err();

    assert_eq!(a.cloned(), 1);
    assert_eq!(b.cloned(), 1);
    assert_eq!(c.cloned(), 1);
    assert_eq!(a.dropped(), 1);
    assert_eq!(b.dropped(), 1);
    assert_eq!(c.dropped(), 0);
}

#[test]
fn test_get_or_insert_with_panic_during_growth() {
    let alloc = CountingAlloc::new();
    let mut set: SvSet<String, _, _> = counted(&alloc);
    set.extend(["a".to_string(), "c".to_string()]);
    let buffer = set.as_slice().as_ptr();
    let allocations = alloc.allocations();

    catch_unwind(AssertUnwindSafe(|| {
        set.get_or_insert_with("b", |_| panic!("construction failed"));
    }))
    .unwrap_err();

    // the bigger buffer had already been obtained, and was released again
    assert_eq!(alloc.allocations(), allocations + 1);
    assert_eq!(alloc.live(), 1);
    assert_eq!(set.as_slice(), ["a", "c"]);
    assert_eq!(set.capacity(), 2);
    assert_eq!(set.as_slice().as_ptr(), buffer);

    assert_eq!(set.get_or_insert_with("b", str::to_string), (1, true));
    assert_eq!(set.as_slice(), ["a", "b", "c"]);
}

#[test]
#[should_panic(expected = "not equivalent")]
fn test_get_or_insert_with_mismatched_value() {
    let mut set: SvSet<String> = SvSet::new();
    set.get_or_insert_with("key", |_| "other".to_string());
}

#[test]
fn test_invalidation_boundary() {
    let mut set: SvSet<i32> = (0..10).map(|i| i * 10).collect();
    set.reserve(20);
    let before: Vec<_> = (0..5).map(|i| set[i]).collect();

    let (index, inserted) = set.insert(45);
    assert!(inserted);
    assert_eq!(index, 5);

    for (i, value) in before.iter().enumerate() {
        assert_eq!(&set[i], value);
    }
    // positions at and after the insertion point are re-derived
    assert_eq!(set.find(&45), Some(5));
    assert_eq!(set.find(&50), Some(6));
    assert_eq!(set.find(&90), Some(10));
}

#[test]
fn test_retain() {
    let mut set = SvSet::from([1, 2, 3, 4, 5, 6]);
    set.retain(|&k| k % 2 == 0);
    assert_eq!(set.as_slice(), [2, 4, 6]);
    assert_eq!(set.capacity(), 6);
}

#[test]
fn test_retain_drop_panic_leak() {
    let a = CrashTestDummy::new(0);
    let b = CrashTestDummy::new(1);
    let c = CrashTestDummy::new(2);
    let mut set = SvSet::new();
    set.insert(a.spawn(Panic::Never));
    set.insert(b.spawn(Panic::InDrop));
    set.insert(c.spawn(Panic::Never));

    catch_unwind(AssertUnwindSafe(|| set.retain(|dummy| dummy.query(false)))).unwrap_err();

    assert_eq!(a.queried(), 1);
    assert_eq!(b.queried(), 1);
    assert_eq!(c.queried(), 0);
    assert_eq!(a.dropped(), 1);
    assert_eq!(b.dropped(), 1);
    assert_eq!(c.dropped(), 0);
    assert_eq!(set.len(), 1);
    assert_eq!(set[0].id(), 2);
}

#[test]
fn test_retain_pred_panic_leak() {
    let a = CrashTestDummy::new(0);
    let b = CrashTestDummy::new(1);
    let c = CrashTestDummy::new(2);
    let mut set = SvSet::new();
    set.insert(a.spawn(Panic::Never));
    set.insert(b.spawn(Panic::InQuery));
    set.insert(c.spawn(Panic::InQuery));

    catch_unwind(AssertUnwindSafe(|| set.retain(|dummy| dummy.query(false)))).unwrap_err();

    assert_eq!(a.queried(), 1);
    assert_eq!(b.queried(), 1);
    assert_eq!(c.queried(), 0);
    assert_eq!(a.dropped(), 1);
    assert_eq!(b.dropped(), 0);
    assert_eq!(c.dropped(), 0);
    assert_eq!(set.len(), 2);
    assert_eq!(set.first().unwrap().id(), 1);
    assert_eq!(set.last().unwrap().id(), 2);
}

#[test]
fn test_into_iter_drops_remainder() {
    let a = CrashTestDummy::new(0);
    let b = CrashTestDummy::new(1);
    let c = CrashTestDummy::new(2);
    let alloc = CountingAlloc::new();
    let mut set = counted(&alloc);
    set.insert(a.spawn(Panic::Never));
    set.insert(b.spawn(Panic::Never));
    set.insert(c.spawn(Panic::Never));

    let mut iter = set.into_iter();
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next_back().map(|d| d.id()), Some(2));
    assert_eq!(c.dropped(), 1);
    drop(iter);

    assert_eq!(a.dropped(), 1);
    assert_eq!(b.dropped(), 1);
    assert_eq!(c.dropped(), 1);
    assert_eq!(alloc.live(), 0);
}

#[test]
fn test_iter() {
    let set = SvSet::from([3, 1, 2]);
    let mut iter = set.iter();
    assert_eq!(iter.size_hint(), (3, Some(3)));
    assert_eq!(iter.next(), Some(&1));
    assert_eq!(iter.next_back(), Some(&3));
    assert_eq!(iter.len(), 1);
    assert_eq!(iter.clone().max(), Some(&2));
    assert_eq!(iter.next(), Some(&2));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);

    let collected: Vec<_> = (&set).into_iter().rev().copied().collect();
    assert_eq!(collected, [3, 2, 1]);
}

#[test]
fn test_from_iter_first_wins() {
    #[derive(Debug)]
    struct Keyed(u32, &'static str);

    impl PartialEq for Keyed {
        fn eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }
    impl Eq for Keyed {}
    impl PartialOrd for Keyed {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for Keyed {
        fn cmp(&self, other: &Self) -> Ordering {
            self.0.cmp(&other.0)
        }
    }

    let set: SvSet<Keyed> =
        [Keyed(2, "x"), Keyed(1, "a"), Keyed(2, "y"), Keyed(1, "b")].into_iter().collect();
    let tags: Vec<_> = set.iter().map(|k| k.1).collect();
    assert_eq!(tags, ["a", "x"]);
    assert_eq!(set.capacity(), 2);
}

#[test]
fn test_from_iter_random() {
    let mut data = rand_data(173);
    let set: SvSet<u32> = data.iter().copied().collect();
    data.sort();
    data.dedup();
    assert_eq!(set.as_slice(), data.as_slice());
    assert!(set.into_iter().eq(data));
}

#[test]
fn test_random_operations_match_model() {
    let mut rng = test_rng();
    let mut set = SvSet::new();
    let mut model = BTreeSet::new();

    for _ in 0..2000 {
        let value: u8 = rng.gen_range(0..64);
        if rng.gen_bool(0.6) {
            let (index, inserted) = set.insert(value);
            assert_eq!(inserted, model.insert(value));
            assert_eq!(set[index], value);
        } else {
            assert_eq!(set.remove(&value), model.remove(&value));
        }
        assert_eq!(set.len(), model.len());
    }
    assert!(set.iter().eq(model.iter()));
}

#[test]
fn test_extend_ref() {
    let mut a = SvSet::new();
    a.insert(1);

    a.extend(&[2, 3, 4]);

    assert_eq!(a.len(), 4);
    assert!(a.contains(&1));
    assert!(a.contains(&4));

    let mut b = SvSet::new();
    b.insert(5);
    b.insert(6);

    a.extend(&b);

    assert_eq!(a.as_slice(), [1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_debug() {
    let set = SvSet::from([2, 1]);
    let empty = SvSet::<i32>::new();

    assert_eq!(format!("{set:?}"), "{1, 2}");
    assert_eq!(format!("{empty:?}"), "{}");
    assert_eq!(format!("{:?}", set.iter()), "Iter([1, 2])");
}

#[test]
fn test_hash_and_order() {
    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    let x = SvSet::from([1, 2, 3]);
    let mut y = SvSet::new();
    y.extend([3, 2, 1]);
    y.reserve(10);

    assert_eq!(x, y);
    assert_eq!(hash_of(&x), hash_of(&y));
    assert!(x < SvSet::from([1, 2, 4]));
    assert!(x > SvSet::from([1, 2]));
}

#[allow(dead_code)]
fn assert_covariance() {
    fn set<'new>(v: SvSet<&'static str>) -> SvSet<&'new str> {
        v
    }
    fn iter<'a, 'new>(v: Iter<'a, &'static str>) -> Iter<'a, &'new str> {
        v
    }
    fn into_iter<'new>(v: IntoIter<&'static str>) -> IntoIter<&'new str> {
        v
    }
}

#[allow(dead_code)]
fn assert_send_sync() {
    fn set<T: Send + Sync>(v: SvSet<T>) -> impl Send + Sync {
        v
    }
    fn into_iter<T: Send + Sync>(v: IntoIter<T>) -> impl Send + Sync {
        v
    }
}

proptest! {
    #[test]
    fn prop_insert_keeps_order_and_uniqueness(values in prop::collection::vec(any::<i16>(), 0..200)) {
        let mut set = SvSet::new();
        for &value in &values {
            let before = set.len();
            let (index, inserted) = set.insert(value);
            prop_assert_eq!(set[index], value);
            prop_assert_eq!(set.len(), before + usize::from(inserted));
        }
        prop_assert!(set.as_slice().windows(2).all(|pair| pair[0] < pair[1]));

        let mut expected = values.clone();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(set.as_slice(), expected.as_slice());
        prop_assert_eq!(&set, &SvSet::from_ordered_unique(&expected));
    }

    #[test]
    fn prop_erase_keeps_order(
        values in prop::collection::vec(any::<u8>(), 1..100),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..20),
    ) {
        let mut set: SvSet<u8> = values.into_iter().collect();
        let capacity = set.capacity();
        for pick in picks {
            if set.is_empty() {
                break;
            }
            let index = pick.index(set.len());
            let next = set.get_index(index + 1).copied();
            prop_assert_eq!(set.erase(index), index);
            prop_assert_eq!(set.get_index(index).copied(), next);
        }
        prop_assert!(set.as_slice().windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(set.capacity(), capacity);
    }
}
