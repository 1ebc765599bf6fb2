//! Array-backed binary min-heap shared by the turn scheduler and the path solver.
//! Slot `i` has its parent at `(i - 1) / 2` and children at `2i + 1` and `2i + 2`.
//! It does not index its items: `decrease_priority` finds its target by linear scan.

use crate::error::HeapError;

pub const INITIAL_CAPACITY: usize = 10;

#[derive(Clone, Debug)]
struct HeapEntry<T> {
    item: T,
    priority: u32,
}

#[derive(Clone, Debug)]
pub struct MinHeap<T> {
    entries: Vec<HeapEntry<T>>,
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        Self { entries: Vec::with_capacity(INITIAL_CAPACITY) }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn insert(&mut self, item: T, priority: u32) {
        if self.entries.len() == self.entries.capacity() {
            let grow_by = self.entries.capacity().max(INITIAL_CAPACITY);
            self.entries.reserve_exact(grow_by);
        }
        self.entries.push(HeapEntry { item, priority });
        self.sift_up(self.entries.len() - 1);
    }

    pub fn peek_min(&self) -> Option<(&T, u32)> {
        self.entries.first().map(|entry| (&entry.item, entry.priority))
    }

    pub fn remove_min(&mut self) -> Result<(T, u32), HeapError> {
        if self.entries.is_empty() {
            return Err(HeapError::Empty);
        }
        let HeapEntry { item, priority } = self.entries.swap_remove(0);
        self.sift_down(0);
        Ok((item, priority))
    }

    /// Lowers the priority of the first item accepted by `matches`.
    ///
    /// The new priority must not exceed the current one; only upward sifting is performed.
    pub fn decrease_priority(
        &mut self,
        new_priority: u32,
        mut matches: impl FnMut(&T) -> bool,
    ) -> Result<(), HeapError> {
        let index = self
            .entries
            .iter()
            .position(|entry| matches(&entry.item))
            .ok_or(HeapError::ItemNotFound)?;
        debug_assert!(new_priority <= self.entries[index].priority);
        self.entries[index].priority = new_priority;
        self.sift_up(index);
        Ok(())
    }

    /// Entries in storage order, not priority order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, u32)> {
        self.entries.iter().map(|entry| (&entry.item, entry.priority))
    }

    /// Empties the heap in storage order without restoring the heap property between items.
    pub fn drain(&mut self) -> impl Iterator<Item = (T, u32)> + '_ {
        self.entries.drain(..).map(|entry| (entry.item, entry.priority))
    }

    pub fn satisfies_heap_property(&self) -> bool {
        (1..self.entries.len())
            .all(|i| self.entries[(i - 1) / 2].priority <= self.entries[i].priority)
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.entries[parent].priority <= self.entries[index].priority {
                break;
            }
            self.entries.swap(parent, index);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && self.entries[right].priority < self.entries[left].priority
            {
                right
            } else {
                left
            };
            if self.entries[smaller].priority >= self.entries[index].priority {
                break;
            }
            self.entries.swap(smaller, index);
            index = smaller;
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn descending_inserts_come_out_ascending() {
        let mut heap = MinHeap::new();
        for priority in (0..10).rev() {
            heap.insert(priority, priority);
        }
        let drained: Vec<u32> =
            (0..10).map(|_| heap.remove_min().expect("ten items were inserted").1).collect();
        assert_eq!(drained, (0..10).collect::<Vec<_>>());
        assert!(heap.is_empty());
    }

    #[test]
    fn remove_min_on_empty_heap_reports_empty() {
        let mut heap: MinHeap<u8> = MinHeap::new();
        assert_eq!(heap.remove_min(), Err(HeapError::Empty));
        assert!(heap.peek_min().is_none());
    }

    #[test]
    fn decrease_priority_moves_item_to_front() {
        let mut heap = MinHeap::new();
        heap.insert('a', 5);
        heap.insert('b', 7);
        heap.insert('c', 9);

        heap.decrease_priority(1, |item| *item == 'c').expect("c is queued");

        assert_eq!(heap.peek_min(), Some((&'c', 1)));
        assert!(heap.satisfies_heap_property());
    }

    #[test]
    fn decrease_priority_of_missing_item_fails() {
        let mut heap = MinHeap::new();
        heap.insert(3_u32, 3);
        assert_eq!(heap.decrease_priority(0, |item| *item == 4), Err(HeapError::ItemNotFound));
        assert_eq!(heap.peek_min(), Some((&3, 3)));
    }

    #[test]
    fn capacity_doubles_and_never_shrinks() {
        let mut heap = MinHeap::new();
        assert!(heap.capacity() >= INITIAL_CAPACITY);
        for i in 0..11 {
            heap.insert(i, i);
        }
        let grown = heap.capacity();
        assert!(grown >= 2 * INITIAL_CAPACITY);
        while heap.remove_min().is_ok() {}
        assert_eq!(heap.capacity(), grown);
    }

    #[test]
    fn equal_priorities_are_all_returned() {
        let mut heap = MinHeap::new();
        for item in ["x", "y", "z"] {
            heap.insert(item, 4);
        }
        let mut seen: Vec<&str> = (0..3).map(|_| heap.remove_min().expect("queued").0).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec!["x", "y", "z"]);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(u32),
        Remove,
        Decrease(usize, u32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0_u32..1_000).prop_map(Op::Insert),
            2 => Just(Op::Remove),
            2 => (0_usize..64, 0_u32..1_000).prop_map(|(slot, by)| Op::Decrease(slot, by)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn heap_property_survives_any_operation_sequence(
            ops in proptest::collection::vec(op_strategy(), 0..200)
        ) {
            let mut heap = MinHeap::new();
            let mut next_id = 0_u32;
            let mut shadow: Vec<(u32, u32)> = Vec::new();

            for op in ops {
                match op {
                    Op::Insert(priority) => {
                        heap.insert(next_id, priority);
                        shadow.push((next_id, priority));
                        next_id += 1;
                    }
                    Op::Remove => {
                        let expected_min = shadow.iter().map(|(_, p)| *p).min();
                        match heap.remove_min() {
                            Ok((id, priority)) => {
                                prop_assert_eq!(Some(priority), expected_min);
                                shadow.retain(|(other, _)| *other != id);
                            }
                            Err(err) => {
                                prop_assert_eq!(err, HeapError::Empty);
                                prop_assert!(shadow.is_empty());
                            }
                        }
                    }
                    Op::Decrease(slot, by) => {
                        if shadow.is_empty() {
                            continue;
                        }
                        let index = slot % shadow.len();
                        let (id, priority) = shadow[index];
                        let lowered = priority.saturating_sub(by);
                        heap.decrease_priority(lowered, |item| *item == id).unwrap();
                        shadow[index].1 = lowered;
                    }
                }
                prop_assert!(heap.satisfies_heap_property());
                prop_assert_eq!(heap.len(), shadow.len());
            }
        }
    }
}
