/*!
A max heap on some subset of elements with fixed indicies.

In other words, a heap backed by a vector of values with a companion vector which tracks the current location of each index on the heap.

The backing vector of values stays constant as indicies move on and off the heap.
This allows the heap to act as a store of activity for every atom, while only unvalued atoms (or, more accurately, at least the unvalued atoms) are active on the heap.

```rust
# use otter_ipasir::generic::index_heap::IndexHeap;
let mut heap = IndexHeap::default();

heap.add(600, 10.0);
heap.add(3, 70.0);

heap.activate(600);
heap.activate(3);

assert_eq!(heap.count(), 601);
assert_eq!(heap.value_at(5), 0.0);

assert_eq!(heap.pop_max(), Some(3));
assert_eq!(heap.pop_max(), Some(600));
assert!(heap.pop_max().is_none());
```
*/

/// The index heap struct.
pub struct IndexHeap<V: PartialOrd + Default + Copy> {
    /// Values, indexed by value index.
    values: Vec<V>,

    /// The position of each value index on the heap, if active.
    position: Vec<Option<usize>>,

    /// The active value indicies, as a binary max heap on their values.
    heap: Vec<usize>,
}

impl<V: PartialOrd + Default + Copy> Default for IndexHeap<V> {
    fn default() -> Self {
        IndexHeap {
            values: Vec::default(),
            position: Vec::default(),
            heap: Vec::default(),
        }
    }
}

impl<V: PartialOrd + Default + Copy> IndexHeap<V> {
    /// Index `value` with `value_index`, growing the structure as required.
    ///
    /// Returns true if `value_index` was a fresh index, false otherwise.
    /// The index is not active on the heap until [activate](IndexHeap::activate) is called.
    pub fn add(&mut self, value_index: usize, value: V) -> bool {
        let fresh = self.values.len() <= value_index;
        if fresh {
            self.values.resize(value_index + 1, V::default());
            self.position.resize(value_index + 1, None);
        }
        self.values[value_index] = value;
        self.heapify_if_active(value_index);
        fresh
    }

    /// Activate `value_index` on the heap.
    ///
    /// Returns true if the index was not already active.
    pub fn activate(&mut self, value_index: usize) -> bool {
        match self.position.get(value_index) {
            Some(None) => {
                let heap_index = self.heap.len();
                self.heap.push(value_index);
                self.position[value_index] = Some(heap_index);
                self.heapify_up(heap_index);
                true
            }
            _ => false,
        }
    }

    /// Remove `value_index` from the heap, if active.
    ///
    /// Returns true if `value_index` was removed.
    pub fn remove(&mut self, value_index: usize) -> bool {
        let Some(Some(heap_index)) = self.position.get(value_index).copied() else {
            return false;
        };

        let last = self.heap.len() - 1;
        self.swap(heap_index, last);
        self.heap.pop();
        self.position[value_index] = None;

        if heap_index < self.heap.len() {
            self.heapify_down(heap_index);
            self.heapify_up(heap_index);
        }
        true
    }

    /// Pop the index with maximum value off the heap.
    pub fn pop_max(&mut self) -> Option<usize> {
        let max_index = *self.heap.first()?;
        self.remove(max_index);
        Some(max_index)
    }

    /// Peek at the index with maximum value.
    pub fn peek_max(&self) -> Option<usize> {
        self.heap.first().copied()
    }

    /// The value indexed by `value_index`, or the default value if the index is unknown.
    pub fn value_at(&self, value_index: usize) -> V {
        self.values.get(value_index).copied().unwrap_or_default()
    }

    /// Apply `f` to the value at `value_index`, and restore the heap.
    pub fn apply_to_index(&mut self, value_index: usize, f: impl Fn(V) -> V) {
        if let Some(value) = self.values.get_mut(value_index) {
            *value = f(*value);
            self.heapify_if_active(value_index);
        }
    }

    /// Apply `f` to all (indexed) values.
    ///
    /// The function should preserve the relative order of values, as the heap is not restored.
    pub fn apply_to_all(&mut self, f: impl Fn(V) -> V) {
        for value in self.values.iter_mut() {
            *value = f(*value)
        }
    }

    /// True if `value_index` is active on the heap.
    pub fn is_active(&self, value_index: usize) -> bool {
        matches!(self.position.get(value_index), Some(Some(_)))
    }

    /// A count of values indexed by the structure.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// A count of indicies active on the heap.
    pub fn active_count(&self) -> usize {
        self.heap.len()
    }

    /// Restore the heap around `value_index`, if active.
    fn heapify_if_active(&mut self, value_index: usize) {
        if let Some(Some(heap_index)) = self.position.get(value_index).copied() {
            self.heapify_up(heap_index);
            self.heapify_down(heap_index);
        }
    }

    fn value_of_heap_index(&self, heap_index: usize) -> V {
        self.values[self.heap[heap_index]]
    }

    /// Swaps two positions on the heap, keeping positions in sync.
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a]] = Some(a);
        self.position[self.heap[b]] = Some(b);
    }

    /// Shuffles the index down into the heap, while some child is larger.
    fn heapify_down(&mut self, mut heap_index: usize) {
        loop {
            let left = 2 * heap_index + 1;
            let right = left + 1;
            let mut largest = heap_index;

            if left < self.heap.len()
                && self.value_of_heap_index(left) > self.value_of_heap_index(largest)
            {
                largest = left;
            }
            if right < self.heap.len()
                && self.value_of_heap_index(right) > self.value_of_heap_index(largest)
            {
                largest = right;
            }

            if largest == heap_index {
                break;
            }
            self.swap(heap_index, largest);
            heap_index = largest;
        }
    }

    /// Shuffles the index up the heap, while the parent is smaller.
    fn heapify_up(&mut self, mut heap_index: usize) {
        while heap_index > 0 {
            let parent = (heap_index - 1) / 2;
            if self.value_of_heap_index(parent) >= self.value_of_heap_index(heap_index) {
                break;
            }
            self.swap(heap_index, parent);
            heap_index = parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_simple() {
        let mut test_heap = IndexHeap::default();
        test_heap.add(6, 10);
        test_heap.add(5, 20);
        test_heap.add(4, 30);
        test_heap.add(1, 60);
        test_heap.add(0, 70);
        for index in [6, 5, 4, 1, 0] {
            test_heap.activate(index);
        }

        assert_eq!(test_heap.pop_max(), Some(0));
        assert_eq!(test_heap.pop_max(), Some(1));
        assert_eq!(test_heap.pop_max(), Some(4));
        assert_eq!(test_heap.pop_max(), Some(5));
        assert_eq!(test_heap.pop_max(), Some(6));
        assert!(test_heap.pop_max().is_none());
    }

    #[test]
    fn heap_update() {
        let mut test_heap = IndexHeap::default();
        for (index, value) in [(6, 10), (4, 30), (1, 60), (0, 70)] {
            test_heap.add(index, value);
            test_heap.activate(index);
        }

        test_heap.apply_to_index(6, |_| 100);
        test_heap.apply_to_index(0, |_| 0);

        assert_eq!(test_heap.pop_max(), Some(6));
        assert_eq!(test_heap.pop_max(), Some(1));
        assert_eq!(test_heap.pop_max(), Some(4));
        assert_eq!(test_heap.pop_max(), Some(0));
    }

    #[test]
    fn heap_remove_middle() {
        let mut test_heap = IndexHeap::default();
        for index in 0..10 {
            test_heap.add(index, index as u32);
            test_heap.activate(index);
        }

        assert!(test_heap.remove(7));
        assert!(!test_heap.remove(7));
        assert!(!test_heap.is_active(7));
        assert_eq!(test_heap.active_count(), 9);

        let order = std::iter::from_fn(|| test_heap.pop_max()).collect::<Vec<_>>();
        assert_eq!(order, vec![9, 8, 6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn reactivation() {
        let mut test_heap = IndexHeap::default();
        test_heap.add(2, 5);
        assert!(test_heap.activate(2));
        assert!(!test_heap.activate(2));
        assert_eq!(test_heap.pop_max(), Some(2));
        assert!(test_heap.activate(2));
        assert_eq!(test_heap.peek_max(), Some(2));
    }
}
