//! Addressable binary min-heap over dense ids `0..n` with decrease-key.
//!
//! Ties on the key are broken by id so pop order is deterministic.

pub(crate) struct IndexedMinHeap {
    /// Heap-ordered ids.
    heap: Vec<usize>,
    /// `position[id]` is the slot of `id` in `heap`, `None` once popped.
    position: Vec<Option<usize>>,
    keys: Vec<i64>,
}

impl IndexedMinHeap {
    /// Heap containing every id `0..keys.len()` with the given keys.
    pub(crate) fn with_keys(keys: Vec<i64>) -> Self {
        let n = keys.len();
        let mut heap = Self {
            heap: (0..n).collect(),
            position: (0..n).map(Some).collect(),
            keys,
        };
        for slot in (0..n / 2).rev() {
            heap.sift_down(slot);
        }
        heap
    }

    pub(crate) fn pop_min(&mut self) -> Option<usize> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(0, last);
        let min = self.heap.pop()?;
        self.position[min] = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(min)
    }

    /// Lower the key of `id`. Ignored when `id` was already popped or the
    /// new key is not smaller.
    pub(crate) fn decrease_key(&mut self, id: usize, key: i64) {
        let Some(slot) = self.position[id] else {
            return;
        };
        if key >= self.keys[id] {
            return;
        }
        self.keys[id] = key;
        self.sift_up(slot);
    }

    fn less(&self, a: usize, b: usize) -> bool {
        let (ia, ib) = (self.heap[a], self.heap[b]);
        (self.keys[ia], ia) < (self.keys[ib], ib)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a]] = Some(a);
        self.position[self.heap[b]] = Some(b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.less(slot, parent) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IndexedMinHeap;

    fn drain(heap: &mut IndexedMinHeap) -> Vec<usize> {
        std::iter::from_fn(|| heap.pop_min()).collect()
    }

    #[test]
    fn pops_in_key_order_with_id_tiebreak() {
        let mut heap = IndexedMinHeap::with_keys(vec![5, 1, 5, 0, 3]);
        assert_eq!(drain(&mut heap), [3, 1, 4, 0, 2]);
        assert_eq!(heap.pop_min(), None);
    }

    #[test]
    fn decrease_key_moves_item_forward() {
        let mut heap = IndexedMinHeap::with_keys(vec![10, 20, 30]);
        heap.decrease_key(2, 5);
        heap.decrease_key(1, 25);
        assert_eq!(heap.pop_min(), Some(2));
        assert_eq!(drain(&mut heap), [0, 1]);
    }

    #[test]
    fn decrease_after_pop_is_ignored() {
        let mut heap = IndexedMinHeap::with_keys(vec![1, 2]);
        assert_eq!(heap.pop_min(), Some(0));
        heap.decrease_key(0, -10);
        assert_eq!(drain(&mut heap), [1]);
    }

    #[test]
    fn empty_heap() {
        let mut heap = IndexedMinHeap::with_keys(Vec::new());
        assert_eq!(heap.pop_min(), None);
    }
}
