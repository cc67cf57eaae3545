//! Indexed binary min-heap over search node ids.
//!
//! Keys are compared with `total_cmp`, ties go to the lower node id (the node
//! created first), so the expansion order is fully deterministic. Each node
//! remembers its heap slot, which makes decrease-key `O(log n)`.

const ABSENT: usize = usize::MAX;

#[derive(Debug, Default)]
pub(super) struct Frontier {
    heap: Vec<usize>,
    keys: Vec<f64>,
    slots: Vec<usize>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: usize) -> bool {
        self.slots.get(id).is_some_and(|&s| s != ABSENT)
    }

    /// Node ids currently queued, in heap order.
    pub fn ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.heap.iter().copied()
    }

    /// Insert a node that is not queued yet.
    pub fn push(&mut self, id: usize, key: f64) {
        if id >= self.slots.len() {
            self.slots.resize(id + 1, ABSENT);
            self.keys.resize(id + 1, f64::INFINITY);
        }
        debug_assert!(!self.contains(id));
        self.keys[id] = key;
        self.slots[id] = self.heap.len();
        self.heap.push(id);
        self.sift_up(self.heap.len() - 1);
    }

    /// Lower the key of a queued node. Larger keys are ignored.
    pub fn decrease_key(&mut self, id: usize, key: f64) {
        if !self.contains(id) || key.total_cmp(&self.keys[id]).is_ge() {
            return;
        }
        self.keys[id] = key;
        self.sift_up(self.slots[id]);
    }

    /// Remove and return the node with the smallest key.
    pub fn pop(&mut self) -> Option<usize> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(0, last);
        let id = self.heap.pop()?;
        self.slots[id] = ABSENT;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(id)
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        let (ia, ib) = (self.heap[a], self.heap[b]);
        self.keys[ia]
            .total_cmp(&self.keys[ib])
            .then(ia.cmp(&ib))
            .is_lt()
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slots[self.heap[a]] = a;
        self.slots[self.heap[b]] = b;
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < n && self.less(left, smallest) {
                smallest = left;
            }
            if right < n && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_key_order() {
        let mut f = Frontier::new();
        for (id, key) in [(0, 5.0), (1, 1.0), (2, 3.0), (3, 4.0), (4, 2.0)] {
            f.push(id, key);
        }
        let order: Vec<usize> = std::iter::from_fn(|| f.pop()).collect();
        assert_eq!(order, vec![1, 4, 2, 3, 0]);
        assert!(f.is_empty());
    }

    #[test]
    fn test_ties_break_by_creation_order() {
        let mut f = Frontier::new();
        f.push(3, 1.0);
        f.push(1, 1.0);
        f.push(2, 1.0);
        assert_eq!(f.pop(), Some(1));
        assert_eq!(f.pop(), Some(2));
        assert_eq!(f.pop(), Some(3));
    }

    #[test]
    fn test_decrease_key() {
        let mut f = Frontier::new();
        f.push(0, 10.0);
        f.push(1, 20.0);
        f.push(2, 30.0);
        f.decrease_key(2, 5.0);
        f.decrease_key(0, 50.0);
        assert_eq!(f.pop(), Some(2));
        assert_eq!(f.pop(), Some(0));
        assert!(f.contains(1));
        assert!(!f.contains(0));
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn test_infinite_keys_sort_last() {
        let mut f = Frontier::new();
        f.push(0, f64::INFINITY);
        f.push(1, 1e300);
        assert_eq!(f.pop(), Some(1));
        assert_eq!(f.pop(), Some(0));
        assert_eq!(f.pop(), None);
    }
}
