use super::NIL;

/// An arena of intrusive circular doubly linked lists over items `[0, capacity)`.
///
/// Every item id can be a member of at most one list of the collection at a
/// time, so a single pair of prev/next arrays serves all lists. A list is
/// identified by its head item; the empty list is `NIL`. All operations are
/// O(1), which is what makes the child-list and pertinence bookkeeping of
/// the embedding engine linear overall.
#[derive(Clone, Debug)]
pub struct ListCollection {
    prev: Vec<usize>,
    next: Vec<usize>,
}

impl ListCollection {
    pub fn new(capacity: usize) -> Self {
        Self {
            prev: vec![NIL; capacity],
            next: vec![NIL; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.prev.len()
    }

    /// Forget all list membership. Heads held by callers become invalid.
    pub fn reset(&mut self) {
        self.prev.fill(NIL);
        self.next.fill(NIL);
    }

    /// Add `item` at the tail of the list with head `head`; returns the head.
    pub fn append(&mut self, head: usize, item: usize) -> usize {
        if head == NIL {
            self.prev[item] = item;
            self.next[item] = item;
            return item;
        }
        let tail = self.prev[head];
        self.prev[item] = tail;
        self.next[item] = head;
        self.next[tail] = item;
        self.prev[head] = item;
        head
    }

    /// Add `item` at the front of the list with head `head`; returns the new
    /// head, which is `item`. In a circular list the front position is the
    /// tail position with the head designation moved.
    pub fn prepend(&mut self, head: usize, item: usize) -> usize {
        self.append(head, item);
        item
    }

    /// Remove `item` from the list with head `head`; returns the new head
    /// (`NIL` if the list became empty).
    pub fn delete(&mut self, head: usize, item: usize) -> usize {
        if self.next[item] == item {
            self.prev[item] = NIL;
            self.next[item] = NIL;
            return NIL;
        }
        let before = self.prev[item];
        let after = self.next[item];
        self.next[before] = after;
        self.prev[after] = before;
        self.prev[item] = NIL;
        self.next[item] = NIL;
        if head == item {
            after
        } else {
            head
        }
    }

    /// The item after `item` in the list with head `head`, or `NIL` once the
    /// traversal wraps back to the head.
    pub fn next_item(&self, head: usize, item: usize) -> usize {
        let next = self.next[item];
        if next == head {
            NIL
        } else {
            next
        }
    }

    /// Collect a list into a `Vec`, head first. Intended for tests and
    /// diagnostics; engine code iterates with [Self::next_item].
    pub fn to_vec(&self, head: usize) -> Vec<usize> {
        let mut items = Vec::new();
        let mut cur = head;
        while cur != NIL {
            items.push(cur);
            cur = self.next_item(head, cur);
        }
        items
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_append_keeps_order() {
        let mut lists = ListCollection::new(8);
        let mut head = NIL;
        for item in [3, 1, 5] {
            head = lists.append(head, item);
        }

        assert_eq!(head, 3);
        assert_eq!(lists.to_vec(head), [3, 1, 5]);
    }

    #[test]
    fn test_prepend_moves_head() {
        let mut lists = ListCollection::new(8);
        let mut head = NIL;
        head = lists.append(head, 2);
        head = lists.prepend(head, 6);

        assert_eq!(head, 6);
        assert_eq!(lists.to_vec(head), [6, 2]);
    }

    #[test]
    fn test_delete_middle_and_head() {
        let mut lists = ListCollection::new(8);
        let mut head = NIL;
        for item in [0, 1, 2, 3] {
            head = lists.append(head, item);
        }

        head = lists.delete(head, 2);
        assert_eq!(lists.to_vec(head), [0, 1, 3]);

        head = lists.delete(head, 0);
        assert_eq!(head, 1);
        assert_eq!(lists.to_vec(head), [1, 3]);

        head = lists.delete(head, 1);
        head = lists.delete(head, 3);
        assert_eq!(head, NIL);
    }

    #[test]
    fn test_reappend_after_abandoned_head() {
        let mut lists = ListCollection::new(4);
        let mut head = NIL;
        head = lists.append(head, 1);
        lists.append(head, 2);

        // Dropping a head without deleting items must not poison re-insertion.
        let mut other = NIL;
        other = lists.append(other, 2);
        other = lists.append(other, 1);
        assert_eq!(lists.to_vec(other), [2, 1]);
    }
}
