//! Union-find over the integers `0..n`.

/// Disjoint-set forest with union by rank and path compression.
///
/// Every operation taking an item index panics when the index is `>= len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisjointSet {
    parents: Vec<usize>,
    ranks: Vec<u32>,
}

impl DisjointSet {
    /// `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parents: (0..n).collect(),
            ranks: vec![0; n],
        }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Whether the forest holds no items.
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Representative of the set holding `item`, without modifying the forest.
    pub fn find(&self, item: usize) -> usize {
        let mut root = item;
        while self.parents[root] != root {
            root = self.parents[root];
        }
        root
    }

    /// Representative of the set holding `item`, compressing the path to it.
    pub fn find_mut(&mut self, item: usize) -> usize {
        let root = self.find(item);
        let mut cur = item;
        while self.parents[cur] != root {
            let next = self.parents[cur];
            self.parents[cur] = root;
            cur = next;
        }
        root
    }

    /// Merge the sets holding `a` and `b`. Returns `false` if they were already one.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find_mut(a);
        let rb = self.find_mut(b);
        if ra == rb {
            return false;
        }
        match self.ranks[ra].cmp(&self.ranks[rb]) {
            std::cmp::Ordering::Less => self.parents[ra] = rb,
            std::cmp::Ordering::Greater => self.parents[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parents[rb] = ra;
                self.ranks[ra] += 1;
            }
        }
        true
    }

    /// Whether `a` and `b` belong to the same set.
    pub fn same_set(&self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Number of distinct sets.
    pub fn set_count(&self) -> usize {
        (0..self.len()).filter(|&i| self.parents[i] == i).count()
    }

    /// Members of every set, each sorted ascending, sets ordered by smallest member.
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut slot_of_root = vec![usize::MAX; self.len()];
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for item in 0..self.len() {
            let root = self.find(item);
            if slot_of_root[root] == usize::MAX {
                slot_of_root[root] = groups.len();
                groups.push(Vec::new());
            }
            groups[slot_of_root[root]].push(item);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_singletons() {
        let set = DisjointSet::new(5);
        assert_eq!(set.len(), 5);
        assert_eq!(set.set_count(), 5);
        for i in 0..5 {
            assert_eq!(set.find(i), i);
        }
        assert!(DisjointSet::new(0).is_empty());
    }

    #[test]
    fn test_union_and_find() {
        let mut set = DisjointSet::new(6);
        assert!(set.union(0, 1));
        assert!(set.union(2, 3));
        assert!(set.union(1, 3));
        assert!(!set.union(0, 2));

        assert!(set.same_set(0, 3));
        assert!(!set.same_set(0, 4));
        assert_eq!(set.find(0), set.find(2));
        assert_eq!(set.set_count(), 3);
    }

    #[test]
    fn test_path_compression_keeps_roots() {
        let mut set = DisjointSet::new(8);
        for i in 0..7 {
            set.union(i, i + 1);
        }
        let root = set.find(7);
        for i in 0..8 {
            assert_eq!(set.find_mut(i), root);
        }
        assert_eq!(set.set_count(), 1);
    }

    #[test]
    fn test_groups_ordered_by_first_member() {
        let mut set = DisjointSet::new(6);
        set.union(4, 1);
        set.union(5, 0);
        set.union(3, 5);
        assert_eq!(set.groups(), vec![vec![0, 3, 5], vec![1, 4], vec![2]]);
    }

    #[test]
    fn test_partition_independent_of_union_order() {
        let unions = [(0, 4), (4, 7), (1, 2), (5, 2), (3, 6), (8, 3), (7, 0)];
        let interleaved: Vec<(usize, usize)> = unions
            .iter()
            .step_by(2)
            .chain(unions.iter().skip(1).step_by(2))
            .map(|&(a, b)| (b, a))
            .collect();
        let orders = [
            unions.to_vec(),
            unions.iter().rev().copied().collect(),
            interleaved,
        ];

        let sets: Vec<DisjointSet> = orders
            .iter()
            .map(|order| {
                let mut set = DisjointSet::new(10);
                for &(a, b) in order {
                    set.union(a, b);
                }
                set
            })
            .collect();

        let expected = vec![vec![0, 4, 7], vec![1, 2, 5], vec![3, 6, 8], vec![9]];
        for set in &sets {
            assert_eq!(set.groups(), expected);
            assert_eq!(set.set_count(), 4);
        }
        for a in 0..10 {
            for b in 0..10 {
                let same = sets[0].same_set(a, b);
                assert!(sets.iter().all(|set| set.same_set(a, b) == same));
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_panics() {
        let set = DisjointSet::new(2);
        set.find(2);
    }
}
