//! Grouping of rectangle spans into connected islands.

use serde::{Deserialize, Serialize};

use crate::disjoint_set::DisjointSet;
use crate::slab::Slab;

/// Address of one span inside a slab stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpanIndex {
    /// Row in the stack.
    pub row: usize,
    /// Position within the row.
    pub index: usize,
}

/// Split the spans of `slabs` into groups of touching rectangles.
///
/// Two spans belong together when they sit in adjacent rows and their
/// x-ranges overlap or share an end point, or when they are neighbours in one
/// row with no gap between them. Groups are listed in order of their first
/// span (row-major), and spans within a group keep that order.
pub fn group_touching_rectangles(slabs: &[Slab]) -> Vec<Vec<SpanIndex>> {
    let mut offsets = Vec::with_capacity(slabs.len());
    let mut addresses = Vec::new();
    for (row, slab) in slabs.iter().enumerate() {
        offsets.push(addresses.len());
        addresses.extend((0..slab.len()).map(|index| SpanIndex { row, index }));
    }

    let mut set = DisjointSet::new(addresses.len());

    for (row, slab) in slabs.iter().enumerate() {
        let base = offsets[row];
        for (i, pair) in slab.windows(2).enumerate() {
            if pair[0].xmax >= pair[1].xmin {
                set.union(base + i, base + i + 1);
            }
        }

        let Some(next) = slabs.get(row + 1) else {
            continue;
        };
        let next_base = offsets[row + 1];
        // both rows are x-sorted: advance whichever span ends first
        let (mut a, mut b) = (0, 0);
        while a < slab.len() && b < next.len() {
            if slab[a].touches_x(&next[b]) {
                set.union(base + a, next_base + b);
            }
            if slab[a].xmax < next[b].xmax {
                a += 1;
            } else {
                b += 1;
            }
        }
    }

    set.groups()
        .into_iter()
        .map(|group| group.into_iter().map(|i| addresses[i]).collect())
        .collect()
}
