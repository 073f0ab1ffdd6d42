use std::{collections::VecDeque, hash::Hash};

use crate::HashSet;

/// Breadth-first flood fill from a set of start nodes.
///
/// Yields every reachable node once with its step count from the nearest
/// start, in nondecreasing order of distance. Nodes are visited lazily, so
/// the fill can be cut short with `take_while(within_range(n))`.
pub fn dijkstra_map<'a, T, I>(
    mut neighbors: impl FnMut(&T) -> I + 'a,
    starts: impl IntoIterator<Item = T>,
) -> impl Iterator<Item = (T, usize)> + 'a
where
    T: Clone + Eq + Hash + 'a,
    I: IntoIterator<Item = T>,
{
    let mut seen: HashSet<T> = HashSet::default();
    let mut queue: VecDeque<(T, usize)> = starts
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .map(|s| (s, 0))
        .collect();

    std::iter::from_fn(move || {
        let (node, dist) = queue.pop_front()?;
        for n in neighbors(&node) {
            // Marking at enqueue keeps the queue free of duplicates.
            if seen.insert(n.clone()) {
                queue.push_back((n, dist + 1));
            }
        }
        Some((node, dist))
    })
}

/// Predicate for `take_while` that stops a fill at distance `n`.
pub fn within_range<T>(n: usize) -> impl FnMut(&(T, usize)) -> bool {
    move |&(_, dist)| dist < n
}
