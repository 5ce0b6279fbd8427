use std::fmt::Debug;

pub fn assert_same_elements<T>(a: impl IntoIterator<Item = T>, b: impl IntoIterator<Item = T>)
where
    T: Ord + PartialEq + Debug,
{
    let mut a: Vec<T> = a.into_iter().collect();
    a.sort();
    let mut b: Vec<T> = b.into_iter().collect();
    b.sort();

    assert_eq!(a, b)
}

/// Undirected edges in a canonical form: lower endpoint first, sorted.
pub fn normalize_edges(edges: impl IntoIterator<Item = (usize, usize)>) -> Vec<(usize, usize)> {
    let mut normalized: Vec<(usize, usize)> = edges
        .into_iter()
        .map(|(u, v)| (u.min(v), u.max(v)))
        .collect();
    normalized.sort_unstable();
    normalized
}

/// Compare two undirected edge sets regardless of orientation and order.
pub fn assert_same_edges(
    a: impl IntoIterator<Item = (usize, usize)>,
    b: impl IntoIterator<Item = (usize, usize)>,
) {
    assert_eq!(normalize_edges(a), normalize_edges(b))
}
