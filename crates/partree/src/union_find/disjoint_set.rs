use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("No disjoint-set node found for {0:?}")]
pub struct NoNode<K>(pub K);

/// The outcome of a union, naming the surviving root and the root it
/// absorbed, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unioned<K> {
    pub root: K,
    pub absorbed: Option<K>,
}

impl<K> Unioned<K> {
    #[inline]
    #[must_use]
    pub fn did_merge(&self) -> bool { self.absorbed.is_some() }
}

/// Parent-pointer storage for a disjoint-set forest
///
/// Parents can be rewritten through a shared reference so that lookups may
/// compress paths without requiring exclusive access.
pub trait ForestNodes<K> {
    fn parent(&self, key: K) -> Option<K>;

    fn set_parent(&self, key: K, parent: K);

    fn size(&self, root: K) -> Option<usize>;

    fn link(&mut self, root: K, absorbed: K);
}

pub fn find_root<K: Copy + Eq, F: ForestNodes<K>>(set: &F, key: K) -> Result<K, NoNode<K>> {
    let parent = set.parent(key).ok_or(NoNode(key))?;

    if parent == key {
        return Ok(key);
    }

    let root = find_root(set, parent).unwrap_or_else(|_| unreachable!());
    if root != parent {
        set.set_parent(key, root);
    }

    Ok(root)
}

/// Union by size.  On a size tie the root that orders first survives.
pub fn union_by_size<K: Copy + Ord, F: ForestNodes<K>>(
    set: &mut F,
    a: K,
    b: K,
) -> Result<Unioned<K>, NoNode<K>> {
    let mut a = find_root(set, a)?;
    let mut b = find_root(set, b)?;

    if a == b {
        return Ok(Unioned {
            root: a,
            absorbed: None,
        });
    }

    let a_size = set.size(a).unwrap_or_else(|| unreachable!());
    let b_size = set.size(b).unwrap_or_else(|| unreachable!());

    match a_size.cmp(&b_size) {
        Ordering::Less => std::mem::swap(&mut a, &mut b),
        Ordering::Equal if b < a => std::mem::swap(&mut a, &mut b),
        _ => (),
    }

    set.link(a, b);

    Ok(Unioned {
        root: a,
        absorbed: Some(b),
    })
}
