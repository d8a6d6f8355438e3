//! Persistent call stack for symbolic exploration.
//!
//! Pushing and popping return new stacks that share their tail with the old
//! one, so forking a branch only clones a pointer.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

struct Frame {
    ret: u16,
    below: Option<Rc<Frame>>,
}

/// Immutable stack of return addresses.
#[derive(Clone, Default)]
pub struct CallStack {
    top: Option<Rc<Frame>>,
    depth: usize,
}

impl CallStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending return addresses.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// True when no call is pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }

    /// Return a stack with `ret` on top.
    pub fn push(&self, ret: u16) -> Self {
        Self {
            top: Some(Rc::new(Frame { ret, below: self.top.clone() })),
            depth: self.depth + 1,
        }
    }

    /// Split off the top return address.
    pub fn pop(&self) -> Option<(u16, Self)> {
        let frame = self.top.as_ref()?;
        let rest = Self {
            top: frame.below.clone(),
            depth: self.depth - 1,
        };
        Some((frame.ret, rest))
    }

    /// Iterate return addresses from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        let mut cursor = self.top.as_deref();
        std::iter::from_fn(move || {
            let frame = cursor?;
            cursor = frame.below.as_deref();
            Some(frame.ret)
        })
    }
}

impl PartialEq for CallStack {
    fn eq(&self, other: &Self) -> bool {
        if self.depth != other.depth {
            return false;
        }
        match (&self.top, &other.top) {
            (Some(a), Some(b)) if Rc::ptr_eq(a, b) => true,
            _ => self.iter().eq(other.iter()),
        }
    }
}

impl Eq for CallStack {}

impl Hash for CallStack {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.depth.hash(state);
        for ret in self.iter() {
            ret.hash(state);
        }
    }
}

impl std::fmt::Debug for CallStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|ret| format!("0x{:x}", ret)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_push_pop() {
        let stack = CallStack::new().push(0x202).push(0x306);
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.iter().next(), Some(0x306));

        let (ret, rest) = stack.pop().unwrap();
        assert_eq!(ret, 0x306);
        let (ret, rest) = rest.pop().unwrap();
        assert_eq!(ret, 0x202);
        assert!(rest.is_empty());
        assert!(rest.pop().is_none());
    }

    #[test]
    fn test_forks_do_not_alias() {
        let base = CallStack::new().push(0x202);
        let left = base.push(0x400);
        let right = base.clone();

        // Popping one fork leaves the other untouched
        let (_, left_rest) = left.pop().unwrap();
        assert_eq!(left_rest, base);
        assert_eq!(right.depth(), 1);
        assert_eq!(left.iter().collect::<Vec<_>>(), vec![0x400, 0x202]);
    }

    #[test]
    fn test_structural_equality_and_hash() {
        let a = CallStack::new().push(0x202).push(0x204);
        let b = CallStack::new().push(0x202).push(0x204);
        let c = CallStack::new().push(0x204).push(0x202);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }
}
