//! Self-referential node and field access fixture.

/// A record holding an integer and an optional owned successor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    pub value: i64,
    pub next: Option<Box<Node>>,
}

impl Node {
    pub fn new(value: i64) -> Self {
        Self { value, next: None }
    }

    pub fn with_next(value: i64, next: Node) -> Self {
        Self {
            value,
            next: Some(Box::new(next)),
        }
    }
}

/// Returns `a + node.value`, wrapping on overflow.
pub fn field_sum(a: i64, node: &Node) -> i64 {
    a.wrapping_add(node.value)
}

/// Builds a single node holding 123 and returns `field_sum(1, &node)`.
pub fn sample_entry() -> i64 {
    let node = Node::new(123);
    field_sum(1, &node)
}

/// C layout of a node: an integer and a pointer to another node.
#[allow(non_camel_case_types)]
#[derive(Debug)]
#[repr(C)]
pub struct ext_node_t {
    pub i: i64,
    pub s: *mut ext_node_t,
}

/// Returns `a + s->i`.
///
/// # Safety
/// `s` must be non-null and point to an initialized `ext_node_t`. The pointer
/// is not checked.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ext_field_sum(a: i64, s: *const ext_node_t) -> i64 {
    // Safety: upheld by the caller.
    let node = unsafe { &*s };
    a.wrapping_add(node.i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn adds_field() {
        assert_eq!(field_sum(1, &Node::new(123)), 124);
        assert_eq!(field_sum(-5, &Node::new(5)), 0);
    }

    #[test]
    fn ignores_successor() {
        let node = Node::with_next(10, Node::new(1000));
        assert_eq!(field_sum(1, &node), 11);
        assert_eq!(node.next.as_deref(), Some(&Node::new(1000)));
    }

    #[test]
    fn sample_entry_is_124() {
        assert_eq!(sample_entry(), 124);
    }

    #[test]
    fn c_form_reads_field() {
        let node = ext_node_t {
            i: 123,
            s: ptr::null_mut(),
        };
        assert_eq!(unsafe { ext_field_sum(1, &node) }, 124);
    }

    #[test]
    fn c_form_reads_only_the_given_node() {
        let mut tail = ext_node_t {
            i: 7,
            s: ptr::null_mut(),
        };
        let head = ext_node_t { i: 3, s: &mut tail };
        assert_eq!(unsafe { ext_field_sum(0, &head) }, 3);
    }
}
