//! Node degree type and the Fibonacci bound on it.
//!
//! # Why u8?
//!
//! The degree of a node in a Fibonacci heap is its number of children. A
//! subtree whose root has degree `d` holds at least `F(d + 2)` nodes, where
//! `F` is the Fibonacci sequence, so the degree never exceeds
//! `log_φ(n) ≈ 1.44 · log₂(n)`:
//!
//! - 2³² nodes → max degree 45
//! - 2⁶⁴ nodes → max degree 91
//!
//! `u8` therefore covers every heap that fits in memory, and keeps the node
//! header small enough that `degree` and `marked` share one word with padding
//! to spare.

/// Type alias for node degree.
pub type Degree = u8;

/// Increments a degree, panicking on overflow.
///
/// # Panics
///
/// Panics if `degree == u8::MAX`, which would need a heap with more than
/// `F(257)` nodes.
///
/// ```rust
/// use fibonacci_queue::degree::checked_increment;
///
/// assert_eq!(checked_increment(5), 6);
/// ```
#[inline]
pub fn checked_increment(degree: Degree) -> Degree {
    degree
        .checked_add(1)
        .expect("degree overflow: bounded by log_φ(n), which cannot reach 255")
}

/// Decrements a degree, saturating at zero.
///
/// ```rust
/// use fibonacci_queue::degree::saturating_decrement;
///
/// assert_eq!(saturating_decrement(5), 4);
/// assert_eq!(saturating_decrement(0), 0);
/// ```
#[inline]
pub fn saturating_decrement(degree: Degree) -> Degree {
    degree.saturating_sub(1)
}

/// Largest degree any node can reach in a heap holding `len` nodes.
///
/// This is the largest `d` with `F(d + 2) <= len`, computed without floating
/// point. Consolidation sizes its degree buckets from it.
///
/// ```rust
/// use fibonacci_queue::degree::max_degree;
///
/// assert_eq!(max_degree(1), 0);
/// assert_eq!(max_degree(2), 1);
/// assert_eq!(max_degree(3), 2);
/// assert_eq!(max_degree(5), 3);
/// ```
pub fn max_degree(len: usize) -> usize {
    // (F(d + 2), F(d + 3)) starting at d = 0
    let (mut lo, mut hi) = (1usize, 2usize);
    let mut degree = 0;

    while hi <= len {
        degree += 1;
        match lo.checked_add(hi) {
            Some(next) => {
                lo = hi;
                hi = next;
            }
            None => break,
        }
    }

    degree
}
