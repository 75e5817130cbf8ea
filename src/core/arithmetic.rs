//! Closed-interval set arithmetic
//!
//! Complement is expressed against the [`IntervalArithmetic`] capability. The
//! sweep backend is compiled in with the `interval-arithmetic` feature;
//! without it [`default_backend`] hands out [`Unavailable`], which reports
//! [`RegionError::Unsupported`].

use crate::core::error::{RegionError, RegionResult};

/// Diagnostic carried by [`RegionError::Unsupported`] when no backend is built in
pub const MISSING_BACKEND: &str =
    "interval arithmetic backend not compiled in (enable the `interval-arithmetic` feature)";

/// Set operations over closed integer intervals `[lo, hi]`
pub trait IntervalArithmetic {
    /// `a - b` as disjoint, sorted closed intervals. Inputs may be unsorted
    /// and self-overlapping.
    fn subtract(&self, a: &[(i32, i32)], b: &[(i32, i32)]) -> RegionResult<Vec<(i32, i32)>>;

    /// Whether this backend can compute anything
    fn is_available(&self) -> bool {
        true
    }
}

/// Backend used when no arithmetic support is compiled in
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl IntervalArithmetic for Unavailable {
    fn subtract(&self, _a: &[(i32, i32)], _b: &[(i32, i32)]) -> RegionResult<Vec<(i32, i32)>> {
        Err(RegionError::Unsupported(MISSING_BACKEND))
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Sorted-sweep implementation over discrete closed intervals
#[cfg(feature = "interval-arithmetic")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepArithmetic;

#[cfg(feature = "interval-arithmetic")]
impl SweepArithmetic {
    /// Sort and coalesce; on integers `[0,10]` and `[11,20]` touch and join
    fn normalize(intervals: &[(i32, i32)]) -> Vec<(i32, i32)> {
        let mut sorted: Vec<(i32, i32)> = intervals.iter().copied().filter(|(lo, hi)| lo <= hi).collect();
        sorted.sort_unstable();

        let mut joined: Vec<(i32, i32)> = Vec::with_capacity(sorted.len());
        for (lo, hi) in sorted {
            match joined.last_mut() {
                Some(last) if (lo as i64) <= last.1 as i64 + 1 => last.1 = last.1.max(hi),
                _ => joined.push((lo, hi)),
            }
        }
        joined
    }
}

#[cfg(feature = "interval-arithmetic")]
impl IntervalArithmetic for SweepArithmetic {
    fn subtract(&self, a: &[(i32, i32)], b: &[(i32, i32)]) -> RegionResult<Vec<(i32, i32)>> {
        let a = Self::normalize(a);
        let b = Self::normalize(b);

        let mut out = Vec::with_capacity(a.len());
        let mut j = 0;
        for (lo, hi) in a {
            // i64 so that cut points next to i32 bounds cannot overflow
            let mut cursor = lo as i64;
            let hi = hi as i64;

            while j < b.len() && (b[j].1 as i64) < cursor {
                j += 1;
            }
            let mut k = j;
            while k < b.len() && (b[k].0 as i64) <= hi {
                let (blo, bhi) = (b[k].0 as i64, b[k].1 as i64);
                if blo > cursor {
                    out.push((cursor as i32, (blo - 1) as i32));
                }
                cursor = cursor.max(bhi + 1);
                if cursor > hi {
                    break;
                }
                k += 1;
            }
            if cursor <= hi {
                out.push((cursor as i32, hi as i32));
            }
        }
        Ok(out)
    }
}

/// The backend selected at compile time
pub fn default_backend() -> &'static dyn IntervalArithmetic {
    #[cfg(feature = "interval-arithmetic")]
    {
        &SweepArithmetic
    }
    #[cfg(not(feature = "interval-arithmetic"))]
    {
        &Unavailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_reports_unsupported() {
        let backend = Unavailable;
        assert!(!backend.is_available());
        assert!(matches!(
            backend.subtract(&[(0, 10)], &[]),
            Err(RegionError::Unsupported(_))
        ));
    }

    #[cfg(feature = "interval-arithmetic")]
    mod sweep {
        use super::super::*;

        fn sub(a: &[(i32, i32)], b: &[(i32, i32)]) -> Vec<(i32, i32)> {
            SweepArithmetic.subtract(a, b).unwrap()
        }

        #[test]
        fn test_hole_in_the_middle() {
            assert_eq!(sub(&[(0, 100)], &[(40, 60)]), vec![(0, 39), (61, 100)]);
        }

        #[test]
        fn test_disjoint_subject_leaves_input() {
            assert_eq!(sub(&[(0, 10), (20, 30)], &[(12, 18)]), vec![(0, 10), (20, 30)]);
        }

        #[test]
        fn test_full_cover_removes_everything() {
            assert!(sub(&[(10, 20)], &[(0, 100)]).is_empty());
            assert!(sub(&[(10, 20)], &[(10, 20)]).is_empty());
        }

        #[test]
        fn test_closed_endpoints() {
            assert_eq!(sub(&[(0, 10)], &[(10, 12)]), vec![(0, 9)]);
            assert_eq!(sub(&[(0, 10)], &[(-5, 0)]), vec![(1, 10)]);
        }

        #[test]
        fn test_one_subject_spans_several_inputs() {
            assert_eq!(
                sub(&[(0, 10), (20, 30), (40, 50)], &[(5, 45)]),
                vec![(0, 4), (46, 50)]
            );
        }

        #[test]
        fn test_touching_inputs_coalesce() {
            assert_eq!(sub(&[(0, 10), (11, 20)], &[]), vec![(0, 20)]);
            assert_eq!(sub(&[(5, 8), (0, 10)], &[]), vec![(0, 10)]);
        }

        #[test]
        fn test_extreme_bounds() {
            assert_eq!(
                sub(&[(i32::MIN, i32::MAX)], &[(0, 0)]),
                vec![(i32::MIN, -1), (1, i32::MAX)]
            );
        }

        #[test]
        fn test_default_backend_available() {
            assert!(default_backend().is_available());
        }
    }
}
