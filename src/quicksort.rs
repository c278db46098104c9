//! Dual-pivot introsort, the unstable path for every element type the
//! block variant does not cover.

use core::mem::ManuallyDrop;
use core::ptr;

use crate::heapsort::heap_sort;
use crate::pivot::sort5;
use crate::smallsort::simple_sort;
use crate::GapGuard;

/// Ranges at or below this length go straight to insertion sort.
const MAX_SIMPLE_SORT_LEN: usize = 14;

/// Sorts `v` recursively with a dual-pivot three-way partition.
///
/// `chance` is the number of partitioning rounds allowed before the
/// range is handed to `heap_sort`, which bounds the total work at
/// `O(n * log(n))` regardless of pivot luck.
pub(crate) fn introsort<'a, T, F>(mut v: &'a mut [T], mut chance: u32, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    while v.len() > MAX_SIMPLE_SORT_LEN {
        if chance == 0 {
            heap_sort(v, is_less);
            return;
        }
        chance -= 1;

        // A dual-pivot partition touches each element once per round but
        // produces three segments, which cuts the expected number of
        // rounds each element participates in.
        let (l, r) = tri_partition(v, is_less);

        let (left, rest) = v.split_at_mut(l);
        let (pivot_l, rest) = rest.split_at_mut(1);
        let (mid, rest) = rest.split_at_mut(r - l - 1);
        let (pivot_r, right) = rest.split_at_mut(1);

        introsort(left, chance, is_less);
        introsort(right, chance, is_less);

        if !is_less(&pivot_l[0], &pivot_r[0]) {
            // The two pivots compare equal, so the whole middle segment
            // is one equivalence class. Not recursing into it is what
            // keeps constant inputs out of the quadratic regime.
            return;
        }
        v = mid;
    }
    simple_sort(v, is_less);
}

/// Partitions `v` into `[ < pivotL | pivotL..=pivotR | > pivotR ]` and
/// returns the final pivot positions `(l, r)` with `l < r`.
///
/// Elements equal to a pivot may end up on either side of it, which
/// keeps the middle segment tight without re-scanning runs of
/// duplicates.
fn tri_partition<T, F>(v: &mut [T], is_less: &mut F) -> (usize, usize)
where
    F: FnMut(&T, &T) -> bool,
{
    let size = v.len();
    debug_assert!(size > MAX_SIMPLE_SORT_LEN);

    let (m, q) = (size / 2, size / 4);

    // Five samples spread over the middle half; their 2nd and 4th become
    // the pivots, the extremes become scan sentinels.
    let (x, lo, _, hi, y) = sort5(v, m - q, m - 1, m, m + 1, m + q, is_less);

    let s = size - 1;
    let base = v.as_mut_ptr();

    // SAFETY: size > 14 keeps all five sample indices inside 2..s-1, and
    // the scan bounds below keep every formed index inside 0..=s even if
    // the comparator is inconsistent. The two pivots are lifted into
    // guards: on unwind they are written back at the range ends (whose
    // values were duplicated into the vacated sample slots), so `v`
    // holds every element exactly once at any comparator call.
    unsafe {
        let mut gap_l = GapGuard {
            pos: base,
            value: ManuallyDrop::new(ptr::read(base.add(lo))),
        };
        let mut gap_r = GapGuard {
            pos: base.add(s),
            value: ManuallyDrop::new(ptr::read(base.add(hi))),
        };

        // Park endpoint copies in the vacated pivot slots and move the
        // sample extremes next to the ends as sentinels.
        ptr::copy_nonoverlapping(base, base.add(lo), 1);
        ptr::copy_nonoverlapping(base.add(s), base.add(hi), 1);
        ptr::swap(base.add(1), base.add(x));
        ptr::swap(base.add(s - 1), base.add(y));

        // | < pivotL |    pivotL..=pivotR    | > pivotR |
        // 0          l                       r          s
        let mut l = 2;
        let mut r = s - 2;

        loop {
            while l < s - 1 && is_less(&*base.add(l), &*gap_l.value) {
                l += 1;
            }
            while r > 1 && is_less(&*gap_r.value, &*base.add(r)) {
                r -= 1;
            }
            if is_less(&*gap_r.value, &*base.add(l)) {
                if r == 0 {
                    // Only an inconsistent comparator gets the right
                    // cursor this far; stop before it wraps. Slot 0 is
                    // the unwind target of gap_l and stays untouched.
                    break;
                }
                ptr::swap(base.add(l), base.add(r));
                r -= 1;
                if is_less(&*base.add(l), &*gap_l.value) {
                    l += 1;
                    continue;
                }
            }
            break;
        }

        let mut k = l + 1;
        while k <= r {
            if is_less(&*gap_r.value, &*base.add(k)) {
                while r > l && is_less(&*gap_r.value, &*base.add(r)) {
                    r -= 1;
                }
                if k >= r {
                    break;
                }
                if is_less(&*base.add(r), &*gap_l.value) {
                    // Far element belongs left of l: rotate k -> r -> l.
                    ptr::swap(base.add(l), base.add(r));
                    ptr::swap(base.add(k), base.add(r));
                    l += 1;
                } else {
                    ptr::swap(base.add(k), base.add(r));
                }
                r -= 1;
            } else if is_less(&*base.add(k), &*gap_l.value) {
                ptr::swap(base.add(k), base.add(l));
                l += 1;
            }
            k += 1;
        }

        // Move the parked endpoint copies back and drop the pivots into
        // their boundary slots.
        l -= 1;
        r += 1;
        // An inconsistent comparator can drive the cursors into each
        // other; any two distinct interior slots keep the element set
        // intact, only the (already unspecified) order suffers.
        let l = l.min(s - 2);
        let r = r.clamp(l + 1, s - 1);
        ptr::copy_nonoverlapping(base.add(l), base, 1);
        gap_l.pos = base.add(l);
        drop(gap_l);
        ptr::copy_nonoverlapping(base.add(r), base.add(s), 1);
        gap_r.pos = base.add(r);
        drop(gap_r);

        (l, r)
    }
}
