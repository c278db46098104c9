//! Stable sorting: an allocating top-down ping-pong merge and the
//! in-place bottom-up symmerge path.

use core::mem;
use core::mem::MaybeUninit;
use core::ptr;

use crate::smallsort::simple_sort;

/// Merge-sort ranges below this length are insertion sorted.
const MAX_MERGE_SIMPLE_SORT_LEN: usize = 12;

/// Block width the bottom-up pass starts from.
const SYMMERGE_BLOCK: usize = 8;

/// Stable sort with the allocation policy picked by `inplace`.
///
/// The allocating path needs one scratch buffer of `v.len()` elements;
/// if that allocation fails the call degrades to the in-place path
/// instead of surfacing the error.
pub(crate) fn sort_stable_with<T, F>(v: &mut [T], inplace: bool, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let size = v.len();

    if inplace {
        sort_stable_inplace(v, is_less);
    } else if size < 16 {
        simple_sort(v, is_less);
    } else {
        let mut scratch: Vec<MaybeUninit<T>> = Vec::new();
        if scratch.try_reserve_exact(size).is_err() {
            sort_stable_inplace(v, is_less);
            return;
        }

        // SAFETY: the reserve succeeded and `MaybeUninit` needs no
        // initialization, so the buffer may be treated as `size`
        // uninitialized elements. It is seeded with a bitwise copy of
        // `v`, which `merge_sort` requires, and freed on every exit
        // path without dropping its contents.
        unsafe {
            scratch.set_len(size);
            let src = scratch.as_mut_ptr() as *mut T;
            ptr::copy_nonoverlapping(v.as_ptr(), src, size);
            merge_sort(src, v.as_mut_ptr(), size, is_less);
        }
    }
}

/// Bottom-up stable sort: insertion-sort every 8-block, then keep
/// doubling the block width, merging adjacent pairs in place.
pub(crate) fn sort_stable_inplace<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let size = v.len();
    let mut step = SYMMERGE_BLOCK;

    let mut a = 0;
    while a + step <= size {
        simple_sort(&mut v[a..a + step], is_less);
        a += step;
    }
    simple_sort(&mut v[a..], is_less);

    while step < size {
        let double = step * 2;
        let mut a = 0;
        while a + double <= size {
            symmerge(&mut v[a..a + double], step, is_less);
            a += double;
        }
        if a + step < size {
            // The tail is shorter than a full pair but has sorted
            // content on both sides of `step`.
            symmerge(&mut v[a..], step, is_less);
        }
        step = double;
    }
}

/// Merges the sorted halves `v[..border]` and `v[border..]` in place
/// using symmetric binary search (Kim & Kutzner).
pub(crate) fn symmerge<T, F>(v: &mut [T], border: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let size = v.len();

    // A one-element half inserts directly, skipping the recursion.
    if border == 1 {
        let (mut a, mut b) = (1, size);
        while a < b {
            let m = (a + b) / 2;
            if is_less(&v[m], &v[0]) {
                a = m + 1;
            } else {
                b = m;
            }
        }
        v[..a].rotate_left(1);
        return;
    }

    if border == size - 1 {
        let (mut a, mut b) = (0, border);
        while a < b {
            let m = (a + b) / 2;
            if is_less(&v[border], &v[m]) {
                b = m;
            } else {
                a = m + 1;
            }
        }
        v[a..].rotate_right(1);
        return;
    }

    // Find the symmetric meeting point: the longest prefix of the left
    // piece that can swap wholesale with a suffix of the right piece.
    // Mirrored indices satisfy p - m == (n - m) - 1, which makes the
    // same search work whichever half is the short one.
    let half = size / 2;
    let n = border + half;
    let (mut a, mut b) = if border > half {
        (n - size, half)
    } else {
        (0, border)
    };

    let p = n - 1;
    while a < b {
        let m = (a + b) / 2;
        if is_less(&v[p - m], &v[m]) {
            b = m;
        } else {
            a = m + 1;
        }
    }
    let b = n - a;

    if a < border && border < b {
        rotate(&mut v[a..b], border - a);
    }
    if 0 < a && a < half {
        symmerge(&mut v[..half], a, is_less);
    }
    if half < b && b < size {
        symmerge(&mut v[half..], b - half, is_less);
    }
}

/// Rotates `v` so that `v[border..]` comes first.
///
/// Triple reverse needs more swaps than a block-swap rotation but fewer
/// branches, which wins for small element types.
fn rotate<T>(v: &mut [T], border: usize) {
    v[..border].reverse();
    v[border..].reverse();
    v.reverse();
}

/// Top-down ping-pong merge: sorts `dst[..len]`, clobbering `src`.
///
/// # Safety
///
/// `src` and `dst` must each be valid for `len` reads and writes, must
/// not overlap, and must hold bitwise-identical content at entry. One of
/// them is the caller's live buffer, the other holds copies that must
/// never be dropped; on return (normal or unwinding) both ranges hold a
/// full element set, so the live side never loses or duplicates an
/// element.
unsafe fn merge_sort<T, F>(src: *mut T, dst: *mut T, len: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if len < MAX_MERGE_SIMPLE_SORT_LEN {
        // src and dst agree here, so inserting src into dst is the same
        // as sorting dst in place.
        simple_sort(&mut *ptr::slice_from_raw_parts_mut(dst, len), is_less);
        return;
    }

    let half = len / 2;

    // The halves land sorted in src, then merge back into dst.
    merge_sort(dst, src, half, is_less);
    merge_sort(dst.add(half), src.add(half), len - half, is_less);

    // If the comparator unwinds mid-merge, the guard repairs dst from
    // the still-intact src, so neither buffer ends up with a partial
    // element set.
    let backfill = MergeBackfill { src, dst, len };

    let (mut i, mut j, mut k) = (0, half, 0);
    while i < half && j < len {
        // Strict comparison of the right run makes ties take from the
        // left run, which is what keeps the merge stable.
        let take = if is_less(&*src.add(j), &*src.add(i)) {
            let t = j;
            j += 1;
            t
        } else {
            let t = i;
            i += 1;
            t
        };
        ptr::copy_nonoverlapping(src.add(take), dst.add(k), 1);
        k += 1;
    }
    if i < half {
        ptr::copy_nonoverlapping(src.add(i), dst.add(k), half - i);
    } else {
        ptr::copy_nonoverlapping(src.add(j), dst.add(k), len - j);
    }

    mem::forget(backfill);
}

// On drop, copies the whole src range over dst. Armed only while a merge
// step runs, during which src is read-only.
struct MergeBackfill<T> {
    src: *mut T,
    dst: *mut T,
    len: usize,
}

impl<T> Drop for MergeBackfill<T> {
    fn drop(&mut self) {
        // SAFETY: merge_sort's contract makes src and dst valid for len
        // elements and disjoint; src has not changed since the guard was
        // armed.
        unsafe {
            ptr::copy_nonoverlapping(self.src, self.dst, self.len);
        }
    }
}
