//! Bounded page-number window for pagination controls.
//!
//! Small page counts are shown in full. Beyond [`FULL_WINDOW_LIMIT`] pages the
//! window keeps the first and last page, the current page with its immediate
//! neighbors, and ellipsis markers for the gaps:
//!
//! ```text
//! total=20, current=1   →  1 2 3 4 … 20
//! total=20, current=10  →  1 … 9 10 11 … 20
//! total=20, current=20  →  1 … 17 18 19 20
//! ```

use serde::{Deserialize, Serialize};

/// Largest page count rendered without truncation.
pub const FULL_WINDOW_LIMIT: u32 = 7;

/// One slot in the rendered page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageMarker {
    Page(u32),
    Ellipsis,
}

impl PageMarker {
    #[must_use]
    pub const fn page(self) -> Option<u32> {
        match self {
            Self::Page(n) => Some(n),
            Self::Ellipsis => None,
        }
    }
}

/// Computes the markers a page navigation bar should show.
///
/// `total_pages` below 1 is treated as 1 and `current_page` is clamped into
/// `1..=total_pages`, so the result is always a valid window.
///
/// ```
/// use candidate_browser::domain::page_window::{page_window, PageMarker::*};
///
/// assert_eq!(
///     page_window(10, 20),
///     vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
/// );
/// ```
#[must_use]
pub fn page_window(current_page: u32, total_pages: u32) -> Vec<PageMarker> {
    let total = total_pages.max(1);
    let current = current_page.clamp(1, total);

    if total <= FULL_WINDOW_LIMIT {
        return (1..=total).map(PageMarker::Page).collect();
    }

    let mut markers = vec![PageMarker::Page(1)];

    if current > 3 {
        markers.push(PageMarker::Ellipsis);
    }

    let mut start = current.saturating_sub(1).max(2);
    let mut end = current.saturating_add(1).min(total - 1);
    if current <= 3 {
        end = 4;
    }
    if current >= total - 2 {
        start = total - 3;
    }
    markers.extend((start..=end).map(PageMarker::Page));

    if current < total - 2 {
        markers.push(PageMarker::Ellipsis);
    }

    markers.push(PageMarker::Page(total));
    markers
}

/// Page reached by a "previous" control, or `None` on the first page.
#[must_use]
pub const fn previous_page(current_page: u32) -> Option<u32> {
    if current_page > 1 {
        Some(current_page - 1)
    } else {
        None
    }
}

/// Page reached by a "next" control, or `None` on the last page.
#[must_use]
pub const fn next_page(current_page: u32, total_pages: u32) -> Option<u32> {
    if current_page < total_pages {
        Some(current_page + 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::PageMarker::{Ellipsis, Page};
    use super::*;
    use proptest::prelude::*;

    fn pages(markers: &[PageMarker]) -> Vec<u32> {
        markers.iter().filter_map(|m| m.page()).collect()
    }

    #[test]
    fn small_counts_show_every_page() {
        for current in 1..=5 {
            assert_eq!(
                page_window(current, 5),
                vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
            );
        }
        assert_eq!(page_window(7, 7).len(), 7);
        assert_eq!(page_window(1, 1), vec![Page(1)]);
    }

    #[test]
    fn zero_total_behaves_like_one_page() {
        assert_eq!(page_window(1, 0), vec![Page(1)]);
        assert_eq!(page_window(0, 0), vec![Page(1)]);
    }

    #[test]
    fn middle_page_shows_neighbors_between_ellipses() {
        assert_eq!(
            page_window(10, 20),
            vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn near_start_has_no_leading_ellipsis() {
        let expected = vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(20)];
        assert_eq!(page_window(1, 20), expected);
        assert_eq!(page_window(2, 20), expected);
        assert_eq!(page_window(3, 20), expected);
        assert_eq!(
            page_window(4, 20),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn near_end_has_no_trailing_ellipsis() {
        let expected = vec![Page(1), Ellipsis, Page(17), Page(18), Page(19), Page(20)];
        assert_eq!(page_window(18, 20), expected);
        assert_eq!(page_window(19, 20), expected);
        assert_eq!(page_window(20, 20), expected);
    }

    #[test]
    fn eight_pages_is_the_first_truncated_count() {
        assert_eq!(
            page_window(1, 8),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(8)]
        );
        assert_eq!(
            page_window(8, 8),
            vec![Page(1), Ellipsis, Page(5), Page(6), Page(7), Page(8)]
        );
    }

    #[test]
    fn out_of_range_current_page_is_clamped() {
        assert_eq!(page_window(99, 20), page_window(20, 20));
        assert_eq!(page_window(0, 20), page_window(1, 20));
    }

    #[test]
    fn largest_page_counts_do_not_overflow() {
        let max = u32::MAX;
        assert_eq!(
            page_window(max, max),
            vec![Page(1), Ellipsis, Page(max - 3), Page(max - 2), Page(max - 1), Page(max)]
        );
        assert_eq!(page_window(max - 1, max), page_window(max, max));
        assert_eq!(next_page(max, max), None);
    }

    #[test]
    fn previous_and_next_stop_at_the_boundaries() {
        assert_eq!(previous_page(1), None);
        assert_eq!(previous_page(2), Some(1));
        assert_eq!(next_page(3, 3), None);
        assert_eq!(next_page(2, 3), Some(3));
        assert_eq!(next_page(1, 0), None);
    }

    proptest! {
        #[test]
        fn window_is_bounded_ordered_and_in_range(total in 1u32..500, offset in 0u32..500) {
            let current = offset % total + 1;
            let markers = page_window(current, total);

            prop_assert!(markers.len() <= 7);

            let numbers = pages(&markers);
            prop_assert!(numbers.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(numbers.iter().all(|&n| (1..=total).contains(&n)));
            prop_assert_eq!(numbers.first().copied(), Some(1));
            prop_assert_eq!(numbers.last().copied(), Some(total));
            prop_assert!(numbers.contains(&current));

            prop_assert!(markers
                .windows(2)
                .all(|w| !(w[0] == Ellipsis && w[1] == Ellipsis)));
        }
    }
}
