use std::ops::Range;

/// Maximum number of page buttons shown at once.
pub const WINDOW_SIZE: usize = 10;

pub fn total_pages(total_items: usize, items_per_page: usize) -> usize {
    if items_per_page == 0 {
        return 0;
    }
    total_items.div_ceil(items_per_page)
}

/// Page numbers to display around `current_page`.
///
/// The run is contiguous, ascending, within `[1, total_pages]` and at most
/// `WINDOW_SIZE` long. Out-of-range current pages are clamped into the nearest
/// full window rather than rejected.
pub fn page_window(total_items: usize, items_per_page: usize, current_page: i64) -> Vec<usize> {
    let total = total_pages(total_items, items_per_page) as i64;
    let size = WINDOW_SIZE as i64;
    let half = size / 2;

    let mut start = current_page.saturating_sub(half);
    let mut end = start.saturating_add(size - 1);

    if start < 1 {
        start = 1;
        end = size.min(total);
    } else if end > total {
        end = total;
        start = (total - size + 1).max(1);
    }

    if end < start {
        return Vec::new();
    }

    (start..=end).map(|page| page as usize).collect()
}

/// Index range of the items on 1-based `page`; empty when the page lies past the data.
pub fn page_bounds(total_items: usize, items_per_page: usize, page: usize) -> Range<usize> {
    let start = page
        .saturating_sub(1)
        .saturating_mul(items_per_page)
        .min(total_items);
    let end = start.saturating_add(items_per_page).min(total_items);
    start..end
}

/// Clamp a requested page into `[1, total_pages]`, staying at 1 when there are no pages.
pub fn clamp_page(page: usize, total_items: usize, items_per_page: usize) -> usize {
    page.clamp(1, total_pages(total_items, items_per_page).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_dataset_shows_every_page() {
        assert_eq!(page_window(30, 10, 1), vec![1, 2, 3]);
        assert_eq!(page_window(21, 10, 3), vec![1, 2, 3]);
    }

    #[test]
    fn window_centres_on_current_page() {
        assert_eq!(page_window(1000, 10, 50), (45..=54).collect::<Vec<_>>());
    }

    #[test]
    fn window_clamps_at_both_ends() {
        assert_eq!(page_window(1000, 10, 2), (1..=10).collect::<Vec<_>>());
        assert_eq!(page_window(1000, 10, 99), (91..=100).collect::<Vec<_>>());
        assert_eq!(page_window(1000, 10, 250), (91..=100).collect::<Vec<_>>());
        assert_eq!(page_window(1000, 10, -3), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn no_items_means_no_pages() {
        assert!(page_window(0, 10, 1).is_empty());
        assert!(page_window(0, 10, 7).is_empty());
        assert!(page_window(50, 0, 1).is_empty());
    }

    #[test]
    fn window_is_contiguous_and_bounded_for_every_input() {
        for total in 0..=1000usize {
            let total_items = total * 10;
            for current in -10..=(total as i64 + 10) {
                let window = page_window(total_items, 10, current);
                assert_eq!(
                    window.len(),
                    total.min(WINDOW_SIZE),
                    "total={total} current={current}"
                );
                if let (Some(first), Some(last)) = (window.first(), window.last()) {
                    assert!(*first >= 1 && *last <= total, "total={total} current={current}");
                }
                assert!(window.windows(2).all(|pair| pair[1] == pair[0] + 1));
                assert_eq!(window, page_window(total_items, 10, current));
            }
        }
    }

    #[test]
    fn bounds_slice_the_requested_page() {
        assert_eq!(page_bounds(36, 10, 1), 0..10);
        assert_eq!(page_bounds(36, 10, 4), 30..36);
        assert_eq!(page_bounds(36, 10, 5), 36..36);
        assert_eq!(page_bounds(36, 10, 0), 0..10);
        assert_eq!(total_pages(36, 10), 4);
        assert_eq!(clamp_page(9, 36, 10), 4);
        assert_eq!(clamp_page(0, 0, 10), 1);
    }
}
