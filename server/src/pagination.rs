use std::ops::RangeInclusive;

use admin_api_client::Pagination;
use serde::Serialize;

/// Number of page buttons shown at once.
pub const MAX_VISIBLE_PAGES: u32 = 5;

/// Sliding window of `width` page numbers centered on `current`, clamped to
/// `[1, total_pages]`. Near the last page the window shifts left so it stays
/// full whenever there are enough pages.
pub fn page_window(current: u32, total_pages: u32, width: u32) -> RangeInclusive<u32> {
    let total = total_pages.max(1);
    let width = width.max(1);
    let current = current.clamp(1, total);

    let mut start = current.saturating_sub(width / 2).max(1);
    let end = start.saturating_add(width - 1).min(total);
    if end - start + 1 < width {
        start = (end + 1).saturating_sub(width).max(1);
    }
    start..=end
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageLink {
    pub page: u32,
    pub current: bool,
}

/// A previous/next control. `page` is only meaningful when enabled.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StepLink {
    pub page: u32,
    pub disabled: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaginationControls {
    pub prev: StepLink,
    pub pages: Vec<PageLink>,
    pub next: StepLink,
    pub first_item: u64,
    pub last_item: u64,
    pub total_items: u64,
}

impl PaginationControls {
    /// `None` when everything fits on one page.
    pub fn build(current: u32, limit: u32, envelope: &Pagination) -> Option<Self> {
        let total_pages = envelope.total_pages;
        if total_pages <= 1 {
            return None;
        }
        let current = current.clamp(1, total_pages);

        let prev_disabled = !envelope.has_prev_page || current <= 1;
        let next_disabled = !envelope.has_next_page || current >= total_pages;

        let pages = page_window(current, total_pages, MAX_VISIBLE_PAGES)
            .map(|page| PageLink {
                page,
                current: page == current,
            })
            .collect();

        let limit = u64::from(limit.max(1));
        let first_item = (u64::from(current) - 1) * limit + 1;
        let last_item = (u64::from(current) * limit).min(envelope.total_users);

        Some(PaginationControls {
            prev: StepLink {
                page: current.saturating_sub(1).max(1),
                disabled: prev_disabled,
            },
            pages,
            next: StepLink {
                page: current.saturating_add(1).min(total_pages),
                disabled: next_disabled,
            },
            first_item,
            last_item,
            total_items: envelope.total_users,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(current: u32, total_pages: u32, total_users: u64) -> Pagination {
        Pagination {
            current_page: Some(current),
            total_pages,
            total_users,
            has_next_page: current < total_pages,
            has_prev_page: current > 1,
        }
    }

    #[test]
    fn window_is_centered_on_current_page() {
        assert_eq!(page_window(5, 10, 5), 3..=7);
    }

    #[test]
    fn window_is_clamped_at_the_start() {
        assert_eq!(page_window(1, 10, 5), 1..=5);
        assert_eq!(page_window(2, 10, 5), 1..=5);
    }

    #[test]
    fn window_shifts_left_near_the_end() {
        assert_eq!(page_window(10, 10, 5), 6..=10);
        assert_eq!(page_window(9, 10, 5), 6..=10);
    }

    #[test]
    fn window_shrinks_when_there_are_few_pages() {
        assert_eq!(page_window(2, 3, 5), 1..=3);
        assert_eq!(page_window(1, 0, 5), 1..=1);
    }

    #[test]
    fn no_control_references_a_page_out_of_range() {
        for total in 1..=12u32 {
            for current in 0..=total + 3 {
                let Some(controls) = PaginationControls::build(current, 10, &envelope(current, total, 120)) else {
                    assert!(total <= 1);
                    continue;
                };
                assert!(controls.pages.len() <= MAX_VISIBLE_PAGES as usize);
                for link in &controls.pages {
                    assert!((1..=total).contains(&link.page), "page {} of {}", link.page, total);
                }
                for step in [&controls.prev, &controls.next] {
                    assert!(step.disabled || (1..=total).contains(&step.page));
                }
            }
        }
    }

    #[test]
    fn boundaries_disable_previous_and_next() {
        let first = PaginationControls::build(1, 10, &envelope(1, 4, 35)).unwrap();
        assert!(first.prev.disabled);
        assert!(!first.next.disabled);

        let last = PaginationControls::build(4, 10, &envelope(4, 4, 35)).unwrap();
        assert!(!last.prev.disabled);
        assert!(last.next.disabled);
    }

    #[test]
    fn server_flags_win_over_position() {
        let mut pagination = envelope(2, 4, 35);
        pagination.has_prev_page = false;
        pagination.has_next_page = false;

        let controls = PaginationControls::build(2, 10, &pagination).unwrap();

        assert!(controls.prev.disabled);
        assert!(controls.next.disabled);
    }

    #[test]
    fn summary_counts_items_on_the_page() {
        let controls = PaginationControls::build(4, 10, &envelope(4, 4, 35)).unwrap();
        assert_eq!((controls.first_item, controls.last_item, controls.total_items), (31, 35, 35));
    }

    #[test]
    fn single_page_has_no_controls() {
        assert!(PaginationControls::build(1, 10, &envelope(1, 1, 4)).is_none());
    }
}
