//! Pagination Primitives
//!
//! Page math shared by every list screen (totals, clamping, offsets) and
//! the planner that turns `(total_pages, current_page)` into the bounded
//! row of clickable page buttons with jump markers.

use serde::{Deserialize, Serialize};

/// Default rows per page for list screens.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Upper bound on rendered pagination controls, markers included.
pub const MAX_PLAN_LEN: usize = 9;

/// Pages shown on each side of the current page.
const WINDOW: u32 = 2;

/// Pages skipped when a jump marker is clicked.
const JUMP_STRIDE: u32 = 5;

// ============================================================================
// Page Requests and Results
// ============================================================================

/// A requested slice of a filtered listing.
///
/// Out-of-range values are not an error: the query clamps the page into
/// `[1, total_pages]` before slicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// First page with the default page size.
    pub fn first() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of a filtered listing.
///
/// `page` is the effective (clamped) page the rows were sliced from, so
/// callers can adopt it when the request was out of range. `total_pages`
/// is at least 1 even for an empty listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub rows: Vec<T>,
    pub total_items: u64,
    pub total_pages: u32,
    pub page: u32,
}

impl<T> PageResult<T> {
    /// The safe fallback returned when storage fails: no rows, one page.
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total_items: 0,
            total_pages: 1,
            page: 1,
        }
    }
}

/// `ceil(total_items / per_page)`, minimum 1 even when empty.
pub fn total_pages(total_items: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 1;
    }
    let pages = total_items.div_ceil(u64::from(per_page));
    pages.clamp(1, u64::from(u32::MAX)) as u32
}

/// Clamp a requested page into `[1, total_pages]`.
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Row offset for an already-clamped page.
pub fn page_offset(page: u32, per_page: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(per_page)
}

// ============================================================================
// Page Button Planning
// ============================================================================

/// One element of the rendered pagination control row.
///
/// A marker stands for a collapsed run of hidden pages; clicking it jumps
/// a fixed stride instead of selecting a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageButton {
    Page(u32),
    JumpBack,
    JumpForward,
}

impl PageButton {
    /// The page a click on this button requests.
    pub fn target(self, current_page: u32, total_pages: u32) -> u32 {
        match self {
            Self::Page(n) => n,
            Self::JumpBack => current_page.saturating_sub(JUMP_STRIDE).max(1),
            Self::JumpForward => (current_page + JUMP_STRIDE).min(total_pages.max(1)),
        }
    }
}

/// Compute the button row for a listing.
///
/// Always keeps page 1, page `total_pages`, and a window around
/// `current_page`; every gap collapses to a single jump marker. The
/// result never exceeds [`MAX_PLAN_LEN`] elements. Callers clamp
/// `current_page` before planning.
pub fn plan_page_buttons(total_pages: u32, current_page: u32) -> Vec<PageButton> {
    if total_pages == 0 {
        return Vec::new();
    }

    let mut pages: Vec<u32> = Vec::new();
    pages.push(1);
    let low = current_page.saturating_sub(WINDOW).max(1);
    let high = (current_page + WINDOW).min(total_pages);
    for p in low..=high {
        pages.push(p);
    }
    pages.push(total_pages);
    pages.sort_unstable();
    pages.dedup();

    let mut plan: Vec<PageButton> = Vec::with_capacity(pages.len() + 2);
    let mut prev: Option<u32> = None;
    for &p in &pages {
        if let Some(prev) = prev {
            if p - prev > 1 {
                // One marker per gap, oriented by which side of the
                // current page the hidden run falls on.
                if prev < current_page {
                    plan.push(PageButton::JumpBack);
                } else {
                    plan.push(PageButton::JumpForward);
                }
            }
        }
        plan.push(PageButton::Page(p));
        prev = Some(p);
    }

    // With a +/-2 window the natural maximum is exactly MAX_PLAN_LEN;
    // trim the middle toward the current page if that ever changes.
    while plan.len() > MAX_PLAN_LEN {
        let mid = plan.len() / 2;
        let victim = plan[2..plan.len() - 2]
            .iter()
            .enumerate()
            .filter_map(|(i, b)| match b {
                PageButton::Page(n) if *n != 1 && *n != total_pages => Some((i + 2, *n)),
                _ => None,
            })
            .max_by_key(|(_, n)| n.abs_diff(current_page))
            .map(|(i, _)| i)
            .unwrap_or(mid);
        plan.remove(victim);
    }

    plan
}
