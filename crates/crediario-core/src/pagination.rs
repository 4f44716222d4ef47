//! # Pagination Window
//!
//! Bounded page-number window for listing screens: the first and last
//! pages are always shown, plus every page within a radius of the current
//! one; each skipped run collapses into a single gap marker.
//!
//! Pure integer arithmetic, bounded by `2 * radius + 3` emitted pages
//! regardless of the total.

use serde::{Deserialize, Serialize};

/// One slot in the rendered page bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageToken {
    /// A navigable page number (1-based).
    Page(usize),
    /// A collapsed run of skipped pages (rendered as an ellipsis).
    Gap,
}

/// Compute the page window around `current` out of `total_pages`.
///
/// `current` is clamped into range; a total of zero yields an empty
/// window.
#[must_use]
pub fn page_window(current: usize, total_pages: usize, radius: usize) -> Vec<PageToken> {
    if total_pages == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total_pages);

    let window_start = current.saturating_sub(radius).max(1);
    let window_end = current.saturating_add(radius).min(total_pages);

    let mut pages: Vec<usize> = Vec::with_capacity(window_end - window_start + 3);
    pages.push(1);
    pages.extend(window_start..=window_end);
    pages.push(total_pages);
    pages.sort_unstable();
    pages.dedup();

    let mut tokens = Vec::with_capacity(pages.len() + 2);
    let mut previous = 0;
    for page in pages {
        if previous != 0 && page > previous + 1 {
            tokens.push(PageToken::Gap);
        }
        tokens.push(PageToken::Page(page));
        previous = page;
    }
    tokens
}

// =============================================================================
// TESTS
// =============================================================================
