//! # Property-Based Tests
//!
//! Mask-engine and pagination invariants under proptest.

use crediario_core::{MaskKind, PageToken, apply_mask, page_window, strip_digits};
use proptest::prelude::*;

// =============================================================================
// MASK PROPERTIES
// =============================================================================

proptest! {
    /// Under-capacity digit strings survive mask + strip unchanged.
    #[test]
    fn mask_round_trips_digits_under_capacity(digits in "[0-9]{0,8}") {
        for kind in MaskKind::ALL {
            prop_assume!(digits.len() <= kind.digit_capacity());
            let masked = apply_mask(&digits, kind);
            prop_assert_eq!(strip_digits(&masked), digits.clone());
        }
    }

    /// CPF-sized inputs round-trip for the wider masks too.
    #[test]
    fn mask_round_trips_digits_up_to_eleven(digits in "[0-9]{9,11}") {
        for kind in [MaskKind::Cpf, MaskKind::Cnpj, MaskKind::Phone] {
            let masked = apply_mask(&digits, kind);
            prop_assert_eq!(strip_digits(&masked), digits.clone());
        }
    }

    /// Formatted output never exceeds the kind's display capacity,
    /// whatever the input.
    #[test]
    fn mask_output_is_bounded(raw in ".*") {
        for kind in MaskKind::ALL {
            prop_assert!(apply_mask(&raw, kind).len() <= kind.display_capacity());
        }
    }

    /// Masking is idempotent: re-masking the output reproduces it.
    #[test]
    fn mask_is_idempotent(raw in ".*") {
        for kind in MaskKind::ALL {
            let once = apply_mask(&raw, kind);
            let twice = apply_mask(&once, kind);
            prop_assert_eq!(once, twice);
        }
    }

    /// Submission normalization emits digits only.
    #[test]
    fn strip_digits_emits_digits_only(raw in ".*") {
        prop_assert!(strip_digits(&raw).chars().all(|c| c.is_ascii_digit()));
    }
}

// =============================================================================
// PAGINATION PROPERTIES
// =============================================================================

proptest! {
    /// The window always anchors on the first and last page and contains
    /// the (clamped) current page.
    #[test]
    fn page_window_anchors_and_contains_current(
        current in 0usize..200,
        total in 1usize..100,
        radius in 0usize..5,
    ) {
        let window = page_window(current, total, radius);
        let pages: Vec<usize> = window
            .iter()
            .filter_map(|token| match token {
                PageToken::Page(page) => Some(*page),
                PageToken::Gap => None,
            })
            .collect();

        prop_assert_eq!(pages.first().copied(), Some(1));
        prop_assert_eq!(pages.last().copied(), Some(total));
        prop_assert!(pages.contains(&current.clamp(1, total)));
        // strictly increasing, in range
        prop_assert!(pages.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(pages.iter().all(|page| (1..=total).contains(page)));
    }

    /// The emitted window is bounded regardless of the total.
    #[test]
    fn page_window_is_bounded(current in 1usize..10_000, total in 1usize..10_000) {
        let radius = 2;
        let window = page_window(current, total, radius);
        prop_assert!(window.len() <= 2 * radius + 3 + 2);
    }
}
