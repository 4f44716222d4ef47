//! # crediario-core
//!
//! The deterministic form engine for the Crediário console - THE LOGIC.
//!
//! This crate implements the client-intake substrate: the mask/format
//! engine, the 4-step registration wizard (an explicit reducer-style
//! state machine), per-step validators, submission payload assembly,
//! CNPJ check-digit verification and the pagination window used by
//! listing screens.
//!
//! ## Architectural Constraints
//!
//! The core:
//! - Is pure Rust: NO async, NO network dependencies, NO I/O
//! - Is deterministic: `BTreeMap` everywhere, no floats, no randomness
//! - Mutates form state only through [`WizardState::apply`]; the shell
//!   executes the returned effects and feeds results back as events

// =============================================================================
// MODULES
// =============================================================================

pub mod document;
pub mod fields;
pub mod mask;
pub mod pagination;
pub mod payload;
pub mod types;
pub mod validate;
pub mod wizard;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{CrediarioError, LookupAddress};

// =============================================================================
// RE-EXPORTS: Form Engine
// =============================================================================

pub use document::is_valid_cnpj;
pub use fields::{Errors, FieldValue, Fields};
pub use mask::{MaskKind, apply_mask, apply_mask_named, strip_digits};
pub use pagination::{PageToken, page_window};
pub use payload::ClientPayload;
pub use wizard::{
    GENERIC_SUBMIT_ERROR, Step, SubmitOutcome, WizardEffect, WizardEvent, WizardState,
    mask_for_field,
};
