//! # Mask/Format Engine
//!
//! Converts free-form keystrokes into the canonical display mask for each
//! input kind, and masked values back into digits-only submission values.
//!
//! Masks are purely numeric-grouping transformations: every non-digit in
//! the raw input is discarded before formatting. Separators are inserted
//! from an ordered break table, and the *formatted* string is truncated to
//! the kind's display capacity. Truncating the formatted string (never the
//! digit string) is load-bearing: for over-capacity input the cut-off is
//! defined by display length, and re-masking the output must reproduce it.

use serde::{Deserialize, Serialize};

// =============================================================================
// MASK KIND
// =============================================================================

/// Input kinds with a canonical display mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskKind {
    /// `000.000.000-00`
    Cpf,
    /// `00.000.000/0000-00`
    Cnpj,
    /// `(00) 00000-0000`, also used for WhatsApp numbers.
    Phone,
    /// `00000-000`
    Cep,
    /// `DD/MM/AAAA`
    Date,
    /// `00.000.000-0`
    Rg,
}

impl MaskKind {
    /// Every mask kind, in display order.
    pub const ALL: [MaskKind; 6] = [
        MaskKind::Cpf,
        MaskKind::Cnpj,
        MaskKind::Phone,
        MaskKind::Cep,
        MaskKind::Date,
        MaskKind::Rg,
    ];

    /// Resolve a kind from its string tag (case-insensitive).
    ///
    /// Unknown tags yield `None`; [`apply_mask_named`] treats those as
    /// passthrough.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "cpf" => Some(Self::Cpf),
            "cnpj" => Some(Self::Cnpj),
            "phone" | "telefone" | "whatsapp" => Some(Self::Phone),
            "cep" => Some(Self::Cep),
            "date" | "data" => Some(Self::Date),
            "rg" => Some(Self::Rg),
            _ => None,
        }
    }

    /// Maximum length of the formatted string, separators included.
    #[must_use]
    pub const fn display_capacity(self) -> usize {
        match self {
            Self::Cpf => 14,
            Self::Cnpj => 18,
            Self::Phone => 15,
            Self::Cep => 9,
            Self::Date => 10,
            Self::Rg => 12,
        }
    }

    /// Number of digits the mask can display before truncation kicks in.
    #[must_use]
    pub const fn digit_capacity(self) -> usize {
        match self {
            Self::Cpf => 11,
            Self::Cnpj => 14,
            Self::Phone => 11,
            Self::Cep => 8,
            Self::Date => 8,
            Self::Rg => 9,
        }
    }

    fn spec(self) -> &'static MaskSpec {
        match self {
            Self::Cpf => &CPF_SPEC,
            Self::Cnpj => &CNPJ_SPEC,
            Self::Phone => &PHONE_SPEC,
            Self::Cep => &CEP_SPEC,
            Self::Date => &DATE_SPEC,
            Self::Rg => &RG_SPEC,
        }
    }
}

// =============================================================================
// MASK SPECS (ordered break tables)
// =============================================================================

/// Formatting rules for one mask kind.
///
/// `breaks` lists `(digit_index, separator)` pairs: the separator is written
/// immediately before the digit at that index, so it only appears once a
/// further digit exists. `prefix` is written before the first digit, but
/// only once `prefix_min_digits` digits are present (the phone mask shows
/// no parenthesis until the third digit arrives).
struct MaskSpec {
    breaks: &'static [(usize, &'static str)],
    prefix: &'static str,
    prefix_min_digits: usize,
    cap: usize,
}

const CPF_SPEC: MaskSpec = MaskSpec {
    breaks: &[(3, "."), (6, "."), (9, "-")],
    prefix: "",
    prefix_min_digits: 0,
    cap: 14,
};

const CNPJ_SPEC: MaskSpec = MaskSpec {
    breaks: &[(2, "."), (5, "."), (8, "/"), (12, "-")],
    prefix: "",
    prefix_min_digits: 0,
    cap: 18,
};

const PHONE_SPEC: MaskSpec = MaskSpec {
    breaks: &[(2, ") "), (7, "-")],
    prefix: "(",
    prefix_min_digits: 3,
    cap: 15,
};

const CEP_SPEC: MaskSpec = MaskSpec {
    breaks: &[(5, "-")],
    prefix: "",
    prefix_min_digits: 0,
    cap: 9,
};

const DATE_SPEC: MaskSpec = MaskSpec {
    breaks: &[(2, "/"), (4, "/")],
    prefix: "",
    prefix_min_digits: 0,
    cap: 10,
};

const RG_SPEC: MaskSpec = MaskSpec {
    breaks: &[(2, "."), (5, "."), (8, "-")],
    prefix: "",
    prefix_min_digits: 0,
    cap: 12,
};

// =============================================================================
// OPERATIONS
// =============================================================================

/// Apply the display mask for `kind` to free-form input.
///
/// Total function: no errors, no side effects. Empty or digit-free input
/// returns the empty string; incomplete input returns a partial mask.
/// Feeding the output back in reproduces it exactly.
#[must_use]
pub fn apply_mask(raw: &str, kind: MaskKind) -> String {
    let digits = strip_digits(raw);
    if digits.is_empty() {
        return String::new();
    }

    let spec = kind.spec();
    let mut out = String::with_capacity(spec.cap);
    if digits.len() >= spec.prefix_min_digits {
        out.push_str(spec.prefix);
    }
    for (index, digit) in digits.chars().enumerate() {
        for &(at, separator) in spec.breaks {
            if index == at {
                out.push_str(separator);
            }
        }
        out.push(digit);
    }

    // Over-capacity input is cut at the formatted boundary, not the digit
    // boundary. All mask output is ASCII, so byte truncation is safe.
    out.truncate(spec.cap);
    out
}

/// String-keyed entry point: unknown kind names pass input through
/// unchanged (no masking, no truncation).
#[must_use]
pub fn apply_mask_named(raw: &str, kind_name: &str) -> String {
    match MaskKind::parse(kind_name) {
        Some(kind) => apply_mask(raw, kind),
        None => raw.to_string(),
    }
}

/// Normalize a masked value for submission: strip every non-digit.
#[must_use]
pub fn strip_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

// =============================================================================
// TESTS
// =============================================================================
