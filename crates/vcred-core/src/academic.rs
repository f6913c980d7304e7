//! # Academic Entry Validation
//!
//! The institution-entered academic data for one issuance: the
//! institution's wallet address, the student's CGPA, and six semester
//! marks. The entry is ephemeral — it is never persisted on its own,
//! only embedded into the metadata document at assembly time.
//!
//! ## Validation
//!
//! `AcademicEntry::validate()` checks every field and reports **all**
//! violations together rather than stopping at the first, so a caller
//! can surface the complete set of problems at once.
//!
//! ## CGPA Representation
//!
//! CGPA is kept as the decimal string the institution entered and
//! validated to two-decimal fixed point in [0.00, 10.00]. Published
//! documents must not contain floats — float serialization is not
//! deterministic across languages, and the document's bytes are what
//! gets content-addressed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of semester marks an entry must carry.
pub const SEMESTER_COUNT: usize = 6;

/// CGPA bounds in hundredths: 0.00 ..= 10.00.
const CGPA_MAX_HUNDREDTHS: i64 = 1_000;

/// Per-semester mark bounds.
const MARK_MIN: i32 = 0;
const MARK_MAX: i32 = 100;

/// One failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// The field that failed (e.g. `"cgpa"`, `"semMarks[3]"`).
    pub field: String,
    /// What was wrong with it.
    pub message: String,
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation failure carrying the full set of failed field checks.
#[derive(Debug, Clone, Error)]
#[error("academic entry validation failed: {}", format_violations(violations))]
pub struct ValidationError {
    /// Every field check that failed, in field order.
    pub violations: Vec<FieldViolation>,
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Institution-entered academic data for one certificate issuance.
///
/// Fields hold the raw entered values; call [`validate()`](Self::validate)
/// before assembling them into a metadata document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicEntry {
    /// Wallet address of the issuing institution.
    pub institution_wallet_address: String,
    /// CGPA as a decimal string, e.g. `"8.50"`. Valid range [0.00, 10.00].
    pub cgpa: String,
    /// Marks for semesters 1-6, each in [0, 100].
    pub sem_marks: [i32; SEMESTER_COUNT],
}

impl AcademicEntry {
    /// Check every field and collect all violations.
    ///
    /// - `institution_wallet_address` must be non-empty.
    /// - `cgpa` must parse as a decimal with at most two fractional
    ///   digits and fall within [0.00, 10.00] inclusive.
    /// - Each of the six `sem_marks` must fall within [0, 100] inclusive.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        if self.institution_wallet_address.trim().is_empty() {
            violations.push(FieldViolation {
                field: "institutionWalletAddress".into(),
                message: "must not be empty".into(),
            });
        }

        if let Err(message) = parse_cgpa_hundredths(&self.cgpa) {
            violations.push(FieldViolation {
                field: "cgpa".into(),
                message,
            });
        }

        for (i, mark) in self.sem_marks.iter().enumerate() {
            if !(MARK_MIN..=MARK_MAX).contains(mark) {
                violations.push(FieldViolation {
                    field: format!("semMarks[{i}]"),
                    message: format!("mark {mark} outside [{MARK_MIN}, {MARK_MAX}]"),
                });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}

/// Parse a CGPA string to hundredths and range-check it.
///
/// Accepts `"8"`, `"8.5"`, and `"8.50"` forms. Rejects signs, more than
/// two fractional digits, and anything outside [0.00, 10.00].
fn parse_cgpa_hundredths(raw: &str) -> Result<i64, String> {
    let s = raw.trim();
    if s.is_empty() {
        return Err("must not be empty".into());
    }
    if s.starts_with('+') || s.starts_with('-') {
        // A sign means either a negative value or noise; both are out.
        return Err(format!("value {s:?} outside [0.00, 10.00]"));
    }

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("not a decimal number: {s:?}"));
    }
    if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!(
            "at most two fractional digits are recorded, got {s:?}"
        ));
    }

    let whole: i64 = whole
        .parse()
        .map_err(|_| format!("not a decimal number: {s:?}"))?;
    // Bound the whole part before scaling; arbitrarily long digit runs
    // must report out-of-range, never overflow.
    if whole > CGPA_MAX_HUNDREDTHS / 100 {
        return Err(format!("value {s:?} outside [0.00, 10.00]"));
    }
    let frac_hundredths = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().unwrap_or(0) * 10,
        _ => frac.parse::<i64>().unwrap_or(0),
    };
    let hundredths = whole * 100 + frac_hundredths;

    if hundredths > CGPA_MAX_HUNDREDTHS {
        return Err(format!("value {s:?} outside [0.00, 10.00]"));
    }
    Ok(hundredths)
}
