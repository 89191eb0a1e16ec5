//! Shared primitive types used across the allocator.

/// The canonical run identifier.
pub type RunId = String;

/// A technician's display name, original casing preserved.
pub type TechName = String;

/// `customer|date|item|pool` identifies one job across duplicate ledger rows.
pub type DedupKey = String;

/// Dollar amount. Payouts are rounded to cents before they leave the calculator.
pub type Money = f64;

/// Round half away from zero to whole cents.
pub fn round_cents(amount: Money) -> Money {
    (amount * 100.0).round() / 100.0
}
