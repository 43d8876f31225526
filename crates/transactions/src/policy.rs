//! Exchange compatibility rule.

use sebo_catalog::Product;

/// Decides whether two products may be exchanged for one another.
///
/// Kept behind a trait so the rule can be replaced without touching the
/// transaction flow. Implementations must be symmetric.
pub trait ExchangePolicy: Send + Sync + core::fmt::Debug {
    fn can_exchange(&self, a: &Product, b: &Product) -> bool;
}

/// Products are exchangeable only within the same category.
#[derive(Debug, Default, Clone, Copy)]
pub struct SameKindPolicy;

impl ExchangePolicy for SameKindPolicy {
    fn can_exchange(&self, a: &Product, b: &Product) -> bool {
        a.kind() == b.kind()
    }
}
