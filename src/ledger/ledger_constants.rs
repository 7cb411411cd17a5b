/// Transaction kinds
///
/// Incoming funds. Increases the derived balance.
pub const TRANSACTION_KIND_DEPOSIT: &str = "DEPOSIT";

/// Outgoing funds. Decreases the derived balance.
pub const TRANSACTION_KIND_WITHDRAWAL: &str = "WITHDRAWAL";

pub const TRANSACTION_KINDS: [&str; 2] = [TRANSACTION_KIND_DEPOSIT, TRANSACTION_KIND_WITHDRAWAL];
