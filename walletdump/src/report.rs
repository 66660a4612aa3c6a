//! Plain-text tables for wallet contents

use xmr_client::{Amount, Payment};

pub const TX_HEADER: &str =
    "timestamp         height  id/hash                                                              amount         fee           payment_id";

pub fn balance_line(total: Amount, unlocked: Amount) -> String {
    format!("Balance: {:>16} ({:>16} unlocked)", total.to_string(), unlocked.to_string())
}

/// One table row. Unconfirmed transfers show `-` for the height.
pub fn payment_row(payment: &Payment) -> String {
    let height = payment
        .height
        .map(|height| height.to_string())
        .unwrap_or_else(|| "-".to_string());
    let payment_id = payment
        .payment_id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();
    format!(
        "{} {:>7} {} {:>17} {:>13} {}",
        payment.timestamp.format("%d-%m-%y %H:%M:%S"),
        height,
        payment.tx_hash,
        payment.amount.to_string(),
        payment.fee.to_string(),
        payment_id,
    )
}

pub fn payment_table(title: &str, payments: &[Payment]) -> Option<String> {
    if payments.is_empty() {
        return None;
    }
    let mut lines = vec![format!("\n{}:", title), TX_HEADER.to_string()];
    lines.extend(payments.iter().map(payment_row));
    Some(lines.join("\n"))
}
