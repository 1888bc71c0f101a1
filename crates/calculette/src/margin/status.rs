use rust_decimal::Decimal;

use super::domain::MarginStatus;

/// Single shared classification of a margin percentage against client thresholds.
///
/// | margin                       | status  |
/// |------------------------------|---------|
/// | `>= target`                  | OK      |
/// | `>= minimum` and `< target`  | WARNING |
/// | `< minimum`                  | KO      |
pub fn classify(
    margin_percent: Decimal,
    minimum_margin_percent: Decimal,
    target_margin_percent: Decimal,
) -> MarginStatus {
    if margin_percent >= target_margin_percent {
        MarginStatus::Ok
    } else if margin_percent >= minimum_margin_percent {
        MarginStatus::Warning
    } else {
        MarginStatus::Ko
    }
}
