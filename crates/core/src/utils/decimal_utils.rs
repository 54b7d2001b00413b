use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Rounds to the display precision, halves away from zero.
pub fn round_for_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_halves_round_away_from_zero() {
        assert_eq!(round_for_display(dec!(12.345)), dec!(12.35));
        assert_eq!(round_for_display(dec!(12.335)), dec!(12.34));
        assert_eq!(round_for_display(dec!(89.999)), dec!(90.00));
        assert_eq!(round_for_display(dec!(7.1)), dec!(7.1));
    }
}
