//! Fixed game rules.
//!
//! Nothing here is runtime-configurable: a session only chooses its seed and,
//! optionally, how many containers hold items instead of cash.

/// The canonical board, lowest to highest, in whole dollars.
pub const DENOMINATIONS: [u64; 26] = [
    1, 5, 10, 25, 50, 75, 100, 200,
    300, 400, 500, 750, 1_000, 5_000,
    10_000, 12_500, 25_000, 50_000, 75_000,
    100_000, 200_000, 300_000, 400_000,
    500_000, 750_000, 1_000_000,
];

/// One container per denomination.
pub const CONTAINER_COUNT: usize = DENOMINATIONS.len();

/// An offer opportunity arises after every third reveal.
pub const CHECKPOINT_INTERVAL: u32 = 3;

/// Upper bound (inclusive) on containers converted to items.
pub const MAX_ITEMS: usize = 3;

pub const SWAP_PROBABILITY: f64 = 0.20;

/// Offer factor is drawn uniformly from `[OFFER_FACTOR_MIN, OFFER_FACTOR_MAX]`.
pub const OFFER_FACTOR_MIN: f64 = 0.60;
pub const OFFER_FACTOR_MAX: f64 = 0.95;

pub const BONUS_TRIGGER_PROBABILITY: f64 = 0.30;
pub const BONUS_ELIGIBILITY_PROBABILITY: f64 = 0.50;

pub const MULTIPLIER_OPTION_COUNT: usize = 5;
/// Multiplier candidates use `q` in `MIN..=MAX`, as `×q` or `÷q`.
pub const MULTIPLIER_FACTOR_MIN: u32 = 2;
pub const MULTIPLIER_FACTOR_MAX: u32 = 5;

pub const ADDITIVE_OPTION_COUNT: usize = 10;
/// Additive candidates are `±step·k` for `k` in `1..=ADDITIVE_STEPS`.
pub const ADDITIVE_STEP: i64 = 100;
pub const ADDITIVE_STEPS: usize = 20;

/// Themed prizes that may stand in for a cash value.
pub const ITEM_LABELS: [&str; 18] = [
    "Luxury Watch", "Smartphone", "Laptop", "Vacation Package", "TV", "Gaming Console",
    "Bicycle", "Headphones", "Gift Card", "Camera", "Jewelry", "Car Rental",
    "Concert Tickets", "Spa Voucher", "Restaurant Meal", "Fitness Tracker", "Drone", "Tablet",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_is_strictly_increasing_and_positive() {
        assert!(DENOMINATIONS[0] > 0);
        for pair in DENOMINATIONS.windows(2) {
            assert!(pair[0] < pair[1], "{} must be below {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn board_spans_one_dollar_to_a_million() {
        assert_eq!(DENOMINATIONS.first(), Some(&1));
        assert_eq!(DENOMINATIONS.last(), Some(&1_000_000));
        assert_eq!(CONTAINER_COUNT, 26);
    }
}
