/// Discount granted to products whose stock count is even.
pub const PARITY_DISCOUNT_PERCENT: u32 = 20;

/// Parity rule: even stock earns [`PARITY_DISCOUNT_PERCENT`], odd stock earns nothing.
pub fn calculate_discount(stock: u64) -> u32 {
    if stock % 2 == 0 {
        PARITY_DISCOUNT_PERCENT
    } else {
        0
    }
}
