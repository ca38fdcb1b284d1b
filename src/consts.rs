/// Authorization header scheme expected on every authenticated call.
pub const BEARER_SCHEME: &str = "Bearer";

/// Monetary amounts are rounded to the currency's minor unit.
pub const CURRENCY_SCALE: u32 = 2;
