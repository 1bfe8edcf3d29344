//! Base-unit amounts and their decimal rendering
//!
//! Balances are read as integers in the chain's smallest unit (wei,
//! lamports, satoshis, lovelace) and rendered without going through floats.

use serde::{Deserialize, Serialize};

/// Integer amount in base units with the number of decimals of the unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    raw: u128,
    decimals: u32,
}

impl Amount {
    pub fn new(raw: u128, decimals: u32) -> Self {
        Self { raw, decimals }
    }

    /// Signed difference clamped at zero (e.g. funded minus spent)
    pub fn from_signed(raw: i128, decimals: u32) -> Self {
        Self {
            raw: raw.max(0) as u128,
            decimals,
        }
    }

    pub fn raw(&self) -> u128 {
        self.raw
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Full precision, e.g. `1500000000000000000` wei -> `1.500000000000000000`
    pub fn to_decimal_string(&self) -> String {
        render(self.raw, self.decimals)
    }

    /// Fixed number of decimals, rounding half up
    pub fn to_fixed(&self, precision: u32) -> String {
        if precision >= self.decimals {
            let scaled = self.raw * 10u128.pow(precision - self.decimals);
            return render(scaled, precision);
        }

        let divisor = 10u128.pow(self.decimals - precision);
        let mut quotient = self.raw / divisor;
        if (self.raw % divisor) * 2 >= divisor {
            quotient += 1;
        }
        render(quotient, precision)
    }
}

fn render(value: u128, decimals: u32) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    let unit = 10u128.pow(decimals);
    format!(
        "{}.{:0>width$}",
        value / unit,
        value % unit,
        width = decimals as usize
    )
}

/// Parse a `0x`-prefixed hex quantity as returned by JSON-RPC
pub fn parse_hex_quantity(value: &str) -> Result<u128, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(|| format!("quantity '{}' is not 0x-prefixed", value))?;
    if digits.is_empty() {
        return Ok(0);
    }
    u128::from_str_radix(digits, 16).map_err(|e| format!("invalid quantity '{}': {}", value, e))
}
