//! Constant-product pricing of a single oriented pool.
//!
//! All arithmetic is exact integer arithmetic in the token's smallest unit, rounded toward
//! zero the way the pair contract rounds.
use std::fmt::{self, Display};
use std::str::FromStr;

use alloy::primitives::{Uint, U256};
use serde::{Deserialize, Serialize};

use crate::scan::Edge;

/// Wide enough that the product of any two `U256` values cannot overflow
type U512 = Uint<512, 8>;

/// Whether the scanned reserve already reflects the pending input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingConvention {
    /// `out = floor(in * reserve_out / reserve_in)`
    #[default]
    Spot,
    /// `out = floor(in * reserve_out / (reserve_in + in))`, reserve_in taken after the deposit
    ConstantProduct,
}

impl PricingConvention {
    /// Output of trading `amount_in` against `reserve_in`/`reserve_out`.
    ///
    /// Returns `None` when the pool cannot take the trade: the input exceeds `reserve_in`, or
    /// the output would not leave `reserve_out` strictly positive.
    #[must_use]
    pub fn amount_out(self, amount_in: U256, reserve_in: U256, reserve_out: U256) -> Option<U256> {
        if reserve_in < amount_in {
            return None;
        }

        let denominator = match self {
            Self::Spot => widen(reserve_in),
            Self::ConstantProduct => widen(reserve_in) + widen(amount_in),
        };
        if denominator.is_zero() {
            return None;
        }

        // amount_in <= denominator, so the quotient is at most reserve_out and fits in 256 bits
        let amount_out = narrow(widen(amount_in) * widen(reserve_out) / denominator);
        (amount_out < reserve_out).then_some(amount_out)
    }

    /// Output of trading `amount_in` through `edge`
    #[must_use]
    pub fn edge_amount_out(self, edge: &Edge, amount_in: U256) -> Option<U256> {
        self.amount_out(amount_in, edge.reserve_in, edge.reserve_out)
    }

    /// Output of trading `amount_in` through consecutive hops, each of which must be usable
    #[must_use]
    pub fn path_amount_out(self, hops: &[&Edge], amount_in: U256) -> Option<U256> {
        hops.iter()
            .try_fold(amount_in, |amount, edge| self.edge_amount_out(edge, amount))
    }
}

impl Display for PricingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spot => write!(f, "spot"),
            Self::ConstantProduct => write!(f, "constant-product"),
        }
    }
}

impl FromStr for PricingConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spot" => Ok(Self::Spot),
            "constant-product" | "constant_product" => Ok(Self::ConstantProduct),
            other => Err(format!("unknown pricing convention {other}")),
        }
    }
}

fn widen(value: U256) -> U512 {
    let limbs = value.as_limbs();
    U512::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3], 0, 0, 0, 0])
}

fn narrow(value: U512) -> U256 {
    let limbs = value.as_limbs();
    U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]])
}
