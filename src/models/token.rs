use std::fmt;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// A listed ERC-20 token.
///
/// Identity is the address; the symbol is the lookup key callers use.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    /// Display and lookup key, unique within one chain's directory
    pub symbol: String,
    /// Contract address
    pub address: Address,
    /// Number of decimals of the smallest unit
    pub decimals: u8,
}

impl Token {
    /// Create a new token
    #[must_use]
    pub fn new(symbol: impl Into<String>, address: Address, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            address,
            decimals,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// One entry of a published token list.
///
/// Addresses are kept as strings so a single malformed entry can be skipped
/// instead of failing the whole list.
#[derive(Debug, Deserialize)]
pub struct TokenRecord {
    /// Token symbol
    pub symbol: String,
    /// Hex address, any case
    pub address: String,
    /// Decimals
    pub decimals: u8,
}

impl TryFrom<TokenRecord> for Token {
    type Error = String;

    fn try_from(record: TokenRecord) -> Result<Self, Self::Error> {
        let address = record
            .address
            .parse::<Address>()
            .map_err(|e| format!("bad address {} for {}: {e}", record.address, record.symbol))?;
        Ok(Self::new(record.symbol, address, record.decimals))
    }
}

/// A token-list document. Fields other than `tokens` are ignored.
#[derive(Debug, Deserialize)]
pub struct TokenList {
    /// Listed tokens
    pub tokens: Vec<TokenRecord>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_parse_list() {
        let json = r#"{
            "name": "PlunderSwap",
            "tokens": [
                {"chainId": 33101, "symbol": "WZIL", "address": "0x8e8c4d14c5d39d3e8e2bd5d3f3e2f7d8e1b7c5a1", "decimals": 18, "logoURI": "x"},
                {"symbol": "BAD", "address": "0x12", "decimals": 6}
            ]
        }"#;
        let list: TokenList = serde_json::from_str(json).unwrap();
        assert_eq!(list.tokens.len(), 2);

        let mut records = list.tokens.into_iter();
        let wzil = Token::try_from(records.next().unwrap()).unwrap();
        assert_eq!(
            wzil.address,
            address!("0x8e8c4d14c5d39d3e8e2bd5d3f3e2f7d8e1b7c5a1")
        );
        assert_eq!(wzil.decimals, 18);
        assert!(Token::try_from(records.next().unwrap()).is_err());
    }
}
