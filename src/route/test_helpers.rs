use alloy::primitives::{Address, U256};

use crate::models::token::Token;
use crate::scan::{Edge, EdgeKind, ScanResult};

/// Deterministic address from a short label, right aligned: "A" -> 0x00..41
pub fn address_from_str(label: &str) -> Address {
    let mut bytes = [0u8; 20];
    let label = label.as_bytes();
    let len = label.len().min(20);
    bytes[20 - len..].copy_from_slice(&label[..len]);
    Address::from(bytes)
}

/// An 18-decimals token whose address is derived from its symbol
pub fn token(symbol: &str) -> Token {
    Token::new(symbol, address_from_str(symbol), 18)
}

/// A token with explicit decimals
pub fn token_with_decimals(symbol: &str, decimals: u8) -> Token {
    Token::new(symbol, address_from_str(symbol), decimals)
}

/// An edge through a pool labelled `token_in/token_out`
pub fn edge(kind: EdgeKind, token_in: &str, token_out: &str, reserve_in: u64, reserve_out: u64) -> Edge {
    edge_in_pool(
        &format!("P{token_in}{token_out}"),
        kind,
        token_in,
        token_out,
        reserve_in,
        reserve_out,
    )
}

/// An edge through an explicitly labelled pool
pub fn edge_in_pool(
    pool: &str,
    kind: EdgeKind,
    token_in: &str,
    token_out: &str,
    reserve_in: u64,
    reserve_out: u64,
) -> Edge {
    Edge {
        pool: address_from_str(pool),
        kind,
        token_in: token(token_in),
        token_out: token(token_out),
        reserve_in: U256::from(reserve_in),
        reserve_out: U256::from(reserve_out),
    }
}

/// A scan result assembled from edges, each filed under its kind
pub fn scan(edges: Vec<Edge>) -> ScanResult {
    let mut result = ScanResult::default();
    for edge in edges {
        result.push(edge);
    }
    result
}
