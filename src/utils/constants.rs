use alloy::primitives::{address, Address};

/// PlunderSwap pair factory on Zilliqa mainnet
pub const MAINNET_FACTORY: Address = address!("0xf42d1058f233329185A36B04B7f96105afa1adD2");
/// PlunderSwap router on Zilliqa mainnet
pub const MAINNET_ROUTER: Address = address!("0x33C6a20D2a605da9Fd1F506ddEd449355f0564fe");
/// Default token list for Zilliqa mainnet
pub const MAINNET_TOKEN_LIST: &str = "https://plunderswap.github.io/token-lists/default-mainnet.json";

/// PlunderSwap pair factory on Zilliqa testnet
pub const TESTNET_FACTORY: Address = address!("0xd0156eFCA4D847E4c4aD3F9ECa7FA697bb105cC0");
/// PlunderSwap router on Zilliqa testnet
pub const TESTNET_ROUTER: Address = address!("0x144e7AEee22F388350E9EAEFBb626A021fcd0250");
/// Default token list for Zilliqa testnet
pub const TESTNET_TOKEN_LIST: &str = "https://plunderswap.com/lists/default-testnet.json";
