/*!
 * # Plunder - PlunderSwap swap router
 *
 * Quotes and executes token swaps on PlunderSwap, a constant-product DEX on the Zilliqa EVM.
 *
 * ## Core Features
 *
 * - **Token Directory**: Per-chain symbol and address lookup, fetched once from a token list
 * - **Pool Scanning**: Walks the factory's pair registry and orients pools for a request
 * - **Route Pricing**: Direct and one-intermediate routes priced with exact integer arithmetic
 * - **Trade Execution**: Allowance-aware approvals and router swaps awaited to their receipts
 *
 * ## Module Structure
 *
 * - `chain`: Contract bindings and the chain read/write traits
 * - `config`: Configuration management and per-chain deployments
 * - `error`: Error taxonomy
 * - `execute`: Trade Executor
 * - `models`: Data models for the application
 * - `ops`: Operation registry exposed to callers
 * - `route`: Route Pricing Engine
 * - `scan`: Pool Scanner
 * - `service`: The list, quote and swap operations
 * - `tokens`: Token Directory
 * - `utils`: Utility functions and helpers
 */

/// Contract bindings and chain access traits
pub mod chain;
/// Configuration management for the system
pub mod config;
/// Error taxonomy
pub mod error;
/// Approval and swap execution
pub mod execute;
/// Data models for the application
pub mod models;
/// Explicit operation registry
pub mod ops;
/// Route pricing and selection
pub mod route;
/// Pair registry scanning
pub mod scan;
/// Quote and swap service
pub mod service;
/// Token directory
pub mod tokens;
/// Utility functions and helpers
pub mod utils;
