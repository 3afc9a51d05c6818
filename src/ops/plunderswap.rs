use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use super::OperationRegistry;
use crate::chain::{ChainReader, ChainWriter};
use crate::service::{QuoteParams, SwapParams, SwapService};
use crate::tokens::TokenListSource;

/// `plunderswap_tokens` takes no input
#[derive(Debug, Deserialize)]
struct NoParams {}

/// Registers `plunderswap_tokens`, `plunderswap_quote` and `plunderswap_swap` against `service`
pub fn register_swap_operations<C, S>(registry: &mut OperationRegistry, service: &Arc<SwapService<C, S>>)
where
    C: ChainReader + ChainWriter + 'static,
    S: TokenListSource + 'static,
{
    let tokens = Arc::clone(service);
    registry.register(
        "plunderswap_tokens",
        "List the symbols of every token PlunderSwap can trade on the connected chain.",
        json!({ "type": "object", "properties": {} }),
        json!({
            "type": "object",
            "properties": {
                "tokens": { "type": "array", "items": { "type": "string" } }
            },
            "required": ["tokens"]
        }),
        move |_: NoParams| {
            let service = Arc::clone(&tokens);
            async move { service.list_tokens().await }
        },
    );

    let quote = Arc::clone(service);
    registry.register(
        "plunderswap_quote",
        "Quote how much of toToken fromAmount of fromToken buys over the best direct or \
         one-intermediate route. Set execute to also perform the swap, bounded by the router's \
         own output less slippageBps.",
        json!({
            "type": "object",
            "properties": {
                "fromToken": { "type": "string", "description": "Symbol of the token paid" },
                "fromAmount": { "type": "string", "description": "Amount paid, in human units, e.g. \"1.5\"" },
                "toToken": { "type": "string", "description": "Symbol of the token received" },
                "execute": { "type": "boolean", "description": "Execute the quoted route. Default false." },
                "slippageBps": {
                    "type": ["integer", "null"],
                    "minimum": 0,
                    "maximum": 10000,
                    "description": "When executing, accepted shortfall below the router's output in basis points"
                }
            },
            "required": ["fromToken", "fromAmount", "toToken"]
        }),
        json!({
            "type": "object",
            "properties": {
                "amount": { "type": "string", "description": "Amount received, in human units" },
                "tokenPath": { "type": "array", "items": { "type": "string" } },
                "txHashes": { "type": "array", "items": { "type": "string" } }
            },
            "required": ["amount", "tokenPath", "txHashes"]
        }),
        move |params: QuoteParams| {
            let service = Arc::clone(&quote);
            async move { service.quote(params).await }
        },
    );

    let swap = Arc::clone(service);
    registry.register(
        "plunderswap_swap",
        "Swap along an explicit token path. exactInput pays exactly fromAmount for at least \
         toAmount; exactOutput receives exactly toAmount for at most fromAmount.",
        json!({
            "type": "object",
            "properties": {
                "tokenPath": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": 2,
                    "description": "Symbols from the token paid to the token received"
                },
                "fromAmount": { "type": "string", "description": "Input amount in human units" },
                "toAmount": { "type": "string", "description": "Output amount in human units" },
                "toAddress": { "type": "string", "description": "Recipient address" },
                "deadline": { "type": "integer", "description": "Unix time after which the swap reverts" },
                "swapType": { "type": "string", "enum": ["exactInput", "exactOutput"], "description": "Default exactInput" }
            },
            "required": ["tokenPath", "fromAmount", "toAmount", "toAddress", "deadline"]
        }),
        json!({
            "type": "object",
            "properties": {
                "txHashes": { "type": "array", "items": { "type": "string" } }
            },
            "required": ["txHashes"]
        }),
        move |params: SwapParams| {
            let service = Arc::clone(&swap);
            async move { service.swap(params).await }
        },
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::chain::mock::MockChain;
    use crate::config::{Config, ZILLIQA_MAINNET};
    use crate::error::RouterError;
    use crate::route::test_helpers::token_with_decimals;
    use crate::tokens::{StaticTokenList, TokenDirectory};

    fn registry() -> OperationRegistry {
        let (a, b) = (token_with_decimals("A", 2), token_with_decimals("B", 2));
        let chain = MockChain::new().with_pool(&a, &b, 1000, 500);
        let directory = TokenDirectory::new(StaticTokenList::new(ZILLIQA_MAINNET, vec![a, b]));
        let service = Arc::new(SwapService::new(chain, directory, Config::default()));

        let mut registry = OperationRegistry::new();
        register_swap_operations(&mut registry, &service);
        registry
    }

    #[test]
    fn test_operations_are_described() {
        let registry = registry();
        let names: Vec<_> = registry.operations().map(|operation| operation.name).collect();
        assert_eq!(
            names,
            ["plunderswap_tokens", "plunderswap_quote", "plunderswap_swap"]
        );
        for operation in registry.operations() {
            assert_eq!(operation.input_schema["type"], "object");
            assert!(operation.output_schema["required"].is_array());
        }
    }

    #[tokio::test]
    async fn test_invoke_tokens_and_quote() {
        let registry = registry();

        let tokens = registry
            .invoke("plunderswap_tokens", Value::Null)
            .await
            .unwrap();
        assert_eq!(tokens, json!({ "tokens": ["A", "B"] }));

        let quote = registry
            .invoke(
                "plunderswap_quote",
                json!({ "fromToken": "A", "fromAmount": "1", "toToken": "B" }),
            )
            .await
            .unwrap();
        assert_eq!(
            quote,
            json!({ "amount": "0.5", "tokenPath": ["A", "B"], "txHashes": [] })
        );
    }

    #[tokio::test]
    async fn test_invoke_executed_quote() {
        // quotes 0.5 B, the pool pays 0.45 after its fee
        let output = registry()
            .invoke(
                "plunderswap_quote",
                json!({ "fromToken": "A", "fromAmount": "1", "toToken": "B", "execute": true, "slippageBps": 0 }),
            )
            .await
            .unwrap();
        assert_eq!(output["amount"], json!("0.5"));
        assert_eq!(output["txHashes"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invoke_swap() {
        let output = registry()
            .invoke(
                "plunderswap_swap",
                json!({
                    "tokenPath": ["A", "B"],
                    "fromAmount": "1",
                    "toAmount": "0.4",
                    "toAddress": "0x0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e0e",
                    "deadline": 1_700_000_000_u64
                }),
            )
            .await
            .unwrap();
        assert_eq!(output["txHashes"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_field_is_invalid_request() {
        let err = registry()
            .invoke("plunderswap_quote", json!({ "fromToken": "A" }))
            .await
            .unwrap_err();
        assert!(matches!(err, RouterError::InvalidRequest(_)));
    }
}
