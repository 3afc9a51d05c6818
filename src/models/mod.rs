/// Token metadata and token-list records
pub mod token;
