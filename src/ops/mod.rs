//! # Operation registry
//!
//! Operations are registered explicitly at startup: a name, a description, JSON schemas for
//! input and output, and a typed handler. [`OperationRegistry::invoke`] decodes the input,
//! runs the handler and encodes the result, so callers only ever see JSON.

/// The PlunderSwap operations
pub mod plunderswap;

use std::future::Future;

use futures::future::{self, BoxFuture, FutureExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{RouterError, RouterResult};

pub use plunderswap::register_swap_operations;

/// Type-erased handler: JSON in, JSON out
type Handler = Box<dyn Fn(Value) -> BoxFuture<'static, RouterResult<Value>> + Send + Sync>;

/// An externally discoverable operation
pub struct Operation {
    /// Unique name callers invoke it by
    pub name: &'static str,
    /// What the operation does
    pub description: &'static str,
    /// JSON schema of the input record
    pub input_schema: Value,
    /// JSON schema of the output record
    pub output_schema: Value,
    /// Decodes input, runs, encodes output
    handler: Handler,
}

impl Operation {
    /// Name, description and schemas as one JSON record
    #[must_use]
    pub fn describe(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema,
            "outputSchema": self.output_schema,
        })
    }
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Operations by name, in registration order
#[derive(Debug, Default)]
pub struct OperationRegistry {
    /// Registered operations
    operations: Vec<Operation>,
}

impl OperationRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `name`, replacing any operation already registered there.
    ///
    /// Input that does not decode into `P` is rejected with `InvalidRequest` before the
    /// handler runs.
    pub fn register<P, R, F, Fut>(
        &mut self,
        name: &'static str,
        description: &'static str,
        input_schema: Value,
        output_schema: Value,
        handler: F,
    ) where
        P: DeserializeOwned,
        R: Serialize,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RouterResult<R>> + Send + 'static,
    {
        let handler: Handler = Box::new(move |input: Value| -> BoxFuture<'static, RouterResult<Value>> {
            let params = match serde_json::from_value::<P>(input) {
                Ok(params) => params,
                Err(err) => {
                    return future::ready(Err(RouterError::InvalidRequest(format!(
                        "invalid input for {name}: {err}"
                    ))))
                    .boxed()
                }
            };
            let output = handler(params);
            async move { Ok::<_, RouterError>(serde_json::to_value(output.await?)?) }.boxed()
        });

        self.operations.retain(|operation| operation.name != name);
        self.operations.push(Operation {
            name,
            description,
            input_schema,
            output_schema,
            handler,
        });
    }

    /// Runs the operation registered as `name` on `input`.
    ///
    /// A `null` input is treated as an empty object.
    ///
    /// # Errors
    /// * `InvalidRequest` if no such operation exists or the input does not match
    /// * Whatever the handler fails with
    pub async fn invoke(&self, name: &str, input: Value) -> RouterResult<Value> {
        let operation = self
            .get(name)
            .ok_or_else(|| RouterError::InvalidRequest(format!("unknown operation {name}")))?;
        let input = if input.is_null() { json!({}) } else { input };

        log::debug!("ops::invoke: {name} {input}");
        (operation.handler)(input).await
    }

    /// The operation registered as `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.operations.iter().find(|operation| operation.name == name)
    }

    /// Registered operations in registration order
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    /// Every operation's description record
    #[must_use]
    pub fn describe(&self) -> Value {
        Value::Array(self.operations().map(Operation::describe).collect())
    }
}
