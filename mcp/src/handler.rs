//! Tool execution handlers.
//!
//! A handler is looked up by the tool's original name. Callers never see the
//! exposed name at this layer: the registry resolves it first.

use std::{fmt, future::Future, pin::Pin, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::McpResult;

/// Executes one tool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, arguments: Value) -> McpResult<Value>;
}

type BoxedCall = Arc<
    dyn Fn(Value) -> Pin<Box<dyn Future<Output = McpResult<Value>> + Send>> + Send + Sync,
>;

/// Handler backed by an async closure.
#[derive(Clone)]
pub struct FnHandler {
    call: BoxedCall,
}

impl FnHandler {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = McpResult<Value>> + Send + 'static,
    {
        Self {
            call: Arc::new(move |arguments| Box::pin(f(arguments))),
        }
    }
}

impl fmt::Debug for FnHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").finish_non_exhaustive()
    }
}

#[async_trait]
impl ToolHandler for FnHandler {
    async fn call(&self, arguments: Value) -> McpResult<Value> {
        (self.call)(arguments).await
    }
}

/// Returns its arguments unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoHandler;

#[async_trait]
impl ToolHandler for EchoHandler {
    async fn call(&self, arguments: Value) -> McpResult<Value> {
        Ok(arguments)
    }
}
