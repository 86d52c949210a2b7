//! Tool registry exposed to a calling model
//!
//! Each capability is registered once with a typed argument struct; the
//! struct drives both argument parsing (serde) and the parameter schema
//! handed to the model (schemars). Looking up a name that was never
//! registered is the only failure a well-formed call can produce.

use crate::agent::SignalsAgent;
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::num::NonZeroUsize;
use thiserror::Error;

pub const TOP_SIGNALS: &str = "top_signals";
pub const TICKER_DETAILS: &str = "ticker_details";

const DEFAULT_LIMIT: usize = 5;

fn default_limit() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_LIMIT).unwrap_or(NonZeroUsize::MIN)
}

/// Caller misuse only: an unregistered name, or arguments that do not fit the
/// capability (zero limit, missing ticker). Store and query failures never
/// appear here; they resolve to fallback data inside the handlers.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool '{0}'")]
    UnknownCapability(String),
    #[error("invalid arguments for '{capability}': {source}")]
    InvalidArguments {
        capability: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize tool result: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct TopSignalsArgs {
    #[serde(default = "default_limit")]
    #[schemars(description = "Number of tickers to return (default 5)")]
    pub limit: NonZeroUsize,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct TickerDetailsArgs {
    #[schemars(description = "Ticker symbol to inspect (case-insensitive)")]
    pub ticker: String,
    #[serde(default = "default_limit")]
    #[schemars(description = "Maximum rows to return (default 5)")]
    pub limit: NonZeroUsize,
}

type Handler = Box<dyn Fn(&SignalsAgent, Value) -> Result<Value, ToolError> + Send + Sync>;

struct RegisteredTool {
    name: &'static str,
    description: &'static str,
    parameters: Value,
    handler: Handler,
}

pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    /// Registry holding the two signal capabilities
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(
            TOP_SIGNALS,
            "Return the strongest tickers based on suspicious trades and bill timing.",
            |agent, args: TopSignalsArgs| agent.top_signals(args.limit.get()),
        );
        registry.register(
            TICKER_DETAILS,
            "Show recent suspicious trades and bill status changes for a specific ticker.",
            |agent, args: TickerDetailsArgs| agent.ticker_details(&args.ticker, args.limit.get()),
        );
        registry
    }

    pub fn empty() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a capability; a later registration under the same name replaces the earlier one
    pub fn register<A, R, F>(&mut self, name: &'static str, description: &'static str, handler: F)
    where
        A: DeserializeOwned + JsonSchema + 'static,
        R: Serialize + 'static,
        F: Fn(&SignalsAgent, A) -> R + Send + Sync + 'static,
    {
        let handler: Handler = Box::new(move |agent: &SignalsAgent, raw: Value| {
            let args: A = serde_json::from_value(raw).map_err(|source| ToolError::InvalidArguments {
                capability: name.to_string(),
                source,
            })?;
            Ok(serde_json::to_value(handler(agent, args))?)
        });

        let tool = RegisteredTool {
            name,
            description,
            parameters: parameters_schema::<A>(),
            handler,
        };

        match self.tools.iter_mut().find(|existing| existing.name == name) {
            Some(existing) => *existing = tool,
            None => self.tools.push(tool),
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|tool| tool.name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|tool| tool.name == name)
    }

    /// Tool list in the function-calling shape expected by chat-completion APIs
    pub fn describe(&self) -> Value {
        Value::Array(
            self.tools
                .iter()
                .map(|tool| {
                    json!({
                        "type": "function",
                        "function": {
                            "name": tool.name,
                            "description": tool.description,
                            "parameters": tool.parameters,
                        }
                    })
                })
                .collect(),
        )
    }

    /// Route a tool call to its handler; `null` arguments mean "all defaults"
    pub fn dispatch(
        &self,
        agent: &SignalsAgent,
        name: &str,
        args: Value,
    ) -> Result<Value, ToolError> {
        let tool = self
            .tools
            .iter()
            .find(|tool| tool.name == name)
            .ok_or_else(|| ToolError::UnknownCapability(name.to_string()))?;

        let args = match args {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };

        log::debug!("🔧 Dispatching {} with {}", name, args);
        (tool.handler)(agent, args)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON schema for an argument struct, without the root `$schema`/`title` keys
fn parameters_schema<A: JsonSchema>() -> Value {
    let mut schema =
        serde_json::to_value(schema_for!(A)).unwrap_or_else(|_| json!({"type": "object"}));
    if let Value::Object(map) = &mut schema {
        map.remove("$schema");
        map.remove("title");
    }
    schema
}
