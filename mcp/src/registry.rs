//! Tool registry.
//!
//! Publishes tools under names that fit the client's length budget and
//! dispatches calls made with either the exposed or the original name.

use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use tool_naming::NameResolver;
use tracing::{debug, info, warn};

use crate::{
    config::{McpConfig, NamingConfig},
    error::{McpError, McpResult},
    handler::ToolHandler,
    inventory::{ToolDefinition, ToolEntry, ToolInventory, ToolSource},
    loader,
};

/// A tool as it is listed to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExposedTool {
    /// Name clients see and call with
    pub exposed_name: String,
    pub original_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<Value>,
}

impl ExposedTool {
    pub fn is_shortened(&self) -> bool {
        self.exposed_name != self.original_name
    }
}

pub struct ToolRegistry {
    inventory: ToolInventory,
    handlers: RwLock<HashMap<String, Arc<dyn ToolHandler>>>,
    resolver: Arc<NameResolver>,
    naming: NamingConfig,
}

impl ToolRegistry {
    pub fn new(naming: NamingConfig, resolver: Arc<NameResolver>) -> Self {
        Self {
            inventory: ToolInventory::new(),
            handlers: RwLock::new(HashMap::new()),
            resolver,
            naming,
        }
    }

    /// Build a registry and load every definition listed in `config.tools`.
    pub async fn from_config(config: &McpConfig, resolver: Arc<NameResolver>) -> McpResult<Self> {
        config.naming.validate()?;
        let registry = Self::new(config.naming.clone(), resolver);
        if !config.tools.paths.is_empty() {
            loader::load_into(&registry.inventory, &config.tools.paths).await?;
        }
        Ok(registry)
    }

    pub fn inventory(&self) -> &ToolInventory {
        &self.inventory
    }

    pub fn resolver(&self) -> &Arc<NameResolver> {
        &self.resolver
    }

    pub fn naming(&self) -> &NamingConfig {
        &self.naming
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register a tool defined in code together with its handler.
    pub fn register(
        &self,
        definition: ToolDefinition,
        handler: Arc<dyn ToolHandler>,
    ) -> McpResult<()> {
        let name = definition.name.clone();
        if name.trim().is_empty() {
            return Err(McpError::InvalidDefinition {
                source_name: "register".to_string(),
                reason: "empty tool name".to_string(),
            });
        }

        let mut handlers = self.handlers.write();
        if handlers.contains_key(&name) || self.resolver.resolve_alias(&name).is_some() {
            return Err(McpError::DuplicateTool(name));
        }

        self.inventory
            .insert_entry(ToolEntry::new(definition).with_source(ToolSource::Custom));
        handlers.insert(name.clone(), handler);

        debug!(tool_name = %name, "Registered tool");
        Ok(())
    }

    /// Attach a handler to a tool already present in the inventory.
    ///
    /// Replaces any handler previously attached to the same tool.
    pub fn attach_handler(&self, tool_name: &str, handler: Arc<dyn ToolHandler>) -> McpResult<()> {
        if !self.inventory.has_tool(tool_name) {
            return Err(McpError::ToolNotFound(tool_name.to_string()));
        }
        if self
            .handlers
            .write()
            .insert(tool_name.to_string(), handler)
            .is_some()
        {
            debug!(tool_name = %tool_name, "Replaced tool handler");
        }
        Ok(())
    }

    /// Make `alias` callable as `target`.
    ///
    /// An alias may not take the name of a tool or of an exposed name, so a
    /// tool stays reachable by its original name whatever the exposure state.
    pub fn register_alias(&self, alias: &str, target: &str) -> McpResult<()> {
        if self.inventory.has_tool(alias) || self.resolver.lookup_original(alias).is_some() {
            return Err(McpError::DuplicateTool(alias.to_string()));
        }

        let original = self.resolver.resolve(target);
        if !self.inventory.has_tool(&original) {
            return Err(McpError::ToolNotFound(target.to_string()));
        }

        self.resolver.register_alias(alias, original.as_str());
        info!("Registered alias '{}' → '{}'", alias, original);
        Ok(())
    }

    pub fn has_handler(&self, tool_name: &str) -> bool {
        self.handlers.read().contains_key(tool_name)
    }

    // ========================================================================
    // Exposure
    // ========================================================================

    /// Every inventory tool under the name clients should see, in inventory
    /// order.
    ///
    /// With `naming.shorten_names` off, original names are published as-is.
    pub fn exposed_tools(&self) -> McpResult<Vec<ExposedTool>> {
        let budget = self.naming.budget();
        let entries = self.inventory.list_tools();
        let mut exposed = Vec::with_capacity(entries.len());
        let mut shortened = 0usize;

        for entry in entries {
            let definition = entry.definition;
            let exposed_name = if self.naming.shorten_names {
                self.resolver.get_exposed_name(&definition.name, budget)?
            } else {
                definition.name.clone()
            };
            if exposed_name != definition.name {
                shortened += 1;
            }

            exposed.push(ExposedTool {
                exposed_name,
                original_name: definition.name,
                description: definition.description,
                parameter: definition.parameter,
            });
        }

        debug!(
            tools = exposed.len(),
            shortened,
            budget,
            shorten_names = self.naming.shorten_names,
            "Built exposed tool list"
        );
        Ok(exposed)
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Call a tool by exposed name, alias or original name.
    pub async fn call_tool(&self, requested: &str, arguments: Value) -> McpResult<Value> {
        let original = self.resolver.resolve(requested);
        let handler = self
            .handlers
            .read()
            .get(&original)
            .cloned()
            .ok_or_else(|| McpError::ToolNotFound(requested.to_string()))?;

        if original != requested {
            debug!(requested = %requested, original = %original, "Resolved tool name");
        }

        let result = handler.call(arguments).await;
        if let Err(e) = &result {
            warn!(tool_name = %original, error = %e, "Tool call failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::handler::{EchoHandler, FnHandler};

    const FDA_LONG: &str = "FDA_get_info_on_conditions_for_doctor_consultation_by_drug_name";
    const FDA_SHORT: &str = "FDA_get_info_on_cond_for_doct_cons_by_drug_name";

    fn registry() -> ToolRegistry {
        ToolRegistry::new(NamingConfig::default(), Arc::new(NameResolver::new()))
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let registry = registry();
        registry
            .register(ToolDefinition::new("echo_tool"), Arc::new(EchoHandler))
            .unwrap();

        let err = registry
            .register(ToolDefinition::new("echo_tool"), Arc::new(EchoHandler))
            .unwrap_err();
        assert!(matches!(err, McpError::DuplicateTool(ref name) if name == "echo_tool"));
    }

    #[test]
    fn test_register_rejects_empty_name() {
        let registry = registry();
        let err = registry
            .register(ToolDefinition::new(""), Arc::new(EchoHandler))
            .unwrap_err();
        assert!(matches!(err, McpError::InvalidDefinition { .. }));
        assert!(registry.inventory().is_empty());
    }

    #[test]
    fn test_exposed_tools_shortens_long_names() {
        let registry = registry();
        registry
            .register(
                ToolDefinition::new(FDA_LONG)
                    .with_description("Conditions for consultation")
                    .with_parameter(json!({"type": "object", "required": ["drug_name"]})),
                Arc::new(EchoHandler),
            )
            .unwrap();
        registry
            .register(
                ToolDefinition::new("UniProt_get_function_by_accession"),
                Arc::new(EchoHandler),
            )
            .unwrap();

        let exposed = registry.exposed_tools().unwrap();
        assert_eq!(exposed.len(), 2);
        assert_eq!(exposed[0].exposed_name, FDA_SHORT);
        assert_eq!(exposed[0].original_name, FDA_LONG);
        assert!(exposed[0].is_shortened());
        assert_eq!(
            exposed[0].description.as_deref(),
            Some("Conditions for consultation")
        );
        assert_eq!(
            exposed[0].parameter,
            Some(json!({"type": "object", "required": ["drug_name"]}))
        );
        assert_eq!(exposed[1].exposed_name, "UniProt_get_function_by_accession");
        assert!(!exposed[1].is_shortened());
    }

    #[test]
    fn test_exposed_tools_is_stable_across_cycles() {
        let registry = registry();
        registry
            .register(ToolDefinition::new(FDA_LONG), Arc::new(EchoHandler))
            .unwrap();

        let first = registry.exposed_tools().unwrap();
        let second = registry.exposed_tools().unwrap();
        assert_eq!(first, second);
        assert_eq!(registry.resolver().counts().mappings, 1);
    }

    #[test]
    fn test_exposed_tools_with_shortening_disabled() {
        let naming = NamingConfig {
            shorten_names: false,
            ..NamingConfig::default()
        };
        let registry = ToolRegistry::new(naming, Arc::new(NameResolver::new()));
        registry
            .register(ToolDefinition::new(FDA_LONG), Arc::new(EchoHandler))
            .unwrap();

        let exposed = registry.exposed_tools().unwrap();
        assert_eq!(exposed[0].exposed_name, FDA_LONG);
        assert!(registry.resolver().is_empty());
    }

    #[tokio::test]
    async fn test_call_tool_by_either_name() {
        let registry = registry();
        registry
            .register(
                ToolDefinition::new(FDA_LONG),
                Arc::new(FnHandler::new(|arguments: Value| async move {
                    Ok(json!({ "drug": arguments["drug_name"], "conditions": ["pregnancy"] }))
                })),
            )
            .unwrap();
        registry.exposed_tools().unwrap();

        let arguments = json!({"drug_name": "ibuprofen"});
        let by_original = registry.call_tool(FDA_LONG, arguments.clone()).await.unwrap();
        let by_exposed = registry.call_tool(FDA_SHORT, arguments).await.unwrap();
        assert_eq!(by_original, by_exposed);
        assert_eq!(by_exposed["drug"], "ibuprofen");
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let registry = registry();
        let err = registry
            .call_tool("FDA_get_nothing", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, McpError::ToolNotFound(ref name) if name == "FDA_get_nothing"));
    }

    #[tokio::test]
    async fn test_call_tool_without_handler() {
        let registry = registry();
        registry
            .inventory()
            .insert_tool(ToolDefinition::new("FDA_get_drug_name"));

        let err = registry
            .call_tool("FDA_get_drug_name", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, McpError::ToolNotFound(_)));

        registry
            .attach_handler("FDA_get_drug_name", Arc::new(EchoHandler))
            .unwrap();
        assert!(registry.has_handler("FDA_get_drug_name"));
        assert_eq!(
            registry
                .call_tool("FDA_get_drug_name", json!({"q": 1}))
                .await
                .unwrap(),
            json!({"q": 1})
        );
    }

    #[test]
    fn test_attach_handler_unknown_tool() {
        let registry = registry();
        let err = registry
            .attach_handler("missing_tool", Arc::new(EchoHandler))
            .unwrap_err();
        assert!(matches!(err, McpError::ToolNotFound(_)));
    }

    #[tokio::test]
    async fn test_handler_error_propagates() {
        let registry = registry();
        registry
            .register(
                ToolDefinition::new("failing_tool"),
                Arc::new(FnHandler::new(|_| async {
                    Err(McpError::ToolExecution("upstream returned 503".into()))
                })),
            )
            .unwrap();

        let err = registry.call_tool("failing_tool", json!({})).await.unwrap_err();
        assert!(matches!(err, McpError::ToolExecution(_)));
    }

    #[tokio::test]
    async fn test_register_alias() {
        let registry = registry();
        registry
            .register(ToolDefinition::new(FDA_LONG), Arc::new(EchoHandler))
            .unwrap();
        registry.exposed_tools().unwrap();

        // Targets may be given by exposed name
        registry.register_alias("fda_conditions", FDA_SHORT).unwrap();
        assert_eq!(
            registry.resolver().resolve_alias("fda_conditions").as_deref(),
            Some(FDA_LONG)
        );

        let result = registry
            .call_tool("fda_conditions", json!({"drug_name": "aspirin"}))
            .await
            .unwrap();
        assert_eq!(result, json!({"drug_name": "aspirin"}));
    }

    #[tokio::test]
    async fn test_alias_cannot_shadow_tool_name() {
        let registry = registry();
        for (name, label) in [("FDA_get_drug_name", "drug_name"), ("FDA_get_warnings", "warnings")] {
            registry
                .register(
                    ToolDefinition::new(name),
                    Arc::new(FnHandler::new(move |_| async move { Ok(json!(label)) })),
                )
                .unwrap();
        }

        let err = registry
            .register_alias("FDA_get_drug_name", "FDA_get_warnings")
            .unwrap_err();
        assert!(matches!(err, McpError::DuplicateTool(ref name) if name == "FDA_get_drug_name"));

        let before = registry.call_tool("FDA_get_drug_name", json!({})).await.unwrap();
        registry.exposed_tools().unwrap();
        let after = registry.call_tool("FDA_get_drug_name", json!({})).await.unwrap();
        assert_eq!(before, json!("drug_name"));
        assert_eq!(before, after);
    }

    #[test]
    fn test_alias_cannot_shadow_exposed_name() {
        let registry = registry();
        registry
            .register(ToolDefinition::new(FDA_LONG), Arc::new(EchoHandler))
            .unwrap();
        registry
            .register(ToolDefinition::new("FDA_get_warnings"), Arc::new(EchoHandler))
            .unwrap();
        registry.exposed_tools().unwrap();

        let err = registry
            .register_alias(FDA_SHORT, "FDA_get_warnings")
            .unwrap_err();
        assert!(matches!(err, McpError::DuplicateTool(_)));
        assert_eq!(registry.resolver().resolve(FDA_SHORT), FDA_LONG);
    }

    #[test]
    fn test_register_rejects_name_taken_by_alias() {
        let registry = registry();
        registry
            .register(ToolDefinition::new("FDA_get_warnings"), Arc::new(EchoHandler))
            .unwrap();
        registry
            .register_alias("fda_warnings", "FDA_get_warnings")
            .unwrap();

        let err = registry
            .register(ToolDefinition::new("fda_warnings"), Arc::new(EchoHandler))
            .unwrap_err();
        assert!(matches!(err, McpError::DuplicateTool(ref name) if name == "fda_warnings"));
        assert!(!registry.inventory().has_tool("fda_warnings"));
    }

    #[test]
    fn test_register_alias_unknown_target() {
        let registry = registry();
        let err = registry
            .register_alias("shortcut", "missing_tool")
            .unwrap_err();
        assert!(matches!(err, McpError::ToolNotFound(_)));
        assert!(registry.resolver().list_aliases().is_empty());
    }

    #[tokio::test]
    async fn test_from_config_loads_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("fda.json"),
            format!(r#"[{{"name": "{}"}}, {{"name": "FDA_get_drug_name"}}]"#, FDA_LONG),
        )
        .unwrap();

        let mut config = McpConfig::default();
        config.tools.paths.push(dir.path().to_path_buf());

        let registry = ToolRegistry::from_config(&config, Arc::new(NameResolver::new()))
            .await
            .unwrap();
        let names: Vec<_> = registry
            .exposed_tools()
            .unwrap()
            .into_iter()
            .map(|t| t.exposed_name)
            .collect();
        assert_eq!(names, vec![FDA_SHORT, "FDA_get_drug_name"]);
    }
}
