//! Repository configuration (`phantom.config.json`)
//!
//! Checked into the repository root and shared by everyone working on it.
//! Every section is optional. Keys this version does not know about are kept
//! verbatim in the `extra` maps so nothing is lost.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level repository configuration.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhantomConfig {
    /// Where worktrees live. Absolute paths are used as-is; relative paths
    /// are resolved against the repository root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worktrees_directory: Option<String>,

    /// Actions run after a worktree is created or attached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_create: Option<PostCreateConfig>,

    /// Commands run before a worktree is deleted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_delete: Option<PreDeleteConfig>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostCreateConfig {
    /// Paths (relative to the repository root) copied into new worktrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_files: Option<Vec<String>>,

    /// Shell commands run sequentially inside the new worktree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreDeleteConfig {
    /// Shell commands run sequentially inside the worktree before removal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PhantomConfig {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn post_create_copy_files(&self) -> &[String] {
        self.post_create
            .as_ref()
            .and_then(|pc| pc.copy_files.as_deref())
            .unwrap_or_default()
    }

    pub fn post_create_commands(&self) -> &[String] {
        self.post_create
            .as_ref()
            .and_then(|pc| pc.commands.as_deref())
            .unwrap_or_default()
    }

    pub fn pre_delete_commands(&self) -> &[String] {
        self.pre_delete
            .as_ref()
            .and_then(|pd| pd.commands.as_deref())
            .unwrap_or_default()
    }

    /// Check the shape of a parsed document, then convert it.
    ///
    /// Errors name the offending key path, e.g.
    /// `postCreate.commands.1: Expected string, received number`.
    pub(crate) fn from_value(value: Value) -> Result<Self, String> {
        validate_shape(&value)?;
        serde_json::from_value(value).map_err(|e| e.to_string())
    }
}

fn validate_shape(value: &Value) -> Result<(), String> {
    let root = expect_object(value, "")?;

    if let Some(dir) = root.get("worktreesDirectory") {
        expect_string(dir, "worktreesDirectory")?;
    }

    if let Some(post_create) = root.get("postCreate") {
        let section = expect_object(post_create, "postCreate")?;
        if let Some(files) = section.get("copyFiles") {
            expect_string_array(files, "postCreate.copyFiles")?;
        }
        if let Some(commands) = section.get("commands") {
            expect_string_array(commands, "postCreate.commands")?;
        }
    }

    if let Some(pre_delete) = root.get("preDelete") {
        let section = expect_object(pre_delete, "preDelete")?;
        if let Some(commands) = section.get("commands") {
            expect_string_array(commands, "preDelete.commands")?;
        }
    }

    Ok(())
}

fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, String> {
    value
        .as_object()
        .ok_or_else(|| type_mismatch(path, "object", value))
}

fn expect_string(value: &Value, path: &str) -> Result<(), String> {
    if value.is_string() {
        Ok(())
    } else {
        Err(type_mismatch(path, "string", value))
    }
}

fn expect_string_array(value: &Value, path: &str) -> Result<(), String> {
    let items = value
        .as_array()
        .ok_or_else(|| type_mismatch(path, "array", value))?;
    for (index, item) in items.iter().enumerate() {
        expect_string(item, &format!("{path}.{index}"))?;
    }
    Ok(())
}

fn type_mismatch(path: &str, expected: &str, actual: &Value) -> String {
    let received = match actual {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    if path.is_empty() {
        format!("Expected {expected}, received {received}")
    } else {
        format!("{path}: Expected {expected}, received {received}")
    }
}
