//! Configuration synthesizer
//!
//! Builds the `.claude/settings.local.json` document from the collected
//! options. Binding order within a group is stable (security-scan, then
//! context-injection, then orchestration-injection) because the consuming
//! tool treats order as priority. Empty groups are omitted entirely rather
//! than serialized as empty lists; the consumer expects absent keys, which
//! is a documented quirk and not to be "fixed".

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::options::InstallOptions;

/// One command registered for a lifecycle event
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HookCommand {
    #[serde(rename = "type")]
    pub kind: String,
    pub command: String,
}

impl HookCommand {
    fn script(relative: &str) -> Self {
        Self {
            kind: "command".to_string(),
            command: format!("$WORKSPACE/.claude/hooks/{relative}"),
        }
    }
}

/// An event binding: tool-name matcher plus the commands to run
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HookBinding {
    pub matcher: String,
    pub hooks: Vec<HookCommand>,
}

impl HookBinding {
    fn new(matcher: &str, script: &str) -> Self {
        Self {
            matcher: matcher.to_string(),
            hooks: vec![HookCommand::script(script)],
        }
    }
}

/// Event-name keyed binding groups; absent groups are omitted on the wire
#[derive(Debug, Clone, Serialize, Default)]
pub struct HookGroups {
    #[serde(rename = "PreToolUse", skip_serializing_if = "Option::is_none")]
    pub pre_tool_use: Option<Vec<HookBinding>>,

    #[serde(rename = "Notification", skip_serializing_if = "Option::is_none")]
    pub notification: Option<Vec<HookBinding>>,

    #[serde(rename = "Stop", skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<HookBinding>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentVars {
    #[serde(rename = "WORKSPACE")]
    pub workspace: String,
}

/// The synthesized settings document
#[derive(Debug, Clone, Serialize)]
pub struct SettingsDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hooks: Option<HookGroups>,
    pub environment: EnvironmentVars,
}

impl SettingsDocument {
    pub fn to_json_string(&self) -> Result<String> {
        let mut rendered = serde_json::to_string_pretty(self)?;
        rendered.push('\n');
        Ok(rendered)
    }
}

/// Compute the hook bindings implied by the selected options
pub fn synthesize(options: &InstallOptions, target_abs: &Path) -> SettingsDocument {
    let mut pre_tool_use = Vec::new();
    if options.any_mcp() {
        pre_tool_use.push(HookBinding::new("mcp__.*", "mcp-security-scan.sh"));
    }
    if options.enable_gemini {
        pre_tool_use.push(HookBinding::new(
            "mcp__gemini.*",
            "gemini-context-injector.sh",
        ));
    }
    if !options.use_direct_command_style {
        pre_tool_use.push(HookBinding::new("Task", "subagent-context-injector.sh"));
    }

    let mut groups = HookGroups::default();
    if !pre_tool_use.is_empty() {
        groups.pre_tool_use = Some(pre_tool_use);
    }
    if options.enable_notifications {
        groups.notification = Some(vec![HookBinding::new("", "notify.sh input")]);
        groups.stop = Some(vec![HookBinding::new("", "notify.sh complete")]);
    }

    let has_any = groups.pre_tool_use.is_some() || groups.notification.is_some();
    SettingsDocument {
        hooks: has_any.then_some(groups),
        environment: EnvironmentVars {
            workspace: target_abs.display().to_string(),
        },
    }
}
