//! The copy-rule manifest
//!
//! Evaluates a fixed, deterministic table of (condition, source,
//! destination) rules against the collected options, producing the list of
//! planned copies. Planning performs no I/O beyond reading the kit's
//! directory listings, so the manifest is testable without materializing
//! anything.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::Result;
use crate::kit::KitSource;
use crate::options::InstallOptions;

/// The gemini-specific command template, only installed with the
/// integration it drives
const GEMINI_COMMAND: &str = "gemini-consult.md";

/// Suffix marking a direct-style variant of a command template
const DIRECT_SUFFIX: &str = "-direct";

/// Documentation files copied verbatim under `docs/ai-context/`
const AI_CONTEXT_DOCS: &[&str] = &[
    "docs-overview.md",
    "system-integration.md",
    "deployment-infrastructure.md",
    "handoff.md",
];

/// What a planned file is, for grouping and summary output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Command,
    Documentation,
    Hook,
    HookConfig,
    Sound,
    RootContext,
    Settings,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Command => "commands",
            Category::Documentation => "documentation",
            Category::Hook => "hooks",
            Category::HookConfig => "hook config",
            Category::Sound => "sounds",
            Category::RootContext => "root context",
            Category::Settings => "settings",
        }
    }
}

/// How the conflict engine treats a planned file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Normal: existing destinations go through the conflict policy
    Respect,
    /// Written only when absent; an existing file is never touched,
    /// bypassing the conflict engine entirely
    NeverClobber,
}

/// A planned copy operation
#[derive(Debug, Clone)]
pub struct FileAction {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub category: Category,
    pub write_mode: WriteMode,
    /// Marked executable during finalization (hook shell scripts only)
    pub executable: bool,
}

impl FileAction {
    fn copy(source: PathBuf, dest: PathBuf, category: Category) -> Self {
        Self {
            source,
            dest,
            category,
            write_mode: WriteMode::Respect,
            executable: false,
        }
    }

    fn hook_script(source: PathBuf, dest: PathBuf) -> Self {
        Self {
            source,
            dest,
            category: Category::Hook,
            write_mode: WriteMode::Respect,
            executable: true,
        }
    }

    fn never_clobber(source: PathBuf, dest: PathBuf) -> Self {
        Self {
            source,
            dest,
            category: Category::RootContext,
            write_mode: WriteMode::NeverClobber,
            executable: false,
        }
    }
}

/// Evaluate the manifest into the ordered list of planned copies
pub fn plan(options: &InstallOptions, kit: &KitSource) -> Result<Vec<FileAction>> {
    let target = &options.target_dir;
    let mut actions = Vec::new();

    // Command templates, with per-command direct-variant substitution
    let command_files = kit.command_files()?;
    let available: HashSet<String> = command_files
        .iter()
        .filter_map(|p| p.file_stem())
        .map(|s| s.to_string_lossy().to_string())
        .collect();

    for source in &command_files {
        let Some(stem) = source.file_stem().map(|s| s.to_string_lossy().to_string()) else {
            continue;
        };
        // Variants are only reachable through their base command
        if stem.ends_with(DIRECT_SUFFIX) {
            continue;
        }
        let file_name = format!("{stem}.md");
        if file_name == GEMINI_COMMAND && !options.enable_gemini {
            continue;
        }

        let direct_stem = format!("{stem}{DIRECT_SUFFIX}");
        let chosen = if options.use_direct_command_style && available.contains(&direct_stem) {
            kit.path(&format!("commands/{direct_stem}.md"))
        } else {
            source.clone()
        };

        // Variants land under the canonical command name
        actions.push(FileAction::copy(
            chosen,
            target.join(".claude/commands").join(&file_name),
            Category::Command,
        ));
    }

    // Documentation skeleton
    for name in AI_CONTEXT_DOCS {
        actions.push(FileAction::copy(
            kit.path(&format!("docs/ai-context/{name}")),
            target.join("docs/ai-context").join(name),
            Category::Documentation,
        ));
    }
    actions.push(FileAction::copy(
        kit.path("docs/open-issues/README.md"),
        target.join("docs/open-issues/README.md"),
        Category::Documentation,
    ));
    actions.push(FileAction::copy(
        kit.path("docs/specs/README.md"),
        target.join("docs/specs/README.md"),
        Category::Documentation,
    ));

    // Specializable docs, renamed to the canonical destination so only one
    // variant can ever occupy the canonical path
    let spec = options.specialization;
    actions.push(FileAction::copy(
        kit.specialized_or_generic(
            spec,
            "docs/CONTEXT-tier2-component.md",
            "CONTEXT-tier2-component.md",
        ),
        target.join("docs/CONTEXT-tier2-component.md"),
        Category::Documentation,
    ));
    actions.push(FileAction::copy(
        kit.specialized_or_generic(
            spec,
            "docs/CONTEXT-tier3-feature.md",
            "CONTEXT-tier3-feature.md",
        ),
        target.join("docs/CONTEXT-tier3-feature.md"),
        Category::Documentation,
    ));
    actions.push(FileAction::copy(
        kit.specialized_or_generic(
            spec,
            "docs/ai-context/project-structure.md",
            "project-structure.md",
        ),
        target.join("docs/ai-context/project-structure.md"),
        Category::Documentation,
    ));

    // Hooks
    actions.push(FileAction::copy(
        kit.path("hooks/README.md"),
        target.join(".claude/hooks/README.md"),
        Category::Hook,
    ));
    if options.any_mcp() {
        actions.push(FileAction::hook_script(
            kit.path("hooks/mcp-security-scan.sh"),
            target.join(".claude/hooks/mcp-security-scan.sh"),
        ));
    }
    if options.enable_gemini {
        actions.push(FileAction::hook_script(
            kit.path("hooks/gemini-context-injector.sh"),
            target.join(".claude/hooks/gemini-context-injector.sh"),
        ));
    }
    if !options.use_direct_command_style {
        actions.push(FileAction::hook_script(
            kit.path("hooks/subagent-context-injector.sh"),
            target.join(".claude/hooks/subagent-context-injector.sh"),
        ));
    }
    if options.enable_notifications {
        actions.push(FileAction::hook_script(
            kit.path("hooks/notify.sh"),
            target.join(".claude/hooks/notify.sh"),
        ));
        for sound in kit.sound_files()? {
            let Some(name) = sound.file_name().map(|n| n.to_os_string()) else {
                continue;
            };
            actions.push(FileAction::copy(
                sound,
                target.join(".claude/hooks/sounds").join(name),
                Category::Sound,
            ));
        }
    }

    // Security pattern config (specializable)
    actions.push(FileAction::copy(
        kit.specialized_or_generic(
            spec,
            "hooks/config/sensitive-patterns.json",
            "sensitive-patterns.json",
        ),
        target.join(".claude/hooks/config/sensitive-patterns.json"),
        Category::HookConfig,
    ));

    // Root context files: never clobber an existing one
    actions.push(FileAction::never_clobber(
        kit.specialized_or_generic(spec, "CLAUDE.md", "CLAUDE.md"),
        target.join("CLAUDE.md"),
    ));
    if options.enable_gemini {
        actions.push(FileAction::never_clobber(
            kit.path("MCP-ASSISTANT-RULES.md"),
            target.join("MCP-ASSISTANT-RULES.md"),
        ));
    }

    Ok(actions)
}
