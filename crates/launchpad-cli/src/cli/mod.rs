//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! and help text.  Selection values parse through the core enums' `FromStr`
//! so every alias the domain accepts is accepted here too.

use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};

use launchpad_core::domain::{
    Auth, Database, ExtraLibrary, FolderStructure, Framework, Language, Orm, PackageManager,
    ProjectType, StateManagement, Styling, TestFramework, UiLibrary,
};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "launchpad",
    bin_name = "launchpad",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f680} Transactional project bootstrapper for JavaScript",
    long_about = "Launchpad drives each framework's official scaffolding tool, \
                  layers add-ons on top, and removes everything it created \
                  if a step fails.",
    after_help = "EXAMPLES:\n\
        \x20 launchpad new my-app --framework react --styling tailwind --ui shadcn\n\
        \x20 launchpad new my-api --framework nestjs --orm prisma --db postgres --pm pnpm\n\
        \x20 launchpad new my-lib --type library --dry-run\n\
        \x20 launchpad completions bash > /usr/share/bash-completion/completions/launchpad",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 launchpad new my-app  --framework vue --state pinia --test vitest\n\
            \x20 launchpad new my-site --framework astro --no-git\n\
            \x20 launchpad new my-app  --framework nextjs --dry-run"
    )]
    New(NewArgs),

    /// List supported frameworks and add-ons.
    #[command(
        visible_alias = "ls",
        about = "List frameworks and add-ons",
        after_help = "EXAMPLES:\n\
            \x20 launchpad list\n\
            \x20 launchpad list frameworks\n\
            \x20 launchpad list addons --format json"
    )]
    List(ListArgs),

    /// Initialise a Launchpad configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 launchpad init           # per-user location\n\
            \x20 launchpad init --force   # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 launchpad completions bash > ~/.local/share/bash-completion/completions/launchpad\n\
            \x20 launchpad completions zsh  > ~/.zfunc/_launchpad\n\
            \x20 launchpad completions fish > ~/.config/fish/completions/launchpad.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Launchpad configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 launchpad config get defaults.package_manager\n\
            \x20 launchpad config list\n\
            \x20 launchpad config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `launchpad new`.
///
/// Unset selections fall back to the `[defaults]` section of the config file.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name or path.  A plain name creates `./name`; a path like
    /// `../foo` places the project one level up.
    #[arg(value_name = "NAME", help = "Project name or path")]
    pub name: String,

    /// Project type; inferred from the framework when omitted.
    #[arg(
        short = 't',
        long = "type",
        value_name = "TYPE",
        value_parser = ProjectType::from_str,
        help = "Project type (frontend, fullstack, backend, library)"
    )]
    pub project_type: Option<ProjectType>,

    /// Framework; the project type's default when omitted.
    #[arg(
        short = 'f',
        long = "framework",
        value_name = "FRAMEWORK",
        value_parser = Framework::from_str,
        help = "Framework (react, vue, nextjs, nestjs, ... see `launchpad list`)"
    )]
    pub framework: Option<Framework>,

    #[arg(
        short = 'l',
        long = "lang",
        value_name = "LANGUAGE",
        value_parser = Language::from_str,
        help = "Language (typescript or javascript)"
    )]
    pub language: Option<Language>,

    #[arg(
        long = "pm",
        value_name = "PACKAGE_MANAGER",
        value_parser = PackageManager::from_str,
        help = "Package manager (npm, pnpm, yarn, bun)"
    )]
    pub package_manager: Option<PackageManager>,

    #[arg(
        short = 's',
        long = "styling",
        value_name = "STYLING",
        value_parser = Styling::from_str,
        help = "Styling (css, tailwind, scss, less, styled-components)"
    )]
    pub styling: Option<Styling>,

    #[arg(
        long = "state",
        value_name = "LIBRARY",
        value_parser = StateManagement::from_str,
        help = "State management (zustand, redux, jotai, pinia, mobx)"
    )]
    pub state: Option<StateManagement>,

    #[arg(
        long = "ui",
        value_name = "KIT",
        value_parser = UiLibrary::from_str,
        help = "UI component kit (shadcn, mui, chakra, mantine, antd, daisyui)"
    )]
    pub ui: Option<UiLibrary>,

    #[arg(
        long = "orm",
        value_name = "ORM",
        value_parser = Orm::from_str,
        help = "ORM (prisma, drizzle, typeorm, mongoose)"
    )]
    pub orm: Option<Orm>,

    #[arg(
        long = "db",
        value_name = "DATABASE",
        value_parser = Database::from_str,
        help = "Database (postgres, mysql, sqlite, mongodb)"
    )]
    pub database: Option<Database>,

    #[arg(
        long = "auth",
        value_name = "PROVIDER",
        value_parser = Auth::from_str,
        help = "Authentication (next-auth, clerk, better-auth, passport)"
    )]
    pub auth: Option<Auth>,

    /// Test frameworks; repeat the flag or separate with commas.
    #[arg(
        long = "test",
        value_name = "FRAMEWORK",
        value_delimiter = ',',
        value_parser = TestFramework::from_str,
        help = "Test frameworks (vitest, jest, playwright, cypress, testing-library)"
    )]
    pub testing: Vec<TestFramework>,

    /// Extra libraries; repeat the flag or separate with commas.
    #[arg(
        long = "extra",
        value_name = "LIBRARY",
        value_delimiter = ',',
        value_parser = ExtraLibrary::from_str,
        help = "Extra libraries (axios, zod, tanstack-query, date-fns, ...)"
    )]
    pub extras: Vec<ExtraLibrary>,

    #[arg(
        long = "structure",
        value_name = "PATTERN",
        value_parser = FolderStructure::from_str,
        help = "Folder structure (default, feature-based, layer-based, atomic, domain-driven, mvc)"
    )]
    pub structure: Option<FolderStructure>,

    #[arg(
        long = "import-alias",
        value_name = "ALIAS",
        help = "Import alias for tools that support one (default: @/*)"
    )]
    pub import_alias: Option<String>,

    #[arg(long = "no-src-dir", help = "Ask the bootstrap tool not to use src/")]
    pub no_src_dir: bool,

    #[arg(long = "no-git", help = "Skip git init and the initial commit")]
    pub no_git: bool,

    #[arg(long = "no-install", help = "Skip the final dependency install")]
    pub no_install: bool,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Print the resolved plan without touching the filesystem.
    #[arg(
        long = "dry-run",
        help = "Show every command that would run, then exit"
    )]
    pub dry_run: bool,

    /// Pass tool output straight through instead of showing spinners.
    #[arg(long = "stream", help = "Stream the output of every external tool")]
    pub stream: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `launchpad list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// What to list; both when omitted.
    #[arg(value_enum, value_name = "WHAT")]
    pub what: Option<ListTarget>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListTarget {
    Frameworks,
    Addons,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// JSON document.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `launchpad init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `launchpad completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `launchpad config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.package_manager`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
