//! Bootstrap dispatch: (framework, configuration) → base skeleton.
//!
//! Every framework is materialized by its own official scaffolding tool,
//! driven entirely through flags. The rules each arm follows:
//!
//! - target the already-created, empty project directory (`.`)
//! - never let the tool install dependencies (the pipeline installs once,
//!   after add-ons have extended the manifest)
//! - never let the tool run `git init` (a separate, optional step)
//! - turn off every known prompt with an explicit flag; where a newer
//!   release of the tool regressed, pin a known-good version
//!
//! The library project type has no tool worth driving, so its skeleton is
//! synthesized here as plain files.

use std::path::PathBuf;

use serde_json::json;

use crate::domain::{
    configuration::ProjectConfiguration,
    invocation::{CommandLine, Invocation},
    package_manager::PackageManager,
    value_objects::{Framework, Language, Styling},
};

// Tool versions, each pinned to an exact release so non-interactive
// behavior cannot drift. Bump one only after checking the new release with
// CI=true.
pub const CREATE_VITE: &str = "create-vite@6.1.1";
pub const CREATE_NEXT_APP: &str = "create-next-app@15.1.0";
pub const ANGULAR_CLI: &str = "@angular/cli@19.0.6";
pub const CREATE_ASTRO: &str = "create-astro@4.11.0";
pub const NUXI: &str = "nuxi@3.16.0";
pub const SV: &str = "sv@0.6.18";
pub const EXPRESS_GENERATOR: &str = "express-generator@4.16.1";
pub const FASTIFY_CLI: &str = "fastify-cli@7.3.0";
pub const NEST_CLI: &str = "@nestjs/cli@10.4.9";
pub const CREATE_HONO: &str = "create-hono@0.14.3";

/// A file written directly instead of by an external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedFile {
    /// Path relative to the project root.
    pub path: PathBuf,
    pub content: String,
}

/// How the skeleton gets created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapAction {
    /// Run these tools, in order, inside the project directory.
    Tool(Vec<Invocation>),
    /// Write these files into the project directory.
    Synthesized(Vec<SynthesizedFile>),
}

/// The bootstrap step's work plus any choices that were degraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapPlan {
    pub action: BootstrapAction,
    /// Human-readable notes about unsupported combinations that fell back
    /// to the tool's defaults.
    pub notes: Vec<String>,
}

impl BootstrapPlan {
    pub fn invocations(&self) -> &[Invocation] {
        match &self.action {
            BootstrapAction::Tool(invocations) => invocations,
            BootstrapAction::Synthesized(_) => &[],
        }
    }
}

/// Maps a configuration to its bootstrap plan.
pub struct BootstrapDispatcher;

impl BootstrapDispatcher {
    pub fn plan(config: &ProjectConfiguration) -> BootstrapPlan {
        let mut notes = Vec::new();
        let language = config.effective_language();
        if language != config.language() {
            notes.push(format!(
                "{} only scaffolds {}; using {} instead of {}",
                config.framework(),
                language,
                language,
                config.language()
            ));
        }

        let pm = config.package_manager();
        let root = config.path();
        let ts = language.is_typescript();

        let tool = |cmd: CommandLine| {
            BootstrapAction::Tool(vec![cmd.in_dir(root)])
        };

        let action = match config.framework() {
            Framework::React => tool(pm.run_binary(CREATE_VITE, vite_args("react", ts))),
            Framework::Vue => tool(pm.run_binary(CREATE_VITE, vite_args("vue", ts))),
            Framework::Svelte => tool(pm.run_binary(CREATE_VITE, vite_args("svelte", ts))),
            Framework::Solid => tool(pm.run_binary(CREATE_VITE, vite_args("solid", ts))),
            Framework::Angular => {
                let style = match config.styling() {
                    Styling::Scss => "scss",
                    Styling::Less => "less",
                    Styling::Css | Styling::Tailwind => "css",
                    Styling::StyledComponents => {
                        notes.push(
                            "styled-components targets React; Angular keeps plain css".into(),
                        );
                        "css"
                    }
                };
                tool(pm.run_package_binary(
                    ANGULAR_CLI,
                    "ng",
                    [
                        "new",
                        config.name(),
                        "--directory",
                        ".",
                        "--style",
                        style,
                        "--package-manager",
                        pm.as_str(),
                        "--skip-install",
                        "--skip-git",
                        "--ssr=false",
                        "--defaults",
                        "--interactive=false",
                    ],
                ))
            }
            Framework::Astro => tool(pm.run_binary(
                CREATE_ASTRO,
                [
                    ".",
                    "--template",
                    "minimal",
                    "--no-install",
                    "--no-git",
                    "--skip-houston",
                    "--yes",
                ],
            )),
            Framework::NextJs => tool(pm.run_binary(CREATE_NEXT_APP, next_args(config, ts, pm))),
            Framework::Nuxt => tool(pm.run_binary(
                NUXI,
                [
                    "init",
                    ".",
                    "--packageManager",
                    pm.as_str(),
                    "--gitInit=false",
                    "--no-install",
                    "--force",
                ],
            )),
            Framework::SvelteKit => tool(pm.run_binary(
                SV,
                [
                    "create",
                    ".",
                    "--template",
                    "minimal",
                    "--types",
                    if ts { "ts" } else { "jsdoc" },
                    "--no-add-ons",
                    "--no-install",
                ],
            )),
            Framework::Express => {
                tool(pm.run_binary(EXPRESS_GENERATOR, [".", "--no-view", "--force"]))
            }
            Framework::Fastify => tool(pm.run_binary(
                FASTIFY_CLI,
                [
                    "generate",
                    ".",
                    if ts { "--lang=ts" } else { "--lang=js" },
                ],
            )),
            Framework::NestJs => tool(pm.run_package_binary(
                NEST_CLI,
                "nest",
                [
                    "new",
                    config.name(),
                    "--directory",
                    ".",
                    "--package-manager",
                    pm.as_str(),
                    "--language",
                    if ts { "ts" } else { "js" },
                    "--skip-install",
                    "--skip-git",
                    "--strict",
                ],
            )),
            Framework::Hono => tool(pm.run_binary(
                CREATE_HONO,
                [".", "--template", "nodejs", "--pm", pm.as_str(), "--offline"],
            )),
            Framework::None => BootstrapAction::Synthesized(library_files(config, language)),
        };

        BootstrapPlan { action, notes }
    }
}

fn vite_args(template: &str, ts: bool) -> Vec<String> {
    let template = if ts {
        format!("{template}-ts")
    } else {
        template.to_string()
    };
    vec![".".into(), "--template".into(), template]
}

fn next_args(config: &ProjectConfiguration, ts: bool, pm: PackageManager) -> Vec<String> {
    let use_pm = match pm {
        PackageManager::Npm => "--use-npm",
        PackageManager::Pnpm => "--use-pnpm",
        PackageManager::Yarn => "--use-yarn",
        PackageManager::Bun => "--use-bun",
    };
    vec![
        ".".into(),
        (if ts { "--ts" } else { "--js" }).into(),
        "--eslint".into(),
        "--app".into(),
        (if config.src_dir() {
            "--src-dir"
        } else {
            "--no-src-dir"
        })
        .into(),
        "--import-alias".into(),
        config.import_alias().to_string(),
        use_pm.into(),
        // Tailwind belongs to the styling add-on for every framework.
        "--no-tailwind".into(),
        "--no-turbopack".into(),
        "--skip-install".into(),
        "--disable-git".into(),
        "--yes".into(),
    ]
}

/// Minimal package: manifest, entry module, and (TypeScript) compiler config.
fn library_files(config: &ProjectConfiguration, language: Language) -> Vec<SynthesizedFile> {
    let ts = language.is_typescript();
    let entry = format!("src/index.{}", language.extension());

    let manifest = if ts {
        json!({
            "name": config.name(),
            "version": "0.1.0",
            "description": "",
            "type": "module",
            "main": "dist/index.js",
            "types": "dist/index.d.ts",
            "files": ["dist"],
            "scripts": {
                "build": "tsc",
                "prepublishOnly": "tsc"
            },
            "devDependencies": {
                "typescript": "^5.6.0"
            },
            "license": "MIT"
        })
    } else {
        json!({
            "name": config.name(),
            "version": "0.1.0",
            "description": "",
            "type": "module",
            "main": entry,
            "files": ["src"],
            "scripts": {},
            "license": "MIT"
        })
    };

    let entry_source = if ts {
        "export function greet(name: string): string {\n  return `Hello, ${name}!`;\n}\n"
    } else {
        "export function greet(name) {\n  return `Hello, ${name}!`;\n}\n"
    };

    let mut files = vec![
        SynthesizedFile {
            path: "package.json".into(),
            content: format!("{manifest:#}\n"),
        },
        SynthesizedFile {
            path: entry.into(),
            content: entry_source.to_string(),
        },
        SynthesizedFile {
            path: ".gitignore".into(),
            content: "node_modules\ndist\n".into(),
        },
        SynthesizedFile {
            path: "README.md".into(),
            content: format!("# {}\n", config.name()),
        },
    ];

    if ts {
        let tsconfig = json!({
            "compilerOptions": {
                "target": "ES2022",
                "module": "NodeNext",
                "moduleResolution": "NodeNext",
                "declaration": true,
                "outDir": "dist",
                "rootDir": "src",
                "strict": true,
                "esModuleInterop": true,
                "skipLibCheck": true
            },
            "include": ["src"]
        });
        files.push(SynthesizedFile {
            path: "tsconfig.json".into(),
            content: format!("{tsconfig:#}\n"),
        });
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ProjectType;

    fn config(framework: Framework) -> ProjectConfiguration {
        ProjectConfiguration::builder("demo", std::env::temp_dir().join("demo"))
            .framework(framework)
            .build()
            .unwrap()
    }

    fn only_invocation(plan: &BootstrapPlan) -> &Invocation {
        assert_eq!(plan.invocations().len(), 1);
        &plan.invocations()[0]
    }

    #[test]
    fn every_tool_framework_yields_exactly_one_invocation_in_the_project_dir() {
        for fw in Framework::ALL.iter().filter(|f| **f != Framework::None) {
            let cfg = config(*fw);
            let plan = BootstrapDispatcher::plan(&cfg);
            let inv = only_invocation(&plan);
            assert_eq!(inv.cwd(), cfg.path(), "{fw}");
        }
    }

    #[test]
    fn every_bootstrap_tool_is_pinned_to_an_exact_release() {
        let tools = [
            CREATE_VITE,
            CREATE_NEXT_APP,
            ANGULAR_CLI,
            CREATE_ASTRO,
            NUXI,
            SV,
            EXPRESS_GENERATOR,
            FASTIFY_CLI,
            NEST_CLI,
            CREATE_HONO,
        ];
        for tool in tools {
            let (_, version) = tool.rsplit_once('@').unwrap();
            let parts: Vec<&str> = version.split('.').collect();
            assert_eq!(parts.len(), 3, "{tool} is not an exact version");
            assert!(
                parts.iter().all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit())),
                "{tool} is not an exact version"
            );
        }

        for fw in Framework::ALL.iter().filter(|f| **f != Framework::None) {
            let plan = BootstrapDispatcher::plan(&config(*fw));
            let line = only_invocation(&plan).to_string();
            assert!(!line.contains("@latest"), "{fw}: {line}");
        }
    }

    #[test]
    fn react_uses_pinned_vite_with_ts_template() {
        let plan = BootstrapDispatcher::plan(&config(Framework::React));
        let inv = only_invocation(&plan);
        assert_eq!(inv.program, "npx");
        assert!(inv.has_arg(CREATE_VITE));
        assert!(inv.has_arg("react-ts"));
    }

    #[test]
    fn javascript_picks_plain_vite_template() {
        let cfg = ProjectConfiguration::builder("demo", std::env::temp_dir().join("demo"))
            .framework(Framework::Vue)
            .language(Language::JavaScript)
            .build()
            .unwrap();
        let plan = BootstrapDispatcher::plan(&cfg);
        assert!(only_invocation(&plan).has_arg("vue"));
        assert!(plan.notes.is_empty());
    }

    #[test]
    fn next_skips_install_git_and_every_prompt() {
        let cfg = ProjectConfiguration::builder("demo", std::env::temp_dir().join("demo"))
            .framework(Framework::NextJs)
            .package_manager(PackageManager::Pnpm)
            .src_dir(false)
            .import_alias("~/*")
            .build()
            .unwrap();
        let plan = BootstrapDispatcher::plan(&cfg);
        let inv = only_invocation(&plan);
        assert_eq!(inv.program, "pnpm");
        for flag in [
            "--skip-install",
            "--disable-git",
            "--yes",
            "--use-pnpm",
            "--no-src-dir",
            "--no-tailwind",
            "~/*",
        ] {
            assert!(inv.has_arg(flag), "missing {flag}");
        }
    }

    #[test]
    fn angular_maps_styling_dialect_and_degrades_javascript() {
        let cfg = ProjectConfiguration::builder("demo", std::env::temp_dir().join("demo"))
            .framework(Framework::Angular)
            .language(Language::JavaScript)
            .styling(Styling::Scss)
            .build()
            .unwrap();
        let plan = BootstrapDispatcher::plan(&cfg);
        let inv = only_invocation(&plan);
        assert!(inv.has_arg("scss"));
        assert!(inv.has_arg("--interactive=false"));
        assert!(inv.has_arg("--skip-install"));
        assert_eq!(plan.notes.len(), 1);
    }

    #[test]
    fn nest_passes_name_and_package_manager() {
        let cfg = ProjectConfiguration::builder("demo", std::env::temp_dir().join("demo"))
            .framework(Framework::NestJs)
            .package_manager(PackageManager::Bun)
            .build()
            .unwrap();
        let plan = BootstrapDispatcher::plan(&cfg);
        let inv = only_invocation(&plan);
        assert_eq!(inv.program, "bunx");
        assert!(inv.has_arg("demo"));
        assert!(inv.has_arg("bun"));
        assert!(inv.has_arg("--skip-git"));
    }

    #[test]
    fn library_is_synthesized_with_manifest_entry_and_tsconfig() {
        let cfg = config(Framework::None);
        assert_eq!(cfg.project_type(), ProjectType::Library);
        let plan = BootstrapDispatcher::plan(&cfg);
        let BootstrapAction::Synthesized(files) = &plan.action else {
            panic!("library must be synthesized");
        };
        let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
        assert!(paths.contains(&PathBuf::from("package.json")));
        assert!(paths.contains(&PathBuf::from("src/index.ts")));
        assert!(paths.contains(&PathBuf::from("tsconfig.json")));

        let manifest = &files[0].content;
        let parsed: serde_json::Value = serde_json::from_str(manifest).unwrap();
        assert_eq!(parsed["name"], "demo");
    }

    #[test]
    fn javascript_library_has_no_tsconfig() {
        let cfg = ProjectConfiguration::builder("demo", std::env::temp_dir().join("demo"))
            .framework(Framework::None)
            .language(Language::JavaScript)
            .build()
            .unwrap();
        let BootstrapAction::Synthesized(files) = BootstrapDispatcher::plan(&cfg).action else {
            panic!("library must be synthesized");
        };
        assert!(files.iter().all(|f| f.path != PathBuf::from("tsconfig.json")));
        assert!(files.iter().any(|f| f.path == PathBuf::from("src/index.js")));
    }
}
