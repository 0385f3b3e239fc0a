//! Add-on dispatch: configuration selections → ordered invocation groups.
//!
//! Groups are emitted in [`Capability`] declaration order, which is the
//! order they must run in. A UI kit's setup CLI inspects the project for an
//! existing CSS framework and path alias, so styling has to land first; the
//! rest follow the same dependency direction.

use std::fmt;

use serde::Serialize;

use crate::domain::{
    capabilities,
    configuration::ProjectConfiguration,
    invocation::{CommandLine, Invocation},
    value_objects::{
        Auth, Database, ExtraLibrary, Framework, Orm, StateManagement, Styling, TestFramework,
        UiLibrary,
    },
};

pub const TAILWIND_CLI: &str = "tailwindcss@3";
pub const SHADCN_CLI: &str = "shadcn@2.1.0";
pub const PRISMA_CLI: &str = "prisma@6";

// ── Capabilities ──────────────────────────────────────────────────────────────

/// One of the seven add-on categories, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    Styling,
    StateManagement,
    UiKit,
    OrmDatabase,
    Auth,
    Testing,
    Extras,
}

impl Capability {
    pub const ALL: [Self; 7] = [
        Self::Styling,
        Self::StateManagement,
        Self::UiKit,
        Self::OrmDatabase,
        Self::Auth,
        Self::Testing,
        Self::Extras,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Styling => "styling",
            Self::StateManagement => "state management",
            Self::UiKit => "UI component kit",
            Self::OrmDatabase => "ORM / database",
            Self::Auth => "authentication",
            Self::Testing => "test frameworks",
            Self::Extras => "extra libraries",
        }
    }

    /// Whether the configuration selects anything in this category.
    pub fn is_selected(self, config: &ProjectConfiguration) -> bool {
        match self {
            Self::Styling => capabilities::styling_is_framework(config.styling()),
            Self::StateManagement => config.state_management().is_some(),
            Self::UiKit => config.ui_library().is_some(),
            Self::OrmDatabase => config.orm().is_some(),
            Self::Auth => config.auth().is_some(),
            Self::Testing => !config.testing().is_empty(),
            Self::Extras => !config.extras().is_empty(),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the add-on step has any work at all.
pub fn any_selected(config: &ProjectConfiguration) -> bool {
    Capability::ALL.iter().any(|c| c.is_selected(config))
}

// ── Database bindings ─────────────────────────────────────────────────────────

/// What one ORM needs to talk to one database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseBinding {
    pub orm: Orm,
    pub database: Database,
    /// Provider or dialect string in the ORM's own vocabulary.
    pub provider: &'static str,
    /// Driver package, when the ORM does not bundle one.
    pub driver: Option<&'static str>,
    /// Type definitions for drivers that ship none.
    pub driver_types: Option<&'static str>,
}

const fn bind(
    orm: Orm,
    database: Database,
    provider: &'static str,
    driver: Option<&'static str>,
    driver_types: Option<&'static str>,
) -> DatabaseBinding {
    DatabaseBinding {
        orm,
        database,
        provider,
        driver,
        driver_types,
    }
}

/// Every supported (ORM, database) pair.
pub static DATABASE_BINDINGS: &[DatabaseBinding] = &[
    bind(Orm::Prisma, Database::Postgres, "postgresql", None, None),
    bind(Orm::Prisma, Database::Mysql, "mysql", None, None),
    bind(Orm::Prisma, Database::Sqlite, "sqlite", None, None),
    bind(Orm::Prisma, Database::Mongodb, "mongodb", None, None),
    bind(Orm::Drizzle, Database::Postgres, "postgresql", Some("pg"), Some("@types/pg")),
    bind(Orm::Drizzle, Database::Mysql, "mysql", Some("mysql2"), None),
    bind(
        Orm::Drizzle,
        Database::Sqlite,
        "sqlite",
        Some("better-sqlite3"),
        Some("@types/better-sqlite3"),
    ),
    bind(Orm::TypeOrm, Database::Postgres, "postgres", Some("pg"), Some("@types/pg")),
    bind(Orm::TypeOrm, Database::Mysql, "mysql", Some("mysql2"), None),
    bind(Orm::TypeOrm, Database::Sqlite, "sqlite", Some("sqlite3"), None),
    bind(Orm::TypeOrm, Database::Mongodb, "mongodb", Some("mongodb"), None),
    bind(Orm::Mongoose, Database::Mongodb, "mongodb", None, None),
];

/// The database an ORM falls back to.
pub const fn default_database(orm: Orm) -> Database {
    match orm {
        Orm::Prisma | Orm::Drizzle => Database::Sqlite,
        Orm::TypeOrm => Database::Postgres,
        Orm::Mongoose => Database::Mongodb,
    }
}

pub fn find_binding(orm: Orm, database: Database) -> Option<&'static DatabaseBinding> {
    DATABASE_BINDINGS
        .iter()
        .find(|b| b.orm == orm && b.database == database)
}

/// Resolve the binding for a request, falling back to the ORM's default.
///
/// The second value explains the fallback when one happened.
pub fn resolve_binding(
    orm: Orm,
    requested: Option<Database>,
) -> (Option<&'static DatabaseBinding>, Option<String>) {
    let fallback = default_database(orm);
    match requested {
        Some(db) => match find_binding(orm, db) {
            Some(binding) => (Some(binding), None),
            None => (
                find_binding(orm, fallback),
                Some(format!(
                    "{orm} does not support {db}; using {fallback} instead"
                )),
            ),
        },
        None => (
            find_binding(orm, fallback),
            Some(format!("no database chosen for {orm}; using {fallback}")),
        ),
    }
}

// ── Plan ──────────────────────────────────────────────────────────────────────

/// The invocations for one capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationGroup {
    pub capability: Capability,
    pub invocations: Vec<Invocation>,
}

/// Ordered groups plus notes about degraded choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddonPlan {
    pub groups: Vec<InvocationGroup>,
    pub notes: Vec<String>,
}

impl AddonPlan {
    pub fn invocation_count(&self) -> usize {
        self.groups.iter().map(|g| g.invocations.len()).sum()
    }
}

/// Maps add-on selections to invocation groups.
pub struct AddonDispatcher;

impl AddonDispatcher {
    pub fn plan(config: &ProjectConfiguration) -> AddonPlan {
        let mut plan = AddonPlan::default();

        if config.orm().is_none() {
            if let Some(db) = config.database() {
                plan.notes.push(format!(
                    "database {db} chosen without an ORM; nothing to install for it"
                ));
            }
        }

        let ctx = Ctx { config };
        for capability in Capability::ALL {
            if !capability.is_selected(config) {
                continue;
            }
            let invocations = match capability {
                Capability::Styling => ctx.styling(),
                Capability::StateManagement => ctx.state_management(),
                Capability::UiKit => ctx.ui_kit(),
                Capability::OrmDatabase => ctx.orm(&mut plan.notes),
                Capability::Auth => ctx.auth(),
                Capability::Testing => ctx.testing(),
                Capability::Extras => ctx.extras(&mut plan.notes),
            };
            if !invocations.is_empty() {
                plan.groups.push(InvocationGroup {
                    capability,
                    invocations,
                });
            }
        }

        plan
    }
}

/// Per-configuration helpers shared by every capability arm.
struct Ctx<'a> {
    config: &'a ProjectConfiguration,
}

impl Ctx<'_> {
    fn bind(&self, cmd: CommandLine) -> Invocation {
        cmd.in_dir(self.config.path())
    }

    fn ts(&self) -> bool {
        self.config.effective_language().is_typescript()
    }

    fn framework(&self) -> Framework {
        self.config.framework()
    }

    /// At most two `add` invocations: runtime then dev.
    fn add(&self, runtime: Vec<&str>, dev: Vec<&str>) -> Vec<Invocation> {
        let pm = self.config.package_manager();
        let mut out = Vec::new();
        if !runtime.is_empty() {
            out.push(self.bind(pm.add_packages(runtime, false)));
        }
        if !dev.is_empty() {
            out.push(self.bind(pm.add_packages(dev, true)));
        }
        out
    }

    fn run(&self, package: &str, args: &[&str]) -> Invocation {
        self.bind(
            self.config
                .package_manager()
                .run_binary(package, args.iter().copied()),
        )
    }

    fn is_react(&self) -> bool {
        matches!(self.framework(), Framework::React | Framework::NextJs)
    }

    fn styling(&self) -> Vec<Invocation> {
        match self.config.styling() {
            Styling::Css => Vec::new(),
            Styling::Tailwind => {
                let mut out = self.add(vec![], vec![TAILWIND_CLI, "postcss", "autoprefixer"]);
                out.push(self.run(TAILWIND_CLI, &["init", "-p"]));
                out
            }
            Styling::Scss => self.add(vec![], vec!["sass"]),
            Styling::Less => self.add(vec![], vec!["less"]),
            Styling::StyledComponents => self.add(vec!["styled-components"], vec![]),
        }
    }

    fn state_management(&self) -> Vec<Invocation> {
        let Some(state) = self.config.state_management() else {
            return Vec::new();
        };
        match state {
            StateManagement::Zustand => self.add(vec!["zustand"], vec![]),
            StateManagement::Redux => self.add(vec!["@reduxjs/toolkit", "react-redux"], vec![]),
            StateManagement::Jotai => self.add(vec!["jotai"], vec![]),
            StateManagement::Pinia if self.framework() == Framework::Nuxt => {
                self.add(vec!["pinia", "@pinia/nuxt"], vec![])
            }
            StateManagement::Pinia => self.add(vec!["pinia"], vec![]),
            StateManagement::Mobx if self.is_react() => {
                self.add(vec!["mobx", "mobx-react-lite"], vec![])
            }
            StateManagement::Mobx => self.add(vec!["mobx"], vec![]),
        }
    }

    fn ui_kit(&self) -> Vec<Invocation> {
        let Some(ui) = self.config.ui_library() else {
            return Vec::new();
        };
        match ui {
            UiLibrary::Shadcn => vec![self.run(SHADCN_CLI, &["init", "--yes", "--defaults"])],
            UiLibrary::Mui => self.add(
                vec!["@mui/material", "@emotion/react", "@emotion/styled"],
                vec![],
            ),
            UiLibrary::Chakra => self.add(vec!["@chakra-ui/react", "@emotion/react"], vec![]),
            UiLibrary::Mantine => self.add(vec!["@mantine/core", "@mantine/hooks"], vec![]),
            UiLibrary::AntDesign => self.add(vec!["antd"], vec![]),
            UiLibrary::DaisyUi => self.add(vec![], vec!["daisyui"]),
        }
    }

    fn orm(&self, notes: &mut Vec<String>) -> Vec<Invocation> {
        let Some(orm) = self.config.orm() else {
            return Vec::new();
        };
        let (binding, note) = resolve_binding(orm, self.config.database());
        notes.extend(note);
        let Some(binding) = binding else {
            notes.push(format!("no database binding registered for {orm}"));
            return Vec::new();
        };

        let mut runtime = Vec::new();
        let mut dev = Vec::new();
        match orm {
            Orm::Prisma => {
                runtime.push("@prisma/client");
                dev.push(PRISMA_CLI);
            }
            Orm::Drizzle => {
                runtime.push("drizzle-orm");
                dev.push("drizzle-kit");
            }
            Orm::TypeOrm => {
                runtime.extend(["typeorm", "reflect-metadata"]);
            }
            Orm::Mongoose => runtime.push("mongoose"),
        }
        runtime.extend(binding.driver);
        if self.ts() {
            dev.extend(binding.driver_types);
        }

        let mut out = self.add(runtime, dev);
        if orm == Orm::Prisma {
            out.push(self.run(
                PRISMA_CLI,
                &["init", "--datasource-provider", binding.provider],
            ));
        }
        out
    }

    fn auth(&self) -> Vec<Invocation> {
        let Some(auth) = self.config.auth() else {
            return Vec::new();
        };
        match auth {
            Auth::NextAuth => self.add(vec!["next-auth"], vec![]),
            Auth::Clerk => {
                let package = match self.framework() {
                    Framework::NextJs => "@clerk/nextjs",
                    Framework::React => "@clerk/clerk-react",
                    Framework::Vue | Framework::Nuxt => "@clerk/vue",
                    Framework::Astro => "@clerk/astro",
                    Framework::Express => "@clerk/express",
                    _ => "@clerk/clerk-js",
                };
                self.add(vec![package], vec![])
            }
            Auth::BetterAuth => self.add(vec!["better-auth"], vec![]),
            Auth::Passport => {
                let dev = if self.ts() {
                    vec!["@types/passport", "@types/passport-local"]
                } else {
                    vec![]
                };
                self.add(vec!["passport", "passport-local"], dev)
            }
        }
    }

    fn testing(&self) -> Vec<Invocation> {
        let mut dev: Vec<&str> = Vec::new();
        for test in self.config.testing() {
            match test {
                TestFramework::Vitest => dev.push("vitest"),
                TestFramework::Jest => {
                    dev.push("jest");
                    if self.ts() {
                        dev.extend(["ts-jest", "@types/jest"]);
                    }
                }
                TestFramework::Playwright => dev.push("@playwright/test"),
                TestFramework::Cypress => dev.push("cypress"),
                TestFramework::TestingLibrary => {
                    dev.push(match self.framework() {
                        Framework::React | Framework::NextJs => "@testing-library/react",
                        Framework::Vue | Framework::Nuxt => "@testing-library/vue",
                        Framework::Svelte | Framework::SvelteKit => "@testing-library/svelte",
                        Framework::Angular => "@testing-library/angular",
                        _ => "@testing-library/dom",
                    });
                    dev.push("@testing-library/jest-dom");
                }
            }
        }
        self.add(vec![], dev)
    }

    fn extras(&self, notes: &mut Vec<String>) -> Vec<Invocation> {
        let mut runtime: Vec<&str> = Vec::new();
        let mut dev: Vec<&str> = Vec::new();
        for extra in self.config.extras() {
            match extra {
                ExtraLibrary::Axios => runtime.push("axios"),
                ExtraLibrary::Zod => runtime.push("zod"),
                ExtraLibrary::TanstackQuery => runtime.push(match self.framework() {
                    Framework::React | Framework::NextJs => "@tanstack/react-query",
                    Framework::Vue | Framework::Nuxt => "@tanstack/vue-query",
                    Framework::Svelte | Framework::SvelteKit => "@tanstack/svelte-query",
                    Framework::Solid => "@tanstack/solid-query",
                    other => {
                        notes.push(format!(
                            "TanStack Query has no {other} adapter; installing the core package"
                        ));
                        "@tanstack/query-core"
                    }
                }),
                ExtraLibrary::DateFns => runtime.push("date-fns"),
                ExtraLibrary::Lodash => {
                    runtime.push("lodash");
                    if self.ts() {
                        dev.push("@types/lodash");
                    }
                }
                ExtraLibrary::ReactHookForm => runtime.push("react-hook-form"),
                ExtraLibrary::Prettier => dev.push("prettier"),
                ExtraLibrary::Dotenv => runtime.push("dotenv"),
            }
        }
        self.add(runtime, dev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{package_manager::PackageManager, value_objects::Language};

    fn base(framework: Framework) -> crate::domain::configuration::ConfigurationBuilder {
        ProjectConfiguration::builder("demo", std::env::temp_dir().join("demo")).framework(framework)
    }

    #[test]
    fn capability_order_is_declaration_order() {
        let mut sorted = Capability::ALL;
        sorted.sort();
        assert_eq!(sorted, Capability::ALL);
        assert!(Capability::Styling < Capability::UiKit);
        assert!(Capability::UiKit < Capability::OrmDatabase);
    }

    #[test]
    fn nothing_selected_by_default() {
        let cfg = base(Framework::React).build().unwrap();
        assert!(!any_selected(&cfg));
        assert!(AddonDispatcher::plan(&cfg).groups.is_empty());
    }

    #[test]
    fn every_orm_has_a_binding_for_its_default_database() {
        for orm in Orm::ALL {
            assert!(
                find_binding(*orm, default_database(*orm)).is_some(),
                "{orm} has no default binding"
            );
        }
    }

    #[test]
    fn unsupported_pair_falls_back_with_a_note() {
        let (binding, note) = resolve_binding(Orm::Drizzle, Some(Database::Mongodb));
        assert_eq!(binding.unwrap().database, Database::Sqlite);
        assert!(note.unwrap().contains("mongodb"));

        let (binding, note) = resolve_binding(Orm::Mongoose, Some(Database::Mongodb));
        assert_eq!(binding.unwrap().provider, "mongodb");
        assert!(note.is_none());
    }

    #[test]
    fn tailwind_installs_then_runs_pinned_init() {
        let cfg = base(Framework::Vue)
            .styling(Styling::Tailwind)
            .build()
            .unwrap();
        let plan = AddonDispatcher::plan(&cfg);
        assert_eq!(plan.groups.len(), 1);
        let group = &plan.groups[0];
        assert_eq!(group.capability, Capability::Styling);
        assert_eq!(group.invocations.len(), 2);
        assert!(group.invocations[1].has_arg(TAILWIND_CLI));
        assert!(group.invocations[1].has_arg("-p"));
    }

    #[test]
    fn prisma_binds_provider_and_runs_init() {
        let cfg = base(Framework::NextJs)
            .package_manager(PackageManager::Pnpm)
            .orm(Some(Orm::Prisma))
            .database(Some(Database::Postgres))
            .build()
            .unwrap();
        let plan = AddonDispatcher::plan(&cfg);
        let group = &plan.groups[0];
        assert_eq!(group.capability, Capability::OrmDatabase);
        let init = group.invocations.last().unwrap();
        assert_eq!(init.program, "pnpm");
        assert!(init.has_arg("postgresql"));
        assert!(plan.notes.is_empty());
    }

    #[test]
    fn drizzle_adds_driver_types_only_for_typescript() {
        let ts = base(Framework::Express)
            .language(Language::TypeScript)
            .orm(Some(Orm::Drizzle))
            .database(Some(Database::Postgres))
            .build()
            .unwrap();
        // Express only emits JavaScript, so no @types package either way.
        let plan = AddonDispatcher::plan(&ts);
        assert!(
            plan.groups[0]
                .invocations
                .iter()
                .all(|i| !i.has_arg("@types/pg"))
        );

        let ts = base(Framework::Fastify)
            .orm(Some(Orm::Drizzle))
            .database(Some(Database::Postgres))
            .build()
            .unwrap();
        let plan = AddonDispatcher::plan(&ts);
        assert!(
            plan.groups[0]
                .invocations
                .iter()
                .any(|i| i.has_arg("@types/pg"))
        );
    }

    #[test]
    fn framework_aware_packages() {
        let cfg = base(Framework::NextJs)
            .auth(Some(Auth::Clerk))
            .testing([TestFramework::TestingLibrary])
            .extras([ExtraLibrary::TanstackQuery])
            .build()
            .unwrap();
        let plan = AddonDispatcher::plan(&cfg);
        let all: Vec<_> = plan.groups.iter().flat_map(|g| &g.invocations).collect();
        assert!(all.iter().any(|i| i.has_arg("@clerk/nextjs")));
        assert!(all.iter().any(|i| i.has_arg("@testing-library/react")));
        assert!(all.iter().any(|i| i.has_arg("@testing-library/jest-dom")));
        assert!(all.iter().any(|i| i.has_arg("@tanstack/react-query")));

        let nuxt = base(Framework::Nuxt)
            .state_management(Some(StateManagement::Pinia))
            .build()
            .unwrap();
        let plan = AddonDispatcher::plan(&nuxt);
        assert!(plan.groups[0].invocations[0].has_arg("@pinia/nuxt"));
    }

    #[test]
    fn database_without_orm_is_noted_not_installed() {
        let cfg = base(Framework::Express)
            .database(Some(Database::Postgres))
            .build()
            .unwrap();
        let plan = AddonDispatcher::plan(&cfg);
        assert!(plan.groups.is_empty());
        assert_eq!(plan.notes.len(), 1);
    }

    #[test]
    fn testing_and_extras_split_runtime_and_dev() {
        let cfg = base(Framework::React)
            .package_manager(PackageManager::Yarn)
            .testing([TestFramework::Vitest, TestFramework::Playwright])
            .extras([ExtraLibrary::Zod, ExtraLibrary::Prettier])
            .build()
            .unwrap();
        let plan = AddonDispatcher::plan(&cfg);
        assert_eq!(plan.groups.len(), 2);
        assert_eq!(plan.groups[0].capability, Capability::Testing);
        assert_eq!(plan.groups[0].invocations.len(), 1);
        assert!(plan.groups[0].invocations[0].has_arg("--dev"));
        assert_eq!(plan.groups[1].invocations.len(), 2);
        assert_eq!(plan.invocation_count(), 3);
    }
}
