//! Domain value objects: every user-selectable option.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold NO dispatch logic. Framework capabilities live in
//! `capabilities.rs`, command tables live in `package_manager.rs`,
//! `bootstrap.rs` and `addons.rs`. This file's only job is to define the
//! types, their string representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the variant (and its string form) to the `value_enum!` block here
//! 2. Fix the non-exhaustive `match` the compiler now reports in the
//!    dispatchers
//! 3. Done

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a string-backed value enum with `as_str`, `ALL`, `Display`,
/// serde names and a case-insensitive `FromStr` that accepts aliases.
macro_rules! value_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $kind:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $s:literal $(| $alias:literal)*
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $s)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($s $(| $alias)* => Ok(Self::$variant),)+
                    _ => Err(DomainError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

// ── Project shape ────────────────────────────────────────────────────────────

value_enum! {
    /// The kind of project to bootstrap.
    pub enum ProjectType as "project type" {
        Frontend => "frontend" | "web" | "spa",
        Fullstack => "fullstack" | "full-stack",
        Backend => "backend" | "api" | "server",
        /// A minimal package with no framework; synthesized directly.
        Library => "library" | "lib" | "package",
    }
}

value_enum! {
    /// A framework with an official scaffolding tool.
    ///
    /// `None` is the library "framework": there is no tool to drive, the
    /// skeleton is written directly.
    pub enum Framework as "framework" {
        React => "react",
        Vue => "vue",
        Svelte => "svelte",
        Solid => "solid" | "solidjs",
        Angular => "angular",
        Astro => "astro",
        NextJs => "nextjs" | "next" | "next.js",
        Nuxt => "nuxt" | "nuxtjs",
        SvelteKit => "sveltekit" | "svelte-kit",
        Express => "express",
        Fastify => "fastify",
        NestJs => "nestjs" | "nest",
        Hono => "hono",
        None => "none",
    }
}

impl Framework {
    /// The project type this framework produces.
    ///
    /// Delegates to `capabilities::find_framework`.
    pub fn project_type(self) -> ProjectType {
        crate::domain::capabilities::find_framework(self)
            .map(|def| def.project_type)
            .unwrap_or(ProjectType::Library)
    }

    /// Whether this framework renders UI components (React-like kits,
    /// state libraries and component test helpers only make sense here).
    pub const fn has_ui(self) -> bool {
        !matches!(
            self,
            Self::Express | Self::Fastify | Self::NestJs | Self::Hono | Self::None
        )
    }
}

value_enum! {
    /// Source language of the generated project.
    pub enum Language as "language" {
        TypeScript => "typescript" | "ts",
        JavaScript => "javascript" | "js",
    }
}

impl Language {
    pub const fn is_typescript(self) -> bool {
        matches!(self, Self::TypeScript)
    }

    /// File extension for source modules.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::TypeScript => "ts",
            Self::JavaScript => "js",
        }
    }
}

// ── Add-on selections ────────────────────────────────────────────────────────

value_enum! {
    /// How the project styles its components.
    ///
    /// Whether a value counts as a styling *framework* (and therefore as an
    /// add-on selection) is data in `capabilities::STYLING_REGISTRY`.
    pub enum Styling as "styling" {
        Css => "css" | "none" | "plain",
        Tailwind => "tailwind" | "tailwindcss",
        Scss => "scss" | "sass",
        Less => "less",
        StyledComponents => "styled-components" | "styled",
    }
}

value_enum! {
    pub enum StateManagement as "state management library" {
        Zustand => "zustand",
        Redux => "redux" | "redux-toolkit" | "rtk",
        Jotai => "jotai",
        Pinia => "pinia",
        Mobx => "mobx",
    }
}

value_enum! {
    pub enum UiLibrary as "UI library" {
        Shadcn => "shadcn" | "shadcn-ui",
        Mui => "mui" | "material-ui",
        Chakra => "chakra" | "chakra-ui",
        Mantine => "mantine",
        AntDesign => "antd" | "ant-design",
        DaisyUi => "daisyui" | "daisy-ui",
    }
}

value_enum! {
    pub enum Orm as "ORM" {
        Prisma => "prisma",
        Drizzle => "drizzle",
        TypeOrm => "typeorm",
        Mongoose => "mongoose",
    }
}

value_enum! {
    pub enum Database as "database" {
        Postgres => "postgres" | "postgresql" | "pg",
        Mysql => "mysql",
        Sqlite => "sqlite",
        Mongodb => "mongodb" | "mongo",
    }
}

value_enum! {
    pub enum Auth as "authentication provider" {
        NextAuth => "next-auth" | "nextauth" | "authjs",
        Clerk => "clerk",
        BetterAuth => "better-auth",
        Passport => "passport",
    }
}

value_enum! {
    pub enum TestFramework as "test framework" {
        Vitest => "vitest",
        Jest => "jest",
        Playwright => "playwright",
        Cypress => "cypress",
        TestingLibrary => "testing-library" | "rtl",
    }
}

value_enum! {
    pub enum ExtraLibrary as "library" {
        Axios => "axios",
        Zod => "zod",
        TanstackQuery => "tanstack-query" | "react-query",
        DateFns => "date-fns",
        Lodash => "lodash",
        ReactHookForm => "react-hook-form",
        Prettier => "prettier",
        Dotenv => "dotenv",
    }
}

value_enum! {
    /// Directory layout laid over the bootstrapped skeleton.
    pub enum FolderStructure as "folder structure" {
        /// Leave the tool's layout untouched.
        Default => "default" | "none",
        FeatureBased => "feature-based" | "feature",
        LayerBased => "layer-based" | "layer",
        Atomic => "atomic",
        DomainDriven => "domain-driven" | "ddd",
        Mvc => "mvc",
    }
}
