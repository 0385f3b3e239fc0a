//! Framework and styling capability registries.
//!
//! # Design Rationale
//!
//! Each framework is described exactly once by its [`FrameworkDef`]; each
//! styling choice exactly once by its [`StylingDef`]. Inference (which
//! project type a framework produces) and the styling boundary of the
//! add-on predicate are table lookups, not `match` arms scattered through
//! the dispatchers.
//!
//! # Adding a New Framework
//!
//! 1. Add a variant to `Framework` in `value_objects.rs`
//! 2. Add one [`FrameworkDef`] entry to [`FRAMEWORK_REGISTRY`]
//! 3. Add its bootstrap arm in `bootstrap.rs` (the compiler will ask)

use crate::domain::value_objects::{Framework, Language, ProjectType, Styling};

// ── Framework definitions ────────────────────────────────────────────────────

/// Describes everything the domain needs to know about one framework.
#[derive(Debug, Clone, Copy)]
pub struct FrameworkDef {
    /// The framework variant this entry describes.
    pub framework: Framework,

    /// The project type this framework scaffolds.
    pub project_type: ProjectType,

    /// Languages the framework's own tool can emit.
    ///
    /// Other languages degrade to the first entry at bootstrap time.
    pub languages: &'static [Language],

    /// Human-readable name of the official scaffolding tool.
    pub tool: &'static str,

    /// Whether this framework is the automatic choice for its project type.
    ///
    /// Exactly one entry per project type is `true`; the
    /// `assert_registry_integrity` test enforces this.
    pub is_default: bool,
}

const BOTH: &[Language] = &[Language::TypeScript, Language::JavaScript];
const TS_ONLY: &[Language] = &[Language::TypeScript];
const JS_ONLY: &[Language] = &[Language::JavaScript];

/// Single source of truth for framework capabilities.
pub static FRAMEWORK_REGISTRY: &[FrameworkDef] = &[
    // ── Frontend ─────────────────────────────────────────────────────────────
    FrameworkDef {
        framework: Framework::React,
        project_type: ProjectType::Frontend,
        languages: BOTH,
        tool: "create-vite",
        is_default: true,
    },
    FrameworkDef {
        framework: Framework::Vue,
        project_type: ProjectType::Frontend,
        languages: BOTH,
        tool: "create-vite",
        is_default: false,
    },
    FrameworkDef {
        framework: Framework::Svelte,
        project_type: ProjectType::Frontend,
        languages: BOTH,
        tool: "create-vite",
        is_default: false,
    },
    FrameworkDef {
        framework: Framework::Solid,
        project_type: ProjectType::Frontend,
        languages: BOTH,
        tool: "create-vite",
        is_default: false,
    },
    FrameworkDef {
        framework: Framework::Angular,
        project_type: ProjectType::Frontend,
        languages: TS_ONLY,
        tool: "@angular/cli",
        is_default: false,
    },
    FrameworkDef {
        framework: Framework::Astro,
        project_type: ProjectType::Frontend,
        languages: BOTH,
        tool: "create-astro",
        is_default: false,
    },
    // ── Fullstack ────────────────────────────────────────────────────────────
    FrameworkDef {
        framework: Framework::NextJs,
        project_type: ProjectType::Fullstack,
        languages: BOTH,
        tool: "create-next-app",
        is_default: true,
    },
    FrameworkDef {
        framework: Framework::Nuxt,
        project_type: ProjectType::Fullstack,
        languages: TS_ONLY,
        tool: "nuxi",
        is_default: false,
    },
    FrameworkDef {
        framework: Framework::SvelteKit,
        project_type: ProjectType::Fullstack,
        languages: BOTH,
        tool: "sv",
        is_default: false,
    },
    // ── Backend ──────────────────────────────────────────────────────────────
    FrameworkDef {
        framework: Framework::Express,
        project_type: ProjectType::Backend,
        languages: JS_ONLY,
        tool: "express-generator",
        is_default: true,
    },
    FrameworkDef {
        framework: Framework::Fastify,
        project_type: ProjectType::Backend,
        languages: BOTH,
        tool: "fastify-cli",
        is_default: false,
    },
    FrameworkDef {
        framework: Framework::NestJs,
        project_type: ProjectType::Backend,
        languages: BOTH,
        tool: "@nestjs/cli",
        is_default: false,
    },
    FrameworkDef {
        framework: Framework::Hono,
        project_type: ProjectType::Backend,
        languages: TS_ONLY,
        tool: "create-hono",
        is_default: false,
    },
    // ── Library ──────────────────────────────────────────────────────────────
    FrameworkDef {
        framework: Framework::None,
        project_type: ProjectType::Library,
        languages: BOTH,
        tool: "(built in)",
        is_default: true,
    },
];

// ── Styling definitions ──────────────────────────────────────────────────────

/// Describes one styling choice.
#[derive(Debug, Clone, Copy)]
pub struct StylingDef {
    pub styling: Styling,

    /// Whether choosing this value counts as selecting a styling add-on.
    ///
    /// Plain CSS is the only value that is not a framework; keeping the
    /// boundary here means the add-on predicate never hardcodes it.
    pub is_framework: bool,

    pub description: &'static str,
}

/// Single source of truth for the styling boundary.
pub static STYLING_REGISTRY: &[StylingDef] = &[
    StylingDef {
        styling: Styling::Css,
        is_framework: false,
        description: "Plain CSS, whatever the bootstrap tool emits",
    },
    StylingDef {
        styling: Styling::Tailwind,
        is_framework: true,
        description: "Tailwind CSS v3 with PostCSS",
    },
    StylingDef {
        styling: Styling::Scss,
        is_framework: true,
        description: "Sass (SCSS syntax)",
    },
    StylingDef {
        styling: Styling::Less,
        is_framework: true,
        description: "Less",
    },
    StylingDef {
        styling: Styling::StyledComponents,
        is_framework: true,
        description: "styled-components CSS-in-JS",
    },
];

// ── Registry lookup API ───────────────────────────────────────────────────────

/// Find the capability definition for a specific framework.
pub fn find_framework(framework: Framework) -> Option<&'static FrameworkDef> {
    FRAMEWORK_REGISTRY
        .iter()
        .find(|def| def.framework == framework)
}

/// Find the definition for a styling choice.
pub fn find_styling(styling: Styling) -> Option<&'static StylingDef> {
    STYLING_REGISTRY.iter().find(|def| def.styling == styling)
}

/// Whether a styling value triggers the add-on step.
///
/// Unregistered values count as frameworks: running a harmless extra step
/// beats silently skipping a requested one.
pub fn styling_is_framework(styling: Styling) -> bool {
    find_styling(styling)
        .map(|def| def.is_framework)
        .unwrap_or(true)
}

/// Frameworks that scaffold the given project type.
pub fn frameworks_for(project_type: ProjectType) -> impl Iterator<Item = &'static FrameworkDef> {
    FRAMEWORK_REGISTRY
        .iter()
        .filter(move |def| def.project_type == project_type)
}

/// The default framework for a project type.
pub fn default_framework(project_type: ProjectType) -> Framework {
    frameworks_for(project_type)
        .find(|def| def.is_default)
        .map(|def| def.framework)
        .unwrap_or(Framework::None)
}

/// The language the framework's tool will actually emit for a request.
///
/// Returns the requested language when supported, otherwise the tool's
/// first supported language.
pub fn effective_language(framework: Framework, requested: Language) -> Language {
    match find_framework(framework) {
        Some(def) if def.languages.contains(&requested) => requested,
        Some(def) => def.languages.first().copied().unwrap_or(requested),
        None => requested,
    }
}

/// Validate that a framework produces the requested project type.
pub fn validate_framework_type(
    framework: Framework,
    project_type: ProjectType,
) -> Result<(), String> {
    let Some(def) = find_framework(framework) else {
        return Err(format!("framework '{framework}' is not registered"));
    };
    if def.project_type != project_type {
        return Err(format!(
            "framework '{framework}' scaffolds {} projects, not {project_type}",
            def.project_type
        ));
    }
    Ok(())
}

// ── Registry integrity (checked in tests) ────────────────────────────────────

/// Assert that the registries are internally consistent.
///
/// Call this in a test; it panics with a clear message on any violation.
#[doc(hidden)]
pub fn assert_registry_integrity() {
    for fw in Framework::ALL {
        let def = find_framework(*fw)
            .unwrap_or_else(|| panic!("Framework {fw:?} has no FRAMEWORK_REGISTRY entry"));
        assert!(
            !def.languages.is_empty(),
            "Framework {fw:?} supports no language"
        );
    }

    for project_type in ProjectType::ALL {
        let defaults = frameworks_for(*project_type)
            .filter(|def| def.is_default)
            .count();
        assert_eq!(
            defaults, 1,
            "Project type {project_type:?} must have exactly one default framework"
        );
    }

    for styling in Styling::ALL {
        assert!(
            find_styling(*styling).is_some(),
            "Styling {styling:?} has no STYLING_REGISTRY entry"
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
