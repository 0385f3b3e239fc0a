//! Implementation of the `launchpad list` command.

use serde::Serialize;

use launchpad_core::domain::{
    Auth, Database, ExtraLibrary, FolderStructure, Language, Orm, PackageManager,
    StateManagement, Styling, TestFramework, UiLibrary,
    capabilities::{FRAMEWORK_REGISTRY, FrameworkDef},
};

use crate::{
    cli::{ListArgs, ListFormat, ListTarget},
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct FrameworkRow {
    name: &'static str,
    project_type: &'static str,
    tool: &'static str,
    languages: Vec<Language>,
    default: bool,
}

impl From<&FrameworkDef> for FrameworkRow {
    fn from(def: &FrameworkDef) -> Self {
        Self {
            name: def.framework.as_str(),
            project_type: def.project_type.as_str(),
            tool: def.tool,
            languages: def.languages.to_vec(),
            default: def.is_default,
        }
    }
}

/// One `launchpad new` flag and the values it accepts.
#[derive(Debug, Serialize)]
struct OptionRow {
    flag: &'static str,
    description: &'static str,
    values: Vec<&'static str>,
}

#[derive(Debug, Default, Serialize)]
struct Listing {
    #[serde(skip_serializing_if = "Option::is_none")]
    frameworks: Option<Vec<FrameworkRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    addons: Option<Vec<OptionRow>>,
}

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let listing = Listing {
        frameworks: (args.what != Some(ListTarget::Addons))
            .then(|| FRAMEWORK_REGISTRY.iter().map(FrameworkRow::from).collect()),
        addons: (args.what != Some(ListTarget::Frameworks)).then(option_rows),
    };

    match args.format {
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&listing).map_err(|e| CliError::IoError {
                message: "Failed to serialise listing".into(),
                source: e.into(),
            })?;
            output.data(&json)?;
        }
        ListFormat::Table => print_table(&listing, &output)?,
    }

    Ok(())
}

fn option_rows() -> Vec<OptionRow> {
    fn names<T: Copy>(all: &[T], name: fn(&T) -> &'static str) -> Vec<&'static str> {
        all.iter().map(name).collect()
    }

    vec![
        OptionRow {
            flag: "--pm",
            description: "package manager",
            values: names(PackageManager::ALL, PackageManager::as_str),
        },
        OptionRow {
            flag: "--styling",
            description: "styling",
            values: names(Styling::ALL, Styling::as_str),
        },
        OptionRow {
            flag: "--state",
            description: "state management",
            values: names(StateManagement::ALL, StateManagement::as_str),
        },
        OptionRow {
            flag: "--ui",
            description: "UI component kit",
            values: names(UiLibrary::ALL, UiLibrary::as_str),
        },
        OptionRow {
            flag: "--orm",
            description: "ORM",
            values: names(Orm::ALL, Orm::as_str),
        },
        OptionRow {
            flag: "--db",
            description: "database (needs --orm)",
            values: names(Database::ALL, Database::as_str),
        },
        OptionRow {
            flag: "--auth",
            description: "authentication",
            values: names(Auth::ALL, Auth::as_str),
        },
        OptionRow {
            flag: "--test",
            description: "test frameworks (repeatable)",
            values: names(TestFramework::ALL, TestFramework::as_str),
        },
        OptionRow {
            flag: "--extra",
            description: "extra libraries (repeatable)",
            values: names(ExtraLibrary::ALL, ExtraLibrary::as_str),
        },
        OptionRow {
            flag: "--structure",
            description: "folder structure",
            values: names(FolderStructure::ALL, FolderStructure::as_str),
        },
    ]
}

fn print_table(listing: &Listing, output: &OutputManager) -> CliResult<()> {
    if let Some(frameworks) = &listing.frameworks {
        output.header("Frameworks:")?;
        output.print(&format!(
            "  {:<11} {:<10} {:<24} {}",
            "NAME", "TYPE", "TOOL", "LANGUAGES"
        ))?;
        for row in frameworks {
            let languages: Vec<&str> = row.languages.iter().map(Language::as_str).collect();
            let marker = if row.default { " (default)" } else { "" };
            output.print(&format!(
                "  {:<11} {:<10} {:<24} {}{marker}",
                row.name,
                row.project_type,
                row.tool,
                languages.join(", "),
            ))?;
        }
    }

    if let Some(addons) = &listing.addons {
        if listing.frameworks.is_some() {
            output.print("")?;
        }
        output.header("Add-ons:")?;
        for row in addons {
            output.print(&format!("  {:<12} {}", row.flag, row.description))?;
            output.detail(&format!("  {:<12} {}", "", row.values.join(", ")))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_framework_is_listed() {
        let rows: Vec<FrameworkRow> = FRAMEWORK_REGISTRY.iter().map(FrameworkRow::from).collect();
        assert_eq!(rows.len(), FRAMEWORK_REGISTRY.len());
        assert!(rows.iter().any(|r| r.name == "nextjs" && r.project_type == "fullstack"));
    }

    #[test]
    fn option_rows_cover_every_selection_flag() {
        let flags: Vec<&str> = option_rows().iter().map(|r| r.flag).collect();
        for flag in ["--styling", "--state", "--ui", "--orm", "--db", "--auth", "--test", "--extra"] {
            assert!(flags.contains(&flag), "{flag} missing");
        }
    }

    #[test]
    fn json_listing_omits_unrequested_sections() {
        let listing = Listing {
            frameworks: None,
            addons: Some(option_rows()),
        };
        let json = serde_json::to_value(&listing).unwrap();
        assert!(json.get("frameworks").is_none());
        assert!(json["addons"][0]["values"].as_array().is_some());
    }
}
