//! Developer tasks (schema generation, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .context("xtask has no parent directory")
    } else {
        Ok(manifest_dir)
    }
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

/// Schema definition with its target filename.
struct SchemaFile {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(prguard_types::PrguardReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(prguard_settings::PrguardConfigV1)
}

fn schema_files() -> Vec<SchemaFile> {
    vec![
        SchemaFile {
            filename: "prguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaFile {
            filename: "prguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for file in schema_files() {
        let json = serialize_schema(&(file.generate)())?;
        let path = dir.join(file.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

/// Fail when a checked-in schema is missing or differs from the generated one.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut stale = Vec::new();

    for file in schema_files() {
        let path = dir.join(file.filename);
        let expected = serialize_schema(&(file.generate)())?;
        match fs::read_to_string(&path) {
            Ok(actual) if actual == expected => {}
            Ok(_) => stale.push(format!("{} (out of date)", file.filename)),
            Err(_) => stale.push(format!("{} (missing)", file.filename)),
        }
    }

    if stale.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    for name in &stale {
        eprintln!("  - {name}");
    }
    eprintln!("\nRun `cargo run -p xtask -- emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn explain_coverage() -> anyhow::Result<()> {
    use prguard_types::explain::{all_check_ids, all_codes, lookup_explanation};

    let mut errors = Vec::new();
    let ids = all_check_ids()
        .iter()
        .map(|id| ("Check ID", *id))
        .chain(all_codes().iter().map(|code| ("Code", *code)));

    for (kind, id) in ids {
        match lookup_explanation(id) {
            Some(exp) => {
                for (field, value) in [
                    ("title", exp.title),
                    ("description", exp.description),
                    ("remediation", exp.remediation),
                ] {
                    if value.trim().is_empty() {
                        errors.push(format!("{kind} '{id}' has empty {field}"));
                    }
                }
            }
            None => errors.push(format!("{kind} '{id}' has no explanation")),
        }
    }

    if errors.is_empty() {
        println!("All check IDs and codes have explanations.");
        return Ok(());
    }
    for err in &errors {
        eprintln!("  - {err}");
    }
    bail!("{} explain coverage error(s)", errors.len())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  explain-coverage  Validate all check IDs and codes have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "explain-coverage" => explain_coverage(),
        other => bail!("unknown xtask command: {other}\n\nRun `cargo run -p xtask -- help` for usage."),
    }
    .context("xtask failed")
}
