//! Development tasks for the zonalfit workspace.
//!
//! Usage: `cargo xtask <command>`

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for zonalfit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build API docs and a landing page listing every crate
    Doc {
        /// Open the landing page afterwards
        #[arg(long)]
        open: bool,
    },
    /// Run fmt, clippy, tests and doc in order, stopping at the first failure
    Ci {
        /// Skip the benchmark compile check
        #[arg(long)]
        no_bench: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let root = workspace_root()?;

    match cli.command {
        Commands::Doc { open } => doc(&root, open),
        Commands::Ci { no_bench } => ci(&root, no_bench),
    }
}

fn workspace_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask manifest has no parent directory")
}

fn doc(root: &Path, open: bool) -> Result<()> {
    println!("building docs");
    cargo(root, &["doc", "--workspace", "--no-deps", "--exclude", "xtask"])?;

    let crates = workspace_crates(root)?;
    let index = root.join("target/doc/index.html");
    fs::write(&index, landing_page(&crates))
        .with_context(|| format!("failed to write {}", index.display()))?;
    println!("wrote {}", index.display());

    if open {
        let opener = if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        };
        if let Err(e) = Command::new(opener).arg(&index).status() {
            eprintln!("could not open {}: {e}", index.display());
        }
    }
    Ok(())
}

fn ci(root: &Path, no_bench: bool) -> Result<()> {
    step(root, "fmt", &["fmt", "--all", "--", "--check"])?;
    step(
        root,
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )?;
    step(root, "test", &["test", "--workspace"])?;
    step(root, "doc", &["doc", "--workspace", "--no-deps"])?;
    if !no_bench {
        step(root, "bench (compile only)", &["bench", "--package", "zonalfit", "--no-run"])?;
    }
    println!("all checks passed");
    Ok(())
}

fn step(root: &Path, name: &str, args: &[&str]) -> Result<()> {
    println!("== {name}");
    cargo(root, args)
}

fn cargo(dir: &Path, args: &[&str]) -> Result<()> {
    let status = Command::new(std::env::var("CARGO").unwrap_or_else(|_| "cargo".into()))
        .args(args)
        .current_dir(dir)
        .status()
        .with_context(|| format!("failed to spawn cargo {}", args.join(" ")))?;
    if !status.success() {
        bail!("cargo {} failed", args.join(" "));
    }
    Ok(())
}

/// `(package name, description)` for every crate under `crates/`, sorted.
fn workspace_crates(root: &Path) -> Result<Vec<(String, String)>> {
    let mut crates = Vec::new();
    for entry in fs::read_dir(root.join("crates")).context("failed to read crates/")? {
        let manifest = entry?.path().join("Cargo.toml");
        if !manifest.is_file() {
            continue;
        }
        let text = fs::read_to_string(&manifest)
            .with_context(|| format!("failed to read {}", manifest.display()))?;
        let value: toml::Value = text
            .parse()
            .with_context(|| format!("invalid TOML in {}", manifest.display()))?;
        let package = value.get("package");
        let field = |key: &str| {
            package
                .and_then(|p| p.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };
        let name = field("name");
        if !name.is_empty() {
            crates.push((name, field("description")));
        }
    }
    crates.sort();
    Ok(crates)
}

fn landing_page(crates: &[(String, String)]) -> String {
    let items: String = crates
        .iter()
        .map(|(name, description)| {
            format!(
                "    <li><a href=\"{}/index.html\"><code>{name}</code></a> {description}</li>\n",
                name.replace('-', "_")
            )
        })
        .collect();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>zonalfit documentation</title>
  <style>
    body {{ font-family: sans-serif; max-width: 760px; margin: 2rem auto; line-height: 1.5; }}
    li {{ margin: 0.4rem 0; }}
  </style>
</head>
<body>
  <h1>zonalfit</h1>
  <p>Zone-indexed matrices, N-dimensional arrays, iterative proportional fitting and controlled rounding.</p>
  <ul>
{items}  </ul>
  <p><small>Generated by <code>cargo xtask doc</code>.</small></p>
</body>
</html>
"#
    )
}
