//! Build automation tasks for sprout2d
//!
//! Usage:
//!   cargo xtask build-web        # Build the demo for the browser
//!   cargo xtask package-zip      # Zip the web build for upload
//!   cargo xtask package-native   # Release build + config + assets in dist/native

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

const DEMO_BIN: &str = "sprout2d-demo";
const CONFIG_FILE: &str = "sprout2d.ron";
const MQ_JS_BUNDLE: &str = "https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for sprout2d")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the demo as WASM into dist/web
    BuildWeb {
        /// Debug build (faster compile, larger wasm)
        #[arg(long)]
        dev: bool,
    },
    /// Build for the web, then zip dist/web
    PackageZip,
    /// Release build for this machine into dist/native
    PackageNative,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::BuildWeb { dev } => build_web(dev),
        Commands::PackageZip => package_zip(),
        Commands::PackageNative => package_native(),
    }
}

/// Workspace root (parent of xtask/)
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

fn download_file(url: &str, dest: &Path) -> Result<()> {
    println!("Downloading {}...", url);
    run_cmd(Command::new("curl").args(["-L", "-o"]).arg(dest).arg(url))
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Copy the runtime files the demo reads next to its binary / wasm
fn copy_runtime_files(root: &Path, dist: &Path) -> Result<()> {
    let config = root.join(CONFIG_FILE);
    if config.exists() {
        std::fs::copy(&config, dist.join(CONFIG_FILE))?;
    }
    let assets = root.join("assets");
    if assets.exists() {
        copy_dir_recursive(&assets, &dist.join("assets"))?;
    }
    Ok(())
}

fn clean_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir).with_context(|| format!("Failed to clean {}", dir.display()))?;
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// Minimal page that boots the macroquad wasm
fn index_html(wasm_name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{DEMO_BIN}</title>
    <style>
        html, body, canvas {{ margin: 0; padding: 0; width: 100%; height: 100%; overflow: hidden; background: #000; }}
    </style>
</head>
<body>
    <canvas id="glcanvas" tabindex="1"></canvas>
    <script src="mq_js_bundle.js"></script>
    <script>load("{wasm_name}");</script>
</body>
</html>
"#
    )
}

fn build_web(dev: bool) -> Result<()> {
    let root = project_root()?;
    let dist = root.join("dist/web");
    let profile = if dev { "debug" } else { "release" };

    println!("Building WASM ({})...", profile);
    let mut cmd = Command::new("cargo");
    cmd.current_dir(&root)
        .args(["build", "--bin", DEMO_BIN, "--target", "wasm32-unknown-unknown"]);
    if !dev {
        cmd.arg("--release");
    }
    run_cmd(&mut cmd)?;

    clean_dir(&dist)?;

    println!("Copying files to dist/web...");
    let wasm_name = format!("{}.wasm", DEMO_BIN);
    std::fs::copy(
        root.join(format!("target/wasm32-unknown-unknown/{}/{}", profile, wasm_name)),
        dist.join(&wasm_name),
    )
    .context("WASM binary missing after build")?;

    std::fs::write(dist.join("index.html"), index_html(&wasm_name))?;

    let mq_js = dist.join("mq_js_bundle.js");
    if !mq_js.exists() {
        download_file(MQ_JS_BUNDLE, &mq_js)?;
    }

    copy_runtime_files(&root, &dist)?;

    println!("Web build complete: dist/web/");
    Ok(())
}

fn package_zip() -> Result<()> {
    build_web(false)?;

    let root = project_root()?;
    let dist = root.join("dist");
    let zip_name = format!("{}-web.zip", DEMO_BIN);
    let zip_path = dist.join(&zip_name);

    if zip_path.exists() {
        std::fs::remove_file(&zip_path)?;
    }

    println!("Creating {}...", zip_name);
    run_cmd(
        Command::new("zip")
            .current_dir(dist.join("web"))
            .args(["-r", &format!("../{}", zip_name), "."]),
    )?;

    println!("Package ready: dist/{}", zip_name);
    Ok(())
}

fn package_native() -> Result<()> {
    let root = project_root()?;
    let dist = root.join("dist/native");

    println!("Building native release...");
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--bin", DEMO_BIN]),
    )?;

    clean_dir(&dist)?;

    let binary_name = if cfg!(target_os = "windows") {
        format!("{}.exe", DEMO_BIN)
    } else {
        DEMO_BIN.to_string()
    };
    std::fs::copy(root.join("target/release").join(&binary_name), dist.join(&binary_name))
        .context("Release binary missing after build")?;

    copy_runtime_files(&root, &dist)?;

    println!("Native build complete: dist/native/");
    Ok(())
}
