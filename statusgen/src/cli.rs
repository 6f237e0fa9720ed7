//! Command-line interface.

use anyhow::{Context, Result};
use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};
use statusgen_codegen::{CodegenOptions, StatusCompiler, Target, VersionInfo};
use statusgen_schema::ValidationMode;
use std::path::PathBuf;

/// Status table compiler.
///
/// Turns XML status tables into C, Java, C#, scripting, WIDL and Rust
/// sources.
#[derive(Debug, Parser)]
#[command(name = "statusgen", version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate sources from status table documents
    Status(StatusArgs),
    /// Generate a C version file from git metadata
    Version(VersionArgs),
}

/// Arguments of `statusgen status`.
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("outputs").required(true).multiple(true)))]
pub struct StatusArgs {
    /// C header output
    #[arg(long, group = "outputs")]
    pub header: Option<PathBuf>,

    /// C/C++ to-string implementation output
    #[arg(long, group = "outputs")]
    pub code: Option<PathBuf>,

    /// C/C++ to-comment implementation output
    #[arg(long, group = "outputs")]
    pub comment_code: Option<PathBuf>,

    /// Java enum output
    #[arg(long, group = "outputs")]
    pub java: Option<PathBuf>,

    /// C# class output
    #[arg(long, group = "outputs")]
    pub csharp: Option<PathBuf>,

    /// JavaScript binding constant table output
    #[arg(long, group = "outputs")]
    pub js: Option<PathBuf>,

    /// WIDL fragment output
    #[arg(long, group = "outputs")]
    pub widl: Option<PathBuf>,

    /// Rust module output
    #[arg(long, group = "outputs")]
    pub rust: Option<PathBuf>,

    /// Directory include hrefs are resolved against
    #[arg(short, long)]
    pub base: Option<PathBuf>,

    /// Prefix for generated function symbols (default QCC_)
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Name prefix removed for Java, C#, scripting and WIDL (default ER_)
    #[arg(long)]
    pub strip_prefix: Option<String>,

    /// C type name of the status enum (default QStatus)
    #[arg(long)]
    pub type_name: Option<String>,

    /// Wrap C/C++ implementation outputs in this namespace
    #[arg(long)]
    pub namespace: Option<String>,

    /// Header file name included by implementation outputs (default Status.h)
    #[arg(long)]
    pub header_name: Option<String>,

    /// Java package of the generated enum
    #[arg(long)]
    pub java_package: Option<String>,

    /// C# namespace of the generated class
    #[arg(long)]
    pub csharp_namespace: Option<String>,

    /// Fail on duplicate names/values and entries below their block offset
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Root status table documents
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Arguments of `statusgen version`.
#[derive(Debug, Args)]
pub struct VersionArgs {
    /// Output C file
    #[arg(short, long)]
    pub output: PathBuf,

    /// `git describe --long --dirty` text; git is run when omitted
    #[arg(long, requires = "branch")]
    pub describe: Option<String>,

    /// Branch name; git is run when omitted
    #[arg(long, requires = "describe")]
    pub branch: Option<String>,

    /// Product name embedded in the build string
    #[arg(long, default_value = "Library")]
    pub product: String,

    /// Prefix for generated function symbols
    #[arg(short, long, default_value = "QCC_")]
    pub prefix: String,

    /// Repository to query when running git
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,
}

impl StatusArgs {
    /// Builds code generation options, keeping defaults for unset flags.
    #[must_use]
    pub fn codegen_options(&self) -> CodegenOptions {
        let mut options = CodegenOptions::default();
        if let Some(prefix) = &self.prefix {
            options = options.prefix(prefix);
        }
        if let Some(strip) = &self.strip_prefix {
            options = options.strip_prefix(strip);
        }
        if let Some(type_name) = &self.type_name {
            options = options.type_name(type_name);
        }
        if let Some(namespace) = &self.namespace {
            options = options.namespace(namespace);
        }
        if let Some(header_name) = &self.header_name {
            options = options.header_name(header_name);
        }
        if let Some(package) = &self.java_package {
            options = options.java_package(package);
        }
        if let Some(namespace) = &self.csharp_namespace {
            options = options.csharp_namespace(namespace);
        }
        options
    }

    /// Requested outputs in emission order.
    #[must_use]
    pub fn outputs(&self) -> Vec<(Target, PathBuf)> {
        [
            (Target::CHeader, &self.header),
            (Target::CSource, &self.code),
            (Target::CommentSource, &self.comment_code),
            (Target::Java, &self.java),
            (Target::CSharp, &self.csharp),
            (Target::JsConstants, &self.js),
            (Target::Widl, &self.widl),
            (Target::Rust, &self.rust),
        ]
        .into_iter()
        .filter_map(|(target, path)| path.clone().map(|p| (target, p)))
        .collect()
    }

    /// Builds the compiler for these arguments.
    #[must_use]
    pub fn compiler(&self) -> StatusCompiler {
        let mode = if self.strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Lenient
        };
        let mut compiler = StatusCompiler::new()
            .validation(mode)
            .options(self.codegen_options());
        if let Some(base) = &self.base {
            compiler = compiler.base(base);
        }
        for (target, path) in self.outputs() {
            compiler = compiler.output(target, path);
        }
        compiler
    }
}

/// Runs a parsed command line.
///
/// # Errors
/// Returns an error describing the first failure; outputs of a failed
/// `status` run have already been removed.
pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Status(args) => run_status(args),
        Commands::Version(args) => run_version(args),
    }
}

fn run_status(args: &StatusArgs) -> Result<()> {
    let report = args
        .compiler()
        .run(&args.files)
        .context("status table generation failed")?;

    tracing::info!(
        "Generated {} file(s) for {} status entries ({} warning(s))",
        report.written.len(),
        report.entries,
        report.warnings
    );
    Ok(())
}

fn run_version(args: &VersionArgs) -> Result<()> {
    let info = match (&args.describe, &args.branch) {
        (Some(describe), Some(branch)) => VersionInfo::parse(describe, branch),
        _ => VersionInfo::from_git(&args.repo)
            .with_context(|| format!("cannot read git metadata in {}", args.repo.display()))?,
    };

    let content = info.render(&args.product, &args.prefix);
    std::fs::write(&args.output, content)
        .with_context(|| format!("cannot write {}", args.output.display()))?;
    tracing::info!("Wrote {} ({})", args.output.display(), info.version_string());
    Ok(())
}
