//! Setup command implementation

use anyhow::Result;
use clap::Args;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::io::IsTerminal;

use super::utils::{flag, Printer};
use crate::config::{merge_setup, SetupOverrides};
use crate::domain::{Config, SetupConfig};
use crate::env::install::{create_virtual_environment, install_gitingest, StepOutcome};
use crate::env::instructions::{manual_instructions, node_instructions, python_instructions, HostOs};
use crate::env::{check_node_environment, check_python_environment, EnvironmentReport, Issue, PythonEnv};

#[derive(Args)]
pub struct SetupArgs {
    /// Automatically install missing dependencies where possible
    #[arg(long)]
    pub auto_install: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// Skip Python environment checks
    #[arg(long)]
    pub skip_python: bool,

    /// Skip Node.js environment checks
    #[arg(long)]
    pub skip_node: bool,

    /// Delete and recreate the virtual environment
    #[arg(long)]
    pub force_venv: bool,
}

impl SetupArgs {
    fn overrides(&self) -> SetupOverrides {
        SetupOverrides {
            auto_install: flag(self.auto_install),
            quiet: flag(self.quiet),
            skip_python: flag(self.skip_python),
            skip_node: flag(self.skip_node),
            force_venv: flag(self.force_venv),
        }
    }
}

pub fn run(args: SetupArgs, config: &Config) -> Result<()> {
    let settings = merge_setup(config.setup.clone(), args.overrides());
    let out = Printer::new(settings.quiet);
    let venv = PythonEnv::locate(config.python.venv_path.as_deref())?;

    out.line(style("🔧 Repo Analyzer Environment Setup").bold());
    out.line("==================================================");
    out.line(format!(
        "System: {} ({})",
        std::env::consts::OS,
        std::env::consts::ARCH
    ));
    out.line(format!("repo-analyzer version: {}", env!("CARGO_PKG_VERSION")));

    let report = check_environment(&venv, &settings, settings.force_venv, out);

    if report.is_ready() {
        out.blank();
        out.line("🎉 Environment setup is complete! All dependencies are available.");
        print_warnings(&report, out);
        return Ok(());
    }

    out.blank();
    out.line(style(format!("❌ Found {} issue(s):", report.issues.len())).red());
    for issue in &report.issues {
        out.line(format!("   • {issue}"));
    }
    print_warnings(&report, out);

    if settings.auto_install {
        return install_and_verify(&venv, &settings, &report.issues, out);
    }

    out.blank();
    out.line("💡 To fix these issues:");
    out.line("   1. Run with --auto-install to attempt automatic installation");
    out.line("   2. Or follow the manual installation instructions below");
    print_manual_instructions(out);

    if !out.is_quiet() && std::io::stdin().is_terminal() {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Would you like to attempt automatic installation?")
            .default(false)
            .interact()?;
        if confirmed {
            return install_and_verify(&venv, &settings, &report.issues, out);
        }
    }

    anyhow::bail!("environment setup incomplete - {} issues found", report.issues.len())
}

fn check_environment(
    venv: &PythonEnv,
    settings: &SetupConfig,
    force_venv: bool,
    out: Printer,
) -> EnvironmentReport {
    let mut report = EnvironmentReport::default();

    if !settings.skip_python {
        out.blank();
        out.line(style("🐍 Checking Python environment...").bold());
        let python = check_python_environment(venv, force_venv);
        print_lines(&python, out);
        report.merge(python);
    }

    if !settings.skip_node {
        out.blank();
        out.line(style("📦 Checking Node.js environment...").bold());
        let node = check_node_environment();
        print_lines(&node, out);
        report.merge(node);
    }

    report
}

fn print_lines(report: &EnvironmentReport, out: Printer) {
    for line in &report.lines {
        out.line(line);
    }
}

fn print_warnings(report: &EnvironmentReport, out: Printer) {
    if report.warnings.is_empty() {
        return;
    }
    out.blank();
    out.line(style("⚠️  Warnings:").yellow());
    for warning in &report.warnings {
        out.line(format!("   • {warning}"));
    }
}

fn print_manual_instructions(out: Printer) {
    out.blank();
    out.line(style("📖 Manual installation instructions:").bold());
    for block in manual_instructions(HostOs::current()) {
        out.blank();
        for line in block {
            out.line(line);
        }
    }
}

fn print_step(step: &StepOutcome, out: Printer) {
    tracing::debug!("{}", step.command);
    if !step.output.trim().is_empty() {
        tracing::debug!("{}", step.output.trim());
    }
    out.line(format!("   ✅ {}", step.command));
}

fn install_and_verify(
    venv: &PythonEnv,
    settings: &SetupConfig,
    issues: &[Issue],
    out: Printer,
) -> Result<()> {
    out.blank();
    out.line(style("🔨 Attempting automatic installation...").bold());

    let os = HostOs::current();
    let mut gitingest_installed = false;

    for issue in issues {
        match issue {
            Issue::VenvMissing | Issue::VenvPythonBroken => {
                out.line(format!("📦 Creating virtual environment at {}...", venv.root().display()));
                let recreate = *issue == Issue::VenvPythonBroken;
                match create_virtual_environment(venv, recreate) {
                    Ok(step) => print_step(&step, out),
                    Err(err) => {
                        out.line(format!("   ❌ Failed to create virtual environment: {err:#}"));
                        continue;
                    }
                }
                if !gitingest_installed {
                    gitingest_installed = run_gitingest_install(venv, out);
                }
            }
            Issue::GitingestMissing => {
                if !gitingest_installed {
                    gitingest_installed = run_gitingest_install(venv, out);
                }
            }
            Issue::PythonMissing | Issue::PythonVersionCheckFailed => {
                out.line("❌ Python cannot be installed automatically. Please install it manually:");
                for line in python_instructions(os) {
                    out.line(line);
                }
            }
            Issue::NodeMissing | Issue::NpmMissing => {
                out.line(format!("❌ {issue}. Please install Node.js manually:"));
                for line in node_instructions(os) {
                    out.line(line);
                }
            }
        }
    }

    out.blank();
    out.line(style("🔍 Verifying installation...").bold());
    let report = check_environment(venv, settings, false, out);

    if report.is_ready() {
        out.blank();
        out.line("🎉 Environment setup completed successfully!");
        print_warnings(&report, out);
        return Ok(());
    }

    anyhow::bail!(
        "installation completed but {} issue(s) still need manual setup",
        report.issues.len()
    )
}

fn run_gitingest_install(venv: &PythonEnv, out: Printer) -> bool {
    out.line("📦 Installing gitingest...");
    match install_gitingest(venv) {
        Ok(step) => {
            print_step(&step, out);
            true
        }
        Err(err) => {
            out.line(format!("   ❌ Failed to install gitingest: {err:#}"));
            false
        }
    }
}
