use crate::cli::OutputFormat;
use crate::pipeline::{descriptor_fragments, read_build_config, Pipeline, ScanRequest};
use crate::report::RunReport;
use anyhow::Result;
use oasprobe_spec::{ExtractOptions, SpecProcessor, UnknownSchemePolicy};
use oasprobe_validate::{enforce, CheckSpecMode};
use std::path::PathBuf;
use std::time::Duration;

/// Arguments of the `scan` command.
#[derive(Debug, Clone)]
pub(crate) struct ScanArgs {
    pub root: PathBuf,
    pub build_configs: Vec<PathBuf>,
    pub poms: Vec<PathBuf>,
    pub plugins: Vec<String>,
    pub urls: Vec<String>,
    pub check: CheckSpecMode,
    pub fetch_timeout_secs: u64,
    pub unknown_scheme: UnknownSchemePolicy,
    pub format: OutputFormat,
    pub diagnose: bool,
}

/// Runs a scan and applies the check mode. Returns the report and whether
/// the checks failed.
pub(crate) fn run_scan(args: &ScanArgs) -> Result<(RunReport, Option<oasprobe_validate::CheckFailed>)> {
    let processor = SpecProcessor::with_timeout(
        Duration::from_secs(args.fetch_timeout_secs),
        ExtractOptions {
            unknown_scheme: args.unknown_scheme,
        },
    )?;

    let mut request = ScanRequest {
        root: Some(args.root.clone()),
        build_configs: Vec::new(),
        urls: args.urls.clone(),
    };
    let mut skipped = Vec::new();
    for path in &args.build_configs {
        match read_build_config(path) {
            Ok(fragment) => request.build_configs.push(fragment),
            Err(skip) => skipped.push(skip),
        }
    }
    for path in &args.poms {
        match descriptor_fragments(path, &args.plugins) {
            Ok(fragments) => request.build_configs.extend(fragments),
            Err(skip) => skipped.push(skip),
        }
    }

    let mut report = Pipeline::new(processor).scan(&request);
    skipped.append(&mut report.skipped);
    report.skipped = skipped;

    match enforce(args.check, &report.specs) {
        Ok(checks) => {
            report.issues = checks.issues;
            Ok((report, None))
        }
        Err(failed) => {
            report.issues = failed.report.issues.clone();
            Ok((report, Some(failed)))
        }
    }
}

/// Handle the `scan` command.
pub(crate) fn handle_scan_command(args: ScanArgs) -> Result<()> {
    let (report, failed) = run_scan(&args)?;
    println!("{}", render(&report, args.format, args.diagnose)?);
    match failed {
        Some(failed) => Err(failed.into()),
        None => Ok(()),
    }
}

pub(crate) fn render(report: &RunReport, format: OutputFormat, diagnose: bool) -> Result<String> {
    match format {
        OutputFormat::Json if diagnose => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report.specs)?),
        OutputFormat::Text => {
            let mut lines: Vec<String> = report
                .specs
                .iter()
                .map(|spec| {
                    format!(
                        "{} {} {} {}",
                        spec.dialect.map(|d| d.label()).unwrap_or("-"),
                        spec.version.as_deref().unwrap_or("-"),
                        spec.name,
                        spec.location
                    )
                })
                .collect();
            if diagnose {
                lines.extend(
                    report
                        .skipped
                        .iter()
                        .map(|s| format!("skipped {}: {}", s.location, s.reason)),
                );
                lines.extend(
                    report
                        .issues
                        .iter()
                        .map(|i| format!("{} {}: {}", i.check.code(), i.location, i.message)),
                );
            }
            lines.push(format!(
                "{} spec(s), {} skipped, {} issue(s)",
                report.specs.len(),
                report.skipped.len(),
                report.issues.len()
            ));
            Ok(lines.join("\n"))
        }
    }
}
