use crate::{
    cli::{
        core::{CommandResult, ShellContext},
        output,
        prompt::Choice,
    },
    core::services::ReportService,
    report::{render_text, ExportFormat, Report, ReportKind},
};

const EXPORT_CHOICES: [&str; 4] = ["Text document", "CSV", "PDF document", "Skip"];

/// Menu flow: choose a kind, show the report, offer an export.
pub fn run(ctx: &mut ShellContext) -> CommandResult {
    output::section("Sales report");
    let labels: Vec<&str> = ReportKind::ALL.iter().map(|kind| kind.label()).collect();
    let kind = match ctx.prompter.select("Report period", &labels)? {
        Choice::Item(index) => ReportKind::ALL[index],
        Choice::Back => return Ok(()),
        Choice::Invalid(raw) => raw.parse::<ReportKind>()?,
    };

    let report = ReportService::generate(&ctx.store, kind, ctx.now());
    output::info(render_text(&report));

    let format = match ctx.prompter.select("Export this report?", &EXPORT_CHOICES)? {
        Choice::Item(0) => ExportFormat::Text,
        Choice::Item(1) => ExportFormat::Csv,
        Choice::Item(2) => ExportFormat::Pdf,
        Choice::Item(_) | Choice::Back => return Ok(()),
        Choice::Invalid(raw) => raw.parse::<ExportFormat>()?,
    };
    export(ctx, &report, format)
}

/// One-shot form: `report <kind> [--export text|csv|pdf]`.
pub fn run_once(ctx: &mut ShellContext, kind: &str, format: Option<&str>) -> CommandResult {
    let kind: ReportKind = kind.parse()?;
    let format = format.map(str::parse::<ExportFormat>).transpose()?;
    let report = ReportService::generate(&ctx.store, kind, ctx.now());
    output::info(render_text(&report));
    match format {
        Some(format) => export(ctx, &report, format),
        None => Ok(()),
    }
}

fn export(ctx: &mut ShellContext, report: &Report, format: ExportFormat) -> CommandResult {
    let path = ReportService::export(report, format, &ctx.export_dir, ctx.now())?;
    output::success(format!("Report exported to {}", path.display()));
    Ok(())
}
