use badminton_split::config::input::{load_calculation, load_invitation};
use badminton_split::config::{CliConfig, Command};
use badminton_split::core::share::{share_or_copy, ShareOutcome};
use badminton_split::domain::ports::ShareSheet;
use badminton_split::utils::error::ErrorSeverity;
use badminton_split::utils::{logger, validation::Validate};
use badminton_split::{
    AppConfig, CalculationSummary, ExportRenderer, ExportState, InvitationSummary, LocalStorage,
    ResvgRasterizer, SplitError, StdoutClipboard, Summary,
};
use clap::Parser;

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,      // warning only
        ErrorSeverity::Medium => 2,   // export can be retried
        ErrorSeverity::High => 1,     // bad input or config
        ErrorSeverity::Critical => 3, // system error
    }
}

fn report(context: &str, e: &SplitError) {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Saran: {}", e.recovery_suggestion());
}

fn fail(context: &str, e: SplitError) -> ! {
    report(context, &e);
    std::process::exit(exit_code(e.severity()).max(1));
}

fn load_config(cli: &CliConfig) -> Result<AppConfig, SplitError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            AppConfig::from_file(path)?
        }
        None => AppConfig::default(),
    };

    if let Some(output_path) = &cli.output_path {
        tracing::info!("🔧 Output path overridden to: {}", output_path);
        config.export.output_path = output_path.clone();
    }

    config.validate()?;
    Ok(config)
}

fn build_summary(cli: &CliConfig, config: &AppConfig) -> Result<Box<dyn Summary>, SplitError> {
    let context = config.summary_context();

    match &cli.command {
        Command::Calculate(args) => {
            let input = load_calculation(&args.input)?;
            input.validate()?;
            let summary = CalculationSummary::calculate(input.with_named_players(), context)?;
            let result = summary.result();
            tracing::info!(
                "🧮 Court {} + shuttlecock {} = {} for {} player(s)",
                result.court_cost,
                result.shuttlecock_cost,
                result.total_cost,
                summary.input().players.len()
            );
            Ok(Box::new(summary))
        }
        Command::Invite(args) => {
            let input = load_invitation(&args.input)?;
            input.validate()?;
            Ok(Box::new(InvitationSummary::new(input, context)))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose, cli.log_format);

    tracing::info!("🏸 Starting badminton-split");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = load_config(&cli).unwrap_or_else(|e| fail("Configuration failed", e));
    let generated_at = config
        .now()
        .unwrap_or_else(|e| fail("Configuration failed", e));
    let summary = build_summary(&cli, &config).unwrap_or_else(|e| fail("Input rejected", e));

    let args = cli.command.export_args();
    let formats = args.formats();

    let storage = LocalStorage::new(config.output_path());
    let renderer = ExportRenderer::new(
        ResvgRasterizer::with_system_fonts(),
        storage,
        config.export_settings(),
    );

    let mut state = ExportState::Idle;
    let mut worst_exit = 0;

    for format in formats {
        let (next, result) = renderer
            .export(state, summary.as_ref(), format, &generated_at)
            .await;

        match (&next, result) {
            (_, Ok(report)) => {
                println!(
                    "✅ {} tersimpan: {}/{} ({} halaman)",
                    report.format,
                    config.output_path(),
                    report.file_name,
                    report.page_count
                );
            }
            (ExportState::Failed { notice }, Err(e)) => {
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                eprintln!("❌ {}", notice);
                worst_exit = worst_exit.max(exit_code(e.severity()));
            }
            (_, Err(e)) => {
                report("Export failed", &e);
                worst_exit = worst_exit.max(exit_code(e.severity()));
            }
        }

        state = next.settle();
    }

    if args.share {
        let text = summary.render_text(&generated_at);
        let title = summary.share_title();
        match share_or_copy::<dyn ShareSheet, _>(
            None,
            &StdoutClipboard,
            &title,
            &text,
            summary.copied_notice(),
        )
        .await
        {
            Ok(ShareOutcome::Copied { notice }) => eprintln!("📋 {}", notice),
            Ok(ShareOutcome::Shared) => eprintln!("📤 {}", title),
            Err(e) => report("Share failed", &e),
        }
    }

    if worst_exit > 0 {
        std::process::exit(worst_exit);
    }

    tracing::info!("✅ Done");
    Ok(())
}
