#![warn(missing_docs)]
//! # cosmetica binary
//!
//! Command-line shell around the analyzer: submits one product by name or by
//! photo and prints the results screen as text.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use cosmetica_ads::NoopAdBackend;
use cosmetica_analysis_contract::MockAnalysisProvider;
use cosmetica_app::{AppConfig, AppController, SubmitOutcome, init_logging, load_image};
use cosmetica_ui::{DisplayModel, NotificationLevel, StarMarker};

#[derive(Debug, Parser)]
#[command(name = "cosmetica", version = cosmetica_app::APP_VERSION)]
#[command(about = "Analyze cosmetic product ingredients by name or photo")]
struct Cli {
    /// Product name to look up.
    #[arg(long, conflicts_with = "image")]
    name: Option<String>,

    /// Brand name (optional, name lookups only).
    #[arg(long, requires = "name")]
    brand: Option<String>,

    /// Product photo to analyze.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Print the raw analysis result as JSON.
    #[arg(long)]
    json: bool,

    /// Override the simulated analysis delay in milliseconds.
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,
}

/// CLI entry point.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();
    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(delay_ms) = cli.delay_ms {
        config.analysis_delay = Duration::from_millis(delay_ms);
    }
    tracing::info!(
        stage = "startup",
        action = "config",
        version = cosmetica_app::app_version(),
        native = config.native_runtime,
        "cosmetica starting"
    );

    let provider = Arc::new(MockAnalysisProvider::new(config.analysis_delay));
    let mut controller = AppController::new(&config, provider, Arc::new(NoopAdBackend)).await;
    controller.open().await;

    let outcome = match (&cli.name, &cli.image) {
        (Some(name), _) => controller.submit_name(name, cli.brand.as_deref()).await,
        (None, Some(path)) => match load_image(path) {
            Ok(image) => controller.submit_image(Some(image)).await,
            Err(error) => {
                eprintln!("cannot read image '{}': {error}", path.display());
                std::process::exit(2);
            }
        },
        (None, None) => controller.submit_image(None).await,
    };

    for notification in controller.drain_notifications() {
        match notification.level {
            NotificationLevel::Success => eprintln!("{}", notification.message),
            NotificationLevel::Error => eprintln!("error: {}", notification.message),
        }
    }

    let exit_code = match outcome {
        SubmitOutcome::Completed => {
            if cli.json {
                print_json(&controller)
            } else {
                if let Some(model) = controller.display_model() {
                    print!("{}", render_text(&model));
                }
                0
            }
        }
        SubmitOutcome::Ignored => {
            eprintln!("nothing to analyze: pass --name <PRODUCT> or --image <PATH>");
            2
        }
        SubmitOutcome::Rejected | SubmitOutcome::Failed => 1,
    };

    controller.shutdown().await;
    std::process::exit(exit_code);
}

fn print_json(controller: &AppController) -> i32 {
    let Some(result) = controller.lifecycle().result() else {
        return 1;
    };
    match result.to_json_bytes() {
        Ok(bytes) => {
            println!("{}", String::from_utf8_lossy(&bytes));
            0
        }
        Err(error) => {
            eprintln!("failed to encode result: {error}");
            1
        }
    }
}

fn render_text(model: &DisplayModel) -> String {
    let stars: String = model
        .stars
        .iter()
        .map(|marker| match marker {
            StarMarker::Full => '★',
            StarMarker::Half => '⯪',
            StarMarker::Empty => '☆',
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format!("{}\n{}  [{}]\n", model.product_name, model.brand, model.category));
    out.push_str(&format!("{stars}  {}\n\n", model.rating_label));
    out.push_str(&format!("{}\n\n", model.description));
    out.push_str(&format!("Key benefits: {}\n", model.key_benefits.join(", ")));
    out.push_str(&format!("Skin types:   {}\n", model.skin_types.join(", ")));
    out.push_str(&format!("Texture:      {}\n", model.texture));
    out.push_str(&format!("Scent:        {}\n", model.scent));
    out.push_str(&format!("Price:        {}\n", model.price_range));
    out.push_str(&format!("Availability: {}\n\n", model.availability));

    out.push_str("Ingredients\n");
    for ingredient in &model.ingredients {
        out.push_str(&format!(
            "  - {} ({}) [{}]\n",
            ingredient.name, ingredient.purpose, ingredient.rating
        ));
        if let Some(benefits) = &ingredient.benefits {
            out.push_str(&format!("      benefits: {}\n", benefits.join(", ")));
        }
        if let Some(concerns) = &ingredient.concerns {
            out.push_str(&format!("      concerns: {}\n", concerns.join(", ")));
        }
    }

    out.push_str(&format!("\nUsage: {}\n", model.usage));
    if let Some(formula) = &model.formula {
        out.push_str(&format!("\nFull formula: {formula}\n"));
    }
    if let Some(warnings) = &model.warnings {
        out.push_str("\nWarnings\n");
        for warning in warnings {
            out.push_str(&format!("  ! {warning}\n"));
        }
    }
    out
}
