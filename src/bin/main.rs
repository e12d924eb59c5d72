//! AROW Command Line Interface
//!
//! Cross-validates or trains an AROW linear classifier on delimited text
//! data.

use arow::core::{ArowConfig, Dataset, Result};
use arow::linalg::format_vector;
use arow::{evaluate, Arow};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::{error, info};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "arow")]
#[command(about = "Adaptive Regularization of Weight Vectors with k-fold cross-validation")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "AROW Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run k-fold cross-validation and report the average error rate
    Cv(CvArgs),
    /// Train on the whole dataset and print the learned weights
    Train(TrainArgs),
}

#[derive(Args)]
struct CvArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Number of folds
    #[arg(short = 'k', long)]
    folds: Option<usize>,
}

#[derive(Args)]
struct TrainArgs {
    #[command(flatten)]
    common: CommonArgs,
}

/// Options shared by all commands; unset options fall back to the config
/// file, then to the built-in defaults
#[derive(Args)]
struct CommonArgs {
    /// Data file (one delimited record per line)
    #[arg(long)]
    data: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Field separator
    #[arg(short, long)]
    separator: Option<String>,

    /// Number of training epochs
    #[arg(short, long)]
    epochs: Option<usize>,

    /// Regularization parameter r
    #[arg(short = 'r', long)]
    hyper_parameter: Option<f64>,

    /// Prepend a constant 1.0 bias feature
    #[arg(long, value_name = "BOOL")]
    bias_feature: Option<bool>,

    /// Label is the first field (true) or the last field (false)
    #[arg(long, value_name = "BOOL")]
    reverse: Option<bool>,

    /// Records have no label field
    #[arg(long)]
    no_label: bool,

    /// Label used for every record when --no-label is set
    #[arg(long)]
    default_label: Option<f64>,

    /// Skip unparsable lines instead of aborting
    #[arg(long)]
    skip_malformed: bool,

    /// Random seed for reproducible shuffling
    #[arg(long)]
    seed: Option<u64>,
}

impl CommonArgs {
    fn resolve(&self) -> Result<ArowConfig> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading configuration from: {path:?}");
                ArowConfig::from_json_file(path)?
            }
            None => ArowConfig::default(),
        };

        if let Some(separator) = &self.separator {
            config.separator = separator.clone();
        }
        if let Some(epochs) = self.epochs {
            config.epoch = epochs;
        }
        if let Some(r) = self.hyper_parameter {
            config.hyper_parameter = r;
        }
        if let Some(bias_feature) = self.bias_feature {
            config.bias_feature = bias_feature;
        }
        if let Some(reverse) = self.reverse {
            config.reverse = reverse;
        }
        if self.no_label {
            config.no_label = true;
        }
        if let Some(default_label) = self.default_label {
            config.default_label = default_label;
        }
        if self.skip_malformed {
            config.skip_malformed = true;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Cv(args) => cv_command(args),
        Commands::Train(args) => train_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn cv_command(args: CvArgs) -> Result<()> {
    let mut config = args.common.resolve()?;
    if let Some(folds) = args.folds {
        config.fold = folds;
    }

    info!("Cross-validating on: {:?}", args.common.data);
    info!(
        "Parameters: epoch={}, r={}, fold={}",
        config.epoch, config.hyper_parameter, config.fold
    );

    let arow = Arow::from_config(config);
    let report = arow.cross_validate_file(&args.common.data)?;

    println!("=== Cross-Validation Results ===");
    println!("Data file: {:?}", args.common.data);
    println!("Feature dimension: {}", report.feature_dimension);
    println!("Folds: {}", report.folds.len());
    for fold in &report.folds {
        println!(
            "  fold {}: train={} test={} misclassified={} error={:.4}",
            fold.index,
            fold.train_size,
            fold.test_size,
            fold.evaluation.misclassified,
            fold.evaluation.error_rate()
        );
    }

    let total = report.total();
    println!("Precision: {:.4}", total.precision());
    println!("Recall:    {:.4}", total.recall());
    println!("F1 Score:  {:.4}", total.f1_score());
    println!("Average error: {:.6}", report.average_error());

    Ok(())
}

fn train_command(args: TrainArgs) -> Result<()> {
    let config = args.common.resolve()?;
    info!("Training on: {:?}", args.common.data);

    let arow = Arow::from_config(config);
    let dataset = arow.load(&args.common.data)?;
    info!(
        "Loaded {} instances with {} features",
        dataset.len(),
        dataset.dim()
    );

    let model = arow.train(&dataset)?;
    let training = evaluate(
        &model,
        dataset.instances(),
        dataset.dim(),
        arow.config().label_policy(),
    )?;

    println!("=== Training Results ===");
    println!("Instances: {}", dataset.len());
    println!("Weights: {}", format_vector(model.weights()));
    println!("Training error: {:.6}", training.error_rate());

    Ok(())
}
