//! smosvm Command Line Interface
//!
//! Train a soft-margin SVM on a dense CSV file, classify points with it, or
//! run the built-in five-point demo.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{error, info};
use smosvm::api::{TrainedModel, SVM};
use smosvm::core::{Dataset, Result, SMOConfig, SVMError, TrainingSet};
use smosvm::kernel::{Kernel, LinearKernel, PolynomialKernel, RBFKernel};
use smosvm::load_csv;
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "smosvm")]
#[command(about = "Soft-margin SVM trained with simplified SMO")]
#[command(version = env!("CARGO_PKG_VERSION"))]
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
    /// Train a model and report its training accuracy
    Train(TrainArgs),
    /// Train a model, then classify the given points
    Predict(PredictArgs),
    /// Run the five-point example
    Demo(DemoArgs),
}

#[derive(Args)]
struct TrainArgs {
    /// Training data file (CSV, label in the last column)
    #[arg(long)]
    data: PathBuf,

    #[command(flatten)]
    params: ModelArgs,

    /// Write a JSON training report to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Args)]
struct PredictArgs {
    /// Training data file (CSV, label in the last column)
    #[arg(long)]
    data: PathBuf,

    #[command(flatten)]
    params: ModelArgs,

    /// Point to classify as comma-separated features (repeatable)
    #[arg(long = "point", required = true, allow_hyphen_values = true)]
    points: Vec<String>,
}

#[derive(Args)]
struct DemoArgs {
    /// Seed for second-index selection
    #[arg(long, default_value = "42")]
    seed: u64,
}

/// Hyperparameters shared by `train` and `predict`; flags override `--config`
#[derive(Args)]
struct ModelArgs {
    /// Regularization parameter C
    #[arg(short = 'C', long)]
    c: Option<f64>,

    /// KKT violation tolerance
    #[arg(long)]
    tolerance: Option<f64>,

    /// Consecutive sweeps without updates before training stops
    #[arg(long)]
    max_passes: Option<usize>,

    /// Seed for second-index selection (random if unset)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with c, tolerance, max_passes and seed
    #[arg(long)]
    config: Option<PathBuf>,

    /// Kernel function
    #[arg(long, value_enum, default_value = "linear")]
    kernel: CliKernel,

    /// Polynomial degree
    #[arg(long, default_value = "3")]
    degree: u32,

    /// Kernel gamma for polynomial and rbf (default 1 / n_features)
    #[arg(long)]
    gamma: Option<f64>,

    /// Polynomial independent term
    #[arg(long, default_value = "1.0")]
    coef0: f64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliKernel {
    /// Inner product
    Linear,
    /// (gamma * <x,y> + coef0)^degree
    Polynomial,
    /// exp(-gamma * ||x - y||^2)
    Rbf,
}

/// Kernel chosen on the command line
enum SelectedKernel {
    Linear(LinearKernel),
    Polynomial(PolynomialKernel),
    Rbf(RBFKernel),
}

impl Kernel for SelectedKernel {
    fn compute(&self, x: &[f64], y: &[f64]) -> f64 {
        match self {
            SelectedKernel::Linear(k) => k.compute(x, y),
            SelectedKernel::Polynomial(k) => k.compute(x, y),
            SelectedKernel::Rbf(k) => k.compute(x, y),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            SelectedKernel::Linear(k) => k.name(),
            SelectedKernel::Polynomial(k) => k.name(),
            SelectedKernel::Rbf(k) => k.name(),
        }
    }
}

impl ModelArgs {
    fn resolve_config(&self) -> Result<SMOConfig> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading configuration from: {path:?}");
                SMOConfig::from_json_file(path)?
            }
            None => SMOConfig::default(),
        };

        if let Some(c) = self.c {
            config.c = c;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        if let Some(max_passes) = self.max_passes {
            config.max_passes = max_passes;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }

    // Kernel constructors assert on their parameters, so check them here first
    fn build_kernel(&self, n_features: usize) -> Result<SelectedKernel> {
        let gamma = self.gamma.unwrap_or(1.0 / n_features.max(1) as f64);

        match self.kernel {
            CliKernel::Linear => Ok(SelectedKernel::Linear(LinearKernel::new())),
            CliKernel::Polynomial => {
                check_gamma(gamma)?;
                if self.degree == 0 {
                    return Err(SVMError::InvalidParameter(
                        "Polynomial degree must be positive".to_string(),
                    ));
                }
                if !self.coef0.is_finite() {
                    return Err(SVMError::InvalidParameter(format!(
                        "coef0 must be finite, got: {}",
                        self.coef0
                    )));
                }
                Ok(SelectedKernel::Polynomial(PolynomialKernel::new(
                    self.degree,
                    gamma,
                    self.coef0,
                )))
            }
            CliKernel::Rbf => {
                check_gamma(gamma)?;
                Ok(SelectedKernel::Rbf(RBFKernel::new(gamma)))
            }
        }
    }
}

fn check_gamma(gamma: f64) -> Result<()> {
    if gamma.is_finite() && gamma > 0.0 {
        Ok(())
    } else {
        Err(SVMError::InvalidParameter(format!(
            "Gamma must be positive, got: {gamma}"
        )))
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
        Commands::Train(args) => train_command(args),
        Commands::Predict(args) => predict_command(args),
        Commands::Demo(args) => demo_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn fit_from_args<'a>(
    params: &ModelArgs,
    dataset: &'a TrainingSet,
) -> Result<TrainedModel<'a, SelectedKernel, TrainingSet>> {
    let config = params.resolve_config()?;
    let kernel = params.build_kernel(dataset.dim())?;

    info!(
        "Training {} kernel: C={}, tolerance={}, max_passes={}, seed={:?}",
        kernel.name(),
        config.c,
        config.tolerance,
        config.max_passes,
        config.seed
    );

    SVM::with_kernel(kernel).with_config(config).fit(dataset)
}

fn train_command(args: TrainArgs) -> Result<()> {
    info!("Data file: {:?}", args.data);
    let dataset = load_csv(&args.data)?;
    info!(
        "Loaded {} samples with {} dimensions",
        dataset.len(),
        dataset.dim()
    );

    let model = fit_from_args(&args.params, &dataset)?;
    let report = model.report()?;

    println!("=== Training Summary ===");
    println!("Samples:          {}", report.n_samples);
    println!("Features:         {}", report.n_features);
    println!("Kernel:           {}", report.kernel);
    println!("C:                {}", report.config.c);
    println!("Sweeps:           {}", report.sweeps);
    println!("Updates:          {}", report.updates);
    println!("Support vectors:  {}", report.n_support_vectors);
    println!("Bias:             {:.6}", report.bias);
    println!("Dual objective:   {:.6}", report.objective_value);
    println!("Training accuracy: {:.2}%", report.training_accuracy * 100.0);

    if let Some(path) = &args.report {
        fs::write(path, report.to_json()?)?;
        info!("Report saved to: {path:?}");
    }

    Ok(())
}

fn predict_command(args: PredictArgs) -> Result<()> {
    let points = args
        .points
        .iter()
        .map(|p| parse_point(p))
        .collect::<Result<Vec<_>>>()?;

    let dataset = load_csv(&args.data)?;
    let model = fit_from_args(&args.params, &dataset)?;
    info!(
        "Trained model with {} support vectors",
        model.info().n_support_vectors
    );

    for (point, prediction) in points.iter().zip(model.predict_batch(&points)?) {
        println!(
            "{:?} -> {} ({:.6})",
            point, prediction.label, prediction.decision_value
        );
    }

    Ok(())
}

fn demo_command(args: DemoArgs) -> Result<()> {
    let dataset = TrainingSet::new(
        vec![
            vec![1.0, 2.0],
            vec![2.0, 3.0],
            vec![3.0, 3.0],
            vec![2.0, 1.0],
            vec![3.0, 2.0],
        ],
        vec![1.0, 1.0, 1.0, -1.0, -1.0],
    )?;

    let model = SVM::new()
        .with_c(1.0)
        .with_tolerance(0.001)
        .with_max_passes(1000)
        .with_seed(args.seed)
        .fit(&dataset)?;

    let info = model.info();
    println!("=== Demo: linear kernel, C=1.0 ===");
    println!("Support vectors:  {:?}", info.support_vector_indices);
    println!("Bias:             {:.6}", info.bias);
    println!(
        "Training accuracy: {:.2}%",
        model.evaluate(&dataset)? * 100.0
    );

    let point = [2.5, 2.5];
    let prediction = model.predict_with_decision(&point)?;
    println!(
        "{:?} -> {} ({:.6})",
        point, prediction.label, prediction.decision_value
    );

    Ok(())
}

/// Parse comma-separated feature values
fn parse_point(s: &str) -> Result<Vec<f64>> {
    let values = s
        .split(',')
        .map(|field| {
            let field = field.trim();
            field
                .parse::<f64>()
                .map_err(|_| SVMError::ParseError(format!("Invalid feature value: {field}")))
        })
        .collect::<Result<Vec<f64>>>()?;

    if values.iter().any(|v| !v.is_finite()) {
        return Err(SVMError::ParseError(format!(
            "Point must contain finite values: {s}"
        )));
    }
    Ok(values)
}
