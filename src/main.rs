use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use dense_nn::{
    ActivationFunction, ChannelObserver, ErrorFunction, Network, NetworkSpec, Scalar, TrainingEvent, Vector,
};

/// Trains a dense network on a small JSON dataset (XOR by default) and prints
/// its predictions.
#[derive(Parser, Debug)]
#[command(name = "dense-nn", version, about)]
struct Args {
    /// Network description (architecture, activations, bias, training).
    #[arg(long)]
    spec: Option<PathBuf>,

    /// Dataset as `{ "inputs": [[..]], "targets": [[..]] }`.
    #[arg(long)]
    data: Option<PathBuf>,

    #[arg(long)]
    epochs: Option<usize>,

    #[arg(long)]
    learning_rate: Option<Scalar>,

    #[arg(long)]
    momentum: Option<Scalar>,

    /// One of `sum_of_squared`, `mean_squared`, `cross_entropy`.
    #[arg(long, value_parser = parse_error_function)]
    error_function: Option<ErrorFunction>,

    /// Seed for the initial weights.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the effective network description (after overrides) here.
    #[arg(long)]
    save_spec: Option<PathBuf>,

    /// Subtract each input's mean before training.
    #[arg(long)]
    preprocess: bool,
}

#[derive(Debug, Deserialize)]
struct Dataset {
    inputs: Vec<Vector>,
    targets: Vec<Vector>,
}

impl Dataset {
    fn xor() -> Self {
        Dataset {
            inputs: vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]],
            targets: vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]],
        }
    }
}

fn parse_error_function(s: &str) -> Result<ErrorFunction, String> {
    serde_json::from_value(serde_json::Value::String(s.to_owned()))
        .map_err(|_| format!("unknown error function `{s}`"))
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive("dense_nn=info".parse()?))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut spec = match &args.spec {
        Some(path) => NetworkSpec::load_json(path)
            .with_context(|| format!("reading network spec {}", path.display()))?,
        None => {
            let mut spec = NetworkSpec::new(
                "xor",
                vec![2, 3, 1],
                vec![ActivationFunction::Sigmoid, ActivationFunction::Sigmoid],
            );
            spec.training.epochs = 10_000;
            spec.training.learning_rate = 0.4;
            spec.training.momentum = 0.0;
            spec
        }
    };
    if let Some(epochs) = args.epochs {
        spec.training.epochs = epochs;
    }
    if let Some(learning_rate) = args.learning_rate {
        spec.training.learning_rate = learning_rate;
    }
    if let Some(momentum) = args.momentum {
        spec.training.momentum = momentum;
    }
    if let Some(error_function) = args.error_function {
        spec.training.error_function = error_function;
    }

    if let Some(path) = &args.save_spec {
        spec.save_json(path)
            .with_context(|| format!("writing network spec {}", path.display()))?;
        info!(path = %path.display(), "network spec saved");
    }

    let mut dataset: Dataset = match &args.data {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening dataset {}", path.display()))?;
            serde_json::from_reader(std::io::BufReader::new(file))
                .with_context(|| format!("parsing dataset {}", path.display()))?
        }
        None => Dataset::xor(),
    };
    if args.preprocess {
        dataset.inputs = dataset.inputs.iter().map(|v| Network::preprocess(v)).collect();
    }

    let mut network = match args.seed {
        Some(seed) => spec.build_with_rng(&mut StdRng::seed_from_u64(seed))?,
        None => spec.build()?,
    };
    info!(name = %spec.name, architecture = ?spec.architecture, "network built");

    let (tx, rx) = mpsc::channel();
    let config = spec.training;
    let worker = thread::spawn(move || -> Result<(Network, Dataset)> {
        let mut observer = ChannelObserver::new(tx);
        network.train(&config, &dataset.inputs, &dataset.targets, &mut observer)?;
        Ok((network, dataset))
    });

    let report_every = (config.epochs / 10).max(1);
    for event in rx {
        if let TrainingEvent::Error { epoch, error } = event {
            if epoch % report_every == 0 || epoch == config.epochs {
                info!(epoch, error, "epoch complete");
            }
        }
    }

    let (network, dataset) = worker.join().map_err(|_| anyhow!("training thread panicked"))??;

    for input in &dataset.inputs {
        println!("Input: {:?} -> Output: {:?}", input, network.feed_forward(input));
    }
    let error = network.evaluate(config.error_function, &dataset.inputs, &dataset.targets)?;
    println!("Final error: {error:.6}");
    if network.output_size() > 1 {
        let accuracy = network.accuracy(&dataset.inputs, &dataset.targets)?;
        println!("Accuracy: {:.2} %", accuracy * 100.0);
    }

    Ok(())
}
