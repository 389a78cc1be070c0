//! Trains a classifier and its reconstruction network side by side.
//!
//! The reconstruction network maps labels back to inputs. It is built from
//! the reversed description, so the two share no weights and each trains on
//! its own thread. Press Enter to cancel both.

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use dense_nn::{
    ActivationFunction, ChannelObserver, ErrorFunction, NetworkSpec, TrainingEvent, Vector,
};

/// 3x3 glyphs for the digits 0, 1 and 7, one-hot labelled.
fn glyphs() -> (Vec<Vector>, Vec<Vector>) {
    let inputs = vec![
        vec![1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0],
        vec![0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0],
        vec![1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
    ];
    let labels = vec![
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
    ];
    (inputs, labels)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("dense_nn=info"))
        .init();

    let mut spec = NetworkSpec::new(
        "glyphs",
        vec![9, 6, 3],
        vec![ActivationFunction::Sigmoid, ActivationFunction::Sigmoid],
    );
    spec.training.epochs = 5000;
    spec.training.learning_rate = 0.5;
    spec.training.momentum = 0.2;
    spec.training.error_function = ErrorFunction::MeanSquared;

    let mut classifier = spec.build()?;
    let mut reconstruction = spec.reversed().build()?;
    let tokens = [classifier.cancel_token(), reconstruction.cancel_token()];

    let (inputs, labels) = glyphs();
    let (tx, rx) = mpsc::channel();

    let config = spec.training;
    let forward = {
        let (inputs, labels, tx) = (inputs.clone(), labels.clone(), tx.clone());
        thread::spawn(move || {
            classifier.train(&config, &inputs, &labels, &mut ChannelObserver::new(tx))?;
            Ok::<_, dense_nn::ValidationError>(classifier)
        })
    };
    let backward = {
        let (inputs, labels) = (inputs.clone(), labels.clone());
        thread::spawn(move || {
            reconstruction.train(&config, &labels, &inputs, &mut ChannelObserver::new(tx))?;
            Ok::<_, dense_nn::ValidationError>(reconstruction)
        })
    };

    thread::spawn(move || {
        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line).is_ok() {
            for token in &tokens {
                token.cancel();
            }
        }
    });

    for event in rx {
        if let TrainingEvent::Error { epoch, error } = event {
            if epoch % 1000 == 0 {
                println!("epoch {epoch}: error {error:.5}");
            }
        }
    }

    let classifier = forward.join().map_err(|_| "classifier thread panicked")??;
    let reconstruction = backward.join().map_err(|_| "reconstruction thread panicked")??;

    println!("accuracy: {:.0} %", classifier.accuracy(&inputs, &labels)? * 100.0);
    for label in &labels {
        let pixels: Vec<String> = reconstruction.feed_forward(label).iter()
            .map(|p| if *p > 0.5 { "#".to_string() } else { ".".to_string() })
            .collect();
        println!("{:?} -> {}", label, pixels.concat());
    }
    Ok(())
}
