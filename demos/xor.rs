use dense_nn::{ActivationFunction, ErrorFunction, Network, TracingObserver, TrainConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("dense_nn=warn"))
        .init();

    let mut network = Network::new(
        vec![2, 3, 1],
        vec![ActivationFunction::Sigmoid, ActivationFunction::Sigmoid],
    )?;

    let inputs = vec![
        vec![0.0, 0.0],
        vec![1.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 1.0],
    ];
    let expected_outputs = vec![
        vec![0.0],
        vec![1.0],
        vec![1.0],
        vec![0.0],
    ];

    let config = TrainConfig::new(1000, ErrorFunction::MeanSquared, 0.4).with_momentum(0.3);
    let mut observer = TracingObserver::new();

    for round in 0..10 {
        network.train(&config, &inputs, &expected_outputs, &mut observer)?;
        println!("Epoch {}: error = {:.6}", (round + 1) * config.epochs, observer.last_error().unwrap_or(f32::NAN));
    }

    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input, network.feed_forward(input)[0]);
    }
    Ok(())
}
