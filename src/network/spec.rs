use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::error::ValidationError;
use crate::math::matrix::Scalar;
use crate::network::network::Network;
use crate::train::train_config::TrainConfig;

fn default_bias() -> Scalar {
    1.0
}

/// A serializable description of a network plus the hyperparameters it is
/// trained with.
///
/// `NetworkSpec` carries no weights. It can be stored as JSON and built into
/// as many independent `Network` instances as needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name, used in logs.
    pub name: String,
    /// Layer widths, input first.
    pub architecture: Vec<usize>,
    /// One activation per weighted layer.
    pub activations: Vec<ActivationFunction>,
    #[serde(default = "default_bias")]
    pub bias: Scalar,
    #[serde(default)]
    pub training: TrainConfig,
}

impl NetworkSpec {
    pub fn new(
        name: impl Into<String>,
        architecture: Vec<usize>,
        activations: Vec<ActivationFunction>,
    ) -> Self {
        NetworkSpec {
            name: name.into(),
            architecture,
            activations,
            bias: default_bias(),
            training: TrainConfig::default(),
        }
    }

    /// Builds a freshly initialised network.
    pub fn build(&self) -> Result<Network, ValidationError> {
        self.build_with_rng(&mut rand::thread_rng())
    }

    pub fn build_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Network, ValidationError> {
        let mut network = Network::with_rng(self.architecture.clone(), self.activations.clone(), rng)?;
        network.set_bias(self.bias);
        Ok(network)
    }

    /// Describes the reconstruction network: layers and activations in
    /// reverse order, output width becoming the input width.
    ///
    /// Networks built from the result share nothing with networks built from
    /// `self`.
    pub fn reversed(&self) -> NetworkSpec {
        NetworkSpec {
            name: format!("{}-reconstruction", self.name),
            architecture: self.architecture.iter().rev().copied().collect(),
            activations: self.activations.iter().rev().copied().collect(),
            bias: self.bias,
            training: self.training,
        }
    }

    /// Writes the description as pretty-printed JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()
    }

    pub fn load_json(path: impl AsRef<Path>) -> io::Result<NetworkSpec> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loss::error_function::ErrorFunction;

    #[test]
    fn parses_minimal_json() {
        let spec: NetworkSpec = serde_json::from_str(
            r#"{ "name": "xor", "architecture": [2, 3, 1], "activations": ["sigmoid", "tanh"] }"#,
        ).unwrap();
        assert_eq!(spec.bias, 1.0);
        assert_eq!(spec.activations, vec![ActivationFunction::Sigmoid, ActivationFunction::Tanh]);
        assert_eq!(spec.training.error_function, ErrorFunction::MeanSquared);
    }

    #[test]
    fn reversed_flips_layers() {
        let spec = NetworkSpec::new(
            "digits",
            vec![784, 20, 10],
            vec![ActivationFunction::ReLU, ActivationFunction::Sigmoid],
        );
        let reversed = spec.reversed();
        assert_eq!(reversed.architecture, vec![10, 20, 784]);
        assert_eq!(reversed.activations, vec![ActivationFunction::Sigmoid, ActivationFunction::ReLU]);
        assert_eq!(reversed.reversed().architecture, spec.architecture);
    }

    #[test]
    fn reversed_spec_builds_an_independent_network() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;
        use crate::train::observer::NoopObserver;

        let spec = NetworkSpec::new(
            "glyphs",
            vec![4, 3, 2],
            vec![ActivationFunction::Tanh, ActivationFunction::Sigmoid],
        );
        let mut rng = StdRng::seed_from_u64(5);
        let classifier = spec.build_with_rng(&mut rng).unwrap();
        let mut reconstruction = spec.reversed().build_with_rng(&mut rng).unwrap();
        assert_eq!(reconstruction.architecture(), &[2, 3, 4]);

        let before = classifier.weights().clone();
        let reconstruction_before = reconstruction.weights().clone();
        let config = TrainConfig::new(5, ErrorFunction::MeanSquared, 0.5);
        reconstruction
            .train(&config, &[vec![1.0, 0.0]], &[vec![0.0, 1.0, 1.0, 0.0]], &mut NoopObserver)
            .unwrap();

        assert_ne!(reconstruction.weights(), &reconstruction_before);
        assert_eq!(classifier.weights(), &before);
        assert!(!classifier.is_training());
    }

    #[test]
    fn json_file_round_trip() {
        let mut spec = NetworkSpec::new(
            "digits",
            vec![784, 20, 10],
            vec![ActivationFunction::ReLU, ActivationFunction::Softplus],
        );
        spec.bias = 0.5;
        spec.training = TrainConfig::new(7, ErrorFunction::CrossEntropy, 0.05).with_momentum(0.3);

        let path = std::env::temp_dir().join(format!("dense-nn-spec-{}.json", std::process::id()));
        spec.save_json(&path).unwrap();
        let loaded = NetworkSpec::load_json(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, spec);
    }

    #[test]
    fn load_json_reports_malformed_files() {
        let path = std::env::temp_dir().join(format!("dense-nn-bad-spec-{}.json", std::process::id()));
        std::fs::write(&path, "{ \"name\": 3 }").unwrap();
        let err = NetworkSpec::load_json(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn build_applies_bias() {
        let mut spec = NetworkSpec::new("tiny", vec![1, 1], vec![ActivationFunction::Sigmoid]);
        spec.bias = 0.5;
        assert_eq!(spec.build().unwrap().bias(), 0.5);
    }
}
