pub mod cancel;
pub mod observer;
pub mod shuffle;
pub mod train_config;

pub use cancel::CancellationToken;
pub use observer::{ChannelObserver, NoopObserver, TracingObserver, TrainingEvent, TrainingObserver};
pub use shuffle::shuffle_dataset;
pub use train_config::TrainConfig;
