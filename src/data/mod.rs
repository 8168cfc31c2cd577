pub mod checkpoint;
pub mod codec;
pub mod population;

pub use checkpoint::Checkpoint;
pub use codec::{encode, encode_batch, EncodedBatch, OneHot};
pub use population::PopulationConnector;
