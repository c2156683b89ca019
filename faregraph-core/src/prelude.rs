// Re-export key components
pub use crate::error::Error;
pub use crate::loading::{
    FareDirectory, LineMatrix, TransferRecord, build_fare_network, load_directory,
};
pub use crate::model::{Fare, FareInfo, FareNetwork, FarePolicy, Station};
pub use crate::routing::{Journey, JourneyFares};
