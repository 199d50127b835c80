mod serial;
mod settings;
pub mod types;

pub use serial::SerialSettings;
pub use settings::{ClientOptions, Settings};
pub use types::{DataBits, Parity, StopBits};
