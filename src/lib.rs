//! Asynchronous Modbus client: Modbus/TCP (MBAP) and Modbus RTU (serial,
//! including RFC 2217 serial-over-TCP), function codes 01/02/03/04/05/06/15/16.

pub mod client;
pub mod codec;
pub mod config;
pub mod errors;
pub mod exception;
pub mod logging;
pub mod pdu;
pub mod stream;
pub mod transaction;
pub mod url;
pub mod value;

pub use client::{Client, RtuClient, TcpClient};
pub use config::{ClientOptions, SerialSettings, Settings};
pub use errors::{ClientError, ExceptionCode, FrameError, FrameFormatKind, FrameSizeKind};
pub use logging::{setup_logging, LoggingOptions};
pub use stream::AsyncStream;
pub use url::{connect, Connection};
pub use value::RegisterValues;
