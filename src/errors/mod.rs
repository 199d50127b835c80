mod client;
mod frame;
mod kinds;

pub use client::ClientError;
pub use frame::FrameError;
pub use kinds::{ExceptionCode, FrameFormatKind, FrameSizeKind};
