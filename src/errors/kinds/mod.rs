mod exception_code;
mod frame_format;
mod frame_size;

pub use exception_code::ExceptionCode;
pub use frame_format::FrameFormatKind;
pub use frame_size::FrameSizeKind;
