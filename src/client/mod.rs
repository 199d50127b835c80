pub mod generic;
pub mod rtu;
pub mod tcp;

pub use generic::Client;
pub use rtu::RtuClient;
pub use tcp::TcpClient;
