pub mod decode;
pub mod engines;
pub mod init;
pub mod resolve;
