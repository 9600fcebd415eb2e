//! # bitmap_stego 库
//!
//! 本库包含可配置位数的 LSB 隐写核心逻辑以及命令行工具的处理函数。

// 声明库包含的所有模块。

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod handler;
pub mod pixels;
pub mod steganography;

pub use config::{Channel, ChannelConfig};
pub use error::StegoError;
pub use pixels::PixelBuffer;
pub use steganography::{capacity_bits, capacity_bytes, decode, encode, probe};
