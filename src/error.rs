//! # 错误类型模块
//!
//! 隐写核心 (`config`、`steganography`) 返回的所有错误。
//! 命令行层通过 `anyhow` 为这些错误附加上下文。

use crate::config::Channel;
use thiserror::Error;

/// 隐写核心的结果类型别名。
pub type Result<T> = std::result::Result<T, StegoError>;

/// 编码、解码以及通道配置可能产生的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 通道位数超出 `[0, 8]`。
    #[error("Channel bit count out of range: {channel} = {bits}, expected 0..=8")]
    ChannelBits { channel: Channel, bits: i32 },

    /// 数据量超过图像在当前配置下的容量。
    #[error("Data overflow: payload needs {required_bits} bits, image offers {available_bits} bits")]
    DataOverflow {
        required_bits: u64,
        available_bits: u64,
    },

    /// 数据长度无法写入长度像素 (无 alpha 通道时只剩 24 位)。
    #[error("Data overflow: payload length {length} cannot be recorded in the header (max {max})")]
    LengthNotRepresentable { length: usize, max: usize },

    #[error("Wrong input: wrong formatted header (channel bits R={red}, G={green}, B={blue})")]
    MalformedHeader { red: u8, green: u8, blue: u8 },

    #[error("Wrong input: wrong formatted header (negative data length {0})")]
    NegativeLength(i32),

    /// 头部声明了数据，但配置中每像素的位数为 0。
    #[error("Header declares {length} bytes of data but no channel carries any bits")]
    NoPayloadChannels { length: usize },

    /// 头部声明的数据长度需要的像素超过图像实际像素数。
    #[error("Declared data needs {required} pixels, image only has {available}")]
    InsufficientPixels { required: usize, available: usize },

    #[error("Image {width}x{height} is too small to hold the header")]
    ImageTooSmall { width: u32, height: u32 },
}
