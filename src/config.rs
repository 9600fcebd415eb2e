//! # 通道配置模块
//!
//! 描述每个像素的 R、G、B 通道各取多少个最低位用于存放数据。

use crate::constants::MAX_CHANNEL_BITS;
use crate::error::{Result, StegoError};
use std::fmt;

/// 参与隐写的颜色通道，按写入顺序排列。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// 通道在像素 `[R, G, B]` 数组中的顺序，也是数据位的消费顺序。
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// 已校验的通道位数配置。
///
/// 每个字段都在赋值时独立校验，超出 `[0, 8]` 的值不会被保存。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelConfig {
    bits: [u8; 3],
}

impl ChannelConfig {
    /// 以三个通道的位数构造配置。
    ///
    /// # Errors
    ///
    /// 任一通道位数大于 8 时返回 [`StegoError::ChannelBits`]。
    pub fn new(red: u8, green: u8, blue: u8) -> Result<Self> {
        Self::try_from([i32::from(red), i32::from(green), i32::from(blue)])
    }

    /// 返回修改了单个通道位数的新配置，原配置保持不变。
    ///
    /// # Errors
    ///
    /// `bits` 不在 `[0, 8]` 内时返回 [`StegoError::ChannelBits`]。
    pub fn with_bits(mut self, channel: Channel, bits: i32) -> Result<Self> {
        let checked = u8::try_from(bits)
            .ok()
            .filter(|&b| b <= MAX_CHANNEL_BITS)
            .ok_or(StegoError::ChannelBits { channel, bits })?;
        self.bits[channel.index()] = checked;
        Ok(self)
    }

    pub fn bits(&self, channel: Channel) -> u8 {
        self.bits[channel.index()]
    }

    /// 每个像素可存放的数据位数。
    pub fn bits_per_pixel(&self) -> u32 {
        self.bits.iter().map(|&b| u32::from(b)).sum()
    }

    /// 通道的低位掩码，`n` 位时为 `(1 << n) - 1`。
    pub fn mask(&self, channel: Channel) -> u8 {
        ((1u16 << self.bits(channel)) - 1) as u8
    }

    /// 按 `[R, G, B]` 顺序返回原始位数，即头部像素 0 的内容。
    pub fn as_rgb(&self) -> [u8; 3] {
        self.bits
    }
}

impl TryFrom<[i32; 3]> for ChannelConfig {
    type Error = StegoError;

    fn try_from([red, green, blue]: [i32; 3]) -> Result<Self> {
        Self::default()
            .with_bits(Channel::Red, red)?
            .with_bits(Channel::Green, green)?
            .with_bits(Channel::Blue, blue)
    }
}

impl fmt::Display for ChannelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.bits;
        write!(f, "R{r}G{g}B{b}")
    }
}
