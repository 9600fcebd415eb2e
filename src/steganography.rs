//! # 隐写核心模块
//!
//! 头部布局：
//! * 像素 0：R、G、B 原样存放三个通道的位数 (0..=8)。
//! * 像素 1：32 位数据长度，按 ARGB 打包 (A 为最高字节)。
//! * 像素 2 起按行优先顺序存放数据位，每个字节高位在前。

use crate::config::{Channel, ChannelConfig};
use crate::constants::HEADER_PIXELS;
use crate::error::{Result, StegoError};
use crate::pixels::PixelBuffer;
use log::debug;

/// 图像在给定配置下可存放的数据位数：`(width * height - 2) * bits_per_pixel`。
pub fn capacity_bits(width: u32, height: u32, config: &ChannelConfig) -> u64 {
    let pixels = u64::from(width) * u64::from(height);
    pixels.saturating_sub(HEADER_PIXELS as u64) * u64::from(config.bits_per_pixel())
}

/// 图像在给定配置下可存放的完整字节数。
pub fn capacity_bytes(width: u32, height: u32, config: &ChannelConfig) -> u64 {
    capacity_bits(width, height, config) / 8
}

/// 将 `payload` 隐藏进 `cover` 的副本中并返回该副本，`cover` 本身不被修改。
///
/// 头部之后、数据区之外的像素与 `cover` 逐位相同。
///
/// # Errors
///
/// * [`StegoError::ImageTooSmall`]：图像不足两个像素，放不下头部。
/// * [`StegoError::DataOverflow`]：数据位数超过图像容量。
/// * [`StegoError::LengthNotRepresentable`]：长度像素无法记录该数据长度。
pub fn encode<B>(cover: &B, config: &ChannelConfig, payload: &[u8]) -> Result<B>
where
    B: PixelBuffer + Clone,
{
    let (width, height) = (cover.width(), cover.height());
    if cover.pixel_count() < HEADER_PIXELS {
        return Err(StegoError::ImageTooSmall { width, height });
    }

    let required_bits = payload.len() as u64 * 8;
    let available_bits = capacity_bits(width, height, config);
    if required_bits > available_bits {
        return Err(StegoError::DataOverflow {
            required_bits,
            available_bits,
        });
    }
    if payload.len() > B::MAX_DECLARED_LENGTH {
        return Err(StegoError::LengthNotRepresentable {
            length: payload.len(),
            max: B::MAX_DECLARED_LENGTH,
        });
    }

    let mut output = cover.clone();

    let (x, y) = output.position(0);
    output.write_rgb(x, y, config.as_rgb());
    let (x, y) = output.position(1);
    output.write_argb(x, y, payload.len() as u32);

    let pixels_needed = required_pixels(required_bits, config.bits_per_pixel());
    debug!(
        "encoding {} bytes with {config} into {width}x{height}, {pixels_needed} pixels",
        payload.len()
    );

    let mut bits = PayloadBits::new(payload);
    for index in HEADER_PIXELS..HEADER_PIXELS + pixels_needed as usize {
        let (x, y) = cover.position(index);
        let mut pixel = cover.read_rgb(x, y);
        for channel in Channel::ALL {
            let value = &mut pixel[channel.index()];
            *value = (*value & !config.mask(channel)) | bits.take(config.bits(channel));
        }
        output.write_rgb(x, y, pixel);
    }

    Ok(output)
}

/// 从经过隐写的图像中恢复数据，`encoded` 只读。
///
/// # Errors
///
/// * [`StegoError::ImageTooSmall`]：图像不足两个像素。
/// * [`StegoError::MalformedHeader`] / [`StegoError::NegativeLength`]：头部不合法，
///   通常意味着图像并未经过隐写。
/// * [`StegoError::NoPayloadChannels`]：声明了数据但每像素位数为 0。
/// * [`StegoError::InsufficientPixels`]：声明的长度超出图像实际容量。
pub fn decode<B: PixelBuffer>(encoded: &B) -> Result<Vec<u8>> {
    let pixel_count = encoded.pixel_count();
    if pixel_count < HEADER_PIXELS {
        return Err(StegoError::ImageTooSmall {
            width: encoded.width(),
            height: encoded.height(),
        });
    }

    let config = read_config(encoded)?;
    let length = read_length(encoded)?;
    debug!("header declares {length} bytes with {config}");

    if length == 0 {
        return Ok(Vec::new());
    }
    let bits_per_pixel = config.bits_per_pixel();
    if bits_per_pixel == 0 {
        return Err(StegoError::NoPayloadChannels { length });
    }

    let required = required_pixels(length as u64 * 8, bits_per_pixel);
    let available = pixel_count - HEADER_PIXELS;
    if required > available as u64 {
        return Err(StegoError::InsufficientPixels {
            required: usize::try_from(required).unwrap_or(usize::MAX),
            available,
        });
    }

    let mut collected = BitCollector::with_capacity(length);
    for index in HEADER_PIXELS..HEADER_PIXELS + required as usize {
        let (x, y) = encoded.position(index);
        let pixel = encoded.read_rgb(x, y);
        for channel in Channel::ALL {
            collected.push(
                pixel[channel.index()] & config.mask(channel),
                config.bits(channel),
            );
        }
    }

    Ok(collected.into_bytes(length))
}

/// 判断图像是否像是已经携带了数据 (头部合法且能完整解码)。
///
/// 这只是启发式判断：未经隐写的图像若头部像素恰好合法，也会返回 `true`。
pub fn probe<B: PixelBuffer>(buffer: &B) -> bool {
    decode(buffer).is_ok()
}

fn read_config<B: PixelBuffer>(buffer: &B) -> Result<ChannelConfig> {
    let (x, y) = buffer.position(0);
    let [red, green, blue] = buffer.read_rgb(x, y);
    ChannelConfig::new(red, green, blue)
        .map_err(|_| StegoError::MalformedHeader { red, green, blue })
}

fn read_length<B: PixelBuffer>(buffer: &B) -> Result<usize> {
    let (x, y) = buffer.position(1);
    let raw = buffer.read_argb(x, y) as i32;
    usize::try_from(raw).map_err(|_| StegoError::NegativeLength(raw))
}

/// 向上取整的除法；`bits_per_pixel` 为 0 时不需要任何像素。
fn required_pixels(bits: u64, bits_per_pixel: u32) -> u64 {
    match bits_per_pixel {
        0 => 0,
        bpp => bits.div_ceil(u64::from(bpp)),
    }
}

/// 数据的位流视图，高位在前；越过末尾的位按 0 处理。
struct PayloadBits<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> PayloadBits<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0 }
    }

    fn next_bit(&mut self) -> u8 {
        let bit = self
            .data
            .get(self.cursor / 8)
            .map_or(0, |&byte| (byte >> (7 - self.cursor % 8)) & 1);
        self.cursor += 1;
        bit
    }

    /// 取出接下来的 `count` 位，组成一个高位在前的整数。
    fn take(&mut self, count: u8) -> u8 {
        (0..count).fold(0, |acc, _| (acc << 1) | self.next_bit())
    }
}

/// 逐位收集解码结果并按 8 位一组拼成字节。
struct BitCollector {
    bytes: Vec<u8>,
    current: u8,
    filled: u8,
}

impl BitCollector {
    fn with_capacity(length: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(length + 1),
            current: 0,
            filled: 0,
        }
    }

    /// 追加 `value` 的低 `count` 位，高位在前。
    fn push(&mut self, value: u8, count: u8) {
        for shift in (0..count).rev() {
            self.current = (self.current << 1) | ((value >> shift) & 1);
            self.filled += 1;
            if self.filled == 8 {
                self.bytes.push(self.current);
                self.current = 0;
                self.filled = 0;
            }
        }
    }

    fn into_bytes(mut self, length: usize) -> Vec<u8> {
        self.bytes.truncate(length);
        self.bytes
    }
}
