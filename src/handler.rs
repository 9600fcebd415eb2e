//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::config::ChannelConfig;
use crate::constants::{
    DEFAULT_DATA_EXTENSION, DEFAULT_IMAGE_EXTENSION, DOCTORED_PREFIX, RECOVERED_PREFIX,
};
use crate::error::StegoError;
use crate::steganography::{capacity_bits, capacity_bytes, decode, encode, probe};
use anyhow::{Context, Result};
use colored::Colorize;
use image::{RgbImage, RgbaImage};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// 从磁盘载入的载体图像。带 alpha 通道的图像按 RGBA8 处理，其余按 RGB8 处理。
enum Carrier {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl Carrier {
    fn open(path: &Path) -> Result<Self> {
        let img = image::open(path).with_context(|| {
            format!(
                "Unable to read image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?;
        info!("loaded {} ({:?})", path.display(), img.color());

        Ok(if img.color().has_alpha() {
            Carrier::Rgba(img.into_rgba8())
        } else {
            Carrier::Rgb(img.into_rgb8())
        })
    }

    fn dimensions(&self) -> (u32, u32) {
        match self {
            Carrier::Rgb(img) => img.dimensions(),
            Carrier::Rgba(img) => img.dimensions(),
        }
    }

    fn probe(&self) -> bool {
        match self {
            Carrier::Rgb(img) => probe(img),
            Carrier::Rgba(img) => probe(img),
        }
    }

    fn encode(&self, config: &ChannelConfig, data: &[u8]) -> Result<Self, StegoError> {
        Ok(match self {
            Carrier::Rgb(img) => Carrier::Rgb(encode(img, config, data)?),
            Carrier::Rgba(img) => Carrier::Rgba(encode(img, config, data)?),
        })
    }

    fn decode(&self) -> Result<Vec<u8>, StegoError> {
        match self {
            Carrier::Rgb(img) => decode(img),
            Carrier::Rgba(img) => decode(img),
        }
    }

    fn save(&self, path: &Path) -> image::ImageResult<()> {
        match self {
            Carrier::Rgb(img) => img.save(path),
            Carrier::Rgba(img) => img.save(path),
        }
    }
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和数据文件、校验通道配置、调用隐写核心函数写入头部与数据，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径和通道位数的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 通道位数不在 0..=8 之内。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像或数据文件。
/// * 图像在当前配置下没有足够的空间来隐藏数据。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let config = ChannelConfig::try_from(args.channels)
        .context("Invalid channel configuration")?;

    let dest = args.dest.unwrap_or_else(|| {
        default_output(&args.image, DOCTORED_PREFIX, DEFAULT_IMAGE_EXTENSION)
    });
    ensure_writable(&dest, args.force)?;

    let carrier = Carrier::open(&args.image)?;

    let data = fs::read(&args.data).with_context(|| {
        format!(
            "Unable to read data file: {}",
            args.data.to_string_lossy().red().bold()
        )
    })?;

    if carrier.probe() {
        warn!(
            "{} appears to already contain hidden data, it will be overwritten",
            args.image.display()
        );
    }

    let (width, height) = carrier.dimensions();
    let encoded = carrier.encode(&config, &data).map_err(|err| {
        let context = hide_failure_context(
            &err,
            &args.image,
            data.len(),
            capacity_bytes(width, height, &config),
            &config,
        );
        anyhow::Error::new(err).context(context)
    })?;

    encoded.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The data has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    println!(
        "Encoded data: {}B. Size left: {}B",
        data.len(),
        capacity_bytes(width, height, &config).saturating_sub(data.len() as u64)
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、解析头部并恢复数据，
/// 最后将恢复的内容写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像文件。
/// * 图像头部不合法或声明的长度超出图像容量。
/// * 无法写入到目标文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let dest = args.data.unwrap_or_else(|| {
        default_output(&args.image, RECOVERED_PREFIX, DEFAULT_DATA_EXTENSION)
    });
    ensure_writable(&dest, args.force)?;

    let carrier = Carrier::open(&args.image)?;

    let data = carrier.decode().with_context(|| {
        format!(
            "Failed to recover data from '{}'. \nThe image may not contain hidden data or is corrupted.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    fs::write(&dest, &data).with_context(|| {
        format!(
            "Unable to write to target data file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "{} bytes have been successfully recovered and saved: {}",
        data.len(),
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑：报告图像在给定配置下可隐藏的字节数。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let config = ChannelConfig::try_from(args.channels)
        .context("Invalid channel configuration")?;
    let carrier = Carrier::open(&args.image)?;
    let (width, height) = carrier.dimensions();

    println!(
        "Bytes available to save in {} ({width}x{height}, {config}): {} ({} bits)",
        args.image.to_string_lossy().green().bold(),
        capacity_bytes(width, height, &config).to_string().green().bold(),
        capacity_bits(width, height, &config)
    );
    Ok(())
}

/// 根据编码失败的具体原因生成面向用户的错误说明。
fn hide_failure_context(
    err: &StegoError,
    image: &Path,
    data_len: usize,
    available: u64,
    config: &ChannelConfig,
) -> String {
    match err {
        StegoError::DataOverflow { .. } => format!(
            "Not enough space in the image to hide the data. \nRequired: {} bytes, Available: {} bytes ({})",
            data_len.to_string().red().bold(),
            available.to_string().green().bold(),
            config
        ),
        StegoError::LengthNotRepresentable { max, .. } => format!(
            "The data length {} cannot be recorded in the header of an image without alpha channel (max {}). \nUse a cover image with an alpha channel.",
            data_len.to_string().red().bold(),
            max.to_string().green().bold()
        ),
        StegoError::ImageTooSmall { width, height } => format!(
            "The image {} ({width}x{height}) is too small to hold the header.",
            image.to_string_lossy().red().bold()
        ),
        _ => format!(
            "Failed to hide the data in {}.",
            image.to_string_lossy().red().bold()
        ),
    }
}

/// 在输入文件旁生成默认输出路径：`<前缀><文件名主干>.<扩展名>`。
fn default_output(input: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    input.with_file_name(format!("{prefix}{stem}.{extension}"))
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}
