//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::config::ChannelConfig;
use crate::constants::{DEFAULT_BLUE_BITS, DEFAULT_GREEN_BITS, DEFAULT_RED_BITS};
use crate::error::StegoError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// 一款可配置位数的 LSB 隐写命令行工具，将任意文件的字节隐藏在无损图像 (如 PNG, BMP) 的颜色通道低位中。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款可配置位数的 LSB 隐写命令行工具，将任意文件的字节隐藏在无损图像 (如 PNG, BMP) 的颜色通道低位中。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (容量)。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 将文件内容隐藏到无损格式图像中。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的数据。
    Recover(RecoverArgs),

    /// 显示图像在给定通道配置下可隐藏的字节数。
    Capacity(CapacityArgs),
}

/// 每个颜色通道用于隐写的位数 (0..=8)。
#[derive(Args, Debug, Clone, Copy)]
pub struct ChannelArgs {
    /// 红色通道使用的低位数。
    #[arg(long, default_value_t = DEFAULT_RED_BITS, allow_negative_numbers = true)]
    pub red: i32,

    /// 绿色通道使用的低位数。
    #[arg(long, default_value_t = DEFAULT_GREEN_BITS, allow_negative_numbers = true)]
    pub green: i32,

    /// 蓝色通道使用的低位数。
    #[arg(long, default_value_t = DEFAULT_BLUE_BITS, allow_negative_numbers = true)]
    pub blue: i32,
}

impl Default for ChannelArgs {
    fn default() -> Self {
        Self {
            red: DEFAULT_RED_BITS,
            green: DEFAULT_GREEN_BITS,
            blue: DEFAULT_BLUE_BITS,
        }
    }
}

impl TryFrom<ChannelArgs> for ChannelConfig {
    type Error = StegoError;

    fn try_from(args: ChannelArgs) -> Result<Self, Self::Error> {
        ChannelConfig::try_from([args.red, args.green, args.blue])
    }
}

/// 'hide' 命令所需的参数。
#[derive(Args, Debug)]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的数据文件路径 (任意字节)。
    #[arg(short, long)]
    pub data: PathBuf,

    /// 保存结果图像的输出路径，默认为输入图像旁的 `doctored_<名称>.png`。
    #[arg(short = 'o', long = "output")]
    pub dest: Option<PathBuf>,

    #[command(flatten)]
    pub channels: ChannelArgs,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// 已隐藏数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 保存恢复数据的输出路径，默认为图像旁的 `recovered_<名称>.bin`。
    #[arg(short = 'o', long = "output")]
    pub data: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'capacity' 命令所需的参数。
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// 要检查的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    #[command(flatten)]
    pub channels: ChannelArgs,
}
