/// 头部占用的像素数量。
/// 像素 0 存放三个通道的位数配置，像素 1 存放 32 位的数据长度。
pub const HEADER_PIXELS: usize = 2;

/// 单个颜色通道最多可用于隐写的位数。
pub const MAX_CHANNEL_BITS: u8 = 8;

/// 命令行默认的 R / G / B 通道位数 (每像素 9 bits)。
pub const DEFAULT_RED_BITS: i32 = 3;
pub const DEFAULT_GREEN_BITS: i32 = 4;
pub const DEFAULT_BLUE_BITS: i32 = 2;

/// 未指定输出路径时，隐写结果图像的文件名前缀。
pub const DOCTORED_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复数据文件的文件名前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";

/// 隐写结果图像的默认扩展名 (无损格式)。
pub const DEFAULT_IMAGE_EXTENSION: &str = "png";

/// 恢复数据文件的默认扩展名。
pub const DEFAULT_DATA_EXTENSION: &str = "bin";
