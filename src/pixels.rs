//! # 像素缓冲区模块
//!
//! 隐写核心只依赖 [`PixelBuffer`] 这一抽象能力：按坐标读写 R、G、B 三个 8 位通道。
//! 具体的图像类型 (`image::RgbImage`、`image::RgbaImage`) 在此实现该能力。

use image::{ImageBuffer, Rgb, RgbImage, Rgba, RgbaImage};

/// 按坐标读写 RGB 像素的缓冲区，坐标按行优先排列。
pub trait PixelBuffer {
    /// 长度像素能够记录的最大数据长度 (字节)。
    const MAX_DECLARED_LENGTH: usize;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// 读取 `(x, y)` 处像素的 `[R, G, B]`。
    fn read_rgb(&self, x: u32, y: u32) -> [u8; 3];

    /// 写入 `(x, y)` 处像素的 `[R, G, B]`，其余通道 (如 alpha) 保持不变。
    fn write_rgb(&mut self, x: u32, y: u32, rgb: [u8; 3]);

    /// 以 32 位 ARGB 整数读取像素。没有 alpha 通道时最高字节为 0。
    fn read_argb(&self, x: u32, y: u32) -> u32 {
        let [r, g, b] = self.read_rgb(x, y);
        u32::from_be_bytes([0, r, g, b])
    }

    /// 以 32 位 ARGB 整数写入像素。没有 alpha 通道时最高字节被丢弃。
    fn write_argb(&mut self, x: u32, y: u32, argb: u32) {
        let [_, r, g, b] = argb.to_be_bytes();
        self.write_rgb(x, y, [r, g, b]);
    }

    fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// 行优先遍历序号对应的坐标：`(index mod width, index div width)`。
    fn position(&self, index: usize) -> (u32, u32) {
        let width = self.width() as usize;
        ((index % width) as u32, (index / width) as u32)
    }
}

impl PixelBuffer for RgbImage {
    // 24 位：长度的最高字节无处存放。
    const MAX_DECLARED_LENGTH: usize = (1 << 24) - 1;

    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn read_rgb(&self, x: u32, y: u32) -> [u8; 3] {
        self.get_pixel(x, y).0
    }

    fn write_rgb(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        self.put_pixel(x, y, Rgb(rgb));
    }
}

impl PixelBuffer for RgbaImage {
    const MAX_DECLARED_LENGTH: usize = i32::MAX as usize;

    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn read_rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let [r, g, b, _] = self.get_pixel(x, y).0;
        [r, g, b]
    }

    fn write_rgb(&mut self, x: u32, y: u32, [r, g, b]: [u8; 3]) {
        let alpha = self.get_pixel(x, y).0[3];
        self.put_pixel(x, y, Rgba([r, g, b, alpha]));
    }

    fn read_argb(&self, x: u32, y: u32) -> u32 {
        let [r, g, b, a] = self.get_pixel(x, y).0;
        u32::from_be_bytes([a, r, g, b])
    }

    fn write_argb(&mut self, x: u32, y: u32, argb: u32) {
        let [a, r, g, b] = argb.to_be_bytes();
        self.put_pixel(x, y, Rgba([r, g, b, a]));
    }
}
