use bitmap_stego::{
    ChannelConfig, PixelBuffer, StegoError, capacity_bits, capacity_bytes, decode, encode, probe,
};
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// 一个辅助函数，用固定种子生成随机像素的 RGB 图像，头部像素保证不是合法配置
fn random_cover(width: u32, height: u32, seed: u64) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut raw = vec![0u8; (width * height * 3) as usize];
    rng.fill_bytes(&mut raw);

    let mut img = RgbImage::from_raw(width, height, raw).expect("buffer size matches");
    img.put_pixel(0, 0, Rgb([200, 17, 90]));
    img
}

/// 用固定种子生成随机字节序列
fn random_bytes(length: usize, seed: u64) -> Vec<u8> {
    let mut bytes = vec![0u8; length];
    StdRng::seed_from_u64(seed).fill_bytes(&mut bytes);
    bytes
}

/// 10x10 图像，R3G4B2 配置，50 字节随机数据完整往返
#[test]
fn test_round_trip_10x10_r3g4b2() {
    let cover = random_cover(10, 10, 1);
    let config = ChannelConfig::new(3, 4, 2).unwrap();
    let payload = random_bytes(50, 7);

    let encoded = encode(&cover, &config, &payload).unwrap();
    assert_eq!(encoded.dimensions(), cover.dimensions());

    let decoded = decode(&encoded).unwrap();
    assert_eq!(decoded, payload);
}

/// 与原有测试序列相同的长度，覆盖空数据、单字节和接近容量上限的情况
#[test]
fn test_round_trip_various_lengths() {
    let cover = random_cover(64, 48, 2);
    let configs = [
        ChannelConfig::new(3, 4, 2).unwrap(),
        ChannelConfig::new(2, 2, 1).unwrap(),
        ChannelConfig::new(8, 8, 8).unwrap(),
        ChannelConfig::new(0, 0, 1).unwrap(),
    ];

    for config in configs {
        let capacity = capacity_bytes(64, 48, &config) as usize;
        let sequences = [
            Vec::new(),
            vec![200],
            vec![200, 120],
            vec![200, 120, 123],
            random_bytes(50.min(capacity), 7),
            random_bytes(capacity, 10),
        ];

        for payload in sequences {
            let encoded = encode(&cover, &config, &payload).unwrap();
            let decoded = decode(&encoded).unwrap();
            assert_eq!(decoded, payload, "{config} with {} bytes", payload.len());
        }
    }
}

/// 空数据在任何合法配置下 (包括每像素 0 位) 都还原为空序列
#[test]
fn test_empty_payload_round_trip() {
    let cover = random_cover(4, 4, 3);
    for raw in [[0, 0, 0], [1, 0, 0], [8, 8, 8]] {
        let config = ChannelConfig::try_from(raw).unwrap();
        let encoded = encode(&cover, &config, &[]).unwrap();
        assert_eq!(decode(&encoded).unwrap(), Vec::<u8>::new());
    }
}

/// R1G1B1：98 个可用像素恰好能存 36 字节，37 字节溢出
#[test]
fn test_overflow_boundary() {
    let cover = random_cover(10, 10, 4);
    let config = ChannelConfig::new(1, 1, 1).unwrap();
    assert_eq!(capacity_bits(10, 10, &config), 294);
    assert_eq!(capacity_bytes(10, 10, &config), 36);

    let fits = random_bytes(36, 5);
    let encoded = encode(&cover, &config, &fits).unwrap();
    assert_eq!(decode(&encoded).unwrap(), fits);

    let err = encode(&cover, &config, &random_bytes(37, 5)).unwrap_err();
    assert_eq!(
        err,
        StegoError::DataOverflow {
            required_bits: 296,
            available_bits: 294
        }
    );
    assert!(err.to_string().to_lowercase().contains("data overflow"));
}

/// 每像素 0 位时任何非空数据都会溢出
#[test]
fn test_zero_bits_per_pixel_overflows() {
    let cover = random_cover(10, 10, 6);
    let config = ChannelConfig::new(0, 0, 0).unwrap();

    let err = encode(&cover, &config, b"x").unwrap_err();
    assert!(matches!(err, StegoError::DataOverflow { .. }));
}

/// 头部格式：像素 (0,0) 存放原始位数，像素 (1,0) 存放长度
#[test]
fn test_header_layout() {
    let cover = random_cover(10, 10, 8);
    let config = ChannelConfig::new(3, 4, 2).unwrap();

    let encoded = encode(&cover, &config, &random_bytes(50, 7)).unwrap();

    assert_eq!(encoded.get_pixel(0, 0).0, [3, 4, 2]);
    assert_eq!(encoded.get_pixel(1, 0).0, [0, 0, 50]);
}

/// 数据位的写入顺序：高位在前，依次填充 R、G、B 的低位，末尾不足部分补 0
#[test]
fn test_payload_bit_packing() {
    let cover = RgbImage::from_pixel(4, 1, Rgb([0xFF, 0xFF, 0xFF]));
    let config = ChannelConfig::new(3, 4, 2).unwrap();

    let encoded = encode(&cover, &config, &[0b1011_0110]).unwrap();

    // R <- 101, G <- 1011, B <- 0 + 补位 0
    assert_eq!(encoded.get_pixel(2, 0).0, [0xFD, 0xFB, 0xFC]);
    assert_eq!(encoded.get_pixel(3, 0).0, [0xFF, 0xFF, 0xFF]);
}

/// 数据区之外的像素与原图逐位相同，原图本身不被修改
#[test]
fn test_untouched_pixels_preserved() {
    let cover = random_cover(10, 10, 9);
    let snapshot = cover.clone();
    let config = ChannelConfig::new(3, 4, 2).unwrap();

    let encoded = encode(&cover, &config, &random_bytes(50, 7)).unwrap();
    assert_eq!(cover, snapshot);

    // 400 bits / 9 bits = 45 个数据像素 (索引 2..47)
    for index in 47..100 {
        let (x, y) = cover.position(index);
        assert_eq!(encoded.get_pixel(x, y), cover.get_pixel(x, y), "pixel {index}");
    }

    // 数据像素只改变了低位
    for index in 2..47 {
        let (x, y) = cover.position(index);
        let before = cover.get_pixel(x, y).0;
        let after = encoded.get_pixel(x, y).0;
        assert_eq!(before[0] & 0xF8, after[0] & 0xF8);
        assert_eq!(before[1] & 0xF0, after[1] & 0xF0);
        assert_eq!(before[2] & 0xFC, after[2] & 0xFC);
    }
}

/// 未经隐写的图像头部不合法时解码失败，错误信息包含 "input"
#[test]
fn test_decode_foreign_image_fails() {
    let cover = random_cover(10, 10, 11);

    let err = decode(&cover).unwrap_err();
    assert_eq!(
        err,
        StegoError::MalformedHeader {
            red: 200,
            green: 17,
            blue: 90
        }
    );
    assert!(err.to_string().contains("input"));
    assert!(!probe(&cover));
}

/// 头部声明的长度超过图像像素数时返回容量错误，而不是越界访问
#[test]
fn test_decode_declared_length_exceeds_image() {
    let mut img = random_cover(10, 10, 12);
    img.put_pixel(0, 0, Rgb([1, 1, 1]));
    img.put_pixel(1, 0, Rgb([0, 0x03, 0xE8]));

    let err = decode(&img).unwrap_err();
    assert_eq!(
        err,
        StegoError::InsufficientPixels {
            required: 2667,
            available: 98
        }
    );
}

/// 配置为每像素 0 位但声明了数据时返回错误
#[test]
fn test_decode_zero_bits_with_length() {
    let mut img = random_cover(10, 10, 13);
    img.put_pixel(0, 0, Rgb([0, 0, 0]));
    img.put_pixel(1, 0, Rgb([0, 0, 5]));

    assert_eq!(
        decode(&img).unwrap_err(),
        StegoError::NoPayloadChannels { length: 5 }
    );
}

/// 宽度为 1 时头部的第二个像素位于 (0,1)
#[test]
fn test_single_column_image() {
    let cover = RgbImage::from_pixel(1, 6, Rgb([10, 20, 30]));
    let config = ChannelConfig::new(8, 8, 8).unwrap();
    let payload = b"twelve bytes".to_vec();

    let encoded = encode(&cover, &config, &payload).unwrap();
    assert_eq!(encoded.get_pixel(0, 1).0, [0, 0, 12]);
    assert_eq!(decode(&encoded).unwrap(), payload);
}

/// 少于两个像素的图像放不下头部
#[test]
fn test_image_too_small() {
    let cover = RgbImage::new(1, 1);
    let config = ChannelConfig::new(1, 1, 1).unwrap();

    assert_eq!(
        encode(&cover, &config, &[]).unwrap_err(),
        StegoError::ImageTooSmall {
            width: 1,
            height: 1
        }
    );
    assert!(matches!(
        decode(&cover),
        Err(StegoError::ImageTooSmall { .. })
    ));
}

/// RGBA 图像：长度的最高字节写入 alpha，其余像素的 alpha 保持不变
#[test]
fn test_rgba_round_trip_keeps_alpha() {
    let cover = RgbaImage::from_fn(12, 12, |x, y| {
        Rgba([(x * 20) as u8, (y * 20) as u8, 77, 255 - x as u8])
    });
    let config = ChannelConfig::new(2, 2, 2).unwrap();
    let payload = random_bytes(30, 14);

    let encoded = encode(&cover, &config, &payload).unwrap();
    assert_eq!(encoded.get_pixel(1, 0).0, [0, 0, 30, 0]);
    assert_eq!(encoded.read_argb(1, 0), 30);
    for index in 2..144 {
        let (x, y) = cover.position(index);
        assert_eq!(encoded.get_pixel(x, y)[3], cover.get_pixel(x, y)[3]);
    }

    assert_eq!(decode(&encoded).unwrap(), payload);
}

/// alpha 最高位被置位的长度像素被视为负数长度，属于头部格式错误
#[test]
fn test_rgba_negative_length() {
    let mut img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
    img.put_pixel(0, 0, Rgba([1, 1, 1, 255]));
    img.put_pixel(1, 0, Rgba([0, 0, 1, 0x80]));

    let err = decode(&img).unwrap_err();
    assert!(matches!(err, StegoError::NegativeLength(n) if n < 0));
    assert!(err.to_string().contains("input"));
}

/// 只有极短长度字段的缓冲区，用于验证长度无法写入头部时的溢出错误
#[derive(Clone, Debug)]
struct NarrowHeader(RgbImage);

impl PixelBuffer for NarrowHeader {
    const MAX_DECLARED_LENGTH: usize = 3;

    fn width(&self) -> u32 {
        self.0.width()
    }

    fn height(&self) -> u32 {
        self.0.height()
    }

    fn read_rgb(&self, x: u32, y: u32) -> [u8; 3] {
        self.0.get_pixel(x, y).0
    }

    fn write_rgb(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        self.0.put_pixel(x, y, Rgb(rgb));
    }
}

#[test]
fn test_length_not_representable() {
    let cover = NarrowHeader(random_cover(10, 10, 15));
    let config = ChannelConfig::new(8, 8, 8).unwrap();

    let encoded = encode(&cover, &config, b"abc").unwrap();
    assert_eq!(decode(&encoded).unwrap(), b"abc");

    let err = encode(&cover, &config, b"abcd").unwrap_err();
    assert_eq!(
        err,
        StegoError::LengthNotRepresentable { length: 4, max: 3 }
    );
    assert!(err.to_string().to_lowercase().contains("data overflow"));
}

/// 已隐写的图像能被识别出来
#[test]
fn test_probe_detects_encoded_image() {
    let cover = random_cover(10, 10, 16);
    let config = ChannelConfig::new(1, 2, 3).unwrap();

    let encoded = encode(&cover, &config, b"hello").unwrap();
    assert!(probe(&encoded));
}
