//! # 编码流程模块
//!
//! 把尺寸选择、头部构建和像素写入串联成一次完整的编码：
//! 先按布局补齐数据并计算尺寸，再写出头部和所有像素行。
//! 所有校验都在写出第一个字节之前完成。

use crate::constants::{BMP_HEADER_SIZE, BYTES_PER_PIXEL};
use crate::dimensions::{DimensionStrategy, Dimensions, LayoutMode, select_dimensions};
use crate::error::EncodeError;
use crate::header::Header;
use crate::pixels::{ChannelOrder, write_pixels_ordered};
use std::io::Write;

/// 一次编码的全部选项。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub layout: LayoutMode,
    pub strategy: DimensionStrategy,
    pub order: ChannelOrder,
    pub top_down: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            layout: LayoutMode::FIXED,
            strategy: DimensionStrategy::default(),
            order: ChannelOrder::default(),
            top_down: false,
        }
    }
}

impl EncodeOptions {
    pub fn squarify() -> Self {
        Self {
            layout: LayoutMode::Squarify,
            ..Self::default()
        }
    }
}

/// 编码计划：补齐后的像素数据、选定的尺寸和头部。
#[derive(Debug, Clone)]
pub struct BitmapPlan {
    pub dimensions: Dimensions,
    pub header: Header,
    /// 恰好 `width * height * 3` 字节。
    pub pixels: Vec<u8>,
    pub order: ChannelOrder,
}

impl BitmapPlan {
    /// 写出后文件的总字节数 (头部加带填充的像素行)。
    pub fn file_len(&self) -> usize {
        let Dimensions { width, height } = self.dimensions;
        let stride = width * BYTES_PER_PIXEL + crate::pixels::row_padding(width);
        BMP_HEADER_SIZE + stride * height
    }

    /// 把头部和所有像素行写入 `sink`，返回写出的字节数。
    ///
    /// # Errors
    ///
    /// * 写出失败时返回 [`EncodeError::Io`]。
    /// * 写出的行数与头部声明的高度不符时返回 [`EncodeError::RowCountMismatch`]。
    pub fn write_to<W: Write>(&self, mut sink: W) -> Result<usize, EncodeError> {
        sink.write_all(&self.header.to_bytes())?;
        let rows =
            write_pixels_ordered(&self.pixels, self.dimensions.width, self.order, &mut sink)?;
        if rows != self.dimensions.height {
            return Err(EncodeError::RowCountMismatch {
                expected: self.dimensions.height,
                actual: rows,
            });
        }
        sink.flush()?;
        Ok(self.file_len())
    }
}

/// 按布局要求补零。
///
/// 固定布局下，数据补齐到像素总数是步长的整数倍 (步长为 4 时即长度为 12 的倍数)；
/// 其他布局原样返回。
pub fn prepare_data(bytes: &[u8], layout: LayoutMode) -> Vec<u8> {
    let mut data = bytes.to_vec();
    if let LayoutMode::FixedStep(step) = layout {
        let block = step.max(1) * BYTES_PER_PIXEL;
        let remainder = data.len() % block;
        if remainder != 0 {
            data.resize(data.len() + block - remainder, 0);
        }
    }
    data
}

/// 计算编码计划，不写出任何数据。
///
/// # Errors
///
/// 尺寸选择失败或尺寸、数据长度超出头部字段限制时返回错误。
pub fn plan_encoding(
    bytes: &[u8],
    options: &EncodeOptions,
) -> Result<BitmapPlan, EncodeError> {
    let mut pixels = prepare_data(bytes, options.layout);
    let data_len = pixels.len();
    let pixel_count = data_len.div_ceil(BYTES_PER_PIXEL);

    let dimensions = if pixel_count == 0 {
        Dimensions::EMPTY
    } else {
        select_dimensions(pixel_count, options.layout, options.strategy)?
    };

    let header =
        Header::new(dimensions.width, dimensions.height, data_len)?.top_down(options.top_down);

    // 补齐到完整的 width * height 像素，最后一行总是整行
    pixels.resize(dimensions.pixel_count() * BYTES_PER_PIXEL, 0);

    Ok(BitmapPlan {
        dimensions,
        header,
        pixels,
        order: options.order,
    })
}

/// 编码 `bytes` 并写入 `sink`：先写头部，再逐行写出像素。
///
/// 计划阶段出错时 `sink` 中不会写入任何字节。
pub fn encode_to<W: Write>(
    bytes: &[u8],
    options: &EncodeOptions,
    sink: W,
) -> Result<BitmapPlan, EncodeError> {
    let plan = plan_encoding(bytes, options)?;
    plan.write_to(sink)?;
    Ok(plan)
}

/// 编码到内存中的字节序列。
pub fn encode(bytes: &[u8], options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    encode_to(bytes, options, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_layout_pads_to_whole_pixel_groups() {
        assert_eq!(prepare_data(b"AB", LayoutMode::FIXED).len(), 12);
        assert_eq!(prepare_data(&[1; 12], LayoutMode::FIXED).len(), 12);
        assert_eq!(prepare_data(&[1; 13], LayoutMode::FIXED).len(), 24);
        assert!(prepare_data(&[], LayoutMode::FIXED).is_empty());
        assert_eq!(prepare_data(&[1; 5], LayoutMode::Squarify).len(), 5);
    }

    #[test]
    fn two_bytes_fixed_layout_is_four_by_one() {
        let plan = plan_encoding(b"AB", &EncodeOptions::default()).unwrap();
        assert_eq!(plan.dimensions, Dimensions::new(4, 1));
        assert_eq!(&plan.pixels[..2], b"AB");
        assert!(plan.pixels[2..].iter().all(|&b| b == 0));

        let out = encode(b"AB", &EncodeOptions::default()).unwrap();
        assert_eq!(out.len(), 54 + 12);
        assert_eq!(u32::from_le_bytes(out[2..6].try_into().unwrap()), 12);
    }

    #[test]
    fn twelve_bytes_squarified_is_four_by_one() {
        let plan = plan_encoding(&[9; 12], &EncodeOptions::squarify()).unwrap();
        assert_eq!(plan.dimensions, Dimensions::new(4, 1));
    }

    #[test]
    fn squarify_pads_the_last_pixel() {
        let data = [1, 2, 3, 4];
        let plan = plan_encoding(&data, &EncodeOptions::squarify()).unwrap();
        assert_eq!(plan.dimensions, Dimensions::new(2, 1));
        assert_eq!(plan.pixels, [1, 2, 3, 4, 0, 0]);

        let out = encode(&data, &EncodeOptions::squarify()).unwrap();
        // 头部中的数据长度是源数据长度
        assert_eq!(u32::from_le_bytes(out[2..6].try_into().unwrap()), 4);
        assert_eq!(&out[54..], &[1, 2, 3, 4, 0, 0, 0, 0]);
    }

    #[test]
    fn closest_strategy_produces_multiple_rows() {
        let options = EncodeOptions {
            strategy: DimensionStrategy::ClosestToSquare,
            ..EncodeOptions::squarify()
        };
        let data: Vec<u8> = (0..15).collect();
        let out = encode(&data, &options).unwrap();

        // 5 个像素只有 (5,1) 和 (1,5)，取较宽者
        assert_eq!(u32::from_le_bytes(out[18..22].try_into().unwrap()), 5);

        let data: Vec<u8> = (0..18).collect();
        let plan = plan_encoding(&data, &options).unwrap();
        assert_eq!(plan.dimensions, Dimensions::new(3, 2));
        let out = encode(&data, &options).unwrap();
        // 每行 9 字节加 3 字节填充
        assert_eq!(out.len(), 54 + 2 * 12);
        assert_eq!(&out[54..63], &data[..9]);
        assert_eq!(&out[63..66], &[0, 0, 0]);
        assert_eq!(&out[66..75], &data[9..]);
        assert_eq!(out.len(), plan.file_len());
    }

    #[test]
    fn empty_input_writes_only_the_header() {
        for options in [EncodeOptions::default(), EncodeOptions::squarify()] {
            let out = encode(&[], &options).unwrap();
            assert_eq!(out.len(), BMP_HEADER_SIZE);
            assert_eq!(&out[0..2], b"BM");
            assert_eq!(u32::from_le_bytes(out[2..6].try_into().unwrap()), 0);
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        let data: Vec<u8> = (0..=255).cycle().take(1000).collect();
        for options in [EncodeOptions::default(), EncodeOptions::squarify()] {
            assert_eq!(
                encode(&data, &options).unwrap(),
                encode(&data, &options).unwrap()
            );
        }
    }

    #[test]
    fn row_length_is_always_aligned() {
        let options = EncodeOptions {
            strategy: DimensionStrategy::ClosestToSquare,
            ..EncodeOptions::squarify()
        };
        for len in 1..120 {
            let data = vec![0xAB; len];
            let plan = plan_encoding(&data, &options).unwrap();
            let out = encode(&data, &options).unwrap();
            let pixel_bytes = out.len() - BMP_HEADER_SIZE;
            assert_eq!(pixel_bytes % plan.dimensions.height, 0);
            assert_eq!((pixel_bytes / plan.dimensions.height) % 4, 0);
            assert_eq!(plan.dimensions.pixel_count(), len.div_ceil(3));
        }
    }

    #[test]
    fn nothing_is_written_when_planning_fails() {
        let options = EncodeOptions {
            layout: LayoutMode::FixedStep(0),
            ..EncodeOptions::default()
        };
        let mut out = Vec::new();
        let err = encode_to(&[1, 2, 3, 4, 5, 6], &options, &mut out).unwrap_err();
        assert!(matches!(err, EncodeError::NoValidDimensions { .. }));
        assert!(out.is_empty());
    }
}
