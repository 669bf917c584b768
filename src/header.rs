//! # 头部构建模块
//!
//! 生成固定 54 字节的 BMP 文件头和信息头。所有多字节整数字段均为标准小端序。

use crate::constants::{
    BITS_PER_PIXEL, BMP_HEADER_SIZE, INFO_HEADER_SIZE, MAX_DIMENSION, OFFSET_BITS_PER_PIXEL,
    OFFSET_DATA_OFFSET, OFFSET_FILE_SIZE, OFFSET_HEIGHT, OFFSET_HORIZONTAL_RESOLUTION,
    OFFSET_INFO_HEADER_SIZE, OFFSET_PLANES, OFFSET_RAW_DATA_SIZE, OFFSET_VERTICAL_RESOLUTION,
    OFFSET_WIDTH, PLANES, RAW_DATA_SIZE, RESOLUTION,
};
use crate::error::EncodeError;

/// 经过校验的 BMP 头部。创建后不可修改，只能序列化。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    width: u32,
    height: u32,
    data_len: u32,
    top_down: bool,
}

impl Header {
    /// 校验宽度、高度和数据长度并创建头部。
    ///
    /// # Errors
    ///
    /// * 宽度或高度超过 268,435,455 时返回 [`EncodeError::SizeLimitExceeded`]。
    /// * 数据长度无法放入 32 位字段时返回 [`EncodeError::DataTooLarge`]。
    pub fn new(width: usize, height: usize, data_len: usize) -> Result<Self, EncodeError> {
        let limit = MAX_DIMENSION as usize;
        if width > limit || height > limit {
            return Err(EncodeError::SizeLimitExceeded { width, height });
        }
        let data_len = u32::try_from(data_len).map_err(|_| EncodeError::DataTooLarge(data_len))?;

        Ok(Self {
            width: width as u32,
            height: height as u32,
            data_len,
            top_down: false,
        })
    }

    /// 为 `true` 时高度字段写为负数，第一行像素显示在图像顶部。
    pub fn top_down(mut self, top_down: bool) -> Self {
        self.top_down = top_down;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn to_bytes(&self) -> [u8; BMP_HEADER_SIZE] {
        let mut header = [0u8; BMP_HEADER_SIZE];

        let mut put = |offset: usize, bytes: &[u8]| {
            header[offset..offset + bytes.len()].copy_from_slice(bytes);
        };

        // 高度不超过 2^28 - 1，取负不会溢出
        let height = if self.top_down {
            -(self.height as i32)
        } else {
            self.height as i32
        };

        put(0, b"BM");
        put(OFFSET_FILE_SIZE, &self.data_len.to_le_bytes());
        put(OFFSET_DATA_OFFSET, &(BMP_HEADER_SIZE as u32).to_le_bytes());
        put(OFFSET_INFO_HEADER_SIZE, &INFO_HEADER_SIZE.to_le_bytes());
        put(OFFSET_WIDTH, &self.width.to_le_bytes());
        put(OFFSET_HEIGHT, &height.to_le_bytes());
        put(OFFSET_PLANES, &PLANES.to_le_bytes());
        put(OFFSET_BITS_PER_PIXEL, &BITS_PER_PIXEL.to_le_bytes());
        // 压缩方式 (偏移 30) 保持为 0
        put(OFFSET_RAW_DATA_SIZE, &RAW_DATA_SIZE.to_le_bytes());
        put(OFFSET_HORIZONTAL_RESOLUTION, &RESOLUTION);
        put(OFFSET_VERTICAL_RESOLUTION, &RESOLUTION);

        header
    }
}

/// 根据宽度、高度和数据长度直接生成 54 字节头部。
pub fn build_header(
    width: usize,
    height: usize,
    data_len: usize,
) -> Result<[u8; BMP_HEADER_SIZE], EncodeError> {
    Ok(Header::new(width, height, data_len)?.to_bytes())
}
