//! # 错误类型模块
//!
//! 编码核心 (尺寸选择、头部构建、像素写入) 使用的错误类型。
//! 命令行层使用 `anyhow` 为这些错误附加上下文。

use std::io;

/// 编码过程中可能出现的错误。所有错误都会中止整个编码。
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("image dimensions {width}x{height} exceed the 268435455 pixel limit")]
    SizeLimitExceeded { width: usize, height: usize },

    #[error("{0} bytes of data do not fit in a 32-bit size field")]
    DataTooLarge(usize),

    #[error("no width in steps of {step} evenly divides {pixel_count} pixels")]
    NoValidDimensions { pixel_count: usize, step: usize },

    #[error("wrote {actual} pixel rows but the header declares {expected}")]
    RowCountMismatch { expected: usize, actual: usize },

    #[error("failed to write bitmap data")]
    Io(#[from] io::Error),
}
