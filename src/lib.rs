//! # data2bmp 库
//!
//! 本库包含把任意字节编码为 24 位 BMP 图像的核心逻辑，以及命令行外壳。

// 声明库包含的所有模块。

pub mod bitmap;
pub mod cli;
pub mod constants;
pub mod dimensions;
pub mod error;
pub mod handler;
pub mod header;
pub mod pixels;
pub mod prompt;
