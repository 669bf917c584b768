//! # 命令行接口模块
//!
//! 使用 `clap` 定义程序的命令行参数。
//! 既未提供 `--text` 也未提供 `--file` 时，程序会进入交互式提问。

use crate::constants::DEFAULT_OUTPUT_NAME;
use clap::{Args, Parser};
use std::path::PathBuf;

/// 把任意字节 (输入的文本或文件内容) 转换为 24 位 BMP 图像，每 3 个字节对应一个像素。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "把任意字节 (输入的文本或文件内容) 转换为 24 位 BMP 图像，每 3 个字节对应一个像素。"
)]
pub struct Cli {
    #[command(flatten)]
    pub args: EncodeArgs,
}

/// 编码所需的参数。
#[derive(Args, Debug, Clone)]
pub struct EncodeArgs {
    /// 要转换的文本。
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// 要转换的文件路径，读取其全部字节。
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// 输出文件名，`.bmp` 扩展名可省略。
    #[arg(short, long, default_value = DEFAULT_OUTPUT_NAME)]
    pub output: PathBuf,

    /// 尽量接近正方形布局，而不是宽度为 4 的倍数的固定布局。
    #[arg(short, long)]
    pub squarify: bool,

    /// 选择宽高差最小的尺寸，而不是扫描到的最后一个。
    #[arg(long)]
    pub closest: bool,

    /// 第一行像素显示在图像顶部。
    #[arg(long)]
    pub top_down: bool,

    /// 按 B,G,R 顺序存储每个三元组，使看图软件把输入字节显示为 R,G,B。
    #[arg(long)]
    pub rgb: bool,

    /// 输出文件已存在时覆盖它。
    #[arg(long)]
    pub force: bool,

    /// 写入完成后用图像解码器重新读取结果进行校验。
    #[arg(long)]
    pub verify: bool,
}

impl Default for EncodeArgs {
    fn default() -> Self {
        Self {
            text: None,
            file: None,
            output: PathBuf::from(DEFAULT_OUTPUT_NAME),
            squarify: false,
            closest: false,
            top_down: false,
            rgb: false,
            force: false,
            verify: false,
        }
    }
}
