//! # 命令处理逻辑模块
//!
//! 负责确定输入来源、读取数据、调用编码核心，并把结果写入 `.bmp` 文件。
//! 输出文件由一个作用域守卫持有，编码失败时会被删除，不会留下不完整的图像。

use crate::bitmap::{EncodeOptions, plan_encoding};
use crate::cli::EncodeArgs;
use crate::constants::BMP_EXTENSION;
use crate::dimensions::{DimensionStrategy, LayoutMode};
use crate::pixels::ChannelOrder;
use crate::prompt::{Source, prompt_source};
use anyhow::{Context, Result};
use colored::Colorize;
use std::ffi::OsString;
use std::fs;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// 由输出文件名得到输出路径：去掉一个结尾的 `.bmp` 后再统一加上。
pub fn output_path(name: &Path) -> PathBuf {
    let base: OsString = name
        .to_str()
        .and_then(|s| s.strip_suffix(BMP_EXTENSION))
        .map(OsString::from)
        .unwrap_or_else(|| name.as_os_str().to_owned());

    let mut path = base;
    path.push(BMP_EXTENSION);
    PathBuf::from(path)
}

impl EncodeArgs {
    /// 命令行中指定的输入来源，未指定时为 `None`。
    pub fn source(&self) -> Option<Source> {
        match (&self.text, &self.file) {
            (Some(text), _) => Some(Source::Text(text.clone())),
            (None, Some(file)) => Some(Source::File(file.clone())),
            (None, None) => None,
        }
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            layout: if self.squarify {
                LayoutMode::Squarify
            } else {
                LayoutMode::FIXED
            },
            strategy: if self.closest {
                DimensionStrategy::ClosestToSquare
            } else {
                DimensionStrategy::LastDivisor
            },
            order: if self.rgb {
                ChannelOrder::Rgb
            } else {
                ChannelOrder::AsIs
            },
            top_down: self.top_down,
        }
    }
}

/// 读取来源中的全部字节。
pub fn read_source(source: &Source) -> Result<Vec<u8>> {
    match source {
        Source::Text(text) => Ok(text.as_bytes().to_vec()),
        Source::File(path) => fs::read(path).with_context(|| {
            format!(
                "Unable to read input file: {}",
                path.to_string_lossy().red().bold()
            )
        }),
    }
}

/// 尚未完成的输出文件。
///
/// 数据先写入目标目录中的临时文件，[`PendingOutput::commit`] 时才重命名为目标路径。
/// 未提交就销毁时临时文件被删除，已存在的目标文件保持不变。
struct PendingOutput {
    path: PathBuf,
    writer: BufWriter<NamedTempFile>,
}

impl PendingOutput {
    fn create(path: &Path, force: bool) -> Result<Self> {
        anyhow::ensure!(
            force || !path.exists(),
            "Output file already exists: {}. \nUse --force to overwrite it.",
            path.to_string_lossy().red().bold()
        );

        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let temp = NamedTempFile::new_in(parent).with_context(|| {
            format!(
                "Unable to create output file in: {}",
                parent.to_string_lossy().red().bold()
            )
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(temp),
        })
    }

    fn writer(&mut self) -> &mut BufWriter<NamedTempFile> {
        &mut self.writer
    }

    fn commit(self) -> io::Result<()> {
        let temp = self.writer.into_inner().map_err(|e| e.into_error())?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// 处理一次编码，输入来源缺失时从标准输入提问。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入文件。
/// * 图像尺寸超出限制或找不到有效尺寸。
/// * 输出文件已存在且未指定 `--force`，或无法写入输出文件。
pub fn handle_encode(args: EncodeArgs) -> Result<()> {
    let stdin = io::stdin();
    handle_encode_with(args, &mut stdin.lock(), &mut io::stdout())
}

/// 与 [`handle_encode`] 相同，但交互式提问使用给定的读写端。
pub fn handle_encode_with<R: BufRead, W: Write>(
    args: EncodeArgs,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let source = match args.source() {
        Some(source) => source,
        None => prompt_source(input, output)?,
    };
    let data = read_source(&source)?;

    let options = args.encode_options();
    let plan = plan_encoding(&data, &options).with_context(|| {
        format!(
            "Unable to lay out {} bytes as an image.",
            data.len().to_string().red().bold()
        )
    })?;

    let path = output_path(&args.output);
    let mut pending = PendingOutput::create(&path, args.force)?;
    let written = plan.write_to(pending.writer()).with_context(|| {
        format!(
            "Unable to write bitmap data to: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    pending.commit().with_context(|| {
        format!(
            "Unable to finish writing: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "Image dimensions: {}x{} ({} bytes written)",
        plan.dimensions.width.to_string().green().bold(),
        plan.dimensions.height.to_string().green().bold(),
        written
    );

    if args.verify {
        verify_output(&path, plan.dimensions.pixel_count() == 0)?;
    }

    println!(
        "The bitmap has been successfully created: {}",
        path.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 用 `image` 解码刚写出的文件，确认标准读取器能够打开它。
fn verify_output(path: &Path, empty: bool) -> Result<()> {
    if empty {
        println!("{}", "Skipping verification of an image with no pixels.".yellow());
        return Ok(());
    }

    let decoded = image::open(path).with_context(|| {
        format!(
            "The written file could not be decoded as a bitmap: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "Verified: decoder reports {}x{}",
        decoded.width().to_string().green().bold(),
        decoded.height().to_string().green().bold()
    );
    Ok(())
}
