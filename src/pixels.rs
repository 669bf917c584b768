//! # 像素写入模块
//!
//! 把字节序列按每 3 字节一个像素写成 BMP 像素行，每行末尾补零对齐到 4 字节边界。
//! 行数据先累积在固定容量的行缓冲区中，行满时连同填充一次写出并清空。

use crate::constants::{BYTES_PER_PIXEL, ROW_ALIGNMENT};
use std::io::{self, ErrorKind, Write};

/// 像素三元组写入文件时的字节顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelOrder {
    /// 按源数据原样写出。
    #[default]
    AsIs,
    /// 每个三元组反转后写出。BMP 以 B,G,R 存储像素，
    /// 这样标准读取器会把源数据的三个字节依次解释为 R,G,B。
    Rgb,
}

/// 宽度为 `width` 像素的一行所需的填充字节数。
pub fn row_padding(width: usize) -> usize {
    let row_bytes = width * BYTES_PER_PIXEL;
    (ROW_ALIGNMENT - row_bytes % ROW_ALIGNMENT) % ROW_ALIGNMENT
}

/// 带行缓冲区的像素行写入器。
pub struct RowWriter<W: Write> {
    sink: W,
    row: Vec<u8>,
    row_bytes: usize,
    padding: usize,
    order: ChannelOrder,
    rows_written: usize,
}

impl<W: Write> RowWriter<W> {
    pub fn new(sink: W, width: usize) -> Self {
        let row_bytes = width * BYTES_PER_PIXEL;
        let padding = row_padding(width);
        Self {
            sink,
            row: Vec::with_capacity(row_bytes + padding),
            row_bytes,
            padding,
            order: ChannelOrder::AsIs,
            rows_written: 0,
        }
    }

    pub fn channel_order(mut self, order: ChannelOrder) -> Self {
        self.order = order;
        self
    }

    /// 追加一个像素。不足 3 字节的像素在末尾补零。
    ///
    /// # Errors
    ///
    /// * 宽度为 0 (行中放不下任何像素) 或像素超过 3 字节时返回 `InvalidInput`。
    /// * 行满后写出失败时返回底层 I/O 错误。
    pub fn push_pixel(&mut self, pixel: &[u8]) -> io::Result<()> {
        if self.row_bytes == 0 || pixel.len() > BYTES_PER_PIXEL {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                "A pixel must hold at most 3 bytes and the row must be at least one pixel wide.",
            ));
        }

        let mut triple = [0u8; BYTES_PER_PIXEL];
        triple[..pixel.len()].copy_from_slice(pixel);
        if self.order == ChannelOrder::Rgb {
            triple.reverse();
        }
        self.row.extend_from_slice(&triple);

        if self.row.len() == self.row_bytes {
            self.flush_row()?;
        }
        Ok(())
    }

    /// 把未写满的最后一行补零到整行宽度后写出，返回写出的总行数和输出端。
    pub fn finish(mut self) -> io::Result<(usize, W)> {
        if !self.row.is_empty() {
            self.row.resize(self.row_bytes, 0);
            self.flush_row()?;
        }
        Ok((self.rows_written, self.sink))
    }

    fn flush_row(&mut self) -> io::Result<()> {
        self.row.resize(self.row_bytes + self.padding, 0);
        self.sink.write_all(&self.row)?;
        self.row.clear();
        self.rows_written += 1;
        Ok(())
    }
}

/// 把 `data` 按宽度 `width` 写成像素行，返回写出的行数。
///
/// 调用方应已经向同一个输出端写入了头部。
pub fn write_pixels<W: Write>(data: &[u8], width: usize, sink: W) -> io::Result<usize> {
    write_pixels_ordered(data, width, ChannelOrder::AsIs, sink)
}

pub fn write_pixels_ordered<W: Write>(
    data: &[u8],
    width: usize,
    order: ChannelOrder,
    sink: W,
) -> io::Result<usize> {
    let mut writer = RowWriter::new(sink, width).channel_order(order);
    data.chunks(BYTES_PER_PIXEL)
        .try_for_each(|pixel| writer.push_pixel(pixel))?;
    let (rows, _) = writer.finish()?;
    Ok(rows)
}
