//! # 交互式输入模块
//!
//! 命令行未指定输入来源时，询问用户输入文本还是文件路径。
//! 读写端是泛型参数，测试中可以用内存缓冲区代替标准输入输出。

use anyhow::{Context, Result, bail};
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// 输入来源的种类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Text,
    File,
}

/// 待编码数据的来源。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Text(String),
    File(PathBuf),
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Unable to read from standard input")?;
    if read == 0 {
        bail!("Input ended before an answer was given.");
    }

    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(line)
}

/// 询问输入模式，直到得到 `t` 或 `f` (不区分大小写)。
///
/// # Errors
///
/// 读取失败或输入在给出有效答案前结束时返回错误。
pub fn prompt_input_mode<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<InputMode> {
    let mut answer = ask(input, output, "Would you like to enter a file or text? ")?;
    loop {
        match answer.to_lowercase().as_str() {
            "t" => return Ok(InputMode::Text),
            "f" => return Ok(InputMode::File),
            _ => {
                writeln!(
                    output,
                    "{}",
                    "Incorrect input, please enter 'f' for file or 't' for text.".red()
                )?;
                answer = ask(input, output, "Would you like to enter a [f]ile or [t]ext? ")?;
            }
        }
    }
}

/// 先询问输入模式，再读取一行文本或一个文件路径。
pub fn prompt_source<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Source> {
    match prompt_input_mode(input, output)? {
        InputMode::Text => ask(input, output, "Enter text: ").map(Source::Text),
        InputMode::File => {
            let path = ask(input, output, "Enter file path: ")?;
            Ok(Source::File(PathBuf::from(path.trim())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reprompts_until_valid_mode() {
        let mut input = Cursor::new("x\nfile\nT\n");
        let mut output = Vec::new();

        let mode = prompt_input_mode(&mut input, &mut output).unwrap();
        assert_eq!(mode, InputMode::Text);

        let shown = String::from_utf8_lossy(&output);
        assert_eq!(shown.matches("Incorrect input").count(), 2);
    }

    #[test]
    fn padded_answer_is_not_accepted() {
        let mut input = Cursor::new("  T \nf \nf\n");
        let mut output = Vec::new();

        let mode = prompt_input_mode(&mut input, &mut output).unwrap();
        assert_eq!(mode, InputMode::File);

        let shown = String::from_utf8_lossy(&output);
        assert_eq!(shown.matches("Incorrect input").count(), 2);
    }

    #[test]
    fn text_source_keeps_inner_whitespace() {
        let mut input = Cursor::new("t\n hello world \r\n");
        let source = prompt_source(&mut input, &mut Vec::new()).unwrap();
        assert_eq!(source, Source::Text(" hello world ".to_string()));
    }

    #[test]
    fn file_source_is_trimmed() {
        let mut input = Cursor::new("F\n  data/input.bin \n");
        let source = prompt_source(&mut input, &mut Vec::new()).unwrap();
        assert_eq!(source, Source::File(PathBuf::from("data/input.bin")));
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut input = Cursor::new("q\n");
        let result = prompt_input_mode(&mut input, &mut Vec::new());
        assert!(result.is_err());
    }
}
