use clap::Parser;

use data2bmp::{cli::Cli, handler::handle_encode};

/// 程序的主入口点
///
/// 解析命令行参数并执行一次编码。
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    handle_encode(cli.args)
}
