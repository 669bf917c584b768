//! # 尺寸选择模块
//!
//! 根据像素总数和布局模式计算图像的宽度与高度 (单位：像素)。

use crate::constants::FIXED_STEP;
use crate::error::EncodeError;

/// 图像的宽度与高度，单位为像素。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// 没有任何像素的图像 (空输入)。
    pub const EMPTY: Self = Self::new(0, 0);

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

/// 候选宽度的枚举方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// 以 1 为步长尝试所有宽度。
    Squarify,
    /// 只尝试给定步长的整数倍作为宽度。
    FixedStep(usize),
}

impl LayoutMode {
    /// 默认的固定布局，宽度为 4 的倍数。
    pub const FIXED: Self = Self::FixedStep(FIXED_STEP);

    pub fn step(&self) -> usize {
        match *self {
            LayoutMode::Squarify => 1,
            LayoutMode::FixedStep(step) => step,
        }
    }
}

/// 在所有候选尺寸中挑选最终结果的规则。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DimensionStrategy {
    /// 返回扫描中最后找到的候选 (宽度最大)。
    #[default]
    LastDivisor,
    /// 返回宽高差最小的候选，差值相同时取较宽者。
    ClosestToSquare,
}

/// 为 `pixel_count` 个像素选择宽度和高度。
///
/// 从 `mode.step()` 开始，以相同步长枚举宽度直到 `pixel_count`，
/// 记录每个能整除像素总数的宽度，再按 `strategy` 从候选中挑选。
/// 扫描不会在第一个因数处停止。
///
/// # Errors
///
/// 找不到任何能整除 `pixel_count` 的宽度时返回 [`EncodeError::NoValidDimensions`]，
/// 这包括 `pixel_count == 0`、步长为 0，以及固定布局下像素总数不是步长倍数的情况。
pub fn select_dimensions(
    pixel_count: usize,
    mode: LayoutMode,
    strategy: DimensionStrategy,
) -> Result<Dimensions, EncodeError> {
    if pixel_count == 1 {
        return Ok(Dimensions::new(1, 1));
    }

    let step = mode.step();
    let no_match = EncodeError::NoValidDimensions { pixel_count, step };
    if step == 0 {
        return Err(no_match);
    }

    let candidates = (step..=pixel_count)
        .step_by(step)
        .filter(|width| pixel_count % width == 0)
        .map(|width| Dimensions::new(width, pixel_count / width));

    let chosen = match strategy {
        DimensionStrategy::LastDivisor => candidates.last(),
        // `min_by_key` 保留第一个最小值，反向扫描使平局时取较宽者
        DimensionStrategy::ClosestToSquare => candidates
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .min_by_key(|dims| dims.width.abs_diff(dims.height)),
    };

    chosen.ok_or(no_match)
}
