/// BMP 文件头 (14 字节) 加信息头 (40 字节) 的总大小，也是像素数据的起始偏移。
pub const BMP_HEADER_SIZE: usize = 54;

/// BITMAPINFOHEADER 的大小 (字节)。
pub const INFO_HEADER_SIZE: u32 = 40;

/// 每个像素占用的字节数 (24 位 RGB)。
pub const BYTES_PER_PIXEL: usize = 3;

/// 每一行像素数据必须对齐到的字节边界。
pub const ROW_ALIGNMENT: usize = 4;

/// 固定宽度布局下宽度的步长，同时也是像素总数必须满足的倍数。
pub const FIXED_STEP: usize = 4;

/// 宽度或高度允许的最大值 (2^28 - 1)。
pub const MAX_DIMENSION: u32 = 268_435_455;

/// 颜色平面数，BMP 中总是 1。
pub const PLANES: u16 = 1;

/// 每像素位数。
pub const BITS_PER_PIXEL: u16 = 24;

/// 写入 "raw data size" 字段的固定值。
pub const RAW_DATA_SIZE: u32 = 3;

/// 写入水平/垂直分辨率字段的两个字节。
pub const RESOLUTION: [u8; 2] = [196, 14];

/// 未指定时使用的输出文件名 (不含扩展名)。
pub const DEFAULT_OUTPUT_NAME: &str = "new image";

/// 输出文件扩展名。
pub const BMP_EXTENSION: &str = ".bmp";

// 头部字段的字节偏移
pub const OFFSET_FILE_SIZE: usize = 2;
pub const OFFSET_DATA_OFFSET: usize = 10;
pub const OFFSET_INFO_HEADER_SIZE: usize = 14;
pub const OFFSET_WIDTH: usize = 18;
pub const OFFSET_HEIGHT: usize = 22;
pub const OFFSET_PLANES: usize = 26;
pub const OFFSET_BITS_PER_PIXEL: usize = 28;
pub const OFFSET_RAW_DATA_SIZE: usize = 34;
pub const OFFSET_HORIZONTAL_RESOLUTION: usize = 40;
pub const OFFSET_VERTICAL_RESOLUTION: usize = 44;
