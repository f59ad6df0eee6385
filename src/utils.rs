//! 工具函数

use uuid::Uuid;

/// 商品 ID 长度
pub const PRODUCT_ID_LEN: usize = 10;
/// 上传文件名（不含扩展名）长度
pub const FILE_ID_LEN: usize = 10;

/// 生成短 ID：取 v4 UUID 的十六进制形式的前 `len` 个字符。
///
/// 短 ID 不保证全局唯一，调用方需自行检查冲突。
pub fn short_id(len: usize) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    hex[..len.min(hex.len())].to_string()
}

/// 生成在 `taken` 中不存在的短 ID
pub fn unique_short_id<F>(len: usize, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    loop {
        let id = short_id(len);
        if !taken(&id) {
            return id;
        }
    }
}
