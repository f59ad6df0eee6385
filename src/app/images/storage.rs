//! 图片文件存储
//!
//! 上传的图片保存在单一目录下，文件名由服务端生成。商品记录中保存的是
//! `/images/<文件名>` 形式的引用，删除时只取引用的最后一段作为文件名。

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::error::CoreError;
use crate::utils::{short_id, FILE_ID_LEN};

/// 允许的图片类型，同时用于扩展名和 MIME 类型检查
pub const ALLOWED_TYPES: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

/// 图片引用的 URL 前缀
pub const IMAGE_URL_PREFIX: &str = "/images";

#[derive(Debug, Clone)]
pub struct ImageStorage {
    dir: PathBuf,
    max_bytes: usize,
}

impl ImageStorage {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// 确保存储目录存在
    pub fn ensure_dir(&self) -> Result<(), CoreError> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// 保存上传的图片，返回 `/images/<文件名>`
    pub fn save(
        &self,
        original_name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, CoreError> {
        let ext = image_extension(original_name)
            .ok_or_else(|| CoreError::bad_request("Only image files are allowed"))?;
        if !content_type.map(is_image_mime).unwrap_or(false) {
            return Err(CoreError::bad_request("Only image files are allowed"));
        }
        if bytes.is_empty() {
            return Err(CoreError::bad_request("No file uploaded"));
        }
        if bytes.len() > self.max_bytes {
            return Err(CoreError::bad_request("File too large"));
        }

        self.ensure_dir()?;
        let filename = loop {
            let candidate = format!("{}.{}", short_id(FILE_ID_LEN), ext);
            if !self.dir.join(&candidate).exists() {
                break candidate;
            }
        };
        fs::write(self.dir.join(&filename), bytes)?;
        info!("图片已保存: {} ({} 字节)", filename, bytes.len());

        Ok(format!("{}/{}", IMAGE_URL_PREFIX, filename))
    }

    /// 按文件名删除图片
    pub fn delete(&self, filename: &str) -> Result<(), CoreError> {
        if !is_plain_filename(filename) {
            return Err(CoreError::bad_request("Invalid filename"));
        }

        let path = self.dir.join(filename);
        if !path.is_file() {
            return Err(CoreError::not_found("File not found"));
        }
        fs::remove_file(&path)?;
        info!("图片已删除: {}", filename);

        Ok(())
    }

    /// 删除商品引用的图片文件，文件不存在时忽略
    pub fn remove_reference(&self, image_ref: &str) -> Result<(), CoreError> {
        let Some(filename) = Path::new(image_ref).file_name().and_then(|n| n.to_str()) else {
            warn!("无法解析图片引用: {}", image_ref);
            return Ok(());
        };

        let path = self.dir.join(filename);
        if path.is_file() {
            fs::remove_file(&path)?;
            info!("已删除旧图片: {}", filename);
        }

        Ok(())
    }
}

/// 小写扩展名，仅当其为允许的图片类型时返回
fn image_extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?.to_lowercase();
    ALLOWED_TYPES.contains(&ext.as_str()).then_some(ext)
}

fn is_image_mime(content_type: &str) -> bool {
    let lower = content_type.to_lowercase();
    ALLOWED_TYPES.iter().any(|t| lower.contains(t))
}

/// 只接受不含路径分隔符的单段文件名，防止目录穿越
fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}
