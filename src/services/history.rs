//! 查询历史存储
//!
//! 文件中保存一个 JSON 数组，最多 `capacity` 个不重复的 IP，最新的在前。
//! 每次更新都是完整的 读取 → 修改 → 覆写，不加锁，也不做原子替换：
//! 并发写入可能丢失更新。

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, error, trace};

use crate::config::HistoryConfig;
use crate::errors::{GeoLookupError, Result};

/// 默认保留的历史条数
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

pub struct HistoryStore {
    file_path: PathBuf,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self::with_capacity(file_path, DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(file_path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            file_path: file_path.into(),
            capacity,
        }
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::with_capacity(&config.file, config.capacity)
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 读取历史，文件不存在时返回空列表
    ///
    /// 文件内容损坏时返回 `Serialization` 错误，而不是当作空列表。
    pub fn get_history(&self) -> Result<Vec<String>> {
        let content = match fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!("History file {} not found", self.file_path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                error!(
                    "Failed to read history file {}: {}",
                    self.file_path.display(),
                    e
                );
                return Err(GeoLookupError::file_operation(format!(
                    "failed to read {}: {}",
                    self.file_path.display(),
                    e
                )));
            }
        };

        serde_json::from_str::<Vec<String>>(&content).map_err(|e| {
            error!(
                "History file {} is malformed: {}",
                self.file_path.display(),
                e
            );
            GeoLookupError::serialization(format!(
                "malformed history file {}: {}",
                self.file_path.display(),
                e
            ))
        })
    }

    /// 记录一次成功的查询
    ///
    /// IP 已在历史中时不写文件，也不调整顺序。返回是否发生了写入。
    pub fn log_ip(&self, ip: &str) -> Result<bool> {
        let mut history = self.get_history()?;

        if history.iter().any(|entry| entry == ip) {
            trace!("IP {} already in history, skipping write", ip);
            return Ok(false);
        }

        history.insert(0, ip.to_string());
        history.truncate(self.capacity);

        let json = serde_json::to_string(&history)?;
        fs::write(&self.file_path, json).map_err(|e| {
            error!(
                "Failed to write history file {}: {}",
                self.file_path.display(),
                e
            );
            GeoLookupError::file_operation(format!(
                "failed to write {}: {}",
                self.file_path.display(),
                e
            ))
        })?;

        debug!("Logged {} to history ({} entries)", ip, history.len());
        Ok(true)
    }
}
