use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EcgError {
    /// 无法打开、映射或读取文件
    #[error("Could not access ECG file {path}: {source}")]
    FileAccess {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("ECG file is empty: {0}")]
    EmptyFile(String),

    #[error("No numeric data rows were found")]
    NoData,
}

impl EcgError {
    pub(crate) fn file_access(path: &std::path::Path, source: io::Error) -> Self {
        EcgError::FileAccess {
            path: path.display().to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, EcgError>;
