use std::fmt;

#[derive(Debug, Clone)]
pub enum GeoLookupError {
    MissingParameter(String),
    InvalidTarget(String),
    ResolutionFailure(String),
    UpstreamFailure(String),
    UpstreamRejected(String),
    FileOperation(String),
    Serialization(String),
    Config(String),
}

impl GeoLookupError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            GeoLookupError::MissingParameter(_) => "E001",
            GeoLookupError::InvalidTarget(_) => "E002",
            GeoLookupError::ResolutionFailure(_) => "E003",
            GeoLookupError::UpstreamFailure(_) => "E004",
            GeoLookupError::UpstreamRejected(_) => "E005",
            GeoLookupError::FileOperation(_) => "E006",
            GeoLookupError::Serialization(_) => "E007",
            GeoLookupError::Config(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            GeoLookupError::MissingParameter(_) => "Missing Parameter",
            GeoLookupError::InvalidTarget(_) => "Invalid Target",
            GeoLookupError::ResolutionFailure(_) => "Resolution Failure",
            GeoLookupError::UpstreamFailure(_) => "Upstream Failure",
            GeoLookupError::UpstreamRejected(_) => "Upstream Rejected",
            GeoLookupError::FileOperation(_) => "File Operation Error",
            GeoLookupError::Serialization(_) => "Serialization Error",
            GeoLookupError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            GeoLookupError::MissingParameter(msg) => msg,
            GeoLookupError::InvalidTarget(msg) => msg,
            GeoLookupError::ResolutionFailure(msg) => msg,
            GeoLookupError::UpstreamFailure(msg) => msg,
            GeoLookupError::UpstreamRejected(msg) => msg,
            GeoLookupError::FileOperation(msg) => msg,
            GeoLookupError::Serialization(msg) => msg,
            GeoLookupError::Config(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for GeoLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GeoLookupError {}

// 便捷的构造函数
impl GeoLookupError {
    pub fn missing_parameter<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::MissingParameter(msg.into())
    }

    pub fn invalid_target<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::InvalidTarget(msg.into())
    }

    pub fn resolution_failure<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::ResolutionFailure(msg.into())
    }

    pub fn upstream_failure<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::UpstreamFailure(msg.into())
    }

    pub fn upstream_rejected<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::UpstreamRejected(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::Serialization(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        GeoLookupError::Config(msg.into())
    }
}

impl From<std::io::Error> for GeoLookupError {
    fn from(err: std::io::Error) -> Self {
        GeoLookupError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for GeoLookupError {
    fn from(err: serde_json::Error) -> Self {
        GeoLookupError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for GeoLookupError {
    fn from(err: config::ConfigError) -> Self {
        GeoLookupError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GeoLookupError>;
