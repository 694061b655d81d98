use thiserror::Error;

#[derive(Error, Debug)]
pub enum BaziError {
    #[error("Invalid birth moment: {field} = {value} ({reason})")]
    InvalidBirthMoment {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid provided bazi '{value}': {reason}")]
    InvalidOverride { value: String, reason: String },

    #[error("No element data found")]
    NoElementDataFound,

    #[error("Invalid request: {field} ({reason})")]
    InvalidRequest { field: String, reason: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value: {field} = {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BaziError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Analysis,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BaziError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BaziError::InvalidBirthMoment { .. }
            | BaziError::InvalidOverride { .. }
            | BaziError::InvalidRequest { .. } => ErrorCategory::Input,
            BaziError::NoElementDataFound => ErrorCategory::Analysis,
            BaziError::ConfigValidationError { .. } | BaziError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            BaziError::IoError(_) | BaziError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Analysis => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 排盤與五行分析都是純計算，沒有可重試的錯誤
    pub fn is_retryable(&self) -> bool {
        matches!(self, BaziError::IoError(_))
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BaziError::InvalidBirthMoment { field, .. } => {
                format!("请检查出生信息中的 {} 字段，年份应在1900-2100之间且日期真实存在", field)
            }
            BaziError::InvalidOverride { .. } => {
                "请提供8个字的八字（如：癸未甲寅戊午壬子），或留空改用出生时间排盘".to_string()
            }
            BaziError::NoElementDataFound => "请确认分析对象是完整的八字排盘结果".to_string(),
            BaziError::InvalidRequest { field, .. } => format!("请补充或修正 {} 字段", field),
            BaziError::ConfigValidationError { field, .. }
            | BaziError::InvalidConfigValueError { field, .. } => {
                format!("请检查配置文件中的 {} 设置", field)
            }
            BaziError::IoError(_) => "请确认文件路径存在且具有读取权限".to_string(),
            BaziError::SerializationError(_) => "请检查输入数据的 JSON 格式".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BaziError::InvalidBirthMoment { reason, .. } => format!("出生信息有误：{}", reason),
            BaziError::InvalidOverride { reason, .. } => format!("八字格式不正确：{}", reason),
            BaziError::NoElementDataFound => {
                "无法从八字结果中提取五行信息，请检查八字格式是否正确".to_string()
            }
            BaziError::InvalidRequest { reason, .. } => format!("输入信息有误：{}", reason),
            BaziError::ConfigValidationError { message, .. } => format!("配置错误：{}", message),
            BaziError::InvalidConfigValueError { reason, .. } => format!("配置错误：{}", reason),
            BaziError::IoError(e) => format!("文件读取失败：{}", e),
            BaziError::SerializationError(e) => format!("数据格式错误：{}", e),
        }
    }
}
