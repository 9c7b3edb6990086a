//! 服务错误定义

use cuba_errors::AppError;

use crate::domain::enums::UnknownChoice;
use crate::domain::value_objects::CodeError;

impl From<CodeError> for AppError {
    fn from(error: CodeError) -> Self {
        AppError::validation(error.to_string())
    }
}

impl From<UnknownChoice> for AppError {
    fn from(error: UnknownChoice) -> Self {
        AppError::validation(error.to_string())
    }
}
