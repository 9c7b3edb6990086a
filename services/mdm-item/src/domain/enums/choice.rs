//! 枚举取值解析错误

use thiserror::Error;

/// 取值不在闭合集合内
///
/// 只在边界（反序列化、命令解析）出现，规则计算本身不会产生该错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownChoice {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownChoice {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
