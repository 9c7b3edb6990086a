//! 业务编码值对象

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const ITEM_CODE_MAX: usize = 50;
const SUPPLIER_ID_MAX: usize = 20;
const BATCH_ID_MAX: usize = 100;
/// 库区、库位、QA 审核单、库存事务编号共用长度上限
const RECORD_ID_MAX: usize = 20;

/// 编码错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    #[error("{kind} must not be empty")]
    Empty { kind: &'static str },
    #[error("{kind} must not exceed {max} characters")]
    TooLong { kind: &'static str, max: usize },
    #[error("{kind} contains invalid character: {ch:?}")]
    InvalidCharacter { kind: &'static str, ch: char },
}

fn validate(
    raw: String,
    kind: &'static str,
    max: usize,
    allowed: impl Fn(char) -> bool,
) -> Result<String, CodeError> {
    let code = raw.trim().to_string();

    if code.is_empty() {
        return Err(CodeError::Empty { kind });
    }
    if code.chars().count() > max {
        return Err(CodeError::TooLong { kind, max });
    }
    if let Some(ch) = code.chars().find(|c| !allowed(*c)) {
        return Err(CodeError::InvalidCharacter { kind, ch });
    }

    Ok(code)
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// 物料编码，约定格式 `[CAT]-[SUB]-[CODE]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemCode(String);

impl ItemCode {
    pub fn new(code: impl Into<String>) -> Result<Self, CodeError> {
        validate(code.into(), "item code", ITEM_CODE_MAX, is_identifier_char).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 供应商编码
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SupplierId(String);

impl SupplierId {
    pub fn new(code: impl Into<String>) -> Result<Self, CodeError> {
        validate(code.into(), "supplier id", SUPPLIER_ID_MAX, is_identifier_char).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 批次号
///
/// 供应商批号格式不统一，只拒绝空白和控制字符
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BatchId(String);

impl BatchId {
    pub fn new(code: impl Into<String>) -> Result<Self, CodeError> {
        validate(code.into(), "batch id", BATCH_ID_MAX, |c| {
            !c.is_whitespace() && !c.is_control()
        })
        .map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 生成只允许标识符字符、长度不超过 20 的编号类型
macro_rules! record_id {
    ($($(#[$meta:meta])* $ty:ident => $kind:literal),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
            #[serde(try_from = "String", into = "String")]
            pub struct $ty(String);

            impl $ty {
                pub fn new(code: impl Into<String>) -> Result<Self, CodeError> {
                    validate(code.into(), $kind, RECORD_ID_MAX, is_identifier_char).map(Self)
                }

                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }
        )*
    };
}

record_id! {
    /// 库区编号
    StorageZoneId => "zone id",
    /// 库位编号
    LocationId => "location id",
    QaReviewId => "qa review id",
    TransactionId => "transaction id",
}

macro_rules! impl_code_conversions {
    ($($ty:ident),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl TryFrom<String> for $ty {
                type Error = CodeError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::new(value)
                }
            }

            impl TryFrom<&str> for $ty {
                type Error = CodeError;

                fn try_from(value: &str) -> Result<Self, Self::Error> {
                    Self::new(value)
                }
            }

            impl From<$ty> for String {
                fn from(code: $ty) -> Self {
                    code.0
                }
            }
        )*
    };
}

impl_code_conversions!(
    ItemCode,
    SupplierId,
    BatchId,
    StorageZoneId,
    LocationId,
    QaReviewId,
    TransactionId
);

/// 供应商-物料组合键（同一物料同一供应商只有一条记录）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SupplierProductKey {
    pub item_code: ItemCode,
    pub supplier_id: SupplierId,
}

impl SupplierProductKey {
    pub fn new(item_code: ItemCode, supplier_id: SupplierId) -> Self {
        Self {
            item_code,
            supplier_id,
        }
    }
}

impl fmt::Display for SupplierProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.item_code, self.supplier_id)
    }
}
