//! 物料命令

use cuba_common::UserId;
use cuba_errors::{AppError, AppResult};
use serde::Deserialize;

const ITEM_NAME_MAX: usize = 200;

/// 创建物料命令
///
/// 枚举字段以存储编码传入，由处理器解析；未知编码返回校验错误。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateItemCommand {
    pub item_code: String,
    pub item_name: String,
    pub unit_of_measure: String,
    pub category: String,
    pub subtype: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub hazard_class: String,
    #[serde(default)]
    pub chemical_family: String,
    #[serde(default)]
    pub contamination_risk: Option<String>,
    #[serde(default)]
    pub critical_to_product: bool,
    #[serde(default)]
    pub spec_verified: bool,
    /// 既有追溯级别，参与 QA 判定
    #[serde(default)]
    pub traceability_level: Option<String>,
    #[serde(skip)]
    pub user_id: Option<UserId>,
}

impl CreateItemCommand {
    pub fn validate(&self) -> AppResult<()> {
        validate_item_name(&self.item_name)?;
        if self.subtype.trim().is_empty() {
            return Err(AppError::validation("subtype must not be empty"));
        }
        Ok(())
    }
}

/// 更新物料命令，`None` 表示不修改
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItemCommand {
    pub item_code: String,
    pub item_name: Option<String>,
    pub unit_of_measure: Option<String>,
    pub category: Option<String>,
    pub subtype: Option<String>,
    pub grade: Option<String>,
    pub hazard_class: Option<String>,
    pub chemical_family: Option<String>,
    pub contamination_risk: Option<String>,
    pub critical_to_product: Option<bool>,
    pub spec_verified: Option<bool>,
    #[serde(skip)]
    pub user_id: Option<UserId>,
}

impl UpdateItemCommand {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.item_name {
            validate_item_name(name)?;
        }
        Ok(())
    }
}

fn validate_item_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("item name must not be empty"));
    }
    if name.chars().count() > ITEM_NAME_MAX {
        return Err(AppError::validation(format!(
            "item name must not exceed {} characters",
            ITEM_NAME_MAX
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_command_from_json_defaults() {
        let cmd: CreateItemCommand = serde_json::from_str(
            r#"{"item_code":"CHE-SOL-0001","item_name":"Ethanol","unit_of_measure":"L",
                "category":"Chemical","subtype":"Solvent"}"#,
        )
        .unwrap();
        assert_eq!(cmd.grade, "");
        assert!(!cmd.critical_to_product);
        assert!(cmd.contamination_risk.is_none());
        assert!(cmd.validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let cmd = CreateItemCommand {
            item_name: "   ".to_string(),
            subtype: "Solvent".to_string(),
            ..Default::default()
        };
        assert!(matches!(cmd.validate(), Err(AppError::Validation(_))));

        let update = UpdateItemCommand {
            item_name: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
