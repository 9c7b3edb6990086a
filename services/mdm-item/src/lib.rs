//! mdm-item - 物料合规主数据
//!
//! 物料、供应商、供应商-物料关联与批次的主数据服务。
//! 保存时按规则推导 QA/追溯/随货文件/隔离要求，并排定供应商复审日期。

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
