//! 实体基础 trait

use cuba_common::AuditInfo;

/// 实体 trait
pub trait Entity {
    type Id;

    fn id(&self) -> &Self::Id;
}

/// 聚合根 trait
pub trait AggregateRoot: Entity {
    fn audit_info(&self) -> &AuditInfo;
    fn audit_info_mut(&mut self) -> &mut AuditInfo;
}

/// 含派生字段的聚合
///
/// 派生字段只能由 `recalculate_derived_fields` 从当前输入字段重新计算，
/// 持久化边界必须在写入前调用。
pub trait DerivedFields {
    fn recalculate_derived_fields(&mut self);
}

/// 写入前的规范化钩子
///
/// 仓储实现在每次写入前调用；带派生字段的聚合在此重算派生字段，
/// 其他聚合使用默认的空实现。
pub trait Persistable {
    fn prepare_for_save(&mut self) {}
}
