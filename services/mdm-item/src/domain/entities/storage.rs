//! 库区与库位

use cuba_common::AuditInfo;
use cuba_domain_core::{AggregateRoot, Entity, Persistable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::enums::{Category, HazardClass};
use crate::domain::value_objects::{LocationId, StorageZoneId};

/// 库区
///
/// 危险品只能放入登记了对应危险类别的库区；无危险物料可放入任何库区。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageZone {
    zone_id: StorageZoneId,
    zone_name: String,
    /// 如 "2-8°C"
    temperature_range: String,
    humidity_controlled: bool,
    hazard_compatibility: Vec<HazardClass>,
    default_for_category: Option<Category>,
    audit_info: AuditInfo,
}

impl StorageZone {
    pub fn new(zone_id: StorageZoneId, zone_name: impl Into<String>) -> Self {
        Self {
            zone_id,
            zone_name: zone_name.into(),
            temperature_range: String::new(),
            humidity_controlled: false,
            hazard_compatibility: Vec::new(),
            default_for_category: None,
            audit_info: AuditInfo::default(),
        }
    }

    pub fn zone_id(&self) -> &StorageZoneId {
        &self.zone_id
    }

    pub fn zone_name(&self) -> &str {
        &self.zone_name
    }

    pub fn temperature_range(&self) -> &str {
        &self.temperature_range
    }

    pub fn humidity_controlled(&self) -> bool {
        self.humidity_controlled
    }

    pub fn hazard_compatibility(&self) -> &[HazardClass] {
        &self.hazard_compatibility
    }

    pub fn default_for_category(&self) -> Option<Category> {
        self.default_for_category
    }

    pub fn accepts(&self, hazard_class: HazardClass) -> bool {
        !hazard_class.is_hazardous() || self.hazard_compatibility.contains(&hazard_class)
    }

    pub fn with_climate(mut self, temperature_range: impl Into<String>, humidity_controlled: bool) -> Self {
        self.temperature_range = temperature_range.into();
        self.humidity_controlled = humidity_controlled;
        self
    }

    /// 只保留危险类别，重复项去除
    pub fn with_hazard_compatibility(mut self, classes: impl IntoIterator<Item = HazardClass>) -> Self {
        let mut compatible = Vec::new();
        for class in classes.into_iter().filter(HazardClass::is_hazardous) {
            if !compatible.contains(&class) {
                compatible.push(class);
            }
        }
        self.hazard_compatibility = compatible;
        self
    }

    pub fn with_default_for_category(mut self, category: Option<Category>) -> Self {
        self.default_for_category = category;
        self
    }
}

impl Entity for StorageZone {
    type Id = StorageZoneId;

    fn id(&self) -> &Self::Id {
        &self.zone_id
    }
}

impl Persistable for StorageZone {}

impl AggregateRoot for StorageZone {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}

/// 库位（货架/层）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageLocation {
    location_id: LocationId,
    zone_id: StorageZoneId,
    rack_shelf: String,
    max_capacity: Option<Decimal>,
    active: bool,
    audit_info: AuditInfo,
}

impl StorageLocation {
    pub fn new(location_id: LocationId, zone_id: StorageZoneId, rack_shelf: impl Into<String>) -> Self {
        Self {
            location_id,
            zone_id,
            rack_shelf: rack_shelf.into(),
            max_capacity: None,
            active: true,
            audit_info: AuditInfo::default(),
        }
    }

    pub fn location_id(&self) -> &LocationId {
        &self.location_id
    }

    pub fn zone_id(&self) -> &StorageZoneId {
        &self.zone_id
    }

    pub fn rack_shelf(&self) -> &str {
        &self.rack_shelf
    }

    pub fn max_capacity(&self) -> Option<Decimal> {
        self.max_capacity
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn with_max_capacity(mut self, max_capacity: Option<Decimal>) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Entity for StorageLocation {
    type Id = LocationId;

    fn id(&self) -> &Self::Id {
        &self.location_id
    }
}

impl Persistable for StorageLocation {}

impl AggregateRoot for StorageLocation {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}
