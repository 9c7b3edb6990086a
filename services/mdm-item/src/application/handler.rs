//! Business logic handler
//!
//! 所有带派生字段的记录在写入仓储前统一经过 `recalculate_derived_fields`。

use std::str::FromStr;

use cuba_common::UserId;
use cuba_config::InventoryConfig;
use cuba_domain_core::{AggregateRoot, DerivedFields, Entity};
use cuba_errors::{AppError, AppResult};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::domain::entities::{
    Batch, InventoryTransaction, ItemRecord, QaReview, StorageLocation, StorageZone, Supplier,
    SupplierProduct,
};
use crate::domain::enums::{
    Category, ContaminationRisk, DocumentMatch, Grade, HazardClass, QaStatus, ReviewFrequency,
    ReviewOutcome, StockEffect, TraceabilityLevel, TransactionType, UnitOfMeasure, UnknownChoice,
};
use crate::domain::repositories::Repositories;
use crate::domain::services::{DocumentCheck, DocumentChecks, DocumentKind, ExpiryStatus, ReviewStatus};
use crate::domain::value_objects::{
    BatchId, ItemCode, LocationId, QaReviewId, StorageZoneId, SupplierId, SupplierProductKey,
    TransactionId,
};
use crate::infrastructure::observability::metrics;

use super::commands::*;
use super::queries::*;

pub struct ServiceHandler {
    repos: Repositories,
    inventory: InventoryConfig,
}

impl ServiceHandler {
    pub fn new(repos: Repositories, inventory: InventoryConfig) -> Self {
        Self { repos, inventory }
    }

    // ========== 物料 ==========

    /// 创建物料
    pub async fn create_item(&self, cmd: CreateItemCommand) -> AppResult<ItemRecord> {
        info!("Creating item: {}", cmd.item_code);

        // 1. 验证命令
        cmd.validate()?;
        let item_code = ItemCode::new(cmd.item_code.as_str())?;

        // 2. 检查编码是否已存在
        if self.repos.items.exists(&item_code).await? {
            return Err(AppError::conflict(format!("item {} already exists", item_code)));
        }

        // 3. 构建实体
        let mut item = ItemRecord::new(
            item_code,
            cmd.item_name.trim(),
            cmd.unit_of_measure.parse::<UnitOfMeasure>()?,
            cmd.category.parse::<Category>()?,
            cmd.subtype.trim(),
        )?
        .with_grade(cmd.grade.parse::<Grade>()?)
        .with_hazard_class(cmd.hazard_class.parse::<HazardClass>()?)
        .with_chemical_family(cmd.chemical_family)
        .with_contamination_risk(
            parse_optional::<ContaminationRisk>(cmd.contamination_risk.as_deref())?.unwrap_or_default(),
        )
        .with_critical_to_product(cmd.critical_to_product)
        .with_spec_verified(cmd.spec_verified);

        if let Some(level) = parse_optional::<TraceabilityLevel>(cmd.traceability_level.as_deref())? {
            item = item.with_recorded_traceability_level(level);
        }

        item.audit_info_mut().created_by = cmd.user_id.clone();
        item.audit_info_mut().updated_by = cmd.user_id;

        // 4. 派生并保存
        self.save_item(&mut item, "create_item").await?;
        Ok(item)
    }

    /// 更新物料
    pub async fn update_item(&self, cmd: UpdateItemCommand) -> AppResult<ItemRecord> {
        info!("Updating item: {}", cmd.item_code);

        cmd.validate()?;
        let item_code = ItemCode::new(cmd.item_code.as_str())?;
        let mut item = self.load_item(&item_code).await?;

        if let Some(name) = cmd.item_name {
            item.rename(name.trim());
        }
        if let Some(unit) = parse_optional::<UnitOfMeasure>(cmd.unit_of_measure.as_deref())? {
            item.set_unit_of_measure(unit);
        }
        if cmd.category.is_some() || cmd.subtype.is_some() {
            let category = parse_optional::<Category>(cmd.category.as_deref())?;
            item.reclassify(category, cmd.subtype.map(|s| s.trim().to_string()))?;
        }
        if let Some(grade) = parse_optional::<Grade>(cmd.grade.as_deref())? {
            item.set_grade(grade);
        }
        if let Some(hazard) = parse_optional::<HazardClass>(cmd.hazard_class.as_deref())? {
            item.set_hazard_class(hazard);
        }
        if let Some(family) = cmd.chemical_family {
            item.set_chemical_family(family);
        }
        if let Some(risk) = parse_optional::<ContaminationRisk>(cmd.contamination_risk.as_deref())? {
            item.set_contamination_risk(risk);
        }
        if let Some(critical) = cmd.critical_to_product {
            item.set_critical_to_product(critical);
        }
        if let Some(verified) = cmd.spec_verified {
            item.set_spec_verified(verified);
        }

        item.audit_info_mut().update(cmd.user_id);

        self.save_item(&mut item, "update_item").await?;
        Ok(item)
    }

    /// 获取物料
    pub async fn get_item(&self, item_code: &str) -> AppResult<ItemRecord> {
        let item_code = ItemCode::new(item_code)?;
        self.load_item(&item_code).await
    }

    /// 全部物料
    pub async fn list_items(&self) -> AppResult<Vec<ItemRecord>> {
        let items = self.repos.items.list_all().await?;
        info!("Found {} items", items.len());
        Ok(items)
    }

    async fn load_item(&self, item_code: &ItemCode) -> AppResult<ItemRecord> {
        self.repos.items
            .find_by_id(item_code)
            .await?
            .ok_or_else(|| AppError::not_found(format!("item {} not found", item_code)))
    }

    async fn save_item(&self, item: &mut ItemRecord, operation: &'static str) -> AppResult<()> {
        item.recalculate_derived_fields();
        metrics::record_derivation(item.qa_required(), item.traceability_level());

        self.repos.items.save(item).await?;
        metrics::record_save(operation);

        info!(
            item_code = %item.id(),
            qa_required = item.qa_required(),
            traceability = %item.traceability_level(),
            coa_mandatory = item.coa_mandatory(),
            sds_mandatory = item.sds_mandatory(),
            segregation = item.segregation_rule_required(),
            "Item saved"
        );
        Ok(())
    }

    // ========== 供应商 ==========

    /// 创建供应商
    pub async fn create_supplier(&self, cmd: CreateSupplierCommand) -> AppResult<Supplier> {
        info!("Creating supplier: {}", cmd.supplier_id);

        cmd.validate()?;
        let supplier_id = SupplierId::new(cmd.supplier_id.as_str())?;
        if self.repos.suppliers.exists(&supplier_id).await? {
            return Err(AppError::conflict(format!("supplier {} already exists", supplier_id)));
        }

        let mut supplier = Supplier::new(
            supplier_id,
            cmd.supplier_name.trim(),
            cmd.address,
            cmd.country_of_origin.to_ascii_uppercase(),
        )
        .with_business_unit(cmd.business_unit)
        .with_certifications(cmd.certifications)
        .with_last_reviewed_on(cmd.last_reviewed_on)
        .with_notes(cmd.notes);

        if let Some(raw) = cmd.review_frequency.as_deref() {
            supplier = supplier.with_review_frequency(parse_frequency(raw)?);
        }
        if let Some(approved_on) = cmd.approved_on {
            supplier.approve(approved_on);
        }

        supplier.audit_info_mut().created_by = cmd.user_id.clone();
        supplier.audit_info_mut().updated_by = cmd.user_id;

        self.save_supplier(&mut supplier, "create_supplier").await?;
        Ok(supplier)
    }

    /// 更新供应商
    pub async fn update_supplier(&self, cmd: UpdateSupplierCommand) -> AppResult<Supplier> {
        info!("Updating supplier: {}", cmd.supplier_id);

        cmd.validate()?;
        let supplier_id = SupplierId::new(cmd.supplier_id.as_str())?;
        let mut supplier = self.load_supplier(&supplier_id).await?;

        if let Some(name) = cmd.supplier_name {
            supplier.rename(name.trim());
        }
        if let Some(address) = cmd.address {
            supplier.set_address(address);
        }
        if let Some(certifications) = cmd.certifications {
            supplier.set_certifications(certifications);
        }
        if let Some(raw) = cmd.review_frequency.as_deref() {
            supplier.set_review_frequency(parse_frequency(raw)?);
        }
        if let Some(notes) = cmd.notes {
            supplier.set_notes(notes);
        }

        supplier.audit_info_mut().update(cmd.user_id);
        self.save_supplier(&mut supplier, "update_supplier").await?;
        Ok(supplier)
    }

    /// 设置或撤销供应商 QA 批准
    pub async fn approve_supplier(&self, cmd: ApproveSupplierCommand) -> AppResult<Supplier> {
        let supplier_id = SupplierId::new(cmd.supplier_id.as_str())?;
        let mut supplier = self.load_supplier(&supplier_id).await?;

        if cmd.approved {
            supplier.approve(cmd.effective_on);
            info!("Supplier {} approved on {}", supplier_id, cmd.effective_on);
        } else {
            supplier.revoke_approval();
            warn!("Supplier {} approval revoked", supplier_id);
        }

        supplier.audit_info_mut().update(cmd.user_id);
        self.save_supplier(&mut supplier, "approve_supplier").await?;
        Ok(supplier)
    }

    /// 登记供应商复审
    pub async fn record_supplier_review(
        &self,
        supplier_id: &str,
        cmd: RecordReviewCommand,
    ) -> AppResult<Supplier> {
        let supplier_id = SupplierId::new(supplier_id)?;
        let mut supplier = self.load_supplier(&supplier_id).await?;

        supplier.record_review(cmd.reviewed_on);
        if let Some(raw) = cmd.review_frequency.as_deref() {
            supplier.set_review_frequency(parse_frequency(raw)?);
        }

        supplier.audit_info_mut().update(cmd.user_id);
        self.save_supplier(&mut supplier, "record_supplier_review").await?;
        Ok(supplier)
    }

    pub async fn get_supplier(&self, supplier_id: &str) -> AppResult<Supplier> {
        let supplier_id = SupplierId::new(supplier_id)?;
        self.load_supplier(&supplier_id).await
    }

    /// 逾期或即将到期复审的供应商
    pub async fn suppliers_due_for_review(
        &self,
        query: ReviewDueQuery,
    ) -> AppResult<Vec<(Supplier, ReviewStatus)>> {
        let warning_days = self.inventory.review_warning_days;
        let cutoff = review_cutoff(query.as_of, warning_days)?;

        let due = self
            .repos
            .suppliers
            .find_due_for_review(cutoff)
            .await?
            .into_iter()
            .map(|s| {
                let status = s.review_status(query.as_of, warning_days);
                (s, status)
            })
            .filter(|(_, status)| status.needs_attention())
            .collect::<Vec<_>>();

        info!("Found {} suppliers due for review as of {}", due.len(), query.as_of);
        Ok(due)
    }

    async fn load_supplier(&self, supplier_id: &SupplierId) -> AppResult<Supplier> {
        self.repos.suppliers
            .find_by_id(supplier_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("supplier {} not found", supplier_id)))
    }

    async fn save_supplier(&self, supplier: &mut Supplier, operation: &'static str) -> AppResult<()> {
        supplier.recalculate_derived_fields();
        metrics::record_review_schedule("supplier", supplier.review_frequency());

        self.repos.suppliers.save(supplier).await?;
        metrics::record_save(operation);

        info!(
            supplier_id = %supplier.id(),
            next_review_due = ?supplier.next_review_due(),
            "Supplier saved"
        );
        Ok(())
    }

    // ========== 供应商-物料 ==========

    /// 创建供应商-物料关联
    pub async fn create_supplier_product(
        &self,
        cmd: CreateSupplierProductCommand,
    ) -> AppResult<SupplierProduct> {
        info!("Linking supplier {} to item {}", cmd.supplier_id, cmd.item_code);

        cmd.validate()?;
        let item_code = ItemCode::new(cmd.item_code.as_str())?;
        let supplier_id = SupplierId::new(cmd.supplier_id.as_str())?;

        let item = self.load_item(&item_code).await?;
        self.load_supplier(&supplier_id).await?;

        let key = SupplierProductKey::new(item_code.clone(), supplier_id.clone());
        if self.repos.supplier_products.exists(&key).await? {
            return Err(AppError::conflict(format!("supplier product {} already exists", key)));
        }

        let mut product = SupplierProduct::new(item_code, supplier_id)
            .with_manufacturer(cmd.manufacturer_name)
            .with_product_code(cmd.product_code)
            .with_grade(cmd.grade.parse::<Grade>()?)
            .with_batch_code(cmd.batch_code_format_known, cmd.batch_code_quality)
            .with_spec_sheet_url(cmd.spec_sheet_url.filter(|url| !url.is_empty()));

        if let Some(level) = parse_optional::<TraceabilityLevel>(cmd.traceability_level.as_deref())? {
            product = product.with_traceability_level(level);
        }
        let frequency = match cmd.review_frequency.as_deref() {
            Some(raw) => parse_frequency(raw)?,
            None => product.review_frequency(),
        };
        product = product.with_review(cmd.last_reviewed_on, frequency);

        product.set_preferred_vendor(cmd.preferred_vendor);
        product.set_spec_verified(cmd.spec_verified);
        product.set_approved(cmd.approved);

        if !product.grade_matches_item(&item) {
            warn!(
                key = %product.key(),
                supplied = %product.grade(),
                registered = %item.grade(),
                "Supplied grade differs from item grade"
            );
        }

        product.audit_info_mut().created_by = cmd.user_id.clone();
        product.audit_info_mut().updated_by = cmd.user_id;

        self.save_supplier_product(&mut product, "create_supplier_product").await?;
        Ok(product)
    }

    /// 更新供应商-物料关联
    pub async fn update_supplier_product(
        &self,
        cmd: UpdateSupplierProductCommand,
    ) -> AppResult<SupplierProduct> {
        cmd.validate()?;
        let key = SupplierProductKey::new(
            ItemCode::new(cmd.item_code.as_str())?,
            SupplierId::new(cmd.supplier_id.as_str())?,
        );
        let mut product = self.load_supplier_product(&key).await?;

        if let Some(name) = cmd.manufacturer_name {
            product.set_manufacturer(name);
        }
        if let Some(code) = cmd.product_code {
            product.set_product_code(code);
        }
        if let Some(grade) = parse_optional::<Grade>(cmd.grade.as_deref())? {
            product.set_grade(grade);
        }
        if cmd.batch_code_format_known.is_some() || cmd.batch_code_quality.is_some() {
            product.set_batch_code(
                cmd.batch_code_format_known.unwrap_or(product.batch_code_format_known()),
                cmd.batch_code_quality.unwrap_or(product.batch_code_quality()),
            );
        }
        if let Some(level) = parse_optional::<TraceabilityLevel>(cmd.traceability_level.as_deref())? {
            product.set_traceability_level(level);
        }
        if let Some(url) = cmd.spec_sheet_url {
            product.set_spec_sheet_url(Some(url).filter(|u| !u.is_empty()));
        }
        if let Some(preferred) = cmd.preferred_vendor {
            product.set_preferred_vendor(preferred);
        }
        if let Some(verified) = cmd.spec_verified {
            product.set_spec_verified(verified);
        }
        if let Some(approved) = cmd.approved {
            product.set_approved(approved);
        }
        if let Some(raw) = cmd.review_frequency.as_deref() {
            product.set_review_frequency(parse_frequency(raw)?);
        }

        product.audit_info_mut().update(cmd.user_id);
        self.save_supplier_product(&mut product, "update_supplier_product").await?;
        Ok(product)
    }

    /// 登记供应商-物料复审
    pub async fn record_supplier_product_review(
        &self,
        item_code: &str,
        supplier_id: &str,
        cmd: RecordReviewCommand,
    ) -> AppResult<SupplierProduct> {
        let key = SupplierProductKey::new(ItemCode::new(item_code)?, SupplierId::new(supplier_id)?);
        let mut product = self.load_supplier_product(&key).await?;

        product.record_review(cmd.reviewed_on);
        if let Some(raw) = cmd.review_frequency.as_deref() {
            product.set_review_frequency(parse_frequency(raw)?);
        }

        product.audit_info_mut().update(cmd.user_id);
        self.save_supplier_product(&mut product, "record_supplier_product_review")
            .await?;
        Ok(product)
    }

    /// 某物料的全部供货来源
    pub async fn list_supplier_products(&self, item_code: &str) -> AppResult<Vec<SupplierProduct>> {
        let item_code = ItemCode::new(item_code)?;
        self.repos.supplier_products.find_by_item(&item_code).await
    }

    /// 按详细规则给出建议追溯级别（不写回）
    pub async fn suggest_traceability_level(
        &self,
        item_code: &str,
        supplier_id: &str,
    ) -> AppResult<TraceabilityLevel> {
        let key = SupplierProductKey::new(ItemCode::new(item_code)?, SupplierId::new(supplier_id)?);
        let product = self.load_supplier_product(&key).await?;
        let item = self.load_item(&key.item_code).await?;
        Ok(product.suggested_traceability_level(&item))
    }

    /// 逾期或即将到期复审的供应商-物料
    pub async fn supplier_products_due_for_review(
        &self,
        query: ReviewDueQuery,
    ) -> AppResult<Vec<(SupplierProduct, ReviewStatus)>> {
        let warning_days = self.inventory.review_warning_days;
        let cutoff = review_cutoff(query.as_of, warning_days)?;

        Ok(self
            .repos
            .supplier_products
            .find_due_for_review(cutoff)
            .await?
            .into_iter()
            .map(|p| {
                let status = p.review_status(query.as_of, warning_days);
                (p, status)
            })
            .filter(|(_, status)| status.needs_attention())
            .collect())
    }

    async fn load_supplier_product(&self, key: &SupplierProductKey) -> AppResult<SupplierProduct> {
        self.repos.supplier_products
            .find_by_id(key)
            .await?
            .ok_or_else(|| AppError::not_found(format!("supplier product {} not found", key)))
    }

    async fn save_supplier_product(
        &self,
        product: &mut SupplierProduct,
        operation: &'static str,
    ) -> AppResult<()> {
        product.recalculate_derived_fields();
        metrics::record_review_schedule("supplier_product", product.review_frequency());

        self.repos.supplier_products.save(product).await?;
        metrics::record_save(operation);

        info!(
            key = %product.key(),
            is_default = product.is_default(),
            next_review_due = ?product.next_review_due(),
            "Supplier product saved"
        );
        Ok(())
    }

    // ========== 批次 ==========

    /// 登记批次，初始为待检
    pub async fn register_batch(&self, cmd: RegisterBatchCommand) -> AppResult<Batch> {
        info!("Registering batch {} for item {}", cmd.batch_id, cmd.item_code);

        cmd.validate()?;
        let batch_id = BatchId::new(cmd.batch_id.as_str())?;
        let item_code = ItemCode::new(cmd.item_code.as_str())?;

        let item = self.load_item(&item_code).await?;
        let supplier_id = match non_blank(cmd.supplier_id.as_deref()) {
            Some(raw) => {
                let supplier_id = SupplierId::new(raw)?;
                self.load_supplier(&supplier_id).await?;
                Some(supplier_id)
            }
            None => None,
        };

        if self.repos.batches.exists(&batch_id).await? {
            return Err(AppError::conflict(format!("batch {} already exists", batch_id)));
        }

        let location = match non_blank(cmd.storage_location.as_deref()) {
            Some(raw) => {
                let location_id = LocationId::new(raw)?;
                self.check_placement(&item, &location_id).await?;
                Some(location_id)
            }
            None => None,
        };

        let mut batch = Batch::new(batch_id, item_code, cmd.source, cmd.quantity)
            .with_supplier(supplier_id)
            .with_batch_type(cmd.batch_type)
            .with_dates(cmd.received_on, cmd.manufactured_on, cmd.expiry_date)
            .with_storage_location(location)
            .with_notes(cmd.notes);

        batch.audit_info_mut().created_by = cmd.user_id.clone();
        batch.audit_info_mut().updated_by = cmd.user_id;

        self.repos.batches.save(&batch).await?;
        metrics::record_save("register_batch");

        info!("Batch registered: {}", batch.id());
        Ok(batch)
    }

    /// 记录批次 QA 处置
    pub async fn record_batch_disposition(
        &self,
        cmd: RecordBatchDispositionCommand,
    ) -> AppResult<Batch> {
        let batch_id = BatchId::new(cmd.batch_id.as_str())?;
        let status = cmd.qa_status.parse::<QaStatus>()?;

        let mut batch = self.load_batch(&batch_id).await?;

        batch.set_qa_status(status);
        if let Some(notes) = cmd.notes {
            batch.set_notes(notes);
        }
        batch.audit_info_mut().update(cmd.user_id);

        self.repos.batches.save(&batch).await?;
        metrics::record_save("record_batch_disposition");

        info!(batch_id = %batch.id(), qa_status = %status, "Batch disposition recorded");
        Ok(batch)
    }

    pub async fn list_batches(&self, item_code: &str) -> AppResult<Vec<Batch>> {
        let item_code = ItemCode::new(item_code)?;
        self.repos.batches.find_by_item(&item_code).await
    }

    /// 已过期或在预警窗口内到期的批次
    pub async fn expiring_batches(
        &self,
        query: ExpiringBatchesQuery,
    ) -> AppResult<Vec<(Batch, ExpiryStatus)>> {
        let InventoryConfig {
            expiry_soon_days,
            expiry_warning_days,
            ..
        } = self.inventory;
        let cutoff = review_cutoff(query.as_of, expiry_warning_days)?;

        Ok(self
            .repos
            .batches
            .find_expiring(cutoff)
            .await?
            .into_iter()
            .filter_map(|b| {
                let status = b.expiry_status(query.as_of, expiry_soon_days, expiry_warning_days)?;
                Some((b, status))
            })
            .collect())
    }

    /// 批次移库，目标库位须启用且库区接受该物料的危险类别
    pub async fn assign_batch_location(&self, cmd: AssignBatchLocationCommand) -> AppResult<Batch> {
        let batch_id = BatchId::new(cmd.batch_id.as_str())?;
        let location_id = LocationId::new(cmd.location_id.as_str())?;

        let mut batch = self.load_batch(&batch_id).await?;
        let item = self.load_item(batch.item_code()).await?;
        self.check_placement(&item, &location_id).await?;

        batch.move_to(location_id);
        batch.audit_info_mut().update(cmd.user_id);

        self.repos.batches.save(&batch).await?;
        metrics::record_save("assign_batch_location");

        info!(batch_id = %batch.id(), location = %cmd.location_id, "Batch moved");
        Ok(batch)
    }

    async fn load_batch(&self, batch_id: &BatchId) -> AppResult<Batch> {
        self.repos
            .batches
            .find_by_id(batch_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("batch {} not found", batch_id)))
    }

    // ========== 库区与库位 ==========

    /// 创建库区
    pub async fn create_storage_zone(&self, cmd: CreateStorageZoneCommand) -> AppResult<StorageZone> {
        info!("Creating storage zone: {}", cmd.zone_id);

        cmd.validate()?;
        let zone_id = StorageZoneId::new(cmd.zone_id.as_str())?;
        if self.repos.storage_zones.exists(&zone_id).await? {
            return Err(AppError::conflict(format!("storage zone {} already exists", zone_id)));
        }

        let hazard_classes = cmd
            .hazard_compatibility
            .iter()
            .map(|raw| raw.parse::<HazardClass>())
            .collect::<Result<Vec<_>, _>>()?;

        let mut zone = StorageZone::new(zone_id, cmd.zone_name.trim())
            .with_climate(cmd.temperature_range, cmd.humidity_controlled)
            .with_hazard_compatibility(hazard_classes)
            .with_default_for_category(parse_optional::<Category>(non_blank(
                cmd.default_for_category.as_deref(),
            ))?);

        zone.audit_info_mut().created_by = cmd.user_id.clone();
        zone.audit_info_mut().updated_by = cmd.user_id;

        self.repos.storage_zones.save(&zone).await?;
        metrics::record_save("create_storage_zone");

        info!(
            zone_id = %zone.id(),
            hazard_compatibility = ?zone.hazard_compatibility(),
            "Storage zone saved"
        );
        Ok(zone)
    }

    pub async fn list_storage_zones(&self) -> AppResult<Vec<StorageZone>> {
        self.repos.storage_zones.list_all().await
    }

    /// 创建库位，所属库区必须已存在
    pub async fn create_storage_location(
        &self,
        cmd: CreateStorageLocationCommand,
    ) -> AppResult<StorageLocation> {
        info!("Creating storage location {} in zone {}", cmd.location_id, cmd.zone_id);

        cmd.validate()?;
        let location_id = LocationId::new(cmd.location_id.as_str())?;
        let zone_id = StorageZoneId::new(cmd.zone_id.as_str())?;

        self.load_zone(&zone_id).await?;
        if self.repos.storage_locations.exists(&location_id).await? {
            return Err(AppError::conflict(format!(
                "storage location {} already exists",
                location_id
            )));
        }

        let mut location = StorageLocation::new(location_id, zone_id, cmd.rack_shelf.trim())
            .with_max_capacity(cmd.max_capacity);

        location.audit_info_mut().created_by = cmd.user_id.clone();
        location.audit_info_mut().updated_by = cmd.user_id;

        self.repos.storage_locations.save(&location).await?;
        metrics::record_save("create_storage_location");

        info!("Storage location saved: {}", location.id());
        Ok(location)
    }

    /// 启用或停用库位；停用库位不再接收批次
    pub async fn set_storage_location_active(
        &self,
        location_id: &str,
        active: bool,
        user_id: Option<UserId>,
    ) -> AppResult<StorageLocation> {
        let location_id = LocationId::new(location_id)?;
        let mut location = self.load_location(&location_id).await?;

        location.set_active(active);
        location.audit_info_mut().update(user_id);

        self.repos.storage_locations.save(&location).await?;
        metrics::record_save("set_storage_location_active");

        if active {
            info!("Storage location {} activated", location_id);
        } else {
            warn!("Storage location {} deactivated", location_id);
        }
        Ok(location)
    }

    pub async fn list_storage_locations(&self, zone_id: &str) -> AppResult<Vec<StorageLocation>> {
        let zone_id = StorageZoneId::new(zone_id)?;
        self.repos.storage_locations.find_by_zone(&zone_id).await
    }

    async fn load_zone(&self, zone_id: &StorageZoneId) -> AppResult<StorageZone> {
        self.repos
            .storage_zones
            .find_by_id(zone_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("storage zone {} not found", zone_id)))
    }

    async fn load_location(&self, location_id: &LocationId) -> AppResult<StorageLocation> {
        self.repos
            .storage_locations
            .find_by_id(location_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("storage location {} not found", location_id))
            })
    }

    /// 库位须启用，所属库区须接受物料的危险类别
    async fn check_placement(&self, item: &ItemRecord, location_id: &LocationId) -> AppResult<()> {
        let location = self.load_location(location_id).await?;
        if !location.is_active() {
            return Err(AppError::failed_precondition(format!(
                "storage location {} is inactive",
                location_id
            )));
        }

        let zone = self.load_zone(location.zone_id()).await?;
        if !zone.accepts(item.hazard_class()) {
            return Err(AppError::failed_precondition(format!(
                "zone {} is not compatible with {} item {}",
                zone.id(),
                item.hazard_class(),
                item.id()
            )));
        }
        Ok(())
    }

    // ========== QA 审核 ==========

    /// 登记批次 QA 审核并按结论更新批次状态
    ///
    /// 放行结论要求物料强制的 COA/SDS/规格书均已附且一致，并且各文件批号一致。
    pub async fn record_qa_review(&self, cmd: RecordQaReviewCommand) -> AppResult<QaReview> {
        info!("Recording QA review {} for batch {}", cmd.qa_review_id, cmd.batch_id);

        cmd.validate()?;
        let review_id = QaReviewId::new(cmd.qa_review_id.as_str())?;
        let batch_id = BatchId::new(cmd.batch_id.as_str())?;
        let outcome = cmd.outcome.parse::<ReviewOutcome>()?;
        let document_match = cmd.document_match.parse::<DocumentMatch>()?;

        if self.repos.qa_reviews.exists(&review_id).await? {
            return Err(AppError::conflict(format!("qa review {} already exists", review_id)));
        }

        let mut batch = self.load_batch(&batch_id).await?;
        if !batch.qa_status().awaiting_review() {
            return Err(AppError::failed_precondition(format!(
                "batch {} is already {}",
                batch_id,
                batch.qa_status()
            )));
        }
        let item = self.load_item(batch.item_code()).await?;

        let documents = DocumentChecks {
            coa: DocumentCheck::new(cmd.coa_attached, cmd.coa_match),
            sds: DocumentCheck::new(cmd.sds_attached, cmd.sds_match),
            spec: DocumentCheck::new(cmd.spec_attached, cmd.spec_match),
        };
        let mut review = QaReview::new(
            review_id,
            batch_id,
            batch.item_code().clone(),
            outcome,
            cmd.review_date,
        )
        .with_supplier(batch.supplier_id().cloned())
        .with_documents(documents, cmd.label_attached, document_match)
        .with_reviewer(cmd.reviewer.trim())
        .with_file_link(cmd.qa_file_link)
        .with_comments(cmd.comments);

        review.evaluate_documents(&item.derived().documents());
        review.ensure_outcome_supported()?;

        review.audit_info_mut().created_by = cmd.user_id.clone();
        review.audit_info_mut().updated_by = cmd.user_id.clone();
        self.repos.qa_reviews.save(&review).await?;

        batch.set_qa_status(review.resulting_qa_status());
        batch.audit_info_mut().update(cmd.user_id);
        self.repos.batches.save(&batch).await?;

        metrics::record_qa_review(outcome);
        metrics::record_save("record_qa_review");

        if !review.document_gaps().is_empty() {
            warn!(
                qa_review_id = %review.id(),
                gaps = %join_kinds(review.document_gaps()),
                "QA review recorded with document gaps"
            );
        }
        info!(
            qa_review_id = %review.id(),
            batch_id = %batch.id(),
            outcome = %outcome,
            qa_status = %batch.qa_status(),
            "QA review saved"
        );
        Ok(review)
    }

    pub async fn list_qa_reviews(&self, batch_id: &str) -> AppResult<Vec<QaReview>> {
        let batch_id = BatchId::new(batch_id)?;
        self.repos.qa_reviews.find_by_batch(&batch_id).await
    }

    // ========== 库存事务 ==========

    /// 登记库存事务
    ///
    /// 移库 (`XFER`) 同时更新批次库位；收货缺少强制文件时记录告警但不拒绝。
    pub async fn record_transaction(
        &self,
        cmd: RecordTransactionCommand,
    ) -> AppResult<InventoryTransaction> {
        info!("Recording {} transaction {}", cmd.transaction_type, cmd.transaction_id);

        cmd.validate()?;
        let transaction_id = TransactionId::new(cmd.transaction_id.as_str())?;
        let transaction_type = cmd.transaction_type.parse::<TransactionType>()?;
        let item_code = ItemCode::new(cmd.item_code.as_str())?;

        if cmd.quantity.is_sign_negative() && transaction_type.stock_effect() != StockEffect::Signed {
            return Err(AppError::validation(format!(
                "{} quantity must not be negative",
                transaction_type
            )));
        }
        if self.repos.transactions.exists(&transaction_id).await? {
            return Err(AppError::conflict(format!(
                "transaction {} already exists",
                transaction_id
            )));
        }

        let item = self.load_item(&item_code).await?;

        let mut batch = match non_blank(cmd.batch_id.as_deref()) {
            Some(raw) => {
                let batch = self.load_batch(&BatchId::new(raw)?).await?;
                if batch.item_code() != &item_code {
                    return Err(AppError::validation(format!(
                        "batch {} belongs to item {}",
                        batch.id(),
                        batch.item_code()
                    )));
                }
                Some(batch)
            }
            None => None,
        };
        let supplier_id = match non_blank(cmd.supplier_id.as_deref()) {
            Some(raw) => {
                let supplier_id = SupplierId::new(raw)?;
                self.load_supplier(&supplier_id).await?;
                Some(supplier_id)
            }
            None => None,
        };
        let location = match non_blank(cmd.storage_location.as_deref()) {
            Some(raw) => {
                let location_id = LocationId::new(raw)?;
                self.load_location(&location_id).await?;
                Some(location_id)
            }
            None => None,
        };
        let qa_review_id = match non_blank(cmd.qa_review_id.as_deref()) {
            Some(raw) => {
                let review_id = QaReviewId::new(raw)?;
                if !self.repos.qa_reviews.exists(&review_id).await? {
                    return Err(AppError::not_found(format!("qa review {} not found", review_id)));
                }
                Some(review_id)
            }
            None => None,
        };
        let unit = parse_optional::<UnitOfMeasure>(non_blank(cmd.unit.as_deref()))?
            .unwrap_or(item.unit_of_measure());

        let is_transfer = transaction_type == TransactionType::Transfer;
        if is_transfer {
            let (Some(batch), Some(location_id)) = (batch.as_mut(), location.as_ref()) else {
                return Err(AppError::validation("transfer requires batch and storage location"));
            };
            self.check_placement(&item, location_id).await?;
            batch.move_to(location_id.clone());
            batch.audit_info_mut().update(cmd.user_id.clone());
        }

        let mut transaction = InventoryTransaction::new(
            transaction_id,
            cmd.occurred_at,
            transaction_type,
            item_code,
            cmd.quantity,
            unit,
        )
        .with_user(cmd.user.trim())
        .with_batch(batch.as_ref().map(|b| b.batch_id().clone()))
        .with_supplier(supplier_id, cmd.product_code)
        .with_documents(cmd.coa_provided, cmd.sds_provided, cmd.label_applied)
        .with_storage_location(location)
        .with_qa(batch.as_ref().map(Batch::qa_status), qa_review_id)
        .with_comments(cmd.comments);

        transaction.audit_info_mut().created_by = cmd.user_id.clone();
        transaction.audit_info_mut().updated_by = cmd.user_id;

        let missing = transaction.missing_documents(&item.derived().documents());
        if !missing.is_empty() {
            warn!(
                transaction_id = %transaction.id(),
                item_code = %item.id(),
                missing = %join_kinds(&missing),
                "Receipt without mandatory documents"
            );
        }

        self.repos.transactions.save(&transaction).await?;
        if let (true, Some(batch)) = (is_transfer, &batch) {
            self.repos.batches.save(batch).await?;
        }
        metrics::record_transaction(transaction_type);
        metrics::record_save("record_transaction");

        info!(
            transaction_id = %transaction.id(),
            transaction_type = %transaction_type,
            item_code = %transaction.item_code(),
            quantity = %transaction.signed_quantity(),
            "Transaction recorded"
        );
        Ok(transaction)
    }

    pub async fn list_transactions(&self, item_code: &str) -> AppResult<Vec<InventoryTransaction>> {
        let item_code = ItemCode::new(item_code)?;
        self.repos.transactions.find_by_item(&item_code).await
    }

    /// 按事务流水累计的在库数量
    pub async fn stock_on_hand(&self, item_code: &str) -> AppResult<Decimal> {
        Ok(self
            .list_transactions(item_code)
            .await?
            .iter()
            .map(InventoryTransaction::signed_quantity)
            .sum())
    }

    pub fn inventory(&self) -> &InventoryConfig {
        &self.inventory
    }
}

/// 空白视为未填写
fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn join_kinds(kinds: &[DocumentKind]) -> String {
    kinds.iter().map(DocumentKind::code).collect::<Vec<_>>().join(", ")
}

/// 解析可选的枚举编码
fn parse_optional<T>(raw: Option<&str>) -> AppResult<Option<T>>
where
    T: FromStr<Err = UnknownChoice>,
{
    raw.map(str::parse::<T>).transpose().map_err(AppError::from)
}

/// 空串表示不排期
fn parse_frequency(raw: &str) -> AppResult<Option<ReviewFrequency>> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(raw.parse::<ReviewFrequency>()?))
    }
}

fn review_cutoff(as_of: chrono::NaiveDate, days: u32) -> AppResult<chrono::NaiveDate> {
    as_of
        .checked_add_days(chrono::Days::new(u64::from(days)))
        .ok_or_else(|| AppError::validation(format!("date out of range: {} + {} days", as_of, days)))
}
