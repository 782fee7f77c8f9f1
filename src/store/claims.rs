//! Claim-centric lookups shared by the tool handlers.

use super::{EntityStore, StoreError};
use crate::entity::{ClaimRecord, InspectionRecord, PurchaseOrderRecord};
use crate::table::TableStore;

impl<T: TableStore> EntityStore<T> {
    /// The first claim whose claim number equals `claim_number`.
    pub async fn claim_by_number(
        &self,
        claim_number: &str,
    ) -> Result<Option<ClaimRecord>, StoreError> {
        Ok(self
            .list_all::<ClaimRecord>()
            .await?
            .into_iter()
            .find(|claim| claim.claim_number == claim_number))
    }

    /// Resolve a claim by key, falling back to a claim-number scan.
    pub async fn resolve_claim(&self, key_or_number: &str) -> Result<Option<ClaimRecord>, StoreError> {
        if let Some(claim) = self.get_by_key::<ClaimRecord>(key_or_number).await? {
            return Ok(Some(claim));
        }
        self.claim_by_number(key_or_number).await
    }

    /// Inspections whose `claimId` is the given claim key.
    pub async fn inspections_for_claim(
        &self,
        claim_id: &str,
    ) -> Result<Vec<InspectionRecord>, StoreError> {
        let mut inspections = self.list_all::<InspectionRecord>().await?;
        inspections.retain(|inspection| inspection.claim_id == claim_id);
        Ok(inspections)
    }

    /// Purchase orders whose `claimId` is the given claim key.
    pub async fn purchase_orders_for_claim(
        &self,
        claim_id: &str,
    ) -> Result<Vec<PurchaseOrderRecord>, StoreError> {
        let mut orders = self.list_all::<PurchaseOrderRecord>().await?;
        orders.retain(|order| order.claim_id == claim_id);
        Ok(orders)
    }
}
