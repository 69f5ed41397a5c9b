use cgcs_domain::pagination::PageRequest;

use crate::domain::repository::AuditRepository;
use crate::domain::types::{AuditAction, AuditFilter};
use crate::error::ApiError;

// ── ListAuditActions ─────────────────────────────────────────────────────────

pub struct ListAuditActionsUseCase<A: AuditRepository> {
    pub audit: A,
}

impl<A: AuditRepository> ListAuditActionsUseCase<A> {
    pub async fn execute(
        &self,
        filter: AuditFilter,
        page: PageRequest,
    ) -> Result<Vec<AuditAction>, ApiError> {
        self.audit.list(&filter, page.clamped()).await
    }
}
