use cgcs_domain::pagination::PageRequest;

use crate::domain::repository::NbeRepository;
use crate::domain::types::{NbeFilter, NbeLine};
use crate::error::ApiError;

// ── ListNbeLines ─────────────────────────────────────────────────────────────

pub struct ListNbeLinesUseCase<N: NbeRepository> {
    pub nbe: N,
}

impl<N: NbeRepository> ListNbeLinesUseCase<N> {
    /// Lines in nomenclature order.
    pub async fn execute(
        &self,
        filter: NbeFilter,
        page: PageRequest,
    ) -> Result<Vec<NbeLine>, ApiError> {
        self.nbe.list(&filter, page.clamped()).await
    }
}
