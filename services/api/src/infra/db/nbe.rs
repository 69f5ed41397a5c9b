use anyhow::Context as _;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use cgcs_api_schema::nbe_lines;
use cgcs_core::sea_ext::SearchExt as _;
use cgcs_domain::pagination::PageRequest;

use crate::domain::repository::NbeRepository;
use crate::domain::types::{NbeFilter, NbeLine};
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbNbeRepository {
    pub db: DatabaseConnection,
}

impl NbeRepository for DbNbeRepository {
    async fn list(&self, filter: &NbeFilter, page: PageRequest) -> Result<Vec<NbeLine>, ApiError> {
        let mut query = nbe_lines::Entity::find().search(
            &[nbe_lines::Column::Ligne, nbe_lines::Column::Libelle],
            filter.search.as_deref(),
        );
        if let Some(categorie) = &filter.categorie {
            query = query.filter(nbe_lines::Column::Categorie.eq(categorie.as_str()));
        }
        let models = query
            .order_by_asc(nbe_lines::Column::Ordre)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list nbe lines")?;
        Ok(models
            .into_iter()
            .map(|model| NbeLine {
                id: model.id,
                ligne: model.ligne,
                libelle: model.libelle,
                objet_depense: model.objet_depense,
                categorie: model.categorie,
                sous_categorie: model.sous_categorie,
                is_header: model.is_header,
                is_highlighted: model.is_highlighted,
                ordre: model.ordre,
            })
            .collect())
    }
}
