use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use cgcs_api_schema::divisions_administratives::{self, Column};
use cgcs_core::sea_ext::SearchExt as _;
use cgcs_domain::division::DivisionKey;
use cgcs_domain::pagination::PageRequest;

use crate::domain::repository::DivisionRepository;
use crate::domain::types::{Division, DivisionFilter};
use crate::error::ApiError;

use super::write_error;

#[derive(Clone)]
pub struct DbDivisionRepository {
    pub db: DatabaseConnection,
}

fn stored_key(division: &Division) -> String {
    DivisionKey::new(
        &division.region,
        &division.departement,
        &division.chef_lieu,
        &division.sous_prefecture,
        &division.commune,
    )
    .stored()
}

/// The only unique key on divisions is `cle`.
fn division_conflict(_: &str) -> ApiError {
    ApiError::DivisionAlreadyExists
}

impl DivisionRepository for DbDivisionRepository {
    async fn list(
        &self,
        filter: &DivisionFilter,
        page: PageRequest,
    ) -> Result<Vec<Division>, ApiError> {
        let mut query = divisions_administratives::Entity::find()
            .search(&[Column::Commune, Column::ChefLieu], filter.search.as_deref());
        if let Some(region) = &filter.region {
            query = query.filter(Column::Region.eq(region.as_str()));
        }
        if let Some(departement) = &filter.departement {
            query = query.filter(Column::Departement.eq(departement.as_str()));
        }
        if let Some(sous_prefecture) = &filter.sous_prefecture {
            query = query.filter(Column::SousPrefecture.eq(sous_prefecture.as_str()));
        }
        if let Some(active) = filter.active {
            query = query.filter(Column::Active.eq(active));
        }
        let models = query
            .order_by_asc(Column::Region)
            .order_by_asc(Column::Departement)
            .order_by_asc(Column::Commune)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list divisions")?;
        Ok(models.into_iter().map(division_from_model).collect())
    }

    async fn regions(&self) -> Result<Vec<String>, ApiError> {
        let regions: Vec<String> = divisions_administratives::Entity::find()
            .select_only()
            .column(Column::Region)
            .distinct()
            .order_by_asc(Column::Region)
            .into_tuple()
            .all(&self.db)
            .await
            .context("list division regions")?;
        Ok(regions)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Division>, ApiError> {
        let model = divisions_administratives::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find division by id")?;
        Ok(model.map(division_from_model))
    }

    async fn find_by_key(&self, key: &DivisionKey) -> Result<Option<Division>, ApiError> {
        let model = divisions_administratives::Entity::find()
            .filter(Column::Cle.eq(key.stored()))
            .one(&self.db)
            .await
            .context("find division by key")?;
        Ok(model.map(division_from_model))
    }

    async fn create(&self, division: &Division) -> Result<(), ApiError> {
        divisions_administratives::ActiveModel {
            id: Set(division.id),
            region: Set(division.region.clone()),
            departement: Set(division.departement.clone()),
            chef_lieu: Set(division.chef_lieu.clone()),
            sous_prefecture: Set(division.sous_prefecture.clone()),
            commune: Set(division.commune.clone()),
            code: Set(division.code.clone()),
            cle: Set(stored_key(division)),
            active: Set(division.active),
            created_at: Set(division.created_at),
            updated_at: Set(division.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|err| write_error(err, "create division", division_conflict))?;
        Ok(())
    }

    async fn update(&self, division: &Division) -> Result<(), ApiError> {
        divisions_administratives::ActiveModel {
            id: Set(division.id),
            region: Set(division.region.clone()),
            departement: Set(division.departement.clone()),
            chef_lieu: Set(division.chef_lieu.clone()),
            sous_prefecture: Set(division.sous_prefecture.clone()),
            commune: Set(division.commune.clone()),
            code: Set(division.code.clone()),
            cle: Set(stored_key(division)),
            active: Set(division.active),
            updated_at: Set(division.updated_at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|err| write_error(err, "update division", division_conflict))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let res = divisions_administratives::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete division")?;
        Ok(res.rows_affected > 0)
    }
}

fn division_from_model(model: divisions_administratives::Model) -> Division {
    Division {
        id: model.id,
        region: model.region,
        departement: model.departement,
        chef_lieu: model.chef_lieu,
        sous_prefecture: model.sous_prefecture,
        commune: model.commune,
        code: model.code,
        active: model.active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
