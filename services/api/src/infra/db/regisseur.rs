use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use cgcs_api_schema::{centres, regisseurs, users};
use cgcs_core::sea_ext::SearchExt as _;
use cgcs_domain::pagination::PageRequest;

use crate::domain::repository::RegisseurRepository;
use crate::domain::types::{Regisseur, RegisseurFilter};
use crate::error::ApiError;

use super::{code_conflict, write_error};

#[derive(Clone)]
pub struct DbRegisseurRepository {
    pub db: DatabaseConnection,
}

impl RegisseurRepository for DbRegisseurRepository {
    async fn list(
        &self,
        filter: &RegisseurFilter,
        page: PageRequest,
    ) -> Result<Vec<Regisseur>, ApiError> {
        let mut query = regisseurs::Entity::find().search(
            &[
                regisseurs::Column::Code,
                regisseurs::Column::Nom,
                regisseurs::Column::Prenom,
            ],
            filter.search.as_deref(),
        );
        if let Some(region) = &filter.region {
            query = query.filter(regisseurs::Column::Region.eq(region.as_str()));
        }
        if let Some(active) = filter.active {
            query = query.filter(regisseurs::Column::Active.eq(active));
        }
        let models = query
            .order_by_asc(regisseurs::Column::Code)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list regisseurs")?;
        Ok(models.into_iter().map(regisseur_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Regisseur>, ApiError> {
        let model = regisseurs::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find regisseur by id")?;
        Ok(model.map(regisseur_from_model))
    }

    async fn create(&self, regisseur: &Regisseur) -> Result<(), ApiError> {
        regisseurs::ActiveModel {
            id: Set(regisseur.id),
            code: Set(regisseur.code.clone()),
            nom: Set(regisseur.nom.clone()),
            prenom: Set(regisseur.prenom.clone()),
            email: Set(regisseur.email.clone()),
            telephone: Set(regisseur.telephone.clone()),
            region: Set(regisseur.region.clone()),
            active: Set(regisseur.active),
            created_at: Set(regisseur.created_at),
            updated_at: Set(regisseur.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|err| write_error(err, "create regisseur", code_conflict))?;
        Ok(())
    }

    async fn update(&self, regisseur: &Regisseur) -> Result<(), ApiError> {
        regisseurs::ActiveModel {
            id: Set(regisseur.id),
            code: Set(regisseur.code.clone()),
            nom: Set(regisseur.nom.clone()),
            prenom: Set(regisseur.prenom.clone()),
            email: Set(regisseur.email.clone()),
            telephone: Set(regisseur.telephone.clone()),
            region: Set(regisseur.region.clone()),
            active: Set(regisseur.active),
            updated_at: Set(regisseur.updated_at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|err| write_error(err, "update regisseur", code_conflict))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let res = regisseurs::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|err| write_error(err, "delete regisseur", code_conflict))?;
        Ok(res.rows_affected > 0)
    }

    async fn count_centres(&self, id: Uuid) -> Result<u64, ApiError> {
        let count = centres::Entity::find()
            .filter(centres::Column::RegisseurId.eq(id))
            .count(&self.db)
            .await
            .context("count centres of regisseur")?;
        Ok(count)
    }

    async fn is_referenced(&self, id: Uuid) -> Result<bool, ApiError> {
        if self.count_centres(id).await? > 0 {
            return Ok(true);
        }
        let users = users::Entity::find()
            .filter(users::Column::RegisseurId.eq(id))
            .count(&self.db)
            .await
            .context("count users of regisseur")?;
        Ok(users > 0)
    }
}

fn regisseur_from_model(model: regisseurs::Model) -> Regisseur {
    Regisseur {
        id: model.id,
        code: model.code,
        nom: model.nom,
        prenom: model.prenom,
        email: model.email,
        telephone: model.telephone,
        region: model.region,
        active: model.active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
