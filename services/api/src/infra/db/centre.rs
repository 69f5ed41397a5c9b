use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use cgcs_api_schema::{budgets, centres, users};
use cgcs_core::sea_ext::SearchExt as _;
use cgcs_domain::pagination::PageRequest;

use crate::domain::repository::CentreRepository;
use crate::domain::types::{Centre, CentreFilter};
use crate::error::ApiError;

use super::{code_conflict, write_error};

#[derive(Clone)]
pub struct DbCentreRepository {
    pub db: DatabaseConnection,
}

impl CentreRepository for DbCentreRepository {
    async fn list(&self, filter: &CentreFilter, page: PageRequest) -> Result<Vec<Centre>, ApiError> {
        let mut query = centres::Entity::find().search(
            &[
                centres::Column::Code,
                centres::Column::Nom,
                centres::Column::Ville,
            ],
            filter.search.as_deref(),
        );
        if let Some(region) = &filter.region {
            query = query.filter(centres::Column::Region.eq(region.as_str()));
        }
        if let Some(regisseur_id) = filter.regisseur_id {
            query = query.filter(centres::Column::RegisseurId.eq(regisseur_id));
        }
        if let Some(active) = filter.active {
            query = query.filter(centres::Column::Active.eq(active));
        }
        let models = query
            .order_by_asc(centres::Column::Code)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list centres")?;
        Ok(models.into_iter().map(centre_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Centre>, ApiError> {
        let model = centres::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find centre by id")?;
        Ok(model.map(centre_from_model))
    }

    async fn create(&self, centre: &Centre) -> Result<(), ApiError> {
        active_model(centre)
            .insert(&self.db)
            .await
            .map_err(|err| write_error(err, "create centre", code_conflict))?;
        Ok(())
    }

    async fn update(&self, centre: &Centre) -> Result<(), ApiError> {
        let mut am = active_model(centre);
        am.created_at = sea_orm::ActiveValue::NotSet;
        am.update(&self.db)
            .await
            .map_err(|err| write_error(err, "update centre", code_conflict))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let res = centres::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|err| write_error(err, "delete centre", code_conflict))?;
        Ok(res.rows_affected > 0)
    }

    async fn is_referenced(&self, id: Uuid) -> Result<bool, ApiError> {
        let users = users::Entity::find()
            .filter(users::Column::CentreId.eq(id))
            .count(&self.db)
            .await
            .context("count users of centre")?;
        if users > 0 {
            return Ok(true);
        }
        let budgets = budgets::Entity::find()
            .filter(budgets::Column::CentreId.eq(id))
            .count(&self.db)
            .await
            .context("count budgets of centre")?;
        Ok(budgets > 0)
    }
}

fn active_model(centre: &Centre) -> centres::ActiveModel {
    centres::ActiveModel {
        id: Set(centre.id),
        code: Set(centre.code.clone()),
        nom: Set(centre.nom.clone()),
        adresse: Set(centre.adresse.clone()),
        ville: Set(centre.ville.clone()),
        commune: Set(centre.commune.clone()),
        departement: Set(centre.departement.clone()),
        region: Set(centre.region.clone()),
        type_centre: Set(centre.type_centre.clone()),
        niveau: Set(centre.niveau.clone()),
        telephone: Set(centre.telephone.clone()),
        active: Set(centre.active),
        regisseur_id: Set(centre.regisseur_id),
        created_at: Set(centre.created_at),
        updated_at: Set(centre.updated_at),
    }
}

fn centre_from_model(model: centres::Model) -> Centre {
    Centre {
        id: model.id,
        code: model.code,
        nom: model.nom,
        adresse: model.adresse,
        ville: model.ville,
        commune: model.commune,
        departement: model.departement,
        region: model.region,
        type_centre: model.type_centre,
        niveau: model.niveau,
        telephone: model.telephone,
        active: model.active,
        regisseur_id: model.regisseur_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
