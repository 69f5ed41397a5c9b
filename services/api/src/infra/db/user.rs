use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, sea_query::Expr,
};
use uuid::Uuid;

use cgcs_api_schema::{budgets, users};
use cgcs_core::sea_ext::SearchExt as _;
use cgcs_domain::pagination::PageRequest;
use cgcs_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{ChefCentreFilter, User};
use crate::error::ApiError;

use super::write_error;

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            nom: Set(user.nom.clone()),
            prenom: Set(user.prenom.clone()),
            role: Set(user.role.as_str().to_owned()),
            status: Set(user.status.as_str().to_owned()),
            code: Set(user.code.clone()),
            telephone: Set(user.telephone.clone()),
            centre_id: Set(user.centre_id),
            regisseur_id: Set(user.regisseur_id),
            must_change_password: Set(user.must_change_password),
            last_login_at: Set(user.last_login_at),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|err| write_error(err, "create user", user_conflict))?;
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            nom: Set(user.nom.clone()),
            prenom: Set(user.prenom.clone()),
            role: Set(user.role.as_str().to_owned()),
            status: Set(user.status.as_str().to_owned()),
            code: Set(user.code.clone()),
            telephone: Set(user.telephone.clone()),
            centre_id: Set(user.centre_id),
            regisseur_id: Set(user.regisseur_id),
            must_change_password: Set(user.must_change_password),
            updated_at: Set(user.updated_at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|err| write_error(err, "update user", user_conflict))?;
        Ok(())
    }

    async fn set_password(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            must_change_password: Set(false),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set user password")?;
        Ok(())
    }

    async fn touch_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(id),
            last_login_at: Set(Some(at)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("touch user last login")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let res = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|err| write_error(err, "delete user", user_conflict))?;
        Ok(res.rows_affected > 0)
    }

    async fn list_chefs(
        &self,
        filter: &ChefCentreFilter,
        page: PageRequest,
    ) -> Result<Vec<User>, ApiError> {
        let mut query = users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::ChefCentre.as_str()))
            .search(
                &[
                    users::Column::Nom,
                    users::Column::Prenom,
                    users::Column::Email,
                ],
                filter.search.as_deref(),
            );
        if let Some(centre_id) = filter.centre_id {
            query = query.filter(users::Column::CentreId.eq(centre_id));
        }
        if let Some(regisseur_id) = filter.regisseur_id {
            query = query.filter(users::Column::RegisseurId.eq(regisseur_id));
        }
        let models = query
            .order_by_asc(users::Column::Nom)
            .order_by_asc(users::Column::Prenom)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list chefs de centre")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn find_chef_of_centre(&self, centre_id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::ChefCentre.as_str()))
            .filter(users::Column::CentreId.eq(centre_id))
            .one(&self.db)
            .await
            .context("find chef of centre")?;
        model.map(user_from_model).transpose()
    }

    async fn follow_centre_regisseur(
        &self,
        centre_id: Uuid,
        regisseur_id: Uuid,
    ) -> Result<(), ApiError> {
        users::Entity::update_many()
            .col_expr(users::Column::RegisseurId, Expr::value(regisseur_id))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::CentreId.eq(centre_id))
            .exec(&self.db)
            .await
            .context("follow centre regisseur")?;
        Ok(())
    }

    async fn has_created_budgets(&self, id: Uuid) -> Result<bool, ApiError> {
        let count = budgets::Entity::find()
            .filter(budgets::Column::CreePar.eq(id))
            .count(&self.db)
            .await
            .context("count budgets created by user")?;
        Ok(count > 0)
    }
}

/// Unique violations on `users`: the email or code keys, or the partial
/// index allowing one chef de centre per centre.
fn user_conflict(message: &str) -> ApiError {
    if message.contains("users_one_chef_per_centre") {
        ApiError::CentreAlreadyHasChef
    } else if message.contains("email") {
        ApiError::EmailAlreadyExists
    } else {
        ApiError::CodeAlreadyExists
    }
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    Ok(User {
        id: model.id,
        role: model.role.parse().context("parse user role")?,
        status: model.status.parse().context("parse user status")?,
        email: model.email,
        password_hash: model.password_hash,
        nom: model.nom,
        prenom: model.prenom,
        code: model.code,
        telephone: model.telephone,
        centre_id: model.centre_id,
        regisseur_id: model.regisseur_id,
        must_change_password: model.must_change_password,
        last_login_at: model.last_login_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
