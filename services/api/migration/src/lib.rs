use sea_orm_migration::prelude::*;

mod m20251001_000001_create_regisseurs;
mod m20251001_000002_create_centres;
mod m20251001_000003_create_users;
mod m20251001_000004_create_budgets;
mod m20251001_000005_create_lignes_budgetaires;
mod m20251001_000006_create_correspondances_activites;
mod m20251001_000007_create_sources_recettes;
mod m20251001_000008_create_nbe_lines;
mod m20251001_000009_create_divisions_administratives;
mod m20251001_000010_create_audit_actions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_regisseurs::Migration),
            Box::new(m20251001_000002_create_centres::Migration),
            Box::new(m20251001_000003_create_users::Migration),
            Box::new(m20251001_000004_create_budgets::Migration),
            Box::new(m20251001_000005_create_lignes_budgetaires::Migration),
            Box::new(m20251001_000006_create_correspondances_activites::Migration),
            Box::new(m20251001_000007_create_sources_recettes::Migration),
            Box::new(m20251001_000008_create_nbe_lines::Migration),
            Box::new(m20251001_000009_create_divisions_administratives::Migration),
            Box::new(m20251001_000010_create_audit_actions::Migration),
        ]
    }
}
