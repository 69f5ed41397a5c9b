//! Duplicate administrative division cleanup.

use std::collections::HashSet;

use anyhow::{Context, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use cgcs_api_schema::divisions_administratives;
use cgcs_domain::division::DivisionKey;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DedupReport {
    pub scanned: usize,
    /// Keys shared by more than one row.
    pub duplicated_keys: usize,
    pub removed: usize,
}

/// Ids to delete so that one row per key survives. `rows` must be ordered
/// oldest first; the first row of each key is kept.
pub fn redundant_ids(rows: &[(Uuid, DivisionKey)]) -> (Vec<Uuid>, usize) {
    let mut kept = HashSet::new();
    let mut duplicated = HashSet::new();
    let mut redundant = Vec::new();
    for (id, key) in rows {
        if !kept.insert(key) {
            duplicated.insert(key);
            redundant.push(*id);
        }
    }
    (redundant, duplicated.len())
}

pub async fn run(db: &DatabaseConnection, batch_size: usize, dry_run: bool) -> Result<DedupReport> {
    let rows: Vec<(Uuid, DivisionKey)> = divisions_administratives::Entity::find()
        .order_by_asc(divisions_administratives::Column::CreatedAt)
        .order_by_asc(divisions_administratives::Column::Id)
        .all(db)
        .await
        .context("load divisions")?
        .into_iter()
        .map(|m| {
            let key = DivisionKey::new(
                &m.region,
                &m.departement,
                &m.chef_lieu,
                &m.sous_prefecture,
                &m.commune,
            );
            (m.id, key)
        })
        .collect();

    let (redundant, duplicated_keys) = redundant_ids(&rows);
    let mut report = DedupReport {
        scanned: rows.len(),
        duplicated_keys,
        removed: 0,
    };
    if dry_run {
        tracing::info!(
            scanned = report.scanned,
            duplicated_keys,
            would_remove = redundant.len(),
            "dry run, nothing deleted"
        );
        return Ok(report);
    }

    for batch in redundant.chunks(batch_size.max(1)) {
        let result = divisions_administratives::Entity::delete_many()
            .filter(divisions_administratives::Column::Id.is_in(batch.iter().copied()))
            .exec(db)
            .await
            .context("delete duplicate divisions")?;
        report.removed += result.rows_affected as usize;
        tracing::info!(removed = report.removed, total = redundant.len(), "batch deleted");
    }
    Ok(report)
}
