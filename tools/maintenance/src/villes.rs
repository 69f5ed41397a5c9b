//! Administrative divisions import.

use std::collections::HashSet;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait, Set, TransactionTrait};
use uuid::Uuid;

use cgcs_api_schema::divisions_administratives;
use cgcs_domain::division::DivisionKey;

use crate::header::{ColumnMap, FieldSpec};
use crate::sheet::{Table, is_blank};

const INSERT_CHUNK: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Field {
    Region,
    Departement,
    ChefLieu,
    SousPrefecture,
    Commune,
    Code,
}

const FIELDS: &[FieldSpec<Field>] = &[
    FieldSpec {
        field: Field::Region,
        candidates: &["region", "district"],
    },
    FieldSpec {
        field: Field::Departement,
        candidates: &["departement", "dept"],
    },
    FieldSpec {
        field: Field::ChefLieu,
        candidates: &["chef lieu", "chef lieu de departement", "chef lieu departement"],
    },
    FieldSpec {
        field: Field::SousPrefecture,
        candidates: &["sous prefecture", "sous prefectures", "sp"],
    },
    FieldSpec {
        field: Field::Commune,
        candidates: &["commune", "ville", "localite", "communes"],
    },
    FieldSpec {
        field: Field::Code,
        candidates: &["code", "code commune"],
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct DivisionRecord {
    pub region: String,
    pub departement: String,
    pub chef_lieu: String,
    pub sous_prefecture: String,
    pub commune: String,
    pub code: Option<String>,
}

impl DivisionRecord {
    fn key(&self) -> DivisionKey {
        DivisionKey::new(
            &self.region,
            &self.departement,
            &self.chef_lieu,
            &self.sous_prefecture,
            &self.commune,
        )
    }
}

/// Map worksheet rows to divisions. Rows without a région or a commune, and
/// rows repeating an earlier row's key, are skipped.
pub fn parse(table: &Table) -> Result<Vec<DivisionRecord>> {
    let columns = ColumnMap::resolve(&table.headers, FIELDS);
    for required in [Field::Region, Field::Commune] {
        if columns.column(required).is_none() {
            bail!(
                "no {required:?} column among headers {:?}",
                table.headers
            );
        }
    }

    let text = |row: &[String], field| columns.cell(row, field).unwrap_or_default().to_owned();
    let mut seen = HashSet::new();
    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in table.rows.iter().map(Vec::as_slice).filter(|row| !is_blank(row)) {
        let record = DivisionRecord {
            region: text(row, Field::Region),
            departement: text(row, Field::Departement),
            chef_lieu: text(row, Field::ChefLieu),
            sous_prefecture: text(row, Field::SousPrefecture),
            commune: text(row, Field::Commune),
            code: columns.cell(row, Field::Code).map(str::to_owned),
        };
        if record.region.is_empty() || record.commune.is_empty() || !seen.insert(record.key()) {
            skipped += 1;
            continue;
        }
        records.push(record);
    }
    if skipped > 0 {
        tracing::info!(skipped, "rows skipped");
    }
    Ok(records)
}

/// Replace the whole `divisions_administratives` table with `records`, atomically.
pub async fn replace_all(db: &DatabaseConnection, records: Vec<DivisionRecord>) -> Result<u64> {
    let count = records.len() as u64;
    db.transaction::<_, (), sea_orm::DbErr>(|txn| {
        Box::pin(async move {
            divisions_administratives::Entity::delete_many()
                .exec(txn)
                .await?;
            let now = Utc::now();
            for chunk in records.chunks(INSERT_CHUNK) {
                divisions_administratives::Entity::insert_many(
                    chunk.iter().map(|record| active_model(record, now)),
                )
                .exec(txn)
                .await?;
            }
            Ok(())
        })
    })
    .await
    .context("reload divisions_administratives")?;
    Ok(count)
}

fn active_model(
    record: &DivisionRecord,
    now: chrono::DateTime<Utc>,
) -> divisions_administratives::ActiveModel {
    divisions_administratives::ActiveModel {
        id: Set(Uuid::now_v7()),
        region: Set(record.region.clone()),
        departement: Set(record.departement.clone()),
        chef_lieu: Set(record.chef_lieu.clone()),
        sous_prefecture: Set(record.sous_prefecture.clone()),
        commune: Set(record.commune.clone()),
        code: Set(record.code.clone()),
        cle: Set(record.key().stored()),
        active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
}
