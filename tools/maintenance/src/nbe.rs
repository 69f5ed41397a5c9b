//! NBE nomenclature import.

use anyhow::{Context, Result, bail};
use sea_orm::{DatabaseConnection, EntityTrait, Set, TransactionTrait};
use uuid::Uuid;

use cgcs_api_schema::nbe_lines;

use crate::header::{ColumnMap, FieldSpec};
use crate::sheet::{Table, is_blank};

const INSERT_CHUNK: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Field {
    Ligne,
    Libelle,
    ObjetDepense,
    SousCategorie,
    Categorie,
}

const FIELDS: &[FieldSpec<Field>] = &[
    FieldSpec {
        field: Field::Ligne,
        candidates: &["ligne", "code", "n ligne", "numero", "code ligne"],
    },
    FieldSpec {
        field: Field::Libelle,
        candidates: &["libelle", "intitule", "designation", "libelle ligne"],
    },
    FieldSpec {
        field: Field::ObjetDepense,
        candidates: &["objet de depense", "objet depense", "objet"],
    },
    FieldSpec {
        field: Field::SousCategorie,
        candidates: &["sous categorie", "sous rubrique"],
    },
    FieldSpec {
        field: Field::Categorie,
        candidates: &["categorie", "rubrique", "nature"],
    },
];

/// A parsed nomenclature row, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NbeRecord {
    pub ligne: Option<String>,
    pub libelle: String,
    pub objet_depense: Option<String>,
    pub categorie: Option<String>,
    pub sous_categorie: Option<String>,
    pub is_header: bool,
    pub is_highlighted: bool,
    pub ordre: i32,
}

/// Split a leading numeric code off `text`: `"6011 - Fournitures"` gives
/// `("6011", "Fournitures")`. Dotted codes such as `"60.11"` are kept whole.
pub fn split_leading_code(text: &str) -> Option<(&str, &str)> {
    let text = text.trim();
    let end = text
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let code = text[..end].trim_end_matches('.');
    if !code.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let rest = &text[end..];
    // "6011abc" is not a code followed by a label.
    if rest.starts_with(|c: char| c.is_alphanumeric()) {
        return None;
    }
    let label = rest.trim_start_matches(|c: char| c.is_whitespace() || "-:).".contains(c));
    Some((code, label.trim()))
}

/// Upper-case section titles are highlighted in the nomenclature.
fn is_upper_case_title(text: &str) -> bool {
    text.chars().any(char::is_alphabetic) && !text.chars().any(char::is_lowercase)
}

/// Map worksheet rows to records. Fails when no column designates the libellé.
pub fn parse(table: &Table) -> Result<Vec<NbeRecord>> {
    let columns = ColumnMap::resolve(&table.headers, FIELDS);
    if columns.column(Field::Libelle).is_none() {
        bail!(
            "no libelle column among headers {:?}",
            table.headers
        );
    }

    let mut records = Vec::new();
    for row in table.rows.iter().filter(|row| !is_blank(row)) {
        let raw_libelle = columns.cell(row, Field::Libelle).unwrap_or_default();
        let (ligne, libelle) = match columns.cell(row, Field::Ligne) {
            Some(code) => (Some(code.to_owned()), raw_libelle.to_owned()),
            None => match split_leading_code(raw_libelle) {
                Some((code, rest)) if !rest.is_empty() => {
                    (Some(code.to_owned()), rest.to_owned())
                }
                _ => (None, raw_libelle.to_owned()),
            },
        };
        if libelle.is_empty() && ligne.is_none() {
            continue;
        }
        let is_header = ligne.is_none();
        records.push(NbeRecord {
            is_highlighted: is_header && is_upper_case_title(&libelle),
            is_header,
            ligne,
            libelle,
            objet_depense: columns.cell(row, Field::ObjetDepense).map(str::to_owned),
            categorie: columns.cell(row, Field::Categorie).map(str::to_owned),
            sous_categorie: columns.cell(row, Field::SousCategorie).map(str::to_owned),
            ordre: i32::try_from(records.len() + 1).context("too many rows")?,
        });
    }
    Ok(records)
}

/// Replace the whole `nbe_lines` table with `records`, atomically.
pub async fn replace_all(db: &DatabaseConnection, records: Vec<NbeRecord>) -> Result<u64> {
    let count = records.len() as u64;
    db.transaction::<_, (), sea_orm::DbErr>(|txn| {
        Box::pin(async move {
            nbe_lines::Entity::delete_many().exec(txn).await?;
            for chunk in records.chunks(INSERT_CHUNK) {
                nbe_lines::Entity::insert_many(chunk.iter().map(active_model))
                    .exec(txn)
                    .await?;
            }
            Ok(())
        })
    })
    .await
    .context("reload nbe_lines")?;
    Ok(count)
}

fn active_model(record: &NbeRecord) -> nbe_lines::ActiveModel {
    nbe_lines::ActiveModel {
        id: Set(Uuid::now_v7()),
        ligne: Set(record.ligne.clone()),
        libelle: Set(record.libelle.clone()),
        objet_depense: Set(record.objet_depense.clone()),
        categorie: Set(record.categorie.clone()),
        sous_categorie: Set(record.sous_categorie.clone()),
        is_header: Set(record.is_header),
        is_highlighted: Set(record.is_highlighted),
        ordre: Set(record.ordre),
    }
}
