use sea_orm::{
    ColumnTrait, Condition, EntityTrait, QueryFilter, Select,
    sea_query::{Expr, Func},
};

/// Case-insensitive substring search across several text columns.
pub trait SearchExt: Sized {
    /// Keep rows where any of `columns` contains `term` (case-insensitive).
    /// A missing or blank term leaves the query unchanged.
    fn search<C>(self, columns: &[C], term: Option<&str>) -> Self
    where
        C: ColumnTrait + 'static;
}

impl<E> SearchExt for Select<E>
where
    E: EntityTrait,
{
    fn search<C>(self, columns: &[C], term: Option<&str>) -> Self
    where
        C: ColumnTrait + 'static,
    {
        let Some(pattern) = like_pattern(term) else {
            return self;
        };
        let condition = columns.iter().fold(Condition::any(), |cond, column| {
            cond.add(Expr::expr(Func::lower(Expr::col(*column))).like(pattern.clone()))
        });
        self.filter(condition)
    }
}

/// `%term%`, lower-cased, with LIKE wildcards in the term escaped.
fn like_pattern(term: Option<&str>) -> Option<String> {
    let term = term.map(str::trim).filter(|t| !t.is_empty())?;
    let escaped = term
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{escaped}%"))
}
