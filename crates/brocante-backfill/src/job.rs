//! Backfill jobs
//!
//! Each job plans its writes from a snapshot (pure, testable) and then
//! applies them. Only missing data is ever written: a listing that already
//! has a value for an attribute, or already has a sub-category, is left
//! alone. Inferred values still pass the type-directed validator before
//! they are stored.

use std::collections::{HashMap, HashSet};

use chrono::Local;
use sea_orm::*;

use brocante_attribute::validate::validate_text;
use brocante_common::error::BrocanteError;
use brocante_persistence::entity::{
    attribute_definition, attribute_value, category, listing, sub_category,
};

use crate::infer;
use crate::keywords::{ATTRIBUTE_TABLES, SUB_CATEGORY_TABLES};

/// What a job did, for the operator running it
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackfillReport {
    pub examined: usize,
    pub written: usize,
    pub skipped_existing: usize,
    pub unmatched: usize,
}

/// Infer attribute values for one category's listings
pub async fn backfill_attributes(
    db: &DatabaseConnection,
    category_id: i64,
) -> anyhow::Result<BackfillReport> {
    let definitions = attribute_definition::Entity::find()
        .filter(attribute_definition::Column::CategoryId.eq(category_id))
        .filter(attribute_definition::Column::IsActive.eq(true))
        .all(db)
        .await?;

    let listings = listing::Entity::find()
        .filter(listing::Column::CategoryId.eq(category_id))
        .all(db)
        .await?;

    let listing_ids: Vec<i64> = listings.iter().map(|l| l.id).collect();
    let existing: HashSet<(i64, i64)> = attribute_value::Entity::find()
        .filter(attribute_value::Column::ListingId.is_in(listing_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|v| (v.listing_id, v.attribute_id))
        .collect();

    let (writes, report) = plan_attribute_backfill(&definitions, &listings, &existing);

    let now = Local::now().naive_local();
    for (listing_id, attribute_id, typed) in &writes {
        let entity = attribute_value::ActiveModel {
            listing_id: Set(*listing_id),
            attribute_id: Set(*attribute_id),
            kind: Set(typed.kind().to_string()),
            value: Set(typed.to_stored()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        attribute_value::Entity::insert(entity).exec(db).await?;
    }

    tracing::info!(
        category_id,
        examined = report.examined,
        written = report.written,
        skipped_existing = report.skipped_existing,
        unmatched = report.unmatched,
        "Attribute backfill finished"
    );

    Ok(report)
}

/// Pure planning pass for the attribute backfill
fn plan_attribute_backfill(
    definitions: &[attribute_definition::Model],
    listings: &[listing::Model],
    existing: &HashSet<(i64, i64)>,
) -> (
    Vec<(i64, i64, brocante_attribute::TypedValue)>,
    BackfillReport,
) {
    let mut writes = Vec::new();
    let mut report = BackfillReport::default();

    let keyed: Vec<(&attribute_definition::Model, &[&str])> = definitions
        .iter()
        .filter_map(|def| {
            ATTRIBUTE_TABLES
                .get(def.name.to_lowercase().as_str())
                .map(|keywords| (def, *keywords))
        })
        .collect();

    for listing in listings {
        for (def, keywords) in &keyed {
            report.examined += 1;

            if existing.contains(&(listing.id, def.id)) {
                report.skipped_existing += 1;
                continue;
            }

            let Some(inferred) = infer::infer_value(keywords, &listing.title, &listing.description)
            else {
                report.unmatched += 1;
                continue;
            };

            // Best-effort: an inferred keyword that the definition rejects
            // (e.g. not among the select options) is dropped, not forced
            match validate_text(def, Some(&inferred)) {
                Ok(Some(typed)) => {
                    writes.push((listing.id, def.id, typed));
                    report.written += 1;
                }
                _ => report.unmatched += 1,
            }
        }
    }

    (writes, report)
}

/// Assign sub-categories for one category's listings by keyword scoring
pub async fn assign_sub_categories(
    db: &DatabaseConnection,
    category_id: i64,
) -> anyhow::Result<BackfillReport> {
    let Some(cat) = category::Entity::find_by_id(category_id).one(db).await? else {
        return Err(BrocanteError::CategoryNotExist(category_id).into());
    };

    let Some(tables) = SUB_CATEGORY_TABLES.get(cat.name.as_str()) else {
        tracing::warn!(category = %cat.name, "No sub-category keyword table; nothing to do");
        return Ok(BackfillReport::default());
    };

    let subs: HashMap<String, i64> = sub_category::Entity::find()
        .filter(sub_category::Column::CategoryId.eq(category_id))
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.name, s.id))
        .collect();

    let orphans = listing::Entity::find()
        .filter(listing::Column::CategoryId.eq(category_id))
        .filter(listing::Column::SubCategoryId.is_null())
        .all(db)
        .await?;

    let mut report = BackfillReport::default();

    for orphan in orphans {
        report.examined += 1;

        let text = format!("{} {}", orphan.title, orphan.description);
        let Some(winner) = infer::score_sub_categories(tables, &text) else {
            report.unmatched += 1;
            continue;
        };

        // Keyword tables may name sub-categories that were never created
        let Some(sub_category_id) = subs.get(winner) else {
            report.unmatched += 1;
            continue;
        };

        let mut model: listing::ActiveModel = orphan.into();
        model.sub_category_id = Set(Some(*sub_category_id));
        model.update(db).await?;
        report.written += 1;
    }

    tracing::info!(
        category_id,
        examined = report.examined,
        written = report.written,
        unmatched = report.unmatched,
        "Sub-category assignment finished"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(id: i64, name: &str, value_type: &str) -> attribute_definition::Model {
        attribute_definition::Model {
            id,
            category_id: 1,
            name: name.to_string(),
            value_type: value_type.to_string(),
            options: None,
            required: false,
            sort_order: 0,
            placeholder: None,
            description: None,
            is_active: true,
            date_format: None,
            min_date: None,
            max_date: None,
            created_at: chrono::NaiveDateTime::default(),
            updated_at: chrono::NaiveDateTime::default(),
        }
    }

    fn ad(id: i64, title: &str, description: &str) -> listing::Model {
        listing::Model {
            id,
            reference: format!("ref-{}", id),
            user_id: 1,
            category_id: 1,
            sub_category_id: None,
            title: title.to_string(),
            description: description.to_string(),
            price: 1000.0,
            city: "Lyon".to_string(),
            brand: None,
            condition: None,
            views: 0,
            is_active: true,
            published_at: chrono::NaiveDateTime::default(),
            updated_at: chrono::NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_plan_writes_only_missing_values() {
        let definitions = vec![def(10, "Couleur", "string")];
        let listings = vec![
            ad(1, "Vélo rouge en bon état", ""),
            ad(2, "Vélo bleu", ""),
        ];
        let existing = HashSet::from([(2, 10)]);

        let (writes, report) = plan_attribute_backfill(&definitions, &listings, &existing);
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, 1);
        assert_eq!(writes[0].2.to_stored(), "rouge");
        assert_eq!(report.written, 1);
        assert_eq!(report.skipped_existing, 1);
    }

    #[test]
    fn test_plan_is_idempotent() {
        let definitions = vec![def(10, "Couleur", "string")];
        let listings = vec![ad(1, "Vélo rouge", "")];

        let (first, _) = plan_attribute_backfill(&definitions, &listings, &HashSet::new());
        let after: HashSet<(i64, i64)> = first.iter().map(|(l, a, _)| (*l, *a)).collect();
        let (second, report) = plan_attribute_backfill(&definitions, &listings, &after);
        assert!(second.is_empty());
        assert_eq!(report.skipped_existing, 1);
    }

    #[test]
    fn test_plan_validates_inferred_values() {
        // "rouge" is not among the configured options, so nothing is written
        let mut select = def(10, "Couleur", "select");
        select.options = brocante_attribute::model::definition::encode_options(&[
            "noir".to_string(),
            "blanc".to_string(),
        ]);
        let listings = vec![ad(1, "Vélo rouge", "")];

        let (writes, report) =
            plan_attribute_backfill(&[select], &listings, &HashSet::new());
        assert!(writes.is_empty());
        assert_eq!(report.unmatched, 1);
    }

    #[test]
    fn test_plan_ignores_definitions_without_tables() {
        let definitions = vec![def(10, "Surface", "number")];
        let listings = vec![ad(1, "Appartement 85 m2", "")];

        let (writes, report) = plan_attribute_backfill(&definitions, &listings, &HashSet::new());
        assert!(writes.is_empty());
        assert_eq!(report.examined, 0);
    }
}
