//! Static keyword tables
//!
//! Read-only configuration data, loaded once at process start. One table
//! per attribute name; one table per category for sub-category assignment.
//! Keywords are lowercase and matched case-insensitively against listing
//! text.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Keyword list for one attribute name
struct AttributeKeywords {
    /// Attribute definition name, lowercase
    attribute: &'static str,
    keywords: &'static [&'static str],
}

const ATTRIBUTE_KEYWORDS: &[AttributeKeywords] = &[
    AttributeKeywords {
        attribute: "couleur",
        keywords: &[
            "noir", "blanc", "gris", "rouge", "bleu", "vert", "jaune", "orange", "violet",
            "marron", "beige", "rose", "argent", "doré",
        ],
    },
    AttributeKeywords {
        attribute: "carburant",
        keywords: &["essence", "diesel", "hybride", "électrique", "gpl", "éthanol"],
    },
    AttributeKeywords {
        attribute: "boîte de vitesse",
        keywords: &["manuelle", "automatique", "semi-automatique"],
    },
    AttributeKeywords {
        attribute: "type de contrat",
        keywords: &["cdi", "cdd", "intérim", "alternance", "stage", "freelance"],
    },
];

/// Attribute keyword tables keyed by lowercase attribute name
pub static ATTRIBUTE_TABLES: LazyLock<HashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| {
        ATTRIBUTE_KEYWORDS
            .iter()
            .map(|table| (table.attribute, table.keywords))
            .collect()
    });

/// Keyword list for one sub-category name
struct SubCategoryKeywords {
    /// Sub-category name as stored in the sub_category table
    sub_category: &'static str,
    keywords: &'static [&'static str],
}

struct CategoryKeywords {
    /// Category name as stored in the category table
    category: &'static str,
    sub_categories: &'static [SubCategoryKeywords],
}

const CATEGORY_KEYWORDS: &[CategoryKeywords] = &[
    CategoryKeywords {
        category: "Véhicules",
        sub_categories: &[
            SubCategoryKeywords {
                sub_category: "Voitures",
                keywords: &["voiture", "citadine", "berline", "break", "suv", "cabriolet"],
            },
            SubCategoryKeywords {
                sub_category: "Motos",
                keywords: &["moto", "scooter", "roadster", "trail"],
            },
            SubCategoryKeywords {
                sub_category: "Vélos",
                keywords: &["vélo", "vtt", "vtc", "bicyclette"],
            },
            SubCategoryKeywords {
                sub_category: "Utilitaires",
                keywords: &["utilitaire", "fourgon", "camionnette", "camion"],
            },
        ],
    },
    CategoryKeywords {
        category: "Immobilier",
        sub_categories: &[
            SubCategoryKeywords {
                sub_category: "Appartements",
                keywords: &["appartement", "studio", "duplex", "t2", "t3", "t4"],
            },
            SubCategoryKeywords {
                sub_category: "Maisons",
                keywords: &["maison", "villa", "pavillon", "longère"],
            },
            SubCategoryKeywords {
                sub_category: "Terrains",
                keywords: &["terrain", "parcelle", "constructible"],
            },
        ],
    },
    CategoryKeywords {
        category: "Emploi",
        sub_categories: &[
            SubCategoryKeywords {
                sub_category: "Informatique",
                keywords: &["développeur", "informatique", "logiciel", "devops", "data"],
            },
            SubCategoryKeywords {
                sub_category: "Restauration",
                keywords: &["cuisinier", "serveur", "restauration", "commis"],
            },
            SubCategoryKeywords {
                sub_category: "Bâtiment",
                keywords: &["maçon", "plombier", "électricien", "chantier", "couvreur"],
            },
        ],
    },
];

/// Sub-category keyword tables keyed by category name; each entry maps a
/// sub-category name to its keywords
pub static SUB_CATEGORY_TABLES: LazyLock<
    HashMap<&'static str, Vec<(&'static str, &'static [&'static str])>>,
> = LazyLock::new(|| {
    CATEGORY_KEYWORDS
        .iter()
        .map(|table| {
            (
                table.category,
                table
                    .sub_categories
                    .iter()
                    .map(|sub| (sub.sub_category, sub.keywords))
                    .collect(),
            )
        })
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_tables_are_lowercase() {
        for table in ATTRIBUTE_KEYWORDS {
            assert_eq!(table.attribute, table.attribute.to_lowercase().as_str());
            for keyword in table.keywords {
                assert_eq!(*keyword, keyword.to_lowercase().as_str());
                assert!(!keyword.is_empty());
            }
        }
    }

    #[test]
    fn test_known_tables_present() {
        assert!(ATTRIBUTE_TABLES.contains_key("couleur"));
        assert!(ATTRIBUTE_TABLES.contains_key("type de contrat"));
        assert!(SUB_CATEGORY_TABLES.contains_key("Véhicules"));
        assert_eq!(SUB_CATEGORY_TABLES.get("Immobilier").unwrap().len(), 3);
    }
}
