use std::collections::BTreeMap;

use crate::models::Service;

pub const UNCATEGORIZED: &str = "Other";

/// Groups services under their category name, keeping input order inside
/// each group. Services without a category land in [`UNCATEGORIZED`].
pub fn group_by_category(services: Vec<Service>) -> BTreeMap<String, Vec<Service>> {
    let mut groups: BTreeMap<String, Vec<Service>> = BTreeMap::new();
    for service in services {
        let category = service
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED)
            .to_string();
        groups.entry(category).or_default().push(service);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn service(name: &str, category: Option<&str>) -> Service {
        Service {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            category: category.map(Into::into),
            price: 1000,
            duration_minutes: 30,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn groups_and_defaults_category() {
        let groups = group_by_category(vec![
            service("Classic cut", Some("Hair")),
            service("Beard trim", Some("Beard")),
            service("Fade", Some("Hair")),
            service("Scalp massage", None),
            service("Eyebrows", Some("  ")),
        ]);
        assert_eq!(groups.len(), 3);
        let hair: Vec<_> = groups["Hair"].iter().map(|s| s.name.as_str()).collect();
        assert_eq!(hair, vec!["Classic cut", "Fade"]);
        assert_eq!(groups[UNCATEGORIZED].len(), 2);
    }
}
