//! Taxonomy model.
//!
//! Taxonomies provide hierarchical classification of securities and accounts.

use serde::{Deserialize, Serialize};

/// Vehicle class of an assigned security
pub const VEHICLE_SECURITY: &str = "security";
/// Vehicle class of an assigned account
pub const VEHICLE_ACCOUNT: &str = "account";

/// A taxonomy for classifying securities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Taxonomy {
    pub id: String,
    pub name: String,
    pub root: Option<Classification>,
}

impl Taxonomy {
    pub fn new(id: String, name: String) -> Self {
        Self { id, name, root: None }
    }

    /// Get all classifications flattened
    pub fn all_classifications(&self) -> Vec<&Classification> {
        let mut result = Vec::new();
        if let Some(ref root) = self.root {
            root.collect_into(&mut result);
        }
        result
    }

    /// Find a classification anywhere in the tree
    pub fn find_classification(&self, id: &str) -> Option<&Classification> {
        self.all_classifications().into_iter().find(|c| c.id == id)
    }
}

/// A classification within a taxonomy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub id: String,
    pub name: String,
    /// Weight (10000 = 100%)
    pub weight: Option<i32>,
    pub children: Vec<Classification>,
    pub assignments: Vec<ClassificationAssignment>,
}

impl Classification {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            weight: None,
            children: Vec::new(),
            assignments: Vec::new(),
        }
    }

    fn collect_into<'a>(&'a self, result: &mut Vec<&'a Classification>) {
        result.push(self);
        for child in &self.children {
            child.collect_into(result);
        }
    }

    /// Assignments of this classification and all its descendants
    pub fn assignments_in_subtree(&self) -> Vec<&ClassificationAssignment> {
        let mut nodes = Vec::new();
        self.collect_into(&mut nodes);
        nodes.into_iter().flat_map(|c| c.assignments.iter()).collect()
    }
}

/// Assignment of a security or account to a classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationAssignment {
    /// Type of investment vehicle ("security" or "account")
    pub vehicle_class: String,
    /// UUID of the referenced entity
    pub vehicle_uuid: String,
    /// Weight (10000 = 100%)
    pub weight: i32,
}

impl ClassificationAssignment {
    pub fn security(security_uuid: String, weight: i32) -> Self {
        Self {
            vehicle_class: VEHICLE_SECURITY.to_string(),
            vehicle_uuid: security_uuid,
            weight,
        }
    }

    pub fn account(account_uuid: String, weight: i32) -> Self {
        Self {
            vehicle_class: VEHICLE_ACCOUNT.to_string(),
            vehicle_uuid: account_uuid,
            weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_flattening() {
        let mut taxonomy = Taxonomy::new("tax-1".to_string(), "Asset Allocation".to_string());

        let mut root = Classification::new("root".to_string(), "Root".to_string());
        root.children.push(Classification::new("c1".to_string(), "Stocks".to_string()));
        root.children.push(Classification::new("c2".to_string(), "Bonds".to_string()));
        root.children[0].children.push(Classification::new(
            "c1-1".to_string(),
            "US Stocks".to_string(),
        ));

        taxonomy.root = Some(root);

        let all = taxonomy.all_classifications();
        assert_eq!(all.len(), 4); // root, stocks, bonds, us stocks
        assert!(taxonomy.find_classification("c1-1").is_some());
        assert!(taxonomy.find_classification("c3").is_none());
    }

    #[test]
    fn test_subtree_assignments() {
        let mut stocks = Classification::new("c1".to_string(), "Stocks".to_string());
        stocks.assignments.push(ClassificationAssignment::security("sec-a".to_string(), 10000));
        let mut us = Classification::new("c1-1".to_string(), "US Stocks".to_string());
        us.assignments.push(ClassificationAssignment::account("acc-1".to_string(), 5000));
        stocks.children.push(us);

        let uuids: Vec<_> = stocks
            .assignments_in_subtree()
            .iter()
            .map(|a| a.vehicle_uuid.as_str())
            .collect();
        assert_eq!(uuids, vec!["sec-a", "acc-1"]);
    }
}
