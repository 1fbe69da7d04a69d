use serde::{Deserialize, Serialize};

use super::entity::{same_identity, Audit, Entity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub id: Option<i64>,
    pub name: String,
    pub capital: String,
    #[serde(skip)]
    pub audit: Audit,
}

impl Country {
    pub fn new(name: impl Into<String>, capital: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            capital: capital.into(),
            audit: Audit::default(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

impl PartialEq for Country {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self.id, other.id)
    }
}

impl Entity for Country {
    const NAME: &'static str = "Country";
    const TABLE: &'static str = "country";
    const COLLECTION: &'static str = "countries";
    const COLUMNS: &'static [&'static str] = &["name", "capital"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }

    fn apply_changes(&mut self, changes: &Self) {
        self.name = changes.name.clone();
        self.capital = changes.capital.clone();
    }
}
