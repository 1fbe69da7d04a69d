use serde::{Deserialize, Serialize};

use super::entity::{same_identity, Audit, Entity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Greeting {
    pub id: Option<i64>,
    pub text: String,
    pub language: String,
    #[serde(skip)]
    pub audit: Audit,
}

impl Greeting {
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            language: language.into(),
            audit: Audit::default(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

impl PartialEq for Greeting {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self.id, other.id)
    }
}

impl Entity for Greeting {
    const NAME: &'static str = "Greeting";
    const TABLE: &'static str = "greeting";
    const COLLECTION: &'static str = "greetings";
    const COLUMNS: &'static [&'static str] = &["text", "language"];

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
        self.text = changes.text.clone();
        self.language = changes.language.clone();
    }
}
