use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::validate::{self, ValidationError};

/// Stored user record, flat and keyed by `user_id`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: String,
    pub full_name: String,
    pub mob_num: String,
    pub pan_num: String,
}

impl UserRecord {
    /// Overwrite the named attributes; `user_id` is never touched.
    pub fn apply(&mut self, updates: &FieldUpdates) {
        for (field, value) in updates {
            match field {
                UserField::FullName => self.full_name = value.clone(),
                UserField::MobNum => self.mob_num = value.clone(),
                UserField::PanNum => self.pan_num = value.clone(),
            }
        }
    }
}

/// Create input. Absent fields deserialize to `None` and are validated as empty.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewUserInput {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub mob_num: Option<String>,
    #[serde(default)]
    pub pan_num: Option<String>,
}

/// Partial update. `None` means "leave as is".
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPatch {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub mob_num: Option<String>,
    #[serde(default)]
    pub pan_num: Option<String>,
}

/// Mutable attributes of a record. Ordering is the validation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserField {
    FullName,
    MobNum,
    PanNum,
}

impl UserField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserField::FullName => "full_name",
            UserField::MobNum => "mob_num",
            UserField::PanNum => "pan_num",
        }
    }
}

pub type FieldUpdates = BTreeMap<UserField, String>;

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.mob_num.is_none() && self.pan_num.is_none()
    }

    /// Validate present fields (name, mobile, PAN) and collect them into an update set.
    pub fn into_updates(self) -> Result<FieldUpdates, ValidationError> {
        let mut updates = FieldUpdates::new();
        if let Some(name) = self.full_name {
            validate::check_name(&name)?;
            updates.insert(UserField::FullName, name);
        }
        if let Some(mob) = self.mob_num {
            validate::check_mobile(&mob)?;
            updates.insert(UserField::MobNum, mob);
        }
        if let Some(pan) = self.pan_num {
            validate::check_pan(&pan)?;
            updates.insert(UserField::PanNum, pan);
        }
        Ok(updates)
    }
}
