//! Timeslot list entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use timeslot_core::types::DbId;
use validator::Validate;

use crate::patch::{Assignment, BindValue, Patch};

/// A row from `timeslots_lists`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct TimeslotList {
    pub id: DbId,
    pub title: String,
    pub description: String,
}

/// DTO for creating a new list.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTimeslotList {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// DTO for updating a list. All fields are optional; at least one must be set.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTimeslotList {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Patch for UpdateTimeslotList {
    fn assignments(&self) -> Vec<Assignment> {
        let UpdateTimeslotList { title, description } = self;

        let mut out = Vec::with_capacity(2);
        if let Some(title) = title {
            out.push(Assignment::new("title", BindValue::Text(title.clone())));
        }
        if let Some(description) = description {
            out.push(Assignment::new(
                "description",
                BindValue::Text(description.clone()),
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_title() {
        let input = CreateTimeslotList {
            title: String::new(),
            description: "weekly".into(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn description_defaults_to_empty() {
        let input: CreateTimeslotList = serde_json::from_str(r#"{"title":"Work"}"#).unwrap();
        assert_eq!(input.description, "");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn update_maps_fields_in_declaration_order() {
        let input = UpdateTimeslotList {
            title: Some("t".into()),
            description: Some("d".into()),
        };
        let columns: Vec<_> = input.assignments().iter().map(|a| a.column).collect();
        assert_eq!(columns, ["title", "description"]);
    }

    #[test]
    fn update_rejects_blank_title_but_allows_absent_one() {
        let blank = UpdateTimeslotList {
            title: Some(String::new()),
            description: None,
        };
        assert!(blank.validate().is_err());

        let description_only = UpdateTimeslotList {
            title: None,
            description: Some(String::new()),
        };
        assert!(description_only.validate().is_ok());
    }
}
