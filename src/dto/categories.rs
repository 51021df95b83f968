use serde::Serialize;

use crate::domain::frequency::FrequencyCategory;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
}

impl From<FrequencyCategory> for CategoryDto {
    fn from(value: FrequencyCategory) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.as_str().to_string(),
        }
    }
}
