use chrono::NaiveDateTime;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryDto;
use crate::forms::categories::AddCategoryFormPayload;
use crate::repository::{FrequencyCategoryReader, FrequencyCategoryWriter, RepositoryError};

use super::{ServiceError, ServiceResult};

/// Frequency categories are readable by every authenticated caller.
pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: FrequencyCategoryReader,
{
    match repo.list_frequency_categories() {
        Ok(categories) => Ok(categories.into_iter().map(CategoryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list frequency categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn add_category<R>(
    payload: AddCategoryFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
    now: NaiveDateTime,
) -> ServiceResult<CategoryDto>
where
    R: FrequencyCategoryWriter,
{
    if !user.is_admin() {
        return Err(ServiceError::Unauthorized);
    }

    let category = payload.into_new_category(now);
    match repo.create_frequency_category(&category) {
        Ok(created) => {
            log::info!("Added frequency category {}", created.name);
            Ok(CategoryDto::from(created))
        }
        Err(RepositoryError::Conflict(_)) => Err(ServiceError::Conflict(format!(
            "frequency category {} already exists",
            category.name
        ))),
        Err(e) => {
            log::error!("Failed to add frequency category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Deletes a category that no schedule references.
pub fn delete_category<R>(
    category_id: CategoryId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<()>
where
    R: FrequencyCategoryReader + FrequencyCategoryWriter,
{
    if !user.is_admin() {
        return Err(ServiceError::Unauthorized);
    }

    match repo.frequency_category_in_use(category_id) {
        Ok(false) => {}
        Ok(true) => {
            return Err(ServiceError::Conflict(
                "frequency category is used by a group schedule".into(),
            ));
        }
        Err(e) => {
            log::error!("Failed to check usage of category {category_id}: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.delete_frequency_category(category_id) {
        Ok(0) => Err(ServiceError::NotFound("frequency category".into())),
        Ok(_) => Ok(()),
        Err(RepositoryError::Conflict(_)) => Err(ServiceError::Conflict(
            "frequency category is used by a group schedule".into(),
        )),
        Err(e) => {
            log::error!("Failed to delete category {category_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::FrequencyKind;
    use crate::repository::test::TestRepository;
    use crate::services::fixtures::*;

    fn daily() -> AddCategoryFormPayload {
        AddCategoryFormPayload {
            name: FrequencyKind::Daily,
        }
    }

    #[test]
    fn admin_adds_and_lists_categories() {
        let repo = TestRepository::default();
        let added = add_category(daily(), &admin(), &repo, at(1, 0, 0)).unwrap();
        assert_eq!(added.name, "daily");

        let listed = list_categories(&repo).unwrap();
        assert_eq!(listed, vec![added]);
    }

    #[test]
    fn duplicate_name_conflicts() {
        let repo = seeded_repo();
        let err = add_category(daily(), &admin(), &repo, at(1, 0, 0)).unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[test]
    fn managers_cannot_edit_categories() {
        let repo = TestRepository::default();
        let err = add_category(daily(), &manager(), &repo, at(1, 0, 0)).unwrap_err();
        assert_eq!(err, ServiceError::Unauthorized);
    }

    #[test]
    fn category_in_use_is_not_deleted() {
        let repo = seeded_repo();
        set_daily_schedule(&repo, "08:00");

        let daily = repo.category_id(FrequencyKind::Daily);
        let err = delete_category(daily, &admin(), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let weekly = repo.category_id(FrequencyKind::Weekly);
        delete_category(weekly, &admin(), &repo).unwrap();
        assert_eq!(
            delete_category(weekly, &admin(), &repo).unwrap_err(),
            ServiceError::NotFound("frequency category".into())
        );
        assert_eq!(list_categories(&repo).unwrap().len(), 2);
    }
}
