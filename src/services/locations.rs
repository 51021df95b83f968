use crate::domain::auth::AuthenticatedUser;
use crate::domain::location::{Location, NewLocation};
use crate::domain::types::LocationId;
use crate::repository::{LocationReader, LocationWriter, RepositoryError};

use super::{ServiceError, ServiceResult};

/// Deepest possible path: province, district, sector, cell, village.
const MAX_DEPTH: usize = 5;

fn load_location<R>(repo: &R, location_id: LocationId) -> ServiceResult<Location>
where
    R: LocationReader,
{
    match repo.get_location_by_id(location_id) {
        Ok(Some(location)) => Ok(location),
        Ok(None) => Err(ServiceError::NotFound("location".into())),
        Err(e) => {
            log::error!("Failed to get location {location_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Provinces, sorted by name.
pub fn list_roots<R>(repo: &R) -> ServiceResult<Vec<Location>>
where
    R: LocationReader,
{
    repo.list_locations(None).map_err(|e| {
        log::error!("Failed to list provinces: {e}");
        ServiceError::Internal
    })
}

pub fn list_children<R>(location_id: LocationId, repo: &R) -> ServiceResult<Vec<Location>>
where
    R: LocationReader,
{
    load_location(repo, location_id)?;

    repo.list_locations(Some(location_id)).map_err(|e| {
        log::error!("Failed to list children of location {location_id}: {e}");
        ServiceError::Internal
    })
}

/// Ancestors of a location followed by the location itself, province first.
pub fn location_path<R>(location_id: LocationId, repo: &R) -> ServiceResult<Vec<Location>>
where
    R: LocationReader,
{
    let mut path = vec![load_location(repo, location_id)?];

    while let Some(parent_id) = path.last().and_then(|l| l.parent_id) {
        if path.len() >= MAX_DEPTH {
            log::error!("Location {location_id} is nested deeper than {MAX_DEPTH} levels");
            return Err(ServiceError::Internal);
        }
        path.push(load_location(repo, parent_id)?);
    }

    path.reverse();
    Ok(path)
}

pub fn add_location<R>(
    location: NewLocation,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Location>
where
    R: LocationReader + LocationWriter,
{
    if !user.is_admin() {
        return Err(ServiceError::Unauthorized);
    }

    let parent = location
        .parent_id
        .map(|parent_id| load_location(repo, parent_id))
        .transpose()?;

    if !location.fits_under(parent.as_ref()) {
        return Err(ServiceError::Validation(format!(
            "a {} cannot be placed under {}",
            location.level,
            parent.map_or_else(|| "the root".to_string(), |p| format!("a {}", p.level))
        )));
    }

    match repo.create_location(&location) {
        Ok(created) => Ok(created),
        Err(RepositoryError::Conflict(_)) => Err(ServiceError::Conflict(format!(
            "location {} already exists here",
            location.name
        ))),
        Err(e) => {
            log::error!("Failed to add location {}: {e}", location.name);
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::location::LocationLevel;
    use crate::domain::types::LocationName;
    use crate::repository::test::TestRepository;
    use crate::services::fixtures::*;

    fn node(parent: Option<&Location>, level: LocationLevel, name: &str) -> NewLocation {
        NewLocation {
            parent_id: parent.map(|p| p.id),
            level,
            name: LocationName::new(name).unwrap(),
        }
    }

    #[test]
    fn builds_tree_and_walks_path() {
        let repo = TestRepository::default();
        let kigali = add_location(node(None, LocationLevel::Province, "Kigali"), &admin(), &repo)
            .unwrap();
        let gasabo = add_location(
            node(Some(&kigali), LocationLevel::District, "Gasabo"),
            &admin(),
            &repo,
        )
        .unwrap();
        let kimihurura = add_location(
            node(Some(&gasabo), LocationLevel::Sector, "Kimihurura"),
            &admin(),
            &repo,
        )
        .unwrap();

        assert_eq!(list_roots(&repo).unwrap(), vec![kigali.clone()]);
        assert_eq!(list_children(kigali.id, &repo).unwrap(), vec![gasabo.clone()]);

        let path = location_path(kimihurura.id, &repo).unwrap();
        let names: Vec<&str> = path.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Kigali", "Gasabo", "Kimihurura"]);
    }

    #[test]
    fn rejects_skipped_levels_and_duplicates() {
        let repo = TestRepository::default();
        let kigali = add_location(node(None, LocationLevel::Province, "Kigali"), &admin(), &repo)
            .unwrap();

        let err = add_location(
            node(Some(&kigali), LocationLevel::Sector, "Remera"),
            &admin(),
            &repo,
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = add_location(node(None, LocationLevel::Province, "Kigali"), &admin(), &repo)
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[test]
    fn only_admins_add_locations() {
        let repo = TestRepository::default();
        let err = add_location(node(None, LocationLevel::Province, "Kigali"), &manager(), &repo)
            .unwrap_err();
        assert_eq!(err, ServiceError::Unauthorized);
        assert_eq!(
            list_children(LocationId::new(1).unwrap(), &repo).unwrap_err(),
            ServiceError::NotFound("location".into())
        );
    }
}
