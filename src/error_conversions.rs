//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service or repository error types, so
//! the `From` impls connecting them live here.

use crate::domain::schedule::ScheduleError;
use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<ScheduleError> for RepositoryError {
    fn from(val: ScheduleError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod server {
    use crate::clients::prediction::PredictionError;
    use crate::domain::schedule::ScheduleError;
    use crate::domain::types::TypeConstraintError;
    use crate::forms::categories::AddCategoryFormError;
    use crate::forms::cycles::GenerateCycleFormError;
    use crate::forms::locations::AddLocationFormError;
    use crate::forms::predictions::LoanPredictionFormError;
    use crate::forms::rules::SetRulesFormError;
    use crate::forms::savings::RecordSavingFormError;
    use crate::forms::schedules::SetScheduleFormError;
    use crate::services::ServiceError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::Validation(val.to_string())
        }
    }

    impl From<ScheduleError> for ServiceError {
        fn from(val: ScheduleError) -> Self {
            ServiceError::Validation(val.to_string())
        }
    }

    impl From<PredictionError> for ServiceError {
        fn from(val: PredictionError) -> Self {
            ServiceError::ExternalService(val.to_string())
        }
    }

    impl From<AddCategoryFormError> for ServiceError {
        fn from(val: AddCategoryFormError) -> Self {
            ServiceError::Validation(val.to_string())
        }
    }

    impl From<SetScheduleFormError> for ServiceError {
        fn from(val: SetScheduleFormError) -> Self {
            ServiceError::Validation(val.to_string())
        }
    }

    impl From<SetRulesFormError> for ServiceError {
        fn from(val: SetRulesFormError) -> Self {
            ServiceError::Validation(val.to_string())
        }
    }

    impl From<GenerateCycleFormError> for ServiceError {
        fn from(val: GenerateCycleFormError) -> Self {
            ServiceError::Validation(val.to_string())
        }
    }

    impl From<RecordSavingFormError> for ServiceError {
        fn from(val: RecordSavingFormError) -> Self {
            ServiceError::Validation(val.to_string())
        }
    }

    impl From<LoanPredictionFormError> for ServiceError {
        fn from(val: LoanPredictionFormError) -> Self {
            ServiceError::Validation(val.to_string())
        }
    }

    impl From<AddLocationFormError> for ServiceError {
        fn from(val: AddLocationFormError) -> Self {
            ServiceError::Validation(val.to_string())
        }
    }
}
