pub mod create_ad;
pub mod delete_ad;
pub mod get_ad;
pub mod list_ads;
pub mod update_ad;

use crate::application::dto::ads::{AdDraft, CategoryRef, ValidatedAd};
use crate::application::errors::{UseCaseError, UseCaseResult};
use crate::application::ports::category_repository::CategoryRepository;
use crate::application::validation;
use crate::domain::ads::ad::{Ad, Condition};

/// Field validation shared by create and update; every problem is reported at once.
pub(crate) async fn validate_draft<C>(categories: &C, draft: &AdDraft) -> UseCaseResult<ValidatedAd>
where
    C: CategoryRepository + ?Sized,
{
    let mut errors = draft.malformed.clone();
    let title = validation::required_text(
        &mut errors,
        "title",
        draft.title.as_deref(),
        Ad::TITLE_MAX_LEN,
    );
    let description = validation::required_text(
        &mut errors,
        "description",
        draft.description.as_deref(),
        Ad::DESCRIPTION_MAX_LEN,
    );
    let image_url = validation::optional_text(
        &mut errors,
        "image_url",
        draft.image_url.as_deref(),
        Ad::IMAGE_URL_MAX_LEN,
    );
    let condition =
        validation::choice::<Condition>(&mut errors, "condition", draft.condition.as_deref());

    if let CategoryRef::Set(id) = draft.category {
        if categories.get_by_id(id).await?.is_none() {
            errors.add("category_id", validation::does_not_exist(id));
        }
    }

    match (title, description, image_url, condition) {
        (Some(title), Some(description), Some(image_url), Some(condition)) if errors.is_empty() => {
            Ok(ValidatedAd {
                title,
                description,
                image_url,
                category: draft.category,
                condition,
                is_active: draft.is_active,
            })
        }
        _ => Err(UseCaseError::Validation(errors)),
    }
}
