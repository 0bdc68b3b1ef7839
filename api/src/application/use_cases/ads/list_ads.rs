use crate::application::dto::ads::{AdFilter, AdQuery};
use crate::application::dto::pagination::{Page, PageRequest};
use crate::application::errors::{UseCaseError, UseCaseResult};
use crate::application::ports::ad_repository::AdRepository;
use crate::application::ports::category_repository::CategoryRepository;
use crate::application::validation::{self, FieldErrors};
use crate::domain::ads::ad::{Ad, Condition};

const INVALID_CATEGORY: &str =
    "Select a valid choice. That choice is not one of the available choices.";

pub struct ListAds<'a, R, C>
where
    R: AdRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    pub repo: &'a R,
    pub categories: &'a C,
}

impl<'a, R, C> ListAds<'a, R, C>
where
    R: AdRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    pub async fn execute(&self, query: &AdQuery, page: PageRequest) -> UseCaseResult<Page<Ad>> {
        let filter = self.filter_from(query).await?;
        let result = self.repo.list_active(&filter, page).await?;
        page.ensure_within(result.total)?;
        Ok(result)
    }

    // Empty values mean "no filter", like an unset form field.
    async fn filter_from(&self, query: &AdQuery) -> UseCaseResult<AdFilter> {
        let mut errors = FieldErrors::default();
        let mut filter = AdFilter::default();

        if let Some(raw) = non_empty(&query.category) {
            let known = match raw.parse::<i64>() {
                Ok(id) => self.categories.get_by_id(id).await?.map(|c| c.id),
                Err(_) => None,
            };
            match known {
                Some(id) => filter.category_id = Some(id),
                None => errors.add("category", INVALID_CATEGORY),
            }
        }
        if let Some(raw) = non_empty(&query.condition) {
            match raw.parse::<Condition>() {
                Ok(condition) => filter.condition = Some(condition),
                Err(_) => errors.add("condition", invalid_filter_choice(raw)),
            }
        }
        if let Some(raw) = non_empty(&query.search) {
            if validation::free_of_nul(&mut errors, "search", raw) {
                filter.search = Some(raw.to_string());
            }
        }

        errors.into_result().map_err(UseCaseError::Validation)?;
        Ok(filter)
    }
}

fn invalid_filter_choice(value: &str) -> String {
    format!("Select a valid choice. {value} is not one of the available choices.")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
