//! # Author Client
//!
//! High-level API for the `Author` actor. Wraps a `ResourceClient<Author>`
//! and exposes the catalog's query vocabulary. Every derived query here is a
//! [`Specification`] executed by the actor; none of them filters client-side.
//!
//! Derived queries take their arguments at face value: `find_by_age_greater_than(0)`
//! really means `age > 0`. The null-skipping behaviour of filters lives in
//! [`specification`](crate::specification) and applies to [`AuthorClient::search`]
//! and [`AuthorClient::search_by_book`] only.
use crate::author_actor::{AuthorAction, AuthorActionResult, AuthorError};
use crate::filter::{AuthorBookFilter, AuthorFilter};
use crate::model::{Author, AuthorCreate, AuthorId, AuthorUpdate, AuthorView, BookId};
use crate::specification::{self as spec, AGE, EMAIL, FIRST_NAME, LAST_NAME};
use async_trait::async_trait;
use spec_framework::{
    ActorClient, CompareOp, FrameworkError, Page, Pageable, ResourceClient, Specification,
    TextOp, Value,
};
use tracing::{debug, instrument};

/// Client for interacting with the Author actor.
#[derive(Clone)]
pub struct AuthorClient {
    inner: ResourceClient<Author>,
    default_page_size: usize,
}

#[async_trait]
impl ActorClient<Author> for AuthorClient {
    type Error = AuthorError;

    fn inner(&self) -> &ResourceClient<Author> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        AuthorError::from(e)
    }
}

impl AuthorClient {
    pub fn new(inner: ResourceClient<Author>, default_page_size: usize) -> Self {
        Self {
            inner,
            default_page_size,
        }
    }

    // --- Writes ---

    #[instrument(skip(self))]
    pub async fn create_author(&self, params: AuthorCreate) -> Result<AuthorId, AuthorError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Creates every author in order and returns their ids. Stops at the
    /// first failure; authors created before it are kept.
    #[instrument(skip(self, authors), fields(count = authors.len()))]
    pub async fn save_all(&self, authors: Vec<AuthorCreate>) -> Result<Vec<AuthorId>, AuthorError> {
        let mut ids = Vec::with_capacity(authors.len());
        for params in authors {
            ids.push(self.inner.create(params).await.map_err(Self::map_error)?);
        }
        debug!(?ids, "Saved");
        Ok(ids)
    }

    #[instrument(skip(self))]
    pub async fn update_author(
        &self,
        id: AuthorId,
        update: AuthorUpdate,
    ) -> Result<Author, AuthorError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_first_name_by_id(
        &self,
        id: AuthorId,
        first_name: &str,
    ) -> Result<Author, AuthorError> {
        let update = AuthorUpdate {
            first_name: Some(first_name.to_string()),
            ..Default::default()
        };
        self.update_author(id, update).await
    }

    #[instrument(skip(self))]
    pub async fn update_age_by_id(&self, id: AuthorId, age: i32) -> Result<Author, AuthorError> {
        let update = AuthorUpdate {
            age: Some(age),
            ..Default::default()
        };
        self.update_author(id, update).await
    }

    /// Removes every author strictly younger than `age`, returning how many went.
    #[instrument(skip(self))]
    pub async fn delete_younger_than(&self, age: i32) -> Result<usize, AuthorError> {
        debug!("Sending request");
        self.inner
            .delete_where(Specification::compare(AGE, CompareOp::Lt, age))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn add_book(&self, id: AuthorId, title: &str) -> Result<BookId, AuthorError> {
        debug!("Sending request");
        let result = self
            .inner
            .perform_action(id, AuthorAction::AddBook(title.to_string()))
            .await
            .map_err(Self::map_error)?;
        match result {
            AuthorActionResult::BookAdded(book_id) => Ok(book_id),
        }
    }

    // --- Filters ---

    /// Authors matching `filter`, see [`spec::build`].
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        filter: Option<&AuthorFilter>,
        pageable: Pageable,
    ) -> Result<Page<Author>, AuthorError> {
        let spec = spec::build(filter)?;
        self.find_page(spec, pageable).await
    }

    /// Authors matching `filter`, see [`spec::build_book_filter`].
    #[instrument(skip(self))]
    pub async fn search_by_book(
        &self,
        filter: Option<&AuthorBookFilter>,
        pageable: Pageable,
    ) -> Result<Page<Author>, AuthorError> {
        let spec = spec::build_book_filter(filter)?;
        self.find_page(spec, pageable).await
    }

    /// Page `page` of `spec`, sized by the configured default page size.
    #[instrument(skip(self))]
    pub async fn find_page_at(
        &self,
        spec: Specification<Author>,
        page: usize,
    ) -> Result<Page<Author>, AuthorError> {
        let pageable = Pageable::of(page, self.default_page_size).map_err(Self::map_error)?;
        self.find_page(spec, pageable).await
    }

    // --- Derived queries ---

    /// The author with exactly this email. More than one is an error.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Author>, AuthorError> {
        debug!("Sending request");
        self.inner
            .find_one(Specification::compare(EMAIL, CompareOp::Eq, email))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn exists_by_email(&self, email: &str) -> Result<bool, AuthorError> {
        debug!("Sending request");
        self.inner
            .exists(Specification::compare(EMAIL, CompareOp::Eq, email))
            .await
            .map_err(Self::map_error)
    }

    /// Case-sensitive substring of the email.
    #[instrument(skip(self))]
    pub async fn find_by_email_containing(&self, fragment: &str) -> Result<Vec<Author>, AuthorError> {
        self.find_all(Specification::text(EMAIL, TextOp::Contains, fragment, false))
            .await
    }

    #[instrument(skip(self))]
    pub async fn find_all_by_first_name(&self, first_name: &str) -> Result<Vec<Author>, AuthorError> {
        self.find_all(Specification::compare(FIRST_NAME, CompareOp::Eq, first_name))
            .await
    }

    /// Case-sensitive prefix of the first name.
    #[instrument(skip(self))]
    pub async fn find_all_by_first_name_starting_with(
        &self,
        prefix: &str,
    ) -> Result<Vec<Author>, AuthorError> {
        self.find_all(Specification::text(FIRST_NAME, TextOp::StartsWith, prefix, false))
            .await
    }

    #[instrument(skip(self))]
    pub async fn find_by_first_name_ignore_case(
        &self,
        first_name: &str,
    ) -> Result<Vec<Author>, AuthorError> {
        self.find_by_first_name_text(TextOp::Equals, first_name).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_first_name_containing_ignore_case(
        &self,
        fragment: &str,
    ) -> Result<Vec<Author>, AuthorError> {
        self.find_by_first_name_text(TextOp::Contains, fragment).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_first_name_starts_with_ignore_case(
        &self,
        prefix: &str,
    ) -> Result<Vec<Author>, AuthorError> {
        self.find_by_first_name_text(TextOp::StartsWith, prefix).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_first_name_ends_with_ignore_case(
        &self,
        suffix: &str,
    ) -> Result<Vec<Author>, AuthorError> {
        self.find_by_first_name_text(TextOp::EndsWith, suffix).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_first_name_in_ignore_case(
        &self,
        names: &[&str],
    ) -> Result<Vec<Author>, AuthorError> {
        let values = names.iter().map(|name| Value::from(*name)).collect();
        self.find_all(Specification::is_in(FIRST_NAME, values, true))
            .await
    }

    #[instrument(skip(self))]
    pub async fn find_by_first_name_or_last_name_ignore_case(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<Author>, AuthorError> {
        let spec = Specification::text(FIRST_NAME, TextOp::Equals, first_name, true).or(
            Specification::text(LAST_NAME, TextOp::Equals, last_name, true),
        );
        self.find_all(spec).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_age_greater_than(&self, age: i32) -> Result<Vec<Author>, AuthorError> {
        self.find_all(Specification::compare(AGE, CompareOp::Gt, age))
            .await
    }

    /// Inclusive on both ends.
    #[instrument(skip(self))]
    pub async fn find_by_age_between(&self, min: i32, max: i32) -> Result<Vec<Author>, AuthorError> {
        let spec = Specification::compare(AGE, CompareOp::Gte, min)
            .and(Specification::compare(AGE, CompareOp::Lte, max));
        self.find_all(spec).await
    }

    /// Projection of every author aged `age` or less.
    #[instrument(skip(self))]
    pub async fn find_by_age_less_than_equal(&self, age: i32) -> Result<Vec<AuthorView>, AuthorError> {
        let authors = self
            .find_all(Specification::compare(AGE, CompareOp::Lte, age))
            .await?;
        Ok(authors.into_iter().map(AuthorView::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn count_by_age_greater_than(&self, age: i32) -> Result<usize, AuthorError> {
        self.count(Specification::compare(AGE, CompareOp::Gt, age))
            .await
    }

    #[instrument(skip(self))]
    pub async fn count_by_age_greater_than_equal(&self, age: i32) -> Result<usize, AuthorError> {
        self.count(Specification::compare(AGE, CompareOp::Gte, age))
            .await
    }

    async fn find_by_first_name_text(
        &self,
        op: TextOp,
        pattern: &str,
    ) -> Result<Vec<Author>, AuthorError> {
        self.find_all(Specification::text(FIRST_NAME, op, pattern, true))
            .await
    }
}
