use author_catalog::config::CatalogConfig;
use author_catalog::filter::{AuthorBookFilter, AuthorFilter};
use author_catalog::lifecycle::CatalogSystem;
use author_catalog::model::Author;
use author_catalog::seed;
use author_catalog::specification as spec;
use spec_framework::tracing::setup_tracing;
use spec_framework::{ActorClient, Pageable, Sort, Specification};
use tracing::{info, info_span, Instrument};

fn log_authors<'a>(authors: impl IntoIterator<Item = &'a Author>) {
    for a in authors {
        info!(
            first_name = %a.first_name,
            last_name = %a.last_name,
            age = a.age,
            email = %a.email,
            "Author"
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let system = CatalogSystem::new(CatalogConfig::from_env());
    let client = &system.author_client;

    let ids = client
        .save_all(seed::sample_authors())
        .await
        .map_err(|e| e.to_string())?;
    info!(count = ids.len(), "Sample authors saved");

    // 1) Exact name, strict age and email fragment
    async {
        let spec = Specification::all_of([
            spec::has_first_name(Some("Daniel")),
            spec::has_age_greater_than(30),
            spec::email_contains(Some("gmail")),
        ]);
        let authors = client.find_all(spec).await?;
        log_authors(&authors);
        Ok::<_, author_catalog::author_actor::AuthorError>(())
    }
    .instrument(info_span!("daniels_over_30"))
    .await
    .map_err(|e| e.to_string())?;

    // 2) Paging and sorting
    let pageable = Pageable::of(0, 2)
        .map_err(|e| e.to_string())?
        .with_sort(Sort::by("age").descending());
    async {
        let spec = Specification::all_of([
            spec::has_first_name(Some("Maria")),
            spec::has_age_greater_than(30),
            spec::email_contains(Some("gmail")),
        ]);
        let page = client.find_page(spec, pageable.clone()).await?;
        log_authors(&page.content);
        info!(
            total_elements = page.total_elements,
            total_pages = page.total_pages(),
            number = page.number,
            size = page.size,
            has_next = page.has_next(),
            has_previous = page.has_previous(),
            "Page"
        );
        Ok::<_, author_catalog::author_actor::AuthorError>(())
    }
    .instrument(info_span!("paged_marias"))
    .await
    .map_err(|e| e.to_string())?;

    // 3) AuthorFilter
    async {
        let filter = AuthorFilter::new()
            .with_first_name("Da")
            .with_email_fragment("gmail")
            .with_min_age(30)
            .with_max_age(61);
        let page = client.search(Some(&filter), pageable.clone()).await?;
        log_authors(&page.content);
        info!(total_elements = page.total_elements, "Filtered");
        Ok::<_, author_catalog::author_actor::AuthorError>(())
    }
    .instrument(info_span!("author_filter"))
    .await
    .map_err(|e| e.to_string())?;

    // 4) Join with books
    async {
        client.save_all(seed::authors_with_books()).await?;
        let filter = AuthorBookFilter::new()
            .with_first_name("Caio")
            .with_book_title_fragment("spring")
            .with_min_age(30);
        let page = client
            .search_by_book(Some(&filter), Pageable::of(0, 5)?)
            .await?;
        for a in &page.content {
            let first_book = a
                .books
                .first()
                .map(|b| b.title.as_str())
                .unwrap_or("no book found");
            info!(first_name = %a.first_name, age = a.age, first_book, "Author with books");
        }
        Ok::<_, author_catalog::author_actor::AuthorError>(())
    }
    .instrument(info_span!("book_join"))
    .await
    .map_err(|e| e.to_string())?;

    // Derived queries
    async {
        let joaos = client.find_by_first_name_ignore_case("JOÃO").await?;
        info!(count = joaos.len(), "find_by_first_name_ignore_case(JOÃO)");
        let over_40 = client.count_by_age_greater_than(40).await?;
        info!(over_40, "count_by_age_greater_than(40)");
        let views = client.find_by_age_less_than_equal(30).await?;
        info!(?views, "find_by_age_less_than_equal(30)");
        let removed = client.delete_younger_than(30).await?;
        info!(removed, "delete_younger_than(30)");
        Ok::<_, author_catalog::author_actor::AuthorError>(())
    }
    .instrument(info_span!("derived_queries"))
    .await
    .map_err(|e| e.to_string())?;

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
