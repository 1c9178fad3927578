use std::sync::Arc;

use anyhow::Result;
use marquee_core::application::{AppUnitOfWork, CatalogService, CatalogSettings};
use marquee_core::api::requests::{CreateMovieRequest, CreateRatingRequest, CreateReviewRequest};
use marquee_core::database::PostgresDatabase;
use marquee_core::database::infrastructure::postgres::{
    PostgresMovieRepository, PostgresRatingRepository, PostgresReviewRepository,
};
use marquee_core::database::ports::{
    MovieRepository, NewRating, NewReview, RatingRepository, ReviewRepository,
};
use marquee_core::error::CatalogError;
use marquee_core::query::{MovieFilter, MovieListParams, PageRequest};
use marquee_model::{ActorId, MovieId, ReviewId, Star};
use sqlx::PgPool;

fn catalog(pool: PgPool) -> CatalogService {
    let db = Arc::new(PostgresDatabase::from_pool(pool));
    let uow = AppUnitOfWork::from_postgres(db).expect("postgres unit of work");
    CatalogService::new(uow, CatalogSettings::default())
}

async fn rating_rows(pool: &PgPool, ip: &str, movie: i64) -> Result<Vec<i16>> {
    let stars = sqlx::query_scalar("SELECT star FROM ratings WHERE ip = $1 AND movie_id = $2")
        .bind(ip)
        .bind(movie)
        .fetch_all(pool)
        .await?;
    Ok(stars)
}

fn rating(ip: &str, star: i64, movie: i64) -> NewRating {
    NewRating {
        ip: ip.to_string(),
        star: Star::new(star).expect("valid star"),
        movie: MovieId(movie),
    }
}

#[sqlx::test(
    migrator = "marquee_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("catalog"))
)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn aggregate_reports_truncated_mean_and_rater(pool: PgPool) -> Result<()> {
    let ratings = PostgresRatingRepository::new(pool.clone());
    for (ip, star) in [("10.0.0.1", 3), ("10.0.0.2", 4), ("10.0.0.3", 5)] {
        ratings.upsert(rating(ip, star, 1)).await?;
    }
    ratings.upsert(rating("10.0.0.1", 4, 2)).await?;
    ratings.upsert(rating("10.0.0.2", 5, 2)).await?;

    let movies = PostgresMovieRepository::new(pool);
    let page = movies
        .list_public("10.0.0.2", &MovieFilter::default(), PageRequest::new(1, 10))
        .await?;

    assert_eq!(page.total, 2, "draft movie must not be counted");
    let stalker = &page.items[0];
    assert_eq!(stalker.id, MovieId(1));
    assert_eq!(stalker.middle_star, Some(4));
    assert!(stalker.rating_user);
    // {4, 5} truncates to 4
    assert_eq!(page.items[1].middle_star, Some(4));

    let outsider = movies
        .list_public("10.0.0.4", &MovieFilter::default(), PageRequest::new(1, 10))
        .await?;
    assert!(outsider.items.iter().all(|item| !item.rating_user));
    Ok(())
}

#[sqlx::test(
    migrator = "marquee_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("catalog"))
)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn unrated_movie_has_null_mean(pool: PgPool) -> Result<()> {
    let movies = PostgresMovieRepository::new(pool);
    let page = movies
        .list_public("10.0.0.1", &MovieFilter::default(), PageRequest::new(1, 10))
        .await?;
    assert!(page.items.iter().all(|item| item.middle_star.is_none()));
    assert!(page.items.iter().all(|item| !item.rating_user));
    Ok(())
}

#[sqlx::test(
    migrator = "marquee_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("catalog"))
)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn rating_upsert_keeps_one_row_per_client(pool: PgPool) -> Result<()> {
    let ratings = PostgresRatingRepository::new(pool.clone());
    let first = ratings.upsert(rating("192.0.2.7", 5, 1)).await?;
    let second = ratings.upsert(rating("192.0.2.7", 2, 1)).await?;
    assert_eq!(first.id, second.id);

    assert_eq!(rating_rows(&pool, "192.0.2.7", 1).await?, vec![2]);
    Ok(())
}

#[sqlx::test(
    migrator = "marquee_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("catalog"))
)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn concurrent_upserts_for_one_client_keep_one_row(pool: PgPool) -> Result<()> {
    let ratings = PostgresRatingRepository::new(pool.clone());
    let (first, second) = tokio::join!(
        ratings.upsert(rating("192.0.2.8", 3, 1)),
        ratings.upsert(rating("192.0.2.8", 4, 1)),
    );
    let (first, second) = (first?, second?);
    assert_eq!(first.id, second.id);

    let stars = rating_rows(&pool, "192.0.2.8", 1).await?;
    assert_eq!(stars.len(), 1);
    assert!(stars[0] == 3 || stars[0] == 4);
    Ok(())
}

#[sqlx::test(
    migrator = "marquee_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("catalog"))
)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn rating_a_draft_is_a_field_error(pool: PgPool) -> Result<()> {
    let ratings = PostgresRatingRepository::new(pool.clone());
    let err = ratings.upsert(rating("192.0.2.7", 3, 3)).await.unwrap_err();
    assert!(matches!(err, CatalogError::Validation(ref f) if f.contains("movie")));
    assert!(rating_rows(&pool, "192.0.2.7", 3).await?.is_empty());
    Ok(())
}

#[sqlx::test(
    migrator = "marquee_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("catalog"))
)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn genre_and_year_filters_do_not_multiply_rows(pool: PgPool) -> Result<()> {
    let ratings = PostgresRatingRepository::new(pool.clone());
    ratings.upsert(rating("10.0.0.1", 5, 1)).await?;

    let movies = PostgresMovieRepository::new(pool);
    let filter = MovieFilter {
        genres: vec!["Drama".into(), "Science fiction".into()],
        ..Default::default()
    };
    let page = movies
        .list_public("10.0.0.1", &filter, PageRequest::new(1, 10))
        .await?;
    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].middle_star, Some(5));

    let filter = MovieFilter {
        year_min: Some(1975),
        year_max: Some(1980),
        ..Default::default()
    };
    let page = movies
        .list_public("10.0.0.1", &filter, PageRequest::new(1, 10))
        .await?;
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, MovieId(1));
    Ok(())
}

#[sqlx::test(
    migrator = "marquee_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("catalog", "reviews"))
)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn movie_detail_renders_review_threads(pool: PgPool) -> Result<()> {
    let detail = catalog(pool).movie_detail(MovieId(1)).await?;

    assert_eq!(detail.category.as_deref(), Some("Feature film"));
    assert_eq!(detail.genres, vec!["Drama", "Science fiction"]);
    assert_eq!(detail.directors.len(), 1);
    assert_eq!(detail.directors[0].id, ActorId(1));
    assert_eq!(detail.actors.len(), 1);

    assert_eq!(detail.reviews.len(), 1);
    let root = &detail.reviews[0];
    assert_eq!(root.name, "R");
    let replies: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(replies, vec!["C1", "C2"]);
    assert_eq!(root.children[0].children[0].name, "C1a");
    Ok(())
}

#[sqlx::test(
    migrator = "marquee_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("catalog"))
)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn draft_detail_is_not_found(pool: PgPool) -> Result<()> {
    let err = catalog(pool).movie_detail(MovieId(3)).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
    Ok(())
}

#[sqlx::test(
    migrator = "marquee_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("catalog", "reviews"))
)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn invalid_review_references_persist_nothing(pool: PgPool) -> Result<()> {
    let reviews = PostgresReviewRepository::new(pool.clone());

    let err = reviews
        .create(NewReview {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            text: "Where is this movie?".into(),
            movie: MovieId(404),
            parent: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(ref f) if f.contains("movie")));

    let err = reviews
        .create(NewReview {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            text: "Replying across movies".into(),
            movie: MovieId(2),
            parent: Some(ReviewId(1)),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(ref f) if f.contains("parent")));

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
        .fetch_one(&pool)
        .await?;
    assert_eq!(rows, 4);
    Ok(())
}

#[sqlx::test(
    migrator = "marquee_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("catalog", "reviews"))
)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn reply_is_nested_under_its_parent(pool: PgPool) -> Result<()> {
    let service = catalog(pool.clone());
    let created = service
        .create_review(CreateReviewRequest {
            name: Some("Dee".into()),
            email: Some("dee@example.com".into()),
            text: Some("Reply to C2".into()),
            movie: Some(MovieId(1)),
            parent: Some(ReviewId(3)),
        })
        .await?;
    assert_eq!(created.parent, Some(ReviewId(3)));

    let listed = PostgresReviewRepository::new(pool).list_for_movie(MovieId(1)).await?;
    assert_eq!(listed.last().map(|r| r.id), Some(created.id));

    let detail = service.movie_detail(MovieId(1)).await?;
    assert_eq!(detail.reviews[0].children[1].children[0].name, "Dee");
    Ok(())
}

#[sqlx::test(
    migrator = "marquee_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("catalog"))
)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn movie_creation_links_cast_and_rejects_taken_slug(pool: PgPool) -> Result<()> {
    let service = catalog(pool.clone());
    let request = CreateMovieRequest {
        title: Some("Mirror".into()),
        url: Some("mirror".into()),
        year: Some(1975),
        directors: vec![ActorId(1)],
        actors: vec![ActorId(3)],
        genres: vec![marquee_model::GenreId(1)],
        category: Some(marquee_model::CategoryId(1)),
        ..Default::default()
    };
    let created = service.create_movie(request.clone()).await?;
    assert_eq!(created.directors, vec![ActorId(1)]);

    let detail = service.movie_detail(created.id).await?;
    assert_eq!(detail.directors[0].name, "Andrei Tarkovsky");
    assert_eq!(detail.actors[0].name, "Natalya Bondarchuk");

    let err = service.create_movie(request).await.unwrap_err();
    assert!(matches!(err, CatalogError::Validation(ref f) if f.contains("url")));

    let err = service
        .create_movie(CreateMovieRequest {
            title: Some("Ghost".into()),
            url: Some("ghost".into()),
            genres: vec![marquee_model::GenreId(77)],
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(ref f) if f.contains("genres")));
    let ghost: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies WHERE url = 'ghost'")
        .fetch_one(&pool)
        .await?;
    assert_eq!(ghost, 0);
    Ok(())
}

#[sqlx::test(
    migrator = "marquee_core::MIGRATOR",
    fixtures(path = "../fixtures", scripts("catalog"))
)]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn service_rates_with_connection_identity(pool: PgPool) -> Result<()> {
    let service = catalog(pool);
    let receipt = service
        .rate_movie(
            "198.51.100.3",
            CreateRatingRequest {
                star: Some(4),
                movie: Some(MovieId(2)),
            },
        )
        .await?;
    assert_eq!(receipt.star.value(), 4);

    let page = service
        .list_movies(
            "198.51.100.3",
            &MovieListParams {
                genres: Some("Science fiction".into()),
                ..Default::default()
            },
        )
        .await?;
    let solaris = page.results.iter().find(|m| m.id == MovieId(2)).expect("listed");
    assert!(solaris.rating_user);
    assert_eq!(solaris.middle_star, Some(4));
    Ok(())
}
