//! PostgreSQL store tests. They need a server reachable through
//! `DATABASE_URL`; run with: cargo test -- --ignored

use std::collections::BTreeSet;

use sqlx::PgPool;

use local_library_server::{
    models::{
        author::AuthorFields, book::BookFields, book_instance::BookInstanceFields, genre::GenreFields, CopyStatus,
    },
    repository::{AuthorStore, BookInstanceStore, BookStore, GenreStore, Repository},
};

use crate::common::date;

fn author_fields(first_name: &str, family_name: &str) -> AuthorFields {
    AuthorFields {
        first_name: first_name.into(),
        family_name: family_name.into(),
        date_of_birth: None,
        date_of_death: None,
    }
}

fn book_fields(title: &str, author_id: i32, genre_ids: &[i32]) -> BookFields {
    BookFields {
        title: title.into(),
        summary: format!("Summary of {}", title),
        isbn: "9780141439587".into(),
        author_id,
        genre_ids: genre_ids.iter().copied().collect::<BTreeSet<_>>(),
    }
}

#[sqlx::test]
#[ignore]
async fn test_authors_update_keeps_identity(pool: PgPool) {
    let repo = Repository::new(pool);
    let shelley = repo.authors_create(&author_fields("Mary", "Shelley")).await.unwrap();
    let austin = repo.authors_create(&author_fields("Jane", "Austin")).await.unwrap();

    let mut fields = author_fields("Jane", "Austen");
    fields.date_of_birth = Some(date(1775, 12, 16));
    let updated = repo.authors_update(austin.id, &fields).await.unwrap().unwrap();

    assert_eq!(updated.id, austin.id);
    assert_eq!(updated.date_of_birth, Some(date(1775, 12, 16)));
    let names: Vec<String> = repo.authors_list().await.unwrap().iter().map(|a| a.name()).collect();
    assert_eq!(names, ["Austen, Jane", "Shelley, Mary"]);

    assert!(repo.authors_update(-1, &fields).await.unwrap().is_none());
    assert!(repo.authors_delete(shelley.id).await.unwrap());
    assert!(!repo.authors_delete(shelley.id).await.unwrap());
    assert_eq!(repo.authors_count().await.unwrap(), 1);
}

#[sqlx::test]
#[ignore]
async fn test_books_carry_their_genre_set(pool: PgPool) {
    let repo = Repository::new(pool);
    let author = repo.authors_create(&author_fields("Jane", "Austen")).await.unwrap();
    let romance = repo.genres_create(&GenreFields { name: "Romance".into() }).await.unwrap();
    let satire = repo.genres_create(&GenreFields { name: "Satire".into() }).await.unwrap();

    let emma = repo
        .books_create(&book_fields("Emma", author.id, &[satire.id, romance.id]))
        .await
        .unwrap();
    let plain = repo.books_create(&book_fields("Lady Susan", author.id, &[])).await.unwrap();
    assert_eq!(emma.genre_ids, vec![romance.id, satire.id]);
    assert!(plain.genre_ids.is_empty());

    let updated = repo
        .books_update(emma.id, &book_fields("Emma", author.id, &[satire.id]))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, emma.id);
    assert_eq!(updated.genre_ids, vec![satire.id]);

    let by_genre: Vec<String> = repo
        .books_by_genre(satire.id)
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.title)
        .collect();
    assert_eq!(by_genre, ["Emma"]);
    assert!(repo.books_by_genre(romance.id).await.unwrap().is_empty());

    let by_author: Vec<String> = repo
        .books_by_author(author.id)
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.title)
        .collect();
    assert_eq!(by_author, ["Emma", "Lady Susan"]);

    assert!(repo.books_update(-1, &book_fields("Ghost", author.id, &[])).await.unwrap().is_none());
    assert!(repo.books_delete(emma.id).await.unwrap());
    assert_eq!(repo.books_count().await.unwrap(), 1);
}

#[sqlx::test]
#[ignore]
async fn test_book_instances_status_round_trip(pool: PgPool) {
    let repo = Repository::new(pool);
    let author = repo.authors_create(&author_fields("Jane", "Austen")).await.unwrap();
    let emma = repo.books_create(&book_fields("Emma", author.id, &[])).await.unwrap();

    let copy = repo
        .book_instances_create(&BookInstanceFields {
            book_id: emma.id,
            imprint: "London, Penguin, 2003".into(),
            status: CopyStatus::Maintenance,
            due_back: None,
        })
        .await
        .unwrap();

    let loaned = repo
        .book_instances_update(
            copy.id,
            &BookInstanceFields {
                book_id: emma.id,
                imprint: copy.imprint.clone(),
                status: CopyStatus::Loaned,
                due_back: Some(date(2024, 1, 15)),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaned.id, copy.id);
    assert_eq!(loaned.status, CopyStatus::Loaned);
    assert_eq!(loaned.due_back, Some(date(2024, 1, 15)));

    assert_eq!(repo.book_instances_count(None).await.unwrap(), 1);
    assert_eq!(repo.book_instances_count(Some(CopyStatus::Loaned)).await.unwrap(), 1);
    assert_eq!(repo.book_instances_count(Some(CopyStatus::Available)).await.unwrap(), 0);
    assert_eq!(repo.book_instances_by_book(emma.id).await.unwrap().len(), 1);
    assert!(repo.book_instances_delete(copy.id).await.unwrap());
}
