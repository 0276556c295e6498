//! Books table and its genre links

use async_trait::async_trait;
use sqlx::{Postgres, Transaction};

use super::{BookStore, Repository};
use crate::{
    error::AppResult,
    models::book::{Book, BookFields},
};

/// Book columns with the genre set folded into an array
const BOOK_SELECT: &str = r#"
    SELECT b.id, b.title, b.summary, b.isbn, b.author_id,
           COALESCE(
               ARRAY_AGG(bg.genre_id ORDER BY bg.genre_id) FILTER (WHERE bg.genre_id IS NOT NULL),
               '{}'
           ) AS genre_ids
    FROM books b
    LEFT JOIN book_genres bg ON bg.book_id = b.id
"#;

impl Repository {
    async fn books_query(&self, filter: &str, bind: Option<i32>) -> AppResult<Vec<Book>> {
        let query = format!("{} {} GROUP BY b.id ORDER BY b.title, b.id", BOOK_SELECT, filter);
        let mut builder = sqlx::query_as::<_, Book>(&query);
        if let Some(value) = bind {
            builder = builder.bind(value);
        }
        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn books_fetch_in(tx: &mut Transaction<'_, Postgres>, id: i32) -> AppResult<Book> {
        let query = format!("{} WHERE b.id = $1 GROUP BY b.id", BOOK_SELECT);
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_one(&mut **tx)
            .await?;
        Ok(row)
    }

    async fn books_link_genres(tx: &mut Transaction<'_, Postgres>, id: i32, data: &BookFields) -> AppResult<()> {
        let genre_ids: Vec<i32> = data.genre_ids.iter().copied().collect();
        sqlx::query("INSERT INTO book_genres (book_id, genre_id) SELECT $1, UNNEST($2::int[])")
            .bind(id)
            .bind(&genre_ids)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl BookStore for Repository {
    async fn books_list(&self) -> AppResult<Vec<Book>> {
        self.books_query("", None).await
    }

    async fn books_get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let query = format!("{} WHERE b.id = $1 GROUP BY b.id", BOOK_SELECT);
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn books_by_author(&self, author_id: i32) -> AppResult<Vec<Book>> {
        self.books_query("WHERE b.author_id = $1", Some(author_id)).await
    }

    async fn books_by_genre(&self, genre_id: i32) -> AppResult<Vec<Book>> {
        self.books_query(
            "WHERE b.id IN (SELECT book_id FROM book_genres WHERE genre_id = $1)",
            Some(genre_id),
        )
        .await
    }

    async fn books_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn books_create(&self, data: &BookFields) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO books (title, summary, isbn, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&data.title)
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(data.author_id)
        .fetch_one(&mut *tx)
        .await?;

        Self::books_link_genres(&mut tx, id, data).await?;
        let book = Self::books_fetch_in(&mut tx, id).await?;
        tx.commit().await?;
        Ok(book)
    }

    async fn books_update(&self, id: i32, data: &BookFields) -> AppResult<Option<Book>> {
        let mut tx = self.pool.begin().await?;

        let updated: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE books
            SET title = $1, summary = $2, isbn = $3, author_id = $4
            WHERE id = $5
            RETURNING id
            "#,
        )
        .bind(&data.title)
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(data.author_id)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        Self::books_link_genres(&mut tx, id, data).await?;
        let book = Self::books_fetch_in(&mut tx, id).await?;
        tx.commit().await?;
        Ok(Some(book))
    }

    async fn books_delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
