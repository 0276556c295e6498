//! Router integration tests over the in-memory store, plus store tests
//! against PostgreSQL

mod authors;
mod book_instances;
mod books;
mod genres;
mod home;
mod postgres;
