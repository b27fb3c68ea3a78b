//! Entity <-> model mappers

mod article;
mod comment;
mod like;
mod user;
