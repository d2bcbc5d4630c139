//! Catalog records: products, their categories, imagery and ratings.

pub mod category;
pub mod image;
pub mod product;
pub mod rating;

pub use category::{Category, CategoryDraft, CategoryPatch};
pub use image::{Image, ImageDraft, ImagePatch};
pub use product::{Product, ProductDraft, ProductPatch};
pub use rating::{Rating, RatingDraft, RatingPatch};
