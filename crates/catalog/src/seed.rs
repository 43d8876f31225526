//! Demo catalog loaded at startup unless disabled.
//!
//! Contains pairs of same-kind products (E1/E2, A1/A2) so both valid and
//! invalid exchanges can be exercised against a fresh server.

use rust_decimal::Decimal;

use sebo_core::{DomainResult, ProductId};

use crate::product::{
    BookDetails, CdDetails, Condition, EbookDetails, HandoutDetails, Product, ProductDetails,
};

fn id(value: &str) -> DomainResult<ProductId> {
    ProductId::new(value)
}

fn book(author: &str, isbn: &str, pages: u32, genre: &str) -> ProductDetails {
    ProductDetails::Book(BookDetails {
        author: author.to_string(),
        isbn: isbn.to_string(),
        pages,
        genre: genre.to_string(),
    })
}

fn ebook(author: &str, isbn: &str, size_mb: f64) -> ProductDetails {
    ProductDetails::Ebook(EbookDetails {
        author: author.to_string(),
        isbn: isbn.to_string(),
        format: "PDF".to_string(),
        size_mb,
        drm: false,
    })
}

fn handout(subject: &str, institution: &str) -> ProductDetails {
    ProductDetails::Handout(HandoutDetails {
        subject: subject.to_string(),
        institution: institution.to_string(),
    })
}

/// The storefront's reference inventory, in listing order.
pub fn demo_catalog() -> DomainResult<Vec<Product>> {
    Ok(vec![
        Product::new(
            id("L1")?,
            "Clean Code",
            Decimal::new(120, 0),
            Condition::New,
            book("Robert C. Martin", "978-0132350884", 464, "Engenharia"),
        )?,
        Product::new(
            id("L2")?,
            "O Senhor dos Anéis",
            Decimal::new(90, 0),
            Condition::Used,
            book("J.R.R. Tolkien", "978-8595084757", 1200, "Fantasia"),
        )?,
        Product::new(
            id("E1")?,
            "Python Fluente",
            Decimal::new(60, 0),
            Condition::New,
            ebook("Luciano Ramalho", "978-8575224625", 12.5),
        )?,
        Product::new(
            id("E2")?,
            "Python Cookbook",
            Decimal::new(62, 0),
            Condition::New,
            ebook("Beazley", "978", 15.0),
        )?,
        Product::new(
            id("A1")?,
            "Cálculo I - Exercícios",
            Decimal::new(30, 0),
            Condition::Used,
            handout("Cálculo", "UF"),
        )?,
        Product::new(
            id("A2")?,
            "Cálculo II",
            Decimal::new(28, 0),
            Condition::Used,
            handout("Cálculo", "UF"),
        )?,
        Product::new(
            id("C1")?,
            "Kind of Blue",
            Decimal::new(40, 0),
            Condition::New,
            ProductDetails::Cd(CdDetails {
                artist: "Miles Davis".to_string(),
                genre: "Jazz".to_string(),
                tracks: 5,
            }),
        )?,
    ])
}
