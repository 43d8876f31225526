use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use sebo_core::{DomainError, DomainResult, Entity, ProductId};

/// Product category.
///
/// The wire name (`__type__`) is the storefront's class name; the slug is the
/// lowercase form accepted in filters and registration bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductKind {
    #[serde(rename = "Livro")]
    Book,
    #[serde(rename = "EBook")]
    Ebook,
    #[serde(rename = "Apostila")]
    Handout,
    #[serde(rename = "CD")]
    Cd,
}

impl ProductKind {
    pub const ALL: [ProductKind; 4] = [
        ProductKind::Book,
        ProductKind::Ebook,
        ProductKind::Handout,
        ProductKind::Cd,
    ];

    /// Name used in the `__type__` tag.
    pub fn type_name(self) -> &'static str {
        match self {
            ProductKind::Book => "Livro",
            ProductKind::Ebook => "EBook",
            ProductKind::Handout => "Apostila",
            ProductKind::Cd => "CD",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            ProductKind::Book => "livro",
            ProductKind::Ebook => "ebook",
            ProductKind::Handout => "apostila",
            ProductKind::Cd => "cd",
        }
    }

    /// Kind-specific fields a registration body may carry in `extras`.
    pub fn detail_fields(self) -> &'static [&'static str] {
        match self {
            ProductKind::Book => &["autor", "isbn", "paginas", "genero"],
            ProductKind::Ebook => &["autor", "isbn", "formato", "tamanho_mb", "drm"],
            ProductKind::Handout => &["materia", "instituicao"],
            ProductKind::Cd => &["artista", "genero", "faixas"],
        }
    }

    /// Parse a slug or type name, ignoring case.
    pub fn parse(value: &str) -> DomainResult<Self> {
        let wanted = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.slug() == wanted)
            .ok_or_else(|| {
                DomainError::bad_request(format!("Tipo de produto '{wanted}' inválido."))
            })
    }
}

impl core::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Physical condition of the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "novo")]
    New,
    #[serde(rename = "usado")]
    Used,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDetails {
    #[serde(rename = "autor")]
    pub author: String,
    pub isbn: String,
    #[serde(rename = "paginas")]
    pub pages: u32,
    #[serde(rename = "genero")]
    pub genre: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EbookDetails {
    #[serde(rename = "autor")]
    pub author: String,
    pub isbn: String,
    #[serde(rename = "formato")]
    pub format: String,
    #[serde(rename = "tamanho_mb")]
    pub size_mb: f64,
    pub drm: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoutDetails {
    #[serde(rename = "materia")]
    pub subject: String,
    #[serde(rename = "instituicao")]
    pub institution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdDetails {
    #[serde(rename = "artista")]
    pub artist: String,
    #[serde(rename = "genero")]
    pub genre: String,
    #[serde(rename = "faixas")]
    pub tracks: u32,
}

/// Kind-specific attributes. The variant *is* the product's category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__type__")]
pub enum ProductDetails {
    #[serde(rename = "Livro")]
    Book(BookDetails),
    #[serde(rename = "EBook")]
    Ebook(EbookDetails),
    #[serde(rename = "Apostila")]
    Handout(HandoutDetails),
    #[serde(rename = "CD")]
    Cd(CdDetails),
}

impl ProductDetails {
    pub fn kind(&self) -> ProductKind {
        match self {
            ProductDetails::Book(_) => ProductKind::Book,
            ProductDetails::Ebook(_) => ProductKind::Ebook,
            ProductDetails::Handout(_) => ProductKind::Handout,
            ProductDetails::Cd(_) => ProductKind::Cd,
        }
    }

    /// Build details from a loose `extras` mapping.
    ///
    /// Fields outside `kind.detail_fields()` are rejected, as are missing or
    /// mistyped ones.
    pub fn from_extras(kind: ProductKind, extras: Map<String, Value>) -> DomainResult<Self> {
        let invalid = |reason: String| {
            DomainError::bad_request(format!(
                "Argumentos inválidos para o tipo {}: {reason}",
                kind.slug()
            ))
        };

        if let Some(unknown) = extras
            .keys()
            .find(|key| !kind.detail_fields().contains(&key.as_str()))
        {
            return Err(invalid(format!("campo inesperado '{unknown}'")));
        }

        let mut tagged = extras;
        tagged.insert(
            "__type__".to_string(),
            Value::String(kind.type_name().to_string()),
        );
        serde_json::from_value(Value::Object(tagged)).map_err(|e| invalid(e.to_string()))
    }
}

/// A catalog entry.
///
/// Serialized flat: common fields, kind-specific fields and the `__type__` tag
/// live side by side in one JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    #[serde(rename = "titulo")]
    title: String,
    #[serde(rename = "preco", with = "rust_decimal::serde::float")]
    price: Decimal,
    #[serde(rename = "estado")]
    condition: Condition,
    #[serde(rename = "disponivel", default = "available_by_default")]
    available: bool,
    #[serde(flatten)]
    details: ProductDetails,
}

fn available_by_default() -> bool {
    true
}

/// Keys every wire product may carry regardless of kind.
const COMMON_FIELDS: [&str; 6] = ["__type__", "id", "titulo", "preco", "estado", "disponivel"];

impl Product {
    /// Register a new, available product.
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: Decimal,
        condition: Condition,
        details: ProductDetails,
    ) -> DomainResult<Self> {
        let product = Self {
            id,
            title: title.into(),
            price,
            condition,
            available: true,
            details,
        };
        product.validate()?;
        Ok(product)
    }

    /// Decode a product submitted for registration.
    ///
    /// Keys outside the common fields and the kind's detail fields are
    /// rejected. The result is always available: a new entry cannot start sold.
    pub fn from_wire(value: Value) -> DomainResult<Self> {
        let Value::Object(fields) = value else {
            return Err(DomainError::bad_request("produto deve ser um objeto"));
        };
        let type_name = fields
            .get("__type__")
            .and_then(Value::as_str)
            .ok_or_else(|| DomainError::bad_request("produto sem '__type__'"))?;
        let kind = ProductKind::parse(type_name)?;

        let invalid = |reason: String| {
            DomainError::bad_request(format!(
                "Argumentos inválidos para o tipo {}: {reason}",
                kind.slug()
            ))
        };

        let allowed =
            |key: &str| COMMON_FIELDS.contains(&key) || kind.detail_fields().contains(&key);
        if let Some(unknown) = fields.keys().find(|key| !allowed(key.as_str())) {
            return Err(invalid(format!("campo inesperado '{unknown}'")));
        }

        let mut product: Product =
            serde_json::from_value(Value::Object(fields)).map_err(|e| invalid(e.to_string()))?;
        product.validate()?;
        product.set_available(true);
        Ok(product)
    }

    /// Check the invariants a decoded product must satisfy before it enters
    /// the catalog.
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::bad_request("titulo não pode ser vazio"));
        }
        if self.price < Decimal::ZERO {
            return Err(DomainError::bad_request("preco não pode ser negativo"));
        }
        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn details(&self) -> &ProductDetails {
        &self.details
    }

    /// Category used for exchange compatibility.
    pub fn kind(&self) -> ProductKind {
        self.details.kind()
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Case-insensitive title match; a blank term matches everything.
    ///
    /// A non-blank term is matched as given, surrounding spaces included.
    pub fn matches_term(&self, term: &str) -> bool {
        if term.trim().is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&term.to_lowercase())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let status = if self.available { "disponível" } else { "vendido" };
        write!(
            f,
            "{}({}) – {} – R${:.2} – {}",
            self.kind(),
            self.id,
            self.title,
            self.price,
            status
        )
    }
}
