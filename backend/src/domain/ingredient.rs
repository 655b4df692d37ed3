//! Ingredient resource owned by exactly one user.

use std::cmp::Ordering;
use std::fmt;

use uuid::Uuid;

use super::UserId;

/// Maximum allowed ingredient name length.
pub const INGREDIENT_NAME_MAX: usize = 255;

/// Validation errors for ingredient values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngredientValidationError {
    #[error("ingredient id must be a valid UUID")]
    InvalidId,
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
}

/// Ingredient identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IngredientId(Uuid);

impl IngredientId {
    /// Parse an identifier taken from a request path.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, IngredientValidationError> {
        Uuid::parse_str(raw.as_ref())
            .map(Self)
            .map_err(|_| IngredientValidationError::InvalidId)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty, trimmed ingredient name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientName(String);

impl IngredientName {
    /// Trim and validate a name.
    ///
    /// # Examples
    /// ```
    /// use recipe_backend::domain::IngredientName;
    ///
    /// assert!(IngredientName::new("   ").is_err());
    /// assert_eq!(IngredientName::new(" Kale ").unwrap().as_ref(), "Kale");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, IngredientValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IngredientValidationError::EmptyName);
        }
        if trimmed.chars().count() > INGREDIENT_NAME_MAX {
            return Err(IngredientValidationError::NameTooLong {
                max: INGREDIENT_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for IngredientName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Ingredient record.
///
/// ## Invariants
/// - `owner` is fixed at creation and never taken from client input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    id: IngredientId,
    owner: UserId,
    name: IngredientName,
}

impl Ingredient {
    /// Create a new ingredient for `owner`.
    pub fn create(owner: UserId, name: IngredientName) -> Self {
        Self::restore(IngredientId::random(), owner, name)
    }

    /// Rebuild an ingredient from stored components.
    pub fn restore(id: IngredientId, owner: UserId, name: IngredientName) -> Self {
        Self { id, owner, name }
    }

    pub fn id(&self) -> &IngredientId {
        &self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn name(&self) -> &IngredientName {
        &self.name
    }

    /// Return a copy carrying a new name; identity and owner are preserved.
    pub fn renamed(self, name: IngredientName) -> Self {
        Self { name, ..self }
    }

    /// Listing order: name descending, then id so ties stay stable.
    pub fn listing_order(a: &Self, b: &Self) -> Ordering {
        b.name
            .as_ref()
            .cmp(a.name.as_ref())
            .then_with(|| a.id.cmp(&b.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", IngredientValidationError::EmptyName)]
    #[case("  \t ", IngredientValidationError::EmptyName)]
    fn blank_names_are_rejected(#[case] raw: &str, #[case] expected: IngredientValidationError) {
        assert_eq!(IngredientName::new(raw).expect_err("blank"), expected);
    }

    #[rstest]
    fn overlong_names_are_rejected() {
        let err = IngredientName::new("x".repeat(INGREDIENT_NAME_MAX + 1)).expect_err("long");
        assert_eq!(
            err,
            IngredientValidationError::NameTooLong {
                max: INGREDIENT_NAME_MAX
            }
        );
    }

    #[rstest]
    fn listing_order_is_name_descending() {
        let owner = UserId::random();
        let mut items = vec![
            Ingredient::create(owner, IngredientName::new("Dessert").expect("name")),
            Ingredient::create(owner, IngredientName::new("Vegan").expect("name")),
            Ingredient::create(owner, IngredientName::new("Comfort food").expect("name")),
        ];
        items.sort_by(Ingredient::listing_order);
        let names: Vec<&str> = items.iter().map(|i| i.name().as_ref()).collect();
        assert_eq!(names, ["Vegan", "Dessert", "Comfort food"]);
    }

    #[rstest]
    fn renamed_keeps_identity() {
        let owner = UserId::random();
        let original = Ingredient::create(owner, IngredientName::new("Salt").expect("name"));
        let id = *original.id();
        let renamed = original.renamed(IngredientName::new("Sea salt").expect("name"));
        assert_eq!(renamed.id(), &id);
        assert_eq!(renamed.owner(), &owner);
        assert_eq!(renamed.name().as_ref(), "Sea salt");
    }

    #[rstest]
    fn ids_parse_from_strings() {
        let id = IngredientId::random();
        assert_eq!(IngredientId::new(id.to_string()).expect("parse"), id);
        assert_eq!(
            IngredientId::new("nope").expect_err("invalid"),
            IngredientValidationError::InvalidId
        );
    }
}
