//! Fluent checks over a [`PageData`] snapshot.
//!
//! Every check returns the same validator on success so several checks can be
//! chained with `?`:
//!
//! ```
//! # use brand_checks::assertions::assert_that;
//! # use brand_checks::data::{BasePageData, BrandFields, PageData};
//! # fn main() -> brand_checks::Result<()> {
//! # let base = BasePageData::new("https://example.com/brand/acme".into(), String::new(),
//! #     String::new(), String::new(), String::new(), Vec::new());
//! # let page = PageData::brand(base, BrandFields { header1: "Acme Products".into(),
//! #     description: String::new(), identified: true, na_gif: false });
//! assert_that(&page)
//!     .is_identified()?
//!     .is_not_na_gif()?
//!     .has_header1_equal_to("Acme Products")?;
//! # Ok(())
//! # }
//! ```

use crate::data::{Field, PageData, PageKind};
use crate::error::{CheckError, Result};

const BRAND_NOT_IDENTIFIED: &str = "brand is not identified";
const ITEM_NOT_IDENTIFIED: &str = "item is not identified";
const PLACEHOLDER_NA_GIF: &str = "image is a placeholder url ending in na.gif";

/// Entry point for checks on a snapshot
pub fn assert_that(actual: &PageData) -> PageDataAssert<'_> {
    PageDataAssert { actual }
}

/// Validator bound to one snapshot. It never mutates the snapshot.
#[derive(Debug)]
pub struct PageDataAssert<'a> {
    actual: &'a PageData,
}

impl<'a> PageDataAssert<'a> {
    pub fn actual(&self) -> &'a PageData {
        self.actual
    }

    fn url(&self) -> &str {
        self.actual.url()
    }

    /// Fails with `FieldEmpty` when `value` has zero length
    pub fn has_non_empty(&self, label: &str, value: &str) -> Result<&Self> {
        if value.is_empty() {
            ::log::debug!("{} empty on {}", label, self.url());
            return Err(CheckError::FieldEmpty {
                field: label.to_string(),
                url: self.url().to_string(),
            });
        }
        Ok(self)
    }

    /// Fails with `FieldMismatch` unless `value` equals `expected` exactly
    pub fn has_equal_to(&self, label: &str, value: &str, expected: &str) -> Result<&Self> {
        if value != expected {
            return Err(CheckError::FieldMismatch {
                field: label.to_string(),
                url: self.url().to_string(),
                actual: value.to_string(),
                expected: expected.to_string(),
            });
        }
        Ok(self)
    }

    pub fn is_true(&self, flag: bool, condition: &str) -> Result<&Self> {
        self.has_polarity(flag, true, condition)
    }

    pub fn is_false(&self, flag: bool, condition: &str) -> Result<&Self> {
        self.has_polarity(flag, false, condition)
    }

    fn has_polarity(&self, flag: bool, expected: bool, condition: &str) -> Result<&Self> {
        if flag != expected {
            return Err(CheckError::BooleanInvariantViolated {
                condition: condition.to_string(),
                url: self.url().to_string(),
            });
        }
        Ok(self)
    }

    fn unsupported(&self, field: Field) -> CheckError {
        CheckError::FieldUnsupported {
            field: field.label().to_string(),
            kind: self.actual.kind().to_string(),
            url: self.url().to_string(),
        }
    }

    fn require<T>(&self, field: Field, value: Option<T>) -> Result<T> {
        value.ok_or_else(|| self.unsupported(field))
    }

    /// The breadcrumb trail must contain at least one link
    pub fn has_breadcrumbs(&self) -> Result<&Self> {
        let links = self.actual.base_data().breadcrumbs_links();
        if links.is_empty() {
            return Err(CheckError::FieldEmpty {
                field: Field::BreadcrumbsLinks.label().to_string(),
                url: self.url().to_string(),
            });
        }
        Ok(self)
    }

    pub fn has_breadcrumbs_text(&self) -> Result<&Self> {
        let text = self.actual.base_data().breadcrumbs_text();
        self.has_non_empty(Field::BreadcrumbsText.label(), text)
    }

    pub fn has_title(&self) -> Result<&Self> {
        let title = self.actual.base_data().title();
        self.has_non_empty(Field::Title.label(), title)
    }

    pub fn has_title_equal_to(&self, expected: &str) -> Result<&Self> {
        let title = self.actual.base_data().title();
        self.has_equal_to(Field::Title.label(), title, expected)
    }

    pub fn has_canonical(&self) -> Result<&Self> {
        let canonical = self.actual.base_data().canonical();
        self.has_non_empty(Field::Canonical.label(), canonical)
    }

    pub fn has_canonical_equal_to(&self, expected: &str) -> Result<&Self> {
        let canonical = self.actual.base_data().canonical();
        self.has_equal_to(Field::Canonical.label(), canonical, expected)
    }

    pub fn has_meta_description(&self) -> Result<&Self> {
        let meta = self.actual.base_data().meta_description();
        self.has_non_empty(Field::MetaDescription.label(), meta)
    }

    pub fn has_meta_description_equal_to(&self, expected: &str) -> Result<&Self> {
        let meta = self.actual.base_data().meta_description();
        self.has_equal_to(Field::MetaDescription.label(), meta, expected)
    }

    pub fn has_header1(&self) -> Result<&Self> {
        let header1 = self.require(Field::Header1, self.actual.header1())?;
        self.has_non_empty(Field::Header1.label(), header1)
    }

    pub fn has_header1_equal_to(&self, expected: &str) -> Result<&Self> {
        let header1 = self.require(Field::Header1, self.actual.header1())?;
        self.has_equal_to(Field::Header1.label(), header1, expected)
    }

    pub fn has_description(&self) -> Result<&Self> {
        let description = self.require(Field::Description, self.actual.description())?;
        self.has_non_empty(Field::Description.label(), description)
    }

    pub fn has_description_equal_to(&self, expected: &str) -> Result<&Self> {
        let description = self.require(Field::Description, self.actual.description())?;
        self.has_equal_to(Field::Description.label(), description, expected)
    }

    /// Specs are checked through their joined rendering
    pub fn has_specs(&self) -> Result<&Self> {
        let specs = self.require(Field::Specs, self.actual.specs_text())?;
        self.has_non_empty(Field::Specs.label(), &specs)
    }

    /// Specs must contain `expected` verbatim
    pub fn has_spec(&self, expected: &str) -> Result<&Self> {
        let specs = self.require(Field::Specs, self.actual.specs())?;
        if !specs.contains(expected) {
            return Err(CheckError::FieldMismatch {
                field: Field::Specs.label().to_string(),
                url: self.url().to_string(),
                actual: self.actual.specs_text().unwrap_or_default(),
                expected: expected.to_string(),
            });
        }
        Ok(self)
    }

    pub fn has_pricing(&self) -> Result<&Self> {
        let pricing = self.require(Field::Pricing, self.actual.pricing())?;
        self.has_non_empty(Field::Pricing.label(), pricing)
    }

    pub fn has_pricing_equal_to(&self, expected: &str) -> Result<&Self> {
        let pricing = self.require(Field::Pricing, self.actual.pricing())?;
        self.has_equal_to(Field::Pricing.label(), pricing, expected)
    }

    pub fn has_rating(&self) -> Result<&Self> {
        let rating = self.require(Field::Rating, self.actual.rating())?;
        self.has_non_empty(Field::Rating.label(), rating)
    }

    pub fn has_rating_equal_to(&self, expected: &str) -> Result<&Self> {
        let rating = self.require(Field::Rating, self.actual.rating())?;
        self.has_equal_to(Field::Rating.label(), rating, expected)
    }

    /// The identified flag must be set
    pub fn is_identified(&self) -> Result<&Self> {
        let identified = self.require(Field::Identified, self.actual.identified())?;
        let condition = match self.actual.kind() {
            PageKind::BrandItem => ITEM_NOT_IDENTIFIED,
            _ => BRAND_NOT_IDENTIFIED,
        };
        self.is_true(identified, condition)
    }

    /// The page image must not be the na.gif placeholder
    pub fn is_not_na_gif(&self) -> Result<&Self> {
        let na_gif = self.require(Field::NaGif, self.actual.na_gif())?;
        self.is_false(na_gif, PLACEHOLDER_NA_GIF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BasePageData, BrandFields, BrandItemFields};
    use crate::error::CheckErrorKind;

    const ACME: &str = "https://example.com/brand/acme";

    fn base(links: Vec<&str>) -> BasePageData {
        BasePageData::new(
            ACME.to_string(),
            ACME.to_string(),
            "Acme | Example".to_string(),
            String::new(),
            "Home Acme".to_string(),
            links.into_iter().map(String::from).collect(),
        )
    }

    fn brand(identified: bool, na_gif: bool) -> PageData {
        PageData::brand(
            base(vec!["https://example.com/"]),
            BrandFields {
                header1: "Acme Products".to_string(),
                description: String::new(),
                identified,
                na_gif,
            },
        )
    }

    #[test]
    fn test_brand_page_passes_all_checks() {
        let page = brand(true, false);
        let validator = assert_that(&page);
        let result = validator
            .is_identified()
            .and_then(|v| v.is_not_na_gif())
            .and_then(|v| v.has_header1_equal_to("Acme Products"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_checks_return_same_validator() {
        let page = brand(true, false);
        let validator = assert_that(&page);
        let returned = validator.is_identified().unwrap();
        assert!(std::ptr::eq(returned, &validator));
        let returned = validator.has_title().unwrap();
        assert!(std::ptr::eq(returned, &validator));
    }

    #[test]
    fn test_na_gif_violation_message() {
        let page = brand(true, true);
        let err = assert_that(&page).is_not_na_gif().unwrap_err();
        assert_eq!(err.kind(), CheckErrorKind::BooleanInvariantViolated);
        let message = err.to_string();
        assert!(message.contains("na.gif"));
        assert!(message.contains(ACME));
    }

    #[test]
    fn test_not_identified() {
        let page = brand(false, false);
        let err = assert_that(&page).is_identified().unwrap_err();
        assert_eq!(err.kind(), CheckErrorKind::BooleanInvariantViolated);
        assert_eq!(
            err.to_string(),
            format!("brand is not identified for page {}", ACME)
        );
    }

    #[test]
    fn test_empty_field_message() {
        let page = brand(true, false);
        let err = assert_that(&page).has_description().unwrap_err();
        assert_eq!(err.kind(), CheckErrorKind::FieldEmpty);
        assert_eq!(
            err.to_string(),
            format!("SEO PARAGRAPH is empty for page {}", ACME)
        );
    }

    #[test]
    fn test_equality_is_exact() {
        let page = brand(true, false);
        let v = assert_that(&page);
        assert!(v.has_header1_equal_to("Acme Products").is_ok());

        let err = v.has_header1_equal_to("acme products").unwrap_err();
        assert_eq!(err.kind(), CheckErrorKind::FieldMismatch);
        assert_eq!(
            err.to_string(),
            format!(
                "HEADER ONE for page {} is 'Acme Products' but expected 'acme products'",
                ACME
            )
        );

        let err = v.has_header1_equal_to("Acme Products ").unwrap_err();
        assert_eq!(err.kind(), CheckErrorKind::FieldMismatch);
    }

    #[test]
    fn test_generic_checks() {
        let page = brand(true, false);
        let v = assert_that(&page);
        assert!(v.has_non_empty("ANY", " ").is_ok());
        assert_eq!(
            v.has_non_empty("ANY", "").unwrap_err().kind(),
            CheckErrorKind::FieldEmpty
        );
        assert!(v.is_true(true, "cond").is_ok());
        assert!(v.is_false(false, "cond").is_ok());
        let err = v.is_true(false, "cond").unwrap_err();
        assert_eq!(err.to_string(), format!("cond for page {}", ACME));
    }

    #[test]
    fn test_empty_breadcrumbs() {
        let page = PageData::base(base(vec![]));
        let err = assert_that(&page).has_breadcrumbs().unwrap_err();
        assert_eq!(err.kind(), CheckErrorKind::FieldEmpty);
        assert!(err.to_string().contains(ACME));
    }

    #[test]
    fn test_unsupported_field_on_base_page() {
        let page = PageData::base(base(vec!["/"]));
        let err = assert_that(&page).is_identified().unwrap_err();
        assert_eq!(err.kind(), CheckErrorKind::FieldUnsupported);
        let err = assert_that(&page).has_pricing().unwrap_err();
        assert_eq!(err.kind(), CheckErrorKind::FieldUnsupported);
    }

    #[test]
    fn test_brand_item_checks() {
        let page = PageData::brand_item(
            base(vec!["/"]),
            BrandItemFields {
                header1: "Acme Robusto".to_string(),
                description: "A robusto".to_string(),
                specs: ["Shape: Robusto".to_string()].into_iter().collect(),
                pricing: "$9.99".to_string(),
                rating: String::new(),
                identified: true,
                na_gif: true,
            },
        );
        let v = assert_that(&page);
        assert!(v.has_specs().is_ok());
        assert!(v.has_spec("Shape: Robusto").is_ok());
        assert_eq!(
            v.has_spec("Shape: Toro").unwrap_err().kind(),
            CheckErrorKind::FieldMismatch
        );
        assert!(v.has_pricing_equal_to("$9.99").is_ok());
        let err = v.has_rating().unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("USER RATINGS is empty for page {}", ACME)
        );
        assert!(v.is_identified().is_ok());
        assert!(v.is_not_na_gif().is_err());
    }

    #[test]
    fn test_item_not_identified_names_item() {
        let page = PageData::brand_item(
            base(vec!["/"]),
            BrandItemFields {
                header1: "Acme Robusto".to_string(),
                description: String::new(),
                specs: Default::default(),
                pricing: "$9.99".to_string(),
                rating: String::new(),
                identified: false,
                na_gif: false,
            },
        );
        let err = assert_that(&page).is_identified().unwrap_err();
        assert_eq!(err.kind(), CheckErrorKind::BooleanInvariantViolated);
        assert_eq!(
            err.to_string(),
            format!("item is not identified for page {}", ACME)
        );
    }
}
