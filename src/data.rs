use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Separator used when a collection field is rendered as a single string
pub const COLLECTION_SEPARATOR: &str = ",";

pub const HEADER1_FIELD_NAME: &str = Field::Header1.label();
pub const DESCRIPTION_FIELD_NAME: &str = Field::Description.label();
pub const SPECS_FIELD_NAME: &str = Field::Specs.label();
pub const PRICING_FIELD_NAME: &str = Field::Pricing.label();
pub const RATING_FIELD_NAME: &str = Field::Rating.label();
pub const IDENTIFIED_FIELD_NAME: &str = Field::Identified.label();

/// Every field a page snapshot can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Url,
    Canonical,
    Title,
    MetaDescription,
    BreadcrumbsText,
    BreadcrumbsLinks,
    Header1,
    Description,
    Specs,
    Pricing,
    Rating,
    Identified,
    NaGif,
}

impl Field {
    /// Human-readable label injected into failure messages
    pub const fn label(self) -> &'static str {
        match self {
            Field::Url => "URL",
            Field::Canonical => "CANONICAL",
            Field::Title => "TITLE",
            Field::MetaDescription => "META DESCRIPTION",
            Field::BreadcrumbsText => "BREADCRUMBS TEXT",
            Field::BreadcrumbsLinks => "BREADCRUMBS",
            Field::Header1 => "HEADER ONE",
            Field::Description => "SEO PARAGRAPH",
            Field::Specs => "SPECS",
            Field::Pricing => "PRICING",
            Field::Rating => "USER RATINGS",
            Field::Identified => "IDENTIFIED",
            Field::NaGif => "NA GIF",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which extraction to run for a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Base,
    Brand,
    BrandItem,
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageKind::Base => "base",
            PageKind::Brand => "brand",
            PageKind::BrandItem => "brand item",
        };
        f.write_str(name)
    }
}

/// Fields shared by every page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasePageData {
    url: String,
    canonical: String,
    title: String,
    meta_description: String,
    breadcrumbs_text: String,
    breadcrumbs_links: Vec<String>,
}

impl BasePageData {
    pub fn new(
        url: String,
        canonical: String,
        title: String,
        meta_description: String,
        breadcrumbs_text: String,
        breadcrumbs_links: Vec<String>,
    ) -> Self {
        Self {
            url,
            canonical,
            title,
            meta_description,
            breadcrumbs_text,
            breadcrumbs_links,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn meta_description(&self) -> &str {
        &self.meta_description
    }

    pub fn breadcrumbs_text(&self) -> &str {
        &self.breadcrumbs_text
    }

    /// Breadcrumb hrefs in DOM order
    pub fn breadcrumbs_links(&self) -> &[String] {
        &self.breadcrumbs_links
    }
}

/// Brand page payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandFields {
    pub header1: String,
    pub description: String,
    /// The site marks the brand as matched against a canonical record
    pub identified: bool,
    /// The brand image fell back to the "not available" placeholder
    pub na_gif: bool,
}

/// Brand item page payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandItemFields {
    pub header1: String,
    pub description: String,
    pub specs: BTreeSet<String>,
    pub pricing: String,
    pub rating: String,
    pub identified: bool,
    pub na_gif: bool,
}

/// Kind-specific part of a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageContent {
    Base,
    Brand(BrandFields),
    BrandItem(BrandItemFields),
}

/// Immutable snapshot of one rendered page, taken at navigation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageData {
    base: BasePageData,
    content: PageContent,
}

impl PageData {
    pub fn base(base: BasePageData) -> Self {
        Self {
            base,
            content: PageContent::Base,
        }
    }

    pub fn brand(base: BasePageData, fields: BrandFields) -> Self {
        Self {
            base,
            content: PageContent::Brand(fields),
        }
    }

    pub fn brand_item(base: BasePageData, fields: BrandItemFields) -> Self {
        Self {
            base,
            content: PageContent::BrandItem(fields),
        }
    }

    pub fn kind(&self) -> PageKind {
        match self.content {
            PageContent::Base => PageKind::Base,
            PageContent::Brand(_) => PageKind::Brand,
            PageContent::BrandItem(_) => PageKind::BrandItem,
        }
    }

    pub fn base_data(&self) -> &BasePageData {
        &self.base
    }

    pub fn content(&self) -> &PageContent {
        &self.content
    }

    pub fn url(&self) -> &str {
        self.base.url()
    }

    pub fn header1(&self) -> Option<&str> {
        match &self.content {
            PageContent::Base => None,
            PageContent::Brand(b) => Some(&b.header1),
            PageContent::BrandItem(i) => Some(&i.header1),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match &self.content {
            PageContent::Base => None,
            PageContent::Brand(b) => Some(&b.description),
            PageContent::BrandItem(i) => Some(&i.description),
        }
    }

    pub fn identified(&self) -> Option<bool> {
        match &self.content {
            PageContent::Base => None,
            PageContent::Brand(b) => Some(b.identified),
            PageContent::BrandItem(i) => Some(i.identified),
        }
    }

    pub fn na_gif(&self) -> Option<bool> {
        match &self.content {
            PageContent::Base => None,
            PageContent::Brand(b) => Some(b.na_gif),
            PageContent::BrandItem(i) => Some(i.na_gif),
        }
    }

    pub fn specs(&self) -> Option<&BTreeSet<String>> {
        match &self.content {
            PageContent::BrandItem(i) => Some(&i.specs),
            _ => None,
        }
    }

    /// Specs joined with [`COLLECTION_SEPARATOR`]
    pub fn specs_text(&self) -> Option<String> {
        self.specs().map(|specs| {
            specs
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(COLLECTION_SEPARATOR)
        })
    }

    pub fn pricing(&self) -> Option<&str> {
        match &self.content {
            PageContent::BrandItem(i) => Some(&i.pricing),
            _ => None,
        }
    }

    pub fn rating(&self) -> Option<&str> {
        match &self.content {
            PageContent::BrandItem(i) => Some(&i.rating),
            _ => None,
        }
    }
}
