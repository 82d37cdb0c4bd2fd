//! Shared domain types for the form snapshot.
//!
//! These records mirror the persisted shape of a form definition: flat
//! collections keyed by id, with ordering carried in an explicit `index`
//! column and the component hierarchy expressed as a parent back-reference.
//! [`crate::tree`] reassembles them into a forward tree before rendering.

use serde::{Deserialize, Serialize};

/// A locale the exporter can render artifacts for.
///
/// English is always available; Welsh content comes from the parallel `cy`
/// fields of [`LocalisedText`] and falls back to English where absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Cy,
}

impl Locale {
    /// Lower-case tag used in artifact filenames (`..._all_questions_en.html`).
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Cy => "cy",
        }
    }
}

/// Text stored per-locale.
///
/// English is mandatory; Welsh is optional and falls back to English when
/// missing, so a partially translated round still exports a complete Welsh
/// artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalisedText {
    pub en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cy: Option<String>,
}

impl LocalisedText {
    pub fn new(en: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            cy: None,
        }
    }

    pub fn with_cy(en: impl Into<String>, cy: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            cy: Some(cy.into()),
        }
    }

    /// Text for the given locale, falling back to English.
    pub fn text(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Cy => self.cy.as_deref().unwrap_or(&self.en),
        }
    }
}

/// Component type tag.
///
/// The set is extensible: form definitions produced by newer authoring tools
/// may carry tags this build does not know, so unknown tags deserialize to
/// [`ComponentType::Other`] instead of failing the whole snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentType {
    TextField,
    FreeTextField,
    EmailAddressField,
    TelephoneNumberField,
    UkAddressField,
    Html,
    YesNoField,
    RadiosField,
    Para,
    DatePartsField,
    CheckboxesField,
    FileUploadField,
    WebsiteField,
    MultilineTextField,
    NumberField,
    DateField,
    SelectField,
    InsetText,
    Details,
    List,
    AutocompleteField,
    MonthYearField,
    TimeField,
    MultiInputField,
    Other(String),
}

impl ComponentType {
    /// Wire tag as stored in the snapshot.
    pub fn tag(&self) -> &str {
        match self {
            ComponentType::TextField => "TextField",
            ComponentType::FreeTextField => "FreeTextField",
            ComponentType::EmailAddressField => "EmailAddressField",
            ComponentType::TelephoneNumberField => "TelephoneNumberField",
            ComponentType::UkAddressField => "UkAddressField",
            ComponentType::Html => "Html",
            ComponentType::YesNoField => "YesNoField",
            ComponentType::RadiosField => "RadiosField",
            ComponentType::Para => "Para",
            ComponentType::DatePartsField => "DatePartsField",
            ComponentType::CheckboxesField => "CheckboxesField",
            ComponentType::FileUploadField => "FileUploadField",
            ComponentType::WebsiteField => "WebsiteField",
            ComponentType::MultilineTextField => "MultilineTextField",
            ComponentType::NumberField => "NumberField",
            ComponentType::DateField => "DateField",
            ComponentType::SelectField => "SelectField",
            ComponentType::InsetText => "InsetText",
            ComponentType::Details => "Details",
            ComponentType::List => "List",
            ComponentType::AutocompleteField => "AutocompleteField",
            ComponentType::MonthYearField => "MonthYearField",
            ComponentType::TimeField => "TimeField",
            ComponentType::MultiInputField => "MultiInputField",
            ComponentType::Other(tag) => tag,
        }
    }

    /// Selection-style components render their options as a bulleted list;
    /// everything else renders display/hint text as paragraphs.
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            ComponentType::YesNoField
                | ComponentType::RadiosField
                | ComponentType::CheckboxesField
                | ComponentType::SelectField
                | ComponentType::AutocompleteField
                | ComponentType::List
        )
    }
}

impl From<String> for ComponentType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "TextField" => ComponentType::TextField,
            "FreeTextField" => ComponentType::FreeTextField,
            "EmailAddressField" => ComponentType::EmailAddressField,
            "TelephoneNumberField" => ComponentType::TelephoneNumberField,
            "UkAddressField" => ComponentType::UkAddressField,
            "Html" => ComponentType::Html,
            "YesNoField" => ComponentType::YesNoField,
            "RadiosField" => ComponentType::RadiosField,
            "Para" => ComponentType::Para,
            "DatePartsField" => ComponentType::DatePartsField,
            "CheckboxesField" => ComponentType::CheckboxesField,
            "FileUploadField" => ComponentType::FileUploadField,
            "WebsiteField" => ComponentType::WebsiteField,
            "MultilineTextField" => ComponentType::MultilineTextField,
            "NumberField" => ComponentType::NumberField,
            "DateField" => ComponentType::DateField,
            "SelectField" => ComponentType::SelectField,
            "InsetText" => ComponentType::InsetText,
            "Details" => ComponentType::Details,
            "List" => ComponentType::List,
            "AutocompleteField" => ComponentType::AutocompleteField,
            "MonthYearField" => ComponentType::MonthYearField,
            "TimeField" => ComponentType::TimeField,
            "MultiInputField" => ComponentType::MultiInputField,
            _ => ComponentType::Other(tag),
        }
    }
}

impl From<ComponentType> for String {
    fn from(t: ComponentType) -> Self {
        t.tag().to_string()
    }
}

/// A grant programme owning one or more rounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundRecord {
    pub id: String,
    /// Short code used in artifact filenames (lower-cased on output).
    pub short_name: String,
    pub title: LocalisedText,
}

/// A time-boxed instance of a fund's application process, owning pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundRecord {
    pub id: String,
    pub fund_id: String,
    /// Short code used in output paths and artifact filenames.
    pub short_name: String,
    pub title: LocalisedText,
}

/// A top-level organizational unit of a round's application form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    pub id: String,
    pub round_id: String,
    /// Explicit ordinal assigned at authoring time; pages render in this order.
    pub index: u32,
    /// Display title. May carry a stale authored numeric prefix ("1.1 About
    /// you") which the exporter strips before assigning canonical numbers.
    pub title: LocalisedText,
    /// "Do not show on web summary" flag. Hidden pages are dropped before
    /// numbering, so they never receive a heading number or a TOC entry.
    #[serde(default)]
    pub hidden_from_summary: bool,
}

/// A sub-unit of a page, owning components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionRecord {
    pub id: String,
    pub page_id: String,
    pub index: u32,
    pub title: LocalisedText,
}

/// A single form element: question, text block, upload field, etc.
///
/// Nesting is stored as a back-reference: a child carries its parent's id in
/// `parent_id` while still belonging to the same section. Top-level
/// components have `parent_id == None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: String,
    pub section_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub index: u32,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub title: LocalisedText,
    /// Help/hint text shown beneath the question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<LocalisedText>,
    /// Informational components (Html, Para, ...) usually hide their title
    /// and render it as body text instead.
    #[serde(default)]
    pub hide_title: bool,
    /// Options for selection-style components (radios, checkboxes, selects).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<LocalisedText>,
}
