//! Conversion options for the CSV and ARB sides.

use crate::error::Error;

/// Placeholder substituted by the locale id in ARB file templates.
pub const CULTURE_PLACEHOLDER: &str = "{culture}";

/// Column labels and default locale for the tabular (CSV) side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Header label of the key-name column. Required.
    pub name_column: String,
    /// Header label of the description column, if the table has one.
    pub description_column: Option<String>,
    /// Header label of the `;`-separated parameters column, if the table has one.
    pub parameters_column: Option<String>,
    /// Locale whose column must be present.
    pub default_locale: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            name_column: "name".to_string(),
            description_column: Some("description".to_string()),
            parameters_column: Some("parameters".to_string()),
            default_locale: "en".to_string(),
        }
    }
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name_column(mut self, label: impl Into<String>) -> Self {
        self.name_column = label.into();
        self
    }

    /// Sets the description label; an empty label disables the column.
    pub fn with_description_column(mut self, label: Option<String>) -> Self {
        self.description_column = label.filter(|l| !l.is_empty());
        self
    }

    /// Sets the parameters label; an empty label disables the column.
    pub fn with_parameters_column(mut self, label: Option<String>) -> Self {
        self.parameters_column = label.filter(|l| !l.is_empty());
        self
    }

    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// The default locale as it appears in a [`crate::Catalog`].
    pub fn default_locale_key(&self) -> String {
        self.default_locale.to_lowercase()
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.default_locale.is_empty() {
            return Err(Error::invalid_configuration("default locale is empty"));
        }
        if self.name_column.is_empty() {
            return Err(Error::invalid_configuration("name column label is empty"));
        }

        let labels = [
            Some(&self.name_column),
            self.description_column.as_ref(),
            self.parameters_column.as_ref(),
        ];
        let labels: Vec<&String> = labels.into_iter().flatten().collect();
        for (i, label) in labels.iter().enumerate() {
            if labels[i + 1..].contains(label) {
                return Err(Error::invalid_configuration(format!(
                    "column label `{}` is configured for more than one role",
                    label
                )));
            }
        }
        Ok(())
    }
}

/// Naming and default locale for the resource-set (ARB) side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArbOptions {
    /// Locale whose document carries the `@key` metadata.
    pub default_locale: String,
    /// File name template for written documents; must contain `{culture}`.
    pub file_template: String,
    /// Extension (without the dot) of files considered resource documents.
    pub extension: String,
}

impl Default for ArbOptions {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            file_template: format!("app_{}.arb", CULTURE_PLACEHOLDER),
            extension: "arb".to_string(),
        }
    }
}

impl ArbOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    pub fn with_file_template(mut self, template: impl Into<String>) -> Self {
        self.file_template = template.into();
        self
    }

    /// Sets the resource extension. A leading dot is accepted and dropped.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn default_locale_key(&self) -> String {
        self.default_locale.to_lowercase()
    }

    /// Renders the file name of the document for `locale`.
    pub fn file_name_for(&self, locale: &str) -> String {
        self.file_template.replace(CULTURE_PLACEHOLDER, locale)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.default_locale.is_empty() {
            return Err(Error::invalid_configuration("default locale is empty"));
        }
        Ok(())
    }

    /// Checks that every locale gets its own file name. Only writing needs this.
    pub fn validate_template(&self) -> Result<(), Error> {
        if !self.file_template.contains(CULTURE_PLACEHOLDER) {
            return Err(Error::invalid_configuration(format!(
                "file template `{}` must contain {}",
                self.file_template, CULTURE_PLACEHOLDER
            )));
        }
        Ok(())
    }
}
