//! Support for ARB resource sets: one JSON document per locale.
//!
//! A document maps keys to translated strings. Keys starting with `@` hold metadata:
//! `@@locale` names the document's locale and `@key` describes `key` with a
//! `description` and its `placeholders`. Only the default locale's document is
//! trusted for that per-key metadata.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};

use serde_json::{Map, Value, json};
use tracing::{debug, trace};

use crate::{
    error::Error,
    file_set::FileSet,
    options::ArbOptions,
    types::{Catalog, Entry},
};

/// Prefix marking a key as metadata rather than a translation.
pub const METADATA_PREFIX: char = '@';

/// In-document field naming the document's locale.
pub const LOCALE_FIELD: &str = "@@locale";

const DESCRIPTION_FIELD: &str = "description";
const PLACEHOLDERS_FIELD: &str = "placeholders";

/// One resource document and the file it came from (or goes to).
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub file_name: String,
    pub content: Map<String, Value>,
}

impl Document {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content: Map::new(),
        }
    }

    /// Parses a document; anything but a JSON object is [`Error::InvalidDocument`].
    pub fn parse(file_name: impl Into<String>, bytes: &[u8]) -> Result<Self, Error> {
        let file_name = file_name.into();
        match serde_json::from_slice::<Map<String, Value>>(bytes) {
            Ok(content) => Ok(Self { file_name, content }),
            Err(source) => Err(Error::InvalidDocument {
                file: file_name,
                source,
            }),
        }
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = serde_json::to_vec_pretty(&self.content)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn string_field(&self, key: &str) -> Option<&str> {
        self.content.get(key).and_then(Value::as_str)
    }

    /// Translation keys, i.e. every top-level key without the metadata prefix.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.content
            .keys()
            .filter(|key| !key.starts_with(METADATA_PREFIX))
    }

    /// The `@key` metadata of `key`: its description and placeholder names.
    /// Missing or malformed metadata yields an empty description and no parameters.
    pub fn metadata_for(&self, key: &str) -> (String, BTreeSet<String>) {
        let metadata_key = format!("{}{}", METADATA_PREFIX, key);
        let Some(metadata) = self.content.get(&metadata_key).and_then(Value::as_object) else {
            return (String::new(), BTreeSet::new());
        };

        let description = metadata
            .get(DESCRIPTION_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let parameters = metadata
            .get(PLACEHOLDERS_FIELD)
            .and_then(Value::as_object)
            .map(|placeholders| placeholders.keys().cloned().collect())
            .unwrap_or_default();
        (description, parameters)
    }
}

/// Splits a file name into stem and extension at the last dot.
fn split_extension(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rfind('.') {
        Some(dot) => (&file_name[..dot], Some(&file_name[dot + 1..])),
        None => (file_name, None),
    }
}

/// Whether `file_name` has the resource extension (case-insensitive).
pub fn is_resource_file(file_name: &str, extension: &str) -> bool {
    split_extension(file_name)
        .1
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// The last `_`-delimited segment of the file stem: `app_ru.arb` → `ru`.
/// A stem without underscores is taken whole.
pub fn locale_from_file_name(file_name: &str) -> &str {
    let (stem, _) = split_extension(file_name);
    stem.rsplit('_').next().unwrap_or_default()
}

/// The document's locale: `@@locale` when set, otherwise derived from the file name.
/// Always lower-case.
pub fn infer_locale(document: &Document) -> Result<String, Error> {
    let locale = match document.string_field(LOCALE_FIELD) {
        Some(locale) if !locale.is_empty() => locale,
        _ => locale_from_file_name(&document.file_name),
    };
    if locale.is_empty() {
        return Err(Error::CannotDetectLocale {
            file: document.file_name.clone(),
        });
    }
    Ok(locale.to_lowercase())
}

/// Lists `dir`, keeps the files with the resource extension, and parses them.
pub fn read_documents(
    files: &impl FileSet,
    dir: &Path,
    options: &ArbOptions,
) -> Result<Vec<Document>, Error> {
    let mut documents = Vec::new();
    for name in files.list_files(dir)? {
        if !is_resource_file(&name, &options.extension) {
            trace!(file = %name, "skip");
            continue;
        }
        trace!(file = %name, "read document");
        let bytes = files.read_file(dir, &name)?;
        documents.push(Document::parse(name, &bytes)?);
    }
    Ok(documents)
}

/// Merges per-locale documents into one catalog.
///
/// Documents are visited in file-name order. Descriptions and parameters come only
/// from the default locale's document.
pub fn documents_to_catalog(
    documents: &[Document],
    options: &ArbOptions,
) -> Result<Catalog, Error> {
    options.validate()?;
    let default_locale = options.default_locale_key();

    let mut ordered: Vec<&Document> = documents.iter().collect();
    ordered.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    let mut sources: BTreeMap<String, &str> = BTreeMap::new();
    let mut catalog = Catalog::new();

    for document in ordered {
        let locale = infer_locale(document)?;
        if let Some(first) = sources.get(&locale) {
            return Err(Error::DuplicateLocale {
                locale,
                first: first.to_string(),
                second: document.file_name.clone(),
            });
        }
        sources.insert(locale.clone(), &document.file_name);
        catalog.add_locale(&locale)?;

        let is_default = locale == default_locale;
        debug!(file = %document.file_name, %locale, is_default, "merge document");

        for key in document.keys() {
            let text = document
                .string_field(key)
                .unwrap_or_default()
                .to_string();
            let entry = catalog.entries.entry(key.clone()).or_insert_with(Entry::new);
            entry.translations.insert(locale.clone(), text);

            if is_default {
                let (description, parameters) = document.metadata_for(key);
                entry.description = description;
                entry.parameters = parameters;
            }
        }
    }

    if catalog.locales.is_empty() {
        return Err(Error::NoLocalesFound);
    }
    catalog.ensure_default_locale(&default_locale)?;

    debug!(
        entries = catalog.entries.len(),
        locales = catalog.locales.len(),
        "documents converted to catalog"
    );
    Ok(catalog)
}

fn placeholder_descriptor() -> Value {
    json!({ "type": "dynamic" })
}

/// Builds one document per locale, named from the file template.
///
/// Missing translations are omitted, explicit empty strings are kept. Only the
/// default locale's document gets `@key` metadata.
pub fn catalog_to_documents(
    catalog: &Catalog,
    options: &ArbOptions,
) -> Result<Vec<Document>, Error> {
    options.validate()?;
    options.validate_template()?;
    catalog.validate()?;
    catalog.ensure_default_locale(&options.default_locale)?;
    if let Some(key) = catalog
        .entries
        .keys()
        .find(|key| key.starts_with(METADATA_PREFIX))
    {
        return Err(Error::ReservedKey { key: key.clone() });
    }
    let default_locale = options.default_locale_key();

    let mut documents = Vec::with_capacity(catalog.locales.len());
    for locale in &catalog.locales {
        let mut document = Document::new(options.file_name_for(locale));
        document
            .content
            .insert(LOCALE_FIELD.to_string(), Value::String(locale.clone()));

        for (key, entry) in &catalog.entries {
            if let Some(text) = entry.translation(locale) {
                document
                    .content
                    .insert(key.clone(), Value::String(text.to_string()));
            }
            if *locale != default_locale {
                continue;
            }

            let mut metadata = Map::new();
            metadata.insert(
                DESCRIPTION_FIELD.to_string(),
                Value::String(entry.description.clone()),
            );
            if !entry.parameters.is_empty() {
                let placeholders = entry
                    .parameters
                    .iter()
                    .map(|name| (name.clone(), placeholder_descriptor()))
                    .collect::<Map<_, _>>();
                metadata.insert(PLACEHOLDERS_FIELD.to_string(), Value::Object(placeholders));
            }
            document.content.insert(
                format!("{}{}", METADATA_PREFIX, key),
                Value::Object(metadata),
            );
        }

        documents.push(document);
    }
    Ok(documents)
}

/// Replaces the contents of `dir` with `documents`.
///
/// The directory is cleared first and the documents are written one by one; a
/// failure midway leaves the directory partially written.
pub fn write_documents(
    files: &mut impl FileSet,
    dir: &Path,
    documents: &[Document],
) -> Result<(), Error> {
    let encoded = documents
        .iter()
        .map(|document| {
            document
                .to_bytes()
                .map(|bytes| (document.file_name.as_str(), bytes))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    files.remove_all(dir)?;
    for (file_name, bytes) in &encoded {
        trace!(file = %file_name, "write document");
        files.write_file(dir, file_name, bytes)?;
    }
    debug!(documents = documents.len(), dir = %dir.display(), "resource set written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_set::MemoryFileSet;
    use indoc::indoc;

    fn doc(file_name: &str, json: &str) -> Document {
        Document::parse(file_name, json.as_bytes()).unwrap()
    }

    #[test]
    fn test_locale_from_file_name() {
        assert_eq!(locale_from_file_name("app_ru.json"), "ru");
        assert_eq!(locale_from_file_name("my_app_en.arb"), "en");
        assert_eq!(locale_from_file_name("en.arb"), "en");
        assert_eq!(locale_from_file_name("app_.arb"), "");
    }

    #[test]
    fn test_infer_locale_from_file_name() {
        let document = doc("app_ru.json", r#"{"hello": "Privet"}"#);
        assert_eq!(infer_locale(&document).unwrap(), "ru");
    }

    #[test]
    fn test_infer_locale_prefers_locale_field_and_lowercases() {
        let document = doc("app.json", r#"{"@@locale": "FR", "hello": "Salut"}"#);
        assert_eq!(infer_locale(&document).unwrap(), "fr");
    }

    #[test]
    fn test_infer_locale_empty_field_falls_back_to_file_name() {
        let document = doc("app_de.arb", r#"{"@@locale": ""}"#);
        assert_eq!(infer_locale(&document).unwrap(), "de");
    }

    #[test]
    fn test_cannot_detect_locale() {
        let document = doc("app_.arb", "{}");
        let err = infer_locale(&document).unwrap_err();
        assert!(matches!(err, Error::CannotDetectLocale { ref file } if file == "app_.arb"));
    }

    #[test]
    fn test_is_resource_file() {
        assert!(is_resource_file("app_en.arb", "arb"));
        assert!(is_resource_file("app_en.ARB", "arb"));
        assert!(!is_resource_file("README.md", "arb"));
        assert!(!is_resource_file("arb", "arb"));
    }

    #[test]
    fn test_invalid_document_names_file() {
        let err = Document::parse("app_en.arb", b"{ not json").unwrap_err();
        assert!(matches!(err, Error::InvalidDocument { ref file, .. } if file == "app_en.arb"));

        let err = Document::parse("app_en.arb", b"[1, 2]").unwrap_err();
        assert!(matches!(err, Error::InvalidDocument { .. }));
    }

    #[test]
    fn test_metadata_only_from_default_locale() {
        let en = doc(
            "app_en.arb",
            indoc! {r#"
                {
                  "greeting": "Hello {name}",
                  "@greeting": {
                    "description": "Greets the user",
                    "placeholders": { "name": {} }
                  },
                  "plain": "Plain"
                }
            "#},
        );
        let ru = doc(
            "app_ru.arb",
            indoc! {r#"
                {
                  "greeting": "Privet {name}",
                  "@greeting": {
                    "description": "Ignored",
                    "placeholders": { "name": {}, "extra": {} }
                  },
                  "only_ru": "Tolko",
                  "@only_ru": { "description": "Also ignored" }
                }
            "#},
        );

        let catalog = documents_to_catalog(&[ru, en], &ArbOptions::default()).unwrap();
        assert_eq!(
            catalog.locales,
            BTreeSet::from(["en".to_string(), "ru".to_string()])
        );

        let greeting = catalog.entry("greeting").unwrap();
        assert_eq!(greeting.description, "Greets the user");
        assert_eq!(greeting.parameters, BTreeSet::from(["name".to_string()]));
        assert_eq!(greeting.translation("ru"), Some("Privet {name}"));

        let only_ru = catalog.entry("only_ru").unwrap();
        assert_eq!(only_ru.description, "");
        assert!(only_ru.parameters.is_empty());
        assert_eq!(only_ru.translation("en"), None);

        let plain = catalog.entry("plain").unwrap();
        assert_eq!(plain.description, "");
        assert!(plain.parameters.is_empty());
    }

    #[test]
    fn test_metadata_follows_default_locale_option() {
        let en = doc("app_en.arb", r#"{"a": "A", "@a": {"description": "en"}}"#);
        let ru = doc("app_ru.arb", r#"{"a": "Ah", "@a": {"description": "ru"}}"#);
        let options = ArbOptions::default().with_default_locale("RU");
        let catalog = documents_to_catalog(&[en, ru], &options).unwrap();
        assert_eq!(catalog.entry("a").unwrap().description, "ru");
    }

    #[test]
    fn test_duplicate_locale_names_both_files() {
        let first = doc("app_en.arb", "{}");
        let second = doc("other.arb", r#"{"@@locale": "EN"}"#);
        let err = documents_to_catalog(&[second, first], &ArbOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateLocale { ref locale, ref first, ref second }
                if locale == "en" && first == "app_en.arb" && second == "other.arb"
        ));
    }

    #[test]
    fn test_default_locale_must_be_loaded() {
        let ru = doc("app_ru.arb", r#"{"a": "A"}"#);
        let err = documents_to_catalog(&[ru], &ArbOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MissingDefaultLocale { ref locale } if locale == "en"));

        let err = documents_to_catalog(&[], &ArbOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NoLocalesFound));
    }

    #[test]
    fn test_non_string_translation_reads_as_empty() {
        let en = doc("app_en.arb", r#"{"count": 3}"#);
        let catalog = documents_to_catalog(&[en], &ArbOptions::default()).unwrap();
        assert_eq!(catalog.entry("count").unwrap().translation("en"), Some(""));
    }

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_locale("en").unwrap();
        catalog.add_locale("ru").unwrap();

        let mut greeting = Entry::new();
        greeting.description = "Greets the user".to_string();
        greeting.parameters = BTreeSet::from(["name".to_string()]);
        greeting
            .translations
            .insert("en".to_string(), "Hello {name}".to_string());
        greeting
            .translations
            .insert("ru".to_string(), String::new());
        catalog.insert_entry("greeting", greeting).unwrap();

        let mut title = Entry::new();
        title
            .translations
            .insert("en".to_string(), "Title".to_string());
        catalog.insert_entry("title", title).unwrap();
        catalog
    }

    #[test]
    fn test_catalog_to_documents() {
        let documents = catalog_to_documents(&sample_catalog(), &ArbOptions::default()).unwrap();
        assert_eq!(documents.len(), 2);

        let en = &documents[0];
        assert_eq!(en.file_name, "app_en.arb");
        assert_eq!(
            Value::Object(en.content.clone()),
            json!({
                "@@locale": "en",
                "greeting": "Hello {name}",
                "@greeting": {
                    "description": "Greets the user",
                    "placeholders": { "name": { "type": "dynamic" } }
                },
                "title": "Title",
                "@title": { "description": "" }
            })
        );

        let ru = &documents[1];
        assert_eq!(ru.file_name, "app_ru.arb");
        assert_eq!(
            Value::Object(ru.content.clone()),
            json!({ "@@locale": "ru", "greeting": "" })
        );
    }

    #[test]
    fn test_catalog_to_documents_rejects_metadata_shaped_keys() {
        for reserved in ["@greeting", "@@locale"] {
            let mut catalog = sample_catalog();
            let mut entry = Entry::new();
            entry
                .translations
                .insert("en".to_string(), "Shadow".to_string());
            catalog.insert_entry(reserved, entry).unwrap();

            let err = catalog_to_documents(&catalog, &ArbOptions::default()).unwrap_err();
            assert!(matches!(err, Error::ReservedKey { ref key } if key == reserved));
        }
    }

    #[test]
    fn test_reserved_key_leaves_directory_untouched() {
        let mut catalog = sample_catalog();
        catalog.insert_entry("@title", Entry::new()).unwrap();

        let mut files = MemoryFileSet::new();
        files.insert("l10n", "app_en.arb", "{}");
        let result = catalog_to_documents(&catalog, &ArbOptions::default())
            .and_then(|documents| write_documents(&mut files, Path::new("l10n"), &documents));

        assert!(matches!(result, Err(Error::ReservedKey { .. })));
        assert_eq!(
            files.list_files(Path::new("l10n")).unwrap(),
            vec!["app_en.arb"]
        );
    }

    #[test]
    fn test_catalog_to_documents_requires_default_locale() {
        let options = ArbOptions::default().with_default_locale("fr");
        let err = catalog_to_documents(&sample_catalog(), &options).unwrap_err();
        assert!(matches!(err, Error::MissingDefaultLocale { .. }));
    }

    #[test]
    fn test_documents_round_trip() {
        let catalog = sample_catalog();
        let documents = catalog_to_documents(&catalog, &ArbOptions::default()).unwrap();
        let reparsed = documents
            .iter()
            .map(|d| Document::parse(d.file_name.clone(), &d.to_bytes().unwrap()).unwrap())
            .collect::<Vec<_>>();
        let restored = documents_to_catalog(&reparsed, &ArbOptions::default()).unwrap();
        assert_eq!(restored, catalog);
    }

    #[test]
    fn test_read_documents_skips_other_extensions() {
        let mut files = MemoryFileSet::new();
        files.insert("l10n", "app_en.arb", r#"{"a": "A"}"#);
        files.insert("l10n", "notes.txt", "not json at all");

        let documents = read_documents(&files, Path::new("l10n"), &ArbOptions::default()).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].file_name, "app_en.arb");
    }

    #[test]
    fn test_write_documents_replaces_directory() {
        let mut files = MemoryFileSet::new();
        files.insert("l10n", "stale.txt", "old");

        let documents = catalog_to_documents(&sample_catalog(), &ArbOptions::default()).unwrap();
        write_documents(&mut files, Path::new("l10n"), &documents).unwrap();

        assert!(files.get(Path::new("l10n"), "stale.txt").is_none());
        let en = files.get(Path::new("l10n"), "app_en.arb").unwrap();
        assert!(en.ends_with(b"\n"));
        assert_eq!(
            files.list_files(Path::new("l10n")).unwrap(),
            vec!["app_en.arb", "app_ru.arb"]
        );
    }
}
