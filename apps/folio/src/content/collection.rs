use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::content::frontmatter::{parse_frontmatter, split_frontmatter};
use crate::content::schema::{CollectionSchema, ARTICLES_SCHEMA, PROJECTS_SCHEMA};
use crate::content::toc::{extract_toc, TocLink};
use crate::errors::{AppError, ContentError, SchemaValidationError};
use crate::resume::date::parse_loose_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Articles,
    Projects,
}

impl CollectionKind {
    pub fn schema(self) -> &'static CollectionSchema {
        match self {
            CollectionKind::Articles => &ARTICLES_SCHEMA,
            CollectionKind::Projects => &PROJECTS_SCHEMA,
        }
    }

    /// Source directory under the content root (`articles/**/*.md`).
    pub fn dir_name(self) -> &'static str {
        self.schema().name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMeta {
    pub title: String,
    pub description: String,
    pub date: String,
    #[serde(default)]
    pub reading_time: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMeta {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub demo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "collection", rename_all = "lowercase")]
pub enum ItemMeta {
    Article(ArticleMeta),
    Project(ProjectMeta),
}

impl ItemMeta {
    pub fn title(&self) -> &str {
        match self {
            ItemMeta::Article(a) => &a.title,
            ItemMeta::Project(p) => &p.title,
        }
    }

    pub fn date(&self) -> Option<&str> {
        match self {
            ItemMeta::Article(a) => Some(&a.date),
            ItemMeta::Project(p) => p.date.as_deref(),
        }
    }
}

/// A validated markdown page.
#[derive(Debug, Clone, Serialize)]
pub struct ContentItem {
    /// Path under the collection directory, without extension, `/`-separated.
    pub slug: String,
    pub path: PathBuf,
    pub meta: ItemMeta,
    /// `##` and `###` headings of the body.
    pub toc: Vec<TocLink>,
    #[serde(skip)]
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum RejectReason {
    Unreadable(String),
    Structure(ContentError),
    Schema(Vec<SchemaValidationError>),
}

/// A page excluded from the listing.
#[derive(Debug, Clone, Serialize)]
pub struct Rejected {
    pub path: PathBuf,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub collection: CollectionKind,
    pub items: Vec<ContentItem>,
    pub rejected: Vec<Rejected>,
}

impl LoadReport {
    /// Build-failure policy: any rejected page fails the whole load.
    pub fn into_strict(self) -> Result<Vec<ContentItem>, AppError> {
        let Some(first) = self.rejected.into_iter().next() else {
            return Ok(self.items);
        };
        Err(match first.reason {
            RejectReason::Schema(errors) => AppError::SchemaValidation {
                item: first.path.display().to_string(),
                errors,
            },
            RejectReason::Structure(source) => AppError::Content {
                path: first.path,
                source,
            },
            RejectReason::Unreadable(msg) => AppError::Validation(format!(
                "{} could not be read: {msg}",
                first.path.display()
            )),
        })
    }
}

/// Loads every `.md` page of one collection under `root`.
///
/// Invalid pages are excluded and reported; a missing collection directory
/// is an empty collection. Items come back newest first.
pub fn load_collection(root: &Path, kind: CollectionKind) -> LoadReport {
    let dir = root.join(kind.dir_name());
    let mut report = LoadReport {
        collection: kind,
        items: Vec::new(),
        rejected: Vec::new(),
    };
    if !dir.is_dir() {
        info!("No {} directory at {}", kind.dir_name(), dir.display());
        return report;
    }

    let pages = WalkDir::new(&dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {e}", dir.display());
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"));

    for page in pages {
        let path = page.path().to_path_buf();
        match load_page(&dir, &path, kind) {
            Ok(item) => {
                debug!("Loaded {} ({})", item.slug, item.meta.title());
                report.items.push(item);
            }
            Err(reason) => {
                warn!("Excluding {}: {:?}", path.display(), reason);
                report.rejected.push(Rejected { path, reason });
            }
        }
    }

    sort_newest_first(&mut report.items);
    info!(
        "Loaded {} {} ({} rejected)",
        report.items.len(),
        kind.dir_name(),
        report.rejected.len()
    );
    report
}

fn load_page(dir: &Path, path: &Path, kind: CollectionKind) -> Result<ContentItem, RejectReason> {
    let raw =
        std::fs::read_to_string(path).map_err(|e| RejectReason::Unreadable(e.to_string()))?;
    let (yaml, body) = split_frontmatter(&raw).map_err(RejectReason::Structure)?;
    let frontmatter = parse_frontmatter(yaml).map_err(RejectReason::Structure)?;

    let errors = kind.schema().validate(&frontmatter);
    if !errors.is_empty() {
        return Err(RejectReason::Schema(errors));
    }

    Ok(ContentItem {
        slug: slug_for(dir, path),
        path: path.to_path_buf(),
        meta: typed_meta(frontmatter, kind)?,
        toc: extract_toc(body),
        body: body.to_string(),
    })
}

fn typed_meta(frontmatter: Mapping, kind: CollectionKind) -> Result<ItemMeta, RejectReason> {
    let value = Value::Mapping(frontmatter);
    // Already schema-checked, so a failure here is a schema/model mismatch.
    let structure =
        |e: serde_yaml::Error| RejectReason::Structure(ContentError::InvalidYaml(e.to_string()));
    Ok(match kind {
        CollectionKind::Articles => {
            ItemMeta::Article(serde_yaml::from_value(value).map_err(structure)?)
        }
        CollectionKind::Projects => {
            ItemMeta::Project(serde_yaml::from_value(value).map_err(structure)?)
        }
    })
}

fn slug_for(dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(dir).unwrap_or(path).with_extension("");
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Dated items newest first, undated last, ties by slug.
/// Dates compare as calendar dates; ones that do not parse sort after the rest.
fn sort_newest_first(items: &mut [ContentItem]) {
    items.sort_by(|a, b| match (date_key(a), date_key(b)) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| a.slug.cmp(&b.slug)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.slug.cmp(&b.slug),
    });
}

fn date_key(item: &ContentItem) -> Option<(Option<NaiveDate>, &str)> {
    item.meta
        .date()
        .map(|date| (parse_loose_date(date.trim()), date))
}
