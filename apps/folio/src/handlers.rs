//! One handler per subcommand. Each returns the JSON document `main` prints.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::content::{load_collection, CollectionKind, LoadReport};
use crate::errors::AppError;
use crate::locale::{SiteLocale, SITE_LOCALES};
use crate::resume::{format_date_range, Locale, ResumeView, SkillsByCategory};
use crate::state::AppState;
use crate::theme::{color_mode_state, save_color_mode, ColorMode, HeadlessEnvironment};

#[derive(Serialize)]
struct SectionCounts {
    work: usize,
    education: usize,
    skills: usize,
    languages: usize,
    projects: usize,
    interests: usize,
    certificates: usize,
}

#[derive(Serialize)]
struct SkillsResponse {
    categories: SkillsByCategory,
    all_keywords: Vec<String>,
}

fn locale_code<'a>(state: &'a AppState, flag: Option<&'a str>) -> &'a str {
    flag.unwrap_or(&state.config.locale)
}

/// `folio resume`
pub fn handle_resume(state: &AppState, locale: Option<&str>) -> Result<Value, AppError> {
    let view = ResumeView::new(state.resume()?);
    let code = locale_code(state, locale);
    let locale = Locale::from_code(code);
    let counts = SectionCounts {
        work: view.work().len(),
        education: view.education().len(),
        skills: view.skills().len(),
        languages: view.languages().len(),
        projects: view.projects().len(),
        interests: view.interests().len(),
        certificates: view.certificates().len(),
    };
    Ok(json!({
        "basics": view.basics(),
        "locale": locale,
        "site_locale": SiteLocale::from_code(code).unwrap_or_default(),
        "sections": counts,
        "work": view.work_periods(locale),
    }))
}

/// `folio profile <network>`; a miss is a normal answer, not an error.
pub fn handle_profile(state: &AppState, network: &str) -> Result<Value, AppError> {
    let view = ResumeView::new(state.resume()?);
    Ok(match view.profile(network) {
        Some(profile) => json!({ "found": true, "profile": profile }),
        None => {
            info!("No profile for network '{network}'");
            json!({ "found": false, "network": network })
        }
    })
}

/// `folio skills`
pub fn handle_skills(state: &AppState) -> Result<Value, AppError> {
    let view = ResumeView::new(state.resume()?);
    Ok(serde_json::to_value(SkillsResponse {
        categories: view.skills_by_category(),
        all_keywords: view.all_skill_keywords(),
    })?)
}

/// `folio dates <start> [end]`; does not need the resume.
pub fn handle_dates(
    state: &AppState,
    start: &str,
    end: &str,
    locale: Option<&str>,
) -> Result<Value, AppError> {
    let locale = Locale::from_code(locale_code(state, locale));
    Ok(json!({ "range": format_date_range(start, end, locale), "locale": locale }))
}

/// `folio theme [--headless]`
pub fn handle_theme(state: &AppState, headless: bool) -> Result<Value, AppError> {
    let mode = if headless {
        color_mode_state().get(&HeadlessEnvironment)
    } else {
        color_mode_state().get(&state.theme_environment())
    };
    Ok(json!({ "mode": mode, "headless": headless }))
}

/// `folio theme set <mode>`
pub fn handle_theme_set(state: &AppState, mode: ColorMode) -> Result<Value, AppError> {
    let store = state.preferences();
    save_color_mode(&store, mode)?;
    info!("Saved color mode {mode} to {}", store.path().display());
    Ok(json!({ "saved": mode, "preferences": store.path().display().to_string() }))
}

/// `folio locales`
pub fn handle_locales() -> Result<Value, AppError> {
    let default = SiteLocale::default();
    let locales: Vec<Value> = SITE_LOCALES
        .iter()
        .map(|l| json!({ "code": l.code(), "name": l.name(), "default": *l == default }))
        .collect();
    Ok(json!({ "locales": locales }))
}

/// `folio content [collection] [--strict]`
pub fn handle_content(
    state: &AppState,
    collection: CollectionKind,
    strict: bool,
) -> Result<Value, AppError> {
    let mut report = load_collection(&state.config.content_dir, collection);
    if strict {
        report = LoadReport {
            collection,
            items: report.into_strict()?,
            rejected: Vec::new(),
        };
    }
    Ok(serde_json::to_value(report)?)
}
