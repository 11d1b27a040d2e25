use serde_yaml::{Mapping, Value};

use crate::errors::ContentError;

const FENCE: &str = "---";

/// Splits a markdown page into its YAML frontmatter and body.
///
/// Frontmatter must open on the very first line with `---` and close on the
/// next line that is exactly `---`. Pages without an opening fence have no
/// frontmatter.
pub fn split_frontmatter(raw: &str) -> Result<(Option<&str>, &str), ContentError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let (first, rest) = raw.split_once('\n').unwrap_or((raw, ""));
    if first.trim_end_matches('\r') != FENCE {
        return Ok((None, raw));
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == FENCE {
            return Ok((Some(&rest[..offset]), &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    Err(ContentError::UnclosedFrontmatter)
}

/// Parses frontmatter YAML into a mapping. Absent or blank frontmatter is an
/// empty mapping so that schema validation reports the missing fields.
pub fn parse_frontmatter(yaml: Option<&str>) -> Result<Mapping, ContentError> {
    let Some(yaml) = yaml.filter(|y| !y.trim().is_empty()) else {
        return Ok(Mapping::new());
    };
    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(map)) => Ok(map),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(_) => Err(ContentError::NotAMapping),
        Err(e) => Err(ContentError::InvalidYaml(e.to_string())),
    }
}
