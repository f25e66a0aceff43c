use std::collections::BTreeMap;
use std::path::Path;

use spdlog::warn;

use crate::content::field_value::FieldValue;

const DELIMITER: &str = "---";

/// Splits `---\n<yaml>\n---\n<body>` into the raw YAML and the body.
/// Text without a leading delimiter is all body.
pub fn split_front_matter(raw: &str) -> (Option<&str>, &str) {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let trimmed = text.trim_start_matches(['\n', '\r']);

    let Some(after_open) = trimmed.strip_prefix(DELIMITER) else {
        return (None, text);
    };
    let Some(first_line_end) = after_open.find('\n') else {
        return (None, text);
    };
    if !after_open[..first_line_end].trim().is_empty() {
        return (None, text);
    }

    let yaml_start = &after_open[first_line_end + 1..];
    let mut offset = 0;
    for line in yaml_start.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let yaml = &yaml_start[..offset];
            let body = &yaml_start[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    // Opening delimiter without a closing one: nothing to split
    (None, text)
}

/// Parses front matter YAML into a field map. Broken or non-mapping YAML
/// gives an empty map.
pub fn parse_front_matter(file_name: &Path, yaml: &str) -> BTreeMap<String, FieldValue> {
    if yaml.trim().is_empty() {
        return BTreeMap::new();
    }

    match serde_yaml::from_str::<serde_yaml::Value>(yaml) {
        Ok(value) => match FieldValue::from_yaml(value) {
            FieldValue::Map(map) => map,
            FieldValue::Null => BTreeMap::new(),
            _ => {
                warn!("Front matter is not a mapping - file={}", file_name.display());
                BTreeMap::new()
            }
        },
        Err(e) => {
            warn!("Error parsing front matter: {} - file={}", e, file_name.display());
            BTreeMap::new()
        }
    }
}
