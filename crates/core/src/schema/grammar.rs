//! Line-oriented text grammar for field declarations.
//!
//! Each line has the form `<name>: <kind>[, option=value]*` where `kind` is
//! one of `charfield`, `integerfield` or `foreignkey`:
//!
//! ```text
//! name: charfield, max_length=100
//! season: charfield, max_length=20, choices=spring,summer,autumn,winter
//! watering_frequency: integerfield, min=1, max=10
//! garden_id: foreignkey, references=gardens
//! ```
//!
//! Lines without a colon, or whose kind is not one of the three above, are
//! skipped, so prose in a documentation block is harmless. Options may also
//! be separated by `:`. A segment without `=` continues the value of the
//! previous option, which is how `choices` lists are written.

use super::field::FieldDescriptor;
use crate::error::{Error, Result};
use tracing::debug;

/// Parses a text block into `(name, descriptor)` pairs in line order.
///
/// A `foreignkey` without `references=` is an error unless `lenient` is
/// set, in which case the column is kept without a referenced table.
pub fn parse_fields(text: &str, lenient: bool) -> Result<Vec<(String, FieldDescriptor)>> {
    let mut fields = Vec::new();
    for (number, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let Some((name, rest)) = line.split_once(':') else {
            continue;
        };
        let line_no = number + 1;
        let mut segments = rest.split([',', ':']).map(str::trim);
        let kind = segments.next().unwrap_or_default().to_ascii_lowercase();
        let descriptor = match kind.as_str() {
            "charfield" => char_field(&parse_options(segments, line_no)?, line_no)?,
            "integerfield" => integer_field(&parse_options(segments, line_no)?, line_no)?,
            "foreignkey" => foreign_key(&parse_options(segments, line_no)?, line_no, lenient)?,
            _ => {
                debug!(line = line_no, text = line, "skipping line without a field kind");
                continue;
            }
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::schema(format!("line {}: missing column name", line_no)));
        }
        fields.push((name.to_string(), descriptor));
    }
    Ok(fields)
}

/// Collects `key=value` segments following the kind.
fn parse_options<'a>(
    segments: impl Iterator<Item = &'a str>,
    line_no: usize,
) -> Result<Vec<(String, String)>> {
    let mut options: Vec<(String, String)> = Vec::new();
    for segment in segments {
        if segment.is_empty() {
            continue;
        }
        match segment.split_once('=') {
            Some((key, value)) => {
                options.push((key.trim().to_ascii_lowercase(), value.trim().to_string()));
            }
            None => match options.last_mut() {
                Some((_, value)) => {
                    value.push(',');
                    value.push_str(segment);
                }
                None => {
                    return Err(Error::schema(format!(
                        "line {}: expected option=value, got {}",
                        line_no, segment
                    )))
                }
            },
        }
    }
    Ok(options)
}

fn char_field(options: &[(String, String)], line_no: usize) -> Result<FieldDescriptor> {
    let mut max_length = None;
    let mut choices = None;
    for (key, value) in options {
        match key.as_str() {
            "max_length" => max_length = Some(parse_number::<usize>(key, value, line_no)?),
            "choices" => {
                choices = Some(
                    value
                        .split(',')
                        .map(unquote)
                        .filter(|c| !c.is_empty())
                        .map(str::to_string)
                        .collect::<Vec<_>>(),
                )
            }
            _ => return Err(unknown_option("charfield", key, line_no)),
        }
    }
    let mut field = match max_length {
        Some(n) => FieldDescriptor::string_with_len(n),
        None => FieldDescriptor::string(),
    };
    if let Some(choices) = choices {
        field = field.choices(choices);
    }
    Ok(field)
}

fn integer_field(options: &[(String, String)], line_no: usize) -> Result<FieldDescriptor> {
    let mut field = FieldDescriptor::integer();
    for (key, value) in options {
        match key.as_str() {
            "min" => field = field.min(parse_number::<i64>(key, value, line_no)?),
            "max" => field = field.max(parse_number::<i64>(key, value, line_no)?),
            "primary_key" => {
                if parse_flag(key, value, line_no)? {
                    field = field.primary_key();
                }
            }
            _ => return Err(unknown_option("integerfield", key, line_no)),
        }
    }
    Ok(field)
}

fn foreign_key(options: &[(String, String)], line_no: usize, lenient: bool) -> Result<FieldDescriptor> {
    let mut references = None;
    for (key, value) in options {
        match key.as_str() {
            "references" => {
                let table = unquote(value);
                if !table.is_empty() {
                    references = Some(table.to_string());
                }
            }
            _ => return Err(unknown_option("foreignkey", key, line_no)),
        }
    }
    match references {
        Some(table) => Ok(FieldDescriptor::foreign_key(table)),
        None if lenient => Ok(FieldDescriptor::dangling_foreign_key()),
        None => Err(Error::schema(format!(
            "line {}: foreignkey requires references=<table>",
            line_no
        ))),
    }
}

fn unquote(value: &str) -> &str {
    value.trim().trim_matches(|c| c == '\'' || c == '"').trim()
}

fn parse_number<T: core::str::FromStr>(key: &str, value: &str, line_no: usize) -> Result<T> {
    unquote(value).parse::<T>().map_err(|_| {
        Error::schema(format!(
            "line {}: {} expects a number, got {}",
            line_no, key, value
        ))
    })
}

fn parse_flag(key: &str, value: &str, line_no: usize) -> Result<bool> {
    match unquote(value).to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(Error::schema(format!(
            "line {}: {} expects true or false, got {}",
            line_no, key, value
        ))),
    }
}

fn unknown_option(kind: &str, key: &str, line_no: usize) -> Error {
    Error::schema(format!("line {}: unknown {} option {}", line_no, kind, key))
}
