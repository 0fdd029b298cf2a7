use std::collections::BTreeMap;
use tagsentry_core::{Result, TagsentryError};

/// Parse trailing check options into a key/value map.
///
/// Options come in `--key value` pairs; `--key=value` is accepted and
/// normalized to the paired form first. Odd arity or a key without the
/// `--` prefix rejects the whole set.
pub fn parse_extra(arguments: &[String]) -> Result<BTreeMap<String, String>> {
    let normalized = normalize(arguments);
    if normalized.len() % 2 == 1 {
        return Err(TagsentryError::InvalidOptions(
            "check options must come in '--key value' pairs".to_string(),
        ));
    }

    let mut options = BTreeMap::new();
    for pair in normalized.chunks(2) {
        let key = pair[0].strip_prefix("--").ok_or_else(|| {
            TagsentryError::InvalidOptions(format!(
                "expected an option key like '--key', got '{}'",
                pair[0]
            ))
        })?;
        options.insert(key.to_string(), pair[1].clone());
    }
    Ok(options)
}

/// Split `--key=value` tokens so downstream parsing only sees pairs.
fn normalize(arguments: &[String]) -> Vec<String> {
    let mut normalized = Vec::with_capacity(arguments.len());
    for argument in arguments {
        match argument.split_once('=') {
            Some((key, value)) => {
                normalized.push(key.to_string());
                normalized.push(value.to_string());
            }
            None => normalized.push(argument.clone()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn paired_options_parse_into_a_map() {
        let options = parse_extra(&args(&["--resource", "volume", "--team", "infra"])).unwrap();
        assert_eq!(options["resource"], "volume");
        assert_eq!(options["team"], "infra");
    }

    #[test]
    fn equals_form_is_normalized() {
        let options = parse_extra(&args(&["--resource=volume,snapshot"])).unwrap();
        assert_eq!(options["resource"], "volume,snapshot");
    }

    #[test]
    fn no_extra_arguments_means_no_options() {
        assert!(parse_extra(&[]).unwrap().is_empty());
    }

    #[test]
    fn odd_arity_is_rejected() {
        let err = parse_extra(&args(&["--resource"])).unwrap_err();
        assert!(matches!(err, TagsentryError::InvalidOptions(_)));
    }

    #[test]
    fn keys_must_carry_the_double_dash_prefix() {
        let err = parse_extra(&args(&["resource", "volume"])).unwrap_err();
        assert!(matches!(err, TagsentryError::InvalidOptions(_)));
    }

    #[test]
    fn later_duplicate_keys_win() {
        let options =
            parse_extra(&args(&["--resource", "volume", "--resource", "snapshot"])).unwrap();
        assert_eq!(options["resource"], "snapshot");
    }
}
