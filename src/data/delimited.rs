//! Delimited text dataset implementation
//!
//! Each non-empty line is one record. Fields are split on a literal
//! separator; the label is the last field, or the first when `reverse` is
//! set, or absent when `no_label` is set. With `bias_feature` a constant
//! 1.0 is prepended to the features.
//!
//! Example (label first, comma separated):
//! 1,0.2,0.3
//! -1,1.4,0.7

use crate::core::{ArowConfig, ArowError, Dataset, Instance, Result};
use log::{error, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// How records are laid out in the input
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderOptions {
    pub separator: String,
    /// Label occupies the first field instead of the last
    pub reverse: bool,
    /// No label field; every field is a feature
    pub no_label: bool,
    /// Prepend a constant 1.0 feature
    pub bias_feature: bool,
    /// Drop unparsable lines with a warning instead of failing the load
    pub skip_malformed: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            separator: ",".to_string(),
            reverse: false,
            no_label: false,
            bias_feature: false,
            skip_malformed: false,
        }
    }
}

impl From<&ArowConfig> for ReaderOptions {
    fn from(config: &ArowConfig) -> Self {
        Self {
            separator: config.separator.clone(),
            reverse: config.reverse,
            no_label: config.no_label,
            bias_feature: config.bias_feature,
            skip_malformed: config.skip_malformed,
        }
    }
}

/// Dataset loaded from a delimited text file
#[derive(Debug, Clone)]
pub struct DelimitedDataset {
    instances: Vec<Instance>,
    dimensions: usize,
}

impl DelimitedDataset {
    /// Load a dataset from a delimited text file
    pub fn from_file<P: AsRef<Path>>(path: P, options: &ReaderOptions) -> Result<Self> {
        let file = File::open(path).map_err(ArowError::IoError)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader, options)
    }

    /// Load a dataset from a reader (for testing and flexibility)
    pub fn from_reader<R: BufRead>(reader: R, options: &ReaderOptions) -> Result<Self> {
        if options.separator.is_empty() {
            return Err(ArowError::InvalidParameter(
                "separator must not be empty".to_string(),
            ));
        }

        let mut instances: Vec<Instance> = Vec::new();
        let mut skipped = 0usize;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(ArowError::IoError)?;
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parsed = Self::parse_line(line, options).and_then(|instance| {
                match instances.first() {
                    Some(first) if first.dim() != instance.dim() => Err(format!(
                        "expected {} features, found {}",
                        first.dim(),
                        instance.dim()
                    )),
                    _ => Ok(instance),
                }
            });

            match parsed {
                Ok(instance) => instances.push(instance),
                Err(e) => {
                    error!("Error parsing line {}: {}", line_num + 1, e);
                    if options.skip_malformed {
                        warn!("Skipping line {}", line_num + 1);
                        skipped += 1;
                    } else {
                        return Err(ArowError::ParseError(format!(
                            "Error parsing line {}: {}",
                            line_num + 1,
                            e
                        )));
                    }
                }
            }
        }

        if instances.is_empty() {
            return Err(ArowError::EmptyDataset);
        }

        let dimensions = instances[0].dim();
        info!(
            "the number of records: {} ({} features, {} lines skipped)",
            instances.len(),
            dimensions,
            skipped
        );

        Ok(DelimitedDataset {
            instances,
            dimensions,
        })
    }

    /// Parse a single record into an instance
    fn parse_line(line: &str, options: &ReaderOptions) -> std::result::Result<Instance, String> {
        let fields: Vec<&str> = line
            .split(options.separator.as_str())
            .map(|f| f.trim())
            .collect();

        let (label_field, feature_fields) = if options.no_label {
            (None, &fields[..])
        } else if fields.len() < 2 {
            return Err(format!("line has too few fields: {line}"));
        } else if options.reverse {
            (Some(fields[0]), &fields[1..])
        } else {
            (Some(fields[fields.len() - 1]), &fields[..fields.len() - 1])
        };

        let mut features = Vec::with_capacity(feature_fields.len() + 1);
        if options.bias_feature {
            features.push(1.0);
        }
        for (idx, field) in feature_fields.iter().enumerate() {
            let value = field
                .parse::<f64>()
                .map_err(|_| format!("invalid feature value at field {}: {:?}", idx + 1, field))?;
            features.push(value);
        }

        match label_field {
            Some(field) => {
                let label = field
                    .parse::<f64>()
                    .map_err(|_| format!("invalid label: {field:?}"))?;
                Ok(Instance::new(features, label))
            }
            None => Ok(Instance::unlabeled(features)),
        }
    }

    pub fn into_instances(self) -> Vec<Instance> {
        self.instances
    }
}

impl Dataset for DelimitedDataset {
    fn len(&self) -> usize {
        self.instances.len()
    }

    fn dim(&self) -> usize {
        self.dimensions
    }

    fn instance(&self, i: usize) -> &Instance {
        &self.instances[i]
    }

    fn instances(&self) -> &[Instance] {
        &self.instances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn load(data: &str, options: &ReaderOptions) -> Result<DelimitedDataset> {
        DelimitedDataset::from_reader(Cursor::new(data), options)
    }

    #[test]
    fn test_label_last() {
        let data = "1.0,2.0,1\n3.0,4.0,-1\n";
        let dataset = load(data, &ReaderOptions::default()).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.dim(), 2);
        assert_eq!(dataset.instance(0), &Instance::new(vec![1.0, 2.0], 1.0));
        assert_eq!(dataset.instance(1), &Instance::new(vec![3.0, 4.0], -1.0));
    }

    #[test]
    fn test_reverse_with_bias() {
        let options = ReaderOptions {
            reverse: true,
            bias_feature: true,
            ..ReaderOptions::default()
        };
        let dataset = load("1,0.2,0.3\n", &options).unwrap();

        let instance = dataset.instance(0);
        assert_eq!(instance.features, vec![1.0, 0.2, 0.3]);
        assert_eq!(instance.label, Some(1.0));
        assert_eq!(dataset.dim(), 3);
    }

    #[test]
    fn test_no_label() {
        let options = ReaderOptions {
            no_label: true,
            bias_feature: true,
            ..ReaderOptions::default()
        };
        let dataset = load("0.5,1.5\n2.0,3.0\n", &options).unwrap();

        assert_eq!(dataset.dim(), 3);
        assert_eq!(dataset.instance(1), &Instance::unlabeled(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_custom_separator() {
        let options = ReaderOptions {
            separator: " ".to_string(),
            reverse: true,
            ..ReaderOptions::default()
        };
        let dataset = load("-1 0.5 1.5\n+1 2.0 3.0\n", &options).unwrap();
        assert_eq!(dataset.instance(0), &Instance::new(vec![0.5, 1.5], -1.0));
        assert_eq!(dataset.instance(1), &Instance::new(vec![2.0, 3.0], 1.0));
    }

    #[test]
    fn test_empty_lines_and_comments() {
        let data = "# Comment\n1.0,2.0,1\n\n3.0,4.0,-1\n";
        let dataset = load(data, &ReaderOptions::default()).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_malformed_line_fails_load() {
        let data = "1.0,2.0,1\n1.0,abc,-1\n";
        let err = load(data, &ReaderOptions::default()).unwrap_err();
        match err {
            ArowError::ParseError(msg) => {
                assert!(msg.contains("line 2"), "unexpected message: {msg}");
                assert!(msg.contains("abc"), "unexpected message: {msg}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }

        let err = load("1.0,2.0,x\n", &ReaderOptions::default()).unwrap_err();
        assert!(matches!(err, ArowError::ParseError(_)));
    }

    #[test]
    fn test_malformed_line_skipped_when_requested() {
        let options = ReaderOptions {
            skip_malformed: true,
            ..ReaderOptions::default()
        };
        let data = "1.0,2.0,1\n1.0,abc,-1\n3.0,4.0,-1\n";
        let dataset = load(data, &options).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let data = "1.0,2.0,1\n1.0,2.0,3.0,-1\n";
        assert!(matches!(
            load(data, &ReaderOptions::default()),
            Err(ArowError::ParseError(_))
        ));
    }

    #[test]
    fn test_too_few_fields() {
        assert!(load("1.0\n", &ReaderOptions::default()).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            load("", &ReaderOptions::default()),
            Err(ArowError::EmptyDataset)
        ));
        assert!(matches!(
            load("# only a comment\n", &ReaderOptions::default()),
            Err(ArowError::EmptyDataset)
        ));
    }

    #[test]
    fn test_empty_separator_rejected() {
        let options = ReaderOptions {
            separator: String::new(),
            ..ReaderOptions::default()
        };
        assert!(matches!(
            load("1,2\n", &options),
            Err(ArowError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_options_from_config() {
        let config = ArowConfig::default();
        let options = ReaderOptions::from(&config);
        assert!(options.reverse);
        assert!(options.bias_feature);
        assert!(!options.no_label);
        assert_eq!(options.separator, ",");
    }
}
